//! Pre-built weather scripts
//!
//! Each scenario queues whole sampling passes on a [`ScriptedSensor`] and
//! returns how many passes it queued.

use super::ScriptedSensor;

/// Dry, mild afternoon: no indicator should fire.
pub fn clear_afternoon(sensor: &ScriptedSensor, passes: usize) -> usize {
    for i in 0..passes {
        let humidity = 55.0 + (i % 3) as f32;
        sensor.push_steady(humidity, 24.0);
    }
    passes
}

/// Rain front arriving: a jump, then saturated air for a while.
pub fn rain_front(sensor: &ScriptedSensor, saturated_passes: usize) -> usize {
    sensor.push_pass(70.0, 83.0, 19.0);
    for _ in 0..saturated_passes {
        sensor.push_steady(93.0, 17.5);
    }
    1 + saturated_passes
}

/// Cool, damp evening drifting toward the dew point.
pub fn damp_evening(sensor: &ScriptedSensor, passes: usize) -> usize {
    for _ in 0..passes {
        sensor.push_steady(89.0, 11.0);
    }
    passes
}
