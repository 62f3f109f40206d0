//! Replay sensor for recorded readings
//!
//! Reads a JSON Lines file, one measurement per line:
//!
//! ```json
//! {"humidity": 62.5, "temperature": 18.2}
//! {"humidity": 71.0, "temperature": 17.9}
//! ```
//!
//! Blank lines are skipped. A malformed line fails that one read with
//! [`SensorError::ReadFailed`] and the replay moves on, the same way a real
//! sensor fails a cycle without stopping the loop. At the end of the file
//! the replay either starts over (`looping`) or times out every read.

use std::{
    fs,
    io::{BufRead, BufReader, Read},
    path::Path,
};

use rainwatch_core::{traits::HumiditySensor, Measurement, SensorError};

use crate::ConnectorError;

/// Statistics for a replay
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReplayStats {
    /// Readings returned successfully
    pub readings: usize,
    /// Lines that failed to parse
    pub parse_errors: usize,
    /// Times the replay wrapped around
    pub loops: usize,
}

/// Sensor replaying recorded JSON Lines
#[derive(Debug)]
pub struct ReplaySensor {
    lines: Vec<(usize, String)>,
    cursor: usize,
    looping: bool,
    stats: ReplayStats,
}

impl ReplaySensor {
    /// Load a recording from `path`
    pub fn open(path: impl AsRef<Path>, looping: bool) -> Result<Self, ConnectorError> {
        let path = path.as_ref();
        let file = fs::File::open(path)?;
        let sensor = Self::from_reader(file, looping)?;

        log::info!(
            "Replaying {} readings from {}{}",
            sensor.len(),
            path.display(),
            if looping { " (looping)" } else { "" }
        );
        Ok(sensor)
    }

    /// Load a recording from any reader
    pub fn from_reader(reader: impl Read, looping: bool) -> Result<Self, ConnectorError> {
        let mut lines = Vec::new();
        for (index, line) in BufReader::new(reader).lines().enumerate() {
            let line = line?;
            if !line.trim().is_empty() {
                lines.push((index + 1, line));
            }
        }

        Ok(Self { lines, cursor: 0, looping, stats: ReplayStats::default() })
    }

    /// Number of non-blank lines in the recording
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines not replayed yet in the current pass
    pub fn remaining(&self) -> usize {
        self.lines.len() - self.cursor
    }

    pub fn stats(&self) -> &ReplayStats {
        &self.stats
    }

    fn next_index(&mut self) -> Option<usize> {
        if self.cursor >= self.lines.len() {
            if !self.looping || self.lines.is_empty() {
                return None;
            }
            self.cursor = 0;
            self.stats.loops += 1;
            log::debug!("Replay wrapped around");
        }

        let index = self.cursor;
        self.cursor += 1;
        Some(index)
    }
}

impl HumiditySensor for ReplaySensor {
    fn read_measurement(&mut self) -> Result<Measurement, SensorError> {
        let Some(index) = self.next_index() else {
            return Err(SensorError::Timeout);
        };
        let (number, line) = &self.lines[index];

        match serde_json::from_str::<Measurement>(line) {
            Ok(measurement) => {
                self.stats.readings += 1;
                Ok(measurement)
            }
            Err(err) => {
                log::warn!("Replay line {} is malformed: {}", number, err);
                self.stats.parse_errors += 1;
                Err(SensorError::ReadFailed { reason: "malformed replay line" })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const RECORDING: &str = r#"{"humidity": 40.0, "temperature": 20.0}

{"humidity": 48.0, "temperature": 20.0}
"#;

    #[test]
    fn test_reads_in_order_then_times_out() {
        let mut sensor = ReplaySensor::from_reader(RECORDING.as_bytes(), false).unwrap();
        assert_eq!(sensor.len(), 2);

        assert_eq!(sensor.read_measurement(), Ok(Measurement::new(40.0, 20.0)));
        assert_eq!(sensor.read_measurement(), Ok(Measurement::new(48.0, 20.0)));
        assert_eq!(sensor.read_measurement(), Err(SensorError::Timeout));
        assert_eq!(sensor.stats().readings, 2);
    }

    #[test]
    fn test_looping_wraps_around() {
        let mut sensor = ReplaySensor::from_reader(RECORDING.as_bytes(), true).unwrap();

        for _ in 0..5 {
            assert!(sensor.read_measurement().is_ok());
        }
        assert_eq!(sensor.stats().loops, 2);
        assert_eq!(sensor.remaining(), 1);
    }

    #[test]
    fn test_malformed_line_fails_one_read() {
        let recording = "{\"humidity\": 50.0, \"temperature\": 21.0}\nnot json\n{\"humidity\": 51.0, \"temperature\": 21.0}\n";
        let mut sensor = ReplaySensor::from_reader(recording.as_bytes(), false).unwrap();

        assert!(sensor.read_measurement().is_ok());
        assert!(matches!(sensor.read_measurement(), Err(SensorError::ReadFailed { .. })));
        assert_eq!(sensor.read_measurement(), Ok(Measurement::new(51.0, 21.0)));
        assert_eq!(sensor.stats().parse_errors, 1);
    }

    #[test]
    fn test_empty_recording_never_loops() {
        let mut sensor = ReplaySensor::from_reader("\n\n".as_bytes(), true).unwrap();
        assert!(sensor.is_empty());
        assert_eq!(sensor.read_measurement(), Err(SensorError::Timeout));
    }

    #[test]
    fn test_open_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(RECORDING.as_bytes()).unwrap();

        let mut sensor = ReplaySensor::open(file.path(), false).unwrap();
        assert_eq!(sensor.read_measurement(), Ok(Measurement::new(40.0, 20.0)));

        assert!(ReplaySensor::open(file.path().with_extension("missing"), false).is_err());
    }
}
