//! JSON-lines telemetry feed

use std::io::BufRead;

use tillage_core::clock::SampleClock;
use tillage_core::reading::RawReading;
use tillage_core::realtime::ReadingSource;
use tracing::warn;

/// Reads one JSON [`RawReading`] per line, skipping lines that do not parse
pub struct JsonLinesSource<R> {
    lines: std::io::Lines<R>,
    line_no: usize,
    clock: Option<SampleClock>,
}

impl<R: BufRead> JsonLinesSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
            clock: None,
        }
    }

    /// Replace feed timestamps with ones from `clock`
    pub fn restamp(mut self, clock: SampleClock) -> Self {
        self.clock = Some(clock);
        self
    }
}

impl<R: BufRead> ReadingSource for JsonLinesSource<R> {
    fn next_reading(&mut self) -> Option<RawReading> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => {
                    warn!("Feed read failed: {e}");
                    return None;
                }
            };
            self.line_no += 1;

            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str::<RawReading>(&line) {
                Ok(mut reading) => {
                    if let Some(clock) = self.clock.as_mut() {
                        reading.timestamp = clock.tick();
                    }
                    return Some(reading);
                }
                // Unknown gears surface here as the UnknownGear message
                Err(e) => warn!("Skipping line {}: {e}", self.line_no),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const FEED: &str = r#"
{"timestamp":{"secs":1,"nanos":0},"engine_speed_rpm":1490,"throttle_percent":51,"implement_depth_cm":27.72,"forward_speed_kmh":4.34,"gear":"L1"}
not json
{"engine_speed_rpm":1500,"throttle_percent":55,"implement_depth_cm":25,"forward_speed_kmh":3.9,"gear":"L2","position":{"latitude":22.3,"longitude":87.3}}
"#;

    #[test]
    fn test_skips_bad_lines() {
        let mut source = JsonLinesSource::new(FEED.as_bytes());
        let first = source.next_reading().unwrap();
        assert_eq!(first.timestamp, Duration::from_secs(1));
        let second = source.next_reading().unwrap();
        assert_eq!(second.timestamp, Duration::ZERO);
        assert!(second.position.is_some());
        assert!(source.next_reading().is_none());
    }

    #[test]
    fn test_unknown_gear_line_skipped() {
        let line = r#"{"engine_speed_rpm":1500,"throttle_percent":55,"implement_depth_cm":25,"forward_speed_kmh":3.9,"gear":"L5"}"#;
        let err = serde_json::from_str::<RawReading>(line).unwrap_err();
        assert!(err.to_string().contains("Unknown gear label: 'L5'"), "{err}");

        let feed = format!("{line}\n{}", FEED.trim());
        let mut source = JsonLinesSource::new(feed.as_bytes());
        assert_eq!(source.next_reading().unwrap().timestamp, Duration::from_secs(1));
        assert_eq!(source.line_no, 2);
    }

    #[test]
    fn test_restamp() {
        let mut source = JsonLinesSource::new(FEED.as_bytes())
            .restamp(SampleClock::fixed(Duration::from_secs(2)));
        assert_eq!(source.next_reading().unwrap().timestamp, Duration::ZERO);
        assert_eq!(
            source.next_reading().unwrap().timestamp,
            Duration::from_secs(2)
        );
    }
}
