//! Real-time processing
//!
//! Drives raw readings through slip estimation, metric derivation, the
//! sample buffer and the slip advisory.

mod monitor;

pub use monitor::{DrainSummary, PerformanceMonitor, ProcessedSample};

use std::collections::VecDeque;

use crate::reading::RawReading;

/// Producer of raw readings, one per tick
pub trait ReadingSource {
    /// Next reading, or `None` when the stream has ended
    fn next_reading(&mut self) -> Option<RawReading>;
}

/// Source replaying a fixed list of readings
#[derive(Debug, Clone, Default)]
pub struct ReplaySource {
    readings: VecDeque<RawReading>,
}

impl ReplaySource {
    /// Replay readings in the given order
    pub fn new(readings: impl IntoIterator<Item = RawReading>) -> Self {
        Self {
            readings: readings.into_iter().collect(),
        }
    }

    /// Readings not yet handed out
    pub fn remaining(&self) -> usize {
        self.readings.len()
    }
}

impl ReadingSource for ReplaySource {
    fn next_reading(&mut self) -> Option<RawReading> {
        self.readings.pop_front()
    }
}
