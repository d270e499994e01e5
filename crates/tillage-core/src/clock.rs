//! Sample clock
//!
//! Issues a strictly increasing logical timestamp per sample, measured from
//! the start of the stream.

use std::time::{Duration, Instant};

/// Smallest step the clock will issue
const MIN_STEP: Duration = Duration::from_nanos(1);

/// How timestamps are produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockMode {
    /// `index × interval`, independent of wall time
    FixedInterval(Duration),
    /// Wall-clock time since the first tick
    Elapsed,
}

/// Monotonic per-sample timestamp source
#[derive(Debug, Clone)]
pub struct SampleClock {
    mode: ClockMode,
    start: Option<Instant>,
    last: Option<Duration>,
    ticks: u64,
}

impl SampleClock {
    /// Clock advancing by a fixed interval per tick.
    ///
    /// Intervals shorter than 1 ms are raised to 1 ms.
    pub fn fixed(interval: Duration) -> Self {
        Self::with_mode(ClockMode::FixedInterval(
            interval.max(Duration::from_millis(1)),
        ))
    }

    /// Clock following wall time since the first tick
    pub fn elapsed() -> Self {
        Self::with_mode(ClockMode::Elapsed)
    }

    fn with_mode(mode: ClockMode) -> Self {
        Self {
            mode,
            start: None,
            last: None,
            ticks: 0,
        }
    }

    /// Clock mode
    pub fn mode(&self) -> ClockMode {
        self.mode
    }

    /// Number of timestamps issued so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Last timestamp issued
    pub fn last(&self) -> Option<Duration> {
        self.last
    }

    /// Issue the next timestamp
    pub fn tick(&mut self) -> Duration {
        let candidate = match self.mode {
            ClockMode::FixedInterval(interval) => match self.last {
                None => Duration::ZERO,
                Some(last) => last.saturating_add(interval),
            },
            ClockMode::Elapsed => {
                let start = *self.start.get_or_insert_with(Instant::now);
                start.elapsed()
            }
        };

        // Wall clocks can repeat a reading; never hand out the same instant twice
        let ts = match self.last {
            Some(last) if candidate <= last => last.saturating_add(MIN_STEP),
            _ => candidate,
        };

        self.last = Some(ts);
        self.ticks += 1;
        ts
    }

    /// Forget all issued timestamps
    pub fn reset(&mut self) {
        self.start = None;
        self.last = None;
        self.ticks = 0;
    }
}
