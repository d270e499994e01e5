//! Rolling sample buffer
//!
//! Holds processed samples in timestamp order. Eviction only happens when
//! the owner calls [`TimeSeriesBuffer::prune`] or
//! [`TimeSeriesBuffer::enforce_retention`].

use std::collections::VecDeque;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::debug;

use super::SampleRecord;
use crate::error::{EngineError, Result};
use crate::metrics::Metric;

/// How long samples are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetentionPolicy {
    /// Keep every sample
    #[default]
    Unbounded,
    /// Drop samples older than `latest − window`
    Window(Duration),
}

impl From<Option<Duration>> for RetentionPolicy {
    fn from(window: Option<Duration>) -> Self {
        window.map_or(RetentionPolicy::Unbounded, RetentionPolicy::Window)
    }
}

/// Append-only, time-ordered store of sample records
#[derive(Debug, Clone)]
pub struct TimeSeriesBuffer {
    records: VecDeque<SampleRecord>,
    retention: RetentionPolicy,
    started_at: DateTime<Utc>,
}

impl TimeSeriesBuffer {
    /// Create an empty buffer with a retention policy
    pub fn new(retention: RetentionPolicy) -> Self {
        Self {
            records: VecDeque::new(),
            retention,
            started_at: Utc::now(),
        }
    }

    /// Buffer that never evicts
    pub fn unbounded() -> Self {
        Self::new(RetentionPolicy::Unbounded)
    }

    /// Buffer keeping a fixed time window
    pub fn with_window(window: Duration) -> Self {
        Self::new(RetentionPolicy::Window(window))
    }

    /// Configured retention policy
    pub fn retention(&self) -> RetentionPolicy {
        self.retention
    }

    /// Wall-clock time the buffer was created
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Append a record.
    ///
    /// Fails without modifying the buffer unless the record's timestamp is
    /// strictly after the last appended one.
    pub fn append(&mut self, record: SampleRecord) -> Result<()> {
        if let Some(last) = self.records.back() {
            if record.timestamp <= last.timestamp {
                return Err(EngineError::OutOfOrderSample {
                    last: last.timestamp,
                    got: record.timestamp,
                });
            }
        }
        self.records.push_back(record);
        Ok(())
    }

    /// Remove every record older than `latest − window`.
    ///
    /// Returns the number of records removed; `None` removes nothing.
    pub fn prune(&mut self, window: Option<Duration>) -> usize {
        let (Some(window), Some(latest)) = (window, self.latest_timestamp()) else {
            return 0;
        };
        let cutoff = latest.saturating_sub(window);

        let mut removed = 0;
        while self
            .records
            .front()
            .is_some_and(|r| r.timestamp < cutoff)
        {
            self.records.pop_front();
            removed += 1;
        }

        if removed > 0 {
            debug!("Pruned {removed} samples older than {cutoff:?}");
        }
        removed
    }

    /// Prune using the configured retention policy
    pub fn enforce_retention(&mut self) -> usize {
        match self.retention {
            RetentionPolicy::Unbounded => 0,
            RetentionPolicy::Window(window) => self.prune(Some(window)),
        }
    }

    /// Copy of every record, in append order
    pub fn snapshot(&self) -> Vec<SampleRecord> {
        self.records.iter().cloned().collect()
    }

    /// Copy of the records no older than `latest − window`
    pub fn snapshot_window(&self, window: Duration) -> Vec<SampleRecord> {
        let Some(latest) = self.latest_timestamp() else {
            return Vec::new();
        };
        let cutoff = latest.saturating_sub(window);
        self.records
            .iter()
            .filter(|r| r.timestamp >= cutoff)
            .cloned()
            .collect()
    }

    /// Most recently appended record
    pub fn latest(&self) -> Option<&SampleRecord> {
        self.records.back()
    }

    fn latest_timestamp(&self) -> Option<Duration> {
        self.records.back().map(|r| r.timestamp)
    }

    /// `(timestamp, value)` pairs of one channel, in order
    pub fn series(&self, metric: Metric) -> Vec<(Duration, f64)> {
        self.records
            .iter()
            .map(|r| (r.timestamp, r.value(metric)))
            .collect()
    }

    /// Iterate records without copying
    pub fn iter(&self) -> impl Iterator<Item = &SampleRecord> {
        self.records.iter()
    }

    /// Number of records held
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Time covered from the oldest to the newest record
    pub fn span(&self) -> Duration {
        match (self.records.front(), self.records.back()) {
            (Some(first), Some(last)) => last.timestamp - first.timestamp,
            _ => Duration::ZERO,
        }
    }

    /// Remove all records
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl Default for TimeSeriesBuffer {
    fn default() -> Self {
        Self::unbounded()
    }
}
