//! Performance monitor pipeline

use std::time::Duration;

use tracing::{debug, info, warn};

use super::ReadingSource;
use crate::advisory::{AdvisoryEvaluator, AdvisoryStatus};
use crate::config::{ConfigError, MonitorConfig};
use crate::datalog::{SampleRecord, TimeSeriesBuffer};
use crate::error::{EngineError, Result};
use crate::gear::GearTable;
use crate::metrics::MetricsCalculator;
use crate::reading::RawReading;
use crate::slip::{SlipEstimate, SlipEstimator};

/// Result of processing one reading
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedSample {
    /// Record appended to the buffer
    pub record: SampleRecord,
    /// Slip with the speeds it came from
    pub slip: SlipEstimate,
    /// Advisory for this sample's slip
    pub status: AdvisoryStatus,
}

/// Counts from draining a reading source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainSummary {
    /// Readings appended to the buffer
    pub processed: usize,
    /// Readings that failed validation or ordering
    pub rejected: usize,
    /// Processed readings classified over the slip limit
    pub over_limit: usize,
}

/// Single-writer pipeline from raw readings to buffered sample records
#[derive(Debug, Clone)]
pub struct PerformanceMonitor {
    gears: GearTable,
    slip: SlipEstimator,
    calculator: MetricsCalculator,
    advisory: AdvisoryEvaluator,
    buffer: TimeSeriesBuffer,
    last_status: Option<AdvisoryStatus>,
}

impl PerformanceMonitor {
    /// Build a monitor from validated configuration
    pub fn new(config: &MonitorConfig) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        let slip = SlipEstimator::new(config.wheel_constant).map_err(|e| ConfigError::Invalid {
            field: "wheel_constant",
            message: e.to_string(),
        })?;

        Ok(Self {
            gears: config.gear_ratios.clone(),
            slip,
            calculator: MetricsCalculator::new(config.regression.clone()),
            advisory: AdvisoryEvaluator::new(config.slip_threshold_percent),
            buffer: TimeSeriesBuffer::new(config.retention().into()),
            last_status: None,
        })
    }

    /// Process one reading.
    ///
    /// On error nothing is appended and the buffer is unchanged.
    pub fn process(&mut self, raw: RawReading) -> Result<ProcessedSample> {
        raw.validate()?;

        if let Some(last) = self.buffer.latest() {
            if raw.timestamp <= last.timestamp {
                return Err(EngineError::OutOfOrderSample {
                    last: last.timestamp,
                    got: raw.timestamp,
                });
            }
        }

        let ratio = self.gears.ratio(raw.gear);
        let slip = self
            .slip
            .estimate(raw.engine_speed_rpm, raw.forward_speed_kmh, ratio)?;
        let derived = self.calculator.compute(&raw, slip.slip_percent, ratio)?;

        let record = SampleRecord::new(raw, derived);
        self.buffer.append(record.clone())?;
        self.buffer.enforce_retention();

        let status = self.advisory.classify(slip.slip_percent);
        self.note_status(status, slip.slip_percent);

        debug!(
            t = record.timestamp.as_secs_f64(),
            gear = %record.raw.gear,
            slip = slip.slip_percent,
            power_hp = derived.engine_power_hp,
            "Processed sample"
        );

        Ok(ProcessedSample {
            record,
            slip,
            status,
        })
    }

    /// Process every reading a source yields, skipping rejected ones
    pub fn drain<S: ReadingSource + ?Sized>(&mut self, source: &mut S) -> DrainSummary {
        let mut summary = DrainSummary::default();
        while let Some(raw) = source.next_reading() {
            match self.process(raw) {
                Ok(sample) => {
                    summary.processed += 1;
                    if sample.status == AdvisoryStatus::OverLimit {
                        summary.over_limit += 1;
                    }
                }
                Err(e) => {
                    warn!("Rejected reading: {e}");
                    summary.rejected += 1;
                }
            }
        }
        summary
    }

    fn note_status(&mut self, status: AdvisoryStatus, slip_percent: f64) {
        if self.last_status != Some(status) {
            match status {
                AdvisoryStatus::OverLimit => warn!(
                    "Wheel slip {slip_percent:.1}% above {:.1}% limit",
                    self.advisory.threshold_percent()
                ),
                AdvisoryStatus::Safe if self.last_status.is_some() => {
                    info!("Wheel slip back within limit ({slip_percent:.1}%)")
                }
                AdvisoryStatus::Safe => {}
            }
            self.last_status = Some(status);
        }
    }

    /// Classify a slip value with this monitor's threshold
    pub fn classify(&self, slip_percent: f64) -> AdvisoryStatus {
        self.advisory.classify(slip_percent)
    }

    /// Most recent record
    pub fn latest(&self) -> Option<&SampleRecord> {
        self.buffer.latest()
    }

    /// Copy of the buffered records, optionally limited to a trailing window
    pub fn snapshot(&self, window: Option<Duration>) -> Vec<SampleRecord> {
        match window {
            Some(window) => self.buffer.snapshot_window(window),
            None => self.buffer.snapshot(),
        }
    }

    /// The sample buffer
    pub fn buffer(&self) -> &TimeSeriesBuffer {
        &self.buffer
    }

    /// Gear table in use
    pub fn gears(&self) -> &GearTable {
        &self.gears
    }

    /// Advisory status of the last processed sample
    pub fn last_status(&self) -> Option<AdvisoryStatus> {
        self.last_status
    }
}

impl Default for PerformanceMonitor {
    fn default() -> Self {
        Self {
            gears: GearTable::canonical(),
            slip: SlipEstimator::default(),
            calculator: MetricsCalculator::default(),
            advisory: AdvisoryEvaluator::default(),
            buffer: TimeSeriesBuffer::unbounded(),
            last_status: None,
        }
    }
}
