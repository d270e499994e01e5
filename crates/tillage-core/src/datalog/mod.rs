//! Data Logging
//!
//! Time-ordered storage and export of processed samples.

mod buffer;
pub mod format;

pub use buffer::{RetentionPolicy, TimeSeriesBuffer};
pub use format::LogFormat;

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::metrics::{DerivedMetrics, Metric};
use crate::reading::RawReading;

/// A raw reading paired with the metrics derived from it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleRecord {
    /// Timestamp from start of the stream
    pub timestamp: Duration,
    /// Reading the metrics were derived from
    pub raw: RawReading,
    /// Derived metrics
    pub derived: DerivedMetrics,
}

impl SampleRecord {
    /// Pair a reading with its metrics, taking the reading's timestamp
    pub fn new(raw: RawReading, derived: DerivedMetrics) -> Self {
        Self {
            timestamp: raw.timestamp,
            raw,
            derived,
        }
    }

    /// Value of a single channel
    pub fn value(&self, metric: Metric) -> f64 {
        let d = &self.derived;
        match metric {
            Metric::EngineSpeed => self.raw.engine_speed_rpm,
            Metric::Throttle => self.raw.throttle_percent,
            Metric::ImplementDepth => self.raw.implement_depth_cm,
            Metric::ForwardSpeed => self.raw.forward_speed_kmh,
            Metric::Slip => d.slip_percent,
            Metric::EngineTorque => d.engine_torque_nm,
            Metric::FuelConsumption => d.fuel_consumption_lh,
            Metric::EnginePower => d.engine_power_hp,
            Metric::SpecificFuelConsumption => d.specific_fuel_consumption_kg_hp_hr,
            Metric::FuelConsumptionPerArea => d.fuel_consumption_per_area_lha,
            Metric::ImplementDraft => d.implement_draft_kn,
            Metric::DrawbarPower => d.drawbar_power_hp,
            Metric::TractiveEfficiency => d.tractive_efficiency_percent,
        }
    }
}
