//! # Tillage Core Library
//!
//! Performance-metrics engine for tractor field monitoring.

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//!
//! This library provides:
//! - Gear ratio table and wheel slip estimation
//! - Empirical engine regression model (torque, fuel rate) and the metrics
//!   derived from it (power, specific fuel consumption, draft, drawbar power,
//!   tractive efficiency)
//! - Time-ordered sample buffer with explicit retention
//! - Slip advisory against the operator safety threshold
//! - Sample log export and import
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//! use tillage_core::prelude::*;
//!
//! let mut monitor = PerformanceMonitor::default();
//! let reading = RawReading::new(Duration::from_secs(1), 1490.0, 51.0, 27.72, 4.34, GearLabel::L1);
//! let sample = monitor.process(reading).unwrap();
//! assert_eq!(sample.status, AdvisoryStatus::Safe);
//! ```

pub mod advisory;
pub mod clock;
pub mod config;
pub mod datalog;
pub mod demo;
pub mod error;
pub mod gear;
pub mod metrics;
pub mod reading;
pub mod realtime;
pub mod slip;
pub mod unit_conversion;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::advisory::{AdvisoryEvaluator, AdvisoryStatus};
    pub use crate::clock::SampleClock;
    pub use crate::config::{ConfigError, MonitorConfig};
    pub use crate::datalog::{LogFormat, RetentionPolicy, SampleRecord, TimeSeriesBuffer};
    pub use crate::demo::DemoSource;
    pub use crate::error::EngineError;
    pub use crate::gear::{GearLabel, GearTable};
    pub use crate::metrics::{DerivedMetrics, Metric, MetricsCalculator};
    pub use crate::reading::{GeoPosition, RawReading};
    pub use crate::realtime::{PerformanceMonitor, ProcessedSample, ReadingSource, ReplaySource};
    pub use crate::slip::{SlipEstimate, SlipEstimator};
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
