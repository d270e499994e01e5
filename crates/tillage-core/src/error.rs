//! Engine errors

use std::time::Duration;
use thiserror::Error;

/// Errors surfaced by the metrics engine.
///
/// All of these are local to a single reading or append; none leave the
/// gear table or the sample buffer partially updated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Gear label outside the gear table
    #[error("Unknown gear label: '{0}'")]
    UnknownGear(String),

    /// Slip denominator is zero or not finite
    #[error("Slip undefined: theoretical speed is {theoretical_kmh} km/h, actual speed is {actual_kmh} km/h")]
    DivisionUndefined {
        /// Theoretical ground speed (km/h)
        theoretical_kmh: f64,
        /// Measured forward speed (km/h)
        actual_kmh: f64,
    },

    /// Non-finite or out-of-domain value
    #[error("Invalid reading: {field} = {value} ({reason})")]
    InvalidReading {
        /// Offending field
        field: &'static str,
        /// Value received
        value: f64,
        /// Constraint it broke
        reason: &'static str,
    },

    /// Timestamp not after the last appended sample
    #[error("Out of order sample: timestamp {got:?} is not after {last:?}")]
    OutOfOrderSample {
        /// Last appended timestamp
        last: Duration,
        /// Rejected timestamp
        got: Duration,
    },
}

/// Result alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
