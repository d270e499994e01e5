//! Slip advisory
//!
//! Classifies wheel slip against the operator safety threshold.

use serde::{Deserialize, Serialize};

/// Default slip safety threshold (%)
pub const DEFAULT_SLIP_THRESHOLD_PERCENT: f64 = 20.0;

/// Advisory status shown to the operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdvisoryStatus {
    /// Slip at or below the threshold
    Safe,
    /// Slip above the threshold
    OverLimit,
}

impl AdvisoryStatus {
    /// Operator-facing label
    pub fn label(&self) -> &'static str {
        match self {
            AdvisoryStatus::Safe => "Safe Limit",
            AdvisoryStatus::OverLimit => "Over Limit",
        }
    }

    /// Display color tag
    pub fn color(&self) -> &'static str {
        match self {
            AdvisoryStatus::Safe => "green",
            AdvisoryStatus::OverLimit => "red",
        }
    }
}

/// Threshold classifier for slip
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdvisoryEvaluator {
    threshold_percent: f64,
}

impl AdvisoryEvaluator {
    /// Evaluator with a custom threshold
    pub fn new(threshold_percent: f64) -> Self {
        Self { threshold_percent }
    }

    /// Threshold in use (%)
    pub fn threshold_percent(&self) -> f64 {
        self.threshold_percent
    }

    /// `OverLimit` only when slip is strictly above the threshold.
    ///
    /// NaN compares false and so classifies as `Safe`.
    pub fn classify(&self, slip_percent: f64) -> AdvisoryStatus {
        if slip_percent > self.threshold_percent {
            AdvisoryStatus::OverLimit
        } else {
            AdvisoryStatus::Safe
        }
    }
}

impl Default for AdvisoryEvaluator {
    fn default() -> Self {
        Self::new(DEFAULT_SLIP_THRESHOLD_PERCENT)
    }
}
