//! Monitor configuration
//!
//! JSON-backed settings for the metrics engine. Every field has a default,
//! so a config file only needs the values it changes.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::advisory::DEFAULT_SLIP_THRESHOLD_PERCENT;
use crate::gear::GearTable;
use crate::metrics::RegressionCoefficients;
use crate::slip::{wheel_constant_for_diameter, DEFAULT_WHEEL_DIAMETER_M};

/// Errors loading, saving or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// File access failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File is not valid config JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A value is outside its allowed range
    #[error("Invalid value for '{field}': {message}")]
    Invalid {
        /// Config field name
        field: &'static str,
        /// What is wrong with it
        message: String,
    },
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Gear label -> ratio
    pub gear_ratios: GearTable,
    /// Slip wheel constant `k` (km/h per wheel rpm)
    pub wheel_constant: f64,
    /// Slip above this is reported as over limit (%)
    pub slip_threshold_percent: f64,
    /// Samples older than this are pruned; unset keeps everything
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retention_secs: Option<f64>,
    /// Logical time between samples (ms)
    pub sample_interval_ms: u64,
    /// Torque and fuel polynomial coefficients
    pub regression: RegressionCoefficients,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            gear_ratios: GearTable::canonical(),
            wheel_constant: wheel_constant_for_diameter(DEFAULT_WHEEL_DIAMETER_M),
            slip_threshold_percent: DEFAULT_SLIP_THRESHOLD_PERCENT,
            retention_secs: None,
            sample_interval_ms: 1000,
            regression: RegressionCoefficients::default(),
        }
    }
}

impl MonitorConfig {
    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: MonitorConfig = serde_json::from_str(&content)?;
        config.validate()?;
        info!("Loaded monitor config from {}", path.display());
        Ok(config)
    }

    /// Save as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Check values the type system cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.wheel_constant.is_finite() || self.wheel_constant <= 0.0 {
            return Err(invalid(
                "wheel_constant",
                format!("must be finite and positive, got {}", self.wheel_constant),
            ));
        }
        if !self.slip_threshold_percent.is_finite() {
            return Err(invalid(
                "slip_threshold_percent",
                format!("must be finite, got {}", self.slip_threshold_percent),
            ));
        }
        if let Some(secs) = self.retention_secs {
            if !secs.is_finite() || secs <= 0.0 {
                return Err(invalid(
                    "retention_secs",
                    format!("must be finite and positive, got {secs}"),
                ));
            }
            if let Err(e) = Duration::try_from_secs_f64(secs) {
                return Err(invalid("retention_secs", format!("{e}, got {secs}")));
            }
        }
        if self.sample_interval_ms == 0 {
            return Err(invalid("sample_interval_ms", "must be at least 1".into()));
        }
        if !self.regression.is_finite() {
            return Err(invalid(
                "regression",
                "coefficients must be finite".into(),
            ));
        }
        Ok(())
    }

    /// Retention window, if one is configured.
    ///
    /// A window that does not fit a `Duration` is treated as unset;
    /// [`MonitorConfig::validate`] rejects it.
    pub fn retention(&self) -> Option<Duration> {
        self.retention_secs
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
    }

    /// Logical sample interval
    pub fn sample_interval(&self) -> Duration {
        Duration::from_millis(self.sample_interval_ms)
    }
}

fn invalid(field: &'static str, message: String) -> ConfigError {
    ConfigError::Invalid { field, message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gear::GearLabel;

    #[test]
    fn test_defaults() {
        let config = MonitorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.slip_threshold_percent, 20.0);
        assert_eq!(config.retention(), None);
        assert_eq!(config.sample_interval(), Duration::from_secs(1));
        assert_eq!(config.gear_ratios.ratio(GearLabel::L3), 80.0);
    }

    #[test]
    fn test_partial_file() {
        let json = r#"{ "wheel_constant": 0.226, "retention_secs": 60, "gear_ratios": { "H1": 32.0 } }"#;
        let config: MonitorConfig = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.wheel_constant, 0.226);
        assert_eq!(config.retention(), Some(Duration::from_secs(60)));
        assert_eq!(config.gear_ratios.ratio(GearLabel::H1), 32.0);
        assert_eq!(config.gear_ratios.ratio(GearLabel::L1), 160.0);
        assert_eq!(config.slip_threshold_percent, 20.0);
    }

    #[test]
    fn test_rejects_bad_values() {
        let config = MonitorConfig {
            wheel_constant: 0.0,
            ..MonitorConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid {
                field: "wheel_constant",
                ..
            })
        ));

        let config = MonitorConfig {
            retention_secs: Some(-1.0),
            ..MonitorConfig::default()
        };
        assert!(config.validate().is_err());

        let config = MonitorConfig {
            retention_secs: Some(1e30),
            ..MonitorConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid {
                field: "retention_secs",
                ..
            })
        ));
        assert_eq!(config.retention(), None);

        let json = r#"{ "gear_ratios": { "L1": -160.0 } }"#;
        assert!(serde_json::from_str::<MonitorConfig>(json).is_err());

        let json = r#"{ "gear_ratios": { "R1": 100.0 } }"#;
        assert!(serde_json::from_str::<MonitorConfig>(json).is_err());
    }
}
