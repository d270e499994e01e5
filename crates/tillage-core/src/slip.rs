//! Wheel slip estimation
//!
//! Compares the gear-derived theoretical ground speed with the measured
//! forward speed. Slip is reported as-is: negative values (actual speed above
//! theoretical) and values above 100% are kept.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::unit_conversion::kmh_to_mps;

/// Rear wheel diameter the default wheel constant is derived from (m)
pub const DEFAULT_WHEEL_DIAMETER_M: f64 = 1.6;

/// Wheel constant for a wheel of the given diameter.
///
/// Converts `engine rpm / gear ratio` (wheel rpm) into km/h:
/// `π · d` metres per revolution, 60 revolutions-per-minute to per-hour,
/// 1/1000 metres to kilometres.
pub fn wheel_constant_for_diameter(diameter_m: f64) -> f64 {
    std::f64::consts::PI * diameter_m * 60.0 / 1000.0
}

/// Slip result with the speeds it was derived from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlipEstimate {
    /// Corrected theoretical ground speed (km/h)
    pub theoretical_speed_kmh: f64,
    /// Measured forward speed (km/h)
    pub actual_speed_kmh: f64,
    /// Slip (%)
    pub slip_percent: f64,
}

impl SlipEstimate {
    /// Theoretical speed in m/s
    pub fn theoretical_speed_mps(&self) -> f64 {
        kmh_to_mps(self.theoretical_speed_kmh)
    }

    /// Actual speed in m/s
    pub fn actual_speed_mps(&self) -> f64 {
        kmh_to_mps(self.actual_speed_kmh)
    }
}

/// Slip estimator for one wheel geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlipEstimator {
    wheel_constant: f64,
}

impl SlipEstimator {
    /// Create an estimator with an explicit wheel constant `k`
    pub fn new(wheel_constant: f64) -> Result<Self> {
        if !wheel_constant.is_finite() || wheel_constant <= 0.0 {
            return Err(EngineError::InvalidReading {
                field: "wheel_constant",
                value: wheel_constant,
                reason: "wheel constant must be finite and positive",
            });
        }
        Ok(Self { wheel_constant })
    }

    /// The wheel constant `k`
    pub fn wheel_constant(&self) -> f64 {
        self.wheel_constant
    }

    /// Theoretical ground speed (km/h) for an engine speed in a gear
    pub fn theoretical_speed_kmh(&self, engine_speed_rpm: f64, gear_ratio: f64) -> f64 {
        (engine_speed_rpm / gear_ratio) * self.wheel_constant
    }

    /// Percentage slip, `100 · (1 − actual / theoretical)`
    pub fn estimate_slip(
        &self,
        engine_speed_rpm: f64,
        forward_speed_kmh: f64,
        gear_ratio: f64,
    ) -> Result<f64> {
        self.estimate(engine_speed_rpm, forward_speed_kmh, gear_ratio)
            .map(|e| e.slip_percent)
    }

    /// Slip together with the theoretical and actual speeds
    pub fn estimate(
        &self,
        engine_speed_rpm: f64,
        forward_speed_kmh: f64,
        gear_ratio: f64,
    ) -> Result<SlipEstimate> {
        let theoretical = self.theoretical_speed_kmh(engine_speed_rpm, gear_ratio);

        if theoretical == 0.0 || !theoretical.is_finite() || !forward_speed_kmh.is_finite() {
            return Err(EngineError::DivisionUndefined {
                theoretical_kmh: theoretical,
                actual_kmh: forward_speed_kmh,
            });
        }

        Ok(SlipEstimate {
            theoretical_speed_kmh: theoretical,
            actual_speed_kmh: forward_speed_kmh,
            slip_percent: 100.0 * (1.0 - forward_speed_kmh / theoretical),
        })
    }
}

impl Default for SlipEstimator {
    fn default() -> Self {
        Self {
            wheel_constant: wheel_constant_for_diameter(DEFAULT_WHEEL_DIAMETER_M),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_wheel_constant() {
        let k = SlipEstimator::default().wheel_constant();
        assert!((k - 1.6 * std::f64::consts::PI * 0.06).abs() < 1e-12);
    }

    #[test]
    fn test_zero_speed_is_full_slip() {
        let est = SlipEstimator::default();
        assert_eq!(est.estimate_slip(1500.0, 0.0, 160.0).unwrap(), 100.0);
    }

    #[test]
    fn test_negative_slip_preserved() {
        let est = SlipEstimator::default();
        let slip = est.estimate_slip(1490.0, 4.34, 160.0).unwrap();
        assert!(slip < 0.0);
        assert!((slip - (-54.60)).abs() < 0.1, "slip was {slip}");
    }

    #[test]
    fn test_slip_above_hundred_preserved() {
        let est = SlipEstimator::new(1.0).unwrap();
        // Backwards travel reads as more than full slip
        let slip = est.estimate_slip(1000.0, -5.0, 100.0).unwrap();
        assert_eq!(slip, 150.0);
    }

    #[test]
    fn test_zero_denominator() {
        let est = SlipEstimator::default();
        assert!(matches!(
            est.estimate_slip(0.0, 3.0, 160.0),
            Err(EngineError::DivisionUndefined { .. })
        ));
        assert!(matches!(
            est.estimate_slip(1500.0, f64::NAN, 160.0),
            Err(EngineError::DivisionUndefined { .. })
        ));
    }

    #[test]
    fn test_estimate_speeds() {
        let est = SlipEstimator::new(0.36).unwrap();
        let e = est.estimate(1000.0, 1.8, 100.0).unwrap();
        assert!((e.theoretical_speed_kmh - 3.6).abs() < 1e-12);
        assert!((e.theoretical_speed_mps() - 1.0).abs() < 1e-12);
        assert!((e.actual_speed_mps() - 0.5).abs() < 1e-12);
        assert!((e.slip_percent - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_bad_wheel_constant() {
        assert!(SlipEstimator::new(0.0).is_err());
        assert!(SlipEstimator::new(-1.2).is_err());
        assert!(SlipEstimator::new(f64::NAN).is_err());
    }
}
