//! Empirical engine regression model
//!
//! Torque and fuel rate are fitted polynomials over two variables derived
//! from the throttle linkage:
//!
//! - `z = 24.49 · throttle% + 42.483`, the governed no-load speed (rpm)
//! - `r = z − engine rpm`, the governor droop under load
//!
//! Torque (N·m):
//! `T = t0 + t1·r + t2·z + t3·r² + t4·r·z + t5·r³`
//!
//! Fuel rate (L/h):
//! `F = f0 + f1·z + f2·r + f3·r² + f4·r·z`
//!
//! The default coefficients are placeholders, not a field calibration.
//! Load a fitted set through `MonitorConfig::regression` before trusting
//! torque, fuel, power or tractive efficiency figures.

use serde::{Deserialize, Serialize};

/// Slope of the throttle linkage linearization (rpm per %)
pub const LINKAGE_SLOPE: f64 = 24.49;

/// Intercept of the throttle linkage linearization (rpm)
pub const LINKAGE_INTERCEPT: f64 = 42.483;

/// Placeholder torque polynomial coefficients `[t0..t5]`.
///
/// Not fitted to any engine; replace with a calibrated set.
pub const DEFAULT_TORQUE_COEFFICIENTS: [f64; 6] = [52.0, 0.42, 0.071, -1.1e-4, 2.6e-5, -3.0e-8];

/// Placeholder fuel polynomial coefficients `[f0..f4]`.
///
/// Not fitted to any engine; replace with a calibrated set.
pub const DEFAULT_FUEL_COEFFICIENTS: [f64; 5] = [0.85, 1.9e-3, 6.5e-3, 4.0e-6, 1.2e-6];

/// Linkage variables for one reading
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkagePoint {
    /// Governed no-load speed
    pub z: f64,
    /// Governor droop
    pub r: f64,
}

impl LinkagePoint {
    /// Linearize throttle setting and engine speed
    pub fn new(throttle_percent: f64, engine_speed_rpm: f64) -> Self {
        let z = LINKAGE_SLOPE * throttle_percent + LINKAGE_INTERCEPT;
        Self {
            z,
            r: z - engine_speed_rpm,
        }
    }
}

/// Fitted coefficients for the torque and fuel polynomials
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionCoefficients {
    /// Torque polynomial `[t0..t5]`
    pub torque: [f64; 6],
    /// Fuel polynomial `[f0..f4]`
    pub fuel: [f64; 5],
}

impl RegressionCoefficients {
    /// Engine torque (N·m) at a linkage point
    pub fn torque_nm(&self, p: LinkagePoint) -> f64 {
        let [t0, t1, t2, t3, t4, t5] = self.torque;
        let (r, z) = (p.r, p.z);
        t0 + t1 * r + t2 * z + t3 * r * r + t4 * r * z + t5 * r * r * r
    }

    /// Fuel consumption (L/h) at a linkage point
    pub fn fuel_lh(&self, p: LinkagePoint) -> f64 {
        let [f0, f1, f2, f3, f4] = self.fuel;
        let (r, z) = (p.r, p.z);
        f0 + f1 * z + f2 * r + f3 * r * r + f4 * r * z
    }

    /// True when every coefficient is finite
    pub fn is_finite(&self) -> bool {
        self.torque.iter().chain(self.fuel.iter()).all(|c| c.is_finite())
    }
}

impl Default for RegressionCoefficients {
    fn default() -> Self {
        Self {
            torque: DEFAULT_TORQUE_COEFFICIENTS,
            fuel: DEFAULT_FUEL_COEFFICIENTS,
        }
    }
}
