//! Metrics calculator
//!
//! Closed-form derivation of [`DerivedMetrics`] from one reading.
//! Quantities that are physically undefined at zero engine power or zero
//! forward speed are reported as 0 instead of failing.

use std::f64::consts::PI;

use super::regression::{LinkagePoint, RegressionCoefficients};
use super::DerivedMetrics;
use crate::error::{EngineError, Result};
use crate::reading::RawReading;
use crate::unit_conversion::{DIESEL_DENSITY_G_PER_L, WATTS_PER_HP};

/// Implement working width (m)
const IMPLEMENT_WIDTH_M: f64 = 0.6;

/// Stateless metrics calculator for one engine model
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsCalculator {
    model: RegressionCoefficients,
}

impl MetricsCalculator {
    /// Calculator using the given regression coefficients
    pub fn new(model: RegressionCoefficients) -> Self {
        Self { model }
    }

    /// The regression coefficients in use
    pub fn model(&self) -> &RegressionCoefficients {
        &self.model
    }

    /// Compute every derived metric for a reading and its slip.
    ///
    /// The gear ratio is accepted for symmetry with slip estimation; the
    /// regression model itself does not depend on it.
    pub fn compute(
        &self,
        raw: &RawReading,
        slip_percent: f64,
        gear_ratio: f64,
    ) -> Result<DerivedMetrics> {
        finite("slip_percent", slip_percent)?;
        finite("gear_ratio", gear_ratio)?;
        finite("engine_speed_rpm", raw.engine_speed_rpm)?;
        finite("throttle_percent", raw.throttle_percent)?;
        finite("implement_depth_cm", raw.implement_depth_cm)?;
        finite("forward_speed_kmh", raw.forward_speed_kmh)?;

        let rpm = raw.engine_speed_rpm;
        let speed = raw.forward_speed_kmh;

        let point = LinkagePoint::new(raw.throttle_percent, rpm);
        let torque = self.model.torque_nm(point);
        let fuel = self.model.fuel_lh(point);

        let power = (2.0 * PI * rpm * torque) / (60.0 * WATTS_PER_HP);

        let sfc = if power == 0.0 {
            0.0
        } else {
            (fuel * DIESEL_DENSITY_G_PER_L) / power
        };

        let fuel_per_area = if speed == 0.0 {
            0.0
        } else {
            (fuel * 10.0) / (IMPLEMENT_WIDTH_M * speed)
        };

        let draft =
            0.78 * (652.0 + 5.1 * speed * speed) * IMPLEMENT_WIDTH_M * raw.implement_depth_cm;
        let drawbar = 0.3723 * draft * speed;

        let tractive_efficiency = if power == 0.0 {
            0.0
        } else {
            drawbar * (100.0 - slip_percent) / (0.9 * power)
        };

        let metrics = DerivedMetrics {
            slip_percent,
            engine_torque_nm: torque,
            fuel_consumption_lh: fuel,
            engine_power_hp: power,
            specific_fuel_consumption_kg_hp_hr: sfc,
            fuel_consumption_per_area_lha: fuel_per_area,
            implement_draft_kn: draft,
            drawbar_power_hp: drawbar,
            tractive_efficiency_percent: tractive_efficiency,
        };

        if !metrics.is_finite() {
            return Err(EngineError::InvalidReading {
                field: "derived",
                value: f64::NAN,
                reason: "reading produced non-finite metrics",
            });
        }
        Ok(metrics)
    }
}

fn finite(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(EngineError::InvalidReading {
            field,
            value,
            reason: "must be finite",
        })
    }
}
