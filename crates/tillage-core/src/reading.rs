//! Raw operating readings
//!
//! One [`RawReading`] is produced by the sampling source per tick.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::gear::GearLabel;

/// GPS fix attached to a reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPosition {
    /// Latitude in degrees north
    pub latitude: f64,
    /// Longitude in degrees east
    pub longitude: f64,
}

/// Raw machine-operating reading for one tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawReading {
    /// Elapsed time since stream start
    #[serde(default)]
    pub timestamp: Duration,
    /// Engine speed (rpm)
    pub engine_speed_rpm: f64,
    /// Throttle setting (%)
    pub throttle_percent: f64,
    /// Implement depth (cm)
    pub implement_depth_cm: f64,
    /// Actual forward ground speed (km/h)
    pub forward_speed_kmh: f64,
    /// Selected gear
    pub gear: GearLabel,
    /// Position, when the feed has a GPS fix
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<GeoPosition>,
}

impl RawReading {
    /// Create a reading without a position fix
    pub fn new(
        timestamp: Duration,
        engine_speed_rpm: f64,
        throttle_percent: f64,
        implement_depth_cm: f64,
        forward_speed_kmh: f64,
        gear: GearLabel,
    ) -> Self {
        Self {
            timestamp,
            engine_speed_rpm,
            throttle_percent,
            implement_depth_cm,
            forward_speed_kmh,
            gear,
            position: None,
        }
    }

    /// Attach a GPS fix
    pub fn with_position(mut self, latitude: f64, longitude: f64) -> Self {
        self.position = Some(GeoPosition {
            latitude,
            longitude,
        });
        self
    }

    /// Check every field against its physical domain
    pub fn validate(&self) -> Result<()> {
        check_finite("engine_speed_rpm", self.engine_speed_rpm)?;
        check_finite("throttle_percent", self.throttle_percent)?;
        check_finite("implement_depth_cm", self.implement_depth_cm)?;
        check_finite("forward_speed_kmh", self.forward_speed_kmh)?;

        if self.engine_speed_rpm <= 0.0 {
            return Err(invalid(
                "engine_speed_rpm",
                self.engine_speed_rpm,
                "must be positive",
            ));
        }
        if !(0.0..=100.0).contains(&self.throttle_percent) {
            return Err(invalid(
                "throttle_percent",
                self.throttle_percent,
                "must be within 0-100",
            ));
        }
        if self.implement_depth_cm <= 0.0 {
            return Err(invalid(
                "implement_depth_cm",
                self.implement_depth_cm,
                "must be positive",
            ));
        }
        if self.forward_speed_kmh < 0.0 {
            return Err(invalid(
                "forward_speed_kmh",
                self.forward_speed_kmh,
                "must not be negative",
            ));
        }
        if let Some(pos) = &self.position {
            check_finite("latitude", pos.latitude)?;
            check_finite("longitude", pos.longitude)?;
        }
        Ok(())
    }
}

fn check_finite(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, value, "must be finite"))
    }
}

fn invalid(field: &'static str, value: f64, reason: &'static str) -> EngineError {
    EngineError::InvalidReading {
        field,
        value,
        reason,
    }
}
