//! Performance Metrics
//!
//! Derives tractor performance figures from one raw reading:
//! engine torque and fuel rate from the regression model, then power,
//! specific fuel consumption, implement draft, drawbar power and
//! tractive efficiency.

mod calculator;
pub mod regression;

pub use calculator::MetricsCalculator;
pub use regression::{LinkagePoint, RegressionCoefficients};

use serde::{Deserialize, Serialize};

/// Metrics derived from exactly one raw reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    /// Wheel slip (%)
    pub slip_percent: f64,
    /// Engine torque (N·m)
    pub engine_torque_nm: f64,
    /// Fuel consumption (L/h)
    pub fuel_consumption_lh: f64,
    /// Engine power (hp)
    pub engine_power_hp: f64,
    /// Specific fuel consumption
    pub specific_fuel_consumption_kg_hp_hr: f64,
    /// Fuel consumed per worked area (L/ha)
    pub fuel_consumption_per_area_lha: f64,
    /// Implement draft
    pub implement_draft_kn: f64,
    /// Drawbar power (hp)
    pub drawbar_power_hp: f64,
    /// Tractive efficiency (%)
    pub tractive_efficiency_percent: f64,
}

impl DerivedMetrics {
    /// True when no field is NaN or infinite
    pub fn is_finite(&self) -> bool {
        [
            self.slip_percent,
            self.engine_torque_nm,
            self.fuel_consumption_lh,
            self.engine_power_hp,
            self.specific_fuel_consumption_kg_hp_hr,
            self.fuel_consumption_per_area_lha,
            self.implement_draft_kn,
            self.drawbar_power_hp,
            self.tractive_efficiency_percent,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// A named raw or derived channel of a sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Engine speed (rpm)
    EngineSpeed,
    /// Throttle setting (%)
    Throttle,
    /// Implement depth (cm)
    ImplementDepth,
    /// Actual forward speed (km/h)
    ForwardSpeed,
    /// Wheel slip (%)
    Slip,
    /// Engine torque (N·m)
    EngineTorque,
    /// Fuel rate (L/h)
    FuelConsumption,
    /// Engine power (hp)
    EnginePower,
    /// Specific fuel consumption
    SpecificFuelConsumption,
    /// Fuel per worked area (L/ha)
    FuelConsumptionPerArea,
    /// Implement draft
    ImplementDraft,
    /// Drawbar power (hp)
    DrawbarPower,
    /// Tractive efficiency (%)
    TractiveEfficiency,
}

impl Metric {
    /// Every channel in export column order
    pub const ALL: [Metric; 13] = [
        Metric::EngineSpeed,
        Metric::Throttle,
        Metric::ImplementDepth,
        Metric::ForwardSpeed,
        Metric::Slip,
        Metric::EngineTorque,
        Metric::FuelConsumption,
        Metric::EnginePower,
        Metric::SpecificFuelConsumption,
        Metric::FuelConsumptionPerArea,
        Metric::ImplementDraft,
        Metric::DrawbarPower,
        Metric::TractiveEfficiency,
    ];

    /// Channel name used in log headers
    pub fn name(&self) -> &'static str {
        match self {
            Metric::EngineSpeed => "engineSpeed",
            Metric::Throttle => "throttle",
            Metric::ImplementDepth => "implementDepth",
            Metric::ForwardSpeed => "forwardSpeed",
            Metric::Slip => "slip",
            Metric::EngineTorque => "engineTorque",
            Metric::FuelConsumption => "fuelConsumption",
            Metric::EnginePower => "enginePower",
            Metric::SpecificFuelConsumption => "sfc",
            Metric::FuelConsumptionPerArea => "fuelPerArea",
            Metric::ImplementDraft => "implementDraft",
            Metric::DrawbarPower => "drawbarPower",
            Metric::TractiveEfficiency => "tractiveEfficiency",
        }
    }

    /// Display units
    pub fn units(&self) -> &'static str {
        match self {
            Metric::EngineSpeed => "rpm",
            Metric::Throttle | Metric::Slip | Metric::TractiveEfficiency => "%",
            Metric::ImplementDepth => "cm",
            Metric::ForwardSpeed => "km/h",
            Metric::EngineTorque => "N·m",
            Metric::FuelConsumption => "L/h",
            Metric::EnginePower | Metric::DrawbarPower => "hp",
            Metric::SpecificFuelConsumption => "kg/hp·h",
            Metric::FuelConsumptionPerArea => "L/ha",
            Metric::ImplementDraft => "kN",
        }
    }

    /// Whether the channel is computed rather than measured
    pub fn is_derived(&self) -> bool {
        !matches!(
            self,
            Metric::EngineSpeed | Metric::Throttle | Metric::ImplementDepth | Metric::ForwardSpeed
        )
    }
}
