//! Unit Conversion Functions
//!
//! Conversions used by the metrics engine and its displays:
//! - Speed: km/h ↔ m/s
//! - Power: hp ↔ kW, watts per mechanical horsepower

/// Watts in one horsepower as used by the regression model
pub const WATTS_PER_HP: f64 = 746.0;

/// Diesel density in grams per litre
pub const DIESEL_DENSITY_G_PER_L: f64 = 840.0;

/// Convert km/h to m/s
pub fn kmh_to_mps(kmh: f64) -> f64 {
    kmh / 3.6
}

/// Convert m/s to km/h
pub fn mps_to_kmh(mps: f64) -> f64 {
    mps * 3.6
}

/// Convert horsepower to kilowatts
pub fn hp_to_kw(hp: f64) -> f64 {
    hp * WATTS_PER_HP / 1000.0
}

/// Convert kilowatts to horsepower
pub fn kw_to_hp(kw: f64) -> f64 {
    kw * 1000.0 / WATTS_PER_HP
}
