//! Gear ratio table
//!
//! Maps the tractor's gear selector positions to the ratio between engine
//! speed and theoretical wheel speed.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Gear selector position
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum GearLabel {
    /// Low range, first gear
    L1,
    /// Low range, second gear
    L2,
    /// Low range, third gear
    L3,
    /// Low range, fourth gear
    L4,
    /// High range, first gear
    H1,
}

impl GearLabel {
    /// Every gear, low to high
    pub const ALL: [GearLabel; 5] = [
        GearLabel::L1,
        GearLabel::L2,
        GearLabel::L3,
        GearLabel::L4,
        GearLabel::H1,
    ];

    /// Label as printed on the selector
    pub fn as_str(&self) -> &'static str {
        match self {
            GearLabel::L1 => "L1",
            GearLabel::L2 => "L2",
            GearLabel::L3 => "L3",
            GearLabel::L4 => "L4",
            GearLabel::H1 => "H1",
        }
    }

    /// Factory ratio for this gear
    pub fn canonical_ratio(&self) -> f64 {
        match self {
            GearLabel::L1 => 160.0,
            GearLabel::L2 => 120.0,
            GearLabel::L3 => 80.0,
            GearLabel::L4 => 40.0,
            GearLabel::H1 => 30.0,
        }
    }
}

impl TryFrom<String> for GearLabel {
    type Error = EngineError;

    fn try_from(label: String) -> Result<Self> {
        label.parse()
    }
}

impl fmt::Display for GearLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GearLabel {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "L1" => Ok(GearLabel::L1),
            "L2" => Ok(GearLabel::L2),
            "L3" => Ok(GearLabel::L3),
            "L4" => Ok(GearLabel::L4),
            "H1" => Ok(GearLabel::H1),
            other => Err(EngineError::UnknownGear(other.to_string())),
        }
    }
}

/// Immutable gear label -> ratio mapping.
///
/// Always holds a ratio for every [`GearLabel`], so lookups by label are total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<GearLabel, f64>", into = "BTreeMap<GearLabel, f64>")]
pub struct GearTable {
    ratios: BTreeMap<GearLabel, f64>,
}

impl GearTable {
    /// Table with the factory ratios
    pub fn canonical() -> Self {
        Self {
            ratios: GearLabel::ALL
                .iter()
                .map(|g| (*g, g.canonical_ratio()))
                .collect(),
        }
    }

    /// Canonical table with some ratios replaced.
    ///
    /// Every override must be finite and strictly positive.
    pub fn with_overrides(overrides: &BTreeMap<GearLabel, f64>) -> Result<Self> {
        let mut table = Self::canonical();
        for (gear, ratio) in overrides {
            if !ratio.is_finite() || *ratio <= 0.0 {
                return Err(EngineError::InvalidReading {
                    field: "gear_ratio",
                    value: *ratio,
                    reason: "gear ratio must be finite and positive",
                });
            }
            table.ratios.insert(*gear, *ratio);
        }
        Ok(table)
    }

    /// Ratio for a known gear
    pub fn ratio(&self, gear: GearLabel) -> f64 {
        self.ratios
            .get(&gear)
            .copied()
            .unwrap_or_else(|| gear.canonical_ratio())
    }

    /// Ratio for a gear given by its label text
    pub fn ratio_of(&self, label: &str) -> Result<f64> {
        let gear: GearLabel = label.parse()?;
        Ok(self.ratio(gear))
    }

    /// Iterate gears and ratios, low to high
    pub fn iter(&self) -> impl Iterator<Item = (GearLabel, f64)> + '_ {
        self.ratios.iter().map(|(g, r)| (*g, *r))
    }
}

impl Default for GearTable {
    fn default() -> Self {
        Self::canonical()
    }
}

impl TryFrom<BTreeMap<GearLabel, f64>> for GearTable {
    type Error = EngineError;

    fn try_from(map: BTreeMap<GearLabel, f64>) -> Result<Self> {
        Self::with_overrides(&map)
    }
}

impl From<GearTable> for BTreeMap<GearLabel, f64> {
    fn from(table: GearTable) -> Self {
        table.ratios
    }
}
