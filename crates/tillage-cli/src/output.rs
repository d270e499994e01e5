//! Printing processed samples

use std::io::{self, Write};

use clap::ValueEnum;
use tillage_core::realtime::ProcessedSample;
use tillage_core::unit_conversion::hp_to_kw;

/// Output format for processed samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PrintFormat {
    /// One JSON object per line
    Json,
    /// Aligned human-readable columns
    Table,
}

pub fn print_header<W: Write>(out: &mut W, format: PrintFormat) -> io::Result<()> {
    if format == PrintFormat::Table {
        writeln!(
            out,
            "{:>9} {:>4} {:>7} {:>9} {:>9} {:>8} {:>8} {:>8}  {}",
            "time_s", "gear", "rpm", "act_m/s", "theo_m/s", "slip_%", "pwr_kW", "fuel_L/h", "status"
        )?;
    }
    Ok(())
}

pub fn print_sample<W: Write>(
    out: &mut W,
    format: PrintFormat,
    sample: &ProcessedSample,
) -> anyhow::Result<()> {
    let record = &sample.record;
    match format {
        PrintFormat::Json => {
            let mut value = serde_json::to_value(record)?;
            if let Some(obj) = value.as_object_mut() {
                obj.insert("status".into(), serde_json::to_value(sample.status)?);
            }
            writeln!(out, "{value}")?;
        }
        PrintFormat::Table => {
            writeln!(
                out,
                "{:>9.3} {:>4} {:>7.0} {:>9.2} {:>9.2} {:>8.2} {:>8.2} {:>8.2}  {}",
                record.timestamp.as_secs_f64(),
                record.raw.gear,
                record.raw.engine_speed_rpm,
                sample.slip.actual_speed_mps(),
                sample.slip.theoretical_speed_mps(),
                record.derived.slip_percent,
                hp_to_kw(record.derived.engine_power_hp),
                record.derived.fuel_consumption_lh,
                sample.status.label(),
            )?;
        }
    }
    out.flush()?;
    Ok(())
}
