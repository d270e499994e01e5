//! Log file formats
//!
//! Supports writing sample logs as CSV and reading/writing them as JSON lines.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::SampleRecord;
use crate::metrics::Metric;

/// Errors reading or writing log files
#[derive(Error, Debug)]
pub enum FormatError {
    /// File access failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A line did not hold a valid record
    #[error("JSON error at line {line}: {source}")]
    Json {
        /// 1-based line number
        line: usize,
        /// Parser error
        #[source]
        source: serde_json::Error,
    },
}

/// Supported log file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Comma-separated values, one column per channel
    Csv,
    /// One JSON `{timestamp, raw, derived}` object per line
    JsonLines,
}

impl LogFormat {
    /// Detect format from file extension
    pub fn from_extension(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_lowercase().as_str() {
            "csv" => Some(LogFormat::Csv),
            "jsonl" | "ndjson" => Some(LogFormat::JsonLines),
            _ => None,
        }
    }

    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            LogFormat::Csv => "csv",
            LogFormat::JsonLines => "jsonl",
        }
    }
}

/// Write records as CSV to any writer
pub fn write_csv_to<W: Write>(
    mut writer: W,
    started_at: DateTime<Utc>,
    records: &[SampleRecord],
) -> io::Result<()> {
    writeln!(writer, "# Session started {}", started_at.to_rfc3339())?;

    // Header
    write!(writer, "Time,gear")?;
    for metric in Metric::ALL {
        write!(writer, ",{}", metric.name())?;
    }
    writeln!(writer)?;

    // Units
    write!(writer, "s,")?;
    for metric in Metric::ALL {
        write!(writer, ",{}", metric.units())?;
    }
    writeln!(writer)?;

    for record in records {
        write!(
            writer,
            "{:.3},{}",
            record.timestamp.as_secs_f64(),
            record.raw.gear
        )?;
        for metric in Metric::ALL {
            write!(writer, ",{:.4}", record.value(metric))?;
        }
        writeln!(writer)?;
    }

    writer.flush()
}

/// Write records to a CSV file
pub fn write_csv<P: AsRef<Path>>(
    path: P,
    started_at: DateTime<Utc>,
    records: &[SampleRecord],
) -> Result<(), FormatError> {
    let file = File::create(path)?;
    write_csv_to(BufWriter::new(file), started_at, records)?;
    Ok(())
}

/// Write records as JSON lines to any writer
pub fn write_json_lines_to<W: Write>(
    mut writer: W,
    records: &[SampleRecord],
) -> Result<(), FormatError> {
    for (i, record) in records.iter().enumerate() {
        serde_json::to_writer(&mut writer, record)
            .map_err(|source| FormatError::Json { line: i + 1, source })?;
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write records to a JSON lines file
pub fn write_json_lines<P: AsRef<Path>>(
    path: P,
    records: &[SampleRecord],
) -> Result<(), FormatError> {
    let file = File::create(path)?;
    write_json_lines_to(BufWriter::new(file), records)
}

/// Read records from JSON lines, skipping blank lines
pub fn read_json_lines_from<R: BufRead>(reader: R) -> Result<Vec<SampleRecord>, FormatError> {
    let mut records = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line)
            .map_err(|source| FormatError::Json { line: i + 1, source })?;
        records.push(record);
    }
    Ok(records)
}

/// Read records from a JSON lines file
pub fn read_json_lines<P: AsRef<Path>>(path: P) -> Result<Vec<SampleRecord>, FormatError> {
    let file = File::open(path)?;
    read_json_lines_from(BufReader::new(file))
}
