//! Full pipeline scenarios, serialization and export

use std::time::Duration;

use pretty_assertions::assert_eq;
use tempfile::TempDir;
use tillage_core::datalog::format::{
    read_json_lines, read_json_lines_from, write_csv, write_json_lines_to,
};
use tillage_core::datalog::SampleRecord;
use tillage_core::prelude::*;

fn fixture() -> RawReading {
    RawReading::new(
        Duration::from_secs(1),
        1490.0,
        51.0,
        27.72,
        4.34,
        "L1".parse().unwrap(),
    )
    .with_position(22.312841038797888, 87.33148608163823)
}

#[test]
fn test_field_fixture() {
    let mut monitor = PerformanceMonitor::default();
    let sample = monitor.process(fixture()).unwrap();
    let d = &sample.record.derived;

    assert!(
        (d.slip_percent - (-54.60)).abs() < 0.1,
        "slip was {}",
        d.slip_percent
    );
    assert!(d.is_finite());
    assert!((d.engine_torque_nm - 49.546354).abs() < 1e-5);
    assert!((d.engine_power_hp - 10.363054).abs() < 1e-5);
    assert!((d.fuel_consumption_lh - 1.863354).abs() < 1e-5);
    assert_eq!(sample.status, AdvisoryStatus::Safe);
    assert!((sample.slip.theoretical_speed_kmh - 2.808584).abs() < 1e-5);
    assert_eq!(
        sample.record.raw.position,
        Some(GeoPosition {
            latitude: 22.312841038797888,
            longitude: 87.33148608163823,
        })
    );
}

#[test]
fn test_record_json_round_trip() {
    let mut monitor = PerformanceMonitor::default();
    let record = monitor.process(fixture()).unwrap().record;

    let json = serde_json::to_string(&record).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(value.get("timestamp").is_some());
    assert_eq!(value["raw"]["gear"], "L1");
    assert!(value["derived"]["slip_percent"].is_number());

    let back: SampleRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back, record);
}

#[test]
fn test_json_lines_round_trip() {
    let mut monitor = PerformanceMonitor::default();
    let mut demo = DemoSource::seeded(3, Duration::from_secs(1)).limit(25);
    let summary = monitor.drain(&mut demo);
    assert_eq!(summary.processed, 25);
    assert_eq!(summary.rejected, 0);

    let records = monitor.snapshot(None);
    let mut out = Vec::new();
    write_json_lines_to(&mut out, &records).unwrap();
    let back = read_json_lines_from(out.as_slice()).unwrap();
    assert_eq!(back, records);
}

#[test]
fn test_export_files() {
    let dir = TempDir::new().unwrap();
    let mut monitor = PerformanceMonitor::default();
    let mut demo = DemoSource::seeded(9, Duration::from_millis(500)).limit(10);
    monitor.drain(&mut demo);
    let records = monitor.snapshot(None);

    let csv_path = dir.path().join("session.csv");
    write_csv(&csv_path, monitor.buffer().started_at(), &records).unwrap();
    let csv = std::fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert!(lines[0].starts_with("# Session started "));
    assert!(lines[1].starts_with("Time,gear,engineSpeed,throttle"));
    assert!(lines[2].starts_with("s,,rpm,%"));
    assert_eq!(lines.len(), 3 + records.len());
    assert!(lines[4].starts_with("0.500,L1,"));
    assert_eq!(
        LogFormat::from_extension(&csv_path),
        Some(LogFormat::Csv)
    );

    let jsonl_path = dir.path().join("session.jsonl");
    tillage_core::datalog::format::write_json_lines(&jsonl_path, &records).unwrap();
    assert_eq!(read_json_lines(&jsonl_path).unwrap(), records);
}

#[test]
fn test_config_file_drives_monitor() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("monitor.json");

    let config = MonitorConfig {
        slip_threshold_percent: -60.0,
        retention_secs: Some(30.0),
        ..MonitorConfig::default()
    };
    config.save(&path).unwrap();
    let loaded = MonitorConfig::load(&path).unwrap();
    assert_eq!(loaded, config);

    let mut monitor = PerformanceMonitor::new(&loaded).unwrap();
    let sample = monitor.process(fixture()).unwrap();
    // -54.5% is above a -60% threshold
    assert_eq!(sample.status, AdvisoryStatus::OverLimit);
    assert_eq!(monitor.classify(-61.0), AdvisoryStatus::Safe);
}

#[test]
fn test_missing_config_file() {
    let dir = TempDir::new().unwrap();
    assert!(matches!(
        MonitorConfig::load(&dir.path().join("absent.json")),
        Err(ConfigError::Io(_))
    ));
}
