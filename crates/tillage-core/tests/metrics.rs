//! Derived metric properties

use std::time::Duration;

use tillage_core::gear::GearLabel;
use tillage_core::metrics::{MetricsCalculator, RegressionCoefficients};
use tillage_core::reading::RawReading;

fn reading(rpm: f64, throttle: f64, depth: f64, speed: f64) -> RawReading {
    RawReading::new(Duration::from_secs(3), rpm, throttle, depth, speed, GearLabel::L2)
}

#[test]
fn test_compute_is_deterministic() {
    let calc = MetricsCalculator::default();
    let raw = reading(1720.5, 63.2, 22.1, 3.91);
    let a = calc.compute(&raw, 12.34, 120.0).unwrap();
    let b = calc.compute(&raw, 12.34, 120.0).unwrap();
    let c = MetricsCalculator::default().compute(&raw.clone(), 12.34, 120.0).unwrap();

    for other in [b, c] {
        assert_eq!(a.engine_torque_nm.to_bits(), other.engine_torque_nm.to_bits());
        assert_eq!(a.fuel_consumption_lh.to_bits(), other.fuel_consumption_lh.to_bits());
        assert_eq!(a.engine_power_hp.to_bits(), other.engine_power_hp.to_bits());
        assert_eq!(
            a.tractive_efficiency_percent.to_bits(),
            other.tractive_efficiency_percent.to_bits()
        );
        assert_eq!(a, other);
    }
}

#[test]
fn test_zero_forward_speed_guard() {
    let calc = MetricsCalculator::default();
    for throttle in [40.0, 55.0, 70.0] {
        let m = calc.compute(&reading(1600.0, throttle, 25.0, 0.0), 100.0, 120.0).unwrap();
        assert_eq!(m.fuel_consumption_per_area_lha, 0.0);
        assert!(m.is_finite());
    }
}

#[test]
fn test_zero_engine_power_guard() {
    let calc = MetricsCalculator::new(RegressionCoefficients {
        torque: [0.0; 6],
        ..RegressionCoefficients::default()
    });
    let m = calc.compute(&reading(1600.0, 55.0, 25.0, 3.5), 15.0, 120.0).unwrap();
    assert_eq!(m.engine_power_hp, 0.0);
    assert_eq!(m.specific_fuel_consumption_kg_hp_hr, 0.0);
    assert_eq!(m.tractive_efficiency_percent, 0.0);
    // Speed-only metrics are unaffected
    assert!(m.drawbar_power_hp > 0.0);
}

#[test]
fn test_slip_carried_unchanged() {
    let calc = MetricsCalculator::default();
    let m = calc.compute(&reading(1600.0, 55.0, 25.0, 3.5), -54.6, 120.0).unwrap();
    assert_eq!(m.slip_percent, -54.6);
}

#[test]
fn test_power_formula() {
    let calc = MetricsCalculator::default();
    let m = calc.compute(&reading(1800.0, 75.0, 20.0, 4.0), 10.0, 120.0).unwrap();
    let expected = 2.0 * std::f64::consts::PI * 1800.0 * m.engine_torque_nm / (60.0 * 746.0);
    assert!((m.engine_power_hp - expected).abs() < 1e-9);
}
