//! Gear lookup and slip estimation properties

use tillage_core::error::EngineError;
use tillage_core::gear::{GearLabel, GearTable};
use tillage_core::slip::{wheel_constant_for_diameter, SlipEstimator};

#[test]
fn test_every_gear_has_canonical_ratio() {
    let table = GearTable::canonical();
    let expected = [("L1", 160.0), ("L2", 120.0), ("L3", 80.0), ("L4", 40.0), ("H1", 30.0)];
    for (label, ratio) in expected {
        assert_eq!(table.ratio_of(label).unwrap(), ratio, "gear {label}");
    }
    for gear in GearLabel::ALL {
        assert_eq!(table.ratio(gear), gear.canonical_ratio());
        assert_eq!(gear.as_str().parse::<GearLabel>().unwrap(), gear);
    }
}

#[test]
fn test_unknown_gear_labels() {
    let table = GearTable::canonical();
    for label in ["L0", "L6", "H", "N", "neutral", "160", " L1", "L1\n", " H1 "] {
        match table.ratio_of(label) {
            Err(EngineError::UnknownGear(l)) => assert_eq!(l, label),
            other => panic!("expected UnknownGear for {label}, got {other:?}"),
        }
    }
}

#[test]
fn test_zero_forward_speed_is_full_slip() {
    let table = GearTable::canonical();
    let slip = SlipEstimator::default()
        .estimate_slip(1500.0, 0.0, table.ratio_of("L1").unwrap())
        .unwrap();
    assert_eq!(slip, 100.0);
}

#[test]
fn test_slip_decreases_with_forward_speed() {
    let est = SlipEstimator::default();
    for gear in GearLabel::ALL {
        let ratio = gear.canonical_ratio();
        let mut prev = f64::INFINITY;
        for step in 0..=60 {
            let speed = step as f64 * 0.25;
            let slip = est.estimate_slip(1800.0, speed, ratio).unwrap();
            assert!(slip < prev, "{gear}: slip not decreasing at {speed} km/h");
            prev = slip;
        }
    }
}

#[test]
fn test_wheel_constant_is_configurable() {
    // Smaller wheel: lower theoretical speed, so lower slip at the same actual speed
    let small = SlipEstimator::new(wheel_constant_for_diameter(1.2)).unwrap();
    let large = SlipEstimator::new(wheel_constant_for_diameter(1.6)).unwrap();
    let s_small = small.estimate_slip(1490.0, 4.34, 160.0).unwrap();
    let s_large = large.estimate_slip(1490.0, 4.34, 160.0).unwrap();
    assert!(s_small < s_large);
    assert!((large.wheel_constant() - 0.301_592_894_7).abs() < 1e-9);
}
