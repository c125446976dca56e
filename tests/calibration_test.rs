//! Integration tests for the calibration engine


use eye_gaze_tracking::{
    calibration::{generate_calibration_points, CalibrationState, CalibrationSystem},
    pupil_detection::PupilData,
    Error, Point2,
};
use proptest::prelude::*;
use test_helpers::{detection, ground_truth, offset_grid};

fn fitted_engine() -> CalibrationSystem {
    let mut engine = CalibrationSystem::new();
    for (dx, dy) in offset_grid() {
        engine.add_sample(ground_truth(dx, dy), &detection(dx, dy));
    }
    assert!(engine.compute_mapping());
    engine
}

#[test]
fn test_round_trip_reproduces_targets() {
    let engine = fitted_engine();
    for (dx, dy) in offset_grid() {
        let mapped = engine.map_gaze_to_screen(&detection(dx, dy)).unwrap();
        let expected = ground_truth(dx, dy);
        assert!((mapped - expected).norm() < 1e-6, "{mapped} vs {expected}");
    }
}

#[test]
fn test_mapping_generalises_between_targets() {
    let engine = fitted_engine();
    let mapped = engine.map_gaze_to_screen(&detection(0.5, -0.5)).unwrap();
    assert!((mapped - ground_truth(0.5, -0.5)).norm() < 1e-6);
}

#[test]
fn test_mapping_is_not_clamped() {
    let engine = fitted_engine();
    let far = engine.map_gaze_to_screen(&detection(60.0, 0.0)).unwrap();
    assert!(far.x < 0.0 || far.x > 1920.0);
}

#[test]
fn test_repeated_samples_with_outlier() {
    let mut engine = CalibrationSystem::new();
    for (dx, dy) in offset_grid() {
        let target = ground_truth(dx, dy);
        for _ in 0..9 {
            engine.add_sample(target, &detection(dx, dy));
        }
        // One wild sample per target is rejected by the 2-sigma filter
        engine.add_sample(target, &detection(dx + 15.0, dy));
    }
    assert_eq!(engine.sample_count(), 160);
    assert_eq!(engine.bucket_count(), 16);
    assert!(engine.compute_mapping());

    for (dx, dy) in offset_grid() {
        let mapped = engine.map_gaze_to_screen(&detection(dx, dy)).unwrap();
        assert!((mapped - ground_truth(dx, dy)).norm() < 1e-6);
    }
}

#[test]
fn test_fewer_than_ten_samples_fail() {
    let mut engine = CalibrationSystem::new();
    for (dx, dy) in offset_grid().into_iter().take(9) {
        engine.add_sample(ground_truth(dx, dy), &detection(dx, dy));
    }
    assert!(!engine.compute_mapping());
    assert!(!engine.is_calibrated());
    assert!(engine.map_gaze_to_screen(&detection(0.0, 0.0)).is_none());
}

#[test]
fn test_ten_samples_in_five_buckets_fail() {
    let mut engine = CalibrationSystem::new();
    let targets = generate_calibration_points(1920.0, 1080.0);
    for (i, (dx, dy)) in offset_grid().into_iter().take(10).enumerate() {
        engine.add_sample(targets[i % 5], &detection(dx, dy));
    }
    assert_eq!(engine.sample_count(), 10);
    assert_eq!(engine.bucket_count(), 5);
    assert!(matches!(
        engine.fit(),
        Err(Error::InsufficientSamples {
            stage: "clean buckets",
            found: 5,
            required: 10
        })
    ));
    assert!(!engine.compute_mapping());
    assert_eq!(engine.state(), CalibrationState::Collecting);
}

#[test]
fn test_collinear_features_still_fit() {
    // dy is always zero, so the dy, dy^2 and dx*dy terms have no support
    let mut engine = CalibrationSystem::new();
    for i in 0..12 {
        let dx = f64::from(i) - 6.0;
        engine.add_sample(Point2::new(960.0 + 50.0 * dx, 540.0), &detection(dx, 0.0));
    }
    assert!(engine.compute_mapping());

    let model = engine.mapping().unwrap();
    assert_eq!(model.x_coeffs[1], 0.0);
    assert_eq!(model.x_coeffs[3], 0.0);
    assert_eq!(model.x_coeffs[4], 0.0);

    let mapped = engine.map_gaze_to_screen(&detection(2.0, 0.0)).unwrap();
    assert!((mapped.x - 1060.0).abs() < 1e-6);
    assert!((mapped.y - 540.0).abs() < 1e-6);
}

#[test]
fn test_incomplete_detections_are_not_counted() {
    let mut engine = CalibrationSystem::new();
    let mut partial = detection(1.0, 1.0);
    partial.pupil_center = None;
    engine.add_sample(Point2::new(100.0, 100.0), &partial);
    engine.add_sample(Point2::new(100.0, 100.0), &PupilData::absent());
    assert_eq!(engine.sample_count(), 0);
    assert_eq!(engine.bucket_count(), 0);
    assert_eq!(engine.state(), CalibrationState::Idle);
}

#[test]
fn test_default_grid_points() {
    let points = generate_calibration_points(1920.0, 1080.0);
    assert_eq!(points.len(), 24);
    assert_eq!(points[5], Point2::new(100.0 + 1720.0 / 3.0, 100.0 + 880.0 / 3.0));
    assert_eq!(points[20], Point2::new(100.0, 100.0));
    assert_eq!(points[21], Point2::new(1820.0, 980.0));
    assert_eq!(points[22], Point2::new(100.0, 980.0));
}

proptest! {
    #[test]
    fn test_grid_points_stay_on_screen(w in 300.0f64..5000.0, h in 300.0f64..5000.0) {
        let points = generate_calibration_points(w, h);
        prop_assert_eq!(points.len(), 24);
        for p in points {
            prop_assert!(p.x >= 100.0 - 1e-9 && p.x <= w - 100.0 + 1e-9);
            prop_assert!(p.y >= 100.0 - 1e-9 && p.y <= h - 100.0 + 1e-9);
        }
    }
}
