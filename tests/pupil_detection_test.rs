//! Integration tests for pupil and eye-corner detection


use eye_gaze_tracking::{
    calibration::GazeFeatures,
    image_processing::{rgb_to_gray, sobel_edges},
    pupil_detection::{PupilData, PupilDetector, PupilDetectorConfig},
    Point2,
};
use test_helpers::{eye_frame, gray_frame};

#[test]
fn test_pupil_found_at_several_positions() {
    let detector = PupilDetector::default();

    for cx in [120.0, 160.0, 200.0] {
        let data = detector.detect(&eye_frame(320, 240, cx, 120.0, 12.0));
        let pupil = data.pupil_center.expect("pupil should be found");
        assert!((pupil.x - cx).abs() < 2.0, "expected x near {cx}, got {}", pupil.x);
        assert!((pupil.y - 120.0).abs() < 2.0, "expected y near 120, got {}", pupil.y);

        // Disc columns at the pupil row run from cx - 11 to cx + 11
        let (left, right) = (data.eye_corners.0.unwrap(), data.eye_corners.1.unwrap());
        assert_eq!(left.x, cx - 11.0);
        assert_eq!(right.x, cx + 11.0);
        assert!(left.x < pupil.x && pupil.x < right.x);
    }
}

#[test]
fn test_features_of_centred_pupil_are_small() {
    let data = PupilDetector::default().detect(&eye_frame(320, 240, 160.0, 120.0, 12.0));
    let features = GazeFeatures::from_pupil_data(&data).unwrap();
    assert!(features.dx.abs() < 2.0);
    assert_eq!(features.dy, 0.0);
    assert_eq!(features.width, 22.0);
}

#[test]
fn test_pupil_outside_eye_band_is_missed() {
    // Eye band of a 240-row frame covers rows 80..200
    let data = PupilDetector::default().detect(&eye_frame(320, 240, 160.0, 30.0, 12.0));
    assert_eq!(data, PupilData::absent());
}

#[test]
fn test_blank_frames_are_absent() {
    let detector = PupilDetector::default();
    assert_eq!(detector.detect(&gray_frame(64, 48, 0)), PupilData::absent());
    assert_eq!(detector.detect(&gray_frame(64, 48, 255)), PupilData::absent());
    assert_eq!(detector.detect(&gray_frame(1, 1, 10)), PupilData::absent());
}

#[test]
fn test_corner_scan_on_real_edges() {
    let frame = eye_frame(320, 240, 160.0, 120.0, 12.0);
    let edges = sobel_edges(&rgb_to_gray(&frame));
    let detector = PupilDetector::default();

    let (left, right) = detector.find_eye_corners(&edges, Point2::new(160.0, 120.0));
    assert_eq!(left, Point2::new(149.0, 120.0));
    assert_eq!(right, Point2::new(171.0, 120.0));

    // A pupil position off the bottom of the frame scans the last row
    let (left, right) = detector.find_eye_corners(&edges, Point2::new(160.0, 900.0));
    assert_eq!(left.y, 900.0);
    assert_eq!(right.x, 160.0);
}

#[test]
fn test_custom_config_is_used() {
    let config = PupilDetectorConfig {
        corner_search_radius: 5,
        ..PupilDetectorConfig::default()
    };
    let detector = PupilDetector::new(config.clone());
    assert_eq!(detector.config(), &config);

    // Disc edges are 11 px away, beyond the 5 px radius
    let data = detector.detect(&eye_frame(320, 240, 160.0, 120.0, 12.0));
    let pupil = data.pupil_center.unwrap();
    assert_eq!(data.eye_corners.0.unwrap().x, pupil.x);
    assert_eq!(data.eye_corners.1.unwrap().x, pupil.x);
}
