//! Integration tests for the head alignment checker


use eye_gaze_tracking::{
    frame_source::{FrameSource, SyntheticEyeCamera},
    head_position::{HeadPositionChecker, HeadPositionResult},
};
use test_helpers::{gray_frame, head_frame};

#[test]
fn test_centred_head() {
    let frame = head_frame(320, 240, 120, 80, 80, 80);
    let result = HeadPositionChecker::default().check(&frame, 1920.0, 1080.0);
    assert!(result.is_aligned);
    assert!(result.offset_x < 0.01);
    assert!(result.offset_y < 0.01);
}

#[test]
fn test_head_too_low() {
    let frame = head_frame(320, 240, 120, 170, 80, 65);
    let result = HeadPositionChecker::default().check(&frame, 1920.0, 1080.0);
    assert!(!result.is_aligned);
    assert!(result.offset_y > 0.2);
    assert!(result.offset_x < 0.01);
}

#[test]
fn test_tolerance_is_applied() {
    // Head centre about 0.15 of the width right of centre
    let frame = head_frame(320, 240, 168, 80, 80, 80);
    assert!(HeadPositionChecker::new(0.2).check(&frame, 1920.0, 1080.0).is_aligned);
    assert!(!HeadPositionChecker::new(0.1).check(&frame, 1920.0, 1080.0).is_aligned);
}

#[test]
fn test_gray_frame_has_no_skin() {
    let result = HeadPositionChecker::default().check(&gray_frame(160, 120, 128), 1280.0, 720.0);
    assert_eq!(
        result,
        HeadPositionResult {
            is_aligned: false,
            center_x: 640.0,
            center_y: 360.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    );
}

#[test]
fn test_synthetic_camera_is_aligned() {
    let mut camera = SyntheticEyeCamera::new(0, 0);
    let checker = HeadPositionChecker::default();
    for _ in 0..5 {
        let frame = camera.next_frame().unwrap();
        assert!(checker.check(&frame, 1920.0, 1080.0).is_aligned);
    }
}
