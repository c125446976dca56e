//! Clamping casts between pixel coordinate types

/// Clamp an i64 into `[min, max]` and convert to u32
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // clamping ensures the range
pub fn i64_to_u32_clamp(value: i64, min: u32, max: u32) -> u32 {
    let (min, max) = if min <= max { (min, max) } else { (max, min) };
    value.clamp(i64::from(min), i64::from(max)) as u32
}

/// Floor an f64 and clamp it into `[min, max]` as u32
///
/// Non-finite values map to `min`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // clamping ensures the range
pub fn f64_floor_to_u32_clamp(value: f64, min: u32, max: u32) -> u32 {
    let (min, max) = if min <= max { (min, max) } else { (max, min) };

    if !value.is_finite() {
        return min;
    }

    value.floor().clamp(f64::from(min), f64::from(max)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_i64_to_u32_clamp() {
        assert_eq!(i64_to_u32_clamp(-5, 0, 10), 0);
        assert_eq!(i64_to_u32_clamp(5, 0, 10), 5);
        assert_eq!(i64_to_u32_clamp(i64::MAX, 0, 10), 10);
        assert_eq!(i64_to_u32_clamp(5, 10, 0), 5);
    }

    #[test]
    fn test_f64_floor_to_u32_clamp() {
        assert_eq!(f64_floor_to_u32_clamp(12.99, 0, 100), 12);
        assert_eq!(f64_floor_to_u32_clamp(-0.5, 0, 100), 0);
        assert_eq!(f64_floor_to_u32_clamp(250.0, 0, 100), 100);
        assert_eq!(f64_floor_to_u32_clamp(f64::NAN, 3, 100), 3);
        assert_eq!(f64_floor_to_u32_clamp(f64::INFINITY, 3, 100), 3);
    }

    proptest! {
        #[test]
        fn prop_f64_floor_clamp_within_bounds(value in any::<f64>(), a in any::<u32>(), b in any::<u32>()) {
            let result = f64_floor_to_u32_clamp(value, a, b);
            prop_assert!(result >= a.min(b));
            prop_assert!(result <= a.max(b));
        }

        #[test]
        fn prop_i64_clamp_within_bounds(value in any::<i64>(), a in any::<u32>(), b in any::<u32>()) {
            let result = i64_to_u32_clamp(value, a, b);
            prop_assert!(result >= a.min(b));
            prop_assert!(result <= a.max(b));
        }
    }
}
