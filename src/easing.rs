use glam::Vec3;

/// Smallest interval we are willing to divide by when turning a time span into progress.
pub const TIME_EPSILON: f32 = 1e-6;

/// Two piece cubic ease in / ease out.
///
/// Accelerates as `4t³` up to the midpoint and mirrors that curve back down to 1.
/// Input is clamped to `[0, 1]`.
pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);

    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let inverse = 1.0 - t;
        1.0 - 4.0 * inverse * inverse * inverse
    }
}

/// Progress of `time` through the span `start..=end`, clamped to `[0, 1]`.
///
/// Times on or past either end resolve to exactly 0 or 1 however short the span is.
pub fn progress(time: f32, start: f32, end: f32) -> f32 {
    if time <= start {
        return 0.0;
    }

    if time >= end {
        return 1.0;
    }

    let span = (end - start).max(TIME_EPSILON);
    let progress = (time - start) / span;

    // NaN ends up at the start of the span
    if progress.is_nan() {
        return 0.0;
    }

    progress.clamp(0.0, 1.0)
}

/// Per component `from + (to - from) * t`.
///
/// The endpoints come back bit for bit so sampling exactly on a keyframe yields that keyframe.
pub fn lerp_exact(from: Vec3, to: Vec3, t: f32) -> Vec3 {
    if t <= 0.0 {
        return from;
    }

    if t >= 1.0 {
        return to;
    }

    from + (to - from) * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn ease_fixed_points() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(0.5), 0.5);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
    }

    #[test]
    fn ease_is_symmetric_around_midpoint() {
        for step in 0..=20 {
            let t = step as f32 / 20.0;
            let mirrored = 1.0 - ease_in_out_cubic(1.0 - t);
            assert!((ease_in_out_cubic(t) - mirrored).abs() < 1e-6);
        }
    }

    #[test]
    fn ease_clamps_out_of_range_input() {
        assert_eq!(ease_in_out_cubic(-3.0), 0.0);
        assert_eq!(ease_in_out_cubic(7.5), 1.0);
    }

    #[test]
    fn progress_guards_zero_length_spans() {
        assert_eq!(progress(1.0, 1.0, 1.0), 0.0);
        assert_eq!(progress(2.0, 1.0, 1.0), 1.0);
        assert_eq!(progress(f32::NAN, 0.0, 1.0), 0.0);
    }

    #[test]
    fn progress_reaches_the_end_of_tiny_spans() {
        assert_eq!(progress(1.0000001, 1.0, 1.0000001), 1.0);
        assert_eq!(progress(1.0, 1.0, 1.0000001), 0.0);
        assert_eq!(progress(0.5, 0.0, 1.0), 0.5);
    }

    #[test]
    fn lerp_exact_returns_endpoints() {
        let from = Vec3::new(0.3, 0.7, 0.1);
        let to = Vec3::new(0.1, 0.2, 0.9);

        assert_eq!(lerp_exact(from, to, 0.0), from);
        assert_eq!(lerp_exact(from, to, 1.0), to);
        assert_eq!(lerp_exact(Vec3::ZERO, Vec3::ONE, 0.5), Vec3::splat(0.5));
    }

    proptest! {
        #[test]
        fn ease_is_monotonic(a in 0.0f32..=1.0, b in 0.0f32..=1.0) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(ease_in_out_cubic(low) <= ease_in_out_cubic(high));
        }

        #[test]
        fn ease_stays_in_unit_range(t in -10.0f32..10.0) {
            let eased = ease_in_out_cubic(t);
            prop_assert!((0.0..=1.0).contains(&eased));
        }
    }
}
