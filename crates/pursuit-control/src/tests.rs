//! Unit tests for pursuit-control.

use pursuit_core::{HeadingVector, Pose, VelocityCommand};

use crate::{Gains, InterceptionEstimator, MotionController, look_ahead_distance};

// ── MotionController ──────────────────────────────────────────────────────────

#[cfg(test)]
mod controller {
    use std::f64::consts::FRAC_PI_2;

    use super::*;

    #[test]
    fn straight_ahead_has_no_turn() {
        let c = MotionController::new(Gains::new(1.5, 6.0));
        let cmd = c.command(Pose::new(0.0, 0.0, 0.0), Pose::new(3.0, 0.0, 0.0));
        assert!((cmd.linear - 4.5).abs() < 1e-12);
        assert_eq!(cmd.angular, 0.0);
    }

    #[test]
    fn linear_output_grows_with_distance() {
        let c = MotionController::new(Gains::default());
        let here = Pose::new(1.0, 1.0, 0.3);
        let mut previous = -1.0;
        for d in [0.0, 0.5, 1.0, 2.0, 4.0, 8.0] {
            let cmd = c.command(here, Pose::new(1.0 + d, 1.0, 0.0));
            assert!(cmd.linear > previous, "d = {d}");
            previous = cmd.linear;
        }
    }

    #[test]
    fn angular_sign_follows_bearing_error() {
        let c = MotionController::new(Gains::default());
        let here = Pose::new(0.0, 0.0, 0.0);
        // Target to the left → turn counter-clockwise.
        assert!(c.command(here, Pose::new(1.0, 1.0, 0.0)).angular > 0.0);
        // Target to the right → turn clockwise.
        assert!(c.command(here, Pose::new(1.0, -1.0, 0.0)).angular < 0.0);
    }

    #[test]
    fn heading_error_uses_shortest_turn() {
        let c = MotionController::new(Gains::new(1.0, 1.0));
        // Facing almost -π, target almost at +π bearing: tiny error, not ~2π.
        let here = Pose::new(0.0, 0.0, -3.1);
        let target = Pose::new(-1.0, 0.05, 0.0);
        let err = c.heading_error(here, target);
        assert!(err.abs() < 0.2, "err = {err}");
    }

    #[test]
    fn goal_heading_is_ignored() {
        let c = MotionController::new(Gains::default());
        let here = Pose::new(0.0, 0.0, FRAC_PI_2);
        let a = c.command(here, Pose::new(2.0, 2.0, 0.0));
        let b = c.command(here, Pose::new(2.0, 2.0, 3.0));
        assert_eq!(a, b);
    }

    #[test]
    fn non_finite_input_fails_closed() {
        let c = MotionController::new(Gains::default());
        let bad = Pose { x: f64::NAN, y: 0.0, heading: 0.0 };
        assert_eq!(c.command(bad, Pose::new(1.0, 1.0, 0.0)), VelocityCommand::STOP);
        assert_eq!(c.command(Pose::new(1.0, 1.0, 0.0), bad), VelocityCommand::STOP);
    }

    #[test]
    fn boosted_scales_linear_only() {
        let g = Gains::new(1.5, 6.0).boosted(2.0);
        assert_eq!(g, Gains::new(3.0, 6.0));
    }
}

// ── InterceptionEstimator ─────────────────────────────────────────────────────

#[cfg(test)]
mod intercept {
    use std::f64::consts::{FRAC_PI_2, PI};

    use super::*;

    #[test]
    fn look_ahead_within_limit_is_unclamped() {
        assert_eq!(look_ahead_distance(2.0, 4.0, 5.0), 4.0);
    }

    #[test]
    fn look_ahead_clamps_both_ways() {
        assert_eq!(look_ahead_distance(5.0, 10.0, 5.0), 5.0);
        assert_eq!(look_ahead_distance(-5.0, 10.0, 5.0), -5.0);
    }

    #[test]
    fn prediction_offsets_along_heading() {
        let est = InterceptionEstimator::default();
        let writer = Pose::new(0.0, 0.0, 0.0);
        let offender = Pose::new(4.0, 0.0, FRAC_PI_2);
        let p = est.predict(writer, offender, Some(2.0));
        // separation 4, speed 2 → 4 units straight up from the offender.
        assert!((p.x - 4.0).abs() < 1e-9);
        assert!((p.y - 4.0).abs() < 1e-9);
        assert_eq!(p.heading, offender.heading);
        assert!((offender.distance_to(p) - 4.0).abs() < 1e-9);
    }

    #[test]
    fn signed_heading_points_down_for_negative_angles() {
        let est = InterceptionEstimator::default();
        let writer = Pose::new(0.0, 5.0, 0.0);
        let offender = Pose::new(4.0, 5.0, -FRAC_PI_2);
        let p = est.predict(writer, offender, Some(1.0));
        assert!(p.y < offender.y);
    }

    #[test]
    fn legacy_heading_mirrors_lower_half_plane() {
        let est = InterceptionEstimator::new(5.0, HeadingVector::LegacyUnsigned);
        let writer = Pose::new(0.0, 5.0, 0.0);
        let offender = Pose::new(4.0, 5.0, -FRAC_PI_2);
        let p = est.predict(writer, offender, Some(1.0));
        assert!(p.y > offender.y, "legacy vector never points down");
    }

    #[test]
    fn heading_unit_is_unit_length() {
        for mode in [HeadingVector::Signed, HeadingVector::LegacyUnsigned] {
            let est = InterceptionEstimator::new(5.0, mode);
            for theta in [0.0, 0.7, -0.7, 2.5, -2.5, PI] {
                let (x, y) = est.heading_unit(theta);
                assert!((x.hypot(y) - 1.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn unknown_speed_falls_back_to_raw_pose() {
        let est = InterceptionEstimator::default();
        let offender = Pose::new(4.0, 4.0, 1.0);
        assert_eq!(est.predict(Pose::new(0.0, 0.0, 0.0), offender, None), offender);
        assert_eq!(est.predict(Pose::new(0.0, 0.0, 0.0), offender, Some(f64::NAN)), offender);
    }

    #[test]
    fn stationary_offender_is_its_own_aim_point() {
        let est = InterceptionEstimator::default();
        let offender = Pose::new(4.0, 4.0, 1.0);
        let p = est.predict(Pose::new(0.0, 0.0, 0.0), offender, Some(0.0));
        assert!((p.x - offender.x).abs() < 1e-12 && (p.y - offender.y).abs() < 1e-12);
    }
}
