//! Look-ahead interception.
//!
//! Instead of steering at where the offender is, the writer steers at a point
//! `m` units ahead of it along its heading, where `m` grows with both the
//! offender's speed and the current separation:
//!
//! ```text
//! m         = clamp(speed / 2 × distance(writer, offender), -limit, limit)
//! predicted = offender + m × (cos θ, sin θ)
//! ```
//!
//! The clamp keeps far or fast offenders from dragging the aim point off the
//! arena.

use pursuit_core::{HeadingVector, Pose, PursuitConfig};

/// Raw look-ahead distance, clamped to `[-limit, limit]`.
#[inline]
pub fn look_ahead_distance(offender_speed: f64, separation: f64, limit: f64) -> f64 {
    (offender_speed / 2.0 * separation).clamp(-limit, limit)
}

/// Predicts where to aim in order to cut off an offender.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct InterceptionEstimator {
    pub limit:          f64,
    pub heading_vector: HeadingVector,
}

impl Default for InterceptionEstimator {
    fn default() -> Self {
        Self { limit: 5.0, heading_vector: HeadingVector::Signed }
    }
}

impl InterceptionEstimator {
    pub fn new(limit: f64, heading_vector: HeadingVector) -> Self {
        Self { limit, heading_vector }
    }

    pub fn from_config(config: &PursuitConfig) -> Self {
        Self::new(config.look_ahead_limit, config.heading_vector)
    }

    /// Unit vector for `heading` under the configured convention.
    pub fn heading_unit(&self, heading: f64) -> (f64, f64) {
        let x = heading.cos();
        let y = match self.heading_vector {
            HeadingVector::Signed => heading.sin(),
            HeadingVector::LegacyUnsigned => (1.0 - x * x).max(0.0).sqrt(),
        };
        (x, y)
    }

    /// Aim point ahead of `offender`.
    ///
    /// Falls back to the offender's own pose when its speed is unknown (no
    /// report received yet) or when any input is non-finite.
    pub fn predict(&self, writer: Pose, offender: Pose, offender_speed: Option<f64>) -> Pose {
        let Some(speed) = offender_speed.filter(|s| s.is_finite()) else {
            return offender;
        };
        if !writer.is_finite() || !offender.is_finite() {
            return offender;
        }

        let m = look_ahead_distance(speed, writer.distance_to(offender), self.limit);
        let (ux, uy) = self.heading_unit(offender.heading);
        Pose {
            x:       offender.x + m * ux,
            y:       offender.y + m * uy,
            heading: offender.heading,
        }
    }
}
