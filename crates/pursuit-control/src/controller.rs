//! Proportional pose-tracking controller.
//!
//! ```text
//! linear  = k_lin × distance(current, target)
//! angular = k_ang × normalize_angle_difference(bearing(current, target), current.heading)
//! ```
//!
//! There is no integral or derivative term and no clamp on the linear output;
//! actuators with limits must saturate on their side.

use pursuit_core::{Pose, PursuitConfig, VelocityCommand, normalize_angle_difference};

/// Proportional gains.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Gains {
    pub linear:  f64,
    pub angular: f64,
}

impl Gains {
    pub const fn new(linear: f64, angular: f64) -> Self {
        Self { linear, angular }
    }

    /// Writing gains from the run configuration.
    pub fn from_config(config: &PursuitConfig) -> Self {
        Self::new(config.linear_gain, config.angular_gain)
    }

    /// Linear gain scaled by `multiplier`; angular gain unchanged.
    pub fn boosted(self, multiplier: f64) -> Self {
        Self { linear: self.linear * multiplier, ..self }
    }
}

impl Default for Gains {
    fn default() -> Self {
        Self::new(1.5, 6.0)
    }
}

/// The P controller.  Stateless apart from its gains.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct MotionController {
    pub gains: Gains,
}

impl MotionController {
    pub const fn new(gains: Gains) -> Self {
        Self { gains }
    }

    /// Command that steers `current` toward `target`.
    ///
    /// Returns [`VelocityCommand::STOP`] if either pose is non-finite or the
    /// result would be.
    pub fn command(&self, current: Pose, target: Pose) -> VelocityCommand {
        if !current.is_finite() || !target.is_finite() {
            return VelocityCommand::STOP;
        }
        let linear = self.gains.linear * current.distance_to(target);
        let angular = self.gains.angular * self.heading_error(current, target);
        let command = VelocityCommand::new(linear, angular);
        if command.is_finite() { command } else { VelocityCommand::STOP }
    }

    /// Bearing to `target` minus the current heading, in `(-π, π]`.
    #[inline]
    pub fn heading_error(&self, current: Pose, target: Pose) -> f64 {
        normalize_angle_difference(current.bearing_to(target), current.heading)
    }
}
