//! Run configuration.
//!
//! Typically built with `PursuitConfig::default()` and tweaked in code, or
//! loaded from JSON by the application crate (enable the `serde` feature).

use crate::{CoreError, CoreResult};

/// Which pose the writer steers toward while chasing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TargetingMode {
    /// Aim straight at the offender's reported pose.
    Direct,
    /// Aim at a point ahead of the offender along its heading.
    #[default]
    LookAhead,
}

/// How the interception estimator builds the offender's heading vector.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HeadingVector {
    /// `(cos θ, sin θ)`.
    #[default]
    Signed,
    /// `(cos θ, sqrt(1 - cos² θ))`: the y-component is never negative, so
    /// offenders heading into the lower half-plane are predicted mirrored.
    /// Kept only to compare against recorded runs.
    LegacyUnsigned,
}

/// Top-level configuration for one supervisor run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PursuitConfig {
    /// Scheduler rate.  Every control loop steps once per tick.
    pub tick_hz: f64,

    /// Master RNG seed for spawn placement and wander commands.
    pub seed: u64,

    /// Proportional gain on distance-to-goal.
    pub linear_gain: f64,

    /// Proportional gain on bearing error.
    pub angular_gain: f64,

    /// Linear gain multiplier applied while chasing.
    pub pursuit_gain_multiplier: f64,

    /// An offender closer than this to the writer triggers a chase.
    pub proximity_threshold: f64,

    /// The chase ends once the writer is closer than this to its target.
    pub capture_threshold: f64,

    /// A goal waypoint counts as reached inside this radius.
    pub waypoint_tolerance: f64,

    pub targeting: TargetingMode,

    /// Bound on the interception look-ahead distance, in both directions.
    pub look_ahead_limit: f64,

    pub heading_vector: HeadingVector,

    /// Wander commands draw linear speed from `[0, wander_linear_max]`.
    pub wander_linear_max: f64,

    /// Wander commands draw yaw rate from `[-wander_angular_max, wander_angular_max]`.
    pub wander_angular_max: f64,

    /// Number of offenders spawned at startup.
    pub offender_count: usize,

    /// Offender names driven by a human.  They never receive wander commands
    /// and are respawned instead of removed when caught.
    pub teleoperated: Vec<String>,

    pub writer_name: String,

    /// Offenders are named `{offender_prefix}{i}` for `i` in `0..offender_count`.
    pub offender_prefix: String,

    /// Spawn coordinates are drawn from `[spawn_min, spawn_max]` on both axes.
    pub spawn_min: f64,
    pub spawn_max: f64,

    /// Kill the simulator's default `turtle1` after `reset`, before spawning.
    pub kill_default_turtle: bool,
}

impl Default for PursuitConfig {
    fn default() -> Self {
        Self {
            tick_hz:                 10.0,
            seed:                    42,
            linear_gain:             1.5,
            angular_gain:            6.0,
            pursuit_gain_multiplier: 2.0,
            proximity_threshold:     3.0,
            capture_threshold:       0.3,
            waypoint_tolerance:      1.0,
            targeting:               TargetingMode::LookAhead,
            look_ahead_limit:        5.0,
            heading_vector:          HeadingVector::Signed,
            wander_linear_max:       5.0,
            wander_angular_max:      5.0,
            offender_count:          9,
            teleoperated:            vec!["turtle1".to_string()],
            writer_name:             "turtle_writer".to_string(),
            offender_prefix:         "turtle".to_string(),
            spawn_min:               1.0,
            spawn_max:               10.0,
            kill_default_turtle:     true,
        }
    }
}

impl PursuitConfig {
    /// Reject values the control loops cannot run with.
    pub fn validate(&self) -> CoreResult<()> {
        let positive = [
            ("tick_hz", self.tick_hz),
            ("capture_threshold", self.capture_threshold),
            ("waypoint_tolerance", self.waypoint_tolerance),
            ("pursuit_gain_multiplier", self.pursuit_gain_multiplier),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(CoreError::Config(format!("{name} must be finite and > 0, got {value}")));
            }
        }

        let non_negative = [
            ("linear_gain", self.linear_gain),
            ("angular_gain", self.angular_gain),
            ("proximity_threshold", self.proximity_threshold),
            ("look_ahead_limit", self.look_ahead_limit),
            ("wander_linear_max", self.wander_linear_max),
            ("wander_angular_max", self.wander_angular_max),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(CoreError::Config(format!("{name} must be finite and >= 0, got {value}")));
            }
        }

        if self.capture_threshold >= self.proximity_threshold {
            return Err(CoreError::Config(format!(
                "capture_threshold ({}) must be below proximity_threshold ({})",
                self.capture_threshold, self.proximity_threshold
            )));
        }
        if !(self.spawn_min.is_finite() && self.spawn_max.is_finite()) || self.spawn_min > self.spawn_max {
            return Err(CoreError::Config(format!(
                "spawn range [{}, {}] is empty",
                self.spawn_min, self.spawn_max
            )));
        }
        if self.writer_name.is_empty() {
            return Err(CoreError::Config("writer_name must not be empty".into()));
        }
        if (0..self.offender_count).any(|i| self.offender_name(i) == self.writer_name) {
            return Err(CoreError::Config(format!(
                "writer_name {:?} collides with an offender name",
                self.writer_name
            )));
        }
        Ok(())
    }

    /// Name of the `i`-th offender.
    pub fn offender_name(&self, i: usize) -> String {
        format!("{}{}", self.offender_prefix, i)
    }

    pub fn is_teleoperated(&self, name: &str) -> bool {
        self.teleoperated.iter().any(|t| t == name)
    }
}
