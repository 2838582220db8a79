//! Planar pose types and the angle/distance helpers every controller uses.
//!
//! All angles are radians.  Headings are kept in the half-open range
//! `(-π, π]`; `normalize_angle_difference` is the one place that wrap-around
//! is handled, so callers never subtract raw headings.

use std::f64::consts::PI;
use std::fmt;

// ── Angle helpers ─────────────────────────────────────────────────────────────

/// Signed minimal difference `a - b`, in `(-π, π]`.
///
/// Computed as `atan2(sin(a-b), cos(a-b))`, which has no discontinuity at the
/// ±π seam.  `atan2` can return exactly `-π` for a negative-zero sine; that
/// value is folded onto `+π`.
#[inline]
pub fn normalize_angle_difference(a: f64, b: f64) -> f64 {
    let d = a - b;
    let wrapped = d.sin().atan2(d.cos());
    if wrapped <= -PI { PI } else { wrapped }
}

/// Wrap any angle into `(-π, π]`.
#[inline]
pub fn normalize_angle(a: f64) -> f64 {
    normalize_angle_difference(a, 0.0)
}

#[inline]
pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees.to_radians()
}

#[inline]
pub fn rad_to_deg(radians: f64) -> f64 {
    radians.to_degrees()
}

// ── Point ─────────────────────────────────────────────────────────────────────

/// A position in the simulator's planar frame.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

/// Euclidean distance between two positions.  Never negative.
#[inline]
pub fn distance(p: Point, q: Point) -> f64 {
    (q.x - p.x).hypot(q.y - p.y)
}

/// Direction of `to` as seen from `from`, in `(-π, π]`.
#[inline]
pub fn bearing(from: Point, to: Point) -> f64 {
    (to.y - from.y).atan2(to.x - from.x)
}

// ── Pose ──────────────────────────────────────────────────────────────────────

/// Position plus heading of one agent.
///
/// Written only by the feedback channel (and by the supervisor when it forces
/// the sentinel after a respawn); read by all control logic.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    /// Radians in `(-π, π]`.
    pub heading: f64,
}

impl Pose {
    /// Far outside any arena.  Assigned to a respawned agent until its feed
    /// catches up, so it cannot be detected where it no longer is.
    pub const SENTINEL: Pose = Pose { x: -100.0, y: -100.0, heading: 0.0 };

    /// Build a pose, normalizing `heading`.
    #[inline]
    pub fn new(x: f64, y: f64, heading: f64) -> Self {
        Self { x, y, heading: normalize_angle(heading) }
    }

    /// A goal pose at `p` with zero heading.  Controllers ignore goal heading.
    #[inline]
    pub fn at(p: Point) -> Self {
        Self { x: p.x, y: p.y, heading: 0.0 }
    }

    #[inline]
    pub fn position(self) -> Point {
        Point::new(self.x, self.y)
    }

    #[inline]
    pub fn distance_to(self, other: Pose) -> f64 {
        distance(self.position(), other.position())
    }

    #[inline]
    pub fn bearing_to(self, other: Pose) -> f64 {
        bearing(self.position(), other.position())
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.heading.is_finite()
    }

    #[inline]
    pub fn is_sentinel(self) -> bool {
        self == Self::SENTINEL
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3} rad)", self.x, self.y, self.heading)
    }
}

// ── VelocityCommand ───────────────────────────────────────────────────────────

/// Forward and yaw-rate command for a unicycle agent.  Issued once per tick,
/// never stored beyond it.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VelocityCommand {
    /// Units per second along the heading.
    pub linear: f64,
    /// Radians per second, counter-clockwise positive.
    pub angular: f64,
}

impl VelocityCommand {
    pub const STOP: VelocityCommand = VelocityCommand { linear: 0.0, angular: 0.0 };

    #[inline]
    pub const fn new(linear: f64, angular: f64) -> Self {
        Self { linear, angular }
    }

    #[inline]
    pub fn is_stop(self) -> bool {
        self.linear == 0.0 && self.angular == 0.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.linear.is_finite() && self.angular.is_finite()
    }
}
