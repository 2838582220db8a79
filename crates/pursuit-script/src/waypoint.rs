//! Waypoints, scripts, and the cursor the writer walks them with.

use std::fmt;

use pursuit_core::Point;

use crate::{ScriptError, ScriptResult};

/// One step of a drawing script.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Waypoint {
    /// Drive to this position.
    Goal(Point),
    /// Lift the pen.  Consumed without moving.
    PenUp,
    /// Lower the pen.  Consumed without moving.
    PenDown,
}

impl Waypoint {
    pub const PEN_UP_PAIR: (f64, f64) = (-2.0, -2.0);
    pub const PEN_DOWN_PAIR: (f64, f64) = (-1.0, -1.0);

    /// Interpret a raw `(x, y)` pair, recognising the two sentinel pairs.
    pub fn from_pair(x: f64, y: f64) -> Self {
        if (x, y) == Self::PEN_UP_PAIR {
            Waypoint::PenUp
        } else if (x, y) == Self::PEN_DOWN_PAIR {
            Waypoint::PenDown
        } else {
            Waypoint::Goal(Point::new(x, y))
        }
    }

    /// The raw pair this waypoint was (or would be) written as.
    pub fn as_pair(self) -> (f64, f64) {
        match self {
            Waypoint::Goal(p) => (p.x, p.y),
            Waypoint::PenUp => Self::PEN_UP_PAIR,
            Waypoint::PenDown => Self::PEN_DOWN_PAIR,
        }
    }

    #[inline]
    pub fn goal(self) -> Option<Point> {
        match self {
            Waypoint::Goal(p) => Some(p),
            _ => None,
        }
    }

    /// `Some(true)` for pen up, `Some(false)` for pen down, `None` for goals.
    #[inline]
    pub fn pen_off(self) -> Option<bool> {
        match self {
            Waypoint::PenUp => Some(true),
            Waypoint::PenDown => Some(false),
            Waypoint::Goal(_) => None,
        }
    }
}

impl fmt::Display for Waypoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Waypoint::Goal(p) => write!(f, "goal {p}"),
            Waypoint::PenUp => f.write_str("pen up"),
            Waypoint::PenDown => f.write_str("pen down"),
        }
    }
}

// ── WaypointScript ────────────────────────────────────────────────────────────

/// An ordered, validated list of waypoints containing at least one goal.
#[derive(Clone, Debug, PartialEq)]
pub struct WaypointScript {
    steps: Vec<Waypoint>,
}

impl WaypointScript {
    /// Validate and wrap `steps`.
    ///
    /// Fails if there is no goal waypoint or a goal coordinate is not finite.
    pub fn new(steps: Vec<Waypoint>) -> ScriptResult<Self> {
        for (index, step) in steps.iter().enumerate() {
            if let Waypoint::Goal(p) = step {
                if !p.is_finite() {
                    return Err(ScriptError::NonFinite { index, x: p.x, y: p.y });
                }
            }
        }
        if !steps.iter().any(|s| s.goal().is_some()) {
            return Err(ScriptError::NoGoal);
        }
        Ok(Self { steps })
    }

    /// Build from raw pairs, recognising sentinels.
    pub fn from_pairs(pairs: &[(f64, f64)]) -> ScriptResult<Self> {
        Self::new(pairs.iter().map(|&(x, y)| Waypoint::from_pair(x, y)).collect())
    }

    /// The letters "USI", drawn in an 11 × 11 arena.
    pub fn usi() -> Self {
        const USI: [(f64, f64); 25] = [
            // starting position
            (-2.0, -2.0), (1.0, 11.0), (1.0, 8.0),
            // U
            (-1.0, -1.0), (1.0, 3.0), (2.0, 2.0), (3.0, 4.0), (3.0, 10.0),
            // reposition
            (-2.0, -2.0), (9.0, 10.0), (6.0, 9.0),
            // S
            (-1.0, -1.0), (5.0, 9.0), (4.0, 7.0), (5.0, 5.5), (6.0, 5.5), (7.0, 4.0), (6.0, 2.5), (3.0, 2.5),
            // reposition
            (-2.0, -2.0), (9.0, 2.0), (9.0, 3.5),
            // I
            (-1.0, -1.0), (9.0, 6.0), (9.0, 10.0),
        ];
        Self {
            steps: USI.iter().map(|&(x, y)| Waypoint::from_pair(x, y)).collect(),
        }
    }

    /// Where the writer parks after a chase: the first goal of the script.
    pub fn return_point(&self) -> Point {
        self.steps
            .iter()
            .find_map(|s| s.goal())
            .unwrap_or_default()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<Waypoint> {
        self.steps.get(index).copied()
    }

    pub fn steps(&self) -> &[Waypoint] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always `false` for a validated script; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn goal_count(&self) -> usize {
        self.steps.iter().filter(|s| s.goal().is_some()).count()
    }
}

// ── ScriptCursor ──────────────────────────────────────────────────────────────

/// Position of the writer within its script.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ScriptCursor {
    index: usize,
}

impl ScriptCursor {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn index(self) -> usize {
        self.index
    }

    /// The waypoint under the cursor, or `None` once the script is finished.
    #[inline]
    pub fn current(self, script: &WaypointScript) -> Option<Waypoint> {
        script.get(self.index)
    }

    #[inline]
    pub fn advance(&mut self) {
        self.index += 1;
    }

    #[inline]
    pub fn restart(&mut self) {
        self.index = 0;
    }

    #[inline]
    pub fn is_finished(self, script: &WaypointScript) -> bool {
        self.index >= script.len()
    }
}
