//! Multi-tick maneuvers driven one step per tick.

use pursuit_control::{Gains, MotionController};
use pursuit_core::{Point, Pose, VelocityCommand, deg_to_rad};
use pursuit_world::{World, WorldResult};

use crate::Agent;

/// Outcome of one maneuver step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// Step again next tick.
    Continue,
    /// Finished; a stop command has been issued.
    Done,
}

// ── MoveToGoal ────────────────────────────────────────────────────────────────

/// Closed-loop drive to a point with the P controller.
#[derive(Clone, Debug)]
pub struct MoveToGoal {
    pub goal:      Point,
    pub tolerance: f64,
    controller:    MotionController,
}

impl MoveToGoal {
    pub fn new(goal: Point, tolerance: f64, gains: Gains) -> Self {
        Self { goal, tolerance, controller: MotionController::new(gains) }
    }

    /// `true` once `pose` is inside the tolerance radius.  A non-finite pose
    /// also counts as reached, so a broken feed halts the agent instead of
    /// steering it on garbage.
    pub fn reached(&self, pose: Pose) -> bool {
        !pose.is_finite() || pose.distance_to(Pose::at(self.goal)) < self.tolerance
    }

    /// The command this maneuver would issue from `pose`.
    pub fn command_from(&self, pose: Pose) -> VelocityCommand {
        self.controller.command(pose, Pose::at(self.goal))
    }

    /// Stop and finish if the goal is reached, otherwise issue one
    /// controller command.
    pub fn step<W: World>(&self, agent: &Agent, world: &mut W) -> WorldResult<Step> {
        let pose = agent.pose();
        if self.reached(pose) {
            agent.stop(world)?;
            return Ok(Step::Done);
        }
        agent.issue(world, self.command_from(pose))?;
        Ok(Step::Continue)
    }
}

// ── RotateBy ──────────────────────────────────────────────────────────────────

/// Open-loop turn in place: hold a constant yaw rate for `angle / speed`
/// seconds of scheduler time, then stop.
///
/// Pose feedback is not consulted, so any mismatch between commanded and
/// actual yaw rate shows up as heading error.
#[derive(Clone, Debug)]
pub struct RotateBy {
    /// Total angle to turn, radians, non-negative.
    angle:      f64,
    /// Signed yaw rate, radians per second (negative = clockwise).
    rate:       f64,
    started_at: Option<f64>,
}

impl RotateBy {
    pub fn new(angle_degrees: f64, clockwise: bool, speed_degrees_per_sec: f64) -> Self {
        let rate = deg_to_rad(speed_degrees_per_sec.abs());
        Self {
            angle:      deg_to_rad(angle_degrees.abs()),
            rate:       if clockwise { -rate } else { rate },
            started_at: None,
        }
    }

    /// Seconds the turn takes at the commanded rate.
    pub fn duration_secs(&self) -> f64 {
        self.angle / self.rate.abs()
    }

    /// Angle covered by `now_secs`, assuming the commanded rate was achieved.
    pub fn turned(&self, now_secs: f64) -> f64 {
        self.started_at
            .map_or(0.0, |start| self.rate.abs() * (now_secs - start).max(0.0))
    }

    /// Issue the yaw command, or stop once enough time has elapsed.
    ///
    /// The first call records `now_secs` as the start time.  A zero or
    /// non-finite rate finishes immediately.
    pub fn step<W: World>(&mut self, agent: &Agent, world: &mut W, now_secs: f64) -> WorldResult<Step> {
        self.started_at.get_or_insert(now_secs);
        if !(self.rate.is_finite() && self.rate != 0.0) || self.turned(now_secs) >= self.angle {
            agent.stop(world)?;
            return Ok(Step::Done);
        }
        agent.issue(world, VelocityCommand::new(0.0, self.rate))?;
        Ok(Step::Continue)
    }
}
