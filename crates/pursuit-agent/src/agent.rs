//! The `Agent` type.

use std::fmt;

use pursuit_core::{AgentId, AgentRng, Pose, VelocityCommand};
use pursuit_world::{PenStyle, PoseReport, World, WorldResult};

/// What an agent is for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// Draws the script and chases intruders.  Exactly one per run.
    Writer,
    /// Wanders (or is driven by a human) and gets chased.
    Offender,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::Writer => "writer",
            Role::Offender => "offender",
        })
    }
}

/// Ranges for random wander commands.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WanderLimits {
    /// Linear speed is drawn from `[0, linear_max]`.
    pub linear_max:  f64,
    /// Yaw rate is drawn from `[-angular_max, angular_max]`.
    pub angular_max: f64,
}

impl Default for WanderLimits {
    fn default() -> Self {
        Self { linear_max: 5.0, angular_max: 5.0 }
    }
}

/// Local mirror of one simulated agent plus the commands it can issue.
///
/// The pose is whatever the feed last reported and may lag the simulator;
/// nothing here tries to extrapolate it.
#[derive(Debug)]
pub struct Agent {
    pub id:   AgentId,
    pub name: String,
    pub role: Role,

    /// Driven by a human: never sent wander commands.
    pub teleoperated: bool,

    /// Respawned under the same name when caught instead of being removed.
    pub respawn_on_capture: bool,

    pose:   Pose,
    speed:  Option<f64>,
    pen:    PenStyle,
    wander: WanderLimits,
    rng:    AgentRng,
}

impl Agent {
    /// A new agent believed to be at `pose` (usually its spawn pose).
    ///
    /// Its wander RNG is seeded from `run_seed` and `id`.
    pub fn new(id: AgentId, name: impl Into<String>, role: Role, pose: Pose, run_seed: u64) -> Self {
        Self {
            id,
            name: name.into(),
            role,
            teleoperated: false,
            respawn_on_capture: false,
            pose,
            speed: None,
            pen: PenStyle::DEFAULT,
            wander: WanderLimits::default(),
            rng: AgentRng::new(run_seed, id),
        }
    }

    /// Mark as human-driven.  Teleoperated agents also respawn on capture
    /// unless overridden with [`with_respawn_on_capture`](Self::with_respawn_on_capture).
    pub fn teleoperated(mut self, teleoperated: bool) -> Self {
        self.teleoperated = teleoperated;
        self.respawn_on_capture = teleoperated;
        self
    }

    pub fn with_respawn_on_capture(mut self, respawn: bool) -> Self {
        self.respawn_on_capture = respawn;
        self
    }

    pub fn with_wander(mut self, limits: WanderLimits) -> Self {
        self.wander = limits;
        self
    }

    pub fn with_pen(mut self, pen: PenStyle) -> Self {
        self.pen = pen;
        self
    }

    // ── Feedback ──────────────────────────────────────────────────────────

    #[inline]
    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Last reported forward speed; `None` until the first report.
    #[inline]
    pub fn speed(&self) -> Option<f64> {
        self.speed
    }

    /// Overwrite the local mirror with a feed report.
    pub fn apply_report(&mut self, report: &PoseReport) {
        self.pose = report.pose;
        self.speed = Some(report.linear_velocity);
    }

    /// Overwrite the pose without a report and forget the speed.
    pub fn force_pose(&mut self, pose: Pose) {
        self.pose = pose;
        self.speed = None;
    }

    #[inline]
    pub fn is_autonomous(&self) -> bool {
        !self.teleoperated
    }

    #[inline]
    pub fn distance_to(&self, other: &Agent) -> f64 {
        self.pose.distance_to(other.pose)
    }

    #[inline]
    pub fn pen(&self) -> PenStyle {
        self.pen
    }

    // ── Commands ──────────────────────────────────────────────────────────

    /// Publish `command` for this agent.
    pub fn issue<W: World>(&self, world: &mut W, command: VelocityCommand) -> WorldResult<()> {
        world.publish_velocity(&self.name, command)
    }

    /// Publish a zero-velocity command.
    pub fn stop<W: World>(&self, world: &mut W) -> WorldResult<()> {
        self.issue(world, VelocityCommand::STOP)
    }

    /// Publish one random command within the wander limits and return it.
    pub fn wander<W: World>(&mut self, world: &mut W) -> WorldResult<VelocityCommand> {
        let command = VelocityCommand::new(
            self.rng.uniform(0.0, self.wander.linear_max),
            self.rng.uniform(-self.wander.angular_max, self.wander.angular_max),
        );
        self.issue(world, command)?;
        Ok(command)
    }

    /// Lift (`off = true`) or lower the pen, keeping the agent's color.
    pub fn set_pen<W: World>(&mut self, world: &mut W, off: bool) -> WorldResult<()> {
        let pen = self.pen.with_off(off);
        world.set_pen(&self.name, pen)?;
        self.pen = pen;
        tracing::debug!(agent = %self.name, off, "pen");
        Ok(())
    }
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?} at {}", self.role, self.name, self.pose)
    }
}
