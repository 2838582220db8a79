//! The `Supervisor` struct and its tick loop.

use pursuit_agent::{Agent, MoveToGoal, Step};
use pursuit_control::{Gains, InterceptionEstimator, MotionController};
use pursuit_core::{
    AgentId, Point, Pose, PursuitConfig, ShutdownSignal, SimRng, TargetingMode, Tick, TickClock,
    TickPacer,
};
use pursuit_script::{ScriptCursor, Waypoint, WaypointScript};
use pursuit_world::{PoseBoard, World, WorldError, WorldResult};

use crate::builder::random_spawn;
use crate::state::{Effect, Event, transition};
use crate::{SupervisorObserver, SupervisorResult, SupervisorState};

// ── TickReport ────────────────────────────────────────────────────────────────

/// One captured offender.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Capture {
    pub name:      String,
    /// `true` if the offender was respawned, `false` if it was removed.
    pub respawned: bool,
}

/// What one tick did.
#[derive(Clone, Debug, PartialEq)]
pub struct TickReport {
    pub tick:             Tick,
    /// Pacer time of the tick, seconds.
    pub time_secs:        f64,
    /// State after the tick.
    pub state:            SupervisorState,
    /// Applied transitions, in order.
    pub transitions:      Vec<(SupervisorState, SupervisorState)>,
    pub captures:         Vec<Capture>,
    /// Velocity commands accepted by the transport.
    pub commands:         usize,
    /// Velocity commands the transport refused.
    pub publish_failures: usize,
}

impl TickReport {
    fn new(tick: Tick, time_secs: f64, state: SupervisorState) -> Self {
        Self {
            tick,
            time_secs,
            state,
            transitions:      Vec::new(),
            captures:         Vec::new(),
            commands:         0,
            publish_failures: 0,
        }
    }
}

/// Count a velocity publish.  Transport failures are transient: logged,
/// counted, and retried implicitly by the next tick.  Anything else is fatal.
fn note_publish(result: WorldResult<()>, agent: &str, report: &mut TickReport) -> SupervisorResult<()> {
    match result {
        Ok(()) => {
            report.commands += 1;
            Ok(())
        }
        Err(WorldError::Transport(reason)) => {
            tracing::warn!(agent, %reason, "velocity publish failed");
            report.publish_failures += 1;
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Offenders at the sentinel or with a broken pose are never chased.
#[inline]
fn is_candidate(pose: Pose) -> bool {
    pose.is_finite() && !pose.is_sentinel()
}

// ── Supervisor ────────────────────────────────────────────────────────────────

/// Owns the world, the agents and the state machine, and drives them one
/// tick at a time.
///
/// Each tick:
///
/// 1. **Advance** — [`World::advance`] by one period.
/// 2. **Refresh** — drain the [`PoseBoard`] into the agents' pose mirrors.
/// 3. **Act** — one step of the current state:
///    - `Writing`: consume pen instructions and reached goals, command the
///      writer toward the current goal, then wander each offender and stop
///      at the first one inside the proximity threshold.
///    - `Angry`: test capture; otherwise wander the target and command the
///      writer toward it with the pursuit gains.
///    - `Returning`: one [`MoveToGoal`] step toward the return point.
///
/// Create via [`SupervisorBuilder`][crate::SupervisorBuilder].
pub struct Supervisor<W: World> {
    pub(crate) config: PursuitConfig,

    /// Tick counter.  Advanced once at the end of every tick.
    pub clock: TickClock,

    pub(crate) world:         W,
    pub(crate) board:         PoseBoard,
    pub(crate) script:        WaypointScript,
    pub(crate) cursor:        ScriptCursor,
    pub(crate) writer:        Agent,
    pub(crate) offenders:     Vec<Agent>,
    pub(crate) state:         SupervisorState,
    pub(crate) estimator:     InterceptionEstimator,
    pub(crate) writing_gains: Gains,
    pub(crate) pursuit_gains: Gains,
    /// Respawn placement.
    pub(crate) spawn_rng:     SimRng,
    pub(crate) captures:      u64,
}

impl<W: World> Supervisor<W> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Tick until `shutdown` is triggered.
    ///
    /// The signal is checked once per tick after the pacer wait, so no
    /// command is issued once it has been seen.
    pub fn run<P, O>(&mut self, pacer: &mut P, shutdown: &ShutdownSignal, observer: &mut O) -> SupervisorResult<()>
    where
        P: TickPacer,
        O: SupervisorObserver,
    {
        loop {
            let now_secs = pacer.wait_next();
            if shutdown.is_triggered() {
                tracing::info!(tick = %self.clock.current_tick, "shutdown requested");
                break;
            }
            self.observed_tick(now_secs, observer)?;
        }
        observer.on_run_end(self.clock.current_tick);
        Ok(())
    }

    /// Run exactly `n` ticks.
    pub fn run_ticks<P, O>(&mut self, n: u64, pacer: &mut P, observer: &mut O) -> SupervisorResult<()>
    where
        P: TickPacer,
        O: SupervisorObserver,
    {
        for _ in 0..n {
            let now_secs = pacer.wait_next();
            self.observed_tick(now_secs, observer)?;
        }
        observer.on_run_end(self.clock.current_tick);
        Ok(())
    }

    /// Process one tick at pacer time `now_secs`.
    pub fn tick(&mut self, now_secs: f64) -> SupervisorResult<TickReport> {
        let now = self.clock.current_tick;
        let mut report = TickReport::new(now, now_secs, self.state);

        self.world.advance(self.clock.period_secs)?;
        self.refresh_poses();

        match self.state {
            SupervisorState::Writing => self.tick_writing(&mut report)?,
            SupervisorState::Angry { target } => self.tick_angry(target, &mut report)?,
            SupervisorState::Returning => self.tick_returning(&mut report)?,
        }

        report.state = self.state;
        tracing::debug!(
            tick     = %now,
            state    = %self.state,
            commands = report.commands,
            failures = report.publish_failures,
            "tick"
        );
        self.clock.advance();
        Ok(report)
    }

    /// Stop tracking the offender named `name` without touching the world.
    /// Call between ticks.
    ///
    /// If it was being chased, the next tick gives up the chase.
    pub fn remove_offender(&mut self, name: &str) -> Option<Agent> {
        let index = self.offenders.iter().position(|a| a.name == name)?;
        Some(self.offenders.remove(index))
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn state(&self) -> SupervisorState {
        self.state
    }

    pub fn config(&self) -> &PursuitConfig {
        &self.config
    }

    pub fn writer(&self) -> &Agent {
        &self.writer
    }

    pub fn offenders(&self) -> &[Agent] {
        &self.offenders
    }

    pub fn offender(&self, name: &str) -> Option<&Agent> {
        self.offenders.iter().find(|a| a.name == name)
    }

    pub fn script(&self) -> &WaypointScript {
        &self.script
    }

    /// Index of the next script step.
    pub fn script_position(&self) -> usize {
        self.cursor.index()
    }

    /// Offenders captured since startup.
    pub fn captures(&self) -> u64 {
        self.captures
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }

    /// The writer alongside mutable world access, for driving the writer
    /// outside the tick loop.
    pub fn writer_and_world(&mut self) -> (&Agent, &mut W) {
        (&self.writer, &mut self.world)
    }

    // ── Tick phases ───────────────────────────────────────────────────────

    fn observed_tick<O: SupervisorObserver>(&mut self, now_secs: f64, observer: &mut O) -> SupervisorResult<()> {
        let tick = self.clock.current_tick;
        observer.on_tick_start(tick);
        let report = self.tick(now_secs)?;
        for &(from, to) in &report.transitions {
            observer.on_transition(tick, from, to);
        }
        for capture in &report.captures {
            observer.on_capture(tick, &capture.name, capture.respawned);
        }
        observer.on_tick_end(tick, &report);
        Ok(())
    }

    fn refresh_poses(&mut self) {
        for (name, pose_report) in self.board.drain() {
            if name == self.writer.name {
                self.writer.apply_report(&pose_report);
            } else if let Some(agent) = self.offenders.iter_mut().find(|a| a.name == name) {
                agent.apply_report(&pose_report);
            }
        }
    }

    fn tick_writing(&mut self, report: &mut TickReport) -> SupervisorResult<()> {
        // An idle writer still guards its drawing.
        let result = match self.next_goal(report)? {
            Some(goal) => {
                let leg = MoveToGoal::new(goal, self.config.waypoint_tolerance, self.writing_gains);
                leg.step(&self.writer, &mut self.world).map(|_| ())
            }
            None => self.writer.stop(&mut self.world),
        };
        note_publish(result, &self.writer.name, report)?;

        let mut intruder = None;
        for offender in &mut self.offenders {
            if offender.is_autonomous() {
                let result = offender.wander(&mut self.world).map(|_| ());
                note_publish(result, &offender.name, report)?;
            }
            if is_candidate(offender.pose())
                && self.writer.distance_to(offender) < self.config.proximity_threshold
            {
                intruder = Some(offender.id);
                break;
            }
        }

        if let Some(target) = intruder {
            self.apply(Event::IntruderDetected { target }, report)?;
        }
        Ok(())
    }

    /// Current goal, after consuming pen instructions and goals already
    /// within tolerance.  Restarts the script at most once per tick; `None`
    /// if every goal is within tolerance.
    fn next_goal(&mut self, report: &mut TickReport) -> SupervisorResult<Option<Point>> {
        let mut restarted = false;
        loop {
            match self.cursor.current(&self.script) {
                None if restarted => return Ok(None),
                None => {
                    self.apply(Event::ScriptFinished, report)?;
                    restarted = true;
                }
                Some(Waypoint::Goal(p)) => {
                    if self.writer.pose().distance_to(Pose::at(p)) >= self.config.waypoint_tolerance {
                        return Ok(Some(p));
                    }
                    self.cursor.advance();
                }
                Some(instruction) => {
                    if let Some(off) = instruction.pen_off() {
                        self.writer.set_pen(&mut self.world, off)?;
                    }
                    self.cursor.advance();
                }
            }
        }
    }

    fn tick_angry(&mut self, target: AgentId, report: &mut TickReport) -> SupervisorResult<()> {
        let Some(index) = self.offenders.iter().position(|a| a.id == target) else {
            tracing::warn!(chase = %target, "chase target vanished");
            return self.apply(Event::TargetLost, report);
        };

        if self.writer.distance_to(&self.offenders[index]) < self.config.capture_threshold {
            return self.apply(Event::TargetCaught, report);
        }

        let offender = &mut self.offenders[index];
        if offender.is_autonomous() {
            let result = offender.wander(&mut self.world).map(|_| ());
            note_publish(result, &offender.name, report)?;
        }

        let aim = match self.config.targeting {
            TargetingMode::Direct => offender.pose(),
            TargetingMode::LookAhead => {
                self.estimator.predict(self.writer.pose(), offender.pose(), offender.speed())
            }
        };
        let command = MotionController::new(self.pursuit_gains).command(self.writer.pose(), aim);
        let result = self.writer.issue(&mut self.world, command);
        note_publish(result, &self.writer.name, report)
    }

    fn tick_returning(&mut self, report: &mut TickReport) -> SupervisorResult<()> {
        let home = self.script.return_point();
        let leg = MoveToGoal::new(home, self.config.waypoint_tolerance, self.writing_gains);
        match leg.step(&self.writer, &mut self.world) {
            Ok(Step::Continue) => {
                report.commands += 1;
                Ok(())
            }
            Ok(Step::Done) => {
                report.commands += 1;
                self.apply(Event::ReturnReached, report)
            }
            Err(e) => note_publish(Err(e), &self.writer.name, report),
        }
    }

    // ── Transitions ───────────────────────────────────────────────────────

    fn apply(&mut self, event: Event, report: &mut TickReport) -> SupervisorResult<()> {
        let from = self.state;
        let Some((to, effects)) = transition(from, event) else {
            tracing::debug!(state = %from, ?event, "event ignored");
            return Ok(());
        };

        for effect in effects {
            self.apply_effect(effect, report)?;
        }
        self.state = to;
        report.transitions.push((from, to));
        tracing::info!(%from, %to, ?event, "state transition");
        Ok(())
    }

    fn apply_effect(&mut self, effect: Effect, report: &mut TickReport) -> SupervisorResult<()> {
        match effect {
            Effect::PenDownWriter => self.writer.set_pen(&mut self.world, false)?,
            Effect::StopWriter => {
                let result = self.writer.stop(&mut self.world);
                note_publish(result, &self.writer.name, report)?;
            }
            Effect::Capture(id) => self.capture(id, report)?,
            Effect::ClearDrawing => self.world.clear()?,
            Effect::RestartScript => {
                self.cursor.restart();
                tracing::info!(steps = self.script.len(), "script restarted");
            }
        }
        Ok(())
    }

    /// Kill the offender, then respawn it under the same name or drop it
    /// from the list.
    fn capture(&mut self, id: AgentId, report: &mut TickReport) -> SupervisorResult<()> {
        let Some(index) = self.offenders.iter().position(|a| a.id == id) else {
            tracing::warn!(offender = %id, "capture of unknown offender");
            return Ok(());
        };

        let name = self.offenders[index].name.clone();
        self.world.kill(&name)?;
        self.captures += 1;

        let respawned = self.offenders[index].respawn_on_capture;
        if respawned {
            let request = random_spawn(&mut self.spawn_rng, &self.config, &name);
            self.world.spawn(request)?;
            let agent = &mut self.offenders[index];
            agent.set_pen(&mut self.world, true)?;
            // Suppress detection until the new incarnation reports in.
            agent.force_pose(Pose::SENTINEL);
            self.board.forget(&name);
        } else {
            self.offenders.remove(index);
        }

        tracing::info!(offender = %name, respawned, remaining = self.offenders.len(), "offender captured");
        report.captures.push(Capture { name, respawned });
        Ok(())
    }
}
