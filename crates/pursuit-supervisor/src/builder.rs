//! Fluent builder and startup sequence for a [`Supervisor`].

use pursuit_agent::{Agent, Role, WanderLimits};
use pursuit_control::{Gains, InterceptionEstimator};
use pursuit_core::{AgentId, PursuitConfig, SimRng, TickClock, deg_to_rad};
use pursuit_script::{ScriptCursor, WaypointScript};
use pursuit_world::{PoseBoard, SpawnRequest, World, WorldResult};

use crate::{Supervisor, SupervisorError, SupervisorResult, SupervisorState};

/// Name of the entity the simulator creates on `reset`.
const DEFAULT_TURTLE: &str = "turtle1";

/// Random spawn request for `name` inside the configured spawn box, heading
/// drawn from whole degrees in `1..=360`.
pub(crate) fn random_spawn(rng: &mut SimRng, config: &PursuitConfig, name: &str) -> SpawnRequest {
    let x = rng.gen_range(config.spawn_min..=config.spawn_max);
    let y = rng.gen_range(config.spawn_min..=config.spawn_max);
    let degrees: u32 = rng.gen_range(1..=360);
    SpawnRequest::new(name, x, y, deg_to_rad(degrees as f64))
}

/// Spawn `request`, set its pen, and return the agent mirroring it.
fn spawn_agent<W: World>(
    world:   &mut W,
    config:  &PursuitConfig,
    request: SpawnRequest,
    id:      AgentId,
    role:    Role,
) -> WorldResult<Agent> {
    let pose = request.pose();
    let teleoperated = role == Role::Offender && config.is_teleoperated(&request.name);
    let mut agent = Agent::new(id, request.name.clone(), role, pose, config.seed)
        .teleoperated(teleoperated)
        .with_wander(WanderLimits {
            linear_max:  config.wander_linear_max,
            angular_max: config.wander_angular_max,
        });

    world.spawn(request)?;
    // Offenders move without drawing; the writer starts with its pen down.
    agent.set_pen(world, role == Role::Offender)?;
    Ok(agent)
}

/// Fluent builder for [`Supervisor<W>`].
///
/// # Required inputs
///
/// - [`PursuitConfig`] — gains, thresholds, agent names, seed, …
/// - [`WaypointScript`] — what the writer draws
/// - `W: World` — the simulator
/// - [`PoseBoard`] — the consumer side of the feed the world publishes into
///
/// # Startup sequence ([`build`](Self::build))
///
/// 1. Validate the configuration.
/// 2. Probe [`World::is_ready`]; fail with [`SupervisorError::WorldNotReady`].
/// 3. `reset` the world, then kill its default `turtle1` if configured.
/// 4. Spawn the writer (pen down) at a random pose.
/// 5. Spawn `offender_count` offenders (pen up) at random poses.
///
/// Any failing simulator call aborts the build.
///
/// # Example
///
/// ```rust,ignore
/// let board = PoseBoard::new();
/// let world = KinematicWorld::new(board.sink());
/// let mut sup = SupervisorBuilder::new(config, WaypointScript::usi(), world, board)
///     .build()?;
/// sup.run(&mut FixedRatePacer::new(10.0), &shutdown, &mut NoopObserver)?;
/// ```
pub struct SupervisorBuilder<W: World> {
    config: PursuitConfig,
    script: WaypointScript,
    world:  W,
    board:  PoseBoard,
}

impl<W: World> SupervisorBuilder<W> {
    pub fn new(config: PursuitConfig, script: WaypointScript, world: W, board: PoseBoard) -> Self {
        Self { config, script, world, board }
    }

    /// Run the startup sequence and return a supervisor in `Writing`.
    pub fn build(self) -> SupervisorResult<Supervisor<W>> {
        let Self { config, script, mut world, board } = self;

        config.validate()?;
        if !world.is_ready() {
            return Err(SupervisorError::WorldNotReady);
        }

        world.reset()?;
        if config.kill_default_turtle {
            world.kill(DEFAULT_TURTLE)?;
        }

        let mut spawn_rng = SimRng::new(config.seed);

        let request = random_spawn(&mut spawn_rng, &config, &config.writer_name);
        let writer = spawn_agent(&mut world, &config, request, AgentId::WRITER, Role::Writer)?;

        let mut offenders = Vec::with_capacity(config.offender_count);
        for i in 0..config.offender_count {
            let request = random_spawn(&mut spawn_rng, &config, &config.offender_name(i));
            let id = AgentId(i as u32 + 1);
            offenders.push(spawn_agent(&mut world, &config, request, id, Role::Offender)?);
        }

        tracing::info!(
            writer    = %writer.name,
            offenders = offenders.len(),
            goals     = script.goal_count(),
            "supervisor ready"
        );

        let writing_gains = Gains::from_config(&config);
        Ok(Supervisor {
            clock:         TickClock::new(config.tick_hz),
            estimator:     InterceptionEstimator::from_config(&config),
            pursuit_gains: writing_gains.boosted(config.pursuit_gain_multiplier),
            writing_gains,
            config,
            world,
            board,
            script,
            cursor:        ScriptCursor::new(),
            writer,
            offenders,
            state:         SupervisorState::Writing,
            spawn_rng,
            captures:      0,
        })
    }
}
