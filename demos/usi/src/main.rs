//! usi — the writer draws "USI" while offenders wander into its way.
//!
//! Runs the supervisor against the in-process kinematic world.  The pose
//! feed is delayed by a couple of ticks to mimic a real simulator's topic
//! latency.
//!
//! ```text
//! usi [--config FILE.json] [--script FILE.csv] [--seconds N] [--fast]
//! ```
//!
//! `--fast` runs in virtual time (no sleeping).  Set `RUST_LOG=debug` for
//! per-tick output.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use tracing_subscriber::EnvFilter;

use pursuit_agent::{Agent, RotateBy, Step};
use pursuit_core::{FixedRatePacer, PursuitConfig, ShutdownSignal, SimulatedPacer, Tick, TickPacer};
use pursuit_script::{WaypointScript, load_script_csv};
use pursuit_supervisor::{SupervisorBuilder, SupervisorObserver, SupervisorState, TickReport};
use pursuit_world::{KinematicWorld, PoseBoard, World};

// ── Constants ─────────────────────────────────────────────────────────────────

const DEFAULT_RUN_SECS: f64   = 60.0;
const FEED_DELAY_TICKS: usize = 2;
const SPIN_DEG_PER_SEC: f64   = 180.0;

// ── Arguments ─────────────────────────────────────────────────────────────────

struct Args {
    config:   Option<PathBuf>,
    script:   Option<PathBuf>,
    run_secs: f64,
    fast:     bool,
}

fn parse_args() -> Result<Args> {
    let mut args = Args { config: None, script: None, run_secs: DEFAULT_RUN_SECS, fast: false };
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--config" => args.config = Some(it.next().context("--config needs a path")?.into()),
            "--script" => args.script = Some(it.next().context("--script needs a path")?.into()),
            "--seconds" => {
                let value = it.next().context("--seconds needs a value")?;
                args.run_secs = value.parse().with_context(|| format!("bad --seconds {value:?}"))?;
            }
            "--fast" => args.fast = true,
            other => bail!("unknown argument {other:?}"),
        }
    }
    Ok(args)
}

fn load_config(args: &Args) -> Result<PursuitConfig> {
    let Some(path) = &args.config else {
        return Ok(PursuitConfig::default());
    };
    let file = std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let config: PursuitConfig =
        serde_json::from_reader(file).with_context(|| format!("parsing {}", path.display()))?;
    tracing::info!(path = %path.display(), "loaded config");
    Ok(config)
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct Summary {
    ticks:            u64,
    chases:           usize,
    captures:         usize,
    respawns:         usize,
    commands:         usize,
    publish_failures: usize,
    last_tick:        Tick,
}

impl SupervisorObserver for Summary {
    fn on_transition(&mut self, _tick: Tick, _from: SupervisorState, to: SupervisorState) {
        if to.is_angry() {
            self.chases += 1;
        }
    }

    fn on_capture(&mut self, tick: Tick, name: &str, respawned: bool) {
        self.captures += 1;
        if respawned {
            self.respawns += 1;
        }
        println!("{tick}: caught {name}{}", if respawned { " (respawned)" } else { "" });
    }

    fn on_tick_end(&mut self, _tick: Tick, report: &TickReport) {
        self.ticks += 1;
        self.commands += report.commands;
        self.publish_failures += report.publish_failures;
    }

    fn on_run_end(&mut self, final_tick: Tick) {
        self.last_tick = final_tick;
    }
}

// ── Closing spin ──────────────────────────────────────────────────────────────

/// Turn the writer once in place.  Drives the world directly; the supervisor
/// is no longer ticking.
fn closing_spin<W: World, P: TickPacer>(world: &mut W, pacer: &mut P, writer: &Agent) -> Result<()> {
    let mut spin = RotateBy::new(360.0, false, SPIN_DEG_PER_SEC);
    loop {
        let now = pacer.wait_next();
        world.advance(pacer.period_secs())?;
        if spin.step(writer, world, now)? == Step::Done {
            return Ok(());
        }
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = parse_args()?;
    let config = load_config(&args)?;
    let script = match &args.script {
        Some(path) => load_script_csv(path).with_context(|| format!("loading {}", path.display()))?,
        None => WaypointScript::usi(),
    };

    println!("=== usi — pursuit supervisor demo ===");
    println!(
        "Offenders: {}  |  Goals: {}  |  Seed: {}  |  {} s{}",
        config.offender_count,
        script.goal_count(),
        config.seed,
        args.run_secs,
        if args.fast { " (virtual time)" } else { "" },
    );
    println!();

    // 1. World + feed.
    let board = PoseBoard::new();
    let world = KinematicWorld::new(board.sink()).with_report_delay(FEED_DELAY_TICKS);

    // 2. Supervisor.
    let tick_hz = config.tick_hz;
    let mut sup = SupervisorBuilder::new(config, script, world, board).build()?;

    // 3. Run.
    let mut summary = Summary::default();
    let t0 = Instant::now();
    let ticks = sup.clock.ticks_for_secs(args.run_secs);
    if args.fast {
        let mut pacer = SimulatedPacer::new(tick_hz);
        sup.run_ticks(ticks, &mut pacer, &mut summary)?;
    } else {
        let shutdown = ShutdownSignal::new();
        let timer = shutdown.clone();
        let run_for = Duration::from_secs_f64(args.run_secs.max(0.0));
        std::thread::spawn(move || {
            std::thread::sleep(run_for);
            timer.trigger();
        });
        let mut pacer = FixedRatePacer::new(tick_hz);
        sup.run(&mut pacer, &shutdown, &mut summary)?;
    }
    let elapsed = t0.elapsed();

    // 4. Closing spin.
    let (writer, world) = sup.writer_and_world();
    if args.fast {
        closing_spin(world, &mut SimulatedPacer::new(tick_hz), writer)?;
    } else {
        closing_spin(world, &mut FixedRatePacer::new(tick_hz), writer)?;
    }

    // 5. Summary.
    println!();
    println!("Run complete in {:.3} s ({} ticks, final {})", elapsed.as_secs_f64(), summary.ticks, summary.last_tick);
    println!("  chases           : {}", summary.chases);
    println!("  captures         : {} ({} respawned)", summary.captures, summary.respawns);
    println!("  commands         : {}", summary.commands);
    println!("  publish failures : {}", summary.publish_failures);
    println!("  final state      : {}", sup.state());
    println!();

    println!("{:<14} {:<8} {:<20}", "Offender", "Teleop", "Pose");
    println!("{}", "-".repeat(44));
    for agent in sup.offenders() {
        println!(
            "{:<14} {:<8} {:<20}",
            agent.name,
            if agent.teleoperated { "yes" } else { "no" },
            agent.pose().position().to_string(),
        );
    }

    Ok(())
}
