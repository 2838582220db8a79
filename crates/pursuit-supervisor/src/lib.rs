//! `pursuit-supervisor` — the writer's behavior and the tick loop.
//!
//! # Tick loop
//!
//! ```text
//! loop:
//!   pacer.wait_next()           — sleep (wall clock) or step (virtual time)
//!   shutdown?                   — stop before issuing anything
//!   ① Advance  — world.advance(period)
//!   ② Refresh  — drain PoseBoard into the agents' pose mirrors
//!   ③ Act      — Writing | Angry(target) | Returning, one step each
//!   ④ Report   — TickReport to the observer
//! ```
//!
//! State changes go through the pure [`transition`] function; the supervisor
//! only applies the [`Effect`]s it returns.  The offender list is changed
//! only while an effect is applied, never while it is being iterated.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use pursuit_core::{PursuitConfig, ShutdownSignal, SimulatedPacer};
//! use pursuit_script::WaypointScript;
//! use pursuit_supervisor::{NoopObserver, SupervisorBuilder};
//! use pursuit_world::{KinematicWorld, PoseBoard};
//!
//! let board = PoseBoard::new();
//! let world = KinematicWorld::new(board.sink());
//! let mut sup = SupervisorBuilder::new(PursuitConfig::default(), WaypointScript::usi(), world, board)
//!     .build()?;
//! sup.run_ticks(600, &mut SimulatedPacer::new(10.0), &mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod state;
pub mod supervisor;


pub use builder::SupervisorBuilder;
pub use error::{SupervisorError, SupervisorResult};
pub use observer::{NoopObserver, SupervisorObserver};
pub use state::{Effect, Event, SupervisorState, transition};
pub use supervisor::{Capture, Supervisor, TickReport};
