//! `pursuit-core` — foundational types for the pursuit workspace.
//!
//! This crate is a dependency of every other `pursuit-*` crate.  It has no
//! `pursuit-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`ids`]         | `AgentId`                                                  |
//! | [`geom`]        | `Point`, `Pose`, `VelocityCommand`, angle/distance helpers |
//! | [`time`]        | `Tick`, `TickClock`, `TickPacer`, `ShutdownSignal`         |
//! | [`rng`]         | `AgentRng` (per-agent), `SimRng` (global)                  |
//! | [`config`]      | `PursuitConfig`, `TargetingMode`, `HeadingVector`          |
//! | [`error`]       | `CoreError`, `CoreResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geom;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{HeadingVector, PursuitConfig, TargetingMode};
pub use error::{CoreError, CoreResult};
pub use geom::{
    Point, Pose, VelocityCommand, bearing, deg_to_rad, distance, normalize_angle,
    normalize_angle_difference, rad_to_deg,
};
pub use ids::AgentId;
pub use rng::{AgentRng, SimRng};
pub use time::{FixedRatePacer, ShutdownSignal, SimulatedPacer, Tick, TickClock, TickPacer};
