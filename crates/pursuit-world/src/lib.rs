//! `pursuit-world` — the simulator seen from the control core.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                        |
//! |---------------|-----------------------------------------------------------------|
//! | [`world`]     | `World` trait, `SpawnRequest`, `PenStyle`                        |
//! | [`feed`]      | `PoseReport`, `PoseBoard` (last-writer-wins), `PoseSink`         |
//! | [`kinematic`] | `KinematicWorld` — in-process unicycle simulator                 |
//! | [`error`]     | `WorldError`, `WorldResult<T>`                                   |
//!
//! # Two channels
//!
//! Actuation flows through [`World`]: spawn/kill/reset/clear/pen service
//! calls plus fire-and-forget velocity publishing.  Feedback flows the other
//! way through a [`PoseSink`], which any producer thread may hold; the
//! supervisor drains the matching [`PoseBoard`] once at the top of each tick.
//!
//! # Cargo features
//!
//! | Feature   | Effect                                                   |
//! |-----------|----------------------------------------------------------|
//! | `fx-hash` | FxHash entity table in `KinematicWorld`.                 |
//! | `serde`   | Serde derives on `PoseReport`, `PenStyle`, `SpawnRequest`.|

pub mod error;
pub mod feed;
pub mod kinematic;
pub mod world;

#[cfg(test)]
mod tests;

pub use error::{WorldError, WorldResult};
pub use feed::{PoseBoard, PoseReport, PoseSink};
pub use kinematic::{ARENA_SIZE, KinematicWorld};
pub use world::{PenStyle, SpawnRequest, World};
