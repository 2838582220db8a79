//! `pursuit-script` — what the writer draws.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`waypoint`]  | `Waypoint` (goal or pen instruction), `WaypointScript`, `ScriptCursor` |
//! | [`loader`]    | `load_script_csv`, `load_script_reader`                   |
//! | [`error`]     | `ScriptError`, `ScriptResult<T>`                          |
//!
//! # Sentinel pairs
//!
//! Scripts are lists of `(x, y)` pairs.  Two pairs are instructions rather
//! than coordinates:
//!
//! ```text
//! (-2, -2)  pen up    — move without drawing
//! (-1, -1)  pen down  — draw while moving
//! ```
//!
//! Both lie outside the arena, so no reachable goal is ever mistaken for one.

pub mod error;
pub mod loader;
pub mod waypoint;


pub use error::{ScriptError, ScriptResult};
pub use loader::{load_script_csv, load_script_reader};
pub use waypoint::{ScriptCursor, Waypoint, WaypointScript};
