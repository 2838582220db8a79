//! `pursuit-control` — pure control laws.
//!
//! # Crate layout
//!
//! | Module          | Contents                                               |
//! |-----------------|--------------------------------------------------------|
//! | [`controller`]  | `Gains`, `MotionController` (P controller)             |
//! | [`intercept`]   | `InterceptionEstimator`, `look_ahead_distance`         |
//!
//! Nothing in this crate talks to the simulator.  Every function maps poses
//! to a command or a pose, so the laws are testable without a world or a
//! scheduler.

pub mod controller;
pub mod intercept;

#[cfg(test)]
mod tests;

pub use controller::{Gains, MotionController};
pub use intercept::{InterceptionEstimator, look_ahead_distance};
