//! `pursuit-agent` — one simulated turtle as the control core sees it.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`agent`]   | `Agent`, `Role`, `WanderLimits` — pose mirror + one-shot commands |
//! | [`motion`]  | `Step`, `MoveToGoal`, `RotateBy` — multi-tick maneuvers      |
//!
//! # Step functions instead of loops
//!
//! A maneuver never loops on its own.  The scheduler calls `step` once per
//! tick; each call issues at most one command and reports whether the
//! maneuver wants more ticks:
//!
//! ```rust,ignore
//! let go = MoveToGoal::new(Point::new(3.0, 0.0), 1.0, Gains::default());
//! while go.step(&agent, &mut world)? == Step::Continue {
//!     // next tick: feed refreshes agent pose, shutdown is polled, ...
//! }
//! ```
//!
//! Shutdown therefore needs no special handling here: a scheduler that stops
//! calling `step` has stopped the maneuver.

pub mod agent;
pub mod motion;

#[cfg(test)]
mod tests;

pub use agent::{Agent, Role, WanderLimits};
pub use motion::{MoveToGoal, RotateBy, Step};
