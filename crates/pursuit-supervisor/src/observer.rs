//! Supervisor observer trait for progress reporting and data collection.

use pursuit_core::Tick;

use crate::{SupervisorState, TickReport};

/// Callbacks invoked by [`Supervisor::run`][crate::Supervisor::run] and
/// [`Supervisor::run_ticks`][crate::Supervisor::run_ticks].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — capture counter
///
/// ```rust,ignore
/// struct Captures(usize);
///
/// impl SupervisorObserver for Captures {
///     fn on_capture(&mut self, _tick: Tick, _name: &str, _respawned: bool) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait SupervisorObserver {
    /// Called before the tick is processed.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once per applied transition, in order.  Self-loops
    /// (`Writing → Writing` on a script restart) are included.
    fn on_transition(&mut self, _tick: Tick, _from: SupervisorState, _to: SupervisorState) {}

    /// Called once per captured offender.  `respawned` is `false` when the
    /// offender was removed for good.
    fn on_capture(&mut self, _tick: Tick, _name: &str, _respawned: bool) {}

    /// Called after the tick with everything it did.
    fn on_tick_end(&mut self, _tick: Tick, _report: &TickReport) {}

    /// Called once when the run loop returns normally.  `final_tick` is the
    /// first tick that was not processed.
    fn on_run_end(&mut self, _final_tick: Tick) {}
}

/// A [`SupervisorObserver`] that does nothing.
pub struct NoopObserver;

impl SupervisorObserver for NoopObserver {}
