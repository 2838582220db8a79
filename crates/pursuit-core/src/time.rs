//! Tick time model, pacing, and cooperative shutdown.
//!
//! # Design
//!
//! The control core has exactly one suspension point: the boundary between
//! two ticks.  A [`TickPacer`] decides how long that boundary lasts (real
//! sleeping for a live run, nothing at all for tests) and reports the time of
//! the tick that is about to start.  The run loop polls a [`ShutdownSignal`]
//! at the same boundary, so a shutdown always lands before the next command
//! is issued.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    pub fn next(self) -> Tick {
        Tick(self.0 + 1)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── TickClock ─────────────────────────────────────────────────────────────────

/// Counts ticks and maps them to nominal seconds at a fixed rate.
#[derive(Clone, Debug)]
pub struct TickClock {
    /// Nominal seconds per tick (`1 / tick_hz`).
    pub period_secs: f64,
    /// The tick currently being processed.
    pub current_tick: Tick,
}

impl TickClock {
    pub fn new(tick_hz: f64) -> Self {
        Self { period_secs: 1.0 / tick_hz, current_tick: Tick::ZERO }
    }

    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = self.current_tick.next();
    }

    /// Nominal seconds since tick 0.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.current_tick.0 as f64 * self.period_secs
    }

    /// Ticks needed to cover `secs` (rounds up).
    #[inline]
    pub fn ticks_for_secs(&self, secs: f64) -> u64 {
        (secs / self.period_secs).ceil().max(0.0) as u64
    }
}

impl fmt::Display for TickClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.1} s)", self.current_tick, self.elapsed_secs())
    }
}

// ── TickPacer ─────────────────────────────────────────────────────────────────

/// Paces the run loop.  Called once per tick, before the tick is processed.
pub trait TickPacer {
    /// Wait until the next tick boundary and return the time of that tick in
    /// seconds since the pacer started.
    fn wait_next(&mut self) -> f64;

    /// Nominal seconds between ticks.
    fn period_secs(&self) -> f64;
}

/// Wall-clock pacer for live runs.
///
/// Sleeps until the next multiple of the period.  When a tick overruns, the
/// schedule is re-anchored to "now" instead of bursting to catch up.
pub struct FixedRatePacer {
    period: Duration,
    start:  Instant,
    next:   Instant,
}

impl FixedRatePacer {
    pub fn new(tick_hz: f64) -> Self {
        let period = Duration::from_secs_f64(1.0 / tick_hz);
        let start = Instant::now();
        Self { period, start, next: start }
    }
}

impl TickPacer for FixedRatePacer {
    fn wait_next(&mut self) -> f64 {
        let now = Instant::now();
        if now < self.next {
            std::thread::sleep(self.next - now);
        } else if now > self.next + self.period {
            self.next = now;
        }
        let tick_time = self.next;
        self.next += self.period;
        tick_time.duration_since(self.start).as_secs_f64()
    }

    fn period_secs(&self) -> f64 {
        self.period.as_secs_f64()
    }
}

/// Virtual-time pacer: never sleeps, advances by exactly one period per call.
#[derive(Clone, Debug)]
pub struct SimulatedPacer {
    period_secs: f64,
    now_secs:    f64,
}

impl SimulatedPacer {
    pub fn new(tick_hz: f64) -> Self {
        Self { period_secs: 1.0 / tick_hz, now_secs: 0.0 }
    }
}

impl TickPacer for SimulatedPacer {
    fn wait_next(&mut self) -> f64 {
        let now = self.now_secs;
        self.now_secs += self.period_secs;
        now
    }

    fn period_secs(&self) -> f64 {
        self.period_secs
    }
}

// ── ShutdownSignal ────────────────────────────────────────────────────────────

/// Cloneable stop flag polled once per tick by the run loop.
///
/// Any thread may call [`trigger`](Self::trigger); the loop notices it at the
/// next tick boundary and returns without issuing further commands.
#[derive(Clone, Debug, Default)]
pub struct ShutdownSignal(Arc<AtomicBool>);

impl ShutdownSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) {
        self.0.store(true, Ordering::Release);
    }

    #[inline]
    pub fn is_triggered(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}
