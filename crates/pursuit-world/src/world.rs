//! The `World` trait — the simulator's capability surface.

use pursuit_core::{Pose, VelocityCommand};

use crate::WorldResult;

/// Request to place a new agent.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnRequest {
    pub name:    String,
    pub x:       f64,
    pub y:       f64,
    pub heading: f64,
}

impl SpawnRequest {
    pub fn new(name: impl Into<String>, x: f64, y: f64, heading: f64) -> Self {
        Self { name: name.into(), x, y, heading }
    }

    pub fn pose(&self) -> Pose {
        Pose::new(self.x, self.y, self.heading)
    }
}

/// Trail color and visibility for one agent.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PenStyle {
    pub r:     u8,
    pub g:     u8,
    pub b:     u8,
    pub width: u8,
    /// `true` lifts the pen: the agent moves without drawing.
    pub off:   bool,
}

impl PenStyle {
    /// Light grey, width 2.
    pub const DEFAULT: PenStyle = PenStyle { r: 200, g: 200, b: 200, width: 2, off: false };

    #[inline]
    pub fn with_off(self, off: bool) -> Self {
        Self { off, ..self }
    }
}

impl Default for PenStyle {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Everything the control core asks of the simulator.
///
/// Service calls (`spawn`, `kill`, `reset`, `clear`, `set_pen`) are expected
/// to complete before returning.  `publish_velocity` is fire-and-forget: an
/// `Ok` only means the command was handed to the transport.
///
/// Poses do not come back through this trait; see [`PoseSink`][crate::PoseSink].
///
/// # Example
///
/// ```rust,ignore
/// struct LoggingWorld;
///
/// impl World for LoggingWorld {
///     fn spawn(&mut self, req: SpawnRequest) -> WorldResult<()> { println!("spawn {req:?}"); Ok(()) }
///     fn kill(&mut self, name: &str) -> WorldResult<()> { println!("kill {name}"); Ok(()) }
///     fn reset(&mut self) -> WorldResult<()> { Ok(()) }
///     fn clear(&mut self) -> WorldResult<()> { Ok(()) }
///     fn set_pen(&mut self, _: &str, _: PenStyle) -> WorldResult<()> { Ok(()) }
///     fn publish_velocity(&mut self, name: &str, cmd: VelocityCommand) -> WorldResult<()> {
///         println!("{name} <- {cmd:?}");
///         Ok(())
///     }
/// }
/// ```
pub trait World {
    fn spawn(&mut self, request: SpawnRequest) -> WorldResult<()>;

    fn kill(&mut self, name: &str) -> WorldResult<()>;

    /// Remove every agent, restore the simulator's default agent, and clear
    /// all trails.
    fn reset(&mut self) -> WorldResult<()>;

    /// Erase all trails; agents are untouched.
    fn clear(&mut self) -> WorldResult<()>;

    fn set_pen(&mut self, name: &str, pen: PenStyle) -> WorldResult<()>;

    fn publish_velocity(&mut self, name: &str, command: VelocityCommand) -> WorldResult<()>;

    /// `false` while the simulator's services are not reachable yet.
    ///
    /// Default: always ready.
    fn is_ready(&self) -> bool {
        true
    }

    /// Called once at the top of every tick with the nominal tick period.
    ///
    /// In-process worlds integrate their dynamics here; remote ones keep the
    /// default no-op.
    fn advance(&mut self, _dt_secs: f64) -> WorldResult<()> {
        Ok(())
    }
}
