//! The supervisor's state machine as a pure function.
//!
//! ```text
//!            IntruderDetected(t)               TargetCaught / TargetLost
//!  Writing ───────────────────────▶ Angry(t) ──────────────────────────▶ Returning
//!    ▲  │                                                                   │
//!    │  └─ ScriptFinished (self-loop)                                       │
//!    └──────────────────────────── ReturnReached ◀──────────────────────────┘
//! ```
//!
//! [`transition`] decides the next state and the side effects to perform;
//! the [`Supervisor`](crate::Supervisor) carries them out against the world.

use std::fmt;

use pursuit_core::AgentId;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum SupervisorState {
    /// Following the waypoint script.
    #[default]
    Writing,
    /// Chasing one offender.
    Angry { target: AgentId },
    /// Driving back to the script's first goal.
    Returning,
}

impl SupervisorState {
    pub fn is_angry(self) -> bool {
        matches!(self, SupervisorState::Angry { .. })
    }
}

impl fmt::Display for SupervisorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SupervisorState::Writing => f.write_str("writing"),
            SupervisorState::Angry { target } => write!(f, "angry with {target}"),
            SupervisorState::Returning => f.write_str("returning"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// An offender came within the proximity threshold of the writer.
    IntruderDetected { target: AgentId },
    /// The writer came within the capture threshold of its target.
    TargetCaught,
    /// The target is no longer in the offender list.
    TargetLost,
    /// The writer is back at the script's first goal.
    ReturnReached,
    /// The script cursor ran past the last waypoint.
    ScriptFinished,
}

/// Side effect of a transition, applied in order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    PenDownWriter,
    StopWriter,
    /// Kill the agent, then respawn or drop it.
    Capture(AgentId),
    ClearDrawing,
    RestartScript,
}

/// Next state and effects for `event` in `state`, or `None` if the event
/// does not apply there.
pub fn transition(state: SupervisorState, event: Event) -> Option<(SupervisorState, Vec<Effect>)> {
    use SupervisorState::*;

    match (state, event) {
        (Writing, Event::IntruderDetected { target }) => {
            Some((Angry { target }, vec![Effect::PenDownWriter]))
        }
        (Writing, Event::ScriptFinished) => Some((Writing, vec![Effect::RestartScript])),
        (Angry { target }, Event::TargetCaught) => {
            Some((Returning, vec![Effect::StopWriter, Effect::Capture(target)]))
        }
        (Angry { .. }, Event::TargetLost) => Some((Returning, vec![Effect::StopWriter])),
        (Returning, Event::ReturnReached) => {
            Some((Writing, vec![Effect::ClearDrawing, Effect::RestartScript]))
        }
        _ => None,
    }
}
