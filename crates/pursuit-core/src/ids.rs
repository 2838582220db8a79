//! Strongly typed agent identifier.
//!
//! The simulator addresses agents by name; the core additionally numbers them
//! so RNG seeding and log fields do not depend on string contents.

use std::fmt;

/// Numeric identity of an agent within one supervisor run.
///
/// The writer is always `AgentId(0)`; offenders are numbered from 1 in spawn
/// order.  A respawned agent keeps its id.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentId(pub u32);

impl AgentId {
    /// The writer's id.
    pub const WRITER: AgentId = AgentId(0);

    pub fn is_writer(self) -> bool {
        self == Self::WRITER
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AgentId({})", self.0)
    }
}
