use pursuit_core::CoreError;
use pursuit_script::ScriptError;
use pursuit_world::WorldError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SupervisorError {
    #[error("supervisor configuration error: {0}")]
    Config(#[from] CoreError),

    /// The readiness probe failed at startup.
    #[error("simulator is not ready")]
    WorldNotReady,

    #[error("simulator call failed: {0}")]
    World(#[from] WorldError),

    #[error("waypoint script error: {0}")]
    Script(#[from] ScriptError),
}

pub type SupervisorResult<T> = Result<T, SupervisorError>;
