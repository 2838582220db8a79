use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorldError {
    /// The channel to the simulator is down or refused the call.
    #[error("transport error: {0}")]
    Transport(String),

    #[error("no agent named {0:?}")]
    UnknownAgent(String),

    #[error("an agent named {0:?} already exists")]
    NameTaken(String),

    #[error("invalid spawn pose for {name:?}: ({x}, {y}, {heading})")]
    InvalidPose {
        name:    String,
        x:       f64,
        y:       f64,
        heading: f64,
    },
}

pub type WorldResult<T> = Result<T, WorldError>;
