use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("script parse error: {0}")]
    Parse(String),

    #[error("script has no goal waypoint")]
    NoGoal,

    #[error("waypoint {index} is not finite: ({x}, {y})")]
    NonFinite { index: usize, x: f64, y: f64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ScriptResult<T> = Result<T, ScriptError>;
