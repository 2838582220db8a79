//! Core error type.
//!
//! Only configuration validation fails inside the core; the world, script,
//! and supervisor crates carry their own enums.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Shorthand result type for `pursuit-core`.
pub type CoreResult<T> = Result<T, CoreError>;
