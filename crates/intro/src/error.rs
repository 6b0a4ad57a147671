//! Errors surfaced when loading an intro configuration.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not parse intro config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A periodic task with a zero period would never let virtual time advance.
    #[error("{field} must be greater than zero")]
    ZeroPeriod { field: &'static str },
}
