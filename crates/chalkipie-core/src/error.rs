//! Errors raised at the engine's boundaries (configuration and door data).
//!
//! The simulation itself never fails: out-of-range lookups mean "no floor
//! here" and positions are clamped.

use thiserror::Error;

/// Invalid engine configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse engine config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} is out of range (got {value})")]
    OutOfRange { field: &'static str, value: f64 },

    #[error("invalid easing curve: {0}")]
    InvalidEasing(String),
}

/// Door catalogue could not be read
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to parse door catalogue: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("door {id} has invalid floor {floor}")]
    InvalidFloor { id: String, floor: i32 },
}
