use thiserror::Error;

use crate::pos::Position;

/// Errors raised by board access. Any of these points at a bug in the caller,
/// typically a bad pixel-to-cell mapping, so they are never swallowed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BoardError {
    #[error("position {pos} is outside the {width}x{height} board")]
    OutOfBounds {
        pos: Position,
        width: usize,
        height: usize,
    },

    #[error("probability {0} is outside [0, 1]")]
    InvalidProbability(f64),
}

/// Errors raised when validating a [`LifeConfig`](crate::config::LifeConfig).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("board dimensions must be non-zero, got {width}x{height}")]
    ZeroDimension { width: usize, height: usize },

    #[error("tick interval must be at least 1ms")]
    ZeroTickInterval,

    #[error("randomize probability {0} is outside [0, 1]")]
    InvalidProbability(f64),
}
