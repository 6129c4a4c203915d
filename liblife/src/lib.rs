//! # liblife
//!
//! Board, update rule and session controller for Conway's Game of Life on a bounded grid.
//! Cells beyond the grid edge are treated as permanently dead.

pub use board::{Board, CellState};
pub use config::LifeConfig;
pub use error::{BoardError, ConfigError};
pub use pos::Position;
pub use session::{Session, SessionState, TickOutcome};
pub use step::{FlipSet, apply_generation, compute_generation, count_alive_neighbors};

pub mod board;
pub mod config;
pub mod error;
pub mod patterns;
pub mod pos;
pub mod rule;
pub mod session;
pub mod step;
pub mod ticker;
