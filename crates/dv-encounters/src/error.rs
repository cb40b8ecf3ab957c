//! Error types for encounter placement.

use thiserror::Error;

/// Result type for placement operations.
pub type EncounterResult<T> = Result<T, EncounterError>;

/// Errors that can occur while placing encounters.
#[derive(Debug, Error, PartialEq)]
pub enum EncounterError {
    /// Difficulty is negative or not a number.
    #[error("invalid difficulty: {0}")]
    InvalidDifficulty(f64),
}
