//! Error types for Taproot Core

use crate::temporal::TemporalAxis;
use thiserror::Error;

/// Result type alias using Taproot's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Taproot error types
#[derive(Error, Debug)]
pub enum Error {
    /// The temporal request pinned both axes or left both variable.
    #[error("invalid temporal axes: {0} appears as both pinned and variable")]
    InvalidAxes(TemporalAxis),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
