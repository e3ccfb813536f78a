//! Error types for the Wisard crate.
//!
//! This module provides a unified error type for all operations in the crate,
//! using the `thiserror` crate for ergonomic error handling. Every error is
//! local and synchronous: operations are in-memory table mutations and there
//! is nothing to retry.

use thiserror::Error;

/// The main error type for Wisard operations.
#[derive(Error, Debug)]
pub enum WisardError {
    /// Observation or bit string length differs from the one fixed on first use
    #[error("Invalid observation length: expected {expected}, got {actual}")]
    InvalidObservationLength {
        /// Length fixed by the first encode/record call
        expected: usize,
        /// Length received
        actual: usize,
    },

    /// Operation requires state that has not been established yet
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Class label has no discriminator
    #[error("Label not found: {0}")]
    LabelNotFound(String),

    /// Invalid argument value
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration (de)serialization failed
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

/// A specialized `Result` type for Wisard operations.
pub type Result<T> = std::result::Result<T, WisardError>;
