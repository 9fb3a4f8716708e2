//! Error types for lexicon loading and anchor handling.
//!
//! Per-component scan failures are not errors: a phrase that does not match,
//! or matches without a mapped delta, resolves to a zero delta.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The lexicon could not be read, parsed or validated.
    #[error("Invalid lexicon configuration: {0}")]
    Config(String),

    /// The anchor timestamp does not match the expected format.
    #[error("Invalid anchor timestamp: {0}")]
    InvalidAnchor(String),

    /// The requested operation is declared but not supported.
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
