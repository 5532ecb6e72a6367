// src/error.rs
//! Public error type for the entire crate

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Missing or unusable master secret / config file. Fatal at startup.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Token text is not valid base64, or verified plaintext is not UTF-8
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Malformed, unknown-version, expired, wrong-key or tampered token.
    /// Carries no detail: every rejection renders the same.
    #[error("Invalid or tampered token")]
    Authentication,
}

impl CoreError {
    /// Short stable name, safe to log
    pub fn kind(&self) -> &'static str {
        match self {
            CoreError::Configuration(_) => "configuration",
            CoreError::Encoding(_) => "encoding",
            CoreError::Authentication => "authentication",
        }
    }
}
