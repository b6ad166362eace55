//! Error types for the mjai bridge

use thiserror::Error;

use crate::mode::GameMode;

/// Result type for bridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Bridge error types
#[derive(Debug, Error)]
pub enum BridgeError {
    /// No engine binding exists for the requested mode
    #[error("unsupported game mode: {0}")]
    UnsupportedMode(GameMode),

    /// The session is already bound to a seat and mode
    #[error("session already initialized")]
    AlreadyInitialized,

    /// Wire payload failed to parse
    #[error("malformed message: {0}")]
    MalformedMessage(String),

    /// Decision engine backend failure
    #[error("engine error: {0}")]
    Engine(String),

    /// Reach replay produced no follow-up discard
    #[error("reach lookahead produced no follow-up discard")]
    Lookahead,

    /// Driver I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for BridgeError {
    fn from(err: serde_json::Error) -> Self {
        BridgeError::MalformedMessage(err.to_string())
    }
}
