//! Error types for streamscribe.

use thiserror::Error;

/// Session-fatal errors raised by the streaming core.
///
/// None of these are retried internally; each one terminates the current
/// session and is reported to the caller exactly once.
#[derive(Error, Debug)]
pub enum StreamError {
    // Connection establishment
    #[error("Failed to open stream to {endpoint}: {message}")]
    Connection { endpoint: String, message: String },

    // Session state machine contract violations
    #[error("Frame sent after the outbound half was closed")]
    SendAfterClose,

    #[error("Outbound half closed twice")]
    AlreadyClosed,

    // Transport terminated underneath an active session
    #[error("Stream already terminated: {message}")]
    StreamClosed { message: String },

    #[error("Transport error: {message}")]
    Transport { message: String },

    // Chunker contract violation
    #[error("No frames remaining in the audio buffer")]
    ChunksExhausted,

    // Configuration validation
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidConfig { key: String, message: String },
}

pub type Result<T> = std::result::Result<T, StreamError>;
