//! Streaming recognition session management
//!
//! This module provides the session layer of the client:
//! - `StreamSession`: the outbound-half state machine (config first, frames
//!   in order, one close)
//! - `StreamingRecognizer`: connects, opens a session, and runs the send and
//!   receive halves to completion
//! - Session and recognition configuration

mod config;
mod session;

pub use config::{RecognitionConfig, RecognitionSpec, SessionConfig};
pub use session::{drive_session, StreamSession, StreamingRecognizer};
