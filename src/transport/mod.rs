pub mod messages;
pub mod ws;

use crate::error::StreamError;
use async_trait::async_trait;

pub use messages::{
    Alternative, AudioMessage, InboundEvent, ResultChunk, StreamingRequest, StreamingResponse,
};
pub use ws::WsTransport;

/// Outbound half of a duplex connection to the recognition service.
///
/// The inbound half is delivered separately, as a channel of
/// [`InboundEvent`]s, so the two directions can be owned by different tasks
/// without sharing state.
#[async_trait]
pub trait Transport: Send {
    /// Write one outbound message.
    async fn send(&mut self, request: StreamingRequest) -> Result<(), StreamError>;

    /// Signal that no more outbound messages will follow.
    async fn close(&mut self) -> Result<(), StreamError>;
}
