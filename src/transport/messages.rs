use crate::audio::Frame;
use crate::error::StreamError;
use crate::session::RecognitionConfig;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// One outbound message on the duplex stream.
///
/// The configuration message goes first, exactly once; every message after it
/// carries audio. The variants serialize to their payload directly, matching
/// the service protocol.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum StreamingRequest {
    Config(RecognitionConfig),
    Audio(AudioMessage),
}

/// One audio frame on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioMessage {
    /// Base64-encoded frame bytes
    pub audio_content: String,
}

impl AudioMessage {
    pub fn from_frame(frame: &Frame) -> Self {
        Self {
            audio_content: base64::engine::general_purpose::STANDARD.encode(&frame.bytes),
        }
    }
}

/// One inbound result payload from the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamingResponse {
    /// Result chunks; may be empty, in which case the message is ignored
    #[serde(default)]
    pub chunks: Vec<ResultChunk>,
}

/// A set of transcription hypotheses for one audio span.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultChunk {
    /// Hypotheses in engine ranking order; the first is the best guess
    #[serde(default)]
    pub alternatives: Vec<Alternative>,
    /// Whether the service guarantees this hypothesis will not change
    #[serde(rename = "final", default)]
    pub is_final: bool,
}

/// A single transcription hypothesis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alternative {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

/// Events delivered on the inbound half of the session.
///
/// The transport reader task is the single producer; the result router is the
/// single consumer. `Error` and `End` are terminal: nothing follows them.
#[derive(Debug)]
pub enum InboundEvent {
    Message(StreamingResponse),
    Error(StreamError),
    End,
}
