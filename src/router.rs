//! Routes inbound recognition payloads to the caller-supplied sink.

use crate::error::StreamError;
use crate::transport::{InboundEvent, StreamingResponse};
use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tracing::{info, warn};

/// One transcription hypothesis set, as delivered to the caller.
#[derive(Debug, Clone)]
pub struct RecognitionResult {
    /// Alternatives in engine ranking order; the first is the best guess
    pub alternatives: Vec<String>,
    /// Engine-assigned confidence of the best alternative, if provided
    pub confidence: Option<f32>,
    /// Whether the service guarantees this hypothesis will not change
    pub is_final: bool,
    /// When this result was received
    pub received_at: DateTime<Utc>,
}

/// Caller-supplied destination for recognition events.
///
/// This is the boundary between the streaming core and whatever presents the
/// results; the binary ships a console implementation.
pub trait TranscriptSink {
    fn on_partial(&mut self, text: &str, alternatives: &[String]);
    fn on_final(&mut self, text: &str, alternatives: &[String]);
    fn on_stream_end(&mut self);
    fn on_stream_error(&mut self, error: &StreamError);
}

/// Classifies each inbound payload as partial or final and forwards it.
///
/// Exactly one terminal event (end or error) reaches the sink per session;
/// anything arriving after that is dropped.
pub struct ResultRouter<'a, S: TranscriptSink> {
    sink: &'a mut S,
    terminated: bool,
}

impl<'a, S: TranscriptSink> ResultRouter<'a, S> {
    pub fn new(sink: &'a mut S) -> Self {
        Self {
            sink,
            terminated: false,
        }
    }

    /// Translate one raw payload into a result and forward it to the sink.
    ///
    /// Only the first result chunk of a payload is consumed. Payloads with no
    /// chunks, and chunks with no alternatives, are ignored rather than
    /// treated as errors.
    pub fn handle(&mut self, response: &StreamingResponse) -> Option<RecognitionResult> {
        if self.terminated {
            return None;
        }

        let Some(chunk) = response.chunks.first() else {
            warn!("Ignoring inbound message with no result chunks");
            return None;
        };

        if chunk.alternatives.is_empty() {
            warn!("Ignoring result chunk with no alternatives");
            return None;
        }

        let result = RecognitionResult {
            alternatives: chunk.alternatives.iter().map(|a| a.text.clone()).collect(),
            confidence: chunk.alternatives[0].confidence,
            is_final: chunk.is_final,
            received_at: Utc::now(),
        };

        let best = &result.alternatives[0];
        if result.is_final {
            self.sink.on_final(best, &result.alternatives);
        } else {
            self.sink.on_partial(best, &result.alternatives);
        }

        Some(result)
    }

    /// Forward the stream-completed event. Safe to call at most once; later
    /// calls are dropped.
    pub fn handle_end(&mut self) {
        if self.terminated {
            return;
        }
        self.terminated = true;
        info!("Inbound stream completed");
        self.sink.on_stream_end();
    }

    /// Forward the stream-failed event and treat the session as terminated.
    pub fn handle_error(&mut self, error: &StreamError) {
        if self.terminated {
            return;
        }
        self.terminated = true;
        warn!("Inbound stream failed: {}", error);
        self.sink.on_stream_error(error);
    }

    /// Drain the inbound half until it terminates.
    pub async fn run(&mut self, mut inbound: mpsc::Receiver<InboundEvent>) {
        while let Some(event) = inbound.recv().await {
            match event {
                InboundEvent::Message(response) => {
                    self.handle(&response);
                }
                InboundEvent::End => {
                    self.handle_end();
                    break;
                }
                InboundEvent::Error(error) => {
                    self.handle_error(&error);
                    break;
                }
            }
        }

        // A closed channel without a terminal event still means the stream
        // is gone
        if !self.terminated {
            self.handle_end();
        }
    }
}
