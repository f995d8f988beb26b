use super::config::{RecognitionConfig, SessionConfig};
use crate::audio::{AudioBuffer, Chunker, Frame};
use crate::error::StreamError;
use crate::pacer::{IntervalTicker, Pacer, PacerHandler, TickOutcome, Ticker};
use crate::router::{ResultRouter, TranscriptSink};
use crate::transport::{AudioMessage, InboundEvent, StreamingRequest, Transport, WsTransport};
use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

/// Outbound half of one duplex recognition stream.
///
/// State machine: `open` sends the configuration message before anything
/// else, `send_frame` feeds audio until the recording is exhausted, and
/// `close_outbound` ends the half exactly once. A session is never reused
/// across recordings.
pub struct StreamSession<T: Transport> {
    transport: T,
    session_id: String,
    outbound_closed: bool,
    frames_sent: usize,
}

impl<T: Transport> StreamSession<T> {
    /// Open the session on an established transport. The recognition
    /// configuration goes out as the first message, before any frame.
    pub async fn open(
        transport: T,
        config: &RecognitionConfig,
        session_id: String,
    ) -> Result<Self, StreamError> {
        let mut session = Self {
            transport,
            session_id,
            outbound_closed: false,
            frames_sent: 0,
        };

        session
            .transport
            .send(StreamingRequest::Config(config.clone()))
            .await?;

        info!("Session {}: configuration sent", session.session_id);

        Ok(session)
    }

    /// Write one frame as an outbound message.
    pub async fn send_frame(&mut self, frame: &Frame) -> Result<(), StreamError> {
        if self.outbound_closed {
            return Err(StreamError::SendAfterClose);
        }

        self.transport
            .send(StreamingRequest::Audio(AudioMessage::from_frame(frame)))
            .await?;

        self.frames_sent += 1;
        debug!(
            "Session {}: sent frame {} ({} bytes at offset {})",
            self.session_id,
            frame.index,
            frame.len(),
            frame.offset
        );

        Ok(())
    }

    /// Signal that no more outbound messages will follow. Errors if the
    /// outbound half was already closed.
    pub async fn close_outbound(&mut self) -> Result<(), StreamError> {
        if self.outbound_closed {
            return Err(StreamError::AlreadyClosed);
        }

        self.outbound_closed = true;
        self.transport.close().await?;

        info!(
            "Session {}: outbound half closed after {} frames",
            self.session_id, self.frames_sent
        );

        Ok(())
    }

    pub fn frames_sent(&self) -> usize {
        self.frames_sent
    }

    pub fn is_outbound_closed(&self) -> bool {
        self.outbound_closed
    }
}

/// Pacer handler that sends one frame per tick until the recording is
/// exhausted, then closes the outbound half.
struct FrameSender<T: Transport> {
    chunker: Chunker,
    session: StreamSession<T>,
}

#[async_trait]
impl<T: Transport> PacerHandler for FrameSender<T> {
    async fn on_tick(&mut self) -> Result<TickOutcome> {
        if !self.chunker.has_next() {
            return Ok(TickOutcome::Stop);
        }

        let frame = self.chunker.next_frame()?;
        self.session.send_frame(&frame).await?;

        Ok(TickOutcome::Continue)
    }

    async fn on_stop(&mut self) -> Result<()> {
        self.session.close_outbound().await?;
        Ok(())
    }
}

/// Run one opened session to completion: the pacer-driven send loop in a
/// spawned task, the inbound drain in this one. Returns once both halves
/// have terminated.
///
/// Generic over transport and ticker so tests can substitute a recording
/// transport and drive ticks by hand.
pub async fn drive_session<T, K, S>(
    session: StreamSession<T>,
    chunker: Chunker,
    ticker: K,
    inbound: mpsc::Receiver<InboundEvent>,
    sink: &mut S,
) -> Result<()>
where
    T: Transport + 'static,
    K: Ticker + 'static,
    S: TranscriptSink,
{
    let mut sender = FrameSender { chunker, session };
    let pacer = Pacer::new(ticker);

    let send_task = tokio::spawn(async move {
        if let Err(e) = pacer.run(&mut sender).await {
            // Unsent frames are discarded; the terminal event reaches the
            // sink through the inbound half
            error!("Send loop failed: {}", e);
        }
    });

    // Keep listening for results after the outbound half closes; the session
    // only ends when the service closes or fails the inbound half
    let mut router = ResultRouter::new(sink);
    router.run(inbound).await;

    send_task.await.context("Send task panicked")?;

    Ok(())
}

/// Streams one pre-recorded audio buffer to the recognition service and
/// routes the resulting transcription events to a caller-supplied sink.
pub struct StreamingRecognizer {
    config: SessionConfig,
}

impl StreamingRecognizer {
    pub fn new(config: SessionConfig) -> Result<Self, StreamError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Transcribe one recording over a fresh session.
    ///
    /// Connection failures surface here, before any frame is sent. Once the
    /// stream is up, all failures are delivered through the sink instead.
    pub async fn transcribe<S: TranscriptSink>(
        &self,
        audio: AudioBuffer,
        sink: &mut S,
    ) -> Result<()> {
        let chunker = Chunker::new(audio, self.config.chunk_size)?;

        info!(
            "Session {}: streaming {} frames of up to {} bytes every {:?}",
            self.config.session_id,
            chunker.frame_count(),
            self.config.chunk_size,
            self.config.pacing
        );

        let (transport, inbound) =
            WsTransport::connect(&self.config.endpoint, self.config.api_key.as_deref()).await?;

        let session = StreamSession::open(
            transport,
            &self.config.recognition,
            self.config.session_id.clone(),
        )
        .await?;

        let ticker = IntervalTicker::new(self.config.pacing);
        drive_session(session, chunker, ticker, inbound, sink).await?;

        info!("Session {}: finished", self.config.session_id);

        Ok(())
    }
}
