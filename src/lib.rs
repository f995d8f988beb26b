pub mod audio;
pub mod config;
pub mod error;
pub mod pacer;
pub mod router;
pub mod session;
pub mod transport;

pub use audio::{AudioBuffer, Chunker, Frame};
pub use config::Config;
pub use error::StreamError;
pub use pacer::{IntervalTicker, ManualTicker, Pacer, PacerHandler, TickOutcome, Ticker};
pub use router::{RecognitionResult, ResultRouter, TranscriptSink};
pub use session::{
    drive_session, RecognitionConfig, RecognitionSpec, SessionConfig, StreamSession,
    StreamingRecognizer,
};
pub use transport::{
    Alternative, AudioMessage, InboundEvent, ResultChunk, StreamingRequest, StreamingResponse,
    Transport, WsTransport,
};
