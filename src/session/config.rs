use crate::error::StreamError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Recognition settings understood by the service.
///
/// Serialized field names follow the service protocol (camelCase).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognitionSpec {
    /// Language to recognize, or "auto" for language detection
    pub language_code: String,
    /// Whether the service should mask profanity in results
    pub profanity_filter: bool,
    /// Recognition model selector
    pub model: String,
    /// Opt in to partial (interim) results
    pub partial_results: bool,
    /// Encoding of the audio bytes as sent (no transcoding happens here)
    pub audio_encoding: String,
    pub sample_rate_hertz: u32,
}

impl Default for RecognitionSpec {
    fn default() -> Self {
        Self {
            language_code: "auto".to_string(),
            profanity_filter: true,
            model: "general".to_string(),
            partial_results: true,
            audio_encoding: "OGG_OPUS".to_string(),
            sample_rate_hertz: 8000,
        }
    }
}

/// The configuration message sent exactly once, before any audio frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognitionConfig {
    pub specification: RecognitionSpec,
    /// Caller/tenant identifier billed for the session
    pub tenant_id: String,
}

/// Tunables for one streaming session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Unique session identifier (e.g., "stt-1a2b3c")
    pub session_id: String,

    /// Recognition service endpoint (ws:// or wss://)
    pub endpoint: String,

    /// API key attached at connect time, if the service requires one
    pub api_key: Option<String>,

    /// Maximum frame payload in bytes
    pub chunk_size: usize,

    /// Delay between outbound frames
    pub pacing: Duration,

    /// Settings sent as the first message
    pub recognition: RecognitionConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_id: format!("stt-{}", uuid::Uuid::new_v4()),
            endpoint: "ws://127.0.0.1:8080/stt/streaming".to_string(),
            api_key: None,
            chunk_size: 4000,
            pacing: Duration::from_millis(250),
            recognition: RecognitionConfig {
                specification: RecognitionSpec::default(),
                tenant_id: String::new(),
            },
        }
    }
}

impl SessionConfig {
    /// Validate tunables before the session opens, so contract violations
    /// surface as configuration errors rather than mid-stream failures.
    pub fn validate(&self) -> Result<(), StreamError> {
        if self.chunk_size == 0 {
            return Err(StreamError::InvalidConfig {
                key: "chunk_size".to_string(),
                message: "must be positive".to_string(),
            });
        }

        if self.pacing.is_zero() {
            return Err(StreamError::InvalidConfig {
                key: "pacing".to_string(),
                message: "must be positive".to_string(),
            });
        }

        if let Err(e) = Url::parse(&self.endpoint) {
            return Err(StreamError::InvalidConfig {
                key: "endpoint".to_string(),
                message: e.to_string(),
            });
        }

        Ok(())
    }
}
