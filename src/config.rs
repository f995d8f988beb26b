use crate::session::{RecognitionConfig, RecognitionSpec, SessionConfig};
use anyhow::Result;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub streaming: StreamingConfig,
    pub recognition: RecognitionSettings,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    /// Recognition endpoint (ws:// or wss://)
    pub endpoint: String,
    /// API key sent at connect time; omit for unauthenticated endpoints
    pub api_key: Option<String>,
    /// Caller/tenant identifier billed for the session
    pub tenant_id: String,
}

#[derive(Debug, Deserialize)]
pub struct StreamingConfig {
    /// Maximum frame payload in bytes
    pub chunk_size: usize,
    /// Delay between outbound frames in milliseconds
    pub pacing_ms: u64,
}

#[derive(Debug, Deserialize)]
pub struct RecognitionSettings {
    pub language_code: String,
    pub profanity_filter: bool,
    pub model: String,
    pub partial_results: bool,
    pub audio_encoding: String,
    pub sample_rate_hertz: u32,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Assemble the per-session tunables from the loaded file.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            endpoint: self.service.endpoint.clone(),
            api_key: self.service.api_key.clone(),
            chunk_size: self.streaming.chunk_size,
            pacing: Duration::from_millis(self.streaming.pacing_ms),
            recognition: RecognitionConfig {
                specification: RecognitionSpec {
                    language_code: self.recognition.language_code.clone(),
                    profanity_filter: self.recognition.profanity_filter,
                    model: self.recognition.model.clone(),
                    partial_results: self.recognition.partial_results,
                    audio_encoding: self.recognition.audio_encoding.clone(),
                    sample_rate_hertz: self.recognition.sample_rate_hertz,
                },
                tenant_id: self.service.tenant_id.clone(),
            },
            ..Default::default()
        }
    }
}
