use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::info;

/// One complete recording, fully loaded before streaming begins.
///
/// The buffer is opaque to the core: no decoding or resampling happens here.
/// The bytes are sent to the recognition service exactly as stored, in the
/// encoding declared by the session's `RecognitionConfig`.
pub struct AudioBuffer {
    pub path: Option<String>,
    bytes: Vec<u8>,
}

impl AudioBuffer {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening recording: {}", path.display());

        let bytes = fs::read(path)
            .with_context(|| format!("Failed to read recording: {}", path.display()))?;

        info!("Recording loaded: {} bytes", bytes.len());

        Ok(Self {
            path: Some(path.display().to_string()),
            bytes,
        })
    }

    /// Wrap an already-loaded recording.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { path: None, bytes }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the buffer, yielding the raw bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
