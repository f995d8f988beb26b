use crate::error::StreamError;

use super::buffer::AudioBuffer;

/// One bounded-size slice of the recording, sent as a single outbound message.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Frame number (0-indexed, strictly increasing)
    pub index: usize,
    /// Byte offset of this frame within the recording
    pub offset: usize,
    /// Frame payload; at most `chunk_size` bytes. The last frame of a
    /// recording may be shorter.
    pub bytes: Vec<u8>,
}

impl Frame {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Splits a recording into fixed-size frames in offset order.
///
/// The chunker owns the buffer for the duration of a session and tracks a
/// single forward cursor. Every byte of the recording belongs to exactly one
/// frame; frames never overlap.
pub struct Chunker {
    bytes: Vec<u8>,
    chunk_size: usize,
    cursor: usize,
    next_index: usize,
}

impl Chunker {
    pub fn new(buffer: AudioBuffer, chunk_size: usize) -> Result<Self, StreamError> {
        if chunk_size == 0 {
            return Err(StreamError::InvalidConfig {
                key: "chunk_size".to_string(),
                message: "must be positive".to_string(),
            });
        }

        Ok(Self {
            bytes: buffer.into_bytes(),
            chunk_size,
            cursor: 0,
            next_index: 0,
        })
    }

    /// Whether any bytes remain to be framed.
    pub fn has_next(&self) -> bool {
        self.cursor < self.bytes.len()
    }

    /// Produce the next frame, advancing the cursor by
    /// `min(chunk_size, remaining)` bytes.
    pub fn next_frame(&mut self) -> Result<Frame, StreamError> {
        if !self.has_next() {
            return Err(StreamError::ChunksExhausted);
        }

        let end = (self.cursor + self.chunk_size).min(self.bytes.len());
        let frame = Frame {
            index: self.next_index,
            offset: self.cursor,
            bytes: self.bytes[self.cursor..end].to_vec(),
        };

        self.cursor = end;
        self.next_index += 1;

        Ok(frame)
    }

    /// Total number of frames this recording will produce.
    pub fn frame_count(&self) -> usize {
        self.bytes.len().div_ceil(self.chunk_size)
    }

    /// Bytes already handed out as frames.
    pub fn bytes_sent(&self) -> usize {
        self.cursor
    }
}
