pub mod buffer;
pub mod chunker;

pub use buffer::AudioBuffer;
pub use chunker::{Chunker, Frame};
