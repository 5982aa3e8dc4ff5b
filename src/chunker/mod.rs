mod error;
mod splitter;


pub use error::ChunkError;
pub use splitter::{Chunk, chunk_text};

/// Target characters per chunk
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Characters shared between consecutive windows
pub const DEFAULT_CHUNK_OVERLAP: usize = 200;

/// Markers that end a sentence or paragraph, searched from the right
pub const SENTENCE_BOUNDARIES: [&str; 5] = [". ", ".\n", "? ", "! ", "\n\n"];

/// Window sizing for [`chunk_text`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkConfig {
    /// Maximum characters per window
    pub chunk_size: usize,
    /// Characters by which consecutive windows overlap
    pub overlap: usize,
}

impl ChunkConfig {
    /// Create a config, rejecting sizes that cannot make forward progress
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self, ChunkError> {
        let config = Self {
            chunk_size,
            overlap,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that `0 <= overlap < chunk_size` and `chunk_size > 0`
    pub fn validate(&self) -> Result<(), ChunkError> {
        if self.chunk_size == 0 {
            return Err(ChunkError::configuration(
                "chunk_size must be greater than 0",
            ));
        }

        if self.overlap >= self.chunk_size {
            return Err(ChunkError::configuration(format!(
                "overlap ({}) must be less than chunk_size ({})",
                self.overlap, self.chunk_size
            )));
        }

        Ok(())
    }

    /// Minimum distance the cursor moves per window
    pub fn stride(&self) -> usize {
        self.chunk_size - self.overlap
    }
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            overlap: DEFAULT_CHUNK_OVERLAP,
        }
    }
}
