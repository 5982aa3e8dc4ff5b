// Public API exports
pub mod artifact;
pub mod chunker;
pub mod kb;
pub mod parser;
pub mod parts;
pub mod prompts;
pub mod security;
pub mod text;

// Re-export main types for convenience
pub use chunker::{
    Chunk, ChunkConfig, ChunkError, DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE, chunk_text,
};

pub use parser::{ParsedTranscript, TranscriptMetadata, parse_transcript, read_transcript};

pub use kb::{
    BuildConfig, BuildSummary, ChunkCorpus, ChunkRecord, Episode, EpisodeIndex, IndexEntry,
    KnowledgeBase, create_knowledge_base,
};

pub use parts::{PartFile, PartsIndex, SplitConfig, combine_parts, split_knowledge_base};

pub use prompts::{BatchConfig, generate_batches};

pub use security::{PathError, PathSanitizer};
