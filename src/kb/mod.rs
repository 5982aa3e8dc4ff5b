mod builder;
pub mod query;
mod types;
mod writer;


pub use builder::{
    KnowledgeBaseBuild, TRANSCRIPT_FILENAME, build_knowledge_base, discover_transcripts,
    process_transcript,
};
pub use types::{
    ChunkCorpus, ChunkCorpusMetadata, ChunkRecord, Episode, EpisodeIndex, EpisodeIndexMetadata,
    IndexEntry, KnowledgeBase, KnowledgeBaseMetadata,
};
pub use writer::{
    ArtifactPaths, CHUNKS_FILE, INDEX_FILE, KNOWLEDGE_BASE_FILE, TEXT_INDEX_FILE,
    render_text_index, write_artifacts,
};

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::artifact::read_json;
use crate::chunker::ChunkConfig;

/// Directory holding one sub-directory per episode
pub const DEFAULT_EPISODES_DIR: &str = "episodes";

/// Directory the knowledge-base artifacts are written to
pub const DEFAULT_OUTPUT_DIR: &str = "knowledge_base";

/// Show name used in headings and prompts
pub const DEFAULT_SHOW_NAME: &str = "Lenny's Podcast";

/// Settings for a knowledge-base build
#[derive(Debug, Clone)]
pub struct BuildConfig {
    pub episodes_dir: PathBuf,
    pub output_dir: PathBuf,
    pub chunk: ChunkConfig,
    pub show_name: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            episodes_dir: PathBuf::from(DEFAULT_EPISODES_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            chunk: ChunkConfig::default(),
            show_name: DEFAULT_SHOW_NAME.to_string(),
        }
    }
}

impl BuildConfig {
    pub fn validate(&self) -> Result<()> {
        self.chunk.validate()?;
        Ok(())
    }
}

/// Totals reported after a build
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildSummary {
    pub total_episodes: usize,
    pub total_chunks: usize,
    pub total_words: usize,
    pub total_chars: usize,
    pub skipped: usize,
}

impl BuildSummary {
    pub fn from_build(build: &KnowledgeBaseBuild) -> Self {
        Self {
            total_episodes: build.episodes.len(),
            total_chunks: build.chunks.len(),
            total_words: build.episodes.iter().map(|e| e.word_count).sum(),
            total_chars: build.episodes.iter().map(|e| e.transcript_length).sum(),
            skipped: build.skipped.len(),
        }
    }

    pub fn avg_words_per_episode(&self) -> usize {
        self.total_words.checked_div(self.total_episodes).unwrap_or(0)
    }

    pub fn avg_chunks_per_episode(&self) -> usize {
        self.total_chunks.checked_div(self.total_episodes).unwrap_or(0)
    }
}

/// Discover, parse and chunk every transcript, then write all artifacts
pub fn create_knowledge_base(config: &BuildConfig) -> Result<(BuildSummary, ArtifactPaths)> {
    config.validate()?;

    let transcripts = discover_transcripts(&config.episodes_dir)?;
    let build = build_knowledge_base(&transcripts, config.chunk)?;
    let summary = BuildSummary::from_build(&build);
    let paths = write_artifacts(build, config.chunk, &config.show_name, &config.output_dir)?;

    Ok((summary, paths))
}

impl KnowledgeBase {
    /// Load `knowledge_base.json`
    pub fn load(path: &Path) -> Result<Self> {
        read_json(path)
    }
}

impl EpisodeIndex {
    /// Load `index.json`
    pub fn load(path: &Path) -> Result<Self> {
        read_json(path)
    }
}

impl ChunkCorpus {
    /// Load `chunks_for_embeddings.json`
    pub fn load(path: &Path) -> Result<Self> {
        read_json(path)
    }
}
