use serde::{Deserialize, Serialize};

use crate::kb::Episode;

/// 1-based inclusive episode positions covered by a part file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeRange {
    pub start: usize,
    pub end: usize,
}

/// One `knowledge_base_chunk_NNN.json` file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartFile {
    pub metadata: PartMetadata,
    pub episodes: Vec<Episode>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartMetadata {
    #[serde(rename = "chunk_number")]
    pub part_number: usize,
    #[serde(rename = "total_chunks")]
    pub total_parts: usize,
    pub episode_range: EpisodeRange,
    #[serde(rename = "episodes_in_chunk")]
    pub episodes_in_part: usize,
    pub total_episodes: usize,
    pub episodes_per_file: usize,
}

/// `index.json` written next to the part files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartsIndex {
    pub metadata: PartsIndexMetadata,
    #[serde(rename = "chunks")]
    pub parts: Vec<PartEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartsIndexMetadata {
    pub total_episodes: usize,
    pub episodes_per_file: usize,
    pub total_files: usize,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartEntry {
    #[serde(rename = "chunk_number")]
    pub part_number: usize,
    pub filename: String,
    pub episode_range: EpisodeRange,
    pub episodes_count: usize,
    pub first_episode: String,
    pub last_episode: String,
    /// Hex SHA-256 of the part file; absent in indexes written by older tools
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
}

/// Knowledge base reassembled from part files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedKnowledgeBase {
    pub metadata: CombinedMetadata,
    pub episodes: Vec<Episode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedMetadata {
    pub total_episodes: usize,
    pub source_files: usize,
    pub generated_at: String,
}
