use serde::{Deserialize, Serialize};

use crate::chunker::Chunk;
use crate::parser::ParsedTranscript;

/// One podcast episode with its full transcript
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Episode {
    pub id: String,
    pub guest: String,
    pub title: String,
    pub youtube_url: String,
    pub video_id: String,
    pub description: String,
    pub duration_seconds: f64,
    pub duration: String,
    pub view_count: f64,
    pub channel: String,
    pub transcript: String,
    /// Transcript length in characters
    pub transcript_length: usize,
    /// Whitespace-separated words in the transcript
    pub word_count: usize,
}

impl Episode {
    /// Build an episode from a parsed transcript, filling header defaults
    pub fn from_parsed(parsed: &ParsedTranscript) -> Self {
        let meta = &parsed.metadata;
        let transcript = parsed.transcript.clone();

        Self {
            id: parsed.episode_slug.clone(),
            guest: meta.get_or("guest", "Unknown").to_string(),
            title: meta.get_or("title", "Untitled").to_string(),
            youtube_url: meta.get_or("youtube_url", "").to_string(),
            video_id: meta.get_or("video_id", "").to_string(),
            description: meta.get_or("description", "").to_string(),
            duration_seconds: meta.number("duration_seconds").unwrap_or(0.0),
            duration: meta.get_or("duration", "").to_string(),
            view_count: meta.number("view_count").unwrap_or(0.0),
            channel: meta.get_or("channel", "").to_string(),
            transcript_length: transcript.chars().count(),
            word_count: transcript.split_whitespace().count(),
            transcript,
        }
    }

    /// Attach episode identity to the chunks of this episode's transcript
    pub fn chunk_records(&self, chunks: Vec<Chunk>) -> Vec<ChunkRecord> {
        chunks
            .into_iter()
            .enumerate()
            .map(|(chunk_index, chunk)| ChunkRecord {
                episode_id: self.id.clone(),
                episode_title: self.title.clone(),
                guest: self.guest.clone(),
                chunk_index,
                text: chunk.text,
                start_char: chunk.start,
                end_char: chunk.end,
            })
            .collect()
    }
}

/// Episode metadata without the transcript
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexEntry {
    pub id: String,
    pub guest: String,
    pub title: String,
    pub youtube_url: String,
    pub video_id: String,
    pub description: String,
    pub duration_seconds: f64,
    pub duration: String,
    pub view_count: f64,
    pub channel: String,
    pub transcript_length: usize,
    pub word_count: usize,
}

impl From<&Episode> for IndexEntry {
    fn from(episode: &Episode) -> Self {
        Self {
            id: episode.id.clone(),
            guest: episode.guest.clone(),
            title: episode.title.clone(),
            youtube_url: episode.youtube_url.clone(),
            video_id: episode.video_id.clone(),
            description: episode.description.clone(),
            duration_seconds: episode.duration_seconds,
            duration: episode.duration.clone(),
            view_count: episode.view_count,
            channel: episode.channel.clone(),
            transcript_length: episode.transcript_length,
            word_count: episode.word_count,
        }
    }
}

/// A transcript chunk ready for embedding, tagged with its episode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkRecord {
    pub episode_id: String,
    pub episode_title: String,
    pub guest: String,
    /// Position of this chunk within its episode
    pub chunk_index: usize,
    pub text: String,
    pub start_char: usize,
    pub end_char: usize,
}

/// `knowledge_base.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    pub metadata: KnowledgeBaseMetadata,
    pub episodes: Vec<Episode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeBaseMetadata {
    pub total_episodes: usize,
    pub total_chunks: usize,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,
}

/// `index.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeIndex {
    pub metadata: EpisodeIndexMetadata,
    pub episodes: Vec<IndexEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeIndexMetadata {
    pub total_episodes: usize,
    pub description: String,
}

/// `chunks_for_embeddings.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkCorpus {
    pub metadata: ChunkCorpusMetadata,
    pub chunks: Vec<ChunkRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkCorpusMetadata {
    pub total_chunks: usize,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub description: String,
}
