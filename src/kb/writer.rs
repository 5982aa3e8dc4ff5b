use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

use super::{
    ChunkCorpus, ChunkCorpusMetadata, EpisodeIndex, EpisodeIndexMetadata, IndexEntry,
    KnowledgeBase, KnowledgeBaseBuild, KnowledgeBaseMetadata,
};
use crate::artifact::{ensure_dir, timestamp, write_json, write_text};
use crate::chunker::ChunkConfig;
use crate::text::group_thousands_f64;

pub const KNOWLEDGE_BASE_FILE: &str = "knowledge_base.json";
pub const INDEX_FILE: &str = "index.json";
pub const CHUNKS_FILE: &str = "chunks_for_embeddings.json";
pub const TEXT_INDEX_FILE: &str = "episode_index.txt";

/// Paths of the artifacts written by [`write_artifacts`]
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub knowledge_base: PathBuf,
    pub index: PathBuf,
    pub chunks: PathBuf,
    pub text_index: PathBuf,
}

impl ArtifactPaths {
    pub fn in_dir(output_dir: &Path) -> Self {
        Self {
            knowledge_base: output_dir.join(KNOWLEDGE_BASE_FILE),
            index: output_dir.join(INDEX_FILE),
            chunks: output_dir.join(CHUNKS_FILE),
            text_index: output_dir.join(TEXT_INDEX_FILE),
        }
    }
}

/// Write the knowledge base, metadata index, chunk corpus and text index
///
/// Consumes the build: episode transcripts move into the knowledge base
/// without being cloned.
pub fn write_artifacts(
    build: KnowledgeBaseBuild,
    config: ChunkConfig,
    show_name: &str,
    output_dir: &Path,
) -> Result<ArtifactPaths> {
    ensure_dir(output_dir)?;
    let paths = ArtifactPaths::in_dir(output_dir);

    let KnowledgeBaseBuild {
        episodes,
        index,
        chunks,
        ..
    } = build;

    let text_index = render_text_index(show_name, &index);

    let index = EpisodeIndex {
        metadata: EpisodeIndexMetadata {
            total_episodes: index.len(),
            description: "Index of all episodes with metadata only (no transcripts)".to_string(),
        },
        episodes: index,
    };
    write_json(&paths.index, &index).context("Failed to write episode index")?;
    info!("Created {} ({} episodes)", paths.index.display(), index.episodes.len());

    let corpus = ChunkCorpus {
        metadata: ChunkCorpusMetadata {
            total_chunks: chunks.len(),
            chunk_size: config.chunk_size,
            chunk_overlap: config.overlap,
            description: "Text chunks ready for embedding generation and vector search"
                .to_string(),
        },
        chunks,
    };
    write_json(&paths.chunks, &corpus).context("Failed to write chunk corpus")?;
    info!("Created {} ({} chunks)", paths.chunks.display(), corpus.chunks.len());

    let kb = KnowledgeBase {
        metadata: KnowledgeBaseMetadata {
            total_episodes: episodes.len(),
            total_chunks: corpus.chunks.len(),
            chunk_size: config.chunk_size,
            chunk_overlap: config.overlap,
            generated_at: Some(timestamp()),
        },
        episodes,
    };
    write_json(&paths.knowledge_base, &kb).context("Failed to write knowledge base")?;
    info!(
        "Created {} ({} episodes)",
        paths.knowledge_base.display(),
        kb.episodes.len()
    );

    write_text(&paths.text_index, &text_index)?;
    info!("Created {}", paths.text_index.display());

    Ok(paths)
}

/// Human-readable episode listing
pub fn render_text_index(show_name: &str, entries: &[IndexEntry]) -> String {
    let mut out = format!("{} - Episode Index\n{}\n\n", show_name, "=".repeat(80));

    for (i, ep) in entries.iter().enumerate() {
        out.push_str(&format!(
            "{}. {}\n   Guest: {}\n   Duration: {} | Views: {}\n   ID: {}\n   YouTube: {}\n\n",
            i + 1,
            ep.title,
            ep.guest,
            ep.duration,
            group_thousands_f64(ep.view_count),
            ep.id,
            ep.youtube_url
        ));
    }

    out
}
