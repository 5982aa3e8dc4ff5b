use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use super::{ChunkRecord, Episode, IndexEntry};
use crate::chunker::{ChunkConfig, chunk_text};
use crate::parser::read_transcript;

/// File name every episode directory holds its transcript under
pub const TRANSCRIPT_FILENAME: &str = "transcript.md";

/// Everything produced from one pass over the transcripts
#[derive(Debug, Default)]
pub struct KnowledgeBaseBuild {
    pub episodes: Vec<Episode>,
    pub index: Vec<IndexEntry>,
    pub chunks: Vec<ChunkRecord>,
    /// Transcripts that failed to process, with the reason
    pub skipped: Vec<(PathBuf, String)>,
}

/// Check if a directory entry is hidden (e.g., ".git")
fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Find `<episodes_dir>/*/transcript.md`, sorted by path
pub fn discover_transcripts(episodes_dir: &Path) -> Result<Vec<PathBuf>> {
    if !episodes_dir.is_dir() {
        bail!("Episodes directory not found: {}", episodes_dir.display());
    }

    info!("Scanning for transcripts in {}", episodes_dir.display());

    let mut paths = Vec::new();
    for entry in WalkDir::new(episodes_dir)
        .min_depth(2)
        .max_depth(2)
        .follow_links(false)
    {
        let entry = entry.context("Failed to read directory entry")?;
        if !entry.file_type().is_file() || entry.file_name() != TRANSCRIPT_FILENAME {
            continue;
        }

        let in_hidden_dir = entry
            .path()
            .parent()
            .and_then(|p| p.file_name())
            .is_some_and(|name| is_hidden(&name.to_string_lossy()));
        if in_hidden_dir {
            continue;
        }

        paths.push(entry.into_path());
    }

    paths.sort();
    info!("Found {} transcript files", paths.len());
    Ok(paths)
}

/// Parse and chunk a single transcript
pub fn process_transcript(path: &Path, config: ChunkConfig) -> Result<(Episode, Vec<ChunkRecord>)> {
    let parsed = read_transcript(path)?;
    let episode = Episode::from_parsed(&parsed);

    let chunks = chunk_text(&episode.transcript, config)
        .context(format!("Failed to chunk transcript: {}", path.display()))?;
    debug!("{}: {} chunks", episode.id, chunks.len());

    let records = episode.chunk_records(chunks);
    Ok((episode, records))
}

/// Process transcripts in order, skipping (and recording) any that fail
///
/// An invalid chunk configuration is rejected up front rather than
/// failing every file.
pub fn build_knowledge_base(paths: &[PathBuf], config: ChunkConfig) -> Result<KnowledgeBaseBuild> {
    config.validate()?;

    let mut build = KnowledgeBaseBuild::default();
    let total = paths.len();

    for (i, path) in paths.iter().enumerate() {
        info!(
            "Processing {}/{}: {}",
            i + 1,
            total,
            path.parent()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy())
                .unwrap_or_default()
        );

        match process_transcript(path, config) {
            Ok((episode, records)) => {
                build.index.push(IndexEntry::from(&episode));
                build.chunks.extend(records);
                build.episodes.push(episode);
            }
            Err(e) => {
                warn!("Skipping {}: {:#}", path.display(), e);
                build.skipped.push((path.clone(), format!("{:#}", e)));
            }
        }
    }

    info!(
        "Built {} episodes and {} chunks ({} skipped)",
        build.episodes.len(),
        build.chunks.len(),
        build.skipped.len()
    );
    Ok(build)
}
