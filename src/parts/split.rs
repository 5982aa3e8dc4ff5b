use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::{
    EpisodeRange, PARTS_INDEX_FILE, PARTS_TEXT_INDEX_FILE, PartEntry, PartFile, PartMetadata,
    PartsIndex, PartsIndexMetadata, SplitConfig, part_filename, validate_episodes_per_file,
};
use crate::artifact::{ensure_dir, sha256_file, timestamp, write_json, write_text};
use crate::kb::{Episode, KnowledgeBase};
use crate::text::truncate_chars;

/// What a split produced
#[derive(Debug, Clone)]
pub struct SplitReport {
    pub index: PartsIndex,
    pub index_path: PathBuf,
    pub text_index_path: PathBuf,
}

/// Load `knowledge_base.json` and split it into part files
pub fn split_knowledge_base(config: &SplitConfig) -> Result<SplitReport> {
    config.validate()?;

    info!("Loading {}", config.kb_file.display());
    let kb = KnowledgeBase::load(&config.kb_file)?;

    split_episodes(&kb.episodes, config.episodes_per_file, &config.output_dir)
}

/// Write `episodes` as part files of `episodes_per_file` each, plus the
/// JSON and text indexes
pub fn split_episodes(
    episodes: &[Episode],
    episodes_per_file: usize,
    output_dir: &Path,
) -> Result<SplitReport> {
    validate_episodes_per_file(episodes_per_file)?;
    ensure_dir(output_dir)?;

    let total_episodes = episodes.len();
    let total_parts = total_episodes.div_ceil(episodes_per_file);
    info!(
        "Splitting {} episodes into {} files ({} per file)",
        total_episodes, total_parts, episodes_per_file
    );

    let mut entries = Vec::with_capacity(total_parts);
    for (i, group) in episodes.chunks(episodes_per_file).enumerate() {
        let part_number = i + 1;
        let first = i * episodes_per_file;
        let range = EpisodeRange {
            start: first + 1,
            end: first + group.len(),
        };

        let part = PartFile {
            metadata: PartMetadata {
                part_number,
                total_parts,
                episode_range: range,
                episodes_in_part: group.len(),
                total_episodes,
                episodes_per_file,
            },
            episodes: group.to_vec(),
        };

        let filename = part_filename(part_number);
        let path = output_dir.join(&filename);
        write_json(&path, &part)?;
        let sha256 = sha256_file(&path)?;
        debug!(
            "Created {} ({} episodes: {}-{})",
            filename,
            group.len(),
            range.start,
            range.end
        );

        entries.push(PartEntry {
            part_number,
            filename,
            episode_range: range,
            episodes_count: group.len(),
            first_episode: group.first().map(|e| e.title.clone()).unwrap_or_default(),
            last_episode: group.last().map(|e| e.title.clone()).unwrap_or_default(),
            sha256: Some(sha256),
        });
    }

    let index = PartsIndex {
        metadata: PartsIndexMetadata {
            total_episodes,
            episodes_per_file,
            total_files: total_parts,
            description: "Index of all knowledge base chunk files".to_string(),
            generated_at: Some(timestamp()),
        },
        parts: entries,
    };

    let index_path = output_dir.join(PARTS_INDEX_FILE);
    write_json(&index_path, &index).context("Failed to write parts index")?;
    info!("Created {}", index_path.display());

    let text_index_path = output_dir.join(PARTS_TEXT_INDEX_FILE);
    write_text(&text_index_path, &render_parts_text_index(&index))?;
    info!("Created {}", text_index_path.display());

    Ok(SplitReport {
        index,
        index_path,
        text_index_path,
    })
}

/// Human-readable listing of the part files
pub fn render_parts_text_index(index: &PartsIndex) -> String {
    let rule = "=".repeat(80);
    let mut out = String::new();

    out.push_str("Knowledge Base Chunks Index\n");
    out.push_str(&format!("{}\n\n", rule));
    out.push_str(&format!("Total Episodes: {}\n", index.metadata.total_episodes));
    out.push_str(&format!("Episodes per File: {}\n", index.metadata.episodes_per_file));
    out.push_str(&format!("Total Files: {}\n\n", index.metadata.total_files));
    out.push_str(&format!("{}\n\n", rule));

    for entry in &index.parts {
        out.push_str(&format!("Chunk {:03}: {}\n", entry.part_number, entry.filename));
        out.push_str(&format!(
            "  Episodes {}-{} ({} episodes)\n",
            entry.episode_range.start, entry.episode_range.end, entry.episodes_count
        ));
        out.push_str(&format!("  First: {}...\n", truncate_chars(&entry.first_episode, 60)));
        out.push_str(&format!("  Last:  {}...\n\n", truncate_chars(&entry.last_episode, 60)));
    }

    out
}
