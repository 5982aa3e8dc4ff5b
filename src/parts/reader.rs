use anyhow::{Result, bail};
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

use super::{PART_PREFIX, PART_SUFFIX, PartFile, part_filename};
use crate::artifact::read_json;
use crate::text::{group_thousands, group_thousands_f64, preview, truncate_chars};

const TRANSCRIPT_PREVIEW_CHARS: usize = 200;

/// Sorted `knowledge_base_chunk_*.json` files directly inside `dir`
pub fn list_part_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        bail!("Parts directory not found: {}", dir.display());
    }

    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.file_name()
                .to_str()
                .is_some_and(|name| name.starts_with(PART_PREFIX) && name.ends_with(PART_SUFFIX))
        })
        .map(|e| e.into_path())
        .collect();

    files.sort();
    Ok(files)
}

/// Part number encoded in a part file name (`knowledge_base_chunk_007.json` -> 7)
pub fn part_number_of(path: &Path) -> Option<usize> {
    path.file_name()?
        .to_str()?
        .strip_prefix(PART_PREFIX)?
        .strip_suffix(PART_SUFFIX)?
        .parse()
        .ok()
}

/// Read part `number` from `dir`
pub fn read_part(dir: &Path, number: usize) -> Result<PartFile> {
    let path = dir.join(part_filename(number));
    if !path.exists() {
        bail!("Part file not found: {}", path.display());
    }
    read_json(&path)
}

/// Totals across every part file in a directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartsSummary {
    pub files: usize,
    pub episodes: usize,
    pub words: usize,
    pub chars: usize,
    /// Files that could not be read
    pub unreadable: usize,
}

impl PartsSummary {
    pub fn avg_words_per_episode(&self) -> usize {
        self.words.checked_div(self.episodes).unwrap_or(0)
    }
}

/// Tally episodes, words and characters over all part files
pub fn summarize(dir: &Path) -> Result<PartsSummary> {
    let files = list_part_files(dir)?;
    let mut summary = PartsSummary {
        files: files.len(),
        ..PartsSummary::default()
    };

    for path in &files {
        match read_json::<PartFile>(path) {
            Ok(part) => {
                summary.episodes += part.episodes.len();
                for episode in &part.episodes {
                    summary.words += episode.word_count;
                    summary.chars += episode.transcript_length;
                }
            }
            Err(e) => {
                warn!("Skipping {}: {:#}", path.display(), e);
                summary.unreadable += 1;
            }
        }
    }

    Ok(summary)
}

pub fn render_summary(summary: &PartsSummary) -> String {
    format!(
        "Total chunk files: {}\nTotal episodes: {}\nTotal words: {}\nTotal characters: {}\nAverage words per episode: {}\n",
        summary.files,
        summary.episodes,
        group_thousands(summary.words as u64),
        group_thousands(summary.chars as u64),
        group_thousands(summary.avg_words_per_episode() as u64),
    )
}

/// One line per part file: number, first episode title and guest
pub fn render_listing(files: &[PathBuf]) -> String {
    let mut out = String::new();
    for path in files {
        let label = path
            .file_stem()
            .and_then(|s| s.to_str())
            .and_then(|s| s.rsplit('_').next())
            .unwrap_or("???");

        let line = match read_json::<PartFile>(path) {
            Ok(part) => match part.episodes.first() {
                Some(episode) => format!(
                    "{:>3}. {}... | Guest: {}",
                    label,
                    truncate_chars(&episode.title, 50),
                    episode.guest
                ),
                None => format!("{:>3}. [No episodes]", label),
            },
            Err(e) => format!("{:>3}. [Error reading file: {:#}]", label, e),
        };
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Full display of a part: metadata then every episode with a transcript preview
pub fn render_part(part: &PartFile, number: usize) -> String {
    let rule = "=".repeat(80);
    let meta = &part.metadata;
    let mut out = String::new();

    out.push_str(&format!("\n{}\nCHUNK {:03}\n{}\n", rule, number, rule));
    out.push_str(&format!("Total chunks: {}\n", meta.total_parts));
    out.push_str(&format!("Episodes in chunk: {}\n", meta.episodes_in_part));
    out.push_str(&format!(
        "Episode range: {} - {}\n",
        meta.episode_range.start, meta.episode_range.end
    ));
    out.push_str(&format!("\nEpisodes ({}):\n{}\n", part.episodes.len(), "-".repeat(80)));

    for (i, episode) in part.episodes.iter().enumerate() {
        out.push_str(&format!("\nEpisode {}:\n", i + 1));
        out.push_str(&format!("  ID: {}\n", episode.id));
        out.push_str(&format!("  Guest: {}\n", episode.guest));
        out.push_str(&format!("  Title: {}\n", episode.title));
        out.push_str(&format!("  YouTube: {}\n", episode.youtube_url));
        out.push_str(&format!("  Duration: {}\n", episode.duration));
        out.push_str(&format!("  Views: {}\n", group_thousands_f64(episode.view_count)));
        out.push_str(&format!("  Word count: {}\n", episode.word_count));

        if !episode.transcript.is_empty() {
            out.push_str(&format!(
                "  Transcript preview: {}\n",
                preview(&episode.transcript, TRANSCRIPT_PREVIEW_CHARS)
            ));
            out.push_str(&format!(
                "  Full transcript length: {} characters\n",
                episode.transcript.chars().count()
            ));
        }
    }

    out
}

/// Metadata-only display: episode count and titles
pub fn render_part_brief(part: &PartFile, number: usize) -> String {
    let mut out = format!("\nChunk {:03}: {} episode(s)\n", number, part.episodes.len());
    for episode in &part.episodes {
        out.push_str(&format!("  - {}\n", truncate_chars(&episode.title, 60)));
    }
    out
}
