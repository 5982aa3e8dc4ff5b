mod frontmatter;
mod result;


pub use frontmatter::{parse_header, split_frontmatter};
pub use result::{ParsedTranscript, TranscriptMetadata};

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Split a transcript file's content into header metadata and body text
///
/// # Arguments
/// * `path` - Where the content came from; its parent directory names the episode
/// * `content` - Full file contents
///
/// Content without a complete `---` header is returned untouched as the body
/// with empty metadata.
pub fn parse_transcript(path: &Path, content: &str) -> ParsedTranscript {
    let (metadata, transcript) = match split_frontmatter(content) {
        Some((header, body)) => (parse_header(header), body.to_string()),
        None => (TranscriptMetadata::new(), content.to_string()),
    };

    ParsedTranscript {
        metadata,
        transcript,
        episode_slug: episode_slug(path),
        filepath: path.to_path_buf(),
    }
}

/// Read and parse a transcript file from disk
pub fn read_transcript(path: &Path) -> Result<ParsedTranscript> {
    let content = fs::read_to_string(path)
        .context(format!("Failed to read transcript: {}", path.display()))?;
    Ok(parse_transcript(path, &content))
}

/// Episode identifier: the name of the directory holding the transcript
fn episode_slug(path: &Path) -> String {
    path.parent()
        .and_then(|p| p.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
