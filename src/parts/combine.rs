use anyhow::{Context, Result, bail};
use std::path::Path;
use tracing::{debug, info};

use super::{CombinedKnowledgeBase, CombinedMetadata, PartFile, PartsIndex};
use crate::artifact::{ensure_dir, read_json, sha256_file, timestamp, write_json};
use crate::security::PathSanitizer;

/// Reassemble the episodes of every part listed in `dir/index.json`, in index order
///
/// Each part's checksum is verified when the index records one, and the
/// episode total must match the index.
pub fn combine_parts(dir: &Path) -> Result<CombinedKnowledgeBase> {
    let index = PartsIndex::load(dir)
        .context(format!("Failed to load parts index in {}", dir.display()))?;

    let mut episodes = Vec::with_capacity(index.metadata.total_episodes);
    for entry in &index.parts {
        let name = PathSanitizer::file_name(&entry.filename)?;
        let path = dir.join(name);

        if let Some(expected) = &entry.sha256 {
            let actual = sha256_file(&path)?;
            if !actual.eq_ignore_ascii_case(expected) {
                bail!(
                    "Checksum mismatch for {}: index records {}, file hashes to {}",
                    path.display(),
                    expected,
                    actual
                );
            }
        }

        let part: PartFile = read_json(&path)?;
        debug!("Loaded {} ({} episodes)", name, part.episodes.len());
        episodes.extend(part.episodes);
    }

    if episodes.len() != index.metadata.total_episodes {
        bail!(
            "Episode count mismatch: index lists {} episodes, parts contain {}",
            index.metadata.total_episodes,
            episodes.len()
        );
    }

    Ok(CombinedKnowledgeBase {
        metadata: CombinedMetadata {
            total_episodes: episodes.len(),
            source_files: index.parts.len(),
            generated_at: timestamp(),
        },
        episodes,
    })
}

/// Combine the parts in `dir` and write the result to `output`
pub fn write_combined(dir: &Path, output: &Path) -> Result<CombinedKnowledgeBase> {
    let combined = combine_parts(dir)?;
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }
    write_json(output, &combined)?;
    info!(
        "Combined {} files into {} ({} episodes)",
        combined.metadata.source_files,
        output.display(),
        combined.metadata.total_episodes
    );
    Ok(combined)
}
