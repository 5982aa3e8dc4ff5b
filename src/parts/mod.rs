mod combine;
mod reader;
mod split;
mod types;

#[cfg(test)]
mod tests;

pub use combine::{combine_parts, write_combined};
pub use reader::{
    PartsSummary, list_part_files, part_number_of, read_part, render_listing, render_part,
    render_part_brief, render_summary, summarize,
};
pub use split::{SplitReport, render_parts_text_index, split_episodes, split_knowledge_base};
pub use types::{
    CombinedKnowledgeBase, CombinedMetadata, EpisodeRange, PartEntry, PartFile, PartMetadata,
    PartsIndex, PartsIndexMetadata,
};

use anyhow::{Result, bail};
use std::path::{Path, PathBuf};

use crate::artifact::read_json;

/// Knowledge base that `split` reads by default
pub const DEFAULT_KB_FILE: &str = "knowledge_base/knowledge_base.json";

/// Directory holding the part files
pub const DEFAULT_PARTS_DIR: &str = "knowledge_base/chunks";

/// Where `combine` writes the reassembled knowledge base by default
pub const DEFAULT_COMBINED_FILE: &str = "knowledge_base/knowledge_base_combined.json";

pub const PARTS_INDEX_FILE: &str = "index.json";
pub const PARTS_TEXT_INDEX_FILE: &str = "index.txt";

const PART_PREFIX: &str = "knowledge_base_chunk_";
const PART_SUFFIX: &str = ".json";

/// File name of part `number` (1-based, zero-padded to three digits)
pub fn part_filename(number: usize) -> String {
    format!("{}{:03}{}", PART_PREFIX, number, PART_SUFFIX)
}

/// Settings for splitting a knowledge base into part files
#[derive(Debug, Clone)]
pub struct SplitConfig {
    pub kb_file: PathBuf,
    pub output_dir: PathBuf,
    pub episodes_per_file: usize,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            kb_file: PathBuf::from(DEFAULT_KB_FILE),
            output_dir: PathBuf::from(DEFAULT_PARTS_DIR),
            episodes_per_file: 1,
        }
    }
}

impl SplitConfig {
    pub fn validate(&self) -> Result<()> {
        validate_episodes_per_file(self.episodes_per_file)
    }
}

fn validate_episodes_per_file(episodes_per_file: usize) -> Result<()> {
    if episodes_per_file == 0 {
        bail!("Invalid split configuration: episodes_per_file must be at least 1");
    }
    Ok(())
}

impl PartsIndex {
    /// Load the parts `index.json` from `dir`
    pub fn load(dir: &Path) -> Result<Self> {
        read_json(&dir.join(PARTS_INDEX_FILE))
    }
}
