use anyhow::{Context, Result, bail};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::artifact::{ensure_dir, write_text};
use crate::kb::{DEFAULT_SHOW_NAME, Episode};
use crate::parts::combine_parts;

pub const DEFAULT_BATCH_SIZE: usize = 5;
pub const DEFAULT_BATCH_DIR: &str = "knowledge_base/batch_prompts";
pub const README_FILE: &str = "README.txt";

#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Episodes per prompt
    pub batch_size: usize,
    pub show_name: String,
}

impl BatchConfig {
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            bail!("Invalid batch configuration: batch_size must be at least 1");
        }
        Ok(())
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            show_name: DEFAULT_SHOW_NAME.to_string(),
        }
    }
}

/// One rendered batch prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchPrompt {
    pub number: usize,
    /// 1-based inclusive episode positions
    pub first_episode: usize,
    pub last_episode: usize,
    pub text: String,
}

impl BatchPrompt {
    pub fn filename(&self) -> String {
        format!(
            "batch_{:03}_episodes_{:03}-{:03}.txt",
            self.number, self.first_episode, self.last_episode
        )
    }
}

#[derive(Serialize)]
struct EpisodePayload<'a> {
    id: &'a str,
    guest: &'a str,
    title: &'a str,
    transcript: &'a str,
}

fn system_prompt(show_name: &str, total_episodes: usize, first_batch_len: usize) -> String {
    format!(
        r#"You are an expert at creating structured knowledge bases from podcast transcripts. I have {total} episodes from {show} that I want to turn into a comprehensive, searchable knowledge base.

## Your Task

Create a complete knowledge base that includes:

1. **Episode Index**: All episodes with metadata (guest, title, topics, key insights)
2. **Topic-Based Organization**: All insights organized by topic (e.g., Product-Market Fit, Growth Tactics, Team Building)
3. **Framework Library**: All frameworks, methodologies, and models extracted with step-by-step application guides
4. **Guest Expertise Map**: What each guest specializes in and their key contributions
5. **Cross-Reference System**: Connections between related episodes and topics
6. **Actionable Insights Database**: Practical advice, tips, and strategies organized by use case

## Output Format

For each episode, extract:
- Guest name and episode title
- 5-10 main topics discussed
- Key frameworks or methodologies shared
- 3-5 most actionable insights
- 3-5 memorable quotes
- Real-world examples or case studies mentioned
- Connections to other topics/episodes

## Processing Instructions

1. Process each transcript thoroughly
2. Extract all significant insights, frameworks, and actionable content
3. Maintain accuracy - only include what's actually in the transcripts
4. Create clear connections between related content
5. Focus on practical, applicable insights
6. Use consistent formatting and structure

## Workflow

I'll provide episodes in batches. For each batch:
- Process all episodes completely
- Add to the cumulative knowledge base (don't start over)
- Maintain cross-references with previously processed episodes
- Update the master index, topic organization, and framework library

Here are the first {first} episodes to process:

"#,
        total = total_episodes,
        show = show_name,
        first = first_batch_len,
    )
}

fn render_episode(position: usize, episode: &Episode) -> Result<String> {
    let payload = EpisodePayload {
        id: &episode.id,
        guest: &episode.guest,
        title: &episode.title,
        transcript: &episode.transcript,
    };
    let json = serde_json::to_string_pretty(&payload)
        .context(format!("Failed to serialize episode {}", episode.id))?;

    Ok(format!(
        "Episode {}: {}\nGuest: {}\n\n```json\n{}\n```\n\n",
        position, episode.title, episode.guest, json
    ))
}

/// Render the episodes as consecutive batch prompts
pub fn build_batches(episodes: &[Episode], config: &BatchConfig) -> Result<Vec<BatchPrompt>> {
    config.validate()?;

    let mut batches = Vec::new();
    for (i, group) in episodes.chunks(config.batch_size).enumerate() {
        let first = i * config.batch_size + 1;
        let last = first + group.len() - 1;

        let mut text = if i == 0 {
            system_prompt(&config.show_name, episodes.len(), group.len())
        } else {
            format!(
                "Process episodes {} through {} and add them to the knowledge base:\n\n",
                first, last
            )
        };

        for (offset, episode) in group.iter().enumerate() {
            text.push_str(&render_episode(first + offset, episode)?);
        }

        if i == 0 {
            text.push_str(
                "Please process these episodes and create the initial knowledge base structure.\n",
            );
        } else {
            text.push_str(&format!(
                "Maintain cross-references with all previously processed episodes (1-{}).\nUpdate the master index, topic organization, and framework library.\n",
                first - 1
            ));
        }

        batches.push(BatchPrompt {
            number: i + 1,
            first_episode: first,
            last_episode: last,
            text,
        });
    }

    Ok(batches)
}

/// Overview of the generated files with usage steps
pub fn render_readme(batches: &[BatchPrompt], total_episodes: usize, batch_size: usize) -> String {
    let mut out = format!(
        "Batch Prompt Generator Summary\n{}\n\nTotal Episodes: {}\nBatch Size: {} episodes per message\nTotal Batches: {}\n\nFiles Created:\n",
        "=".repeat(80),
        total_episodes,
        batch_size,
        batches.len()
    );
    for batch in batches {
        out.push_str(&format!("  {}\n", batch.filename()));
    }
    out.push_str(&format!(
        "\nUsage:\n1. Copy the batch_001 file and paste it into your chat assistant (includes the system prompt)\n2. After it responds, copy batch_002 and paste\n3. Continue through all {total} batches\n4. Request a final consolidation after batch {total:03}\n\nEach batch file is ready to copy and paste directly.\n",
        total = batches.len()
    ));
    out
}

/// Recombine the parts in `parts_dir` and write one prompt file per batch plus a README
pub fn generate_batches(
    parts_dir: &Path,
    output_dir: &Path,
    config: &BatchConfig,
) -> Result<Vec<PathBuf>> {
    let combined = combine_parts(parts_dir)?;
    let batches = build_batches(&combined.episodes, config)?;
    info!(
        "Generating {} batch prompts for {} episodes ({} per batch)",
        batches.len(),
        combined.episodes.len(),
        config.batch_size
    );

    ensure_dir(output_dir)?;
    let mut written = Vec::with_capacity(batches.len() + 1);
    for batch in &batches {
        let path = output_dir.join(batch.filename());
        write_text(&path, &batch.text)?;
        info!(
            "Created batch {:03}: episodes {:03}-{:03}",
            batch.number, batch.first_episode, batch.last_episode
        );
        written.push(path);
    }

    let readme = output_dir.join(README_FILE);
    write_text(
        &readme,
        &render_readme(&batches, combined.episodes.len(), config.batch_size),
    )?;
    written.push(readme);

    Ok(written)
}
