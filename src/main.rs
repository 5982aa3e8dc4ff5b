//! transcript-kb: turn podcast transcripts into knowledge-base artifacts.
//!
//! ```bash
//! transcript-kb build --episodes-dir episodes --output-dir knowledge_base
//! transcript-kb split --episodes-per-file 1
//! transcript-kb read --summary
//! transcript-kb batch-prompts --batch-size 5
//! transcript-kb prompt --topic "product-market fit" --template product_market_fit
//! transcript-kb search --guest "shreyas"
//! transcript-kb search --longer-than 3600
//! ```

use anyhow::{Context, Result, bail};
use clap::{ArgGroup, Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use transcript_kb::kb::query::{
    count_mentions, find_by_guest, find_by_id, longer_than, top_by_views,
};
use transcript_kb::kb::{self, BuildConfig, IndexEntry, KnowledgeBase, create_knowledge_base};
use transcript_kb::parts::{
    self, SplitConfig, list_part_files, part_number_of, read_part, render_listing, render_part,
    render_part_brief, render_summary, split_knowledge_base, summarize, write_combined,
};
use transcript_kb::prompts::{
    self, BatchConfig, build_context_prompt, build_question_prompt, generate_batches,
    rank_by_phrase, rank_by_words,
};
use transcript_kb::text::{group_thousands, group_thousands_f64, truncate_chars};
use transcript_kb::{ChunkConfig, chunk_text};

#[derive(Parser)]
#[command(name = "transcript-kb", version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse every episode transcript and write the knowledge-base artifacts
    Build {
        /// Directory with one sub-directory per episode
        #[arg(long, env = "KB_EPISODES_DIR", default_value = kb::DEFAULT_EPISODES_DIR)]
        episodes_dir: PathBuf,

        /// Directory the artifacts are written to
        #[arg(long, env = "KB_OUTPUT_DIR", default_value = kb::DEFAULT_OUTPUT_DIR)]
        output_dir: PathBuf,

        /// Maximum characters per chunk
        #[arg(long, env = "KB_CHUNK_SIZE", default_value_t = transcript_kb::DEFAULT_CHUNK_SIZE)]
        chunk_size: usize,

        /// Characters shared by consecutive chunks
        #[arg(long, env = "KB_CHUNK_OVERLAP", default_value_t = transcript_kb::DEFAULT_CHUNK_OVERLAP)]
        overlap: usize,

        /// Show name used in the text index
        #[arg(long, env = "KB_SHOW_NAME", default_value = kb::DEFAULT_SHOW_NAME)]
        show_name: String,
    },

    /// Split knowledge_base.json into numbered part files
    Split {
        #[arg(long, default_value = parts::DEFAULT_KB_FILE)]
        kb_file: PathBuf,

        #[arg(long, env = "KB_PARTS_DIR", default_value = parts::DEFAULT_PARTS_DIR)]
        output_dir: PathBuf,

        #[arg(long, env = "KB_EPISODES_PER_FILE", default_value_t = 1)]
        episodes_per_file: usize,
    },

    /// Display part files
    #[command(group(ArgGroup::new("mode").args(["list", "file", "range", "summary", "all"])))]
    Read {
        #[arg(long, env = "KB_PARTS_DIR", default_value = parts::DEFAULT_PARTS_DIR)]
        dir: PathBuf,

        /// List all part files (default)
        #[arg(short, long)]
        list: bool,

        /// Read specific part files by number
        #[arg(short, long, num_args = 1.., value_name = "N")]
        file: Option<Vec<usize>>,

        /// Read an inclusive range of part files
        #[arg(short, long, num_args = 2, value_names = ["START", "END"])]
        range: Option<Vec<usize>>,

        /// Totals across all part files
        #[arg(short, long)]
        summary: bool,

        /// Read every part file (metadata only)
        #[arg(short, long)]
        all: bool,

        /// Show only metadata, not transcript previews
        #[arg(long)]
        metadata_only: bool,
    },

    /// Recombine part files into a single knowledge base
    Combine {
        #[arg(long, env = "KB_PARTS_DIR", default_value = parts::DEFAULT_PARTS_DIR)]
        dir: PathBuf,

        #[arg(long, default_value = parts::DEFAULT_COMBINED_FILE)]
        output: PathBuf,
    },

    /// Write copy-paste batch prompts covering every episode
    BatchPrompts {
        #[arg(long, env = "KB_PARTS_DIR", default_value = parts::DEFAULT_PARTS_DIR)]
        dir: PathBuf,

        #[arg(long, default_value = prompts::DEFAULT_BATCH_DIR)]
        output_dir: PathBuf,

        /// Episodes per prompt
        #[arg(long, env = "KB_BATCH_SIZE", default_value_t = prompts::DEFAULT_BATCH_SIZE)]
        batch_size: usize,

        #[arg(long, env = "KB_SHOW_NAME", default_value = kb::DEFAULT_SHOW_NAME)]
        show_name: String,
    },

    /// Print a prompt with transcript excerpts for a topic or question
    Prompt {
        #[arg(long, default_value = parts::DEFAULT_KB_FILE)]
        kb_file: PathBuf,

        /// Phrase used to pick episodes for a template prompt
        #[arg(long, conflicts_with = "question")]
        topic: Option<String>,

        /// Built-in template name
        #[arg(long, default_value = "product_market_fit")]
        template: String,

        /// Free-form question; episodes are picked by matching words
        #[arg(long)]
        question: Option<String>,

        #[arg(long, default_value_t = prompts::DEFAULT_MAX_EPISODES)]
        max_episodes: usize,

        /// Transcript characters per episode
        #[arg(long, default_value_t = prompts::DEFAULT_MAX_CHARS_PER_EPISODE)]
        max_chars: usize,

        #[arg(long, env = "KB_SHOW_NAME", default_value = kb::DEFAULT_SHOW_NAME)]
        show_name: String,
    },

    /// Look up episodes in the knowledge base
    #[command(group(ArgGroup::new("query").required(true).args(["guest", "id", "phrase", "top_views", "longer_than"])))]
    Search {
        #[arg(long, default_value = parts::DEFAULT_KB_FILE)]
        kb_file: PathBuf,

        /// Guest name (case-insensitive substring)
        #[arg(long)]
        guest: Option<String>,

        /// Episode id (transcript directory name)
        #[arg(long)]
        id: Option<String>,

        /// Phrase counted across transcripts
        #[arg(long)]
        phrase: Option<String>,

        /// Most viewed episodes
        #[arg(long, value_name = "N")]
        top_views: Option<usize>,

        /// Episodes longer than this many seconds
        #[arg(long, value_name = "SECONDS")]
        longer_than: Option<f64>,
    },

    /// Print the chunks of one plain-text file as JSON
    Chunk {
        file: PathBuf,

        #[arg(long, env = "KB_CHUNK_SIZE", default_value_t = transcript_kb::DEFAULT_CHUNK_SIZE)]
        chunk_size: usize,

        #[arg(long, env = "KB_CHUNK_OVERLAP", default_value_t = transcript_kb::DEFAULT_CHUNK_OVERLAP)]
        overlap: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Build {
            episodes_dir,
            output_dir,
            chunk_size,
            overlap,
            show_name,
        } => {
            let config = BuildConfig {
                episodes_dir,
                output_dir,
                chunk: ChunkConfig::new(chunk_size, overlap)?,
                show_name,
            };
            run_build(&config)
        }

        Commands::Split {
            kb_file,
            output_dir,
            episodes_per_file,
        } => run_split(&SplitConfig {
            kb_file,
            output_dir,
            episodes_per_file,
        }),

        Commands::Read {
            dir,
            list,
            file,
            range,
            summary,
            all,
            metadata_only,
        } => run_read(&dir, list, file, range, summary, all, metadata_only),

        Commands::Combine { dir, output } => {
            let combined = write_combined(&dir, &output)?;
            println!(
                "✓ Combined {} files into {} ({} episodes)",
                combined.metadata.source_files,
                output.display(),
                combined.metadata.total_episodes
            );
            Ok(())
        }

        Commands::BatchPrompts {
            dir,
            output_dir,
            batch_size,
            show_name,
        } => {
            let config = BatchConfig {
                batch_size,
                show_name,
            };
            let written = generate_batches(&dir, &output_dir, &config)?;
            println!(
                "✓ Created {} batch prompt files in {}",
                written.len().saturating_sub(1),
                output_dir.display()
            );
            println!("✓ Created {} with usage instructions", prompts::README_FILE);
            Ok(())
        }

        Commands::Prompt {
            kb_file,
            topic,
            template,
            question,
            max_episodes,
            max_chars,
            show_name,
        } => run_prompt(
            &kb_file,
            topic,
            &template,
            question,
            max_episodes,
            max_chars,
            &show_name,
        ),

        Commands::Search {
            kb_file,
            guest,
            id,
            phrase,
            top_views,
            longer_than,
        } => run_search(
            &kb_file,
            SearchQuery {
                guest,
                id,
                phrase,
                top_views,
                longer_than,
            },
        ),

        Commands::Chunk {
            file,
            chunk_size,
            overlap,
        } => {
            let config = ChunkConfig::new(chunk_size, overlap)?;
            let text = fs::read_to_string(&file)
                .context(format!("Failed to read {}", file.display()))?;
            let chunks = chunk_text(&text, config)?;
            for (i, chunk) in chunks.iter().enumerate() {
                debug!(
                    "Chunk {}: [{}, {}) {} chars",
                    i,
                    chunk.start,
                    chunk.end,
                    chunk.char_len()
                );
            }
            println!("{}", serde_json::to_string_pretty(&chunks)?);
            Ok(())
        }
    }
}

fn rule() -> String {
    "=".repeat(80)
}

fn run_build(config: &BuildConfig) -> Result<()> {
    let (summary, paths) = create_knowledge_base(config)?;

    println!("✓ Created {}", paths.knowledge_base.display());
    println!("✓ Created {}", paths.index.display());
    println!("✓ Created {}", paths.chunks.display());
    println!("✓ Created {}", paths.text_index.display());

    println!("\n{}\nKnowledge Base Summary\n{}", rule(), rule());
    if summary.total_episodes == 0 {
        println!("No episodes processed successfully!");
    } else {
        println!("Total Episodes: {}", summary.total_episodes);
        println!("Total Words: {}", group_thousands(summary.total_words as u64));
        println!("Total Characters: {}", group_thousands(summary.total_chars as u64));
        println!("Total Chunks: {}", summary.total_chunks);
        println!(
            "Average Words per Episode: {}",
            group_thousands(summary.avg_words_per_episode() as u64)
        );
        println!("Average Chunks per Episode: {}", summary.avg_chunks_per_episode());
    }
    if summary.skipped > 0 {
        println!("Skipped: {} transcript(s)", summary.skipped);
    }
    println!("{}", rule());
    println!("\nAll files saved to: {}", config.output_dir.display());
    Ok(())
}

fn run_split(config: &SplitConfig) -> Result<()> {
    let report = split_knowledge_base(config)?;
    let meta = &report.index.metadata;

    println!("\n{}\nSummary\n{}", rule(), rule());
    println!("Created {} chunk files in {}", meta.total_files, config.output_dir.display());
    println!("Each file contains up to {} episodes", meta.episodes_per_file);
    println!("Index file: {}", report.index_path.display());
    println!("{}", rule());
    Ok(())
}

fn print_parts(dir: &Path, numbers: &[usize], metadata_only: bool) {
    for &number in numbers {
        match read_part(dir, number) {
            Ok(part) if metadata_only => print!("{}", render_part_brief(&part, number)),
            Ok(part) => print!("{}", render_part(&part, number)),
            Err(e) => eprintln!("Error reading chunk {}: {:#}", number, e),
        }
    }
}

fn run_read(
    dir: &Path,
    list: bool,
    file: Option<Vec<usize>>,
    range: Option<Vec<usize>>,
    summary: bool,
    all: bool,
    metadata_only: bool,
) -> Result<()> {
    if !dir.is_dir() {
        bail!("Chunks directory not found: {}", dir.display());
    }

    if summary {
        let totals = summarize(dir)?;
        println!("\nSUMMARY: {} chunk files\n{}", totals.files, "-".repeat(80));
        print!("{}", render_summary(&totals));
    } else if all {
        let mut numbers: Vec<usize> = list_part_files(dir)?
            .iter()
            .filter_map(|p| part_number_of(p))
            .collect();
        numbers.sort_unstable();
        println!("Reading {} chunk files...", numbers.len());
        print_parts(dir, &numbers, true);
    } else if let Some(bounds) = range {
        let (start, end) = match bounds.as_slice() {
            [start, end] => (*start, *end),
            _ => bail!("--range takes exactly two numbers"),
        };
        let numbers: Vec<usize> = (start..=end).collect();
        print_parts(dir, &numbers, metadata_only);
    } else if let Some(numbers) = file {
        print_parts(dir, &numbers, metadata_only);
    } else {
        let files = list_part_files(dir)?;
        println!("\nFound {} chunk files in {}\n", files.len(), dir.display());
        println!("Available files:\n{}", "-".repeat(60));
        print!("{}", render_listing(&files));
        if !list {
            println!("\nUse --help to see all available options");
        }
    }
    Ok(())
}

fn run_prompt(
    kb_file: &Path,
    topic: Option<String>,
    template: &str,
    question: Option<String>,
    max_episodes: usize,
    max_chars: usize,
    show_name: &str,
) -> Result<()> {
    let knowledge_base = KnowledgeBase::load(kb_file)?;
    let episodes = &knowledge_base.episodes;

    let prompt = match (topic, question) {
        (_, Some(question)) => {
            let relevant = rank_by_words(episodes, &question, max_episodes);
            if relevant.is_empty() {
                warn!("No episodes match the question; the prompt has no context");
            }
            build_question_prompt(show_name, &question, &relevant, max_chars)
        }
        (Some(topic), None) => {
            let Some(template_text) = prompts::template(template, show_name) else {
                let names: Vec<&str> = prompts::context::template_names().collect();
                bail!("Unknown template '{}' (available: {})", template, names.join(", "));
            };
            let relevant = rank_by_phrase(episodes, &topic, max_episodes);
            if relevant.is_empty() {
                warn!("No episodes mention '{}'; the prompt has no context", topic);
            }
            build_context_prompt(show_name, &template_text, &relevant, max_chars)
        }
        (None, None) => bail!("Provide either --topic or --question"),
    };

    println!("{}", prompt);
    Ok(())
}

/// The one lookup `search` was asked for
struct SearchQuery {
    guest: Option<String>,
    id: Option<String>,
    phrase: Option<String>,
    top_views: Option<usize>,
    longer_than: Option<f64>,
}

fn run_search(kb_file: &Path, query: SearchQuery) -> Result<()> {
    let knowledge_base = KnowledgeBase::load(kb_file)?;
    let episodes = &knowledge_base.episodes;

    if let Some(name) = query.guest {
        let found = find_by_guest(episodes, &name);
        println!("Found {} episode(s) with '{}':", found.len(), name);
        for ep in found {
            println!("  - {} ({})", ep.title, ep.id);
        }
    } else if let Some(id) = query.id {
        let Some(ep) = find_by_id(episodes, &id) else {
            bail!("No episode with id '{}'", id);
        };
        println!("{}", ep.title);
        println!("  Guest:    {}", ep.guest);
        println!("  Duration: {}", ep.duration);
        println!("  Views:    {}", group_thousands_f64(ep.view_count));
        println!("  YouTube:  {}", ep.youtube_url);
        println!("  Words:    {}", group_thousands(ep.word_count as u64));
    } else if let Some(phrase) = query.phrase {
        let hits = count_mentions(episodes, &phrase);
        println!("Episodes mentioning '{}':", phrase);
        for (ep, count) in hits {
            println!("  - {}: {} mentions", ep.guest, count);
            println!("    {}...", truncate_chars(&ep.title, 60));
        }
    } else if let Some(n) = query.top_views {
        for (i, ep) in top_by_views(episodes, n).into_iter().enumerate() {
            println!("{}. {}: {} views", i + 1, ep.guest, group_thousands_f64(ep.view_count));
            println!("   {}...", truncate_chars(&ep.title, 60));
        }
    } else if let Some(seconds) = query.longer_than {
        let entries: Vec<IndexEntry> = episodes.iter().map(IndexEntry::from).collect();
        let found = longer_than(&entries, seconds);
        println!("Found {} episode(s) longer than {}s:", found.len(), seconds);
        for entry in found {
            println!("  - {} ({}): {}", entry.guest, entry.id, entry.duration);
        }
    }
    Ok(())
}
