//! Copy-pasteable prompts built from the knowledge base.

mod batch;
pub mod context;

#[cfg(test)]
mod tests;

pub use batch::{
    BatchConfig, BatchPrompt, DEFAULT_BATCH_DIR, DEFAULT_BATCH_SIZE, README_FILE, build_batches,
    generate_batches, render_readme,
};
pub use context::{
    DEFAULT_MAX_CHARS_PER_EPISODE, DEFAULT_MAX_EPISODES, build_context_prompt,
    build_question_prompt, rank_by_phrase, rank_by_words, template, template_names,
};
