use std::collections::BTreeSet;

use crate::kb::Episode;
use crate::kb::query::count_mentions;
use crate::text::truncate_chars;

/// Default transcript excerpt length per episode
pub const DEFAULT_MAX_CHARS_PER_EPISODE: usize = 3000;

/// Default number of episodes pulled into a prompt
pub const DEFAULT_MAX_EPISODES: usize = 3;

const SHOW_PLACEHOLDER: &str = "{show}";

const TEMPLATES: &[(&str, &str)] = &[
    (
        "product_market_fit",
        "Based on {show} interviews, what are the key frameworks and signals for identifying product-market fit? Share insights from multiple guests.",
    ),
    (
        "building_teams",
        "How do top product leaders structure and build their product teams? What are the common patterns and best practices from {show}?",
    ),
    (
        "prioritization",
        "What prioritization frameworks have been shared on {show}? Compare different approaches and when to use each.",
    ),
    (
        "growth_tactics",
        "What growth tactics have been discussed on {show}? Which ones work, which don't, and why?",
    ),
    (
        "career_advice",
        "Based on {show} interviews, what advice do product leaders give for building a successful product management career?",
    ),
    (
        "custom",
        "I'm facing [your specific challenge]. Based on {show} interviews, how have other product leaders solved similar problems? Provide actionable steps.",
    ),
];

/// Names of the built-in prompt templates
pub fn template_names() -> impl Iterator<Item = &'static str> {
    TEMPLATES.iter().map(|(name, _)| *name)
}

/// Built-in template `name` with the show name filled in
pub fn template(name: &str, show_name: &str) -> Option<String> {
    TEMPLATES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, text)| text.replace(SHOW_PLACEHOLDER, show_name))
}

/// Episodes mentioning `topic`, most mentions first
pub fn rank_by_phrase<'a>(episodes: &'a [Episode], topic: &str, max: usize) -> Vec<&'a Episode> {
    count_mentions(episodes, topic)
        .into_iter()
        .take(max)
        .map(|(ep, _)| ep)
        .collect()
}

/// Episodes ranked by how many distinct words of `query` appear in the transcript
///
/// Episodes matching no word are dropped; ties keep their original order.
pub fn rank_by_words<'a>(episodes: &'a [Episode], query: &str, max: usize) -> Vec<&'a Episode> {
    let words: BTreeSet<String> = query.split_whitespace().map(str::to_lowercase).collect();

    let mut scored: Vec<(usize, &Episode)> = episodes
        .iter()
        .filter_map(|ep| {
            let transcript = ep.transcript.to_lowercase();
            let matches = words.iter().filter(|w| transcript.contains(w.as_str())).count();
            (matches > 0).then_some((matches, ep))
        })
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().take(max).map(|(_, ep)| ep).collect()
}

fn render_context(episodes: &[&Episode], max_chars_per_episode: usize) -> String {
    episodes
        .iter()
        .map(|ep| {
            format!(
                "Episode: {}\nGuest: {}\nTranscript excerpt:\n{}...\n",
                ep.title,
                ep.guest,
                truncate_chars(&ep.transcript, max_chars_per_episode)
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n---\n\n")
}

/// Template prompt preceded by transcript excerpts
pub fn build_context_prompt(
    show_name: &str,
    template: &str,
    episodes: &[&Episode],
    max_chars_per_episode: usize,
) -> String {
    format!(
        "Based on these transcripts from {}:\n\n{}\n\n{}",
        show_name,
        render_context(episodes, max_chars_per_episode),
        template.trim()
    )
}

/// Free-form question preceded by transcript excerpts
pub fn build_question_prompt(
    show_name: &str,
    question: &str,
    episodes: &[&Episode],
    max_chars_per_episode: usize,
) -> String {
    format!(
        "Based on these podcast transcripts from {}:\n\n{}\n\nQuestion: {}\n\nPlease provide a comprehensive answer based on the information in these transcripts.",
        show_name,
        render_context(episodes, max_chars_per_episode),
        question.trim()
    )
}
