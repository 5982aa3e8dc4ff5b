//! Simple lookups over a loaded knowledge base.

use std::cmp::Ordering;

use super::{Episode, IndexEntry};

/// Episodes whose guest name contains `name` (case-insensitive)
pub fn find_by_guest<'a>(episodes: &'a [Episode], name: &str) -> Vec<&'a Episode> {
    let needle = name.to_lowercase();
    episodes
        .iter()
        .filter(|ep| ep.guest.to_lowercase().contains(&needle))
        .collect()
}

/// Find an episode by its id
pub fn find_by_id<'a>(episodes: &'a [Episode], id: &str) -> Option<&'a Episode> {
    episodes.iter().find(|ep| ep.id == id)
}

/// The `n` most viewed episodes, most viewed first
pub fn top_by_views(episodes: &[Episode], n: usize) -> Vec<&Episode> {
    let mut ranked: Vec<&Episode> = episodes.iter().collect();
    ranked.sort_by(|a, b| {
        b.view_count
            .partial_cmp(&a.view_count)
            .unwrap_or(Ordering::Equal)
    });
    ranked.truncate(n);
    ranked
}

/// Case-insensitive, non-overlapping occurrences of `phrase` in `text`
pub fn count_occurrences(text: &str, phrase: &str) -> usize {
    let phrase = phrase.to_lowercase();
    if phrase.is_empty() {
        return 0;
    }
    text.to_lowercase().matches(phrase.as_str()).count()
}

/// Episodes mentioning `phrase`, with mention counts, most mentions first
pub fn count_mentions<'a>(episodes: &'a [Episode], phrase: &str) -> Vec<(&'a Episode, usize)> {
    let mut hits: Vec<(&Episode, usize)> = episodes
        .iter()
        .map(|ep| (ep, count_occurrences(&ep.transcript, phrase)))
        .filter(|(_, count)| *count > 0)
        .collect();
    hits.sort_by(|a, b| b.1.cmp(&a.1));
    hits
}

/// Index entries longer than `seconds`
pub fn longer_than(entries: &[IndexEntry], seconds: f64) -> Vec<&IndexEntry> {
    entries
        .iter()
        .filter(|entry| entry.duration_seconds > seconds)
        .collect()
}
