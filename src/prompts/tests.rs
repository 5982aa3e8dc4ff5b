use super::*;
use crate::kb::Episode;
use crate::parts::split_episodes;
use std::fs;

fn episode(id: &str, transcript: &str) -> Episode {
    Episode {
        id: id.to_string(),
        guest: format!("Guest {}", id),
        title: format!("Title {}", id),
        transcript: transcript.to_string(),
        ..Episode::default()
    }
}

fn numbered(n: usize) -> Vec<Episode> {
    (1..=n)
        .map(|i| episode(&i.to_string(), &format!("Transcript {}.", i)))
        .collect()
}

// ============================================================================
// Batch prompts
// ============================================================================

#[test]
fn test_batches_cover_all_episodes() {
    let config = BatchConfig {
        batch_size: 5,
        show_name: "Test Show".to_string(),
    };
    let batches = build_batches(&numbered(12), &config).unwrap();

    let ranges: Vec<(usize, usize)> = batches
        .iter()
        .map(|b| (b.first_episode, b.last_episode))
        .collect();
    assert_eq!(ranges, vec![(1, 5), (6, 10), (11, 12)]);
    assert_eq!(batches[2].filename(), "batch_003_episodes_011-012.txt");
}

#[test]
fn test_first_batch_carries_system_prompt() {
    let config = BatchConfig {
        batch_size: 2,
        show_name: "Test Show".to_string(),
    };
    let batches = build_batches(&numbered(3), &config).unwrap();
    let first = &batches[0].text;

    assert!(first.starts_with("You are an expert at creating structured knowledge bases"));
    assert!(first.contains("I have 3 episodes from Test Show"));
    assert!(first.contains("Here are the first 2 episodes to process:"));
    assert!(first.contains("Episode 1: Title 1\nGuest: Guest 1\n\n```json\n"));
    assert!(first.ends_with(
        "Please process these episodes and create the initial knowledge base structure.\n"
    ));
}

#[test]
fn test_later_batches_reference_earlier_episodes() {
    let config = BatchConfig {
        batch_size: 2,
        show_name: "Test Show".to_string(),
    };
    let batches = build_batches(&numbered(3), &config).unwrap();
    let second = &batches[1].text;

    assert!(second.starts_with("Process episodes 3 through 3 and add them to the knowledge base:\n\n"));
    assert!(second.contains("Episode 3: Title 3"));
    assert!(second.contains("previously processed episodes (1-2)."));
}

#[test]
fn test_episode_payload_field_order() {
    let batches = build_batches(&numbered(1), &BatchConfig::default()).unwrap();
    let text = &batches[0].text;

    let id = text.find("\"id\"").unwrap();
    let guest = text.find("\"guest\"").unwrap();
    let title = text.find("\"title\"").unwrap();
    let transcript = text.find("\"transcript\"").unwrap();
    assert!(id < guest && guest < title && title < transcript);
}

#[test]
fn test_zero_batch_size_rejected() {
    let config = BatchConfig {
        batch_size: 0,
        ..BatchConfig::default()
    };
    assert!(build_batches(&numbered(1), &config).is_err());
}

#[test]
fn test_readme_lists_files() {
    let batches = build_batches(&numbered(6), &BatchConfig::default()).unwrap();
    let readme = render_readme(&batches, 6, 5);

    assert!(readme.contains("Total Episodes: 6\n"));
    assert!(readme.contains("Total Batches: 2\n"));
    assert!(readme.contains("  batch_001_episodes_001-005.txt\n"));
    assert!(readme.contains("  batch_002_episodes_006-006.txt\n"));
    assert!(readme.contains("after batch 002"));
}

#[test]
fn test_generate_batches_from_parts() {
    let dir = tempfile::tempdir().unwrap();
    let parts_dir = dir.path().join("chunks");
    let out_dir = dir.path().join("batch_prompts");
    split_episodes(&numbered(7), 3, &parts_dir).unwrap();

    let written = generate_batches(&parts_dir, &out_dir, &BatchConfig::default()).unwrap();

    assert_eq!(written.len(), 3);
    assert!(out_dir.join("batch_001_episodes_001-005.txt").exists());
    assert!(out_dir.join("batch_002_episodes_006-007.txt").exists());
    let readme = fs::read_to_string(out_dir.join(README_FILE)).unwrap();
    assert!(readme.contains("Total Episodes: 7"));
}

// ============================================================================
// Context prompts
// ============================================================================

#[test]
fn test_template_lookup_fills_show_name() {
    let text = template("prioritization", "My Show").unwrap();
    assert!(text.contains("shared on My Show?"));
    assert!(template("nope", "My Show").is_none());
    assert_eq!(template_names().count(), 6);
}

#[test]
fn test_rank_by_phrase() {
    let episodes = vec![
        episode("a", "growth once"),
        episode("b", "no match"),
        episode("c", "Growth growth GROWTH"),
    ];
    let ranked: Vec<&str> = rank_by_phrase(&episodes, "growth", 5)
        .iter()
        .map(|e| e.id.as_str())
        .collect();
    assert_eq!(ranked, vec!["c", "a"]);
    assert_eq!(rank_by_phrase(&episodes, "growth", 1).len(), 1);
}

#[test]
fn test_rank_by_words_counts_distinct_words() {
    let episodes = vec![
        episode("a", "hiring hiring hiring"),
        episode("b", "hiring and onboarding"),
        episode("c", "onboarding only"),
        episode("d", "unrelated"),
    ];
    let ranked: Vec<&str> = rank_by_words(&episodes, "Hiring onboarding hiring", 10)
        .iter()
        .map(|e| e.id.as_str())
        .collect();
    assert_eq!(ranked, vec!["b", "a", "c"]);
}

#[test]
fn test_build_context_prompt() {
    let a = episode("a", "abcdef");
    let b = episode("b", "xyz");
    let prompt = build_context_prompt("Show", "  What now?\n", &[&a, &b], 3);

    assert_eq!(
        prompt,
        "Based on these transcripts from Show:\n\nEpisode: Title a\nGuest: Guest a\nTranscript excerpt:\nabc...\n\n\n---\n\nEpisode: Title b\nGuest: Guest b\nTranscript excerpt:\nxyz...\n\n\nWhat now?"
    );
}

#[test]
fn test_build_question_prompt() {
    let a = episode("a", "Some transcript.");
    let prompt = build_question_prompt("Show", "How do I hire?", &[&a], 100);

    assert!(prompt.starts_with("Based on these podcast transcripts from Show:\n\n"));
    assert!(prompt.contains("Question: How do I hire?\n\n"));
    assert!(prompt.ends_with("based on the information in these transcripts."));
}
