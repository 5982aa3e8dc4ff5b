use super::*;
use crate::kb::{Episode, KnowledgeBase, KnowledgeBaseMetadata};
use std::fs;

fn episode(n: usize) -> Episode {
    let transcript = format!("Transcript number {}. It has a few words.", n);
    Episode {
        id: format!("ep-{}", n),
        guest: format!("Guest {}", n),
        title: format!("Episode title {}", n),
        word_count: transcript.split_whitespace().count(),
        transcript_length: transcript.chars().count(),
        transcript,
        view_count: 1000.0 * n as f64,
        ..Episode::default()
    }
}

fn episodes(n: usize) -> Vec<Episode> {
    (1..=n).map(episode).collect()
}

// ============================================================================
// Split
// ============================================================================

#[test]
fn test_part_filename_is_zero_padded() {
    assert_eq!(part_filename(1), "knowledge_base_chunk_001.json");
    assert_eq!(part_filename(42), "knowledge_base_chunk_042.json");
    assert_eq!(part_filename(1234), "knowledge_base_chunk_1234.json");
}

#[test]
fn test_split_one_episode_per_file() {
    let dir = tempfile::tempdir().unwrap();
    let report = split_episodes(&episodes(3), 1, dir.path()).unwrap();

    assert_eq!(report.index.metadata.total_files, 3);
    assert_eq!(report.index.parts.len(), 3);

    let part = read_part(dir.path(), 2).unwrap();
    assert_eq!(part.metadata.part_number, 2);
    assert_eq!(part.metadata.total_parts, 3);
    assert_eq!(part.metadata.episode_range, EpisodeRange { start: 2, end: 2 });
    assert_eq!(part.episodes[0].id, "ep-2");
}

#[test]
fn test_split_uneven_last_part() {
    let dir = tempfile::tempdir().unwrap();
    let report = split_episodes(&episodes(7), 3, dir.path()).unwrap();

    assert_eq!(report.index.metadata.total_files, 3);
    let last = &report.index.parts[2];
    assert_eq!(last.episode_range, EpisodeRange { start: 7, end: 7 });
    assert_eq!(last.episodes_count, 1);
    assert_eq!(last.first_episode, "Episode title 7");

    let second = &report.index.parts[1];
    assert_eq!(second.episode_range, EpisodeRange { start: 4, end: 6 });
    assert_eq!(second.last_episode, "Episode title 6");
}

#[test]
fn test_split_writes_legacy_field_names() {
    let dir = tempfile::tempdir().unwrap();
    split_episodes(&episodes(2), 1, dir.path()).unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join(part_filename(1))).unwrap())
            .unwrap();
    assert_eq!(raw["metadata"]["chunk_number"], 1);
    assert_eq!(raw["metadata"]["total_chunks"], 2);
    assert_eq!(raw["metadata"]["episodes_in_chunk"], 1);

    let index: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join(PARTS_INDEX_FILE)).unwrap())
            .unwrap();
    assert_eq!(index["chunks"][1]["filename"], "knowledge_base_chunk_002.json");
    assert_eq!(index["chunks"][1]["sha256"].as_str().unwrap().len(), 64);
}

#[test]
fn test_split_rejects_zero_episodes_per_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = split_episodes(&episodes(2), 0, dir.path()).unwrap_err();
    assert!(err.to_string().contains("episodes_per_file"));
}

#[test]
fn test_split_empty_knowledge_base() {
    let dir = tempfile::tempdir().unwrap();
    let report = split_episodes(&[], 1, dir.path()).unwrap();

    assert_eq!(report.index.metadata.total_files, 0);
    assert!(report.index.parts.is_empty());
    assert!(list_part_files(dir.path()).unwrap().is_empty());
}

#[test]
fn test_split_knowledge_base_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let kb_file = dir.path().join("knowledge_base.json");
    let kb = KnowledgeBase {
        metadata: KnowledgeBaseMetadata {
            total_episodes: 4,
            total_chunks: 4,
            chunk_size: 1000,
            chunk_overlap: 200,
            generated_at: None,
        },
        episodes: episodes(4),
    };
    crate::artifact::write_json(&kb_file, &kb).unwrap();

    let config = SplitConfig {
        kb_file,
        output_dir: dir.path().join("chunks"),
        episodes_per_file: 2,
    };
    let report = split_knowledge_base(&config).unwrap();

    assert_eq!(report.index.metadata.total_episodes, 4);
    assert_eq!(report.index.metadata.total_files, 2);
    assert!(report.text_index_path.exists());
}

#[test]
fn test_render_parts_text_index() {
    let mut long = episode(1);
    long.title = "x".repeat(70);
    let dir = tempfile::tempdir().unwrap();
    let report = split_episodes(&[long], 1, dir.path()).unwrap();

    let text = render_parts_text_index(&report.index);
    assert!(text.starts_with("Knowledge Base Chunks Index\n"));
    assert!(text.contains("Total Episodes: 1\nEpisodes per File: 1\nTotal Files: 1\n"));
    assert!(text.contains("Chunk 001: knowledge_base_chunk_001.json\n"));
    assert!(text.contains("  Episodes 1-1 (1 episodes)\n"));
    assert!(text.contains(&format!("  First: {}...\n", "x".repeat(60))));
    assert!(text.contains(&format!("  Last:  {}...\n", "x".repeat(60))));
}

// ============================================================================
// Read
// ============================================================================

#[test]
fn test_list_part_files_sorted_and_filtered() {
    let dir = tempfile::tempdir().unwrap();
    split_episodes(&episodes(3), 1, dir.path()).unwrap();
    fs::write(dir.path().join("notes.json"), "{}").unwrap();

    let files = list_part_files(dir.path()).unwrap();
    let names: Vec<_> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
        .collect();
    assert_eq!(
        names,
        vec![
            "knowledge_base_chunk_001.json",
            "knowledge_base_chunk_002.json",
            "knowledge_base_chunk_003.json",
        ]
    );
    assert_eq!(part_number_of(&files[2]), Some(3));
}

#[test]
fn test_list_part_files_missing_dir() {
    let err = list_part_files(std::path::Path::new("/nonexistent/chunks")).unwrap_err();
    assert!(err.to_string().contains("Parts directory not found"));
}

#[test]
fn test_read_missing_part_names_path() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_part(dir.path(), 9).unwrap_err();
    assert!(err.to_string().contains("knowledge_base_chunk_009.json"));
}

#[test]
fn test_summarize_skips_unreadable_files() {
    let dir = tempfile::tempdir().unwrap();
    split_episodes(&episodes(4), 2, dir.path()).unwrap();
    fs::write(dir.path().join(part_filename(3)), "{broken").unwrap();

    let summary = summarize(dir.path()).unwrap();
    assert_eq!(summary.files, 3);
    assert_eq!(summary.episodes, 4);
    assert_eq!(summary.unreadable, 1);
    assert_eq!(summary.words, 4 * 8);
    assert_eq!(summary.avg_words_per_episode(), 8);

    let rendered = render_summary(&summary);
    assert!(rendered.contains("Total episodes: 4\n"));
}

#[test]
fn test_render_listing() {
    let dir = tempfile::tempdir().unwrap();
    split_episodes(&episodes(2), 1, dir.path()).unwrap();

    let listing = render_listing(&list_part_files(dir.path()).unwrap());
    assert_eq!(
        listing,
        "001. Episode title 1... | Guest: Guest 1\n002. Episode title 2... | Guest: Guest 2\n"
    );
}

#[test]
fn test_render_part_previews_transcript() {
    let mut ep = episode(1);
    ep.transcript = "word ".repeat(100);
    let part = PartFile {
        metadata: PartMetadata {
            part_number: 1,
            total_parts: 1,
            episode_range: EpisodeRange { start: 1, end: 1 },
            episodes_in_part: 1,
            total_episodes: 1,
            episodes_per_file: 1,
        },
        episodes: vec![ep],
    };

    let full = render_part(&part, 1);
    assert!(full.contains("CHUNK 001"));
    assert!(full.contains("  Views: 1,000\n"));
    assert!(full.contains(&format!("  Transcript preview: {}...\n", "word ".repeat(40))));
    assert!(full.contains("  Full transcript length: 500 characters\n"));

    let brief = render_part_brief(&part, 1);
    assert_eq!(brief, "\nChunk 001: 1 episode(s)\n  - Episode title 1\n");
}

// ============================================================================
// Combine
// ============================================================================

#[test]
fn test_combine_restores_episode_order() {
    let dir = tempfile::tempdir().unwrap();
    let original = episodes(5);
    split_episodes(&original, 2, dir.path()).unwrap();

    let combined = combine_parts(dir.path()).unwrap();
    assert_eq!(combined.metadata.total_episodes, 5);
    assert_eq!(combined.metadata.source_files, 3);
    assert_eq!(combined.episodes, original);
}

#[test]
fn test_combine_detects_tampered_part() {
    let dir = tempfile::tempdir().unwrap();
    split_episodes(&episodes(2), 1, dir.path()).unwrap();

    let path = dir.path().join(part_filename(2));
    let tampered = fs::read_to_string(&path).unwrap().replace("Guest 2", "Guest X");
    fs::write(&path, tampered).unwrap();

    let err = combine_parts(dir.path()).unwrap_err();
    assert!(err.to_string().contains("Checksum mismatch"));
}

#[test]
fn test_combine_rejects_traversal_in_index() {
    let dir = tempfile::tempdir().unwrap();
    split_episodes(&episodes(1), 1, dir.path()).unwrap();

    let mut index = PartsIndex::load(dir.path()).unwrap();
    index.parts[0].filename = "../knowledge_base.json".to_string();
    crate::artifact::write_json(&dir.path().join(PARTS_INDEX_FILE), &index).unwrap();

    let err = combine_parts(dir.path()).unwrap_err();
    assert!(err.to_string().contains("Parent directory traversal"));
}

#[test]
fn test_combine_detects_missing_episodes() {
    let dir = tempfile::tempdir().unwrap();
    split_episodes(&episodes(2), 1, dir.path()).unwrap();

    let mut index = PartsIndex::load(dir.path()).unwrap();
    index.metadata.total_episodes = 3;
    crate::artifact::write_json(&dir.path().join(PARTS_INDEX_FILE), &index).unwrap();

    let err = combine_parts(dir.path()).unwrap_err();
    assert!(err.to_string().contains("Episode count mismatch"));
}

#[test]
fn test_write_combined_creates_output() {
    let dir = tempfile::tempdir().unwrap();
    let parts_dir = dir.path().join("chunks");
    split_episodes(&episodes(2), 1, &parts_dir).unwrap();

    let output = dir.path().join("out/combined.json");
    write_combined(&parts_dir, &output).unwrap();

    let loaded: CombinedKnowledgeBase = crate::artifact::read_json(&output).unwrap();
    assert_eq!(loaded.episodes.len(), 2);
}
