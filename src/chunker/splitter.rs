use serde::{Deserialize, Serialize};

use super::{ChunkConfig, ChunkError, SENTENCE_BOUNDARIES};

/// A trimmed window of source text, tagged with its character offsets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Window content with surrounding whitespace removed
    pub text: String,
    /// Character offset of the first kept character (inclusive)
    pub start: usize,
    /// Character offset just past the last kept character (exclusive)
    pub end: usize,
}

impl Chunk {
    /// Length of the chunk in characters
    pub fn char_len(&self) -> usize {
        self.end - self.start
    }
}

/// Split text into overlapping windows for embedding:
/// - Windows hold at most `chunk_size` characters
/// - A window that does not reach the end of the text is cut after the last
///   sentence boundary, if that boundary lies past half the window
/// - Whitespace is trimmed from each window and all-whitespace windows are
///   dropped, so no chunk is empty
/// - The next window starts `overlap` characters before the previous window
///   ended, measured from the cut point or from `start + chunk_size`
///
/// Offsets are character (not byte) positions, so `text[start..end]` taken
/// over `text.chars()` reproduces `Chunk::text` exactly.
pub fn chunk_text(text: &str, config: ChunkConfig) -> Result<Vec<Chunk>, ChunkError> {
    config.validate()?;

    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < len {
        // Unclamped: the advance is measured from here even past the end
        let mut end = start.saturating_add(config.chunk_size);

        // More text follows: try to stop at a sentence boundary
        if end < len {
            if let Some(boundary) = rightmost_boundary(&chars[start..end]) {
                if boundary * 2 > config.chunk_size {
                    end = start + boundary + 1;
                }
            }
        }

        if let Some(chunk) = trimmed_chunk(&chars, start, end.min(len)) {
            push_chunk(&mut chunks, chunk);
        }

        start = next_start(start, end, &config);
    }

    Ok(chunks)
}

/// Append a chunk, keeping starts strictly increasing.
///
/// A window opening inside the previous chunk's leading whitespace trims to
/// the same start; the longer of the two is kept.
fn push_chunk(chunks: &mut Vec<Chunk>, chunk: Chunk) {
    match chunks.last_mut() {
        Some(last) if chunk.start <= last.start => {
            if chunk.end > last.end {
                *last = chunk;
            }
        }
        _ => chunks.push(chunk),
    }
}

/// Index of the rightmost sentence boundary within a window
fn rightmost_boundary(window: &[char]) -> Option<usize> {
    SENTENCE_BOUNDARIES
        .iter()
        .filter_map(|marker| {
            let marker: Vec<char> = marker.chars().collect();
            window
                .windows(marker.len())
                .rposition(|candidate| candidate == marker.as_slice())
        })
        .max()
}

/// Trim a window and map the kept span back to source offsets
fn trimmed_chunk(chars: &[char], start: usize, end: usize) -> Option<Chunk> {
    let window = &chars[start..end];
    let leading = window.iter().take_while(|c| c.is_whitespace()).count();
    if leading == window.len() {
        return None;
    }
    let trailing = window.iter().rev().take_while(|c| c.is_whitespace()).count();

    let chunk_start = (start + leading).min(chars.len());
    let chunk_end = end.saturating_sub(trailing).clamp(chunk_start, chars.len());

    Some(Chunk {
        text: chars[chunk_start..chunk_end].iter().collect(),
        start: chunk_start,
        end: chunk_end,
    })
}

/// Step back by the overlap, but never stall or move backwards
fn next_start(start: usize, end: usize, config: &ChunkConfig) -> usize {
    let next = end.saturating_sub(config.overlap);
    if next > start {
        next
    } else {
        start + config.stride()
    }
}
