use super::TranscriptMetadata;

/// Header delimiter line content
const DELIMITER: &str = "---";

/// Split content into `(header, body)` around the first two delimiters
///
/// Returns `None` when fewer than two delimiters are present. The body keeps
/// any later delimiters verbatim and is trimmed.
pub fn split_frontmatter(content: &str) -> Option<(&str, &str)> {
    let mut parts = content.splitn(3, DELIMITER);
    let _preamble = parts.next()?;
    let header = parts.next()?;
    let body = parts.next()?;
    Some((header, body.trim()))
}

/// Parse a YAML-like header into metadata
///
/// Supports the subset transcript headers use:
/// - `key: value` on one line, with optional surrounding quotes
/// - `key: |` or `key:` followed by indented or colon-free continuation lines
pub fn parse_header(header: &str) -> TranscriptMetadata {
    let mut metadata = TranscriptMetadata::new();
    let mut block: Option<(String, Vec<&str>)> = None;

    for raw in header.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let indented = raw.starts_with(char::is_whitespace);
        match line.split_once(':') {
            Some((key, value)) if !indented => {
                if let Some((key, lines)) = block.take() {
                    metadata.insert(key, unquote(lines.join("\n").trim()));
                }

                let key = key.trim().to_string();
                let value = value.trim();
                if value.is_empty() || value.starts_with('|') {
                    block = Some((key, Vec::new()));
                } else {
                    metadata.insert(key, unquote(value));
                }
            }
            _ => {
                if let Some((_, lines)) = block.as_mut() {
                    lines.push(line);
                }
            }
        }
    }

    if let Some((key, lines)) = block {
        metadata.insert(key, unquote(lines.join("\n").trim()));
    }

    metadata
}

/// Strip one pair of matching surrounding quotes
fn unquote(value: &str) -> String {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return value[1..value.len() - 1].to_string();
        }
    }
    value.to_string()
}
