/// First `max_chars` characters of `text`, never splitting a character
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Preview of `text`: the first `max_chars` characters plus "..." when cut
pub fn preview(text: &str, max_chars: usize) -> String {
    let head = truncate_chars(text, max_chars);
    if head.len() < text.len() {
        format!("{}...", head)
    } else {
        head.to_string()
    }
}

/// Format an integer with comma thousands separators (1234567 -> "1,234,567")
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format a count stored as a float (e.g., view counts) with separators
pub fn group_thousands_f64(value: f64) -> String {
    if value.is_finite() && value > 0.0 {
        group_thousands(value.round() as u64)
    } else {
        "0".to_string()
    }
}
