//! Display-string helpers shared by the renderers.

/// Keeps at most `max_chars` characters of `text`, never splitting a character.
pub fn clip(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Upper-cases the first character of a field name for use as a column header.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Length in characters, the unit column widths are measured in.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}
