//! 文本处理工具

/// Returns the longest prefix of `text` holding at most `limit` characters.
///
/// Counts Unicode scalar values, so the cut never lands inside a multi-byte character.
pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

/// Trims every line and keeps the non-blank ones, in order.
pub fn non_blank_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
