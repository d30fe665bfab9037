//! String utilities for log lines and progress displays.

/// Truncate a string to a maximum byte length with ellipsis (UTF-8 safe)
///
/// Truncation always lands on a character boundary.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut end = max_len.saturating_sub(3).min(s.len());
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}

/// Single-line preview of a possibly multi-line answer
///
/// Whitespace runs (including newlines) collapse to one space before truncation.
pub fn preview(s: &str, max_len: usize) -> String {
    let flat = s.split_whitespace().collect::<Vec<_>>().join(" ");
    truncate(&flat, max_len)
}
