//! String utilities for the domain layer.

/// Keep the last `max_len` bytes of a string, prefixed with an ellipsis.
///
/// Build and CLI output put the interesting part (errors) at the end.
pub fn truncate_head(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let target = max_len.saturating_sub(3);
        let mut start = s.len() - target;
        while start < s.len() && !s.is_char_boundary(start) {
            start += 1;
        }
        format!("...{}", &s[start..])
    }
}
