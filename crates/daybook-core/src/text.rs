//! Display helpers for block text

/// Collapse whitespace runs to single spaces and truncate to `max` chars,
/// ending with `…` when cut
pub fn shorten(text: &str, max: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max {
        return collapsed;
    }
    let mut out: String = collapsed.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_untouched() {
        assert_eq!(shorten("hello", 10), "hello");
    }

    #[test]
    fn test_whitespace_collapsed() {
        assert_eq!(shorten("  a \n\n b\tc  ", 10), "a b c");
    }

    #[test]
    fn test_truncated_with_ellipsis() {
        assert_eq!(shorten("abcdefghij", 5), "abcd…");
        assert_eq!(shorten("abcdefghij", 5).chars().count(), 5);
    }

    #[test]
    fn test_counts_chars_not_bytes() {
        assert_eq!(shorten("가나다라마", 5), "가나다라마");
        assert_eq!(shorten("가나다라마바", 5), "가나다라…");
    }
}
