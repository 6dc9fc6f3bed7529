//! Shared string helpers.

/// Longest prefix of `s` that fits in `max_bytes` and ends on a char boundary.
///
/// Used to keep log previews of model output short.
pub fn truncate_str(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_ascii() {
        assert_eq!(truncate_str("overview text", 8), "overview");
    }

    #[test]
    fn truncate_short_input_unchanged() {
        assert_eq!(truncate_str("ok", 10), "ok");
    }

    #[test]
    fn truncate_backs_off_inside_hangul() {
        // Each syllable is 3 bytes
        let s = "고소인";
        assert_eq!(truncate_str(s, 4), "고");
        assert_eq!(truncate_str(s, 6), "고소");
        assert_eq!(truncate_str(s, 9), "고소인");
    }

    #[test]
    fn truncate_empty() {
        assert_eq!(truncate_str("", 3), "");
    }
}
