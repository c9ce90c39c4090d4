// Output formatting — terminal display.

pub mod terminal;

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
///
/// Respects UTF-8 character boundaries, so usernames and topic labels with
/// multi-byte characters never panic.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars_short_and_multibyte() {
        assert_eq!(truncate_chars("rust", 10), "rust");
        assert_eq!(truncate_chars("cafécafé", 4), "café...");
        assert_eq!(truncate_chars("日本語テキスト", 3), "日本語...");
    }
}
