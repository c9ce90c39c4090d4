// Topic labels — normalization, interest extraction, and overlap scoring.

pub mod interests;
pub mod overlap;

use std::collections::BTreeSet;

/// Normalize a topic label: trimmed and lowercased.
///
/// Adapters apply this on ingestion; the engine itself compares labels
/// exactly.
pub fn normalize_topic(label: &str) -> String {
    label.trim().to_lowercase()
}

/// Normalize a collection of labels, dropping any that end up empty.
pub fn normalize_topics<'a>(labels: impl IntoIterator<Item = &'a String>) -> BTreeSet<String> {
    labels
        .into_iter()
        .map(|l| normalize_topic(l))
        .filter(|l| !l.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_topic() {
        assert_eq!(normalize_topic("  GoLang "), "golang");
        assert_eq!(normalize_topic("rust"), "rust");
    }

    #[test]
    fn test_normalize_topics_dedupes_and_drops_blank() {
        let raw = vec!["Rust".to_string(), "rust ".to_string(), "   ".to_string()];
        let set = normalize_topics(&raw);
        assert_eq!(set.len(), 1);
        assert!(set.contains("rust"));
    }
}
