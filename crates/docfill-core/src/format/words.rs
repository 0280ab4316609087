/// Default word cap for long-text fields
pub const WORD_LIMIT: usize = 50;

/// Name fragments that mark a text field as long-form
pub const LONG_TEXT_KEYS: [&str; 4] = ["address", "description", "scope", "services"];

/// Cap `text` at `max_words` whitespace-separated words
///
/// Returns the (possibly truncated) text and its word count. Text within the
/// limit comes back untouched, original spacing included; truncated text is
/// rejoined with single spaces and reports exactly `max_words`.
pub fn limit_words(text: &str, max_words: usize) -> (String, usize) {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() > max_words {
        (words[..max_words].join(" "), max_words)
    } else {
        (text.to_string(), words.len())
    }
}

/// Whether a field name contains any long-text key, ignoring case
pub fn is_long_text_field<S: AsRef<str>>(name: &str, keys: &[S]) -> bool {
    let name = name.to_lowercase();
    keys.iter()
        .any(|key| name.contains(&key.as_ref().to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncates_over_limit() {
        assert_eq!(limit_words("a b c d e", 3), ("a b c".to_string(), 3));
    }

    #[test]
    fn test_under_limit_is_unchanged() {
        assert_eq!(limit_words("a b", 3), ("a b".to_string(), 2));
    }

    #[test]
    fn test_under_limit_keeps_spacing() {
        assert_eq!(limit_words("  a\n\nb  ", 3), ("  a\n\nb  ".to_string(), 2));
    }

    #[test]
    fn test_truncation_collapses_whitespace() {
        assert_eq!(limit_words("one\ttwo   three four", 2), ("one two".to_string(), 2));
    }

    #[test]
    fn test_empty_text_has_no_words() {
        assert_eq!(limit_words("", WORD_LIMIT), (String::new(), 0));
        assert_eq!(limit_words("   ", WORD_LIMIT), ("   ".to_string(), 0));
    }

    #[test]
    fn test_exactly_at_limit() {
        assert_eq!(limit_words("a b c", 3), ("a b c".to_string(), 3));
    }

    #[test]
    fn test_long_text_detection() {
        assert!(is_long_text_field("Registered_Address", &LONG_TEXT_KEYS));
        assert!(is_long_text_field("scope_of_work", &LONG_TEXT_KEYS));
        assert!(is_long_text_field("ServicesRendered", &LONG_TEXT_KEYS));
        assert!(!is_long_text_field("client_name", &LONG_TEXT_KEYS));
    }

    #[test]
    fn test_long_text_detection_with_custom_keys() {
        let keys = vec!["Remarks".to_string()];
        assert!(is_long_text_field("auditor_remarks", &keys));
        assert!(!is_long_text_field("registered_address", &keys));
    }
}
