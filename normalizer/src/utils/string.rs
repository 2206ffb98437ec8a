//! String utility functions

use serde_json::Value as JsonValue;

/// Split a list attribute sent as a JSON array string or as comma-separated text.
///
/// Non-string JSON elements are skipped. A string that starts like an array
/// but does not parse is split on commas with brackets and quotes stripped,
/// so `["stop", "length"` still yields both entries.
pub fn parse_string_array(value: &str) -> Vec<String> {
    let trimmed = value.trim();
    if let Ok(JsonValue::Array(items)) = serde_json::from_str::<JsonValue>(trimmed) {
        return items
            .into_iter()
            .filter_map(|item| match item {
                JsonValue::String(s) => Some(s),
                _ => None,
            })
            .collect();
    }

    trimmed
        .trim_start_matches('[')
        .trim_end_matches(']')
        .split(',')
        .map(|part| part.trim().trim_matches('"').trim())
        .filter(|part| !part.is_empty())
        .map(String::from)
        .collect()
}

/// Byte-bounded preview of a raw value for log fields (never splits a UTF-8 char).
pub fn truncate_for_log(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let end = (0..=max_len)
        .rev()
        .find(|i| s.is_char_boundary(*i))
        .unwrap_or(0);
    format!("{}...", &s[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_array() {
        assert_eq!(parse_string_array(r#"["stop", "length"]"#), vec!["stop", "length"]);
        assert_eq!(parse_string_array(r#"["stop", 3, null]"#), vec!["stop"]);
    }

    #[test]
    fn test_comma_separated() {
        assert_eq!(parse_string_array("stop, tool-calls"), vec!["stop", "tool-calls"]);
        assert_eq!(parse_string_array("stop"), vec!["stop"]);
    }

    #[test]
    fn test_unterminated_array_falls_back_to_split() {
        assert_eq!(parse_string_array(r#"["stop", "length""#), vec!["stop", "length"]);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(parse_string_array("").is_empty());
        assert!(parse_string_array("  ").is_empty());
        assert!(parse_string_array("[]").is_empty());
    }

    #[test]
    fn test_truncate_for_log() {
        assert_eq!(truncate_for_log("short", 10), "short");
        assert_eq!(truncate_for_log("abcdefghij", 4), "abcd...");
        // "é" is two bytes
        assert_eq!(truncate_for_log("éé", 3), "é...");
    }
}
