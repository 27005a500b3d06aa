//! Input sanitization for free-text form fields.
//!
//! Sanitized values are stored verbatim and later rendered in operator
//! tooling, so the characters that open HTML tags or attribute values are
//! removed and the length is capped.

use serde_json::Value;

/// Maximum length (in `char`s, not UTF-16 units) of any sanitized field.
pub const MAX_SANITIZED_LENGTH: usize = 1000;

const STRIPPED_CHARS: [char; 4] = ['<', '>', '"', '\''];

/// Sanitize a single textual value.
///
/// Trims surrounding whitespace, removes `<`, `>`, `"` and `'`, and truncates
/// to [`MAX_SANITIZED_LENGTH`] characters. Whitespace exposed by the removal
/// or by the cut is trimmed as well, which makes the function idempotent.
pub fn sanitize_input(input: &str) -> String {
    let stripped: String = input
        .trim()
        .chars()
        .filter(|c| !STRIPPED_CHARS.contains(c))
        .collect();

    let truncated: String = stripped.trim().chars().take(MAX_SANITIZED_LENGTH).collect();

    truncated.trim_end().to_string()
}

/// Sanitize a raw JSON value: strings are sanitized, every other type is
/// returned unchanged.
pub fn sanitize_value(value: &Value) -> Value {
    match value {
        Value::String(s) => Value::String(sanitize_input(s)),
        other => other.clone(),
    }
}

/// Sanitized text of an optional field.
///
/// Returns `None` when the field is missing, not a string, or empty once
/// sanitized, so callers can apply their own default.
pub fn sanitized_text(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(sanitize_input)
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sanitize_input_strips_dangerous_characters() {
        assert_eq!(
            sanitize_input("  <script>alert('x')</script>  "),
            "scriptalert(x)/script"
        );
        assert_eq!(sanitize_input("say \"hi\""), "say hi");
    }

    #[test]
    fn test_sanitize_input_truncates() {
        let long = "a".repeat(1500);
        assert_eq!(sanitize_input(&long).chars().count(), MAX_SANITIZED_LENGTH);
    }

    #[test]
    fn test_sanitize_input_counts_characters_not_bytes() {
        let long = "é".repeat(1200);
        let out = sanitize_input(&long);
        assert_eq!(out.chars().count(), MAX_SANITIZED_LENGTH);
    }

    #[test]
    fn test_sanitize_input_is_idempotent() {
        let samples = [
            "< hi",
            "  plain text  ",
            "'quoted' > stuff <",
            "",
            "   ",
            "\"\"\"",
        ];
        for sample in samples {
            let once = sanitize_input(sample);
            assert_eq!(sanitize_input(&once), once, "sample: {:?}", sample);
            assert!(once.chars().count() <= sample.chars().count());
        }

        // Truncation landing on a space
        let mut cut_on_space = "b".repeat(MAX_SANITIZED_LENGTH - 1);
        cut_on_space.push(' ');
        cut_on_space.push_str("tail");
        let once = sanitize_input(&cut_on_space);
        assert_eq!(sanitize_input(&once), once);
    }

    #[test]
    fn test_sanitize_value_leaves_non_text_unchanged() {
        assert_eq!(sanitize_value(&json!(42)), json!(42));
        assert_eq!(sanitize_value(&json!(null)), json!(null));
        assert_eq!(sanitize_value(&json!(["<a>"])), json!(["<a>"]));
        assert_eq!(sanitize_value(&json!(" <b> ")), json!("b"));
    }

    #[test]
    fn test_sanitized_text() {
        assert_eq!(sanitized_text(Some(&json!(" Acme "))), Some("Acme".to_string()));
        assert_eq!(sanitized_text(Some(&json!("<>"))), None);
        assert_eq!(sanitized_text(Some(&json!(7))), None);
        assert_eq!(sanitized_text(None), None);
    }
}
