//! Contact form validation
//!
//! The single rule set for contact submissions. The server runs it on every
//! request; the form client runs the same rules (plus the CAPTCHA check) to
//! give feedback before anything is sent.
//!
//! Rules run in a fixed order and stop at the first failure:
//! 1. name present, at least 2 characters once trimmed
//! 2. email shaped like `local@domain.tld`
//! 3. message present, at least 10 characters once trimmed
//! 4. name limited to letters, whitespace, `.`, `'` and `-`
//! 5. no spam phrases in name or message
//! 6. name at most 100 characters, message at most 2000

use regex::Regex;
use std::sync::LazyLock;

// Lengths here count Unicode scalar values, not UTF-16 code units, so a
// browser-side counter can disagree for emoji and other astral characters.

/// Minimum trimmed length of the name field
pub const MIN_NAME_LENGTH: usize = 2;

/// Minimum trimmed length of the message field
pub const MIN_MESSAGE_LENGTH: usize = 10;

/// Maximum raw length of the name field
pub const MAX_NAME_LENGTH: usize = 100;

/// Maximum raw length of the message field
pub const MAX_MESSAGE_LENGTH: usize = 2000;

/// Phrases that mark a submission as spam (matched case-insensitively as substrings)
pub const SUSPICIOUS_PHRASES: &[&str] = &[
    "viagra",
    "casino",
    "loan",
    "crypto",
    "bitcoin",
    "investment opportunity",
    "make money fast",
    "click here",
    "limited time offer",
    "act now",
    "congratulations",
];

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\s.'-]+$").expect("name pattern is valid"));

/// A rejected submission. The display text is the exact message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationFailure {
    #[error("Please enter your full name (at least 2 characters).")]
    NameRequired,

    #[error("Please enter a valid email address.")]
    InvalidEmail,

    #[error("Please enter a message (at least 10 characters).")]
    MessageRequired,

    #[error("Please enter a valid name (letters, spaces, dots, apostrophes, and hyphens only).")]
    InvalidNameFormat,

    #[error("Your message contains content that cannot be processed. Please revise and try again.")]
    SuspiciousContent,

    #[error(
        "Input too long. Please keep name under 100 characters and message under 2000 characters."
    )]
    InputTooLong,

    /// Only produced by the form client; the server never sees the CAPTCHA.
    #[error("Please solve the math problem correctly.")]
    CaptchaMismatch,
}

impl ValidationFailure {
    /// Machine-readable code for logs
    pub fn code(&self) -> &'static str {
        match self {
            ValidationFailure::NameRequired => "name_required",
            ValidationFailure::InvalidEmail => "invalid_email",
            ValidationFailure::MessageRequired => "message_required",
            ValidationFailure::InvalidNameFormat => "invalid_name_format",
            ValidationFailure::SuspiciousContent => "suspicious_content",
            ValidationFailure::InputTooLong => "input_too_long",
            ValidationFailure::CaptchaMismatch => "captcha_mismatch",
        }
    }
}

/// Borrowed view of the fields the rules look at.
///
/// `None` means the field was missing or not textual.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContactFields<'a> {
    pub name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub message: Option<&'a str>,
}

/// Run the contact rules, returning the first failure.
pub fn validate_contact(fields: &ContactFields<'_>) -> Result<(), ValidationFailure> {
    let Some(name) = fields
        .name
        .filter(|n| n.trim().chars().count() >= MIN_NAME_LENGTH)
    else {
        return Err(ValidationFailure::NameRequired);
    };

    if !fields.email.is_some_and(is_valid_email) {
        return Err(ValidationFailure::InvalidEmail);
    }

    let Some(message) = fields
        .message
        .filter(|m| m.trim().chars().count() >= MIN_MESSAGE_LENGTH)
    else {
        return Err(ValidationFailure::MessageRequired);
    };

    if !is_valid_name(name.trim()) {
        return Err(ValidationFailure::InvalidNameFormat);
    }

    if contains_suspicious_content(name, message) {
        return Err(ValidationFailure::SuspiciousContent);
    }

    if name.chars().count() > MAX_NAME_LENGTH || message.chars().count() > MAX_MESSAGE_LENGTH {
        return Err(ValidationFailure::InputTooLong);
    }

    Ok(())
}

/// Client-side validation: the contact rules followed by the CAPTCHA answer.
pub fn validate_with_captcha(
    fields: &ContactFields<'_>,
    captcha_answer: i64,
    expected_answer: i64,
) -> Result<(), ValidationFailure> {
    validate_contact(fields)?;

    if captcha_answer != expected_answer {
        return Err(ValidationFailure::CaptchaMismatch);
    }

    Ok(())
}

/// Check the `local@domain.tld` shape
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Check the name character class (letters, whitespace, `.`, `'`, `-`)
pub fn is_valid_name(name: &str) -> bool {
    NAME_PATTERN.is_match(name)
}

/// Case-insensitive scan of `name + " " + message` for spam phrases
pub fn contains_suspicious_content(name: &str, message: &str) -> bool {
    let content = format!("{} {}", name, message).to_lowercase();
    SUSPICIOUS_PHRASES
        .iter()
        .any(|phrase| content.contains(phrase))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields<'a>(name: &'a str, email: &'a str, message: &'a str) -> ContactFields<'a> {
        ContactFields {
            name: Some(name),
            email: Some(email),
            message: Some(message),
        }
    }

    #[test]
    fn test_minimum_valid_submission() {
        assert_eq!(validate_contact(&fields("Jo", "a@b.com", "1234567890")), Ok(()));
    }

    #[test]
    fn test_name_required() {
        let missing = ContactFields {
            name: None,
            email: Some("a@b.com"),
            message: Some("hello there friend"),
        };
        assert_eq!(validate_contact(&missing), Err(ValidationFailure::NameRequired));
        assert_eq!(
            validate_contact(&fields(" J ", "a@b.com", "hello there friend")),
            Err(ValidationFailure::NameRequired)
        );
    }

    #[test]
    fn test_invalid_email() {
        let err = validate_contact(&fields("John Doe", "bad-email", "hello there friend"));
        assert_eq!(err, Err(ValidationFailure::InvalidEmail));
        assert_eq!(
            err.unwrap_err().to_string(),
            "Please enter a valid email address."
        );
    }

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last@sub.example.org"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("a@@b.com"));
        assert!(!is_valid_email("@b.com"));
        assert!(!is_valid_email("a@b."));
        assert!(!is_valid_email(" a@b.com"));
    }

    #[test]
    fn test_message_required() {
        assert_eq!(
            validate_contact(&fields("John", "a@b.com", "  too short ")),
            Err(ValidationFailure::MessageRequired)
        );
    }

    #[test]
    fn test_name_format() {
        assert_eq!(
            validate_contact(&fields("R2-D2", "a@b.com", "hello there friend")),
            Err(ValidationFailure::InvalidNameFormat)
        );
        assert_eq!(
            validate_contact(&fields("Mary-Jane O'Neil Jr.", "a@b.com", "hello there friend")),
            Ok(())
        );
    }

    #[test]
    fn test_suspicious_content() {
        let err = validate_contact(&fields(
            "John Doe",
            "a@b.com",
            "Ask about crypto investment opportunity today",
        ));
        assert_eq!(err, Err(ValidationFailure::SuspiciousContent));
        assert!(contains_suspicious_content("CASINO King", "hello"));
        // Phrases are matched across the name/message boundary
        assert!(contains_suspicious_content("Click", "here for details"));
        assert!(!contains_suspicious_content("John", "A perfectly fine question"));
    }

    #[test]
    fn test_input_too_long() {
        let long_message = "a".repeat(MAX_MESSAGE_LENGTH + 1);
        assert_eq!(
            validate_contact(&fields("John", "a@b.com", &long_message)),
            Err(ValidationFailure::InputTooLong)
        );

        let long_name = "a".repeat(MAX_NAME_LENGTH + 1);
        assert_eq!(
            validate_contact(&fields(&long_name, "a@b.com", "hello there friend")),
            Err(ValidationFailure::InputTooLong)
        );

        let max_message = "a".repeat(MAX_MESSAGE_LENGTH);
        assert_eq!(validate_contact(&fields("John", "a@b.com", &max_message)), Ok(()));

        // 2000 emoji are 4000 UTF-16 units but still within the limit
        let emoji_message = "🙂".repeat(MAX_MESSAGE_LENGTH);
        assert_eq!(validate_contact(&fields("John", "a@b.com", &emoji_message)), Ok(()));
    }

    #[test]
    fn test_first_failure_wins() {
        // Bad name format, bad email and short message: email check runs first
        assert_eq!(
            validate_contact(&fields("R2", "nope", "short")),
            Err(ValidationFailure::InvalidEmail)
        );
    }

    #[test]
    fn test_validate_with_captcha() {
        let valid = fields("Jane", "jane@example.com", "I would like a quote");
        assert_eq!(validate_with_captcha(&valid, 12, 12), Ok(()));
        assert_eq!(
            validate_with_captcha(&valid, 11, 12),
            Err(ValidationFailure::CaptchaMismatch)
        );

        // Form errors are reported before the CAPTCHA
        let invalid = fields("Jane", "jane", "I would like a quote");
        assert_eq!(
            validate_with_captcha(&invalid, 0, 12),
            Err(ValidationFailure::InvalidEmail)
        );
    }
}
