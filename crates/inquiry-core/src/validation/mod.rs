//! Validation modules

pub mod contact;

pub use contact::{
    contains_suspicious_content, is_valid_email, is_valid_name, validate_contact,
    validate_with_captcha, ContactFields, ValidationFailure, MAX_MESSAGE_LENGTH, MAX_NAME_LENGTH,
    MIN_MESSAGE_LENGTH, MIN_NAME_LENGTH, SUSPICIOUS_PHRASES,
};
