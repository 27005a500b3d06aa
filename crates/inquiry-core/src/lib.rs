//! Inquiry Core Library
//!
//! Domain models, the canonical contact-form rule set, sanitization, CAPTCHA
//! challenges, submission identity, configuration and the error taxonomy
//! shared by the server, the client and the CLI.

pub mod captcha;
pub mod config;
pub mod error;
pub mod identity;
pub mod models;
pub mod sanitize;
pub mod store_types;
pub mod timestamp;
pub mod validation;

// Re-export commonly used types
pub use captcha::{CaptchaSession, Challenge, Operator};
pub use config::{Config, LogFormat};
pub use error::{
    AppError, ErrorMetadata, LogLevel, INTERNAL_ERROR_MESSAGE, METHOD_NOT_ALLOWED_MESSAGE,
    PAYLOAD_TOO_LARGE_MESSAGE,
};
pub use identity::{IdentityError, SubmissionId};
pub use sanitize::{sanitize_input, sanitize_value, sanitized_text};
pub use store_types::StoreBackend;
pub use validation::{validate_contact, ContactFields, ValidationFailure};
