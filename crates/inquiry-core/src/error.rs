//! Error types module
//!
//! All failures the contact pipeline can surface are unified under
//! [`AppError`]. Each variant self-describes its HTTP presentation through
//! [`ErrorMetadata`] so the API layer renders every error the same way.

use crate::validation::ValidationFailure;

/// Client-facing text for any unexpected failure
pub const INTERNAL_ERROR_MESSAGE: &str =
    "Internal server error. Please try again later or contact us directly.";

/// Client-facing text for requests with an unsupported method
pub const METHOD_NOT_ALLOWED_MESSAGE: &str =
    "Method not allowed. Only POST requests are accepted.";

/// Client-facing text for bodies over the configured size limit
pub const PAYLOAD_TOO_LARGE_MESSAGE: &str = "Request body too large.";

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "STORE_ERROR")
    fn error_code(&self) -> &'static str;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details must be kept out of responses
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationFailure),

    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

/// Static metadata for each variant: (http_status, error_code, sensitive, log_level).
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, bool, LogLevel) {
    match err {
        AppError::Validation(_) => (400, "VALIDATION_ERROR", false, LogLevel::Debug),
        AppError::MethodNotAllowed(_) => (405, "METHOD_NOT_ALLOWED", false, LogLevel::Debug),
        AppError::PayloadTooLarge(_) => (413, "PAYLOAD_TOO_LARGE", false, LogLevel::Warn),
        AppError::Store(_) => (500, "STORE_ERROR", true, LogLevel::Error),
        AppError::Serialization(_) => (500, "SERIALIZATION_ERROR", true, LogLevel::Error),
        AppError::InternalWithSource { .. } => (500, "INTERNAL_ERROR", true, LogLevel::Error),
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Validation(failure) => failure.to_string(),
            AppError::MethodNotAllowed(_) => METHOD_NOT_ALLOWED_MESSAGE.to_string(),
            AppError::PayloadTooLarge(_) => PAYLOAD_TOO_LARGE_MESSAGE.to_string(),
            _ => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).3
    }
}

impl AppError {
    /// Full error text including the source chain, for logs only
    pub fn detailed_message(&self) -> String {
        let mut message = self.to_string();
        if let AppError::InternalWithSource { message: m, .. } = self {
            message = m.clone();
        }

        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            let text = cause.to_string();
            if !message.contains(&text) {
                message.push_str(": ");
                message.push_str(&text);
            }
            source = cause.source();
        }
        message
    }

    /// Source chain rendered one cause per line, stored as the `stack` of
    /// error log entries
    pub fn source_chain(&self) -> String {
        let mut lines = vec![format!("{:?}", self)];
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            lines.push(format!("caused by: {}", cause));
            source = cause.source();
        }
        lines.join("\n")
    }
}
