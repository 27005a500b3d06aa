//! Shared key generation for store backends.

use std::time::Duration;

/// Stored submission
/// Format: contact:{submission_id}
/// Value: JSON-serialized Submission
/// TTL: None
pub const SUBMISSION_PREFIX: &str = "contact";

/// Submission index (list, newest first)
/// Value: submission ids
/// TTL: None
pub const SUBMISSION_INDEX: &str = "contact_submissions";

/// Daily analytics counters
/// Format: analytics:{event_type}:{YYYY-MM-DD}
/// Value: JSON-serialized AnalyticsCounter
pub const ANALYTICS_PREFIX: &str = "analytics";

/// Error log entries
/// Format: error:{epoch_millis}
/// Value: JSON-serialized ErrorLogEntry
pub const ERROR_PREFIX: &str = "error";

/// TTL constants
pub mod ttl {
    use super::Duration;

    /// Analytics counter retention (90 days)
    pub const ANALYTICS_SECS: u64 = 60 * 60 * 24 * 90;

    /// Error log retention (7 days)
    pub const ERROR_LOG_SECS: u64 = 60 * 60 * 24 * 7;

    pub const ANALYTICS: Duration = Duration::from_secs(ANALYTICS_SECS);
    pub const ERROR_LOG: Duration = Duration::from_secs(ERROR_LOG_SECS);
}

pub fn submission_key(submission_id: &str) -> String {
    format!("{}:{}", SUBMISSION_PREFIX, submission_id)
}

pub fn analytics_key(event_type: &str, day: &str) -> String {
    format!("{}:{}:{}", ANALYTICS_PREFIX, event_type, day)
}

pub fn error_key(epoch_millis: i64) -> String {
    format!("{}:{}", ERROR_PREFIX, epoch_millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_layout() {
        assert_eq!(submission_key("sub_1_abcdef"), "contact:sub_1_abcdef");
        assert_eq!(
            analytics_key("form_submission", "2024-05-01"),
            "analytics:form_submission:2024-05-01"
        );
        assert_eq!(error_key(1714558830123), "error:1714558830123");
        assert_eq!(ttl::ANALYTICS.as_secs(), 7_776_000);
        assert_eq!(ttl::ERROR_LOG.as_secs(), 604_800);
    }
}
