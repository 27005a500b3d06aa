use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use utoipa::ToSchema;

use crate::identity::SubmissionId;
use crate::models::ContactRequest;
use crate::sanitize::sanitize_input;

pub const DEFAULT_COMPANY: &str = "Not provided";
pub const DEFAULT_SERVICE: &str = "General Inquiry";
pub const UNKNOWN_IP: &str = "unknown";
pub const UNKNOWN_USER_AGENT: &str = "Unknown";
pub const DIRECT_REFERRER: &str = "Direct";

/// Review status of a stored submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    #[default]
    New,
}

impl Display for SubmissionStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            SubmissionStatus::New => write!(f, "new"),
        }
    }
}

/// Where a submission came from, as seen by the server.
///
/// `user_agent` and `referrer` are header values used only when the body
/// does not carry its own.
#[derive(Debug, Clone, Default)]
pub struct Provenance {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
}

/// An accepted contact form submission. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    #[schema(value_type = String, example = "sub_1714558830123_k3j9x2")]
    pub id: SubmissionId,
    pub name: String,
    pub email: String,
    pub company: String,
    pub service: String,
    pub message: String,
    #[serde(with = "crate::timestamp::iso_millis_serde")]
    #[schema(value_type = String, example = "2024-05-01T10:20:30.123Z")]
    pub submitted_at: DateTime<Utc>,
    pub ip_address: String,
    pub user_agent: String,
    pub referrer: String,
    pub status: SubmissionStatus,
    pub source: String,
}

impl Submission {
    /// Build the stored record from a request that already passed validation.
    ///
    /// Every textual field is sanitized; optional fields that are missing,
    /// non-textual, or empty after sanitizing take their defaults.
    pub fn from_request(
        id: SubmissionId,
        request: &ContactRequest,
        provenance: &Provenance,
        source: &str,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        let fields = request.fields();
        let header_text = |value: &Option<String>| {
            value
                .as_deref()
                .map(sanitize_input)
                .filter(|s| !s.is_empty())
        };

        Submission {
            id,
            name: fields.name.map(sanitize_input).unwrap_or_default(),
            email: fields.email.map(sanitize_input).unwrap_or_default(),
            company: request
                .sanitized_company()
                .unwrap_or_else(|| DEFAULT_COMPANY.to_string()),
            service: request
                .sanitized_service()
                .unwrap_or_else(|| DEFAULT_SERVICE.to_string()),
            message: fields.message.map(sanitize_input).unwrap_or_default(),
            submitted_at,
            ip_address: header_text(&provenance.ip_address)
                .unwrap_or_else(|| UNKNOWN_IP.to_string()),
            user_agent: request
                .sanitized_user_agent()
                .or_else(|| header_text(&provenance.user_agent))
                .unwrap_or_else(|| UNKNOWN_USER_AGENT.to_string()),
            referrer: request
                .sanitized_referrer()
                .or_else(|| header_text(&provenance.referrer))
                .unwrap_or_else(|| DIRECT_REFERRER.to_string()),
            status: SubmissionStatus::New,
            source: source.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn id() -> SubmissionId {
        SubmissionId::parse("sub_1714558830123_k3j9x2").unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_714_558_830_123).unwrap()
    }

    #[test]
    fn test_defaults_for_missing_optionals() {
        let request = ContactRequest::from_value(json!({
            "name": "Jo",
            "email": "a@b.com",
            "message": "1234567890"
        }));

        let submission = Submission::from_request(
            id(),
            &request,
            &Provenance::default(),
            "website_contact_form",
            now(),
        );

        assert_eq!(submission.company, "Not provided");
        assert_eq!(submission.service, "General Inquiry");
        assert_eq!(submission.ip_address, "unknown");
        assert_eq!(submission.user_agent, "Unknown");
        assert_eq!(submission.referrer, "Direct");
        assert_eq!(submission.status, SubmissionStatus::New);
        assert_eq!(submission.source, "website_contact_form");
    }

    #[test]
    fn test_fields_are_sanitized() {
        let request = ContactRequest::from_value(json!({
            "name": "  O'Brien  ",
            "email": " ob@example.com ",
            "company": "<Acme>",
            "service": "\"cfo\"",
            "message": "Hello <b>there</b>, friend",
            "referrer": "<>",
        }));
        let provenance = Provenance {
            ip_address: Some("203.0.113.7".to_string()),
            user_agent: Some("Mozilla/5.0".to_string()),
            referrer: Some("https://example.com/pricing".to_string()),
        };

        let submission = Submission::from_request(id(), &request, &provenance, "site", now());

        assert_eq!(submission.name, "OBrien");
        assert_eq!(submission.email, "ob@example.com");
        assert_eq!(submission.company, "Acme");
        assert_eq!(submission.service, "cfo");
        assert_eq!(submission.message, "Hello bthere/b, friend");
        assert_eq!(submission.ip_address, "203.0.113.7");
        // Header values fill in what the body lacks
        assert_eq!(submission.user_agent, "Mozilla/5.0");
        assert_eq!(submission.referrer, "https://example.com/pricing");
    }

    #[test]
    fn test_body_provenance_wins_over_headers() {
        let request = ContactRequest::from_value(json!({
            "name": "Jo",
            "email": "a@b.com",
            "message": "1234567890",
            "userAgent": "FormClient/1.0",
            "referrer": "https://example.com/"
        }));
        let provenance = Provenance {
            ip_address: None,
            user_agent: Some("curl/8.0".to_string()),
            referrer: Some("https://other.example/".to_string()),
        };

        let submission = Submission::from_request(id(), &request, &provenance, "site", now());
        assert_eq!(submission.user_agent, "FormClient/1.0");
        assert_eq!(submission.referrer, "https://example.com/");
    }

    #[test]
    fn test_serialized_shape() {
        let request = ContactRequest::from_value(json!({
            "name": "Jo",
            "email": "a@b.com",
            "message": "1234567890"
        }));
        let submission = Submission::from_request(
            id(),
            &request,
            &Provenance::default(),
            "website_contact_form",
            now(),
        );

        let value = serde_json::to_value(&submission).unwrap();
        assert_eq!(value["id"], json!("sub_1714558830123_k3j9x2"));
        assert_eq!(value["submittedAt"], json!("2024-05-01T10:20:30.123Z"));
        assert_eq!(value["ipAddress"], json!("unknown"));
        assert_eq!(value["status"], json!("new"));

        let back: Submission = serde_json::from_value(value).unwrap();
        assert_eq!(back, submission);
    }
}
