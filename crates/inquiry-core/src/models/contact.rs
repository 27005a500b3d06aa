use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::sanitize::sanitized_text;
use crate::validation::ContactFields;

/// Text shown to the visitor after an accepted submission
pub const SUCCESS_MESSAGE: &str = "Your message has been received successfully!";

/// Body of `POST /api/contact` as received.
///
/// Every field is kept as raw JSON so the rules can tell a missing field from
/// one with the wrong type. JSON `null` counts as missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactRequest {
    #[schema(value_type = Option<String>, example = "Jane Doe")]
    pub name: Option<Value>,
    #[schema(value_type = Option<String>, example = "jane@example.com")]
    pub email: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub company: Option<Value>,
    #[schema(value_type = Option<String>, example = "bookkeeping")]
    pub service: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub message: Option<Value>,
    /// Accepted for compatibility; never checked by the server
    #[schema(value_type = Option<String>)]
    pub captcha_answer: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub timestamp: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub user_agent: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub referrer: Option<Value>,
}

impl ContactRequest {
    /// Interpret an arbitrary JSON document as a request.
    ///
    /// Anything that is not an object yields a request with every field
    /// missing, which the rules reject.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
            _ => ContactRequest::default(),
        }
    }

    /// The textual view the validator runs on
    pub fn fields(&self) -> ContactFields<'_> {
        ContactFields {
            name: text(&self.name),
            email: text(&self.email),
            message: text(&self.message),
        }
    }

    pub fn sanitized_company(&self) -> Option<String> {
        sanitized_text(self.company.as_ref())
    }

    pub fn sanitized_service(&self) -> Option<String> {
        sanitized_text(self.service.as_ref())
    }

    pub fn sanitized_user_agent(&self) -> Option<String> {
        sanitized_text(self.user_agent.as_ref())
    }

    pub fn sanitized_referrer(&self) -> Option<String> {
        sanitized_text(self.referrer.as_ref())
    }
}

fn text(value: &Option<Value>) -> Option<&str> {
    value.as_ref().and_then(Value::as_str)
}

/// Typed form payload sent by the form client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactPayload {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    pub message: String,
    pub captcha_answer: i64,
    pub timestamp: String,
    pub user_agent: String,
    pub referrer: String,
}

/// Accepted submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactSuccess {
    pub success: bool,
    #[schema(example = "Your message has been received successfully!")]
    pub message: String,
    #[schema(example = "sub_1714558830123_k3j9x2")]
    pub submission_id: String,
    #[schema(example = "2024-05-01T10:20:30.123Z")]
    pub timestamp: String,
}

impl ContactSuccess {
    pub fn new(submission_id: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            success: true,
            message: SUCCESS_MESSAGE.to_string(),
            submission_id: submission_id.into(),
            timestamp: timestamp.into(),
        }
    }
}

/// Rejected or failed submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ContactFailure {
    pub success: bool,
    #[schema(example = "Please enter a valid email address.")]
    pub error: String,
}

impl ContactFailure {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// Either outcome of `POST /api/contact`, as read back by a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContactReply {
    Success(ContactSuccess),
    Failure(ContactFailure),
}

impl ContactReply {
    pub fn is_success(&self) -> bool {
        matches!(self, ContactReply::Success(s) if s.success)
    }
}

/// Body returned for CORS preflight requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PreflightResponse {
    #[schema(example = "OK")]
    pub message: String,
}

impl Default for PreflightResponse {
    fn default() -> Self {
        Self {
            message: "OK".to_string(),
        }
    }
}
