use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{Display, Formatter, Result as FmtResult};
use utoipa::ToSchema;

/// Steps of handling one contact request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStage {
    ReceivingRequest,
    Validating,
    Persisting,
    Responding,
    Failed,
}

impl Display for SubmissionStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            SubmissionStage::ReceivingRequest => write!(f, "receiving_request"),
            SubmissionStage::Validating => write!(f, "validating"),
            SubmissionStage::Persisting => write!(f, "persisting"),
            SubmissionStage::Responding => write!(f, "responding"),
            SubmissionStage::Failed => write!(f, "failed"),
        }
    }
}

/// Diagnostic record of a request that ended in an internal error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorLogEntry {
    pub error: String,
    /// Source chain of the error, one cause per line
    pub stack: String,
    pub timestamp: String,
    /// Body exactly as received
    #[schema(value_type = Object)]
    pub request_body: Value,
    /// Stage that was running when the failure happened
    pub stage: SubmissionStage,
}
