//! Contact submission pipeline
//!
//! `ReceivingRequest -> Validating -> Persisting -> Responding`. Validation
//! failures go straight back to the visitor. Any other failure is recorded
//! in the error log (best effort) with the stage it happened in, and only
//! the generic message reaches the client.

use chrono::{DateTime, Utc};
use inquiry_core::models::{
    ContactRequest, ContactSuccess, ErrorLogEntry, Provenance, Submission, SubmissionStage,
    FORM_SUBMISSION_EVENT, GENERAL_SERVICE_KEY,
};
use inquiry_core::timestamp::iso_millis;
use inquiry_core::{validate_contact, AppError, SubmissionId};
use inquiry_storage::{StoreResult, SubmissionGateway};
use serde_json::Value;

#[derive(Clone)]
pub struct ContactService {
    gateway: SubmissionGateway,
    source: String,
}

/// A failure together with the stage that was running
struct StageFailure {
    stage: SubmissionStage,
    error: AppError,
}

impl StageFailure {
    fn at(stage: SubmissionStage) -> impl FnOnce(AppError) -> Self {
        move |error| StageFailure { stage, error }
    }
}

impl ContactService {
    pub fn new(gateway: SubmissionGateway, source: impl Into<String>) -> Self {
        Self {
            gateway,
            source: source.into(),
        }
    }

    /// Validate, store and count one submission.
    ///
    /// `body` is the parsed request body exactly as received; anything other
    /// than a JSON object is treated as an empty form.
    pub async fn submit(
        &self,
        body: Value,
        provenance: &Provenance,
    ) -> Result<ContactSuccess, AppError> {
        let now = Utc::now();
        tracing::debug!(stage = %SubmissionStage::ReceivingRequest, "Contact request received");

        let request = ContactRequest::from_value(body.clone());
        match self.process(&request, provenance, now).await {
            Ok(success) => Ok(success),
            Err(StageFailure {
                error: AppError::Validation(failure),
                ..
            }) => {
                tracing::debug!(
                    stage = %SubmissionStage::Validating,
                    rule = failure.code(),
                    "Contact request rejected"
                );
                Err(AppError::Validation(failure))
            }
            Err(StageFailure { stage, error }) => {
                tracing::error!(
                    stage = %stage,
                    error = %error.detailed_message(),
                    "Contact submission failed"
                );
                self.record_failure(&error, body, stage).await;
                Err(error)
            }
        }
    }

    async fn process(
        &self,
        request: &ContactRequest,
        provenance: &Provenance,
        now: DateTime<Utc>,
    ) -> Result<ContactSuccess, StageFailure> {
        validate_contact(&request.fields())
            .map_err(AppError::from)
            .map_err(StageFailure::at(SubmissionStage::Validating))?;

        let id = SubmissionId::generate(now);
        let submission = Submission::from_request(id, request, provenance, &self.source, now);

        self.persist(&submission)
            .await
            .map_err(AppError::from)
            .map_err(StageFailure::at(SubmissionStage::Persisting))?;

        tracing::info!(
            submission_id = %submission.id,
            stage = %SubmissionStage::Persisting,
            "Contact submission stored"
        );

        let service = request
            .sanitized_service()
            .unwrap_or_else(|| GENERAL_SERVICE_KEY.to_string());
        self.gateway
            .record_analytics(FORM_SUBMISSION_EVENT, &service, now)
            .await
            .log_failure("Recording submission analytics");

        tracing::debug!(
            submission_id = %submission.id,
            stage = %SubmissionStage::Responding,
            "Responding to contact submission"
        );
        Ok(ContactSuccess::new(
            submission.id.into_string(),
            iso_millis(&now),
        ))
    }

    /// Both writes are required; a stored but unindexed record is still a failure
    async fn persist(&self, submission: &Submission) -> StoreResult<()> {
        self.gateway.put_submission(submission).await?;
        self.gateway.index_submission(&submission.id).await
    }

    async fn record_failure(&self, error: &AppError, body: Value, stage: SubmissionStage) {
        let now = Utc::now();
        let entry = ErrorLogEntry {
            error: error.to_string(),
            stack: error.source_chain(),
            timestamp: iso_millis(&now),
            request_body: body,
            stage,
        };
        self.gateway
            .log_error(&entry, now)
            .await
            .log_failure("Writing error log entry");
    }
}
