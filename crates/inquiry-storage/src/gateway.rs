//! Persistence gateway
//!
//! The only code that knows how submissions, the submission index,
//! analytics counters and error log entries are laid out in the store.
//!
//! Writing the submission and indexing it are required: their failures are
//! returned to the caller. Analytics and error logging are bookkeeping: they
//! never fail the request, and report their outcome as a [`Bookkeeping`]
//! value instead.

use chrono::{DateTime, Utc};
use inquiry_core::models::{AnalyticsCounter, ErrorLogEntry, Submission};
use inquiry_core::timestamp::day_key;
use inquiry_core::SubmissionId;
use std::sync::Arc;

use crate::keys::{self, ttl};
use crate::traits::{KvStore, StoreError, StoreResult};

/// Outcome of a best-effort write
#[must_use]
#[derive(Debug)]
pub enum Bookkeeping {
    Recorded,
    Failed(StoreError),
}

impl Bookkeeping {
    pub fn is_recorded(&self) -> bool {
        matches!(self, Bookkeeping::Recorded)
    }

    /// Log a failed write at warn level; recorded writes are silent
    pub fn log_failure(&self, what: &str) {
        if let Bookkeeping::Failed(error) = self {
            tracing::warn!(error = %error, "{} failed", what);
        }
    }
}

impl From<StoreResult<()>> for Bookkeeping {
    fn from(result: StoreResult<()>) -> Self {
        match result {
            Ok(()) => Bookkeeping::Recorded,
            Err(e) => Bookkeeping::Failed(e),
        }
    }
}

#[derive(Clone)]
pub struct SubmissionGateway {
    store: Arc<dyn KvStore>,
}

impl SubmissionGateway {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn KvStore> {
        &self.store
    }

    /// Store the full submission under `contact:{id}`
    pub async fn put_submission(&self, submission: &Submission) -> StoreResult<()> {
        let value = serde_json::to_string(submission)?;
        self.store
            .set(&keys::submission_key(submission.id.as_str()), value, None)
            .await
    }

    /// Prepend the id to the submission index
    pub async fn index_submission(&self, id: &SubmissionId) -> StoreResult<()> {
        self.store
            .lpush(keys::SUBMISSION_INDEX, id.as_str())
            .await
            .map(|_| ())
    }

    /// Count one event for `service` in today's counter.
    ///
    /// Read-modify-write without any lock: concurrent writers can overwrite
    /// each other, so the count may lag the number of events but never
    /// exceeds it.
    pub async fn record_analytics(
        &self,
        event_type: &str,
        service: &str,
        now: DateTime<Utc>,
    ) -> Bookkeeping {
        self.try_record_analytics(event_type, service, now)
            .await
            .into()
    }

    async fn try_record_analytics(
        &self,
        event_type: &str,
        service: &str,
        now: DateTime<Utc>,
    ) -> StoreResult<()> {
        let key = keys::analytics_key(event_type, &day_key(&now));

        let mut counter = match self.store.get(&key).await? {
            Some(raw) => serde_json::from_str::<AnalyticsCounter>(&raw)?,
            None => AnalyticsCounter::default(),
        };
        counter.record(service, now);

        let value = serde_json::to_string(&counter)?;
        self.store.set(&key, value, Some(ttl::ANALYTICS)).await
    }

    /// Store an error log entry under `error:{epoch millis}`
    pub async fn log_error(&self, entry: &ErrorLogEntry, now: DateTime<Utc>) -> Bookkeeping {
        let result = match serde_json::to_string(entry) {
            Ok(value) => {
                self.store
                    .set(
                        &keys::error_key(now.timestamp_millis()),
                        value,
                        Some(ttl::ERROR_LOG),
                    )
                    .await
            }
            Err(e) => Err(e.into()),
        };
        result.into()
    }

    pub async fn get_submission(&self, id: &SubmissionId) -> StoreResult<Option<Submission>> {
        match self.store.get(&keys::submission_key(id.as_str())).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Newest `limit` submission ids
    pub async fn list_submission_ids(&self, limit: usize) -> StoreResult<Vec<String>> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let stop = isize::try_from(limit - 1).unwrap_or(isize::MAX);
        self.store.lrange(keys::SUBMISSION_INDEX, 0, stop).await
    }

    /// Counter for `event_type` on `day` (`YYYY-MM-DD`)
    pub async fn get_analytics(
        &self,
        event_type: &str,
        day: &str,
    ) -> StoreResult<Option<AnalyticsCounter>> {
        match self.store.get(&keys::analytics_key(event_type, day)).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub async fn get_error_log(&self, epoch_millis: i64) -> StoreResult<Option<ErrorLogEntry>> {
        match self.store.get(&keys::error_key(epoch_millis)).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub async fn ping(&self) -> StoreResult<()> {
        self.store.ping().await
    }
}
