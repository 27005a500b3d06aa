use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

use crate::timestamp::iso_millis;

/// Event type recorded for every accepted submission
pub const FORM_SUBMISSION_EVENT: &str = "form_submission";

/// Breakdown key used when a submission names no service
pub const GENERAL_SERVICE_KEY: &str = "general";

/// Daily counter for one event type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsCounter {
    #[serde(default)]
    pub count: u64,
    /// Count per service
    #[serde(default)]
    pub breakdown: BTreeMap<String, u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

impl AnalyticsCounter {
    /// Count one event for `service`
    pub fn record(&mut self, service: &str, now: DateTime<Utc>) {
        self.count += 1;
        *self.breakdown.entry(service.to_string()).or_insert(0) += 1;
        self.last_updated = Some(iso_millis(&now));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_increments_total_and_breakdown() {
        let mut counter = AnalyticsCounter::default();
        let now = Utc::now();
        counter.record("cfo", now);
        counter.record("cfo", now);
        counter.record(GENERAL_SERVICE_KEY, now);

        assert_eq!(counter.count, 3);
        assert_eq!(counter.breakdown["cfo"], 2);
        assert_eq!(counter.breakdown["general"], 1);
        assert_eq!(counter.last_updated, Some(iso_millis(&now)));
    }

    #[test]
    fn test_reads_documents_without_last_updated() {
        let counter: AnalyticsCounter =
            serde_json::from_value(json!({"count": 4, "breakdown": {"premium": 4}})).unwrap();
        assert_eq!(counter.count, 4);
        assert!(counter.last_updated.is_none());
    }
}
