//! Submission identifiers.
//!
//! Format: `sub_<unix millis>_<6 chars of [0-9a-z]>`. The millisecond prefix
//! makes IDs sortable by creation time and easy to correlate with logs; the
//! random suffix separates submissions accepted in the same millisecond. No
//! uniqueness check is made against the store.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

const PREFIX: &str = "sub_";
const SUFFIX_LEN: usize = 6;
const SUFFIX_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    #[error("submission id must start with 'sub_': {0}")]
    MissingPrefix(String),

    #[error("submission id has an invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("submission id has an invalid suffix: {0}")]
    InvalidSuffix(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionId(String);

impl SubmissionId {
    pub fn generate(now: DateTime<Utc>) -> Self {
        Self::generate_with(now, &mut rand::rng())
    }

    pub fn generate_with<R: Rng + ?Sized>(now: DateTime<Utc>, rng: &mut R) -> Self {
        let suffix: String = (0..SUFFIX_LEN)
            .map(|_| SUFFIX_ALPHABET[rng.random_range(0..SUFFIX_ALPHABET.len())] as char)
            .collect();

        SubmissionId(format!("{}{}_{}", PREFIX, now.timestamp_millis(), suffix))
    }

    /// Parse and check an existing identifier
    pub fn parse(raw: &str) -> Result<Self, IdentityError> {
        let rest = raw
            .strip_prefix(PREFIX)
            .ok_or_else(|| IdentityError::MissingPrefix(raw.to_string()))?;

        let (millis, suffix) = rest
            .split_once('_')
            .ok_or_else(|| IdentityError::InvalidSuffix(raw.to_string()))?;

        if millis.is_empty() || !millis.bytes().all(|b| b.is_ascii_digit()) {
            return Err(IdentityError::InvalidTimestamp(raw.to_string()));
        }
        millis
            .parse::<i64>()
            .map_err(|_| IdentityError::InvalidTimestamp(raw.to_string()))?;

        if suffix.len() != SUFFIX_LEN || !suffix.bytes().all(|b| SUFFIX_ALPHABET.contains(&b)) {
            return Err(IdentityError::InvalidSuffix(raw.to_string()));
        }

        Ok(SubmissionId(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Creation time encoded in the identifier
    pub fn timestamp_millis(&self) -> Option<i64> {
        self.0
            .strip_prefix(PREFIX)
            .and_then(|rest| rest.split_once('_'))
            .and_then(|(millis, _)| millis.parse().ok())
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Display for SubmissionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl FromStr for SubmissionId {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SubmissionId::parse(s)
    }
}

impl AsRef<str> for SubmissionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_generate_format() {
        let now = Utc.timestamp_millis_opt(1_714_558_830_123).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let id = SubmissionId::generate_with(now, &mut rng);

        assert!(id.as_str().starts_with("sub_1714558830123_"));
        assert_eq!(id.as_str().len(), "sub_1714558830123_".len() + 6);
        assert_eq!(id.timestamp_millis(), Some(1_714_558_830_123));
        assert_eq!(SubmissionId::parse(id.as_str()), Ok(id));
    }

    #[test]
    fn test_same_millisecond_ids_differ() {
        let now = Utc::now();
        let mut rng = StdRng::seed_from_u64(99);
        let ids: HashSet<_> = (0..100)
            .map(|_| SubmissionId::generate_with(now, &mut rng))
            .collect();
        assert!(ids.len() > 95);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(matches!(
            SubmissionId::parse("contact_123_abcdef"),
            Err(IdentityError::MissingPrefix(_))
        ));
        assert!(matches!(
            SubmissionId::parse("sub_12x3_abcdef"),
            Err(IdentityError::InvalidTimestamp(_))
        ));
        assert!(matches!(
            SubmissionId::parse("sub__abcdef"),
            Err(IdentityError::InvalidTimestamp(_))
        ));
        assert!(matches!(
            SubmissionId::parse("sub_123_ABCDEF"),
            Err(IdentityError::InvalidSuffix(_))
        ));
        assert!(matches!(
            SubmissionId::parse("sub_123_abc"),
            Err(IdentityError::InvalidSuffix(_))
        ));
        assert!(matches!(
            SubmissionId::parse("sub_123"),
            Err(IdentityError::InvalidSuffix(_))
        ));
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id: SubmissionId = "sub_1_a1b2c3".parse().unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"sub_1_a1b2c3\"");
    }
}
