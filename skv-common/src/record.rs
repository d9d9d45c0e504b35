//! # Record Layout
//!
//! The persisted unit: one JSON object per endpoint.
//!
//! ```text
//! {"endpoint":"user:42","data":{"name":"Ann"},"createdAt":1700000000000}
//! ```
//!
//! Older layouts named the timestamp `timestamp` or `dateCreated`; both are
//! accepted on read and rewritten as `createdAt`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{SkvError, SkvResult};
use crate::types::Timestamp;

/// A stored record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Key this record lives under.
    pub endpoint: String,
    /// Caller data; never interpreted.
    #[serde(rename = "data")]
    pub payload: Value,
    /// Creation time in milliseconds since the Unix epoch.
    #[serde(rename = "createdAt", alias = "timestamp", alias = "dateCreated")]
    pub created_at: Timestamp,
}

impl Record {
    pub fn new(endpoint: impl Into<String>, payload: Value, created_at: Timestamp) -> Self {
        Record {
            endpoint: endpoint.into(),
            payload,
            created_at,
        }
    }

    /// Serializes the record into its stored string form.
    pub fn encode(&self) -> SkvResult<String> {
        serde_json::to_string(self).map_err(|err| SkvError::InvalidPayload(err.to_string()))
    }

    /// Parses a stored string found under `endpoint`.
    ///
    /// The raw string is carried in the error so the caller can report it.
    pub fn decode(endpoint: &str, raw: &str) -> SkvResult<Self> {
        let corrupt = |reason: String| SkvError::CorruptRecord {
            endpoint: endpoint.to_string(),
            raw: raw.to_string(),
            reason,
        };

        let record: Record = serde_json::from_str(raw).map_err(|err| corrupt(err.to_string()))?;
        if record.endpoint != endpoint {
            return Err(corrupt(format!(
                "record belongs to endpoint {:?}",
                record.endpoint
            )));
        }
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn stored_layout_uses_data_and_created_at() {
        let record = Record::new("user:42", json!({"name": "Ann"}), 7);
        let raw = record.encode().unwrap();
        let value: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            value,
            json!({"endpoint": "user:42", "data": {"name": "Ann"}, "createdAt": 7})
        );
    }

    #[test]
    fn accepts_legacy_timestamp_names() {
        let record =
            Record::decode("a", r#"{"endpoint":"a","data":[1,2],"timestamp":99}"#).unwrap();
        assert_eq!(record.created_at, 99);

        let record = Record::decode("a", r#"{"endpoint":"a","data":"x","dateCreated":5}"#).unwrap();
        assert_eq!(record.created_at, 5);
    }

    #[test]
    fn malformed_input_is_corrupt() {
        let err = Record::decode("a", "not json").unwrap_err();
        match err {
            SkvError::CorruptRecord { endpoint, raw, .. } => {
                assert_eq!(endpoint, "a");
                assert_eq!(raw, "not json");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        // Valid JSON, but not a record.
        assert!(Record::decode("a", r#"{"data":1}"#).unwrap_err().is_corrupt());
    }

    #[test]
    fn foreign_endpoint_is_corrupt() {
        let raw = Record::new("b", json!(1), 1).encode().unwrap();
        assert!(Record::decode("a", &raw).unwrap_err().is_corrupt());
    }
}
