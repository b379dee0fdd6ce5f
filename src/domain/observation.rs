// Observation record domain model
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Query parameters forwarded verbatim to `GET /ice-data`
pub type RecordFilter = BTreeMap<String, String>;

/// One sea-ice measurement entry.
///
/// The core never inspects the fields of a record; it only counts, batches
/// and forwards them, so the payload is kept as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObservationRecord(Value);

impl ObservationRecord {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Pull a record sequence out of a backend response body.
    ///
    /// Accepts `{"data": [...]}` or a bare array; any other shape yields an
    /// empty sequence.
    pub fn sequence_from_body(body: Value) -> Vec<ObservationRecord> {
        let items = match body {
            Value::Array(items) => items,
            Value::Object(mut map) => match map.remove("data") {
                Some(Value::Array(items)) => items,
                _ => Vec::new(),
            },
            _ => Vec::new(),
        };

        items.into_iter().map(ObservationRecord::new).collect()
    }

    /// Accept an import payload only if it is a non-empty JSON array
    pub fn sequence_from_payload(payload: Value) -> Option<Vec<ObservationRecord>> {
        match payload {
            Value::Array(items) if !items.is_empty() => {
                Some(items.into_iter().map(ObservationRecord::new).collect())
            }
            _ => None,
        }
    }
}

/// Backend-assigned identifier used to address updates and deletes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sequence_from_body_shapes() {
        let wrapped = ObservationRecord::sequence_from_body(json!({"data": [{"id": 1}, {"id": 2}]}));
        assert_eq!(wrapped.len(), 2);
        assert_eq!(wrapped[1].as_value(), &json!({"id": 2}));

        let bare = ObservationRecord::sequence_from_body(json!([{"id": 7}]));
        assert_eq!(bare.len(), 1);

        assert!(ObservationRecord::sequence_from_body(json!({"status": "ok"})).is_empty());
        assert!(ObservationRecord::sequence_from_body(json!({"data": null})).is_empty());
        assert!(ObservationRecord::sequence_from_body(Value::Null).is_empty());
    }

    #[test]
    fn test_sequence_from_payload_rejects_empty_and_non_arrays() {
        assert!(ObservationRecord::sequence_from_payload(json!([])).is_none());
        assert!(ObservationRecord::sequence_from_payload(json!({"data": [1]})).is_none());
        assert!(ObservationRecord::sequence_from_payload(json!("records")).is_none());

        let records = ObservationRecord::sequence_from_payload(json!([{"region": "A"}])).unwrap();
        assert_eq!(records.len(), 1);
    }
}
