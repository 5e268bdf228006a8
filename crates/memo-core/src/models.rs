//! Value objects shared across the retrieval pipeline.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The authenticated identity making a request.
///
/// Produced by a [`crate::TokenVerifier`] from a bearer credential
/// plus the claimed user id; lives only for the duration of one
/// request and is never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Subject identifier from the verified credential.
    pub uid: String,
    /// Secondary identifier used for shared-access matching.
    pub email: String,
}

/// A single note as returned to the client.
///
/// Only `id` is interpreted by this service; every stored field is
/// passed through opaquely. `updatedAt` lives among the opaque
/// fields and is only ever interpreted by the store's sort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteRecord {
    /// Stable record identifier assigned by the store.
    pub id: String,
    /// All stored note fields, passed through untouched.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl NoteRecord {
    pub fn new(id: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Convenience accessor for a top-level stored field.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_note_record_serializes_flat() {
        let mut fields = Map::new();
        fields.insert("text".to_string(), json!("buy milk"));
        fields.insert("category".to_string(), json!("general"));
        let note = NoteRecord::new("n1", fields);

        let value = serde_json::to_value(&note).unwrap();
        assert_eq!(
            value,
            json!({"id": "n1", "text": "buy milk", "category": "general"})
        );
    }

    #[test]
    fn test_note_record_roundtrip_preserves_unknown_fields() {
        let raw = json!({"id": "n2", "pinned": true, "updatedAt": 1712000000});
        let note: NoteRecord = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(note.id, "n2");
        assert_eq!(note.field("pinned"), Some(&json!(true)));
        assert_eq!(serde_json::to_value(&note).unwrap(), raw);
    }
}
