//! Firestore REST backend for note retrieval.
//!
//! Issues a single `runQuery` request per list operation: the
//! access-control predicate and the `updatedAt` descending sort are
//! both part of the structured query, so the store enforces the
//! visibility boundary and no re-filtering happens in this process.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Map, Value};
use std::time::Duration;
use tracing::{debug, warn};

use memo_core::{Error, NoteFilter, NoteRecord, NoteStore, Result};

/// Default collection holding note documents.
pub const DEFAULT_COLLECTION: &str = "notes";

/// Timeout for store queries (seconds).
pub const QUERY_TIMEOUT_SECS: u64 = 30;

/// Firestore REST document store.
///
/// `base_url` points at a database root, e.g.
/// `https://firestore.googleapis.com/v1/projects/<p>/databases/(default)`.
pub struct FirestoreBackend {
    client: Client,
    base_url: String,
    collection: String,
    /// Server credential sent as a bearer token, if configured.
    auth_token: Option<String>,
}

impl FirestoreBackend {
    /// Create a backend with explicit configuration.
    pub fn with_config(base_url: String, collection: String, auth_token: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(QUERY_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            collection,
            auth_token,
        }
    }

    fn run_query_url(&self) -> String {
        format!("{}/documents:runQuery", self.base_url)
    }
}

#[async_trait]
impl NoteStore for FirestoreBackend {
    async fn list_notes(&self, filter: &NoteFilter) -> Result<Vec<NoteRecord>> {
        let body = json!({ "structuredQuery": structured_query(&self.collection, filter) });
        debug!(op = "run_query", collection = %self.collection, "issuing store query");

        let mut request = self.client.post(self.run_query_url()).json(&body);
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        let payload: Value = response.json().await.map_err(transport_error)?;

        if !status.is_success() {
            let code = provider_code(&payload);
            warn!(op = "run_query", store_error_code = %code, "store query failed");
            return Err(Error::Storage { code });
        }

        Ok(parse_run_query_response(&payload))
    }
}

/// Build the structured query for a predicate: one `where` clause,
/// one `updatedAt` descending `orderBy`, nothing else.
fn structured_query(collection: &str, filter: &NoteFilter) -> Value {
    json!({
        "from": [{ "collectionId": collection }],
        "where": filter_clause(filter),
        "orderBy": [{
            "field": { "fieldPath": "updatedAt" },
            "direction": "DESCENDING",
        }],
    })
}

fn filter_clause(filter: &NoteFilter) -> Value {
    match filter {
        NoteFilter::OwnedOrShared { uid, email } => json!({
            "compositeFilter": {
                "op": "OR",
                "filters": [
                    field_equals("userId", uid),
                    {
                        "fieldFilter": {
                            "field": { "fieldPath": "sharedWith" },
                            "op": "ARRAY_CONTAINS_ANY",
                            "value": { "arrayValue": { "values": [
                                { "stringValue": uid },
                                { "stringValue": email },
                            ]}},
                        }
                    },
                ],
            }
        }),
        NoteFilter::OwnedInCategory { uid, category } => json!({
            "compositeFilter": {
                "op": "AND",
                "filters": [
                    field_equals("userId", uid),
                    field_equals("category", category.as_str()),
                ],
            }
        }),
    }
}

fn field_equals(path: &str, value: &str) -> Value {
    json!({
        "fieldFilter": {
            "field": { "fieldPath": path },
            "op": "EQUAL",
            "value": { "stringValue": value },
        }
    })
}

/// `runQuery` streams one JSON object per result; elements without a
/// `document` key (read time markers, partial progress) are skipped.
fn parse_run_query_response(payload: &Value) -> Vec<NoteRecord> {
    let elements = match payload.as_array() {
        Some(elements) => elements,
        None => return Vec::new(),
    };

    elements
        .iter()
        .filter_map(|element| element.get("document"))
        .filter_map(parse_document)
        .collect()
}

fn parse_document(document: &Value) -> Option<NoteRecord> {
    // Document names are full resource paths; the id is the last
    // path segment.
    let id = document.get("name")?.as_str()?.rsplit('/').next()?;

    let mut fields = Map::new();
    if let Some(typed) = document.get("fields").and_then(Value::as_object) {
        for (name, value) in typed {
            fields.insert(name.clone(), decode_value(value));
        }
    }

    Some(NoteRecord::new(id, fields))
}

/// Decode Firestore's typed value encoding into plain JSON.
///
/// Integers arrive as decimal strings per the REST wire format and
/// are converted back to numbers when they fit in an i64.
fn decode_value(value: &Value) -> Value {
    let typed = match value.as_object() {
        Some(typed) => typed,
        None => return value.clone(),
    };

    if let Some(s) = typed.get("stringValue").and_then(Value::as_str) {
        return Value::String(s.to_string());
    }
    if let Some(s) = typed.get("integerValue").and_then(Value::as_str) {
        if let Ok(n) = s.parse::<i64>() {
            return json!(n);
        }
        return Value::String(s.to_string());
    }
    if let Some(n) = typed.get("doubleValue") {
        return n.clone();
    }
    if let Some(b) = typed.get("booleanValue") {
        return b.clone();
    }
    if let Some(s) = typed.get("timestampValue").and_then(Value::as_str) {
        return Value::String(s.to_string());
    }
    if typed.contains_key("nullValue") {
        return Value::Null;
    }
    if let Some(array) = typed.get("arrayValue") {
        let values = array
            .get("values")
            .and_then(Value::as_array)
            .map(|values| values.iter().map(decode_value).collect())
            .unwrap_or_default();
        return Value::Array(values);
    }
    if let Some(map) = typed.get("mapValue") {
        let mut decoded = Map::new();
        if let Some(entries) = map.get("fields").and_then(Value::as_object) {
            for (name, entry) in entries {
                decoded.insert(name.clone(), decode_value(entry));
            }
        }
        return Value::Object(decoded);
    }
    if let Some(s) = typed.get("referenceValue").and_then(Value::as_str) {
        return Value::String(s.to_string());
    }

    value.clone()
}

/// Extract the provider error code from an error payload.
///
/// Error bodies carry `error.status` as an UPPER_SNAKE gRPC status
/// name; codes are normalized to the lower-kebab form the message
/// table uses. `runQuery` wraps errors in a one-element array.
fn provider_code(payload: &Value) -> String {
    let error = payload
        .as_array()
        .and_then(|elements| elements.first())
        .unwrap_or(payload)
        .get("error");

    error
        .and_then(|e| e.get("status"))
        .and_then(Value::as_str)
        .map(|status| status.to_lowercase().replace('_', "-"))
        .unwrap_or_else(|| "unknown".to_string())
}

fn transport_error(err: reqwest::Error) -> Error {
    let code = if err.is_timeout() {
        "deadline-exceeded"
    } else {
        "unavailable"
    };
    Error::Storage {
        code: code.to_string(),
    }
}
