//! In-memory note store for tests and local development.
//!
//! Evaluates the same predicate shapes the Firestore backend compiles
//! to a structured query, with the same contract: filter and sort in
//! one pass, ties between equal `updatedAt` values keep insertion
//! order (the store's natural order).

use async_trait::async_trait;
use serde_json::Value;
use std::cmp::Ordering;
use std::sync::{Arc, Mutex};

use memo_core::{Error, NoteFilter, NoteRecord, NoteStore, Result};

/// In-process document store.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    notes: Vec<NoteRecord>,
    fail_code: Option<String>,
    query_count: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with notes.
    pub fn with_notes(notes: Vec<NoteRecord>) -> Self {
        let store = Self::new();
        for note in notes {
            store.insert(note);
        }
        store
    }

    /// Make every subsequent query fail with the given provider code.
    pub fn with_failure(self, code: impl Into<String>) -> Self {
        self.inner.lock().unwrap().fail_code = Some(code.into());
        self
    }

    pub fn insert(&self, note: NoteRecord) {
        self.inner.lock().unwrap().notes.push(note);
    }

    /// Number of queries issued so far. Lets tests assert that a
    /// rejected request never reached the store.
    pub fn query_count(&self) -> usize {
        self.inner.lock().unwrap().query_count
    }
}

#[async_trait]
impl NoteStore for MemoryStore {
    async fn list_notes(&self, filter: &NoteFilter) -> Result<Vec<NoteRecord>> {
        let mut inner = self.inner.lock().unwrap();
        inner.query_count += 1;

        if let Some(code) = &inner.fail_code {
            return Err(Error::Storage { code: code.clone() });
        }

        let mut matches: Vec<NoteRecord> = inner
            .notes
            .iter()
            .filter(|note| evaluate(filter, note))
            .cloned()
            .collect();

        // Stable sort: equal updatedAt values keep insertion order.
        matches.sort_by(|a, b| cmp_updated_at_desc(a.field("updatedAt"), b.field("updatedAt")));
        Ok(matches)
    }
}

/// Evaluate a predicate against a stored note.
fn evaluate(filter: &NoteFilter, note: &NoteRecord) -> bool {
    match filter {
        NoteFilter::OwnedOrShared { uid, email } => {
            field_is(note, "userId", uid) || shared_with_any(note, &[uid, email])
        }
        NoteFilter::OwnedInCategory { uid, category } => {
            field_is(note, "userId", uid) && field_is(note, "category", category.as_str())
        }
    }
}

fn field_is(note: &NoteRecord, name: &str, expected: &str) -> bool {
    note.field(name).and_then(Value::as_str) == Some(expected)
}

fn shared_with_any(note: &NoteRecord, identities: &[&String]) -> bool {
    let shared = match note.field("sharedWith").and_then(Value::as_array) {
        Some(shared) => shared,
        None => return false,
    };
    shared
        .iter()
        .filter_map(Value::as_str)
        .any(|entry| identities.iter().any(|identity| entry == identity.as_str()))
}

/// `updatedAt` values are numbers or RFC 3339 strings depending on
/// how the note was written; missing values sort last.
fn cmp_updated_at_desc(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    cmp_updated_at(b, a)
}

fn cmp_updated_at(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
            _ => match (a.as_str(), b.as_str()) {
                (Some(a), Some(b)) => a.cmp(b),
                _ => Ordering::Equal,
            },
        },
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}
