//! Trait seams between the pipeline and its collaborators.
//!
//! Both collaborators suspend exactly once per request and may fail
//! independently of caller logic; neither is retried by this core.

use async_trait::async_trait;

use crate::error::Result;
use crate::filter::NoteFilter;
use crate::models::{NoteRecord, Principal};

/// Read-only access to the backing document store.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// List every note matching the predicate, sorted by `updatedAt`
    /// descending. Both the predicate and the sort are applied in a
    /// single store-side query; results are never re-filtered or
    /// re-sorted after retrieval, so the predicate alone enforces
    /// the access boundary.
    async fn list_notes(&self, filter: &NoteFilter) -> Result<Vec<NoteRecord>>;
}

/// Verification of a bearer credential against a claimed user id.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Verify the `Authorization` header value (if any) and return
    /// the authenticated principal. Fails with
    /// [`crate::Error::Unauthorized`] when the header is absent or
    /// not `Bearer <token>` shaped, when the identity provider
    /// rejects the token, or when the verified subject differs from
    /// `claimed_uid`. The subject cross-check is mandatory: a valid
    /// token for one user must never authorize reading another
    /// user's notes.
    async fn verify(&self, claimed_uid: &str, bearer: Option<&str>) -> Result<Principal>;
}
