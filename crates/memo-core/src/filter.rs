//! Access-control filter predicates for note retrieval.
//!
//! A [`NoteFilter`] is a declarative predicate evaluated by the
//! document store, never by application code; results are not
//! re-checked after retrieval, so the predicate alone enforces the
//! visibility boundary between principals.

use crate::models::Principal;
use crate::query::{Category, NotesQuery, QueryFilter};

/// The two predicate shapes the retrieval pipeline can issue.
///
/// The category-narrowed shape is strictly more restrictive than the
/// default shape: it drops the shared-access disjunct entirely, so a
/// category query can never surface a note the principal does not own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteFilter {
    /// `userId == uid OR sharedWith contains-any [uid, email]`.
    OwnedOrShared { uid: String, email: String },
    /// `userId == uid AND category == category`.
    OwnedInCategory { uid: String, category: Category },
}

impl NoteFilter {
    /// Build the predicate for a validated request and its verified
    /// principal. Pure and total: the query is already validated, so
    /// there is nothing left to fail on.
    pub fn for_request(query: &NotesQuery, principal: &Principal) -> Self {
        match &query.filter {
            Some(QueryFilter::Category(category)) => NoteFilter::OwnedInCategory {
                uid: principal.uid.clone(),
                category: *category,
            },
            // No filter, or a filter dimension with no narrowed shape
            // of its own, falls back to the default visibility set.
            _ => NoteFilter::OwnedOrShared {
                uid: principal.uid.clone(),
                email: principal.email.clone(),
            },
        }
    }

    /// The subject this predicate is scoped to.
    pub fn uid(&self) -> &str {
        match self {
            NoteFilter::OwnedOrShared { uid, .. } => uid,
            NoteFilter::OwnedInCategory { uid, .. } => uid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::RawNotesQuery;

    fn principal() -> Principal {
        Principal {
            uid: "u1".to_string(),
            email: "u1@example.com".to_string(),
        }
    }

    fn validated(field: Option<&str>, q: Option<&str>) -> NotesQuery {
        NotesQuery::from_raw(&RawNotesQuery {
            user: Some("u1".to_string()),
            field: field.map(String::from),
            q: q.map(String::from),
        })
        .unwrap()
    }

    #[test]
    fn test_no_filter_builds_owned_or_shared() {
        let filter = NoteFilter::for_request(&validated(None, None), &principal());
        assert_eq!(
            filter,
            NoteFilter::OwnedOrShared {
                uid: "u1".to_string(),
                email: "u1@example.com".to_string(),
            }
        );
    }

    #[test]
    fn test_category_filter_builds_owned_in_category() {
        let filter = NoteFilter::for_request(
            &validated(Some("category"), Some("important")),
            &principal(),
        );
        assert_eq!(
            filter,
            NoteFilter::OwnedInCategory {
                uid: "u1".to_string(),
                category: Category::Important,
            }
        );
    }

    #[test]
    fn test_filter_is_scoped_to_principal_not_query_user() {
        // The predicate is always built from the verified principal;
        // the claimed user id never reaches the store directly.
        let other = Principal {
            uid: "verified-uid".to_string(),
            email: "verified@example.com".to_string(),
        };
        let filter = NoteFilter::for_request(&validated(None, None), &other);
        assert_eq!(filter.uid(), "verified-uid");
    }
}
