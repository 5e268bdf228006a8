//! Query-string validation for the list-notes endpoint.
//!
//! Raw query parameters arrive untyped; [`NotesQuery::from_raw`]
//! turns them into a constraint-checked value or fails with the
//! first violation. Empty-string parameters are treated as absent,
//! so `?field=text&q=` fails the pairing rule rather than the
//! text-query rule.

use serde::Deserialize;

use crate::error::{Error, Result};

/// Violation message when `user` is missing or empty.
pub const MSG_USER_REQUIRED: &str = "User is not specified";

/// Violation message when `field` is not a recognized value.
pub const MSG_FIELD_VALUES: &str = "field can be either text or category";

/// Violation message when exactly one of `field`/`q` is present.
pub const MSG_FIELD_Q_PAIR: &str = "'field' and 'q' both query params are required";

/// Violation message when a category query names an unknown category.
pub const MSG_CATEGORY_VALUES: &str = "'q' must be general or important";

/// Rejection message for the disabled free-text search feature.
pub const MSG_TEXT_UNSUPPORTED: &str = "text query is not supported at this moment";

/// Raw, untyped query parameters as decoded from the query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawNotesQuery {
    pub user: Option<String>,
    pub field: Option<String>,
    pub q: Option<String>,
}

/// The dimension a note query filters on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    /// Free-text search. Recognized but rejected at validation time
    /// until server-side search ships.
    Text,
    /// Exact category match.
    Category,
}

impl FilterField {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "text" => Some(FilterField::Text),
            "category" => Some(FilterField::Category),
            _ => None,
        }
    }
}

/// Note categories accepted by the category filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    General,
    Important,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::General => "general",
            Category::Important => "important",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "general" => Some(Category::General),
            "important" => Some(Category::Important),
            _ => None,
        }
    }
}

/// A validated filter clause: field plus value, always paired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryFilter {
    /// Free-text search. Never constructed today; validation rejects
    /// text queries with [`MSG_TEXT_UNSUPPORTED`] before this point.
    Text(String),
    Category(Category),
}

/// A validated, immutable list-notes request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesQuery {
    /// The user whose notes are requested. Verified against the
    /// bearer credential's subject before any data is read.
    pub user: String,
    pub filter: Option<QueryFilter>,
}

impl NotesQuery {
    /// Validate raw query parameters into a typed request.
    ///
    /// Pure function of its input; fails with the first violation:
    /// 1. `user` missing or empty;
    /// 2. `field` present but unrecognized;
    /// 3. exactly one of `field`/`q` present;
    /// 4. `field=category` with a `q` outside the category set;
    /// 5. `field=text` with a non-empty `q` (feature disabled).
    pub fn from_raw(raw: &RawNotesQuery) -> Result<Self> {
        let user = present(&raw.user).ok_or_else(|| Error::Validation(MSG_USER_REQUIRED.into()))?;

        let field = match present(&raw.field) {
            None => None,
            Some(s) => Some(
                FilterField::parse(s).ok_or_else(|| Error::Validation(MSG_FIELD_VALUES.into()))?,
            ),
        };

        let filter = match (field, present(&raw.q)) {
            (None, None) => None,
            (Some(FilterField::Category), Some(q)) => match Category::parse(q) {
                Some(category) => Some(QueryFilter::Category(category)),
                None => return Err(Error::Validation(MSG_CATEGORY_VALUES.into())),
            },
            (Some(FilterField::Text), Some(_)) => {
                return Err(Error::UnsupportedQuery(MSG_TEXT_UNSUPPORTED.into()))
            }
            _ => return Err(Error::Validation(MSG_FIELD_Q_PAIR.into())),
        };

        Ok(NotesQuery {
            user: user.to_string(),
            filter,
        })
    }
}

/// Empty strings are indistinguishable from absent parameters.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(user: Option<&str>, field: Option<&str>, q: Option<&str>) -> RawNotesQuery {
        RawNotesQuery {
            user: user.map(String::from),
            field: field.map(String::from),
            q: q.map(String::from),
        }
    }

    fn expect_validation(raw: &RawNotesQuery, msg: &str) {
        match NotesQuery::from_raw(raw) {
            Err(Error::Validation(m)) => assert_eq!(m, msg),
            other => panic!("expected Validation({msg:?}), got {other:?}"),
        }
    }

    #[test]
    fn test_bare_user_query_passes() {
        let query = NotesQuery::from_raw(&raw(Some("u1"), None, None)).unwrap();
        assert_eq!(query.user, "u1");
        assert_eq!(query.filter, None);
    }

    #[test]
    fn test_category_query_passes() {
        let query = NotesQuery::from_raw(&raw(Some("u1"), Some("category"), Some("general")))
            .unwrap();
        assert_eq!(
            query.filter,
            Some(QueryFilter::Category(Category::General))
        );

        let query = NotesQuery::from_raw(&raw(Some("u1"), Some("category"), Some("important")))
            .unwrap();
        assert_eq!(
            query.filter,
            Some(QueryFilter::Category(Category::Important))
        );
    }

    #[test]
    fn test_missing_user_rejected() {
        expect_validation(&raw(None, None, None), MSG_USER_REQUIRED);
        expect_validation(&raw(Some(""), None, None), MSG_USER_REQUIRED);
    }

    #[test]
    fn test_user_checked_before_filter_rules() {
        // Missing user wins even when the filter pair is also broken.
        expect_validation(&raw(None, Some("category"), None), MSG_USER_REQUIRED);
    }

    #[test]
    fn test_unknown_field_rejected() {
        expect_validation(&raw(Some("u1"), Some("title"), Some("x")), MSG_FIELD_VALUES);
    }

    #[test]
    fn test_half_pairs_rejected() {
        // Every combination where exactly one of field/q is present.
        expect_validation(&raw(Some("u1"), Some("category"), None), MSG_FIELD_Q_PAIR);
        expect_validation(&raw(Some("u1"), Some("text"), None), MSG_FIELD_Q_PAIR);
        expect_validation(&raw(Some("u1"), None, Some("general")), MSG_FIELD_Q_PAIR);
    }

    #[test]
    fn test_empty_strings_count_as_absent() {
        // `q=` decodes to an empty string; it must behave like a
        // missing parameter and trip the pairing rule.
        expect_validation(&raw(Some("u1"), Some("text"), Some("")), MSG_FIELD_Q_PAIR);
        expect_validation(
            &raw(Some("u1"), Some("category"), Some("")),
            MSG_FIELD_Q_PAIR,
        );

        let query = NotesQuery::from_raw(&raw(Some("u1"), Some(""), Some(""))).unwrap();
        assert_eq!(query.filter, None);
    }

    #[test]
    fn test_unknown_category_rejected() {
        for bad in ["urgent", "General", "IMPORTANT", "misc"] {
            expect_validation(
                &raw(Some("u1"), Some("category"), Some(bad)),
                MSG_CATEGORY_VALUES,
            );
        }
    }

    #[test]
    fn test_text_query_rejected_as_unsupported() {
        // Dedicated feature-flag rejection, not the category message.
        match NotesQuery::from_raw(&raw(Some("u1"), Some("text"), Some("hello"))) {
            Err(Error::UnsupportedQuery(m)) => assert_eq!(m, MSG_TEXT_UNSUPPORTED),
            other => panic!("expected UnsupportedQuery, got {other:?}"),
        }
    }

    #[test]
    fn test_category_as_str() {
        assert_eq!(Category::General.as_str(), "general");
        assert_eq!(Category::Important.as_str(), "important");
    }
}
