//! Core types, traits, and abstractions for the memo notes service.
//!
//! This crate holds everything the read pipeline shares: the error
//! taxonomy, query validation, the access-control filter predicate,
//! and the `NoteStore` / `TokenVerifier` seams that the backend
//! crates implement. Nothing in here performs I/O.

pub mod error;
pub mod filter;
pub mod logging;
pub mod models;
pub mod provider_errors;
pub mod query;
pub mod traits;

pub use error::{Error, Result};
pub use filter::NoteFilter;
pub use models::{NoteRecord, Principal};
pub use query::{Category, FilterField, NotesQuery, QueryFilter, RawNotesQuery};
pub use traits::{NoteStore, TokenVerifier};
