//! Document-store backends for the memo notes service.
//!
//! Two implementations of [`memo_core::NoteStore`]:
//!
//! - [`FirestoreBackend`] — compiles the access-control predicate
//!   into a Firestore `runQuery` structured query, so filtering and
//!   ordering happen entirely store-side.
//! - [`MemoryStore`] — an in-process store for tests and local
//!   development that evaluates the same predicate shapes.

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreBackend;
pub use memory::MemoryStore;
