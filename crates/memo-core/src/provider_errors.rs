//! Provider error-code to user-facing message mapping.
//!
//! The document store surfaces failures as short machine codes. This
//! table turns them into stable, user-safe messages. The HTTP
//! boundary keys its status choice off the message itself: messages
//! beginning with "something" signal an internal/transient fault
//! (500), anything else is a caller-addressable condition (400).

/// Message returned for provider codes with no specific mapping.
pub const GENERIC_STORE_MESSAGE: &str = "Something went wrong";

/// Map a provider error code to its user-facing message.
pub fn message_for_code(code: &str) -> &'static str {
    match code {
        "permission-denied" => "You do not have permission to read these notes",
        "unauthenticated" => "Your session with the notes store has expired",
        "invalid-argument" => "The notes query was rejected by the store",
        "failed-precondition" => "The notes query requires an index that is not ready yet",
        "not-found" => "The notes collection could not be found",
        "cancelled" => "The notes query was cancelled before it completed",
        "resource-exhausted" => "Something went wrong, the notes store is over its quota",
        "unavailable" => "Something went wrong temporarily",
        "deadline-exceeded" => "Something went wrong and the notes store timed out",
        "internal" => "Something went wrong inside the notes store",
        _ => GENERIC_STORE_MESSAGE,
    }
}

/// Whether a mapped message signals an internal fault rather than a
/// caller-addressable condition.
pub fn is_internal_message(message: &str) -> bool {
    message.to_lowercase().starts_with("something")
}
