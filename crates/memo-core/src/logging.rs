//! Structured logging field names shared across the memo crates.
//!
//! Tracing macros require literal field names, so these constants
//! document the contract rather than being interpolated; log queries
//! and dashboards key off them.
//!
//! ## Log level contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Request failed with an internal fault |
//! | WARN  | Request rejected (validation, auth, store-side 4xx) |
//! | INFO  | Lifecycle events, request completions |
//! | DEBUG | Decision points (predicate shape, config choices) |

/// Correlation ID propagated per request. Format: UUIDv7.
pub const REQUEST_ID: &str = "request_id";

/// Subsystem originating the event: "api", "store", "auth".
pub const SUBSYSTEM: &str = "subsystem";

/// Logical operation name: "list_notes", "verify_token", "run_query".
pub const OPERATION: &str = "op";

/// Verified subject id. Never log the raw bearer token.
pub const UID: &str = "uid";

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of notes returned by a store query.
pub const RESULT_COUNT: &str = "result_count";

/// Provider error code attached to a storage failure.
pub const STORE_ERROR_CODE: &str = "store_error_code";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names_are_distinct() {
        let fields = [
            REQUEST_ID,
            SUBSYSTEM,
            OPERATION,
            UID,
            DURATION_MS,
            RESULT_COUNT,
            STORE_ERROR_CODE,
        ];
        for (i, a) in fields.iter().enumerate() {
            for b in &fields[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
