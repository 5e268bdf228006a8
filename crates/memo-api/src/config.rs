//! API server configuration.
//!
//! One explicit struct built from the environment at startup and
//! threaded into the collaborator constructors; the request pipeline
//! itself never reads process-wide state.

use anyhow::Context;
use axum::http::HeaderValue;
use std::net::SocketAddr;

use memo_store::firestore::DEFAULT_COLLECTION;

/// Default bind address when `MEMO_BIND_ADDR` is not set.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Default CORS origin for local development.
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// Server configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Socket address the HTTP server binds to.
    pub bind_addr: SocketAddr,
    /// Explicit CORS origin whitelist. Never a wildcard.
    pub allowed_origins: Vec<HeaderValue>,
    /// Base URL of the identity verification service.
    pub identity_base_url: String,
    /// Database root URL of the document store.
    pub store_base_url: String,
    /// Collection holding note documents.
    pub store_collection: String,
    /// Server credential for the document store, if any.
    pub store_token: Option<String>,
}

impl ApiConfig {
    /// Build configuration from environment variables.
    ///
    /// - `MEMO_BIND_ADDR` — listen address (default `0.0.0.0:8080`).
    /// - `MEMO_ALLOWED_ORIGINS` — comma-separated CORS origins
    ///   (default `http://localhost:3000`).
    /// - `MEMO_IDENTITY_BASE_URL` — identity service root (required).
    /// - `MEMO_STORE_BASE_URL` — document store database root
    ///   (required).
    /// - `MEMO_STORE_COLLECTION` — collection id (default `notes`).
    /// - `MEMO_STORE_TOKEN` — store server credential (optional).
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr = std::env::var("MEMO_BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("MEMO_BIND_ADDR is not a valid socket address")?;

        let allowed_origins =
            parse_allowed_origins(&std::env::var("MEMO_ALLOWED_ORIGINS").unwrap_or_default());

        let identity_base_url =
            std::env::var("MEMO_IDENTITY_BASE_URL").context("MEMO_IDENTITY_BASE_URL is not set")?;
        let store_base_url =
            std::env::var("MEMO_STORE_BASE_URL").context("MEMO_STORE_BASE_URL is not set")?;
        let store_collection = std::env::var("MEMO_STORE_COLLECTION")
            .unwrap_or_else(|_| DEFAULT_COLLECTION.to_string());
        let store_token = std::env::var("MEMO_STORE_TOKEN").ok();

        Ok(Self {
            bind_addr,
            allowed_origins,
            identity_base_url,
            store_base_url,
            store_collection,
            store_token,
        })
    }
}

/// Parse a comma-separated origin list into header values, dropping
/// entries that are not valid header values. An empty list falls
/// back to the local development origin rather than a wildcard.
pub fn parse_allowed_origins(raw: &str) -> Vec<HeaderValue> {
    let mut origins: Vec<HeaderValue> = raw
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect();

    if origins.is_empty() {
        origins.push(
            DEFAULT_ALLOWED_ORIGIN
                .parse()
                .expect("default origin is a valid header value"),
        );
    }
    origins
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_origin() {
        let origins = parse_allowed_origins("https://notes.example.com");
        assert_eq!(origins.len(), 1);
        assert_eq!(origins[0].to_str().unwrap(), "https://notes.example.com");
    }

    #[test]
    fn test_multiple_origins_with_whitespace() {
        let origins =
            parse_allowed_origins("https://notes.example.com, http://localhost:3000 ,https://a.example.com");
        assert_eq!(origins.len(), 3);
        assert_eq!(origins[1].to_str().unwrap(), "http://localhost:3000");
    }

    #[test]
    fn test_empty_list_falls_back_to_default_origin() {
        let origins = parse_allowed_origins("");
        assert_eq!(origins.len(), 1);
        assert_eq!(origins[0].to_str().unwrap(), DEFAULT_ALLOWED_ORIGIN);
    }

    #[test]
    fn test_blank_entries_are_dropped() {
        let origins = parse_allowed_origins("https://notes.example.com,, ,");
        assert_eq!(origins.len(), 1);
    }

    #[test]
    fn test_from_env_carries_collaborator_settings() {
        // Single test for all env handling; parallel tests must not
        // race on process-wide variables.
        std::env::set_var("MEMO_BIND_ADDR", "127.0.0.1:9090");
        std::env::set_var("MEMO_IDENTITY_BASE_URL", "https://identity.example.com");
        std::env::set_var("MEMO_STORE_BASE_URL", "https://store.example.com/v1/db");
        std::env::remove_var("MEMO_STORE_COLLECTION");
        std::env::remove_var("MEMO_STORE_TOKEN");

        let config = ApiConfig::from_env().unwrap();
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:9090");
        assert_eq!(config.identity_base_url, "https://identity.example.com");
        assert_eq!(config.store_base_url, "https://store.example.com/v1/db");
        assert_eq!(config.store_collection, DEFAULT_COLLECTION);
        assert_eq!(config.store_token, None);

        std::env::remove_var("MEMO_IDENTITY_BASE_URL");
        let err = ApiConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("MEMO_IDENTITY_BASE_URL"));

        std::env::remove_var("MEMO_BIND_ADDR");
        std::env::remove_var("MEMO_STORE_BASE_URL");
    }
}
