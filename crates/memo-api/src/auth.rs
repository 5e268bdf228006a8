//! Bearer-token verification against the identity provider.
//!
//! The verifier owns the full authorization contract: extract the
//! token segment from the `Authorization` header, have the identity
//! provider verify it, and cross-check the verified subject against
//! the user id claimed in the query. The cross-check is mandatory —
//! a valid token for one user must never read another user's notes.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

use memo_core::{Error, Principal, Result, TokenVerifier};

/// Message when the `Authorization` header is absent or carries no
/// token segment.
pub const MSG_TOKEN_REQUIRED: &str = "Authorization token is missing";

/// Message when the identity provider rejects the token.
pub const MSG_TOKEN_INVALID: &str = "Authorization token is invalid or expired";

/// Message when the verified subject differs from the claimed user.
pub const MSG_SUBJECT_MISMATCH: &str = "Token does not belong to the requested user";

/// Timeout for identity provider calls (seconds).
pub const VERIFY_TIMEOUT_SECS: u64 = 10;

/// Extract the token segment from an `Authorization: Bearer <token>`
/// shaped header value.
pub fn extract_bearer_token(header: Option<&str>) -> Option<&str> {
    header?.split_whitespace().nth(1)
}

// =============================================================================
// IDENTITY PROVIDER CLIENT
// =============================================================================

/// Token verifier backed by an identity-toolkit style REST endpoint.
///
/// Verification is a remote call: it may be slow and may fail for
/// reasons unrelated to the caller. Provider rejections classify as
/// unauthorized; transport faults classify as internal.
pub struct IdentityClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Debug, Deserialize)]
struct LookupUser {
    #[serde(rename = "localId")]
    local_id: String,
    #[serde(default)]
    email: String,
}

impl IdentityClient {
    /// Create a client with an explicit base URL.
    pub fn with_config(base_url: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(VERIFY_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

}

#[async_trait]
impl TokenVerifier for IdentityClient {
    async fn verify(&self, claimed_uid: &str, bearer: Option<&str>) -> Result<Principal> {
        let token = extract_bearer_token(bearer)
            .ok_or_else(|| Error::Unauthorized(MSG_TOKEN_REQUIRED.to_string()))?;

        let response = self
            .client
            .post(format!("{}/v1/accounts:lookup", self.base_url))
            .json(&serde_json::json!({ "idToken": token }))
            .send()
            .await
            .map_err(|e| Error::Internal(format!("identity provider unreachable: {e}")))?;

        if !response.status().is_success() {
            warn!(op = "verify_token", status = %response.status(), "token rejected by identity provider");
            return Err(Error::Unauthorized(MSG_TOKEN_INVALID.to_string()));
        }

        let lookup: LookupResponse = response
            .json()
            .await
            .map_err(|e| Error::Internal(format!("identity provider response malformed: {e}")))?;

        let user = lookup
            .users
            .into_iter()
            .next()
            .ok_or_else(|| Error::Unauthorized(MSG_TOKEN_INVALID.to_string()))?;

        if user.local_id != claimed_uid {
            warn!(op = "verify_token", uid = %user.local_id, "verified subject does not match claimed user");
            return Err(Error::Unauthorized(MSG_SUBJECT_MISMATCH.to_string()));
        }

        debug!(op = "verify_token", uid = %user.local_id, "token verified");
        Ok(Principal {
            uid: user.local_id,
            email: user.email,
        })
    }
}

// =============================================================================
// STATIC VERIFIER (TESTS / LOCAL DEVELOPMENT)
// =============================================================================

/// Verifier backed by a fixed token table. Applies the same header
/// parsing and subject cross-check as the real client, without the
/// remote call.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenVerifier {
    tokens: HashMap<String, Principal>,
}

impl StaticTokenVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a token as belonging to `uid`/`email`.
    pub fn with_token(
        mut self,
        token: impl Into<String>,
        uid: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        self.tokens.insert(
            token.into(),
            Principal {
                uid: uid.into(),
                email: email.into(),
            },
        );
        self
    }
}

#[async_trait]
impl TokenVerifier for StaticTokenVerifier {
    async fn verify(&self, claimed_uid: &str, bearer: Option<&str>) -> Result<Principal> {
        let token = extract_bearer_token(bearer)
            .ok_or_else(|| Error::Unauthorized(MSG_TOKEN_REQUIRED.to_string()))?;

        let principal = self
            .tokens
            .get(token)
            .ok_or_else(|| Error::Unauthorized(MSG_TOKEN_INVALID.to_string()))?;

        if principal.uid != claimed_uid {
            return Err(Error::Unauthorized(MSG_SUBJECT_MISMATCH.to_string()));
        }
        Ok(principal.clone())
    }
}
