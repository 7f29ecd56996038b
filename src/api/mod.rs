//! REST API client
//!
//! One blocking `ureq` agent plus the base URL and the bearer token. Every
//! backend endpoint is a method on [`ApiClient`], split by area:
//! - `auth`: login / register
//! - `worlds`: overview / create / delete
//! - `tiles`: load / save a world's tiles
//!
//! Any response other than HTTP 200, and any transport failure, becomes an
//! [`ApiError`] carrying the server's response body when there is one.

pub mod auth;
pub mod pending;
pub mod tiles;
pub mod worlds;

pub use auth::{Credentials, LoginResponse};
pub use pending::{poll_slot, PendingOp};
pub use tiles::{TileRecord, TileRecordList};
pub use worlds::{CreateWorldRequest, WorldSummary};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use tracing::{debug, error};

/// Error from a backend call
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Connection, TLS, or I/O failure before a full response arrived
    #[error("transport error: {0}")]
    Transport(String),
    /// The server answered with something other than 200
    #[error("HTTP {code}: {body}")]
    Status { code: u16, body: String },
    /// The body of a 200 response could not be parsed
    #[error("invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Text shown to the user: the literal server body for status errors
    pub fn display_body(&self) -> &str {
        match self {
            ApiError::Status { body, .. } => body,
            ApiError::Transport(msg) | ApiError::Decode(msg) => msg,
        }
    }
}

/// Shorten a token for log output (first 10 chars)
pub fn token_preview(token: &str) -> String {
    if token.chars().count() > 10 {
        let head: String = token.chars().take(10).collect();
        format!("{}...", head)
    } else {
        token.to_string()
    }
}

/// Whether a request carries the bearer token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Auth {
    Anonymous,
    Bearer,
}

/// Blocking client for the office builder backend
///
/// Cheap to clone: the agent shares its connection pool, so a clone can be
/// moved onto a worker thread for a [`PendingOp`].
#[derive(Clone)]
pub struct ApiClient {
    agent: ureq::Agent,
    base_url: String,
    token: Option<String>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_deref().map(token_preview))
            .finish()
    }
}

impl ApiClient {
    /// Create a client for `base_url` (scheme, host and port; no trailing `/api`)
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            agent: ureq::Agent::new(),
            base_url,
            token: None,
        }
    }

    #[cfg(test)]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Set or clear the bearer token sent with authenticated requests
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    /// Return a copy of this client using `token`
    #[cfg(test)]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Request helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Authenticated GET, returns the response body
    fn get_request(&self, path: &str) -> Result<String, ApiError> {
        self.execute("GET", path, None, Auth::Bearer)
    }

    /// Authenticated DELETE, returns the response body
    fn delete_request(&self, path: &str) -> Result<String, ApiError> {
        self.execute("DELETE", path, None, Auth::Bearer)
    }

    /// Request with a JSON body
    fn json_request<B: Serialize>(
        &self,
        method: &str,
        path: &str,
        body: &B,
        auth: Auth,
    ) -> Result<String, ApiError> {
        let json = serde_json::to_string(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.execute(method, path, Some(json), auth)
    }

    fn execute(
        &self,
        method: &str,
        path: &str,
        body: Option<String>,
        auth: Auth,
    ) -> Result<String, ApiError> {
        let url = self.url(path);
        let mut request = self.agent.request(method, &url);

        if auth == Auth::Bearer {
            // Missing tokens are sent as an empty bearer; the server rejects them
            let token = self.token.as_deref().unwrap_or_default();
            request = request.set("Authorization", &format!("Bearer {}", token));
            debug!("{} {} (token {})", method, url, token_preview(token));
        } else {
            debug!("{} {}", method, url);
        }

        let result = match &body {
            Some(json) => request
                .set("Content-Type", "application/json")
                .send_string(json),
            None => request.call(),
        };

        let response = match result {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                let body = response.into_string().unwrap_or_default();
                error!("{} {} failed ({}): {}", method, url, code, body);
                return Err(ApiError::Status { code, body });
            }
            Err(other) => {
                error!("{} {} failed: {}", method, url, other);
                return Err(ApiError::Transport(other.to_string()));
            }
        };

        let code = response.status();
        let text = response
            .into_string()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        debug!("{} {} -> {}", method, url, code);

        // 2xx codes other than 200 count as failures too
        if code != 200 {
            error!("{} {} failed ({}): {}", method, url, code, text);
            return Err(ApiError::Status { code, body: text });
        }
        Ok(text)
    }
}

/// Parse a JSON response body
fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}
