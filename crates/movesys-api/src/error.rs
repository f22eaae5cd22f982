use serde_json::Value;
use thiserror::Error;

/// Top-level error type for the `movesys-api` crate.
///
/// Covers every failure the transport can surface after its own recovery
/// strategies are exhausted. `movesys-core` maps these into user-facing
/// diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The server answered 401. The ambient session has already been
    /// cleared and a login redirect requested by the time this is returned.
    #[error("Unauthorized -- session cleared, login required")]
    Unauthorized,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A header value (e.g. the bearer token) could not be encoded.
    #[error("Invalid header value: {0}")]
    InvalidHeader(String),

    // ── Server ──────────────────────────────────────────────────────
    /// Non-success status with whatever body the server sent, unmodified.
    #[error("API error (HTTP {status}): {}", server_message(.body.as_ref()).unwrap_or("no message"))]
    Api { status: u16, body: Option<Value> },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` for a 401 response.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Returns `true` if no response was received at all.
    pub fn is_connectivity(&self) -> bool {
        match self {
            Self::Transport(e) => !e.is_builder() && e.status().is_none(),
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }

    /// HTTP status of a server-side failure, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Unauthorized => Some(401),
            _ => None,
        }
    }

    /// The `message` field of the server's error body, if it sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Api { body, .. } => server_message(body.as_ref()),
            _ => None,
        }
    }
}

fn server_message(body: Option<&Value>) -> Option<&str> {
    body?
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.trim().is_empty())
}
