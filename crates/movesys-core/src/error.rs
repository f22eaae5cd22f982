// ── Core error types ──
//
// User-facing errors from movesys-core. Stores never hand raw transport
// errors to their callers; the `From<movesys_api::Error>` impl folds them
// into this taxonomy while keeping the server's own message, if any.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Session ──────────────────────────────────────────────────────
    /// The session was rejected. It has already been cleared and a login
    /// redirect requested; retrying without signing in again is pointless.
    #[error("Authentication required: the session was rejected by the server")]
    AuthenticationRequired,

    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach the API at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request to {url} timed out")]
    Timeout { url: String },

    // ── Server errors ────────────────────────────────────────────────
    #[error("API error (HTTP {status}): {message}")]
    Api {
        status: u16,
        message: String,
        /// The `message` field of the error body, when the server sent one.
        server_message: Option<String>,
    },

    #[error("Server returned no {kind} in its response")]
    EmptyResponse { kind: &'static str },

    // ── Local errors ─────────────────────────────────────────────────
    #[error("Cannot modify a {kind} that has no id")]
    MissingId { kind: &'static str },

    #[error("Unknown filter '{facet}' for {kind} (expected one of: {expected})")]
    UnknownFacet {
        kind: &'static str,
        facet: String,
        expected: String,
    },

    #[error("Failed to load {}", .failures.join(", "))]
    PartialFetch { failures: Vec<String> },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// HTTP status of a server-side failure, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::AuthenticationRequired => Some(401),
            _ => None,
        }
    }
}

/// Human-readable message for a failed store operation: the server's own
/// message when it supplied one, otherwise `fallback`.
pub fn user_message(err: &CoreError, fallback: &str) -> String {
    match err {
        CoreError::Api {
            server_message: Some(message),
            ..
        } => message.clone(),
        _ => fallback.to_owned(),
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<movesys_api::Error> for CoreError {
    fn from(err: movesys_api::Error) -> Self {
        let server_message = err.server_message().map(str::to_owned);
        match err {
            movesys_api::Error::Unauthorized => CoreError::AuthenticationRequired,
            movesys_api::Error::Transport(ref e) => {
                let url = e
                    .url()
                    .map_or_else(|| "<unknown>".into(), ToString::to_string);
                if e.is_timeout() {
                    CoreError::Timeout { url }
                } else {
                    CoreError::ConnectionFailed {
                        url,
                        reason: e.to_string(),
                    }
                }
            }
            movesys_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            movesys_api::Error::InvalidHeader(message) => CoreError::Config { message },
            movesys_api::Error::Api { status, .. } => CoreError::Api {
                status,
                message: server_message
                    .clone()
                    .unwrap_or_else(|| format!("request failed with status {status}")),
                server_message,
            },
            movesys_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn server_message_wins_over_fallback() {
        let err = CoreError::from(movesys_api::Error::Api {
            status: 422,
            body: Some(json!({ "message": "Plate already registered" })),
        });
        assert_eq!(
            user_message(&err, "Failed to create vehicle"),
            "Plate already registered"
        );
        assert_eq!(err.status(), Some(422));
    }

    #[test]
    fn fallback_used_without_server_message() {
        let err = CoreError::from(movesys_api::Error::Api {
            status: 500,
            body: Some(json!({ "error": "boom" })),
        });
        assert_eq!(user_message(&err, "Failed to load vehicles"), "Failed to load vehicles");

        let err = CoreError::from(movesys_api::Error::Unauthorized);
        assert!(matches!(err, CoreError::AuthenticationRequired));
        assert_eq!(user_message(&err, "Failed to load users"), "Failed to load users");
    }

    #[test]
    fn partial_fetch_lists_domains() {
        let err = CoreError::PartialFetch {
            failures: vec!["vehicles".into(), "fuel entries".into()],
        };
        assert_eq!(err.to_string(), "Failed to load vehicles, fuel entries");
    }
}
