//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use movesys_config::ConfigError;
use movesys_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the MoveSys API at {url}: {reason}")]
    #[diagnostic(
        code(movesys::connection_failed),
        help(
            "Every configured host was tried.\n\
             Check that the API is running, or point at it with --api-url / --fallback-url."
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request to {url} timed out")]
    #[diagnostic(
        code(movesys::timeout),
        help("Increase the timeout with --timeout or check API responsiveness.")
    )]
    Timeout { url: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Session rejected by the API")]
    #[diagnostic(
        code(movesys::auth_required),
        help(
            "The token is missing or expired. Sign in at {login_path} and pass the new\n\
             token with --token or MOVESYS_TOKEN."
        )
    )]
    AuthRequired { login_path: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{kind} '{id}' not found")]
    #[diagnostic(
        code(movesys::not_found),
        help("Run: movesys {list_command} to see available records")
    )]
    NotFound {
        kind: String,
        id: String,
        list_command: String,
    },

    #[error("API error ({status}): {message}")]
    #[diagnostic(code(movesys::api_error))]
    Api { status: u16, message: String },

    #[error("{message}")]
    #[diagnostic(
        code(movesys::partial_load),
        help("The remaining domains loaded; rerun with -v for per-request logs.")
    )]
    PartialLoad { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(movesys::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(movesys::config),
        help("Inspect the effective settings with: movesys config show")
    )]
    Config { message: String },

    #[error("Config file already exists at {path}")]
    #[diagnostic(
        code(movesys::config_exists),
        help("Pass --force to overwrite it.")
    )]
    ConfigExists { path: String },

    // ── Internal / IO ─────────────────────────────────────────────────
    #[error("{0}")]
    #[diagnostic(code(movesys::internal))]
    Internal(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Could not render output: {0}")]
    #[diagnostic(code(movesys::json))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::AuthRequired { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::ConfigExists { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::AuthenticationRequired => CliError::AuthRequired {
                login_path: "/login".into(),
            },
            CoreError::ConnectionFailed { url, reason } => {
                CliError::ConnectionFailed { url, reason }
            }
            CoreError::Timeout { url } => CliError::Timeout { url },
            CoreError::Api {
                status, message, ..
            } => CliError::Api { status, message },
            CoreError::UnknownFacet {
                facet, expected, ..
            } => CliError::Validation {
                field: facet,
                reason: format!("expected one of: {expected}"),
            },
            err @ CoreError::PartialFetch { .. } => CliError::PartialLoad {
                message: err.to_string(),
            },
            CoreError::Config { message } => CliError::Config { message },
            err @ (CoreError::EmptyResponse { .. }
            | CoreError::MissingId { .. }
            | CoreError::Internal(_)) => CliError::Internal(err.to_string()),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::Io(e) => CliError::Io(e),
            other => CliError::Config {
                message: other.to_string(),
            },
        }
    }
}
