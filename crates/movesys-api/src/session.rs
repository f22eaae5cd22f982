// Ambient session seam
//
// The transport reads the bearer token before every request and clears
// the session when the server rejects it. Who writes the session (a login
// flow) and who performs the redirect (the outer shell) live elsewhere;
// these traits are the only contact points.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use arc_swap::ArcSwapOption;
use secrecy::SecretString;
use serde_json::Value;
use tracing::debug;

/// Read/clear access to the `{token, user}` pair of the signed-in operator.
pub trait SessionStore: Send + Sync {
    /// Bearer token, if a session is active. Absence is not an error.
    fn token(&self) -> Option<SecretString>;

    /// Cached user record written by the login flow.
    fn user(&self) -> Option<Value>;

    /// Drop both the token and the cached user.
    fn clear(&self);
}

/// Navigation hook invoked after an unauthorized response.
pub trait LoginRedirect: Send + Sync {
    fn redirect_to_login(&self, login_path: &str);
}

/// A signed-in session.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: SecretString,
    pub user: Option<Value>,
}

/// In-process session store. Reads are wait-free.
#[derive(Debug, Default)]
pub struct MemorySession {
    current: ArcSwapOption<Session>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an active session.
    pub fn with_token(token: impl Into<String>) -> Self {
        let store = Self::new();
        store.set(SecretString::from(token.into()), None);
        store
    }

    /// Replace the session (called by the login flow).
    pub fn set(&self, token: SecretString, user: Option<Value>) {
        self.current.store(Some(Arc::new(Session { token, user })));
    }

    pub fn is_active(&self) -> bool {
        self.current.load().is_some()
    }
}

impl SessionStore for MemorySession {
    fn token(&self) -> Option<SecretString> {
        self.current.load().as_ref().map(|s| s.token.clone())
    }

    fn user(&self) -> Option<Value> {
        self.current.load().as_ref().and_then(|s| s.user.clone())
    }

    fn clear(&self) {
        debug!("clearing session");
        self.current.store(None);
    }
}

/// Redirect hook that does nothing. For headless consumers.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoRedirect;

impl LoginRedirect for NoRedirect {
    fn redirect_to_login(&self, _login_path: &str) {}
}

/// Records that a login redirect was requested so the shell can act on it.
#[derive(Debug, Default)]
pub struct RedirectSignal {
    pending: AtomicBool,
}

impl RedirectSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Consume the pending redirect, returning whether one was requested.
    pub fn take(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }
}

impl LoginRedirect for RedirectSignal {
    fn redirect_to_login(&self, login_path: &str) {
        debug!(login_path, "login redirect requested");
        self.pending.store(true, Ordering::Release);
    }
}
