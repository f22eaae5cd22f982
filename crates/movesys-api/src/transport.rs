// Resilient HTTP transport shared by every resource endpoint of a domain.
//
// One `Transport` wraps one `reqwest::Client` plus a mutable base URL.
// Every request gets the ambient bearer token; the response pipeline
// evicts the session on 401, walks a fixed list of fallback hosts when
// no response arrives, and strips a duplicated `/api[/vN]` suffix from
// the base URL after a 404. Base URL changes are sticky for the lifetime
// of the instance.

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use secrecy::ExposeSecret;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::error::Error;
use crate::session::{LoginRedirect, SessionStore};

/// Primary host used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Conventional local development hosts tried after the configured fallback.
pub const LOCAL_FALLBACK_HOSTS: [&str; 3] = [
    "http://localhost:3000",
    "http://localhost:3001",
    "http://localhost:4000",
];

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_LOGIN_PATH: &str = "/login";

// ── Configuration ────────────────────────────────────────────────────

/// Connection settings for one [`Transport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Primary base URL, e.g. `http://localhost:3000` or `https://host/api/v1`.
    pub base_url: String,
    /// Operator-configured alternate host, tried first on connectivity failure.
    pub fallback_url: Option<String>,
    /// Conventional hosts tried after `fallback_url`, in order.
    pub local_fallbacks: Vec<String>,
    pub timeout: Duration,
    /// Where the application sends the operator after a 401.
    pub login_path: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            fallback_url: None,
            local_fallbacks: LOCAL_FALLBACK_HOSTS.iter().map(|h| (*h).to_owned()).collect(),
            timeout: DEFAULT_TIMEOUT,
            login_path: DEFAULT_LOGIN_PATH.to_owned(),
        }
    }
}

impl TransportConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_fallback(mut self, url: impl Into<String>) -> Self {
        self.fallback_url = Some(url.into());
        self
    }

    /// Replace the conventional local fallback hosts.
    pub fn with_local_fallbacks<I, S>(mut self, hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.local_fallbacks = hosts.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Ordered, deduplicated fallback candidates: configured fallback
    /// first, then the conventional local hosts. Blank entries are skipped.
    pub fn fallback_hosts(&self) -> Vec<String> {
        let mut hosts: Vec<String> = Vec::new();
        for candidate in self.fallback_url.iter().chain(&self.local_fallbacks) {
            let candidate = candidate.trim();
            if candidate.is_empty() || hosts.iter().any(|h| h == candidate) {
                continue;
            }
            hosts.push(candidate.to_owned());
        }
        hosts
    }

    /// Build a `reqwest::Client` with the timeout and JSON content
    /// negotiation headers applied to every request.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("movesys/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(Error::Transport)
    }
}

// ── Request / response envelopes ─────────────────────────────────────

/// A request envelope. Paths are relative to the transport's current base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn with_query(mut self, params: &[(String, String)]) -> Self {
        self.query.extend_from_slice(params);
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// A successful (2xx) response. `body` is `None` when the server sent nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Option<Value>,
}

impl ApiResponse {
    /// `true` for 204 or any success without a usable body.
    pub fn is_no_content(&self) -> bool {
        self.status == StatusCode::NO_CONTENT || matches!(self.body, None | Some(Value::Null))
    }
}

#[derive(Debug, Default)]
struct RetryState {
    host_retries: usize,
    stripped_prefix: bool,
}

// ── Transport ────────────────────────────────────────────────────────

/// HTTP client with session injection and host/path recovery.
pub struct Transport {
    http: reqwest::Client,
    base_url: ArcSwap<String>,
    fallback_hosts: Vec<String>,
    login_path: String,
    session: Arc<dyn SessionStore>,
    redirect: Arc<dyn LoginRedirect>,
}

impl Transport {
    /// Build a transport with its own `reqwest::Client`.
    pub fn new(
        config: &TransportConfig,
        session: Arc<dyn SessionStore>,
        redirect: Arc<dyn LoginRedirect>,
    ) -> Result<Self, Error> {
        let http = config.build_client()?;
        Self::with_client(http, config, session, redirect)
    }

    /// Wrap a pre-built `reqwest::Client` (caller manages default headers).
    pub fn with_client(
        http: reqwest::Client,
        config: &TransportConfig,
        session: Arc<dyn SessionStore>,
        redirect: Arc<dyn LoginRedirect>,
    ) -> Result<Self, Error> {
        let base = config.base_url.trim();
        Url::parse(base)?;
        Ok(Self {
            http,
            base_url: ArcSwap::from_pointee(base.to_owned()),
            fallback_hosts: config.fallback_hosts(),
            login_path: config.login_path.clone(),
            session,
            redirect,
        })
    }

    /// The base URL requests are currently sent to.
    pub fn base_url(&self) -> String {
        self.base_url.load().as_ref().clone()
    }

    pub fn fallback_hosts(&self) -> &[String] {
        &self.fallback_hosts
    }

    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    fn set_base_url(&self, url: String) {
        self.base_url.store(Arc::new(url));
    }

    /// Send a request, applying the recovery strategies.
    ///
    /// A single call walks each fallback host at most once and strips the
    /// API prefix at most once. 2xx responses come back as [`ApiResponse`];
    /// every other status is returned as [`Error::Api`] with the body intact.
    pub async fn execute(&self, request: &Request) -> Result<ApiResponse, Error> {
        let mut retry = RetryState::default();

        loop {
            let base = self.base_url();
            let url = join_url(&base, &request.path)?;
            debug!(method = %request.method, %url, "sending request");

            let response = match self.dispatch(request, url.clone()).await? {
                Ok(response) => response,
                Err(err) if err.is_builder() => return Err(Error::Transport(err)),
                Err(err) => {
                    warn!(method = %request.method, %url, error = %err, "request received no response");
                    let Some(next) = self.fallback_hosts.get(retry.host_retries) else {
                        return Err(Error::Transport(err));
                    };
                    retry.host_retries += 1;
                    warn!(
                        from = %base,
                        to = %next,
                        attempt = retry.host_retries,
                        "retrying against fallback host"
                    );
                    self.set_base_url(next.clone());
                    continue;
                }
            };

            let status = response.status();
            if status == StatusCode::UNAUTHORIZED {
                self.evict_session();
                return Err(Error::Unauthorized);
            }

            if status == StatusCode::NOT_FOUND && !retry.stripped_prefix {
                if let Some(stripped) = strip_api_suffix(&base) {
                    retry.stripped_prefix = true;
                    warn!(%url, from = %base, to = %stripped, "404 under versioned base URL, retrying without prefix");
                    self.set_base_url(stripped);
                    continue;
                }
            }

            return read_response(status, response).await;
        }
    }

    /// Issue one attempt. The outer `Result` is for failures building the
    /// auth header; the inner one is reqwest's.
    async fn dispatch(
        &self,
        request: &Request,
        url: Url,
    ) -> Result<Result<reqwest::Response, reqwest::Error>, Error> {
        let mut builder = self.http.request(request.method.clone(), url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(ref body) = request.body {
            builder = builder.json(body);
        }
        if let Some(auth) = self.authorization()? {
            builder = builder.header(AUTHORIZATION, auth);
        }
        Ok(builder.send().await)
    }

    fn authorization(&self) -> Result<Option<HeaderValue>, Error> {
        let Some(token) = self.session.token() else {
            return Ok(None);
        };
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
            .map_err(|e| Error::InvalidHeader(format!("bearer token: {e}")))?;
        value.set_sensitive(true);
        Ok(Some(value))
    }

    fn evict_session(&self) {
        warn!(login_path = %self.login_path, "401 received, clearing session");
        self.session.clear();
        self.redirect.redirect_to_login(&self.login_path);
    }
}

// ── Helpers ──────────────────────────────────────────────────────────

async fn read_response(status: StatusCode, response: reqwest::Response) -> Result<ApiResponse, Error> {
    let raw = response.text().await?;

    if !status.is_success() {
        let body = if raw.trim().is_empty() {
            None
        } else {
            Some(serde_json::from_str(&raw).unwrap_or(Value::String(raw)))
        };
        return Err(Error::Api {
            status: status.as_u16(),
            body,
        });
    }

    if raw.trim().is_empty() {
        return Ok(ApiResponse { status, body: None });
    }

    let body = serde_json::from_str(&raw).map_err(|e| {
        let preview: String = raw.chars().take(200).collect();
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body: raw.clone(),
        }
    })?;
    Ok(ApiResponse {
        status,
        body: Some(body),
    })
}

/// Concatenate base and path with exactly one separating slash.
fn join_url(base: &str, path: &str) -> Result<Url, Error> {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    Ok(Url::parse(&format!("{base}/{path}"))?)
}

/// Remove a trailing `/api` or `/api/v<N>` from a base URL.
fn strip_api_suffix(base: &str) -> Option<String> {
    let unversioned = match base.rsplit_once("/v") {
        Some((head, version))
            if !version.is_empty() && version.bytes().all(|b| b.is_ascii_digit()) =>
        {
            head
        }
        _ => base,
    };
    unversioned.strip_suffix("/api").map(str::to_owned)
}
