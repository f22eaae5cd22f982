// Resource endpoint: REST verb/path conventions over one resource path.
//
// Pure mapping. No caching, no shape transformation; responses come back
// exactly as the transport produced them.

use std::sync::Arc;

use reqwest::Method;
use serde_json::{Value, json};

use crate::error::Error;
use crate::transport::{ApiResponse, Request, Transport};

/// Query parameters as ordered key/value pairs.
pub type Params = [(String, String)];

/// Verb/path mapper bound to a resource path such as `/api/v1/vehicles`.
#[derive(Clone)]
pub struct ResourceEndpoint {
    transport: Arc<Transport>,
    path: String,
}

impl ResourceEndpoint {
    pub fn new(transport: Arc<Transport>, path: impl Into<String>) -> Self {
        let path = path.into();
        let path = path.trim_end_matches('/').to_owned();
        Self { transport, path }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn transport(&self) -> &Arc<Transport> {
        &self.transport
    }

    fn item_path(&self, id: &str) -> String {
        format!("{}/{id}", self.path)
    }

    fn sub_path(&self, suffix: &str) -> String {
        format!("{}/{suffix}", self.path)
    }

    // ── Collection ───────────────────────────────────────────────────

    /// `GET {path}` with optional query parameters.
    pub async fn list(&self, params: &Params) -> Result<ApiResponse, Error> {
        let request = Request::new(Method::GET, self.path.clone()).with_query(params);
        self.transport.execute(&request).await
    }

    /// `POST {path}`
    pub async fn create(&self, body: &Value) -> Result<ApiResponse, Error> {
        let request = Request::new(Method::POST, self.path.clone()).with_body(body.clone());
        self.transport.execute(&request).await
    }

    /// `GET {path}/search?q={query}` plus any extra parameters.
    pub async fn search(&self, query: &str, params: &Params) -> Result<ApiResponse, Error> {
        let request = Request::new(Method::GET, self.sub_path("search"))
            .with_query(&[("q".to_owned(), query.to_owned())])
            .with_query(params);
        self.transport.execute(&request).await
    }

    /// `GET {path}/{suffix}` for read-only views under the collection, such
    /// as report summaries.
    pub async fn read(&self, suffix: &str, params: &Params) -> Result<ApiResponse, Error> {
        let suffix = suffix.trim_matches('/');
        let path = if suffix.is_empty() {
            self.path.clone()
        } else {
            self.sub_path(suffix)
        };
        let request = Request::new(Method::GET, path).with_query(params);
        self.transport.execute(&request).await
    }

    // ── Single item ──────────────────────────────────────────────────

    /// `GET {path}/{id}`
    pub async fn get_by_id(&self, id: &str) -> Result<ApiResponse, Error> {
        let request = Request::new(Method::GET, self.item_path(id));
        self.transport.execute(&request).await
    }

    /// `PUT {path}/{id}`
    pub async fn update(&self, id: &str, body: &Value) -> Result<ApiResponse, Error> {
        let request = Request::new(Method::PUT, self.item_path(id)).with_body(body.clone());
        self.transport.execute(&request).await
    }

    /// `PATCH {path}/{id}`
    pub async fn patch(&self, id: &str, body: &Value) -> Result<ApiResponse, Error> {
        let request = Request::new(Method::PATCH, self.item_path(id)).with_body(body.clone());
        self.transport.execute(&request).await
    }

    /// `DELETE {path}/{id}`
    pub async fn delete(&self, id: &str) -> Result<ApiResponse, Error> {
        let request = Request::new(Method::DELETE, self.item_path(id));
        self.transport.execute(&request).await
    }

    // ── Bulk ─────────────────────────────────────────────────────────

    /// `POST {path}/bulk` with `{"resources": [...]}`.
    pub async fn bulk_create(&self, resources: &[Value]) -> Result<ApiResponse, Error> {
        let request = Request::new(Method::POST, self.sub_path("bulk"))
            .with_body(json!({ "resources": resources }));
        self.transport.execute(&request).await
    }

    /// `PUT {path}/bulk` with `{"resources": [...]}`.
    pub async fn bulk_update(&self, resources: &[Value]) -> Result<ApiResponse, Error> {
        let request = Request::new(Method::PUT, self.sub_path("bulk"))
            .with_body(json!({ "resources": resources }));
        self.transport.execute(&request).await
    }

    /// `DELETE {path}/bulk` with `{"ids": [...]}`.
    pub async fn bulk_delete(&self, ids: &[String]) -> Result<ApiResponse, Error> {
        let request =
            Request::new(Method::DELETE, self.sub_path("bulk")).with_body(json!({ "ids": ids }));
        self.transport.execute(&request).await
    }
}

impl std::fmt::Debug for ResourceEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceEndpoint")
            .field("path", &self.path)
            .field("base_url", &self.transport.base_url())
            .finish_non_exhaustive()
    }
}
