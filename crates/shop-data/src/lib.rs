//! Authenticated HTTP client for the storefront API.
//!
//! A thin wrapper that every fetch action goes through. It:
//!
//! - joins request paths onto the configured API base URL,
//! - attaches `Authorization: Bearer ...` from a [`TokenSource`] when a token exists,
//! - emits progress start/end events around every call (end is unconditional),
//! - turns non-2xx responses and malformed bodies into [`FetchError`].
//!
//! It does not retry, deduplicate, cache, or time out requests.
//!
//! # Example
//!
//! ```rust,ignore
//! use shop_data::{FetchClient, ReqwestTransport};
//!
//! let client = FetchClient::new(ReqwestTransport::new()?)
//!     .with_base_url("https://api.example.com/v1");
//!
//! let business: BusinessInfo = client
//!     .get("/business/ada-foods")
//!     .send_json()
//!     .await?;
//! ```

mod auth;
mod error;
mod progress;
mod request;
mod response;
mod transport;

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::debug;

pub use auth::{NoToken, StaticToken, TokenSource};
pub use error::{ErrorKind, FetchError};
pub use progress::{NoProgress, Outcome, ProgressCounter, ProgressSink, RequestInfo};
pub use request::{Method, RequestBuilder};
pub use response::Response;
pub use transport::Transport;

#[cfg(not(target_arch = "wasm32"))]
pub use transport::ReqwestTransport;
#[cfg(target_arch = "wasm32")]
pub use transport::SpinTransport;

use progress::ProgressGuard;

/// HTTP client for the storefront API.
///
/// Cheap to clone; clones share the transport, token source, progress sink
/// and request counter.
#[derive(Clone)]
pub struct FetchClient {
    base_url: Option<String>,
    default_headers: HashMap<String, String>,
    transport: Arc<dyn Transport>,
    tokens: Arc<dyn TokenSource>,
    progress: Arc<dyn ProgressSink>,
    next_id: Arc<AtomicU64>,
}

impl FetchClient {
    /// Create a client over the given transport, with no credentials and no
    /// progress reporting.
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self::from_shared(Arc::new(transport))
    }

    /// Create a client over an already shared transport.
    pub fn from_shared(transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: None,
            default_headers: HashMap::new(),
            transport,
            tokens: Arc::new(NoToken),
            progress: Arc::new(NoProgress),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Create a client using the platform's default transport.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn native() -> Result<Self, FetchError> {
        Ok(Self::new(ReqwestTransport::new()?))
    }

    /// Create a client using the platform's default transport.
    #[cfg(target_arch = "wasm32")]
    pub fn native() -> Result<Self, FetchError> {
        Ok(Self::new(SpinTransport))
    }

    /// Prepend this base URL to every relative request path.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Read bearer tokens from this source.
    pub fn with_tokens(mut self, tokens: Arc<dyn TokenSource>) -> Self {
        self.tokens = tokens;
        self
    }

    /// Report request start/end to this sink.
    pub fn with_progress(mut self, progress: Arc<dyn ProgressSink>) -> Self {
        self.progress = progress;
        self
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Create a GET request.
    pub fn get(&self, path: impl Into<String>) -> ClientRequestBuilder<'_> {
        self.request(Method::Get, path)
    }

    /// Create a POST request.
    pub fn post(&self, path: impl Into<String>) -> ClientRequestBuilder<'_> {
        self.request(Method::Post, path)
    }

    /// Create a PUT request.
    pub fn put(&self, path: impl Into<String>) -> ClientRequestBuilder<'_> {
        self.request(Method::Put, path)
    }

    /// Create a PATCH request.
    pub fn patch(&self, path: impl Into<String>) -> ClientRequestBuilder<'_> {
        self.request(Method::Patch, path)
    }

    /// Create a DELETE request.
    pub fn delete(&self, path: impl Into<String>) -> ClientRequestBuilder<'_> {
        self.request(Method::Delete, path)
    }

    /// Create a request with a custom method.
    pub fn request(&self, method: Method, path: impl Into<String>) -> ClientRequestBuilder<'_> {
        let url = self.resolve(path.into());

        let mut builder = RequestBuilder::new(method, url).accept("application/json");
        for (key, value) in &self.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }

        ClientRequestBuilder {
            client: self,
            builder,
        }
    }

    fn resolve(&self, path: String) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path;
        }
        match &self.base_url {
            Some(base) => format!(
                "{}/{}",
                base.trim_end_matches('/'),
                path.trim_start_matches('/')
            ),
            None => path,
        }
    }

    fn next_request_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }
}

impl std::fmt::Debug for FetchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchClient")
            .field("base_url", &self.base_url)
            .field("default_headers", &self.default_headers)
            .finish_non_exhaustive()
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder<'a> {
    client: &'a FetchClient,
    builder: RequestBuilder,
}

impl<'a> ClientRequestBuilder<'a> {
    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.header(key, value);
        self
    }

    /// Append query parameters; `None` values are left out.
    pub fn query<K, V>(mut self, pairs: impl IntoIterator<Item = (K, Option<V>)>) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.builder = self.builder.query(pairs);
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: serde::Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        self.builder = self.builder.json(value)?;
        Ok(self)
    }

    /// Send the request.
    ///
    /// Non-2xx responses come back as [`FetchError::Status`].
    pub async fn send(self) -> Result<Response, FetchError> {
        let ClientRequestBuilder {
            client,
            mut builder,
        } = self;

        if let Some(token) = client.tokens.bearer_token() {
            builder = builder.bearer_auth(token);
        }

        let info = RequestInfo {
            id: client.next_request_id(),
            method: builder.method,
            url: builder.url.clone(),
        };
        debug!(id = info.id, method = %info.method, url = %info.url, "request started");

        let mut guard = ProgressGuard::start(client.progress.clone(), info.clone());
        let result = client
            .transport
            .send(builder)
            .await
            .and_then(Response::error_for_status);

        let outcome = match &result {
            Ok(response) => Outcome::Status(response.status),
            Err(FetchError::Status { status, .. }) => Outcome::Status(*status),
            Err(_) => Outcome::Failed,
        };
        guard.settle(outcome);
        debug!(id = info.id, ?outcome, "request settled");

        result
    }

    /// Send the request and decode the resource from the response body.
    pub async fn send_json<T: DeserializeOwned>(self) -> Result<T, FetchError> {
        self.send().await?.payload()
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FetchClient, FetchError, Method, ProgressSink, Response, TokenSource, Transport};
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records every request and answers with a fixed response.
    struct CannedTransport {
        status: u16,
        body: &'static str,
        seen: Mutex<Vec<RequestBuilder>>,
    }

    impl CannedTransport {
        fn new(status: u16, body: &'static str) -> Arc<Self> {
            Arc::new(Self {
                status,
                body,
                seen: Mutex::new(Vec::new()),
            })
        }

        fn last(&self) -> RequestBuilder {
            self.seen.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl Transport for CannedTransport {
        async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
            self.seen.lock().unwrap().push(request);
            Ok(Response::new(
                self.status,
                HashMap::new(),
                self.body.as_bytes().to_vec(),
            ))
        }
    }

    struct DownTransport;

    #[async_trait]
    impl Transport for DownTransport {
        async fn send(&self, _request: RequestBuilder) -> Result<Response, FetchError> {
            Err(FetchError::Transport("connection refused".into()))
        }
    }

    #[tokio::test]
    async fn test_relative_path_joins_base_url() {
        let transport = CannedTransport::new(200, "{}");
        let client =
            FetchClient::from_shared(transport.clone()).with_base_url("https://api.test/v1/");
        client.get("/cart").send().await.unwrap();
        assert_eq!(transport.last().url(), "https://api.test/v1/cart");
    }

    #[tokio::test]
    async fn test_absolute_url_is_kept() {
        let transport = CannedTransport::new(200, "{}");
        let client = FetchClient::from_shared(transport.clone()).with_base_url("https://api.test");
        client.get("https://cdn.test/x").send().await.unwrap();
        assert_eq!(transport.last().url(), "https://cdn.test/x");
    }

    #[tokio::test]
    async fn test_bearer_token_attached_when_present() {
        let transport = CannedTransport::new(200, "{}");
        let client = FetchClient::from_shared(transport.clone())
            .with_tokens(Arc::new(StaticToken("secret".into())));
        client.get("/cart").send().await.unwrap();
        assert_eq!(
            transport.last().headers().get("Authorization").map(String::as_str),
            Some("Bearer secret")
        );
    }

    #[tokio::test]
    async fn test_no_token_no_header() {
        let transport = CannedTransport::new(200, "{}");
        let client = FetchClient::from_shared(transport.clone());
        client.get("/cart").send().await.unwrap();
        assert!(!transport.last().headers().contains_key("Authorization"));
    }

    #[tokio::test]
    async fn test_non_2xx_is_status_error_and_progress_ends() {
        let transport = CannedTransport::new(404, r#"{"message": "not found"}"#);
        let counter = Arc::new(ProgressCounter::new());
        let client = FetchClient::from_shared(transport).with_progress(counter.clone());

        let err = client.get("/business/nope").send().await.unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(counter.started_count(), 1);
        assert_eq!(counter.finished_count(), 1);
        assert_eq!(counter.failed_count(), 1);
        assert!(!counter.is_busy());
    }

    #[tokio::test]
    async fn test_transport_failure_still_ends_progress() {
        let counter = Arc::new(ProgressCounter::new());
        let client = FetchClient::new(DownTransport).with_progress(counter.clone());

        let err = client.get("/cart").send().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(counter.finished_count(), 1);
        assert!(!counter.is_busy());
    }

    #[tokio::test]
    async fn test_send_json_decodes_envelope() {
        let transport = CannedTransport::new(200, r#"{"data": ["NGN", "USD"]}"#);
        let client = FetchClient::from_shared(transport);
        let codes: Vec<String> = client.get("/currencies").send_json().await.unwrap();
        assert_eq!(codes, vec!["NGN", "USD"]);
    }

    #[tokio::test]
    async fn test_malformed_json_is_payload_error() {
        let transport = CannedTransport::new(200, "not json");
        let counter = Arc::new(ProgressCounter::new());
        let client = FetchClient::from_shared(transport).with_progress(counter.clone());
        let result: Result<Vec<String>, _> = client.get("/currencies").send_json().await;
        assert_eq!(result.unwrap_err().kind(), ErrorKind::Payload);
        assert_eq!(counter.finished_count(), 1);
    }

    #[tokio::test]
    async fn test_request_ids_increase() {
        struct Ids(Mutex<Vec<u64>>);
        impl ProgressSink for Ids {
            fn started(&self, request: &RequestInfo) {
                self.0.lock().unwrap().push(request.id);
            }
            fn finished(&self, _request: &RequestInfo, _outcome: Outcome) {}
        }

        let ids = Arc::new(Ids(Mutex::new(Vec::new())));
        let client = FetchClient::from_shared(CannedTransport::new(200, "{}"))
            .with_progress(ids.clone());
        client.get("/a").send().await.unwrap();
        client.clone().get("/b").send().await.unwrap();
        assert_eq!(*ids.0.lock().unwrap(), vec![1, 2]);
    }
}
