//! Wire transports.
//!
//! `FetchClient` never touches sockets itself; it hands a finished
//! [`RequestBuilder`] to a [`Transport`]. Native builds go through reqwest,
//! Spin components through the host's outbound HTTP.

use async_trait::async_trait;

use crate::{FetchError, RequestBuilder, Response};

/// Sends one request and returns whatever the server answered.
///
/// Implementations must not interpret the status code; the client turns
/// non-2xx responses into errors.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait Transport: Send + Sync {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError>;
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::ReqwestTransport;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use super::*;
    use std::collections::HashMap;

    /// Transport backed by a shared `reqwest::Client`.
    ///
    /// No timeout is configured: a request waits as long as the server does.
    #[derive(Debug, Clone)]
    pub struct ReqwestTransport {
        client: reqwest::Client,
    }

    impl ReqwestTransport {
        pub fn new() -> Result<Self, FetchError> {
            let client = reqwest::Client::builder()
                .build()
                .map_err(|e| FetchError::Transport(e.to_string()))?;
            Ok(Self { client })
        }

        /// Reuse an existing client (connection pool, proxy settings...).
        pub fn with_client(client: reqwest::Client) -> Self {
            Self { client }
        }
    }

    #[async_trait]
    impl Transport for ReqwestTransport {
        async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
            let method = reqwest::Method::from_bytes(request.method.as_str().as_bytes())
                .map_err(|e| FetchError::Transport(e.to_string()))?;
            let url = reqwest::Url::parse(&request.url)
                .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", request.url, e)))?;

            let mut builder = self.client.request(method, url);
            for (key, value) in &request.headers {
                builder = builder.header(key.as_str(), value.as_str());
            }
            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            let response = builder
                .send()
                .await
                .map_err(|e| FetchError::Transport(e.to_string()))?;

            let status = response.status().as_u16();
            let headers: HashMap<String, String> = response
                .headers()
                .iter()
                .map(|(k, v)| (k.as_str().to_string(), v.to_str().unwrap_or("").to_string()))
                .collect();
            let body = response
                .bytes()
                .await
                .map_err(|e| FetchError::Transport(e.to_string()))?
                .to_vec();

            Ok(Response::new(status, headers, body))
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use spin::SpinTransport;

#[cfg(target_arch = "wasm32")]
mod spin {
    use super::*;
    use spin_sdk::http::{Method as SpinMethod, Request};
    use std::collections::HashMap;

    use crate::Method;

    /// Transport over Spin's outbound HTTP.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SpinTransport;

    #[async_trait(?Send)]
    impl Transport for SpinTransport {
        async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
            let method = match request.method {
                Method::Get => SpinMethod::Get,
                Method::Post => SpinMethod::Post,
                Method::Put => SpinMethod::Put,
                Method::Patch => SpinMethod::Patch,
                Method::Delete => SpinMethod::Delete,
                Method::Head => SpinMethod::Head,
                Method::Options => SpinMethod::Options,
            };

            let mut builder = Request::builder();
            builder.method(method);
            builder.uri(request.url.as_str());
            for (key, value) in &request.headers {
                builder.header(key.as_str(), value.as_str());
            }
            builder.body(request.body.unwrap_or_default());
            let outbound = builder.build();

            let response: spin_sdk::http::Response = spin_sdk::http::send(outbound)
                .await
                .map_err(|e| FetchError::Transport(e.to_string()))?;

            let status = *response.status();
            let headers: HashMap<String, String> = response
                .headers()
                .map(|(k, v)| (k.to_string(), v.as_str().unwrap_or("").to_string()))
                .collect();

            Ok(Response::new(status, headers, response.into_body()))
        }
    }
}
