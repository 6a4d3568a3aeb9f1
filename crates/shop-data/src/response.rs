//! Responses from the storefront API.

use crate::FetchError;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// A buffered HTTP response. Header names keep whatever case the transport
/// reported; lookups ignore case.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(status: u16, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// 2xx
    pub fn is_success(&self) -> bool {
        self.status / 100 == 2
    }

    /// 4xx
    pub fn is_client_error(&self) -> bool {
        self.status / 100 == 4
    }

    /// 5xx
    pub fn is_server_error(&self) -> bool {
        self.status / 100 == 5
    }

    /// Get the response body as text.
    pub fn text(&self) -> Result<String, FetchError> {
        String::from_utf8(self.body.clone())
            .map_err(|e| FetchError::Parse(format!("Invalid UTF-8: {}", e)))
    }

    /// Parse the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|e| FetchError::Parse(e.to_string()))
    }

    /// Decode the resource carried by this response.
    ///
    /// The API answers either with the bare resource or with an envelope
    /// `{"data": ..., "message": ...}`. A `null` or absent `data` in an
    /// envelope is a missing payload.
    pub fn payload<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return Err(FetchError::Parse("empty response body".to_string()));
        }

        let value: serde_json::Value = self.json()?;
        let resource = match value {
            serde_json::Value::Object(mut map) if is_envelope(&map) => {
                match map.remove("data") {
                    Some(serde_json::Value::Null) | None => {
                        return Err(FetchError::Parse("missing data in response".to_string()));
                    }
                    Some(data) => data,
                }
            }
            other => other,
        };

        serde_json::from_value(resource).map_err(|e| FetchError::Parse(e.to_string()))
    }

    /// Get the raw response body.
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header("Content-Type")
    }

    /// Turn a non-2xx response into [`FetchError::Status`], preferring the
    /// server's `message` field over the raw body.
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            Ok(self)
        } else {
            let message = self
                .server_message()
                .or_else(|| self.text().ok())
                .unwrap_or_else(|| "Unknown error".to_string());
            Err(FetchError::Status {
                status: self.status,
                message,
            })
        }
    }

    /// The `message` field of a JSON error body, if there is one.
    fn server_message(&self) -> Option<String> {
        let value: serde_json::Value = serde_json::from_slice(&self.body).ok()?;
        value.get("message")?.as_str().map(str::to_string)
    }
}

/// An object is an envelope when it has a `data` key and nothing besides the
/// usual envelope metadata.
fn is_envelope(map: &serde_json::Map<String, serde_json::Value>) -> bool {
    const META: [&str; 4] = ["data", "message", "status", "success"];
    map.contains_key("data") && map.keys().all(|k| META.contains(&k.as_str()))
}
