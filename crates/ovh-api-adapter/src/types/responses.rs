/*
[INPUT]:  Raw HTTP exchanges with the OVH API
[OUTPUT]: Typed response wrappers and the request envelope that produced them
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use std::fmt;

use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::enums::ApiMethod;
use crate::http::Result;
use crate::http::client::{HEADER_CONSUMER, REDACTED};

/// Snapshot of a request as it was sent
#[derive(Clone, PartialEq)]
pub struct RequestEnvelope {
    pub method: ApiMethod,
    pub path: String,
    pub url: String,
    pub body: Option<String>,
    pub headers: Vec<(String, String)>,
    pub authenticated: bool,
}

impl RequestEnvelope {
    /// Look up a header value (case-insensitive name)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

impl fmt::Debug for RequestEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: Vec<(&str, &str)> = self
            .headers
            .iter()
            .map(|(name, value)| {
                if name.eq_ignore_ascii_case(HEADER_CONSUMER) {
                    (name.as_str(), REDACTED)
                } else {
                    (name.as_str(), value.as_str())
                }
            })
            .collect();
        f.debug_struct("RequestEnvelope")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("url", &self.url)
            .field("body", &self.body)
            .field("headers", &headers)
            .field("authenticated", &self.authenticated)
            .finish()
    }
}

/// One API exchange: parsed body, status and headers, plus the request that
/// produced it. Server rejections carry it too.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// Parsed body: JSON when possible, raw text otherwise, `Null` when empty
    pub value: Value,
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub request: RequestEnvelope,
}

impl ApiResponse {
    /// Deserialize the body into a typed value
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(self.value.clone())?)
    }

    pub fn into_value(self) -> Value {
        self.value
    }
}

/// Result of `POST /auth/credential`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CredentialGrant {
    #[serde(rename = "consumerKey")]
    pub consumer_key: String,
    #[serde(rename = "validationUrl")]
    pub validation_url: String,
}
