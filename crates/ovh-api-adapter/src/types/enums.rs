/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust enums with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use std::fmt;

use reqwest::Method;
use serde::{Deserialize, Serialize};

/// HTTP methods understood by the OVH API (signature and access rules)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ApiMethod {
    Get,
    Post,
    Put,
    Delete,
    Head,
    Options,
    Patch,
    Trace,
    Connect,
}

impl ApiMethod {
    /// Uppercase token, as used in the signature payload
    pub fn as_str(self) -> &'static str {
        match self {
            ApiMethod::Get => "GET",
            ApiMethod::Post => "POST",
            ApiMethod::Put => "PUT",
            ApiMethod::Delete => "DELETE",
            ApiMethod::Head => "HEAD",
            ApiMethod::Options => "OPTIONS",
            ApiMethod::Patch => "PATCH",
            ApiMethod::Trace => "TRACE",
            ApiMethod::Connect => "CONNECT",
        }
    }

    /// Whether the request body takes part in the signature
    pub fn signs_body(self) -> bool {
        matches!(self, ApiMethod::Post | ApiMethod::Put)
    }
}

impl fmt::Display for ApiMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ApiMethod> for Method {
    fn from(method: ApiMethod) -> Self {
        match method {
            ApiMethod::Get => Method::GET,
            ApiMethod::Post => Method::POST,
            ApiMethod::Put => Method::PUT,
            ApiMethod::Delete => Method::DELETE,
            ApiMethod::Head => Method::HEAD,
            ApiMethod::Options => Method::OPTIONS,
            ApiMethod::Patch => Method::PATCH,
            ApiMethod::Trace => Method::TRACE,
            ApiMethod::Connect => Method::CONNECT,
        }
    }
}

/// Lifecycle of a consumer key obtained through the credential handshake
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConsumerKeyState {
    /// The client holds no consumer key
    #[default]
    Absent,
    /// Key issued and stored, waiting for the user to visit the validation URL
    Requested,
    /// The user reached the redirection URL, or the key was supplied directly
    Validated,
    /// The user gave up; the previous key was restored
    Abandoned,
}
