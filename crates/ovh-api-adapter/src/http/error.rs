/*
[INPUT]:  Error sources (local preconditions, HTTP status, API error bodies, transport)
[OUTPUT]: Structured error type distinguishing misconfiguration, rejection and transport
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use serde_json::Value;
use thiserror::Error;

use crate::types::ApiResponse;

/// Main error type for the OVH adapter
#[derive(Error, Debug)]
pub enum OvhError {
    /// Application key is empty
    #[error("Application key is missing")]
    MissingApplicationKey,

    /// Application secret is empty
    #[error("Application secret is missing")]
    MissingApplicationSecret,

    /// Authenticated call without a consumer key
    #[error("Consumer key is missing")]
    MissingConsumerKey,

    /// Server body does not match the shape expected for the endpoint
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// HTTP status >= 400 without a structured error body
    #[error("HTTP error {code}")]
    HttpError {
        code: u16,
        /// Body, headers and the signed request of the rejected exchange
        response: Box<ApiResponse>,
    },

    /// HTTP status >= 400 with an API error body carrying a message
    #[error("{message}")]
    RequestError {
        code: u16,
        http_code: Option<String>,
        error_code: Option<String>,
        message: String,
        response: Box<ApiResponse>,
    },

    /// Transport failure (DNS, connection, timeout, ...)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl OvhError {
    /// Local misconfiguration detected before any network I/O
    pub fn is_precondition_failure(&self) -> bool {
        matches!(
            self,
            OvhError::MissingApplicationKey
                | OvhError::MissingApplicationSecret
                | OvhError::MissingConsumerKey
        )
    }

    /// The server answered and refused the request
    pub fn is_server_rejection(&self) -> bool {
        matches!(self, OvhError::HttpError { .. } | OvhError::RequestError { .. })
    }

    /// The request never got a usable HTTP answer
    pub fn is_transport_error(&self) -> bool {
        matches!(self, OvhError::Http(_))
    }

    /// HTTP status carried by the error, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            OvhError::HttpError { code, .. } | OvhError::RequestError { code, .. } => Some(*code),
            OvhError::Http(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }

    /// Exchange behind a server rejection: parsed body, response headers
    /// and the request as signed and sent
    pub fn response(&self) -> Option<&ApiResponse> {
        match self {
            OvhError::HttpError { response, .. } | OvhError::RequestError { response, .. } => {
                Some(response)
            }
            _ => None,
        }
    }

    /// Turn an error status into the richest error available.
    ///
    /// Statuses below 400 pass the response through. An object body with a
    /// string `message` wins over the bare status.
    pub fn check_response(response: ApiResponse) -> Result<ApiResponse> {
        let code = response.status.as_u16();
        if code < 400 {
            return Ok(response);
        }

        let api_error = response.value.as_object().and_then(|object| {
            let message = object.get("message").and_then(Value::as_str)?;
            let field = |name: &str| object.get(name).and_then(Value::as_str).map(str::to_string);
            Some((field("httpCode"), field("errorCode"), message.to_string()))
        });

        let response = Box::new(response);
        Err(match api_error {
            Some((http_code, error_code, message)) => OvhError::RequestError {
                code,
                http_code,
                error_code,
                message,
                response,
            },
            None => OvhError::HttpError { code, response },
        })
    }
}

/// Result type alias for OVH operations
pub type Result<T> = std::result::Result<T, OvhError>;
