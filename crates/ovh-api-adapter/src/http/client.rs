/*
[INPUT]:  Endpoint, credentials, timeouts
[OUTPUT]: Configured client running the signed request pipeline
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing the request pipeline
*/

use std::fmt;
use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use reqwest::{Client, Response};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

use crate::http::signature::RequestSigner;
use crate::http::time::{ClockDelta, now_seconds, signing_timestamp};
use crate::http::{OvhError, Result};
use crate::types::{ApiMethod, ApiResponse, ConsumerKeyState, Endpoint, RequestEnvelope};

const CONTENT_TYPE_JSON: &str = "application/json; charset=utf-8";
pub(crate) const REDACTED: &str = "<redacted>";

pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const HEADER_APPLICATION: &str = "X-Ovh-Application";
pub const HEADER_TIMESTAMP: &str = "X-Ovh-Timestamp";
pub const HEADER_SIGNATURE: &str = "X-Ovh-Signature";
pub const HEADER_CONSUMER: &str = "X-Ovh-Consumer";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Applied to the whole request, from connect to last body byte
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// `None` selects the endpoint's latest version
    pub endpoint_version: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            endpoint_version: None,
        }
    }
}

/// Application and consumer credentials
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub application_key: String,
    pub application_secret: String,
    pub consumer_key: Option<String>,
}

impl Credentials {
    pub fn new(application_key: impl Into<String>, application_secret: impl Into<String>) -> Self {
        Self {
            application_key: application_key.into(),
            application_secret: application_secret.into(),
            consumer_key: None,
        }
    }

    pub fn with_consumer_key(mut self, consumer_key: impl Into<String>) -> Self {
        self.consumer_key = Some(consumer_key.into());
        self
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("application_key", &self.application_key)
            .field("application_secret", &REDACTED)
            .field("consumer_key", &self.consumer_key.as_ref().map(|_| REDACTED))
            .finish()
    }
}

/// Consumer key and where it stands in the credential handshake
struct ConsumerSlot {
    key: Option<String>,
    state: ConsumerKeyState,
}

impl ConsumerSlot {
    /// A key handed in by the caller counts as validated
    fn supplied(key: Option<String>) -> Self {
        let state = match key.as_deref() {
            Some(key) if !key.is_empty() => ConsumerKeyState::Validated,
            _ => ConsumerKeyState::Absent,
        };
        Self { key, state }
    }
}

/// Main HTTP client for the OVH API
pub struct OvhClient {
    pub(crate) http_client: Client,
    base_url: String,
    application_key: String,
    application_secret: String,
    consumer: RwLock<ConsumerSlot>,
    pub(crate) delta: ClockDelta,
}

impl OvhClient {
    /// Client on the latest version of `endpoint`, default timeouts
    pub fn new(endpoint: Endpoint, credentials: Credentials) -> Result<Self> {
        Self::with_config(endpoint, credentials, ClientConfig::default())
    }

    /// Client on `endpoint` with custom configuration
    pub fn with_config(
        endpoint: Endpoint,
        credentials: Credentials,
        config: ClientConfig,
    ) -> Result<Self> {
        let version = config
            .endpoint_version
            .as_deref()
            .unwrap_or_else(|| endpoint.latest_version());
        let base_url = endpoint.base_url(version);
        Self::with_base_url(&base_url, credentials, config)
    }

    /// Client on an explicit base URL (version included).
    ///
    /// `config.endpoint_version` is ignored here.
    pub fn with_base_url(
        base_url: &str,
        credentials: Credentials,
        config: ClientConfig,
    ) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        let base_url = base_url.trim_end_matches('/').to_string();
        info!(base_url = %base_url, "API initialized");

        Ok(Self {
            http_client,
            base_url,
            application_key: credentials.application_key,
            application_secret: credentials.application_secret,
            consumer: RwLock::new(ConsumerSlot::supplied(credentials.consumer_key)),
            delta: ClockDelta::new(),
        })
    }

    /// Base URL every path is appended to, e.g. `https://api.ovh.com/1.0`
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn application_key(&self) -> &str {
        &self.application_key
    }

    /// Current consumer key, validated or not
    pub fn consumer_key(&self) -> Option<String> {
        self.consumer_snapshot().0
    }

    /// Handshake state of the current consumer key
    pub fn consumer_key_state(&self) -> ConsumerKeyState {
        self.consumer_snapshot().1
    }

    /// Replace the consumer key used for authenticated calls.
    ///
    /// A non-empty key is taken as validated; `None` leaves the client
    /// without one.
    pub fn set_consumer_key(&self, consumer_key: Option<String>) {
        *self.consumer.write().unwrap_or_else(PoisonError::into_inner) =
            ConsumerSlot::supplied(consumer_key);
    }

    pub(crate) fn consumer_snapshot(&self) -> (Option<String>, ConsumerKeyState) {
        let slot = self.consumer.read().unwrap_or_else(PoisonError::into_inner);
        (slot.key.clone(), slot.state)
    }

    pub(crate) fn store_consumer_key(&self, key: Option<String>, state: ConsumerKeyState) {
        *self.consumer.write().unwrap_or_else(PoisonError::into_inner) = ConsumerSlot { key, state };
    }

    /// Check the credentials needed for a call, returning the consumer key
    /// for authenticated ones.
    fn check_preconditions(&self, authenticated: bool) -> Result<Option<String>> {
        if self.application_key.is_empty() {
            return Err(OvhError::MissingApplicationKey);
        }
        if self.application_secret.is_empty() {
            return Err(OvhError::MissingApplicationSecret);
        }
        if !authenticated {
            return Ok(None);
        }
        match self.consumer_key() {
            Some(consumer_key) if !consumer_key.is_empty() => Ok(Some(consumer_key)),
            _ => Err(OvhError::MissingConsumerKey),
        }
    }

    /// Sign (when authenticated), send and interpret one API call
    pub(crate) async fn raw_call<B>(
        &self,
        method: ApiMethod,
        path: &str,
        body: Option<&B>,
        authenticated: bool,
    ) -> Result<ApiResponse>
    where
        B: Serialize + ?Sized,
    {
        let consumer_key = match self.check_preconditions(authenticated) {
            Ok(consumer_key) => consumer_key,
            Err(err) => {
                warn!(%method, path, error = %err, "request rejected before sending");
                return Err(err);
            }
        };

        // Authenticated calls wait for the clock delta; its failure ends the call.
        let delta = if authenticated {
            Some(self.clock_delta().await?)
        } else {
            None
        };

        let url = Url::parse(&format!("{}{}", self.base_url, path))?;
        let json_body = body.map(serde_json::to_string).transpose()?;

        let mut headers = vec![
            (HEADER_CONTENT_TYPE.to_string(), CONTENT_TYPE_JSON.to_string()),
            (HEADER_APPLICATION.to_string(), self.application_key.clone()),
        ];

        if let (Some(consumer_key), Some(delta)) = (consumer_key.as_deref(), delta) {
            let timestamp = signing_timestamp(now_seconds(), delta);
            let signed_body = match json_body.as_deref() {
                Some(json) if method.signs_body() => json,
                _ => "",
            };
            let signature = RequestSigner::new(&self.application_secret, consumer_key)
                .sign_request(method, url.as_str(), signed_body, timestamp);

            headers.push((HEADER_TIMESTAMP.to_string(), timestamp.to_string()));
            headers.push((HEADER_SIGNATURE.to_string(), signature));
            headers.push((HEADER_CONSUMER.to_string(), consumer_key.to_string()));
        }

        let request = RequestEnvelope {
            method,
            path: path.to_string(),
            url: url.to_string(),
            body: json_body,
            headers,
            authenticated,
        };

        let header_names: Vec<&str> = request.headers.iter().map(|(name, _)| name.as_str()).collect();
        debug!(%method, path, authenticated, headers = ?header_names, "sending request");

        let mut builder = self.http_client.request(method.into(), url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(json) = &request.body {
            builder = builder.body(json.clone());
        }

        let response = builder.send().await?;
        self.interpret_response(response, request).await
    }

    async fn interpret_response(
        &self,
        response: Response,
        request: RequestEnvelope,
    ) -> Result<ApiResponse> {
        let status = response.status();
        let headers = response.headers().clone();
        let text = response.text().await?;

        debug!(
            method = %request.method,
            path = %request.path,
            status = status.as_u16(),
            body = %text,
            "response received"
        );

        let (method, path) = (request.method, request.path.clone());
        let response = ApiResponse {
            value: parse_body(&text),
            status,
            headers,
            request,
        };
        OvhError::check_response(response).inspect_err(|err| {
            warn!(
                %method,
                path = %path,
                status = status.as_u16(),
                error = %err,
                "API returned an error"
            );
        })
    }
}

impl fmt::Debug for OvhClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OvhClient")
            .field("base_url", &self.base_url)
            .field("application_key", &self.application_key)
            .field("consumer_key", &self.consumer_key().map(|_| REDACTED))
            .field("consumer_key_state", &self.consumer_key_state())
            .field("delta", &self.delta.get())
            .finish_non_exhaustive()
    }
}

/// JSON when the body parses, raw text otherwise, `Null` when empty
pub(crate) fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
