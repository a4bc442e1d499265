/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for ovh-api-adapter tests

#![allow(dead_code)]

use ovh_api_adapter::{ClientConfig, Credentials, OvhClient};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub const APPLICATION_KEY: &str = "test-app-key";
pub const APPLICATION_SECRET: &str = "test-app-secret";
pub const CONSUMER_KEY: &str = "test-consumer-key";

/// Version segment the mock clients are rooted at
pub const VERSION_PREFIX: &str = "/1.0";

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Application key, secret and consumer key all set
pub fn full_credentials() -> Credentials {
    Credentials::new(APPLICATION_KEY, APPLICATION_SECRET).with_consumer_key(CONSUMER_KEY)
}

/// Client pointed at `{server}/1.0`
pub fn client_for(server: &MockServer, credentials: Credentials) -> OvhClient {
    OvhClient::with_base_url(&base_url(server), credentials, ClientConfig::default())
        .expect("client init")
}

pub fn base_url(server: &MockServer) -> String {
    format!("{}{}", server.uri(), VERSION_PREFIX)
}

/// Path as seen by the mock server, e.g. `/1.0/me`
pub fn api_path(path: &str) -> String {
    format!("{VERSION_PREFIX}{path}")
}

/// Answer GET /auth/time with `server_time`, expecting exactly `calls` hits
pub async fn mount_server_time(server: &MockServer, server_time: i64, calls: u64) {
    Mock::given(method("GET"))
        .and(path(api_path("/auth/time")))
        .respond_with(ResponseTemplate::new(200).set_body_string(server_time.to_string()))
        .expect(calls)
        .mount(server)
        .await;
}

/// Requests received on `path`
pub async fn requests_to(server: &MockServer, path: &str) -> Vec<Request> {
    let wanted = api_path(path);
    server
        .received_requests()
        .await
        .expect("request recording enabled")
        .into_iter()
        .filter(|request| request.url.path() == wanted)
        .collect()
}

pub fn header_value<'a>(request: &'a Request, name: &str) -> Option<&'a str> {
    request
        .headers
        .get(name)
        .map(|value| value.to_str().expect("ascii header"))
}
