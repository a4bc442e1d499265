/*
[INPUT]:  Mock credential endpoint responses
[OUTPUT]: Test results for the consumer key handshake
[POS]:    Integration tests - authentication
[UPDATE]: When auth endpoints or flow changes
*/

mod common;

use common::{
    APPLICATION_KEY, APPLICATION_SECRET, api_path, client_for, header_value, mount_server_time,
    requests_to, setup_mock_server,
};
use ovh_api_adapter::{AccessRule, ApiMethod, ConsumerKeyState, Credentials, OvhError};
use serde_json::json;
use tokio_test::assert_ok;
use wiremock::matchers::{any, body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const REDIRECTION: &str = "https://www.ovh.com/fr/";
const VALIDATION_URL: &str = "https://eu.api.ovh.com/auth/?credentialToken=token";

fn app_credentials() -> Credentials {
    Credentials::new(APPLICATION_KEY, APPLICATION_SECRET)
}

async fn mount_credential_grant(server: &MockServer, consumer_key: &str) {
    Mock::given(method("POST"))
        .and(path(api_path("/auth/credential")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "consumerKey": consumer_key,
            "validationUrl": VALIDATION_URL,
            "state": "pendingValidation",
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_request_credentials_sends_rules_in_order_and_stores_key() {
    let server = setup_mock_server().await;
    mount_server_time(&server, 0, 0).await;

    let rules = vec![
        AccessRule::new(ApiMethod::Get, "/me"),
        AccessRule::new(ApiMethod::Delete, "/vps/*"),
        AccessRule::new(ApiMethod::Post, "/vps/*/reboot"),
    ];

    Mock::given(method("POST"))
        .and(path(api_path("/auth/credential")))
        .and(header("X-Ovh-Application", APPLICATION_KEY))
        .and(body_json(json!({
            "accessRules": [
                {"method": "GET", "path": "/me"},
                {"method": "DELETE", "path": "/vps/*"},
                {"method": "POST", "path": "/vps/*/reboot"},
            ],
            "redirection": REDIRECTION,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "consumerKey": "new-consumer-key",
            "validationUrl": VALIDATION_URL,
            "state": "pendingValidation",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, app_credentials());
    assert_eq!(client.consumer_key(), None);

    let grant = assert_ok!(client.request_credentials(&rules, REDIRECTION).await);

    assert_eq!(grant.consumer_key, "new-consumer-key");
    assert_eq!(grant.validation_url, VALIDATION_URL);
    assert_eq!(client.consumer_key().as_deref(), Some("new-consumer-key"));

    let received = requests_to(&server, "/auth/credential").await;
    assert_eq!(header_value(&received[0], "X-Ovh-Signature"), None);
    assert_eq!(header_value(&received[0], "X-Ovh-Consumer"), None);
}

#[tokio::test]
async fn test_request_credentials_all_rights_shorthand() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path(api_path("/auth/credential")))
        .and(body_json(json!({
            "accessRules": [
                {"method": "GET", "path": "/*"},
                {"method": "POST", "path": "/*"},
                {"method": "PUT", "path": "/*"},
                {"method": "DELETE", "path": "/*"},
            ],
            "redirection": REDIRECTION,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "consumerKey": "ck",
            "validationUrl": VALIDATION_URL,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, app_credentials());
    let rules = AccessRule::all_rights_everywhere();
    assert_ok!(client.request_credentials(&rules, REDIRECTION).await);
}

#[tokio::test]
async fn test_request_credentials_invalid_response_keeps_key() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path(api_path("/auth/credential")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"consumerKey": "half"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, app_credentials().with_consumer_key("old-key"));
    let rules = AccessRule::read_only_rights_everywhere();

    let err = client.request_credentials(&rules, REDIRECTION).await.unwrap_err();
    assert!(matches!(err, OvhError::InvalidResponse(_)), "got {err:?}");
    assert_eq!(client.consumer_key().as_deref(), Some("old-key"));
}

#[tokio::test]
async fn test_request_credentials_api_error() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path(api_path("/auth/credential")))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "httpCode": "400 Bad Request",
            "errorCode": "INVALID_RULE",
            "message": "Invalid access rule",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, app_credentials());
    let rules = AccessRule::read_only_rights("/nope");

    let err = client.request_credentials(&rules, REDIRECTION).await.unwrap_err();
    assert!(
        matches!(&err, OvhError::RequestError { code: 400, message, .. } if message == "Invalid access rule"),
        "got {err:?}"
    );
    assert_eq!(client.consumer_key(), None);
}

#[tokio::test]
async fn test_request_credentials_without_application_key() {
    let server = setup_mock_server().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server, Credentials::new("", APPLICATION_SECRET));
    let rules = AccessRule::all_rights_everywhere();

    let err = client.request_credentials(&rules, REDIRECTION).await.unwrap_err();
    assert!(matches!(err, OvhError::MissingApplicationKey), "got {err:?}");
}

#[tokio::test]
async fn test_validation_reaching_redirection_keeps_key() {
    let server = setup_mock_server().await;
    mount_credential_grant(&server, "fresh-key").await;

    let client = client_for(&server, app_credentials().with_consumer_key("old-key"));
    let rules = AccessRule::all_rights_everywhere();

    let mut validation = assert_ok!(client.begin_credential_validation(&rules, REDIRECTION).await);
    assert_eq!(validation.state(), ConsumerKeyState::Requested);
    assert_eq!(validation.validation_url(), VALIDATION_URL);
    assert_eq!(validation.consumer_key(), "fresh-key");
    assert_eq!(validation.previous_consumer_key(), Some("old-key"));
    assert_eq!(client.consumer_key().as_deref(), Some("fresh-key"));
    assert_eq!(client.consumer_key_state(), ConsumerKeyState::Requested);

    assert_eq!(
        validation.observe_navigation(VALIDATION_URL),
        ConsumerKeyState::Requested
    );
    assert_eq!(
        validation.observe_navigation(REDIRECTION),
        ConsumerKeyState::Validated
    );

    assert_eq!(validation.finish(), ConsumerKeyState::Validated);
    assert_eq!(client.consumer_key().as_deref(), Some("fresh-key"));
    assert_eq!(client.consumer_key_state(), ConsumerKeyState::Validated);
}

#[tokio::test]
async fn test_validation_cancel_restores_previous_key() {
    let server = setup_mock_server().await;
    mount_credential_grant(&server, "fresh-key").await;

    let client = client_for(&server, app_credentials());
    assert_eq!(client.consumer_key_state(), ConsumerKeyState::Absent);
    let rules = AccessRule::read_only_rights_everywhere();

    let mut validation = assert_ok!(client.begin_credential_validation(&rules, REDIRECTION).await);
    assert_eq!(client.consumer_key_state(), ConsumerKeyState::Requested);
    validation.observe_navigation(REDIRECTION);

    assert_eq!(validation.cancel(), ConsumerKeyState::Abandoned);
    assert_eq!(client.consumer_key(), None);
    assert_eq!(client.consumer_key_state(), ConsumerKeyState::Absent);
}

#[tokio::test]
async fn test_validation_finished_without_redirect_is_abandoned() {
    let server = setup_mock_server().await;
    mount_credential_grant(&server, "fresh-key").await;

    let client = client_for(&server, app_credentials().with_consumer_key("old-key"));
    let rules = AccessRule::read_only_rights_everywhere();

    let mut validation = assert_ok!(client.begin_credential_validation(&rules, REDIRECTION).await);
    validation.observe_navigation(REDIRECTION);
    // Leaving the redirection page un-validates the flow again.
    assert_eq!(
        validation.observe_navigation("https://www.ovh.com/fr/other"),
        ConsumerKeyState::Requested
    );

    assert_eq!(validation.finish(), ConsumerKeyState::Abandoned);
    assert_eq!(client.consumer_key().as_deref(), Some("old-key"));
    assert_eq!(client.consumer_key_state(), ConsumerKeyState::Validated);
}

#[tokio::test]
async fn test_validated_key_signs_following_calls() {
    let server = setup_mock_server().await;
    mount_credential_grant(&server, "fresh-key").await;
    mount_server_time(&server, 1_700_000_000, 1).await;
    Mock::given(method("GET"))
        .and(path(api_path("/me")))
        .and(header("X-Ovh-Consumer", "fresh-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"email": "a@b.com"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, app_credentials());
    let rules = AccessRule::all_rights("/me");
    assert_ok!(client.request_credentials(&rules, REDIRECTION).await);

    let response = assert_ok!(client.get("/me").await);
    assert_eq!(response.value["email"], "a@b.com");
}
