/*
[INPUT]:  Access rules, redirection URL and the client
[OUTPUT]: Consumer key + validation URL, and the key's validation lifecycle
[POS]:    Auth layer - orchestrates the consumer key handshake
[UPDATE]: When auth endpoints or flow steps change
*/

use std::fmt;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::http::{OvhClient, OvhError, Result};
use crate::types::{AccessRule, ApiMethod, ConsumerKeyState, CredentialGrant, CredentialRequest};

const CREDENTIAL_PATH: &str = "/auth/credential";

impl OvhClient {
    /// Request a new consumer key for `access_rules`.
    ///
    /// POST /auth/credential (unauthenticated)
    ///
    /// The returned key is stored on the client right away, before the user
    /// has approved it at `validation_url`; calls signed with it fail
    /// server-side until then.
    pub async fn request_credentials(
        &self,
        access_rules: &[AccessRule],
        redirection: &str,
    ) -> Result<CredentialGrant> {
        info!(rules = access_rules.len(), redirection, "requesting credentials");

        let body = CredentialRequest {
            access_rules,
            redirection,
        };
        let response = self
            .raw_call(ApiMethod::Post, CREDENTIAL_PATH, Some(&body), false)
            .await
            .inspect_err(|err| warn!(error = %err, "error while requesting credentials"))?;

        let grant = parse_grant(&response.value)?;
        self.store_consumer_key(Some(grant.consumer_key.clone()), ConsumerKeyState::Requested);

        info!(
            validation_url = %grant.validation_url,
            "request credentials done"
        );
        Ok(grant)
    }

    /// Request a consumer key and track its validation by the user.
    ///
    /// The guard restores the consumer key held before this call if the user
    /// never reaches `redirection`.
    pub async fn begin_credential_validation(
        &self,
        access_rules: &[AccessRule],
        redirection: &str,
    ) -> Result<CredentialValidation<'_>> {
        let (previous_consumer_key, previous_state) = self.consumer_snapshot();
        let grant = self.request_credentials(access_rules, redirection).await?;

        Ok(CredentialValidation {
            client: self,
            previous_consumer_key,
            previous_state,
            grant,
            redirection_url: redirection.to_string(),
            state: ConsumerKeyState::Requested,
        })
    }
}

fn parse_grant(value: &Value) -> Result<CredentialGrant> {
    if !value.is_object() {
        return Err(OvhError::InvalidResponse(
            "credential response is not a JSON object".to_string(),
        ));
    }
    serde_json::from_value(value.clone()).map_err(|err| {
        OvhError::InvalidResponse(format!(
            "credential response lacks consumerKey/validationUrl: {err}"
        ))
    })
}

/// Pending validation of a freshly issued consumer key.
///
/// Drive it with the URLs the user's browser lands on, then `finish` or
/// `cancel`. Dropping it leaves the new key on the client.
pub struct CredentialValidation<'a> {
    client: &'a OvhClient,
    previous_consumer_key: Option<String>,
    previous_state: ConsumerKeyState,
    grant: CredentialGrant,
    redirection_url: String,
    state: ConsumerKeyState,
}

impl fmt::Debug for CredentialValidation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialValidation")
            .field("validation_url", &self.grant.validation_url)
            .field("redirection_url", &self.redirection_url)
            .field("previous_state", &self.previous_state)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl CredentialValidation<'_> {
    pub fn grant(&self) -> &CredentialGrant {
        &self.grant
    }

    pub fn consumer_key(&self) -> &str {
        &self.grant.consumer_key
    }

    /// Page the user must open to approve the access rules
    pub fn validation_url(&self) -> &str {
        &self.grant.validation_url
    }

    pub fn redirection_url(&self) -> &str {
        &self.redirection_url
    }

    /// Consumer key restored on cancellation
    pub fn previous_consumer_key(&self) -> Option<&str> {
        self.previous_consumer_key.as_deref()
    }

    pub fn state(&self) -> ConsumerKeyState {
        self.state
    }

    /// Record a page load; landing on the redirection URL validates the key
    pub fn observe_navigation(&mut self, url: &str) -> ConsumerKeyState {
        self.state = if url == self.redirection_url {
            ConsumerKeyState::Validated
        } else {
            ConsumerKeyState::Requested
        };
        debug!(url, state = ?self.state, "credential validation page loaded");
        self.state
    }

    /// Close the flow: keep the key if validated, restore the previous one otherwise
    pub fn finish(self) -> ConsumerKeyState {
        match self.state {
            ConsumerKeyState::Validated => {
                info!("consumer key validated");
                self.client
                    .store_consumer_key(Some(self.grant.consumer_key), ConsumerKeyState::Validated);
                ConsumerKeyState::Validated
            }
            _ => self.cancel(),
        }
    }

    /// Abandon the flow and restore the previous consumer key and its state
    pub fn cancel(self) -> ConsumerKeyState {
        info!("credential validation abandoned, restoring previous consumer key");
        self.client
            .store_consumer_key(self.previous_consumer_key, self.previous_state);
        ConsumerKeyState::Abandoned
    }
}
