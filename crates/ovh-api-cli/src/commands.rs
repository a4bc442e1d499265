/*
[INPUT]:  Parsed subcommand arguments and a configured OVH client
[OUTPUT]: JSON results ready for printing
[POS]:    Command layer - maps CLI actions onto client calls
[UPDATE]: When adding subcommands or changing their output
*/

use anyhow::{Context, Result};
use ovh_api_adapter::{AccessRule, ApiMethod, CredentialGrant, OvhClient};
use serde_json::{Value, json};
use tracing::info;

/// Parse an optional `--body` argument as JSON
pub fn parse_body(body: Option<&str>) -> Result<Option<Value>> {
    body.map(|raw| serde_json::from_str(raw).context("--body must be valid JSON"))
        .transpose()
}

/// Run one signed call and return the parsed body
pub async fn call(
    client: &OvhClient,
    method: ApiMethod,
    path: &str,
    body: Option<&Value>,
) -> Result<Value> {
    info!(%method, path, "calling API");
    let response = match method {
        ApiMethod::Get => client.get(path).await,
        ApiMethod::Post => client.post(path, body).await,
        ApiMethod::Put => client.put(path, body).await,
        ApiMethod::Delete => client.delete(path).await,
        other => anyhow::bail!("unsupported method {other}"),
    }
    .with_context(|| format!("{method} {path}"))?;
    Ok(response.into_value())
}

/// Rules requested by `request-credentials`
pub fn access_rules(read_only: bool, path: &str) -> Vec<AccessRule> {
    if read_only {
        AccessRule::read_only_rights(path)
    } else {
        AccessRule::all_rights(path)
    }
}

pub async fn request_credentials(
    client: &OvhClient,
    rules: &[AccessRule],
    redirection: &str,
) -> Result<CredentialGrant> {
    client
        .request_credentials(rules, redirection)
        .await
        .context("request credentials")
}

/// Server clock offset as printed by `time`
pub async fn clock_delta(client: &OvhClient) -> Result<Value> {
    let delta = client.clock_delta().await.context("compute clock delta")?;
    Ok(json!({ "deltaSeconds": delta }))
}
