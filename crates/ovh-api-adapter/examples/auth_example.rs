/*
[INPUT]:  Application key/secret from the environment
[OUTPUT]: Consumer key and the URL the user must visit to validate it
[POS]:    Examples - credential handshake demonstration
[UPDATE]: When auth flow changes
*/

use ovh_api_adapter::*;

/// Example: Credential handshake
///
/// 1. Create the client with application key and secret only
/// 2. Request read-only rights on the whole API
/// 3. Print the validation URL for the user
#[tokio::main]
async fn main() {
    println!("=== OVH Credential Handshake Example ===\n");

    let (Ok(key), Ok(secret)) = (
        std::env::var("OVH_APPLICATION_KEY"),
        std::env::var("OVH_APPLICATION_SECRET"),
    ) else {
        eprintln!("Set OVH_APPLICATION_KEY and OVH_APPLICATION_SECRET first");
        return;
    };

    let client = match OvhClient::new(Endpoint::OvhEu, Credentials::new(key, secret)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };
    println!("✓ Client created for {}", client.base_url());

    let rules = AccessRule::read_only_rights_everywhere();
    match client.request_credentials(&rules, "https://www.ovh.com/").await {
        Ok(grant) => {
            println!("✓ Consumer key: {}", grant.consumer_key);
            println!("  Open this URL to validate it: {}", grant.validation_url);
        }
        Err(e) => eprintln!("Credential request failed: {}", e),
    }
}
