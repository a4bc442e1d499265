/*
[INPUT]:  Full credentials from the environment
[OUTPUT]: The account behind the consumer key (GET /me)
[POS]:    Examples - signed request demonstration
[UPDATE]: When the request pipeline changes
*/

use ovh_api_adapter::*;

#[tokio::main]
async fn main() {
    println!("=== OVH Signed Request Example ===\n");

    let vars = (
        std::env::var("OVH_APPLICATION_KEY"),
        std::env::var("OVH_APPLICATION_SECRET"),
        std::env::var("OVH_CONSUMER_KEY"),
    );
    let (Ok(key), Ok(secret), Ok(consumer_key)) = vars else {
        eprintln!("Set OVH_APPLICATION_KEY, OVH_APPLICATION_SECRET and OVH_CONSUMER_KEY first");
        return;
    };

    let credentials = Credentials::new(key, secret).with_consumer_key(consumer_key);
    let client = match OvhClient::new(Endpoint::OvhEu, credentials) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };

    match client.get("/me").await {
        Ok(response) => {
            println!("✓ GET /me ({})", response.status);
            println!("{:#}", response.value);
        }
        Err(OvhError::RequestError { error_code, message, .. }) => {
            eprintln!("API refused the call: {message} ({error_code:?})");
        }
        Err(e) => eprintln!("Request failed: {}", e),
    }

    if let Some(delta) = client.cached_clock_delta() {
        println!("\nClock delta with the API: {delta:.3}s");
    }
}
