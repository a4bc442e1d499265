/*
[INPUT]:  Application secret, consumer key, method, URL, JSON body, timestamp
[OUTPUT]: `$1$`-prefixed SHA-1 request signature (X-Ovh-Signature)
[POS]:    HTTP layer - request signing for authenticated endpoints
[UPDATE]: When changing signing algorithm or header format
*/

use sha1::{Digest, Sha1};

use crate::types::ApiMethod;

/// Version prefix of the signature scheme
const SIGNATURE_PREFIX: &str = "$1$";

/// Signs authenticated requests with the application secret and consumer key
#[derive(Clone)]
pub struct RequestSigner<'a> {
    application_secret: &'a str,
    consumer_key: &'a str,
}

impl<'a> RequestSigner<'a> {
    pub fn new(application_secret: &'a str, consumer_key: &'a str) -> Self {
        Self {
            application_secret,
            consumer_key,
        }
    }

    /// String fed to SHA-1
    ///
    /// Format: "{secret}+{consumer_key}+{METHOD}+{url}+{json_body}+{timestamp}"
    pub fn signature_payload(
        &self,
        method: ApiMethod,
        url: &str,
        json_body: &str,
        timestamp: i64,
    ) -> String {
        format!(
            "{}+{}+{}+{}+{}+{}",
            self.application_secret,
            self.consumer_key,
            method.as_str(),
            url,
            json_body,
            timestamp
        )
    }

    /// Sign a request according to the OVH API specification
    pub fn sign_request(
        &self,
        method: ApiMethod,
        url: &str,
        json_body: &str,
        timestamp: i64,
    ) -> String {
        let payload = self.signature_payload(method, url, json_body, timestamp);
        let digest = Sha1::digest(payload.as_bytes());
        format!("{SIGNATURE_PREFIX}{}", hex::encode(digest))
    }
}

impl std::fmt::Debug for RequestSigner<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestSigner")
            .field("consumer_key", &self.consumer_key)
            .finish_non_exhaustive()
    }
}
