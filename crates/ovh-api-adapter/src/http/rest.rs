/*
[INPUT]:  API paths and optional JSON bodies
[OUTPUT]: Parsed API responses for signed GET/POST/PUT/DELETE calls
[POS]:    HTTP layer - public verb methods (require consumer key)
[UPDATE]: When adding verbs or changing call defaults
*/

use serde::Serialize;

use crate::http::{OvhClient, Result};
use crate::types::{ApiMethod, ApiResponse};

impl OvhClient {
    /// Signed GET, e.g. `client.get("/me")`
    pub async fn get(&self, path: &str) -> Result<ApiResponse> {
        self.raw_call::<()>(ApiMethod::Get, path, None, true).await
    }

    /// Signed POST; the JSON body is part of the signature
    pub async fn post<B>(&self, path: &str, body: Option<&B>) -> Result<ApiResponse>
    where
        B: Serialize + ?Sized,
    {
        self.raw_call(ApiMethod::Post, path, body, true).await
    }

    /// Signed PUT; the JSON body is part of the signature
    pub async fn put<B>(&self, path: &str, body: Option<&B>) -> Result<ApiResponse>
    where
        B: Serialize + ?Sized,
    {
        self.raw_call(ApiMethod::Put, path, body, true).await
    }

    /// Signed DELETE
    pub async fn delete(&self, path: &str) -> Result<ApiResponse> {
        self.raw_call::<()>(ApiMethod::Delete, path, None, true).await
    }
}
