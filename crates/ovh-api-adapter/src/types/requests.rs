/*
[INPUT]:  Access rules chosen by the calling application
[OUTPUT]: Serializable request bodies for the credential handshake
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

use super::enums::ApiMethod;

/// Path pattern covering the whole API
pub const ALL_PATHS: &str = "/*";

/// A permission requested by the application, e.g. GET on `/vps/*`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRule {
    pub method: ApiMethod,
    pub path: String,
}

impl AccessRule {
    pub fn new(method: ApiMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
        }
    }

    /// Read and write rights on `path`: GET, POST, PUT, DELETE
    pub fn all_rights(path: &str) -> Vec<AccessRule> {
        [
            ApiMethod::Get,
            ApiMethod::Post,
            ApiMethod::Put,
            ApiMethod::Delete,
        ]
        .into_iter()
        .map(|method| AccessRule::new(method, path))
        .collect()
    }

    /// Read-only rights on `path`: GET
    pub fn read_only_rights(path: &str) -> Vec<AccessRule> {
        vec![AccessRule::new(ApiMethod::Get, path)]
    }

    pub fn all_rights_everywhere() -> Vec<AccessRule> {
        Self::all_rights(ALL_PATHS)
    }

    pub fn read_only_rights_everywhere() -> Vec<AccessRule> {
        Self::read_only_rights(ALL_PATHS)
    }
}

/// Body of `POST /auth/credential`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CredentialRequest<'a> {
    #[serde(rename = "accessRules")]
    pub access_rules: &'a [AccessRule],
    pub redirection: &'a str,
}
