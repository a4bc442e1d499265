/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public OVH API adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod http;
pub mod types;

// Re-export commonly used types from auth
pub use auth::CredentialValidation;

// Re-export commonly used types from http
pub use http::{
    ClientConfig,
    ClockDelta,
    Credentials,
    OvhClient,
    OvhError,
    RequestSigner,
    Result,
};

// Re-export all types
pub use types::*;
