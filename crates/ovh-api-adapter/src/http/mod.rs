/*
[INPUT]:  Endpoint configuration, credentials and API paths
[OUTPUT]: Signed HTTP calls and interpreted API results
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod client;
pub mod error;
pub mod rest;
pub mod signature;
pub mod time;

pub use error::{OvhError, Result};
pub use signature::RequestSigner;
pub use time::ClockDelta;

pub use client::{ClientConfig, Credentials, OvhClient};
