/*
[INPUT]:  Access rules and redirection URLs
[OUTPUT]: Consumer keys and their validation lifecycle
[POS]:    Auth layer - handles OVH consumer key acquisition
[UPDATE]: When auth flow changes
*/

pub mod credential;

pub use credential::CredentialValidation;
