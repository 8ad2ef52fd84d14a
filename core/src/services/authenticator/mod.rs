//! Per-request bearer token authentication

mod service;

#[cfg(test)]
mod tests;

pub use service::{extract_bearer_token, RequestAuthenticator, BEARER_PREFIX};
