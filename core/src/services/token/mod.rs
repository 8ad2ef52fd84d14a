//! Token codec module for JWT management
//!
//! This module handles:
//! - Loading the symmetric signing key at startup
//! - Issuing signed tokens that embed the revocation counter
//! - Verifying signatures and decoding the typed claims

mod codec;
mod config;
mod signing_key;

#[cfg(test)]
mod tests;

pub use codec::TokenCodec;
pub use config::{TokenCodecConfig, MAX_TOKEN_TTL_SECONDS};
pub use signing_key::{SigningKey, MIN_SECRET_LENGTH};
