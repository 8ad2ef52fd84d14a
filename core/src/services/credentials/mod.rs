//! Credential verification
//!
//! The verifier is the only component that sees plaintext passwords.

mod bcrypt_verifier;
mod traits;

pub use bcrypt_verifier::BcryptCredentialVerifier;
pub use traits::CredentialVerifier;
