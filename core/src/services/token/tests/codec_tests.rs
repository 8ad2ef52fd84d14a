//! Unit tests for token codec

use chrono::{Duration, TimeZone, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::json;

use cb_shared::config::JwtConfig;

use crate::errors::{DomainError, TokenError};
use crate::services::token::{SigningKey, TokenCodec, TokenCodecConfig};

const SECRET: &str = "test-secret-key-with-at-least-32-bytes!!";
const OTHER_SECRET: &str = "another-secret-key-with-at-least-32-bytes";

fn codec_with(secret: &str) -> TokenCodec {
    TokenCodec::new(
        SigningKey::from_secret(secret).unwrap(),
        TokenCodecConfig::default().with_ttl(Duration::minutes(15)),
    )
}

fn sign_raw(payload: serde_json::Value, secret: &str, algorithm: Algorithm) -> String {
    encode(
        &Header::new(algorithm),
        &payload,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

#[test]
fn test_issue_and_decode_round_trip() {
    let codec = codec_with(SECRET);
    let now = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();

    let issued = codec
        .issue("admin", vec!["ADMIN".to_string(), "USER".to_string()], 4, now)
        .unwrap();
    let claims = codec.decode(&issued.token).unwrap();

    assert_eq!(claims.sub, "admin");
    assert_eq!(claims.roles, vec!["ADMIN", "USER"]);
    assert_eq!(claims.token_version, 4);
    assert_eq!(claims.iat, now.timestamp());
    assert_eq!(claims.exp, (now + Duration::minutes(15)).timestamp());
    assert_eq!(issued.expires_in, 15 * 60);
    assert_eq!(issued.token.split('.').count(), 3);
}

#[test]
fn test_issue_is_deterministic_for_same_inputs() {
    let codec = codec_with(SECRET);
    let now = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();

    let a = codec.issue("user", vec!["USER".to_string()], 0, now).unwrap();
    let b = codec.issue("user", vec!["USER".to_string()], 0, now).unwrap();

    assert_eq!(a.token, b.token);
}

#[test]
fn test_decode_does_not_check_expiry() {
    let codec = codec_with(SECRET);
    let long_ago = Utc.with_ymd_and_hms(2001, 1, 1, 0, 0, 0).unwrap();

    let issued = codec.issue("user", vec![], 0, long_ago).unwrap();
    let claims = codec.decode(&issued.token).unwrap();

    assert!(claims.is_expired_at(Utc::now()));
}

#[test]
fn test_decode_rejects_foreign_key() {
    let issuer = codec_with(OTHER_SECRET);
    let verifier = codec_with(SECRET);

    let issued = issuer.issue("admin", vec!["ADMIN".to_string()], 0, Utc::now()).unwrap();
    let result = verifier.decode(&issued.token);

    assert!(matches!(result, Err(DomainError::Token(TokenError::InvalidSignature))));
}

#[test]
fn test_decode_rejects_tampered_payload() {
    let codec = codec_with(SECRET);
    let issued = codec.issue("user", vec!["USER".to_string()], 0, Utc::now()).unwrap();

    let forged_payload = sign_raw(
        json!({"sub": "admin", "roles": ["ADMIN"], "tokenVersion": 0, "iat": 0, "exp": i64::MAX}),
        OTHER_SECRET,
        Algorithm::HS256,
    );
    let mut parts: Vec<&str> = issued.token.split('.').collect();
    let forged_parts: Vec<&str> = forged_payload.split('.').collect();
    parts[1] = forged_parts[1];
    let tampered = parts.join(".");

    assert!(matches!(
        codec.decode(&tampered),
        Err(DomainError::Token(TokenError::InvalidSignature))
    ));
}

#[test]
fn test_decode_rejects_other_algorithm() {
    let codec = codec_with(SECRET);
    let token = sign_raw(
        json!({"sub": "user", "roles": [], "tokenVersion": 0, "iat": 0, "exp": 10}),
        SECRET,
        Algorithm::HS512,
    );

    assert!(matches!(
        codec.decode(&token),
        Err(DomainError::Token(TokenError::InvalidSignature))
    ));
}

#[test]
fn test_decode_rejects_malformed_input() {
    let codec = codec_with(SECRET);

    for token in ["", "not-a-jwt", "a.b", "a.b.c", "!!!.@@@.###"] {
        assert!(
            matches!(
                codec.decode(token),
                Err(DomainError::Token(TokenError::InvalidTokenFormat))
            ),
            "token {:?} should be malformed",
            token
        );
    }
}

#[test]
fn test_decode_rejects_wrong_claim_shape() {
    let codec = codec_with(SECRET);

    // Correctly signed, but roles is a string and tokenVersion is missing
    let token = sign_raw(
        json!({"sub": "user", "roles": "ADMIN", "iat": 0, "exp": 10}),
        SECRET,
        Algorithm::HS256,
    );
    assert!(matches!(
        codec.decode(&token),
        Err(DomainError::Token(TokenError::InvalidTokenFormat))
    ));

    let token = sign_raw(
        json!({"sub": "user", "roles": [], "tokenVersion": 0, "iat": 0, "exp": 10, "scope": "all"}),
        SECRET,
        Algorithm::HS256,
    );
    assert!(matches!(
        codec.decode(&token),
        Err(DomainError::Token(TokenError::InvalidTokenFormat))
    ));
}

#[test]
fn test_from_config() {
    let codec = TokenCodec::from_config(&JwtConfig::new(SECRET).with_ttl_minutes(5)).unwrap();
    assert_eq!(codec.token_ttl(), Duration::minutes(5));

    let result = TokenCodec::from_config(&JwtConfig::new(""));
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::KeyLoadError { .. }))
    ));
}

#[test]
fn test_issue_with_unrepresentable_expiry_fails_cleanly() {
    let codec = TokenCodec::new(
        SigningKey::from_secret(SECRET).unwrap(),
        TokenCodecConfig::default().with_ttl(Duration::days(200_000 * 365)),
    );
    let now = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();

    let result = codec.issue("admin", vec!["ADMIN".to_string()], 0, now);
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::TokenGenerationFailed))
    ));
}
