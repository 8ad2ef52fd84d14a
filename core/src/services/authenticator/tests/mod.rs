//! Tests for the request authenticator
