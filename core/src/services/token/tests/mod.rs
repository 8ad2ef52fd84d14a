//! Tests for the token codec

#[cfg(test)]
mod codec_tests;
