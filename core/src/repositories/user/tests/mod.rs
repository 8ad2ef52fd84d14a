//! Tests for the in-memory user directory
