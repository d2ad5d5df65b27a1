//! Shared helpers for integration and property tests.
