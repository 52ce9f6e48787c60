//! Integration tests for antelope-kit.
//!
//! These tests run the real reqwest transport against a local mock node.
//!
//! Run with: `cargo test --test integration`

mod chain_integration;
mod error_handling_integration;
mod session_integration;

/// Install a test log subscriber once; filtered by `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
