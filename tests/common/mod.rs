//! Common test utilities and shared infrastructure.
//!
//! This module provides the shared functionality used across the test suite:
//! - `fixtures`: the catalogs of fixture functions installed for the tests
//! - `assertions`: assertion helpers for common test patterns

pub mod assertions;
pub mod fixtures;

use std::sync::Once;

static INIT: Once = Once::new();

/// Installs the shared catalogs and an opt-in tracing subscriber.
///
/// Safe to call from every test; the work happens once per test binary.
/// Set `RUST_LOG=fixture_rig=debug` to watch the engine resolve.
pub fn setup() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
        fixtures::install();
    });
}
