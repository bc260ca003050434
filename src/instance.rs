//! Per-test instance state: the fixtures container, the accumulated options,
//! and the pending cleanups.
//!
//! A [`TestInstance`] is exclusively owned by one test and never shared.
//! Its lifecycle is: setup stages populate fixtures and options, the test
//! body reads them, and teardown drains the registered cleanups in
//! reverse-registration order. Dropping the instance performs the same drain,
//! so scoped resources are released even when the test body panics.

use tracing::debug;

use crate::fixtures::{FixtureValue, Fixtures, Teardown};
use crate::lifecycle::CleanupList;
use crate::options::FixtureOptions;

/// State owned by one test instance.
#[derive(Debug, Default)]
pub struct TestInstance {
    fixtures: Fixtures,
    options: FixtureOptions,
    cleanups: CleanupList,
}

impl TestInstance {
    /// Creates an instance with an empty container, empty options, and no
    /// pending cleanups.
    pub fn new() -> Self {
        TestInstance::default()
    }

    /// The fixtures resolved so far.
    pub fn fixtures(&self) -> &Fixtures {
        &self.fixtures
    }

    /// The currently accumulated options.
    pub fn options(&self) -> &FixtureOptions {
        &self.options
    }

    /// Replaces the accumulated options with a merged set.
    ///
    /// Options are only mutated through layered merge during setup, never
    /// after the test body starts.
    pub fn set_options(&mut self, options: FixtureOptions) {
        self.options = options;
    }

    /// Registers a teardown to run when this instance finishes.
    ///
    /// This is the per-instance cleanup mechanism the host framework drains
    /// after the test body completes, success or failure.
    pub fn push_cleanup(&mut self, teardown: Teardown) {
        self.cleanups.push(teardown);
    }

    /// Number of pending cleanups.
    pub fn pending_cleanups(&self) -> usize {
        self.cleanups.len()
    }

    /// Releases all scoped resources in reverse-registration order.
    ///
    /// Runs each teardown exactly once; calling this again (or dropping the
    /// instance afterwards) is a no-op.
    pub fn teardown(&mut self) {
        if !self.cleanups.is_empty() {
            debug!(cleanups = self.cleanups.len(), "draining scoped resources");
        }
        self.cleanups.drain();
    }

    pub(crate) fn fixtures_mut(&mut self) -> &mut Fixtures {
        &mut self.fixtures
    }

    pub(crate) fn store(&mut self, name: &str, value: FixtureValue) {
        self.fixtures_mut().insert(name, value);
    }
}

impl Drop for TestInstance {
    fn drop(&mut self) {
        self.teardown();
    }
}
