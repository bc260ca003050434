//! Scoped-resource lifecycle management.
//!
//! Driving a fixture function yields either a plain value or a scoped
//! resource whose setup half already ran. For scoped resources the pending
//! teardown is appended to the owning instance's cleanup list, which is
//! drained in strict reverse-registration order when the instance finishes,
//! whether or not the test body panicked.

use std::fmt;

use tracing::trace;

use crate::error::Result;
use crate::fixtures::{FixtureDef, FixtureResult, FixtureValue, Teardown};
use crate::instance::TestInstance;

/// Ordered list of pending teardowns for one test instance.
///
/// Appended to in resolution order, drained LIFO exactly once.
#[derive(Default)]
pub struct CleanupList {
    pending: Vec<Teardown>,
}

impl CleanupList {
    /// Creates an empty list.
    pub fn new() -> Self {
        CleanupList::default()
    }

    /// Registers a teardown to run when the instance finishes.
    pub fn push(&mut self, teardown: Teardown) {
        self.pending.push(teardown);
    }

    /// Number of pending teardowns.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether no teardowns are pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Runs every pending teardown in reverse-registration order.
    ///
    /// Each teardown runs at most once; a second drain is a no-op.
    pub fn drain(&mut self) {
        while let Some(teardown) = self.pending.pop() {
            teardown();
        }
    }
}

impl fmt::Debug for CleanupList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CleanupList")
            .field("pending", &self.pending.len())
            .finish()
    }
}

/// Drives the given fixture definition and returns its value.
///
/// The function receives the instance's current options and a shallow
/// snapshot of the fixtures resolved so far: it sees every dependency by name
/// but cannot mutate the shared container. If the result is a scoped
/// resource, its teardown is registered with the instance before the value is
/// returned.
pub fn get_result(def: &FixtureDef, test: &mut TestInstance) -> Result<FixtureValue> {
    let snapshot = test.fixtures().snapshot();
    let result = def.call(test.options(), snapshot)?;
    match result {
        FixtureResult::Immediate(value) => Ok(value),
        FixtureResult::Scoped { value, teardown } => {
            trace!(fixture = def.name(), "registered scoped teardown");
            test.push_cleanup(teardown);
            Ok(value)
        }
    }
}
