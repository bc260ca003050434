//! Core fixture types: definitions, specs, results, and the per-instance
//! value container.
//!
//! A [`FixtureDef`] pairs a fixture-producing closure with its canonical name
//! and an explicit dependency list. The closure receives the instance's
//! current options and a snapshot of the fixtures resolved so far, and returns
//! a [`FixtureResult`]: either a plain value or a scoped resource whose
//! teardown half runs when the owning instance finishes.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::config::RESERVED_SUFFIX;
use crate::error::{FixtureError, Result};
use crate::options::FixtureOptions;

/// A computed fixture value, stored type-erased in the container.
///
/// Values are shared via `Arc`, which is what makes [`Fixtures::snapshot`] a
/// shallow copy: the snapshot sees every value resolved so far without being
/// able to grow the shared container.
pub type FixtureValue = Arc<dyn Any + Send + Sync>;

/// The deferred release half of a scoped resource.
pub type Teardown = Box<dyn FnOnce() + Send>;

/// Outcome of driving a fixture function's setup.
///
/// The variant is fixed at construction: a fixture is either a plain value or
/// a scoped resource, never re-inspected per call.
pub enum FixtureResult {
    /// A plain computed value.
    Immediate(FixtureValue),
    /// A scoped resource: setup already ran, `teardown` is the pending release.
    Scoped {
        value: FixtureValue,
        teardown: Teardown,
    },
}

impl FixtureResult {
    /// Wraps a plain value.
    pub fn immediate<T: Send + Sync + 'static>(value: T) -> Self {
        FixtureResult::Immediate(Arc::new(value))
    }

    /// Wraps a scoped resource: `value` is handed to the test, `teardown`
    /// runs when the owning instance finishes, in reverse-registration order.
    pub fn scoped<T, F>(value: T, teardown: F) -> Self
    where
        T: Send + Sync + 'static,
        F: FnOnce() + Send + 'static,
    {
        FixtureResult::Scoped {
            value: Arc::new(value),
            teardown: Box::new(teardown),
        }
    }
}

impl fmt::Debug for FixtureResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FixtureResult::Immediate(_) => f.write_str("FixtureResult::Immediate(..)"),
            FixtureResult::Scoped { .. } => f.write_str("FixtureResult::Scoped { .. }"),
        }
    }
}

/// Call shape shared by all fixture functions: `(options, fixtures-so-far)`.
type FixtureFn = dyn Fn(&FixtureOptions, Fixtures) -> Result<FixtureResult> + Send + Sync;

/// Computes the canonical name for a declared identifier.
///
/// Strips the trailing [`RESERVED_SUFFIX`] disambiguation marker if present;
/// returns the identifier unchanged otherwise.
pub fn canonical_name(ident: &str) -> &str {
    ident.strip_suffix(RESERVED_SUFFIX).unwrap_or(ident)
}

/// A named fixture function together with its dependency list.
pub struct FixtureDef {
    name: String,
    deps: Vec<FixtureSpec>,
    func: Box<FixtureFn>,
}

impl FixtureDef {
    /// Creates a fixture definition with no dependencies.
    ///
    /// The canonical name is derived from `ident` by stripping the
    /// [`RESERVED_SUFFIX`] marker if present.
    pub fn new<F>(ident: &str, func: F) -> Self
    where
        F: Fn(&FixtureOptions, Fixtures) -> Result<FixtureResult> + Send + Sync + 'static,
    {
        Self::with_deps(ident, std::iter::empty::<FixtureSpec>(), func)
    }

    /// Creates a fixture definition with an explicit dependency list.
    ///
    /// Dependencies are resolved depth-first before this fixture's own value
    /// is computed.
    pub fn with_deps<I, F>(ident: &str, deps: I, func: F) -> Self
    where
        I: IntoIterator,
        I::Item: Into<FixtureSpec>,
        F: Fn(&FixtureOptions, Fixtures) -> Result<FixtureResult> + Send + Sync + 'static,
    {
        FixtureDef {
            name: canonical_name(ident).to_string(),
            deps: deps.into_iter().map(Into::into).collect(),
            func: Box::new(func),
        }
    }

    /// The canonical name this fixture's value is stored under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The fixtures this one requires to be resolved first.
    pub fn dependencies(&self) -> &[FixtureSpec] {
        &self.deps
    }

    pub(crate) fn call(
        &self,
        options: &FixtureOptions,
        fixtures: Fixtures,
    ) -> Result<FixtureResult> {
        (self.func)(options, fixtures)
    }
}

impl fmt::Debug for FixtureDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixtureDef")
            .field("name", &self.name)
            .field("deps", &self.deps)
            .finish_non_exhaustive()
    }
}

/// Identifies one fixture requirement: a catalog name or a direct definition.
#[derive(Clone)]
pub enum FixtureSpec {
    /// Looked up by canonical name in the active catalog.
    Named(String),
    /// A definition passed by reference, bypassing the catalog.
    Direct(Arc<FixtureDef>),
}

impl FixtureSpec {
    /// The canonical name this spec resolves under, computable without
    /// consulting the catalog.
    pub fn canonical_name(&self) -> &str {
        match self {
            FixtureSpec::Named(name) => canonical_name(name),
            FixtureSpec::Direct(def) => def.name(),
        }
    }
}

impl fmt::Debug for FixtureSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FixtureSpec::Named(name) => write!(f, "FixtureSpec::Named({:?})", name),
            FixtureSpec::Direct(def) => write!(f, "FixtureSpec::Direct({:?})", def.name()),
        }
    }
}

impl From<&str> for FixtureSpec {
    fn from(name: &str) -> Self {
        FixtureSpec::Named(name.to_string())
    }
}

impl From<String> for FixtureSpec {
    fn from(name: String) -> Self {
        FixtureSpec::Named(name)
    }
}

impl From<Arc<FixtureDef>> for FixtureSpec {
    fn from(def: Arc<FixtureDef>) -> Self {
        FixtureSpec::Direct(def)
    }
}

impl From<FixtureDef> for FixtureSpec {
    fn from(def: FixtureDef) -> Self {
        FixtureSpec::Direct(Arc::new(def))
    }
}

/// Per-instance container of resolved fixture values, keyed by canonical name.
///
/// Once a name is present, resolution never recomputes or overwrites it:
/// first writer wins for the lifetime of the instance.
#[derive(Clone, Default)]
pub struct Fixtures {
    values: BTreeMap<String, FixtureValue>,
}

impl Fixtures {
    /// Creates an empty container.
    pub fn new() -> Self {
        Fixtures::default()
    }

    /// Whether a value is already stored under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Typed lookup; `None` if the name is absent or holds a different type.
    pub fn get<T: Send + Sync + 'static>(&self, name: &str) -> Option<&T> {
        self.values.get(name).and_then(|value| value.downcast_ref())
    }

    /// Typed lookup that distinguishes an absent name from a type mismatch.
    pub fn expect<T: Send + Sync + 'static>(&self, name: &str) -> Result<&T> {
        let value = self.values.get(name).ok_or_else(|| FixtureError::Missing {
            name: name.to_string(),
        })?;
        value
            .downcast_ref()
            .ok_or_else(|| FixtureError::TypeMismatch {
                name: name.to_string(),
                expected: std::any::type_name::<T>(),
            })
    }

    /// Raw shared handle to a stored value, if present.
    pub fn get_raw(&self, name: &str) -> Option<FixtureValue> {
        self.values.get(name).cloned()
    }

    /// Number of resolved fixtures.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no fixtures have been resolved yet.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Canonical names of all resolved fixtures, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Shallow copy handed to fixture functions: it shares every value
    /// resolved so far but cannot grow the instance's own container.
    pub fn snapshot(&self) -> Fixtures {
        self.clone()
    }

    pub(crate) fn insert(&mut self, name: &str, value: FixtureValue) {
        self.values.insert(name.to_string(), value);
    }
}

impl fmt::Debug for Fixtures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.values.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_name_strips_reserved_suffix() {
        assert_eq!(canonical_name("loop_fixture"), "loop");
        assert_eq!(canonical_name("tmpdir"), "tmpdir");
        assert_eq!(canonical_name("_fixture"), "");
    }

    #[test]
    fn test_def_carries_canonical_name() {
        let def = FixtureDef::new("match_fixture", |_options, _fixtures| {
            Ok(FixtureResult::immediate(1u32))
        });

        assert_eq!(def.name(), "match");
    }

    #[test]
    fn test_typed_lookup() {
        let mut fixtures = Fixtures::new();
        fixtures.insert("greeting", Arc::new(String::from("hello")));

        assert_eq!(fixtures.get::<String>("greeting").unwrap(), "hello");
        assert!(fixtures.get::<u32>("greeting").is_none());
        assert!(matches!(
            fixtures.expect::<u32>("greeting"),
            Err(FixtureError::TypeMismatch { .. })
        ));
        assert!(matches!(
            fixtures.expect::<String>("absent"),
            Err(FixtureError::Missing { .. })
        ));
    }

    #[test]
    fn test_snapshot_shares_values_but_not_growth() {
        let mut fixtures = Fixtures::new();
        fixtures.insert("a", Arc::new(1u32));

        let snapshot = fixtures.snapshot();
        fixtures.insert("b", Arc::new(2u32));

        assert!(snapshot.contains("a"));
        assert!(!snapshot.contains("b"));
        assert!(fixtures.contains("b"));
    }
}
