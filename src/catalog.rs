//! Fixture catalog: named collections of fixture definitions and the
//! process-wide accessor that selects and caches the active one.
//!
//! A [`Catalog`] is an independently maintained set of named [`FixtureDef`]s,
//! identified by a path string such as `"tests::fixtures"`. Because Rust has
//! no runtime module import, catalog *providers* are installed under their
//! path in a process-wide table; the active catalog is chosen by the project
//! settings, built once, and cached for the rest of the process.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use once_cell::sync::Lazy;
use tracing::debug;

use crate::config::Settings;
use crate::error::{FixtureError, Result};
use crate::fixtures::{canonical_name, FixtureDef, FixtureSpec};

/// A named collection of fixture definitions, keyed by canonical name.
#[derive(Debug)]
pub struct Catalog {
    path: String,
    entries: BTreeMap<String, Arc<FixtureDef>>,
}

impl Catalog {
    /// Creates an empty catalog identified by `path`.
    pub fn new(path: impl Into<String>) -> Self {
        Catalog {
            path: path.into(),
            entries: BTreeMap::new(),
        }
    }

    /// Adds a definition under its canonical name.
    ///
    /// A definition with the same canonical name replaces the previous one.
    pub fn add(&mut self, def: FixtureDef) -> &mut Self {
        self.entries.insert(def.name().to_string(), Arc::new(def));
        self
    }

    /// Looks up a definition by canonical name.
    pub fn get(&self, name: &str) -> Option<Arc<FixtureDef>> {
        self.entries.get(name).cloned()
    }

    /// The path this catalog is installed under.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Number of definitions in the catalog.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog holds no definitions.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A function that builds a catalog, the Rust rendition of an importable
/// fixtures module.
pub type CatalogProvider = fn() -> Catalog;

/// Installed catalog providers, keyed by path.
static SOURCES: Lazy<Mutex<HashMap<String, CatalogProvider>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// The active catalog, built once per process from the configured path.
static ACTIVE: Lazy<Mutex<Option<Arc<Catalog>>>> = Lazy::new(|| Mutex::new(None));

/// Installs a catalog provider under the given path.
///
/// Installing over an existing path replaces the previous provider. This is
/// expected to happen once, at process start, before tests begin resolving
/// fixtures.
pub fn install(path: impl Into<String>, provider: CatalogProvider) {
    let path = path.into();
    SOURCES
        .lock()
        .expect("Catalog source table mutex should not be poisoned")
        .insert(path, provider);
}

/// Returns the active catalog, building and caching it on first use.
///
/// The first call reads the project [`Settings`] to pick the catalog path and
/// invokes the provider installed under it; subsequent calls return the cached
/// catalog regardless of settings changes, until [`invalidate`] is called.
pub fn active() -> Result<Arc<Catalog>> {
    let mut active = ACTIVE
        .lock()
        .expect("Active catalog mutex should not be poisoned");
    if let Some(catalog) = active.as_ref() {
        return Ok(catalog.clone());
    }

    let settings = Settings::load()?;
    let provider = SOURCES
        .lock()
        .expect("Catalog source table mutex should not be poisoned")
        .get(&settings.catalog)
        .copied()
        .ok_or(FixtureError::CatalogNotInstalled {
            path: settings.catalog.clone(),
        })?;

    let catalog = Arc::new(provider());
    debug!(
        path = %settings.catalog,
        fixtures = catalog.len(),
        "loaded fixture catalog"
    );
    *active = Some(catalog.clone());
    Ok(catalog)
}

/// Drops the cached active catalog so the next access re-reads the settings.
///
/// Test-isolation support only; production code never needs this.
pub fn invalidate() {
    *ACTIVE
        .lock()
        .expect("Active catalog mutex should not be poisoned") = None;
}

/// Resolves a fixture specification to a concrete definition.
///
/// A [`FixtureSpec::Named`] spec is looked up in the active catalog under its
/// canonical name (the reserved suffix is stripped from the requested name as
/// well) and fails with [`FixtureError::UnknownFixture`] if absent; a
/// [`FixtureSpec::Direct`] spec is returned unchanged.
pub fn load(spec: &FixtureSpec) -> Result<Arc<FixtureDef>> {
    match spec {
        FixtureSpec::Direct(def) => Ok(def.clone()),
        FixtureSpec::Named(name) => {
            let catalog = active()?;
            catalog
                .get(canonical_name(name))
                .ok_or_else(|| FixtureError::UnknownFixture {
                    name: name.clone(),
                    catalog: catalog.path().to_string(),
                })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::FixtureResult;

    fn unit_def(ident: &str) -> FixtureDef {
        FixtureDef::new(ident, |_options, _fixtures| Ok(FixtureResult::immediate(())))
    }

    #[test]
    fn test_entries_stored_under_canonical_name() {
        let mut catalog = Catalog::new("tests::fixtures");
        catalog.add(unit_def("loop_fixture"));

        assert!(catalog.get("loop").is_some());
        assert!(catalog.get("loop_fixture").is_none());
    }

    #[test]
    fn test_redefinition_replaces_entry() {
        let mut catalog = Catalog::new("tests::fixtures");
        catalog.add(unit_def("a")).add(unit_def("a"));

        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_direct_spec_bypasses_catalog() {
        let def = Arc::new(unit_def("standalone"));

        let loaded = load(&FixtureSpec::Direct(def.clone())).unwrap();

        assert!(Arc::ptr_eq(&def, &loaded));
    }
}
