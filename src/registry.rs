//! Requirement registry and multi-level case composition.
//!
//! Test cases register their directly declared fixture requirements, option
//! overrides, and optional parent case under a name. Setting up an instance
//! walks the ancestry chain and executes one stage per case,
//! ancestor-to-descendant: each stage merges its own option overrides onto
//! the accumulated set and resolves its own requirements into the shared
//! per-instance container. Ancestor stages therefore contribute only what
//! they declared, and a fixture already resolved by an earlier stage is never
//! recomputed.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use once_cell::sync::Lazy;
use tracing::{debug, debug_span};

use crate::catalog;
use crate::error::{FixtureError, Result};
use crate::fixtures::{FixtureDef, FixtureSpec};
use crate::instance::TestInstance;
use crate::options::{self, FixtureOptions};
use crate::resolver;

/// Declaration of a test case: its requirements, option overrides, and
/// optional parent case.
#[derive(Debug, Clone, Default)]
pub struct CaseDef {
    name: String,
    parent: Option<String>,
    options: FixtureOptions,
    requires: Vec<FixtureSpec>,
}

impl CaseDef {
    /// Starts a declaration for the named case.
    pub fn new(name: impl Into<String>) -> Self {
        CaseDef {
            name: name.into(),
            ..CaseDef::default()
        }
    }

    /// Names the parent case whose stage runs before this one.
    pub fn extends(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Declares one option override for this case's layer.
    pub fn option(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.options.insert(key.into(), value);
        self
    }

    /// Declares the fixtures this case directly requires, in order.
    pub fn requires<I>(mut self, specs: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<FixtureSpec>,
    {
        self.requires.extend(specs.into_iter().map(Into::into));
        self
    }
}

/// Registered state for one case: requirements already resolved to
/// definitions, in declaration order.
#[derive(Debug, Clone)]
struct CaseEntry {
    parent: Option<String>,
    options: FixtureOptions,
    requirements: Vec<(String, Arc<FixtureDef>)>,
}

/// One stage of the ancestor-first setup chain.
struct Stage {
    case: String,
    options: FixtureOptions,
    specs: Vec<FixtureSpec>,
}

/// Process-wide table mapping case names to their directly declared
/// requirement sets.
///
/// Entries are added at registration time and persist for the process;
/// [`Registry::clear`] exists so tests of the engine itself can isolate
/// state. Construct independent registries with [`Registry::new`] or share
/// the process-wide default via [`Registry::global`].
#[derive(Debug, Default)]
pub struct Registry {
    cases: Mutex<HashMap<String, CaseEntry>>,
}

static GLOBAL: Lazy<Registry> = Lazy::new(Registry::new);

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Registry::default()
    }

    /// The process-wide default registry.
    pub fn global() -> &'static Registry {
        &GLOBAL
    }

    /// Registers a case, replacing any prior registration under the same name.
    ///
    /// Each required spec is resolved to a definition now, so an unresolvable
    /// name fails at registration rather than at setup. Two requirements with
    /// the same canonical name collapse to one slot; the last declaration
    /// wins.
    pub fn register(&self, case: CaseDef) -> Result<()> {
        let mut requirements: Vec<(String, Arc<FixtureDef>)> = Vec::new();
        for spec in &case.requires {
            let def = catalog::load(spec)?;
            let name = def.name().to_string();
            match requirements.iter_mut().find(|(existing, _)| *existing == name) {
                Some(slot) => slot.1 = def,
                None => requirements.push((name, def)),
            }
        }

        debug!(
            case = %case.name,
            requirements = requirements.len(),
            parent = case.parent.as_deref().unwrap_or("none"),
            "registered test case"
        );
        self.cases
            .lock()
            .expect("Case registry mutex should not be poisoned")
            .insert(
                case.name,
                CaseEntry {
                    parent: case.parent,
                    options: case.options,
                    requirements,
                },
            );
        Ok(())
    }

    /// Whether a case is registered under the given name.
    pub fn contains(&self, name: &str) -> bool {
        self.cases
            .lock()
            .expect("Case registry mutex should not be poisoned")
            .contains_key(name)
    }

    /// Number of registered cases.
    pub fn len(&self) -> usize {
        self.cases
            .lock()
            .expect("Case registry mutex should not be poisoned")
            .len()
    }

    /// Whether no cases are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every registration. Test-isolation support only.
    pub fn clear(&self) {
        self.cases
            .lock()
            .expect("Case registry mutex should not be poisoned")
            .clear();
    }

    /// Builds a fully populated instance for the named case.
    ///
    /// Stages execute ancestor-first; each merges its case's option overrides
    /// and resolves that case's own requirements. A failure propagates before
    /// the test body would run, and any scoped resources registered up to
    /// that point are released when the partially built instance drops.
    pub fn setup(&self, case_name: &str) -> Result<TestInstance> {
        let _span = debug_span!("setup", case = case_name).entered();
        let stages = self.stage_chain(case_name)?;

        let mut test = TestInstance::new();
        for stage in stages {
            debug!(case = %stage.case, requirements = stage.specs.len(), "running setup stage");
            test.set_options(options::merged(test.options(), &stage.options));
            resolver::add_fixtures(&mut test, &stage.specs)?;
        }
        Ok(test)
    }

    /// Walks the ancestry chain for `leaf` and returns its stages in
    /// ancestor-to-descendant order.
    fn stage_chain(&self, leaf: &str) -> Result<Vec<Stage>> {
        let cases = self
            .cases
            .lock()
            .expect("Case registry mutex should not be poisoned");

        let mut chain = Vec::new();
        let mut cursor = Some(leaf.to_string());
        while let Some(name) = cursor {
            if chain.iter().any(|stage: &Stage| stage.case == name) {
                let mut names: Vec<&str> =
                    chain.iter().map(|stage| stage.case.as_str()).collect();
                names.push(&name);
                return Err(FixtureError::DependencyCycle {
                    chain: names.join(" -> "),
                });
            }

            let entry = cases.get(&name).ok_or_else(|| FixtureError::UnknownCase {
                name: name.clone(),
            })?;
            chain.push(Stage {
                case: name,
                options: entry.options.clone(),
                specs: entry
                    .requirements
                    .iter()
                    .map(|(_, def)| FixtureSpec::Direct(def.clone()))
                    .collect(),
            });
            cursor = entry.parent.clone();
        }

        chain.reverse();
        Ok(chain)
    }
}
