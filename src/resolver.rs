//! Dependency-graph walker.
//!
//! Given an ordered list of fixture specifications, the resolver ensures that
//! every fixture and its declared prerequisites are computed exactly once per
//! test instance, depth-first, writing results into the instance's container
//! under canonical names.
//!
//! Ordering guarantees: a fixture's dependencies are always computed before
//! the fixture itself; independent top-level requirements are computed in
//! declaration order except where cross-dependencies force reordering.
//! Dependencies are walked even when the fixture's own name is already
//! present, so a pre-resolved fixture still pins its prerequisites;
//! memoization makes the repeat walk cheap.

use tracing::{debug, trace};

use crate::catalog;
use crate::error::{FixtureError, Result};
use crate::fixtures::FixtureSpec;
use crate::instance::TestInstance;
use crate::lifecycle;

/// Resolves each spec, its prerequisites first, into the instance's container.
///
/// A spec whose canonical name is already present is never recomputed. A
/// dependency cycle fails with [`FixtureError::DependencyCycle`] naming the
/// offending chain; an unresolvable name or a failing fixture function
/// propagates immediately, leaving later specs in the batch unresolved.
pub fn add_fixtures(test: &mut TestInstance, specs: &[FixtureSpec]) -> Result<()> {
    let mut in_progress = Vec::new();
    for spec in specs {
        resolve(test, spec, &mut in_progress)?;
    }
    Ok(())
}

fn resolve(
    test: &mut TestInstance,
    spec: &FixtureSpec,
    in_progress: &mut Vec<String>,
) -> Result<()> {
    let name = spec.canonical_name().to_string();
    if in_progress.contains(&name) {
        let mut chain = in_progress.clone();
        chain.push(name);
        return Err(FixtureError::DependencyCycle {
            chain: chain.join(" -> "),
        });
    }

    let def = catalog::load(spec)?;

    in_progress.push(name);
    for dep in def.dependencies() {
        resolve(test, dep, in_progress)?;
    }
    let name = in_progress.pop().expect("In-progress stack should be balanced");

    if test.fixtures().contains(&name) {
        trace!(fixture = %name, "already resolved, skipping");
        return Ok(());
    }

    debug!(fixture = %name, "computing fixture");
    let value = lifecycle::get_result(&def, test)?;
    test.store(&name, value);
    Ok(())
}
