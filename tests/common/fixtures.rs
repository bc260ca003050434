//! Shared fixture catalogs for the integration suite.
//!
//! The default catalog mirrors a typical project's `tests::fixtures`
//! collection: plain value fixtures, a dependent fixture that reads the
//! `spacer` option, and scoped resources for directory juggling. The
//! alternate catalog exists for the configured-path tests.

#![allow(dead_code)]

use std::path::PathBuf;

use fixture_rig::{catalog, options, Catalog, FixtureDef, FixtureError, FixtureResult};

/// Builds the default catalog, installed under `tests::fixtures`.
pub fn catalog() -> Catalog {
    let mut catalog = Catalog::new("tests::fixtures");

    catalog.add(FixtureDef::new("test1", |_options, _fixtures| {
        Ok(FixtureResult::immediate(String::from("test1")))
    }));

    catalog.add(FixtureDef::new("test2", |_options, _fixtures| {
        Ok(FixtureResult::immediate(String::from("test2")))
    }));

    catalog.add(FixtureDef::with_deps(
        "test3",
        ["test2"],
        |options, fixtures| {
            let spacer = options::as_str(options, "spacer").unwrap_or(" ");
            let prefix = fixtures.expect::<String>("test2")?;
            Ok(FixtureResult::immediate(format!("{prefix}{spacer}test3")))
        },
    ));

    catalog.add(FixtureDef::with_deps(
        "test4",
        ["test2"],
        |options, fixtures| {
            let spacer = options::as_str(options, "spacer").unwrap_or(" ");
            let prefix = fixtures.expect::<String>("test2")?;
            Ok(FixtureResult::immediate(format!("{prefix}{spacer}test4")))
        },
    ));

    // Identifier collides with a reserved word, so it carries the
    // disambiguation suffix; the stored name never does.
    catalog.add(FixtureDef::new("loop_fixture", |_options, _fixtures| {
        Ok(FixtureResult::immediate(String::from("loop")))
    }));

    catalog.add(FixtureDef::new("tmpdir", |_options, _fixtures| {
        let dir = tempfile::tempdir().map_err(|e| FixtureError::Failure {
            fixture: String::from("tmpdir"),
            reason: e.to_string(),
        })?;
        let path = dir.path().to_path_buf();
        Ok(FixtureResult::scoped(path, move || drop(dir)))
    }));

    catalog.add(FixtureDef::with_deps(
        "cd_to_tmpdir",
        ["tmpdir"],
        |_options, fixtures| {
            let origdir = std::env::current_dir().map_err(|e| FixtureError::Failure {
                fixture: String::from("cd_to_tmpdir"),
                reason: e.to_string(),
            })?;
            let tmpdir = fixtures.expect::<PathBuf>("tmpdir")?;
            std::env::set_current_dir(tmpdir).map_err(|e| FixtureError::Failure {
                fixture: String::from("cd_to_tmpdir"),
                reason: e.to_string(),
            })?;
            Ok(FixtureResult::scoped((), move || {
                let _ = std::env::set_current_dir(&origdir);
            }))
        },
    ));

    catalog.add(FixtureDef::new("clear_cache", |_options, _fixtures| {
        catalog::invalidate();
        Ok(FixtureResult::immediate(()))
    }));

    catalog
}

/// Builds the alternate catalog, installed under `tests::fixtures1`.
pub fn catalog1() -> Catalog {
    let mut catalog = Catalog::new("tests::fixtures1");

    catalog.add(FixtureDef::new("origin", |_options, _fixtures| {
        Ok(FixtureResult::immediate(String::from("tests::fixtures1")))
    }));

    catalog
}

/// Installs both catalogs under their paths.
pub fn install() {
    catalog::install("tests::fixtures", catalog);
    catalog::install("tests::fixtures1", catalog1);
}
