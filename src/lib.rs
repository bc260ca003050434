//! Fixture dependency-injection engine for test suites
//!
//! This library lets test cases declare named, possibly-parameterized
//! dependencies ("fixtures"). The engine resolves each declared fixture's own
//! prerequisites, computes every fixture at most once per test instance,
//! tracks scoped resources that must be released after the test, and merges
//! per-case configuration options along an inheritance chain.
//!
//! ## Main Components
//!
//! - [`catalog`]: named collections of fixture definitions and the cached
//!   process-wide accessor that selects the active one
//! - [`registry`]: per-case requirement registration and ancestor-first
//!   setup composition
//! - [`resolver`]: the dependency-graph walker with per-instance memoization
//! - [`lifecycle`]: scoped-resource management with LIFO teardown
//! - [`instance`]: the per-test container of fixtures, options, and cleanups
//! - [`options`]: layered option inheritance and merging
//! - [`config`]: manifest-based settings and engine constants
//!
//! ## Error Handling
//!
//! This library uses `Result` types for robust error handling. Core functions
//! return `Result<T, FixtureError>` to provide detailed error information: an
//! unresolvable fixture name, a missing catalog provider, a malformed
//! manifest, a failing fixture function, or a declared dependency cycle all
//! surface synchronously to the caller. Already-computed fixtures remain
//! computed; nothing is retried.
//!
//! ## Quick Start
//!
//! ```rust
//! use fixture_rig::{catalog, CaseDef, Catalog, FixtureDef, FixtureResult, Registry};
//!
//! // An independently maintained catalog of named fixture functions.
//! fn fixtures() -> Catalog {
//!     let mut catalog = Catalog::new("tests::fixtures");
//!     catalog.add(FixtureDef::new("greeting", |_options, _fixtures| {
//!         Ok(FixtureResult::immediate(String::from("hello")))
//!     }));
//!     catalog.add(FixtureDef::with_deps(
//!         "message",
//!         ["greeting"],
//!         |_options, fixtures| {
//!             let greeting = fixtures.expect::<String>("greeting")?;
//!             Ok(FixtureResult::immediate(format!("{greeting}, world")))
//!         },
//!     ));
//!     catalog
//! }
//!
//! # fn main() -> fixture_rig::Result<()> {
//! // 1. Install the catalog under its path (the manifest may configure an
//! //    alternate path; "tests::fixtures" is the conventional default).
//! catalog::install("tests::fixtures", fixtures);
//!
//! // 2. Declare which fixtures a test case requires.
//! let registry = Registry::new();
//! registry.register(CaseDef::new("GreetingTests").requires(["message"]))?;
//!
//! // 3. Before each test body, build a fully populated instance.
//! let test = registry.setup("GreetingTests")?;
//! assert_eq!(test.fixtures().expect::<String>("message")?, "hello, world");
//!
//! // 4. Dropping the instance releases scoped resources in reverse order.
//! # Ok(())
//! # }
//! ```
//!
//! ## Scoped Resources
//!
//! A fixture that owns an external resource returns [`FixtureResult::scoped`]
//! instead of [`FixtureResult::immediate`]: the setup half runs inline during
//! resolution and the teardown half is registered with the owning instance,
//! guaranteed to run exactly once, in reverse-registration order, even if the
//! test body panics.

pub mod catalog;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod instance;
pub mod lifecycle;
pub mod options;
pub mod registry;
pub mod resolver;

// Re-export commonly used types and functions for convenience
pub use catalog::Catalog;
pub use config::Settings;
pub use error::{FixtureError, Result};
pub use fixtures::{
    canonical_name, FixtureDef, FixtureResult, FixtureSpec, FixtureValue, Fixtures, Teardown,
};
pub use instance::TestInstance;
pub use lifecycle::{get_result, CleanupList};
pub use options::FixtureOptions;
pub use registry::{CaseDef, Registry};
pub use resolver::add_fixtures;
