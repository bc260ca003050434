//! Error types for the fixture-rig library

/// Error types for the fixture-rig library
#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    /// Requested fixture name is absent from the active catalog
    #[error("Unknown fixture: {name:?} is not defined in catalog {catalog:?}")]
    UnknownFixture { name: String, catalog: String },

    /// The configured catalog path has no installed provider
    #[error("Catalog not installed: no provider registered for path {path:?}")]
    CatalogNotInstalled { path: String },

    /// The project manifest exists but could not be read or parsed
    #[error("Configuration error: {reason}")]
    Config { reason: String },

    /// A fixture function's setup half failed
    #[error("Fixture {fixture:?} failed: {reason}")]
    Failure { fixture: String, reason: String },

    /// The dependency walk re-entered a fixture already being resolved
    #[error("Dependency cycle: {chain}")]
    DependencyCycle { chain: String },

    /// Setup requested for a case (or a named ancestor) that was never registered
    #[error("Unknown test case: {name:?} is not registered")]
    UnknownCase { name: String },

    /// Typed lookup of a fixture that has not been resolved into the container
    #[error("Fixture {name:?} has not been resolved")]
    Missing { name: String },

    /// Typed lookup found the fixture under a different concrete type
    #[error("Fixture {name:?} holds a different type (expected {expected})")]
    TypeMismatch {
        name: String,
        expected: &'static str,
    },
}

/// Convenience Result type for fixture-rig operations
pub type Result<T> = std::result::Result<T, FixtureError>;
