//! Resolution error types.

use miette::Diagnostic;
use thiserror::Error;

/// Error during dependency resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ResolveError {
    #[error("dependency cycle detected: {}", packages.join(" -> "))]
    #[diagnostic(
        code(qub::resolve::cycle),
        help("Break the cycle by removing one of the dependencies from project.json")
    )]
    CycleDetected { packages: Vec<String> },
}
