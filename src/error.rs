//! Error types for GRASP configuration and problem setup.

use thiserror::Error;

/// Errors reported before any search work begins.
///
/// The search itself never fails: an instance where nothing fits the
/// capacity simply yields the empty solution.
#[derive(Debug, Error)]
pub enum GraspError {
    /// A configuration parameter is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A problem instance is malformed (dimension mismatch, negative weight, ...).
    #[error("invalid instance: {0}")]
    InvalidInstance(String),

    /// A configuration document could not be parsed.
    #[error("config parse error: {0}")]
    ConfigParse(String),
}

/// Result type alias for GRASP operations.
pub type Result<T> = std::result::Result<T, GraspError>;
