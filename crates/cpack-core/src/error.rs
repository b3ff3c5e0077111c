//! # Error Types — Synthesis-Time Failures
//!
//! Declaration and synthesis errors for the resource graph. Apply-time
//! failures (naming collisions, service rejections) belong to the external
//! deployment engine and are never modeled here; everything in this module
//! is catchable before a template leaves the workstation.

use thiserror::Error;

/// Error during graph declaration or template synthesis.
#[derive(Error, Debug)]
pub enum SynthError {
    /// A logical id failed validation.
    #[error("invalid logical id {id:?}: {reason}")]
    InvalidLogicalId {
        /// The rejected id.
        id: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// Two resources were declared under the same logical id.
    #[error("duplicate logical id: {0}")]
    DuplicateLogicalId(String),

    /// A dependency edge names a resource that was never declared.
    #[error("dependency edge from {dependent} references undeclared resource {missing}")]
    UnknownDependency {
        /// The resource declaring the edge.
        dependent: String,
        /// The edge target that does not exist.
        missing: String,
    },

    /// The declared dependency edges admit no topological order.
    #[error("dependency cycle involving resource {0}")]
    DependencyCycle(String),

    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML rendering failed.
    #[error("yaml rendering failed: {0}")]
    YamlRendering(#[from] serde_yaml::Error),
}
