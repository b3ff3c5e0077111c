//! # Suppression Records
//!
//! Accepted findings from the security-lint pass, recorded so repeated
//! scans do not re-flag known, justified conditions. Suppressions attach
//! at whole-stack granularity and have no runtime behavior; they are
//! consumed at scan time and serialized into the template metadata for
//! auditability.

use serde::{Deserialize, Serialize};

/// An acknowledged, justified exception to a security-lint finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suppression {
    /// Finding identifier, e.g. `AwsSolutions-IAM4`.
    pub id: String,
    /// Human-readable justification for accepting the finding.
    pub reason: String,
}

impl Suppression {
    /// Record a justified exception for the given finding identifier.
    pub fn new(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for Suppression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.id, self.reason)
    }
}
