//! # Logical Identifiers
//!
//! Newtype wrapper for the logical names that key resources within a stack.
//! The deployment engine's template format restricts logical ids to
//! alphanumeric characters, so the constructor validates rather than
//! trusting callers with bare strings.

use serde::{Deserialize, Serialize};

use crate::error::SynthError;

/// Maximum length accepted by the deployment engine for a logical id.
const MAX_LOGICAL_ID_LEN: usize = 255;

/// Logical name of a resource within a stack.
///
/// Logical ids are author-chosen, stable across synthesis runs, and key the
/// `Resources` map of the synthesized template. They are not the physical
/// names of provisioned resources; the engine generates those at apply time.
///
/// # Invariants
///
/// - Non-empty, at most 255 characters.
/// - ASCII alphanumeric only (`[A-Za-z0-9]`).
///
/// Enforced by the constructor; the inner string is private.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LogicalId(String);

impl LogicalId {
    /// Construct a validated logical id.
    ///
    /// # Errors
    ///
    /// Returns `SynthError::InvalidLogicalId` if the id is empty, longer
    /// than 255 characters, or contains non-alphanumeric characters.
    pub fn new(id: impl Into<String>) -> Result<Self, SynthError> {
        let id = id.into();
        if id.is_empty() {
            return Err(SynthError::InvalidLogicalId {
                id,
                reason: "must not be empty",
            });
        }
        if id.len() > MAX_LOGICAL_ID_LEN {
            return Err(SynthError::InvalidLogicalId {
                id,
                reason: "must be at most 255 characters",
            });
        }
        if !id.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(SynthError::InvalidLogicalId {
                id,
                reason: "must contain only ASCII alphanumeric characters",
            });
        }
        Ok(Self(id))
    }

    /// Access the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LogicalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for LogicalId {
    type Error = SynthError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LogicalId> for String {
    fn from(id: LogicalId) -> Self {
        id.0
    }
}
