//! # Target Environment Coordinates
//!
//! Optional account/region coordinates for a stack. A stack without an
//! environment is environment-agnostic: its synthesized template can be
//! deployed anywhere, but declarations requiring environment-specific
//! lookups would fail at synthesis. No such declaration exists in this
//! workspace, so synthesis always succeeds either way.

use serde::{Deserialize, Serialize};

/// Deployment target coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    /// Account identifier.
    pub account: String,
    /// Region identifier.
    pub region: String,
}

impl Environment {
    /// Pair an account with a region.
    pub fn new(account: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            region: region.into(),
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.account, self.region)
    }
}
