//! # Synthesized Templates
//!
//! The output of synthesis: the declarative document the external
//! deployment engine consumes. A `Template` is a value, not a file; the
//! CLI decides where it lands. Resources are keyed by logical id in an
//! ordered map, so rendering is deterministic by construction.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::digest::{canonical_digest, ContentDigest};
use crate::error::SynthError;
use crate::ids::LogicalId;
use crate::resource::Resource;

/// Template format version understood by the deployment engine.
pub const TEMPLATE_FORMAT_VERSION: &str = "2010-09-09";

/// A synthesized deployment template.
///
/// Produced by [`Stack::synthesize()`](crate::Stack::synthesize); the only
/// mutation path is synthesis itself, so two templates from the same stack
/// compare equal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    /// Format version marker.
    #[serde(rename = "AWSTemplateFormatVersion")]
    format_version: String,

    /// Stack-level metadata. Carries the suppression registry under
    /// `cpack_nag.rules_to_suppress` when suppressions are attached.
    #[serde(rename = "Metadata", skip_serializing_if = "Option::is_none", default)]
    metadata: Option<Value>,

    /// Declared resources keyed by logical id.
    #[serde(rename = "Resources")]
    resources: BTreeMap<LogicalId, Resource>,
}

impl Template {
    pub(crate) fn new(
        resources: BTreeMap<LogicalId, Resource>,
        metadata: Option<Value>,
    ) -> Self {
        Self {
            format_version: TEMPLATE_FORMAT_VERSION.to_string(),
            metadata,
            resources,
        }
    }

    /// The declared resources, keyed by logical id.
    pub fn resources(&self) -> &BTreeMap<LogicalId, Resource> {
        &self.resources
    }

    /// Look up a resource by logical id.
    pub fn resource(&self, id: &LogicalId) -> Option<&Resource> {
        self.resources.get(id)
    }

    /// Stack-level metadata, if any.
    pub fn metadata(&self) -> Option<&Value> {
        self.metadata.as_ref()
    }

    /// Render the template as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, SynthError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Render the template as YAML.
    pub fn to_yaml(&self) -> Result<String, SynthError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Content digest of the template's canonical form.
    ///
    /// Stable across synthesis runs of an unchanged declaration; any
    /// resource or metadata change produces a different digest.
    pub fn digest(&self) -> Result<ContentDigest, SynthError> {
        canonical_digest(self)
    }
}
