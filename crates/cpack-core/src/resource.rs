//! # Resource Descriptions
//!
//! A `Resource` is a declarative description of one piece of desired
//! infrastructure: its provider type, its properties, its teardown policy,
//! and the set of resources that must be converged before it. Resources
//! serialize directly into entries of the template's `Resources` map.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ids::LogicalId;

/// What the deployment engine does with a resource when its stack is
/// destroyed.
///
/// `Delete` removes the underlying infrastructure; `Retain` orphans it.
/// Containers with contents additionally need an auto-delete companion
/// resource before `Delete` can succeed; that pairing is the constructor's
/// responsibility, not this enum's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeletionPolicy {
    /// Remove the resource on stack teardown.
    Delete,
    /// Leave the resource in place on stack teardown.
    Retain,
}

impl DeletionPolicy {
    /// Returns the template-format string for this policy.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Delete => "Delete",
            Self::Retain => "Retain",
        }
    }
}

impl std::fmt::Display for DeletionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declarative description of a single infrastructure resource.
///
/// The `depends_on` set holds explicit ordering edges only. Implicit
/// ordering through intrinsic references is the engine's business; when an
/// ordering matters for correctness it must be declared here explicitly
/// (see the conformance-pack registration, which references the container
/// but must wait for the upload).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Resource {
    /// Provider resource type, e.g. `AWS::S3::Bucket`.
    #[serde(rename = "Type")]
    resource_type: String,

    /// Resource properties as a JSON value tree. Intrinsic expressions
    /// (`Ref`, `Fn::GetAtt`, `Fn::Join`) appear as nested objects.
    #[serde(skip_serializing_if = "Value::is_null", default)]
    properties: Value,

    /// Explicit ordering edges: resources that must be converged first.
    #[serde(skip_serializing_if = "BTreeSet::is_empty", default)]
    depends_on: BTreeSet<LogicalId>,

    /// Teardown policy for the resource.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    deletion_policy: Option<DeletionPolicy>,

    /// Policy applied when the engine must replace the resource on update.
    /// Always set alongside `deletion_policy` so replacement and teardown
    /// behave identically.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    update_replace_policy: Option<DeletionPolicy>,
}

impl Resource {
    /// Describe a resource of the given provider type with the given
    /// properties.
    pub fn new(resource_type: impl Into<String>, properties: Value) -> Self {
        Self {
            resource_type: resource_type.into(),
            properties,
            depends_on: BTreeSet::new(),
            deletion_policy: None,
            update_replace_policy: None,
        }
    }

    /// Set the teardown policy. The update-replace policy is set to the
    /// same value so a replaced resource is never handled differently from
    /// a destroyed one.
    pub fn with_deletion_policy(mut self, policy: DeletionPolicy) -> Self {
        self.deletion_policy = Some(policy);
        self.update_replace_policy = Some(policy);
        self
    }

    /// The provider resource type.
    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    /// The resource properties.
    pub fn properties(&self) -> &Value {
        &self.properties
    }

    /// Explicit ordering edges declared for this resource.
    pub fn depends_on(&self) -> &BTreeSet<LogicalId> {
        &self.depends_on
    }

    /// The teardown policy, if one was declared.
    pub fn deletion_policy(&self) -> Option<DeletionPolicy> {
        self.deletion_policy
    }

    /// The update-replace policy, if one was declared.
    pub fn update_replace_policy(&self) -> Option<DeletionPolicy> {
        self.update_replace_policy
    }

    pub(crate) fn add_depends_on(&mut self, id: LogicalId) {
        self.depends_on.insert(id);
    }
}
