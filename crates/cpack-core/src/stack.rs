//! # Stack — Dependency-Ordered Resource Graph
//!
//! The unit of declared infrastructure deployed and destroyed together.
//! A `Stack` accumulates resource descriptions and explicit dependency
//! edges, then synthesizes them into a [`Template`].
//!
//! ## The One Correctness-Critical Invariant
//!
//! The deployment engine serializes resources connected by a dependency
//! edge and may converge everything else concurrently. When a resource
//! references another only indirectly (the conformance-pack registration
//! references the container, not the uploaded object), the ordering the
//! registration actually needs must be declared explicitly through
//! [`Stack::add_dependency()`]. The edge ends up in the resource's
//! `DependsOn` set and survives into the template.
//!
//! Apply-time, for the record, the engine walks:
//! {not-created} → create container → {container-ready} → run upload →
//! {upload-complete} → create registration → {registration-active},
//! and tears down in reverse order.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::json;

use crate::env::Environment;
use crate::error::SynthError;
use crate::ids::LogicalId;
use crate::resource::Resource;
use crate::suppression::Suppression;
use crate::template::Template;

/// A named collection of resource declarations with explicit dependency
/// edges and a stack-level suppression registry.
#[derive(Debug, Clone)]
pub struct Stack {
    name: String,
    env: Option<Environment>,
    resources: BTreeMap<LogicalId, Resource>,
    suppressions: Vec<Suppression>,
}

impl Stack {
    /// Start an empty, environment-agnostic stack.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            env: None,
            resources: BTreeMap::new(),
            suppressions: Vec::new(),
        }
    }

    /// Pin the stack to target-environment coordinates.
    ///
    /// Without coordinates the stack is environment-agnostic; nothing in
    /// this workspace requires an environment-specific lookup, so synthesis
    /// succeeds either way.
    pub fn with_env(mut self, env: Environment) -> Self {
        self.env = Some(env);
        self
    }

    /// The stack name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Target coordinates, if the stack was pinned.
    pub fn env(&self) -> Option<&Environment> {
        self.env.as_ref()
    }

    /// Declare a resource under a logical id.
    ///
    /// # Errors
    ///
    /// Returns `SynthError::DuplicateLogicalId` if the id is already taken.
    pub fn add_resource(&mut self, id: LogicalId, resource: Resource) -> Result<(), SynthError> {
        if self.resources.contains_key(&id) {
            return Err(SynthError::DuplicateLogicalId(id.as_str().to_string()));
        }
        tracing::debug!(logical_id = %id, resource_type = resource.resource_type(), "declared resource");
        self.resources.insert(id, resource);
        Ok(())
    }

    /// Declare an explicit ordering edge: `dependency` must be converged
    /// before `dependent`.
    ///
    /// # Errors
    ///
    /// Returns `SynthError::UnknownDependency` if either end of the edge
    /// has not been declared.
    pub fn add_dependency(
        &mut self,
        dependent: &LogicalId,
        dependency: &LogicalId,
    ) -> Result<(), SynthError> {
        if !self.resources.contains_key(dependency) {
            return Err(SynthError::UnknownDependency {
                dependent: dependent.as_str().to_string(),
                missing: dependency.as_str().to_string(),
            });
        }
        let Some(resource) = self.resources.get_mut(dependent) else {
            return Err(SynthError::UnknownDependency {
                dependent: dependent.as_str().to_string(),
                missing: dependent.as_str().to_string(),
            });
        };
        resource.add_depends_on(dependency.clone());
        Ok(())
    }

    /// Look up a declared resource.
    pub fn resource(&self, id: &LogicalId) -> Option<&Resource> {
        self.resources.get(id)
    }

    /// All declared resources, keyed by logical id.
    pub fn resources(&self) -> &BTreeMap<LogicalId, Resource> {
        &self.resources
    }

    /// Attach suppression records at stack granularity.
    ///
    /// Entries accumulate in attachment order; nothing is deduplicated or
    /// added implicitly.
    pub fn add_suppressions(&mut self, entries: impl IntoIterator<Item = Suppression>) {
        self.suppressions.extend(entries);
    }

    /// The stack-level suppression registry.
    pub fn suppressions(&self) -> &[Suppression] {
        &self.suppressions
    }

    /// The order in which the engine may converge the declared resources:
    /// a topological sort over the explicit dependency edges, ties broken
    /// by logical-id order so the result is deterministic.
    ///
    /// # Errors
    ///
    /// Returns `SynthError::UnknownDependency` if an edge targets an
    /// undeclared resource, or `SynthError::DependencyCycle` if the edges
    /// admit no order.
    pub fn deployment_order(&self) -> Result<Vec<LogicalId>, SynthError> {
        // Kahn's algorithm over ordered sets.
        let mut indegree: BTreeMap<&LogicalId, usize> =
            self.resources.keys().map(|id| (id, 0)).collect();
        let mut dependents: BTreeMap<&LogicalId, BTreeSet<&LogicalId>> = BTreeMap::new();

        for (id, resource) in &self.resources {
            for dep in resource.depends_on() {
                if !self.resources.contains_key(dep) {
                    return Err(SynthError::UnknownDependency {
                        dependent: id.as_str().to_string(),
                        missing: dep.as_str().to_string(),
                    });
                }
                if dependents.entry(dep).or_default().insert(id) {
                    if let Some(deg) = indegree.get_mut(id) {
                        *deg += 1;
                    }
                }
            }
        }

        let mut ready: BTreeSet<&LogicalId> = indegree
            .iter()
            .filter(|(_, deg)| **deg == 0)
            .map(|(id, _)| *id)
            .collect();
        let mut order = Vec::with_capacity(self.resources.len());

        while let Some(id) = ready.pop_first() {
            order.push(id.clone());
            if let Some(next) = dependents.get(id) {
                for dependent in next {
                    if let Some(deg) = indegree.get_mut(dependent) {
                        *deg -= 1;
                        if *deg == 0 {
                            ready.insert(*dependent);
                        }
                    }
                }
            }
        }

        if order.len() < self.resources.len() {
            let stuck = indegree
                .iter()
                .filter(|(_, deg)| **deg > 0)
                .map(|(id, _)| id.as_str().to_string())
                .next()
                .unwrap_or_default();
            return Err(SynthError::DependencyCycle(stuck));
        }
        Ok(order)
    }

    /// Synthesize the stack into a [`Template`].
    ///
    /// Validates the dependency edges (every edge resolves, no cycles) and
    /// renders the resource map plus the suppression registry. Synthesis is
    /// pure: the same stack synthesizes to the same template every time.
    pub fn synthesize(&self) -> Result<Template, SynthError> {
        self.deployment_order()?;

        let metadata = if self.suppressions.is_empty() {
            None
        } else {
            Some(json!({
                "cpack_nag": { "rules_to_suppress": self.suppressions }
            }))
        };

        tracing::debug!(
            stack = %self.name,
            resources = self.resources.len(),
            suppressions = self.suppressions.len(),
            "synthesized stack"
        );
        Ok(Template::new(self.resources.clone(), metadata))
    }
}
