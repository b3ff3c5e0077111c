//! # cpack-core — Foundational Types for the Conformance-Pack Stack
//!
//! This crate is the bedrock of the conformance-pack deployment workspace.
//! It defines the declarative resource-graph primitives that every other
//! crate builds on: validated logical identifiers, resource descriptions,
//! the `Stack` builder with explicit dependency edges, suppression records,
//! and deterministic synthesis to the deployment engine's template format.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for identifiers.** `LogicalId` is a validated
//!    newtype; no bare strings name resources anywhere in the workspace.
//!
//! 2. **Declare-then-apply separation.** This crate only describes desired
//!    end-state resources and their dependency edges. The external
//!    deployment engine converges infrastructure to match; nothing here
//!    performs network calls or provisioning.
//!
//! 3. **Explicit context, no singletons.** The deployment unit is an `App`
//!    value threaded through the declaration steps. There is no module-level
//!    shared state to attach stacks or suppressions to.
//!
//! 4. **Deterministic synthesis.** Resources live in ordered maps, dependency
//!    sets are ordered, and template digests are computed over canonical
//!    (RFC 8785) bytes. Synthesizing the same graph twice produces identical
//!    output, byte for byte.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `cpack-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug` and `Clone`, and implement
//!   `Serialize`/`Deserialize`.

pub mod app;
pub mod digest;
pub mod env;
pub mod error;
pub mod ids;
pub mod intrinsics;
pub mod resource;
pub mod stack;
pub mod suppression;
pub mod template;

// Re-export primary types for ergonomic imports.
pub use app::App;
pub use digest::{canonical_digest, ContentDigest};
pub use env::Environment;
pub use error::SynthError;
pub use ids::LogicalId;
pub use resource::{DeletionPolicy, Resource};
pub use stack::Stack;
pub use suppression::Suppression;
pub use template::Template;
