//! # cpack-aws — Managed-Service Resource Constructors
//!
//! Typed constructors for the three managed-service resources the
//! conformance-pack deployment consumes: the storage bucket (`s3`), the
//! local-folder-to-bucket deployment (`deploy`), and the conformance-pack
//! registration (`config`).
//!
//! The services themselves are opaque: constructors here only produce
//! resource descriptions on a [`Stack`](cpack_core::Stack). Anything that
//! happens at apply time (the upload helper's execution role, name
//! generation, convergence) belongs to the external deployment engine.
//!
//! ## Crate Policy
//!
//! - Fixed security posture is not configurable. `Bucket::declare()` takes
//!   no flags for versioning, encryption, or transport policy, and pairs
//!   destroy-on-teardown with auto-delete-contents unconditionally.
//! - Constructors return lightweight handles (logical ids plus whatever
//!   the next declaration step needs), never the resources themselves.

pub mod asset;
pub mod config;
pub mod deploy;
pub mod s3;

pub use asset::{AssetError, SourceFingerprint};
pub use config::{object_uri, ConformancePack, ConformancePackProps};
pub use deploy::{BucketDeployment, DeployError};
pub use s3::Bucket;
