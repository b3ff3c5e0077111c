//! # cpack-stack — The Sustainability Conformance-Pack Deployment
//!
//! The concrete deployment this workspace exists for: a storage bucket, a
//! one-shot upload of the sustainability compliance-rules template into
//! it, and the registration of that template as a conformance pack with
//! the configuration-auditing service, in that order, with the ordering
//! declared explicitly.
//!
//! [`ConformancePackStack`] wires the three resources;
//! [`build_app()`](app::build_app) is the deployment entry point that
//! additionally attaches the accepted lint suppressions and hands the
//! stack to an explicit [`App`](cpack_core::App) context.
//!
//! ## Fixed Configuration
//!
//! Bucket security posture, naming, the template folder, and the template
//! filename are constants. Multi-environment parameterization of names or
//! template content is deliberately not provided; only the optional
//! account/region coordinates vary per deployment.

pub mod app;
pub mod error;
pub mod stack;

pub use app::{accepted_suppressions, build_app, lint_app};
pub use error::StackError;
pub use stack::ConformancePackStack;

/// Stack name under which the deployment unit is registered.
pub const STACK_NAME: &str = "SustainabilityConformancePackStack";

/// Name under which the pack is registered with the auditing service.
pub const PACK_NAME: &str = "SustainabilityConformancePack";

/// Delivery key prefix for the auditing service. A delivery-location
/// parameter on the registration, never part of the template URI.
pub const DELIVERY_KEY_PREFIX: &str = "sustainability-conformance-pack";

/// Folder holding the compliance-rules template, relative to the
/// repository root.
pub const TEMPLATE_FOLDER: &str = "assets/conformance-pack-template";

/// Fixed filename of the template document within the folder.
pub const TEMPLATE_FILENAME: &str = "template.yaml";
