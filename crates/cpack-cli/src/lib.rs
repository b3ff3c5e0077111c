//! # cpack-cli — Conformance-Pack Stack Command-Line Interface
//!
//! Authoring-side entry points for the deployment. `synth` renders the
//! declared resource graph to the template files the external deployment
//! engine consumes; `lint` runs the security-best-practices pass and
//! fails on unsuppressed findings. Deploy, diff, and destroy remain the
//! external engine's commands; this binary only produces the graph.
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from handler logic; handlers delegate
//!   to the domain crates and hold no resource wiring of their own.
//! - Handlers are plain functions over parsed arguments so tests can call
//!   them without spawning the binary.

pub mod lint;
pub mod synth;
