//! # Deployment Declaration Errors
//!
//! Everything that can go wrong while declaring the conformance-pack
//! stack. All of it surfaces before a template is written; apply-time
//! failures belong to the external deployment engine.

use std::path::PathBuf;

use thiserror::Error;

/// Error while declaring the conformance-pack deployment.
#[derive(Error, Debug)]
pub enum StackError {
    /// The graph declaration failed (id collision, bad edge, cycle).
    #[error(transparent)]
    Synth(#[from] cpack_core::SynthError),

    /// The template source folder could not be read or fingerprinted.
    #[error(transparent)]
    Deploy(#[from] cpack_aws::DeployError),

    /// The template document is missing from the source folder.
    #[error("conformance pack template not found: {0}")]
    TemplateMissing(PathBuf),

    /// The template document could not be read.
    #[error("failed to read conformance pack template {path}: {source}")]
    TemplateUnreadable {
        /// Path of the template document.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// The template document is not valid YAML.
    #[error("conformance pack template {path} is not valid YAML: {source}")]
    TemplateMalformed {
        /// Path of the template document.
        path: PathBuf,
        /// The parse error.
        source: serde_yaml::Error,
    },

    /// The template document parsed but is not a mapping at the top level.
    #[error("conformance pack template {0} is not a YAML mapping")]
    TemplateNotMapping(PathBuf),
}
