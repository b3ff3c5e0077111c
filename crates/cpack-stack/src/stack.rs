//! # Stack Wiring
//!
//! Declares the three resources and the one correctness-critical ordering
//! edge. The conformance-pack registration validates template presence at
//! the referenced URI when it is created, but it references only the
//! container, so the upload-before-registration ordering is declared as
//! an explicit dependency rather than left to reference inference.

use std::fs;
use std::path::Path;

use cpack_aws::{Bucket, BucketDeployment, ConformancePack, ConformancePackProps};
use cpack_core::{Environment, Stack};

use crate::error::StackError;
use crate::{DELIVERY_KEY_PREFIX, PACK_NAME, STACK_NAME, TEMPLATE_FILENAME};

/// The declared sustainability conformance-pack deployment.
#[derive(Debug, Clone)]
pub struct ConformancePackStack {
    stack: Stack,
    bucket: Bucket,
    deployment: BucketDeployment,
    pack: ConformancePack,
}

impl ConformancePackStack {
    /// Declare the full deployment from the template folder.
    ///
    /// Checks that the template document exists in the folder and parses
    /// as a YAML mapping, declares the bucket, the upload, and the
    /// registration, and adds the explicit upload-before-registration
    /// edge.
    ///
    /// # Errors
    ///
    /// Returns `StackError` for a missing or malformed template document,
    /// an unreadable source folder, or a declaration conflict.
    pub fn declare(
        env: Option<Environment>,
        template_dir: &Path,
    ) -> Result<Self, StackError> {
        check_template_document(template_dir)?;

        let mut stack = match env {
            Some(env) => Stack::new(STACK_NAME).with_env(env),
            None => Stack::new(STACK_NAME),
        };

        let bucket = Bucket::declare(&mut stack, "SustainabilityConformancePackBucket")?;

        let deployment = BucketDeployment::declare(
            &mut stack,
            "SustainabilityConformancePackDeployment",
            template_dir,
            &bucket,
        )?;

        let pack = ConformancePack::declare(
            &mut stack,
            "SustainabilityConformancePack",
            ConformancePackProps {
                pack_name: PACK_NAME,
                delivery_bucket: &bucket,
                delivery_key_prefix: DELIVERY_KEY_PREFIX,
                template_filename: TEMPLATE_FILENAME,
            },
        )?;

        // The registration must wait for the upload to complete; creating
        // it earlier fails with a template-not-found condition from the
        // auditing service.
        stack.add_dependency(pack.logical_id(), deployment.logical_id())?;

        tracing::info!(
            stack = STACK_NAME,
            resources = stack.resources().len(),
            "declared conformance-pack deployment"
        );
        Ok(Self {
            stack,
            bucket,
            deployment,
            pack,
        })
    }

    /// The underlying resource graph.
    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    /// Mutable access to the underlying graph, for attaching suppressions.
    pub fn stack_mut(&mut self) -> &mut Stack {
        &mut self.stack
    }

    /// Consume the wiring and return the bare stack.
    pub fn into_stack(self) -> Stack {
        self.stack
    }

    /// Handle to the declared bucket.
    pub fn bucket(&self) -> &Bucket {
        &self.bucket
    }

    /// Handle to the declared upload operation.
    pub fn deployment(&self) -> &BucketDeployment {
        &self.deployment
    }

    /// Handle to the declared registration.
    pub fn pack(&self) -> &ConformancePack {
        &self.pack
    }
}

/// Require the template document to exist and parse as a YAML mapping.
///
/// The rule schema inside stays opaque; this converts the apply-time
/// "template not found / not parseable" failure into a synthesis-time
/// error, nothing more.
fn check_template_document(template_dir: &Path) -> Result<(), StackError> {
    let path = template_dir.join(TEMPLATE_FILENAME);
    if !path.is_file() {
        return Err(StackError::TemplateMissing(path));
    }
    let raw = fs::read_to_string(&path).map_err(|source| StackError::TemplateUnreadable {
        path: path.clone(),
        source,
    })?;
    let value: serde_yaml::Value =
        serde_yaml::from_str(&raw).map_err(|source| StackError::TemplateMalformed {
            path: path.clone(),
            source,
        })?;
    if !value.is_mapping() {
        return Err(StackError::TemplateNotMapping(path));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn template_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(TEMPLATE_FILENAME),
            "Resources:\n  SampleRule:\n    Type: AWS::Config::ConfigRule\n",
        )
        .unwrap();
        dir
    }

    #[test]
    fn test_declares_all_resources() {
        let dir = template_dir();
        let wired = ConformancePackStack::declare(None, dir.path()).unwrap();
        // Bucket + policy + auto-delete + upload + registration.
        assert_eq!(wired.stack().resources().len(), 5);
    }

    #[test]
    fn test_registration_depends_on_upload() {
        let dir = template_dir();
        let wired = ConformancePackStack::declare(None, dir.path()).unwrap();
        let pack = wired.stack().resource(wired.pack().logical_id()).unwrap();
        assert!(pack.depends_on().contains(wired.deployment().logical_id()));
    }

    #[test]
    fn test_registration_depends_on_upload_with_env() {
        let dir = template_dir();
        let env = Environment::new("123456789012", "eu-west-1");
        let wired = ConformancePackStack::declare(Some(env.clone()), dir.path()).unwrap();
        assert_eq!(wired.stack().env(), Some(&env));
        let pack = wired.stack().resource(wired.pack().logical_id()).unwrap();
        assert!(pack.depends_on().contains(wired.deployment().logical_id()));
    }

    #[test]
    fn test_deployment_order_bucket_upload_registration() {
        let dir = template_dir();
        let wired = ConformancePackStack::declare(None, dir.path()).unwrap();
        let order = wired.stack().deployment_order().unwrap();
        let pos = |id: &cpack_core::LogicalId| order.iter().position(|o| o == id).unwrap();
        assert!(pos(wired.bucket().logical_id()) < pos(wired.deployment().logical_id()));
        assert!(pos(wired.deployment().logical_id()) < pos(wired.pack().logical_id()));
    }

    #[test]
    fn test_missing_template_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConformancePackStack::declare(None, dir.path()).unwrap_err();
        assert!(matches!(err, StackError::TemplateMissing(_)));
    }

    #[test]
    fn test_malformed_template_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(TEMPLATE_FILENAME), "Resources: [unclosed\n").unwrap();
        let err = ConformancePackStack::declare(None, dir.path()).unwrap_err();
        assert!(matches!(err, StackError::TemplateMalformed { .. }));
    }

    #[test]
    fn test_non_mapping_template_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(TEMPLATE_FILENAME), "- just\n- a\n- list\n").unwrap();
        let err = ConformancePackStack::declare(None, dir.path()).unwrap_err();
        assert!(matches!(err, StackError::TemplateNotMapping(_)));
    }

    #[test]
    fn test_registration_properties_fixed() {
        let dir = template_dir();
        let wired = ConformancePackStack::declare(None, dir.path()).unwrap();
        let props = wired
            .stack()
            .resource(wired.pack().logical_id())
            .unwrap()
            .properties();
        assert_eq!(props["ConformancePackName"], PACK_NAME);
        assert_eq!(props["DeliveryS3KeyPrefix"], DELIVERY_KEY_PREFIX);
    }
}
