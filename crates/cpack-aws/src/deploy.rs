//! # Bucket Deployment
//!
//! Declares the one-shot copy of a local source folder into a declared
//! bucket. At apply time the engine diffs the fingerprinted source against
//! the bucket's committed content and copies what changed, using a helper
//! execution role and ephemeral compute of its own (acknowledged here,
//! not modeled).

use std::path::Path;

use cpack_core::{LogicalId, Resource, Stack};
use serde_json::json;
use thiserror::Error;

use crate::asset::{AssetError, SourceFingerprint};
use crate::s3::Bucket;

/// Error while declaring a bucket deployment.
#[derive(Error, Debug)]
pub enum DeployError {
    /// The source folder could not be read or fingerprinted.
    #[error(transparent)]
    Asset(#[from] AssetError),

    /// The resource declaration itself failed.
    #[error(transparent)]
    Synth(#[from] cpack_core::SynthError),
}

/// Handle to a declared upload operation.
#[derive(Debug, Clone)]
pub struct BucketDeployment {
    logical_id: LogicalId,
    fingerprint: SourceFingerprint,
}

impl BucketDeployment {
    /// Declare the copy of `source` into `destination`.
    ///
    /// The source folder is fingerprinted immediately, so a missing or
    /// empty folder fails at synthesis rather than at apply. The emitted
    /// description depends on the destination bucket; the registration
    /// step must in turn declare its dependency on this description.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::Asset` for unreadable source folders and
    /// `DeployError::Synth` for id collisions.
    pub fn declare(
        stack: &mut Stack,
        id: &str,
        source: &Path,
        destination: &Bucket,
    ) -> Result<Self, DeployError> {
        let logical_id = LogicalId::new(id)?;
        let fingerprint = SourceFingerprint::of_folder(source)?;

        let resource = Resource::new(
            "Custom::BucketDeployment",
            json!({
                "SourceFingerprint": fingerprint.to_hex(),
                "DestinationBucketName": destination.name_expression(),
                "Prune": false
            }),
        );
        stack.add_resource(logical_id.clone(), resource)?;
        stack.add_dependency(&logical_id, destination.logical_id())?;

        tracing::debug!(
            deployment = %logical_id,
            fingerprint = %fingerprint,
            "declared bucket deployment"
        );
        Ok(Self {
            logical_id,
            fingerprint,
        })
    }

    /// Logical id of the upload-operation resource.
    pub fn logical_id(&self) -> &LogicalId {
        &self.logical_id
    }

    /// Fingerprint of the source folder at declaration time.
    pub fn fingerprint(&self) -> &SourceFingerprint {
        &self.fingerprint
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn source_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("template.yaml"), "Resources: {}\n").unwrap();
        dir
    }

    fn stack_with_bucket() -> (Stack, Bucket) {
        let mut stack = Stack::new("TestStack");
        let bucket = Bucket::declare(&mut stack, "Bucket").unwrap();
        (stack, bucket)
    }

    #[test]
    fn test_declares_copy_resource() {
        let dir = source_dir();
        let (mut stack, bucket) = stack_with_bucket();
        let deployment =
            BucketDeployment::declare(&mut stack, "Upload", dir.path(), &bucket).unwrap();

        let resource = stack.resource(deployment.logical_id()).unwrap();
        assert_eq!(resource.resource_type(), "Custom::BucketDeployment");
        assert_eq!(
            resource.properties()["SourceFingerprint"],
            deployment.fingerprint().to_hex()
        );
        assert_eq!(resource.properties()["DestinationBucketName"]["Ref"], "Bucket");
    }

    #[test]
    fn test_depends_on_destination() {
        let dir = source_dir();
        let (mut stack, bucket) = stack_with_bucket();
        let deployment =
            BucketDeployment::declare(&mut stack, "Upload", dir.path(), &bucket).unwrap();
        assert!(stack
            .resource(deployment.logical_id())
            .unwrap()
            .depends_on()
            .contains(bucket.logical_id()));
    }

    #[test]
    fn test_missing_source_fails_at_declaration() {
        let (mut stack, bucket) = stack_with_bucket();
        let err = BucketDeployment::declare(
            &mut stack,
            "Upload",
            Path::new("/no/such/folder"),
            &bucket,
        )
        .unwrap_err();
        assert!(matches!(err, DeployError::Asset(AssetError::SourceMissing(_))));
    }

    #[test]
    fn test_same_source_same_declaration() {
        let dir = source_dir();
        let (mut stack_a, bucket_a) = stack_with_bucket();
        let a = BucketDeployment::declare(&mut stack_a, "Upload", dir.path(), &bucket_a).unwrap();
        let (mut stack_b, bucket_b) = stack_with_bucket();
        let b = BucketDeployment::declare(&mut stack_b, "Upload", dir.path(), &bucket_b).unwrap();
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(
            stack_a.resource(a.logical_id()).unwrap(),
            stack_b.resource(b.logical_id()).unwrap()
        );
    }
}
