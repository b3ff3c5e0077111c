//! # Storage Bucket
//!
//! Declares the versioned, encrypted, TLS-only object storage container.
//! The security posture is fixed: `declare()` exposes no knobs for
//! versioning, encryption, or transport policy, and destroy-on-teardown is
//! always paired with auto-delete-contents (teardown of a non-empty
//! container would otherwise fail).
//!
//! One call emits three resource descriptions, mirroring what the
//! deployment engine materializes for such a container:
//!
//! - the bucket itself (`AWS::S3::Bucket`),
//! - a bucket policy denying non-TLS transport (`AWS::S3::BucketPolicy`),
//! - the auto-delete companion (`Custom::S3AutoDeleteObjects`), which
//!   empties the container before the engine deletes it.

use cpack_core::intrinsics::{get_att, join, reference};
use cpack_core::{DeletionPolicy, LogicalId, Resource, Stack, SynthError};
use serde_json::json;

/// Handle to a declared storage bucket.
///
/// Carries the logical ids the later declaration steps need; the resource
/// descriptions themselves live on the stack.
#[derive(Debug, Clone)]
pub struct Bucket {
    logical_id: LogicalId,
    policy_id: LogicalId,
    auto_delete_id: LogicalId,
}

impl Bucket {
    /// Declare the bucket, its TLS-only policy, and its auto-delete
    /// companion on the stack.
    ///
    /// # Errors
    ///
    /// Returns `SynthError` if a logical id is invalid or already taken.
    pub fn declare(stack: &mut Stack, id: &str) -> Result<Self, SynthError> {
        let logical_id = LogicalId::new(id)?;
        let policy_id = LogicalId::new(format!("{id}Policy"))?;
        let auto_delete_id = LogicalId::new(format!("{id}AutoDeleteObjects"))?;

        let bucket = Resource::new(
            "AWS::S3::Bucket",
            json!({
                "VersioningConfiguration": { "Status": "Enabled" },
                "BucketEncryption": {
                    "ServerSideEncryptionConfiguration": [
                        { "ServerSideEncryptionByDefault": { "SSEAlgorithm": "AES256" } }
                    ]
                }
            }),
        )
        .with_deletion_policy(DeletionPolicy::Delete);
        stack.add_resource(logical_id.clone(), bucket)?;

        // Deny any access over insecure transport, for all principals,
        // on the bucket and everything in it.
        let policy = Resource::new(
            "AWS::S3::BucketPolicy",
            json!({
                "Bucket": reference(&logical_id),
                "PolicyDocument": {
                    "Version": "2012-10-17",
                    "Statement": [{
                        "Sid": "DenyInsecureTransport",
                        "Effect": "Deny",
                        "Principal": { "AWS": "*" },
                        "Action": "s3:*",
                        "Resource": [
                            get_att(&logical_id, "Arn"),
                            join("", vec![get_att(&logical_id, "Arn"), json!("/*")])
                        ],
                        "Condition": { "Bool": { "aws:SecureTransport": "false" } }
                    }]
                }
            }),
        );
        stack.add_resource(policy_id.clone(), policy)?;
        stack.add_dependency(&policy_id, &logical_id)?;

        let auto_delete = Resource::new(
            "Custom::S3AutoDeleteObjects",
            json!({ "BucketName": reference(&logical_id) }),
        );
        stack.add_resource(auto_delete_id.clone(), auto_delete)?;
        stack.add_dependency(&auto_delete_id, &logical_id)?;

        tracing::debug!(bucket = %logical_id, "declared storage bucket");
        Ok(Self {
            logical_id,
            policy_id,
            auto_delete_id,
        })
    }

    /// Logical id of the bucket resource.
    pub fn logical_id(&self) -> &LogicalId {
        &self.logical_id
    }

    /// Logical id of the TLS-only bucket policy.
    pub fn policy_id(&self) -> &LogicalId {
        &self.policy_id
    }

    /// Logical id of the auto-delete companion resource.
    pub fn auto_delete_id(&self) -> &LogicalId {
        &self.auto_delete_id
    }

    /// Late-bound expression resolving to the bucket's physical name.
    pub fn name_expression(&self) -> serde_json::Value {
        reference(&self.logical_id)
    }
}
