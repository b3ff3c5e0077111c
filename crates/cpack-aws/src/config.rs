//! # Conformance-Pack Registration
//!
//! Declares the registration of an uploaded compliance-rules template with
//! the configuration-auditing service. The registration references the
//! container, not the uploaded object, so the upload-before-registration
//! ordering the service requires cannot be inferred from references
//! alone: the caller must declare it explicitly with
//! [`Stack::add_dependency()`](cpack_core::Stack::add_dependency), exactly
//! as the stack crate does.

use cpack_core::intrinsics::join;
use cpack_core::{LogicalId, Resource, Stack, SynthError};
use serde_json::json;

use crate::s3::Bucket;

/// Inputs for a conformance-pack registration.
#[derive(Debug, Clone)]
pub struct ConformancePackProps<'a> {
    /// Name under which the pack is registered with the auditing service.
    pub pack_name: &'a str,
    /// Container the service reads the template from and delivers findings to.
    pub delivery_bucket: &'a Bucket,
    /// Key prefix for the service's delivery location. A delivery
    /// parameter only, never part of the template URI.
    pub delivery_key_prefix: &'a str,
    /// Filename of the uploaded template within the container.
    pub template_filename: &'a str,
}

/// Handle to a declared conformance-pack registration.
#[derive(Debug, Clone)]
pub struct ConformancePack {
    logical_id: LogicalId,
}

impl ConformancePack {
    /// Declare the registration on the stack.
    ///
    /// The template URI is a late-bound concatenation of `s3://`, the
    /// container's physical name, and the template filename. The delivery
    /// key prefix is passed through as its own property.
    ///
    /// # Errors
    ///
    /// Returns `SynthError` if the logical id is invalid or already taken.
    pub fn declare(
        stack: &mut Stack,
        id: &str,
        props: ConformancePackProps<'_>,
    ) -> Result<Self, SynthError> {
        let logical_id = LogicalId::new(id)?;

        let template_uri = join(
            "",
            vec![
                json!("s3://"),
                props.delivery_bucket.name_expression(),
                json!(format!("/{}", props.template_filename)),
            ],
        );
        let resource = Resource::new(
            "AWS::Config::ConformancePack",
            json!({
                "ConformancePackName": props.pack_name,
                "DeliveryS3Bucket": props.delivery_bucket.name_expression(),
                "DeliveryS3KeyPrefix": props.delivery_key_prefix,
                "TemplateS3Uri": template_uri
            }),
        );
        stack.add_resource(logical_id.clone(), resource)?;

        tracing::debug!(pack = %logical_id, name = props.pack_name, "declared conformance pack");
        Ok(Self { logical_id })
    }

    /// Logical id of the registration resource.
    pub fn logical_id(&self) -> &LogicalId {
        &self.logical_id
    }
}

/// The object URI of an uploaded template once the container's physical
/// name is known: `s3://<container-name>/<filename>`. The delivery key
/// prefix does not appear in the path.
pub fn object_uri(bucket_name: &str, filename: &str) -> String {
    format!("s3://{bucket_name}/{filename}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declared() -> (Stack, ConformancePack) {
        let mut stack = Stack::new("TestStack");
        let bucket = Bucket::declare(&mut stack, "Bucket").unwrap();
        let pack = ConformancePack::declare(
            &mut stack,
            "Pack",
            ConformancePackProps {
                pack_name: "SustainabilityConformancePack",
                delivery_bucket: &bucket,
                delivery_key_prefix: "sustainability-conformance-pack",
                template_filename: "template.yaml",
            },
        )
        .unwrap();
        (stack, pack)
    }

    #[test]
    fn test_registration_properties() {
        let (stack, pack) = declared();
        let props = stack.resource(pack.logical_id()).unwrap().properties();
        assert_eq!(props["ConformancePackName"], "SustainabilityConformancePack");
        assert_eq!(props["DeliveryS3Bucket"]["Ref"], "Bucket");
        assert_eq!(props["DeliveryS3KeyPrefix"], "sustainability-conformance-pack");
    }

    #[test]
    fn test_template_uri_excludes_prefix() {
        let (stack, pack) = declared();
        let props = stack.resource(pack.logical_id()).unwrap().properties();
        let parts = &props["TemplateS3Uri"]["Fn::Join"][1];
        assert_eq!(parts[0], "s3://");
        assert_eq!(parts[1]["Ref"], "Bucket");
        assert_eq!(parts[2], "/template.yaml");
    }

    #[test]
    fn test_object_uri() {
        assert_eq!(
            object_uri("my-bucket", "template.yaml"),
            "s3://my-bucket/template.yaml"
        );
    }

    #[test]
    fn test_no_implicit_dependency_on_upload() {
        // The registration only references the container. The ordering
        // edge onto the upload operation is the caller's responsibility.
        let (stack, pack) = declared();
        assert!(stack.resource(pack.logical_id()).unwrap().depends_on().is_empty());
    }
}
