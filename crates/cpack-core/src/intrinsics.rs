//! # Intrinsic Expressions
//!
//! Helpers for the deployment engine's intrinsic reference functions.
//! Physical names and attributes of resources do not exist at synthesis
//! time; properties that need them carry these late-bound expressions
//! instead, and the engine resolves them at apply time.

use serde_json::{json, Value};

use crate::ids::LogicalId;

/// Late-bound reference to a resource's primary identifier (for a storage
/// container, its physical name).
pub fn reference(id: &LogicalId) -> Value {
    json!({ "Ref": id.as_str() })
}

/// Late-bound reference to a named attribute of a resource (for example a
/// container's ARN).
pub fn get_att(id: &LogicalId, attribute: &str) -> Value {
    json!({ "Fn::GetAtt": [id.as_str(), attribute] })
}

/// Concatenation of literal fragments and late-bound expressions with the
/// given delimiter.
pub fn join(delimiter: &str, parts: Vec<Value>) -> Value {
    json!({ "Fn::Join": [delimiter, parts] })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> LogicalId {
        LogicalId::new(s).unwrap()
    }

    #[test]
    fn test_reference_shape() {
        assert_eq!(reference(&id("Bucket")), json!({"Ref": "Bucket"}));
    }

    #[test]
    fn test_get_att_shape() {
        assert_eq!(
            get_att(&id("Bucket"), "Arn"),
            json!({"Fn::GetAtt": ["Bucket", "Arn"]})
        );
    }

    #[test]
    fn test_join_shape() {
        let uri = join(
            "",
            vec![json!("s3://"), reference(&id("Bucket")), json!("/template.yaml")],
        );
        assert_eq!(
            uri,
            json!({"Fn::Join": ["", ["s3://", {"Ref": "Bucket"}, "/template.yaml"]]})
        );
    }
}
