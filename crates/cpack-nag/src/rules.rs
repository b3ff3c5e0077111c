//! # Lint Rules
//!
//! The rule checks the scan applies to a declared stack. Each check
//! matches on a resource type and inspects the declared properties; every
//! hit becomes a [`Finding`] carrying the resource's logical id, the rule
//! identifier, and a message.

use cpack_core::{LogicalId, Stack};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Function runtimes currently considered latest per language family.
/// L1 flags any function declaring a runtime outside this list.
const LATEST_RUNTIMES: &[&str] = &[
    "nodejs22.x",
    "python3.13",
    "java21",
    "dotnet8",
    "ruby3.4",
    "provided.al2023",
];

/// Error raised for unrecognized rule identifiers.
#[derive(Error, Debug)]
pub enum NagError {
    /// The identifier does not name a known rule.
    #[error("unknown rule identifier: {0:?}")]
    UnknownRule(String),
}

/// Identifier of a lint rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RuleId {
    /// Storage bucket has server access logs disabled.
    #[serde(rename = "AwsSolutions-S1")]
    S1,
    /// IAM entity uses provider-managed policies.
    #[serde(rename = "AwsSolutions-IAM4")]
    Iam4,
    /// IAM entity carries wildcard permissions.
    #[serde(rename = "AwsSolutions-IAM5")]
    Iam5,
    /// Function resource is not configured with the latest runtime.
    #[serde(rename = "AwsSolutions-L1")]
    L1,
}

impl RuleId {
    /// All rules in the pack, in identifier order.
    pub fn all() -> &'static [RuleId] {
        &[Self::S1, Self::Iam4, Self::Iam5, Self::L1]
    }

    /// The finding identifier suppression entries match against.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::S1 => "AwsSolutions-S1",
            Self::Iam4 => "AwsSolutions-IAM4",
            Self::Iam5 => "AwsSolutions-IAM5",
            Self::L1 => "AwsSolutions-L1",
        }
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RuleId {
    type Err = NagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AwsSolutions-S1" => Ok(Self::S1),
            "AwsSolutions-IAM4" => Ok(Self::Iam4),
            "AwsSolutions-IAM5" => Ok(Self::Iam5),
            "AwsSolutions-L1" => Ok(Self::L1),
            other => Err(NagError::UnknownRule(other.to_string())),
        }
    }
}

/// A single lint finding with structured context.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
    /// Logical id of the resource the rule fired on.
    pub resource: LogicalId,
    /// The rule that fired.
    pub rule: RuleId,
    /// Human-readable description of the condition.
    pub message: String,
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.rule, self.resource, self.message)
    }
}

/// The AwsSolutions rule pack.
#[derive(Debug, Clone, Copy, Default)]
pub struct AwsSolutionsChecks;

impl AwsSolutionsChecks {
    /// Scan every resource declared on the stack and collect findings.
    pub fn scan(stack: &Stack) -> Vec<Finding> {
        let mut findings = Vec::new();
        for (id, resource) in stack.resources() {
            let props = resource.properties();
            match resource.resource_type() {
                "AWS::S3::Bucket" => {
                    if props.get("LoggingConfiguration").is_none() {
                        findings.push(Finding {
                            resource: id.clone(),
                            rule: RuleId::S1,
                            message: "bucket has server access logs disabled".to_string(),
                        });
                    }
                }
                "AWS::IAM::Role" => {
                    if props
                        .get("ManagedPolicyArns")
                        .and_then(Value::as_array)
                        .is_some_and(|arns| !arns.is_empty())
                    {
                        findings.push(Finding {
                            resource: id.clone(),
                            rule: RuleId::Iam4,
                            message: "role attaches provider-managed policies".to_string(),
                        });
                    }
                    if policies_have_wildcards(props.get("Policies")) {
                        findings.push(Finding {
                            resource: id.clone(),
                            rule: RuleId::Iam5,
                            message: "role carries wildcard permissions".to_string(),
                        });
                    }
                }
                "AWS::IAM::Policy" | "AWS::IAM::ManagedPolicy" => {
                    if document_has_wildcards(props.get("PolicyDocument")) {
                        findings.push(Finding {
                            resource: id.clone(),
                            rule: RuleId::Iam5,
                            message: "policy carries wildcard permissions".to_string(),
                        });
                    }
                }
                "AWS::Lambda::Function" => {
                    let runtime = props.get("Runtime").and_then(Value::as_str);
                    if runtime.is_some_and(|r| !LATEST_RUNTIMES.contains(&r)) {
                        findings.push(Finding {
                            resource: id.clone(),
                            rule: RuleId::L1,
                            message: format!(
                                "function runtime {:?} is not the latest available",
                                runtime.unwrap_or_default()
                            ),
                        });
                    }
                }
                _ => {}
            }
        }
        tracing::debug!(stack = stack.name(), findings = findings.len(), "lint scan complete");
        findings
    }
}

fn policies_have_wildcards(policies: Option<&Value>) -> bool {
    policies
        .and_then(Value::as_array)
        .is_some_and(|list| {
            list.iter()
                .any(|policy| document_has_wildcards(policy.get("PolicyDocument")))
        })
}

fn document_has_wildcards(document: Option<&Value>) -> bool {
    let Some(statements) = document
        .and_then(|d| d.get("Statement"))
        .and_then(Value::as_array)
    else {
        return false;
    };
    statements.iter().any(|statement| {
        // Deny statements narrow permissions; wildcards there are not a
        // privilege grant.
        if statement.get("Effect").and_then(Value::as_str) == Some("Deny") {
            return false;
        }
        ["Action", "Resource"]
            .iter()
            .any(|key| values_contain_wildcard(statement.get(*key)))
    })
}

fn values_contain_wildcard(value: Option<&Value>) -> bool {
    match value {
        Some(Value::String(s)) => s.contains('*'),
        Some(Value::Array(items)) => items
            .iter()
            .any(|item| item.as_str().is_some_and(|s| s.contains('*'))),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cpack_core::Resource;
    use serde_json::json;

    fn id(s: &str) -> LogicalId {
        LogicalId::new(s).unwrap()
    }

    fn stack_with(resource_id: &str, resource: Resource) -> Stack {
        let mut stack = Stack::new("LintStack");
        stack.add_resource(id(resource_id), resource).unwrap();
        stack
    }

    fn rules_fired(stack: &Stack) -> Vec<RuleId> {
        AwsSolutionsChecks::scan(stack).iter().map(|f| f.rule).collect()
    }

    #[test]
    fn test_bucket_without_access_logs_fires_s1() {
        let stack = stack_with("Bucket", Resource::new("AWS::S3::Bucket", json!({})));
        assert_eq!(rules_fired(&stack), vec![RuleId::S1]);
    }

    #[test]
    fn test_bucket_with_access_logs_clean() {
        let stack = stack_with(
            "Bucket",
            Resource::new(
                "AWS::S3::Bucket",
                json!({"LoggingConfiguration": {"DestinationBucketName": "logs"}}),
            ),
        );
        assert!(rules_fired(&stack).is_empty());
    }

    #[test]
    fn test_role_with_managed_policies_fires_iam4() {
        let stack = stack_with(
            "Role",
            Resource::new(
                "AWS::IAM::Role",
                json!({"ManagedPolicyArns": ["arn:aws:iam::aws:policy/AdministratorAccess"]}),
            ),
        );
        assert_eq!(rules_fired(&stack), vec![RuleId::Iam4]);
    }

    #[test]
    fn test_role_with_wildcard_inline_policy_fires_iam5() {
        let stack = stack_with(
            "Role",
            Resource::new(
                "AWS::IAM::Role",
                json!({"Policies": [{
                    "PolicyName": "helper",
                    "PolicyDocument": {"Statement": [{
                        "Effect": "Allow",
                        "Action": "s3:*",
                        "Resource": "*"
                    }]}
                }]}),
            ),
        );
        assert_eq!(rules_fired(&stack), vec![RuleId::Iam5]);
    }

    #[test]
    fn test_standalone_policy_wildcard_fires_iam5() {
        let stack = stack_with(
            "Policy",
            Resource::new(
                "AWS::IAM::Policy",
                json!({"PolicyDocument": {"Statement": [{
                    "Effect": "Allow",
                    "Action": ["s3:GetObject", "s3:PutObject"],
                    "Resource": "arn:aws:s3:::bucket/*"
                }]}}),
            ),
        );
        assert_eq!(rules_fired(&stack), vec![RuleId::Iam5]);
    }

    #[test]
    fn test_deny_statement_wildcards_ignored() {
        // The TLS-only bucket policy pattern: a Deny over s3:* must not
        // count as a wildcard privilege grant.
        let stack = stack_with(
            "Policy",
            Resource::new(
                "AWS::IAM::Policy",
                json!({"PolicyDocument": {"Statement": [{
                    "Effect": "Deny",
                    "Action": "s3:*",
                    "Resource": "*"
                }]}}),
            ),
        );
        assert!(rules_fired(&stack).is_empty());
    }

    #[test]
    fn test_outdated_runtime_fires_l1() {
        let stack = stack_with(
            "Fn",
            Resource::new("AWS::Lambda::Function", json!({"Runtime": "python3.9"})),
        );
        assert_eq!(rules_fired(&stack), vec![RuleId::L1]);
    }

    #[test]
    fn test_latest_runtime_clean() {
        let stack = stack_with(
            "Fn",
            Resource::new("AWS::Lambda::Function", json!({"Runtime": "python3.13"})),
        );
        assert!(rules_fired(&stack).is_empty());
    }

    #[test]
    fn test_unrelated_resource_ignored() {
        let stack = stack_with(
            "Pack",
            Resource::new("AWS::Config::ConformancePack", json!({})),
        );
        assert!(rules_fired(&stack).is_empty());
    }

    #[test]
    fn test_rule_id_roundtrip() {
        for rule in RuleId::all() {
            let parsed: RuleId = rule.as_str().parse().unwrap();
            assert_eq!(parsed, *rule);
        }
        assert!("AwsSolutions-XX".parse::<RuleId>().is_err());
    }

    #[test]
    fn test_rule_id_serializes_as_identifier() {
        let json = serde_json::to_string(&RuleId::Iam4).unwrap();
        assert_eq!(json, "\"AwsSolutions-IAM4\"");
    }
}
