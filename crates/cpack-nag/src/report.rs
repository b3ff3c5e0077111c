//! # Lint Report
//!
//! Applies a stack's suppression registry to the scan's findings. A
//! finding whose rule identifier matches a registered suppression is
//! recorded as suppressed together with the justification; everything
//! else stays unsuppressed and should fail the build.

use cpack_core::{Stack, Suppression};
use serde::Serialize;

use crate::rules::{AwsSolutionsChecks, Finding};

/// A finding acknowledged by a suppression entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuppressedFinding {
    /// The acknowledged finding.
    pub finding: Finding,
    /// Justification from the matching suppression entry.
    pub reason: String,
}

/// Outcome of a lint scan after suppression handling.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NagReport {
    suppressed: Vec<SuppressedFinding>,
    unsuppressed: Vec<Finding>,
}

impl NagReport {
    /// Partition findings against a suppression registry.
    ///
    /// Matching is exact on the finding identifier; the first matching
    /// entry supplies the recorded justification.
    pub fn evaluate(findings: Vec<Finding>, suppressions: &[Suppression]) -> Self {
        let mut report = Self::default();
        for finding in findings {
            let matched = suppressions
                .iter()
                .find(|s| s.id == finding.rule.as_str());
            match matched {
                Some(suppression) => report.suppressed.push(SuppressedFinding {
                    finding,
                    reason: suppression.reason.clone(),
                }),
                None => report.unsuppressed.push(finding),
            }
        }
        report
    }

    /// Findings acknowledged by the registry.
    pub fn suppressed(&self) -> &[SuppressedFinding] {
        &self.suppressed
    }

    /// Findings with no matching suppression entry.
    pub fn unsuppressed(&self) -> &[Finding] {
        &self.unsuppressed
    }

    /// True when every finding was acknowledged.
    pub fn is_clean(&self) -> bool {
        self.unsuppressed.is_empty()
    }
}

impl std::fmt::Display for NagReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for finding in &self.unsuppressed {
            writeln!(f, "FAIL {finding}")?;
        }
        for entry in &self.suppressed {
            writeln!(f, "ok   {} (suppressed: {})", entry.finding, entry.reason)?;
        }
        if self.suppressed.is_empty() && self.unsuppressed.is_empty() {
            writeln!(f, "no findings")?;
        }
        Ok(())
    }
}

/// Run the rule pack over a stack and apply its suppression registry.
pub fn check_stack(stack: &Stack) -> NagReport {
    let findings = AwsSolutionsChecks::scan(stack);
    NagReport::evaluate(findings, stack.suppressions())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleId;
    use cpack_core::{LogicalId, Resource};
    use serde_json::json;

    fn bucket_stack() -> Stack {
        let mut stack = Stack::new("ReportStack");
        stack
            .add_resource(
                LogicalId::new("Bucket").unwrap(),
                Resource::new("AWS::S3::Bucket", json!({})),
            )
            .unwrap();
        stack
    }

    #[test]
    fn test_unsuppressed_finding_reported() {
        let report = check_stack(&bucket_stack());
        assert!(!report.is_clean());
        assert_eq!(report.unsuppressed().len(), 1);
        assert_eq!(report.unsuppressed()[0].rule, RuleId::S1);
    }

    #[test]
    fn test_matching_suppression_acknowledges_finding() {
        let mut stack = bucket_stack();
        stack.add_suppressions([Suppression::new(
            "AwsSolutions-S1",
            "No log bucket exists to deliver access logs to.",
        )]);
        let report = check_stack(&stack);
        assert!(report.is_clean());
        assert_eq!(report.suppressed().len(), 1);
        assert_eq!(
            report.suppressed()[0].reason,
            "No log bucket exists to deliver access logs to."
        );
    }

    #[test]
    fn test_unrelated_suppression_does_not_acknowledge() {
        let mut stack = bucket_stack();
        stack.add_suppressions([Suppression::new("AwsSolutions-IAM4", "unrelated")]);
        let report = check_stack(&stack);
        assert!(!report.is_clean());
        assert!(report.suppressed().is_empty());
    }

    #[test]
    fn test_clean_stack_reports_clean() {
        let mut stack = Stack::new("Empty");
        stack
            .add_resource(
                LogicalId::new("Pack").unwrap(),
                Resource::new("AWS::Config::ConformancePack", json!({})),
            )
            .unwrap();
        let report = check_stack(&stack);
        assert!(report.is_clean());
        assert!(report.suppressed().is_empty());
    }

    #[test]
    fn test_display_marks_failures() {
        let report = check_stack(&bucket_stack());
        let rendered = report.to_string();
        assert!(rendered.contains("FAIL"));
        assert!(rendered.contains("AwsSolutions-S1"));
    }
}
