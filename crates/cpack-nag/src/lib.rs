//! # cpack-nag — Security-Best-Practices Lint Pass
//!
//! An automated scan over a declared stack that flags known insecure or
//! non-ideal conditions, in the manner of the AwsSolutions rule pack.
//! Findings that are justified and accepted are recorded as stack-level
//! [`Suppression`](cpack_core::Suppression) entries, and the report
//! partitions findings into suppressed and unsuppressed accordingly, so
//! repeated scans never re-flag an acknowledged condition.
//!
//! The pass runs at authoring time against the declared graph. It has no
//! apply-time behavior and attaches nothing to the resources it inspects.
//!
//! ## Crate Policy
//!
//! - Checks inspect resource descriptions only; nothing here talks to a
//!   cloud service.
//! - Suppression matching is exact on the finding identifier. Nothing is
//!   suppressed implicitly.

pub mod report;
pub mod rules;

pub use report::{check_stack, NagReport, SuppressedFinding};
pub use rules::{AwsSolutionsChecks, Finding, NagError, RuleId};
