//! # Deployment Entry Point
//!
//! Builds the deployment unit: declares the conformance-pack stack,
//! attaches the accepted lint suppressions, and hands the stack to an
//! explicit [`App`] context. The lint pass runs over the whole unit via
//! [`lint_app()`]. Nothing here performs network calls; the output is a
//! declarative resource graph for the external engine.

use std::path::Path;

use cpack_core::{App, Environment, Suppression};
use cpack_nag::{check_stack, NagReport};

use crate::error::StackError;
use crate::stack::ConformancePackStack;

/// The findings accepted as unavoidable for this deployment, with their
/// justifications.
///
/// The upload mechanism's auto-generated execution role necessarily
/// carries provider-managed policies and wildcard permissions, and its
/// helper function pins its own runtime; the single-bucket layout leaves
/// nowhere to deliver access logs.
pub fn accepted_suppressions() -> Vec<Suppression> {
    vec![
        Suppression::new(
            "AwsSolutions-S1",
            "Server access logs would need a second bucket to deliver to; \
             this deployment provisions exactly one bucket.",
        ),
        Suppression::new(
            "AwsSolutions-IAM4",
            "The bucket deployment provisions a default execution role that \
             attaches provider-managed policies; supplying a custom role \
             still creates the default one.",
        ),
        Suppression::new(
            "AwsSolutions-IAM5",
            "The bucket deployment's default execution role carries wildcard \
             permissions; supplying a custom role still creates the default \
             one.",
        ),
        Suppression::new(
            "AwsSolutions-L1",
            "The bucket deployment pins the runtime of its helper function; \
             the runtime version is not configurable from this stack.",
        ),
    ]
}

/// Construct the deployment unit.
///
/// With `env` omitted the deployment is environment-agnostic and the
/// synthesized template can be deployed anywhere; nothing in this stack
/// requires an environment-specific lookup.
///
/// # Errors
///
/// Returns `StackError` if the stack cannot be declared (see
/// [`ConformancePackStack::declare()`]).
pub fn build_app(
    env: Option<Environment>,
    template_dir: &Path,
) -> Result<App, StackError> {
    let mut wired = ConformancePackStack::declare(env, template_dir)?;
    wired.stack_mut().add_suppressions(accepted_suppressions());

    let mut app = App::new();
    app.add_stack(wired.into_stack());
    Ok(app)
}

/// Run the security-lint pass over every stack in the deployment unit.
pub fn lint_app(app: &App) -> Vec<(String, NagReport)> {
    app.stacks()
        .iter()
        .map(|stack| (stack.name().to_string(), check_stack(stack)))
        .collect()
}
