//! # Lint Subcommand
//!
//! Runs the security-best-practices pass over the declared deployment and
//! prints the report. Exits nonzero when any finding lacks a matching
//! suppression entry.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Args;
use cpack_stack::{build_app, lint_app};

/// Arguments for the lint subcommand.
#[derive(Args, Debug)]
pub struct LintArgs {
    /// Folder holding the conformance-pack template document.
    #[arg(long, default_value = cpack_stack::TEMPLATE_FOLDER)]
    pub template_dir: PathBuf,
}

/// Run the lint pass and report findings.
pub fn run(args: &LintArgs) -> anyhow::Result<()> {
    let app = build_app(None, &args.template_dir)
        .context("failed to declare the deployment")?;

    let mut unsuppressed = 0usize;
    for (stack, report) in lint_app(&app) {
        println!("stack {stack}:");
        print!("{report}");
        unsuppressed += report.unsuppressed().len();
    }

    if unsuppressed > 0 {
        bail!("lint pass found {unsuppressed} unsuppressed finding(s)");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_lint_clean_on_declared_deployment() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(cpack_stack::TEMPLATE_FILENAME),
            "Resources:\n  SampleRule:\n    Type: AWS::Config::ConfigRule\n",
        )
        .unwrap();
        let args = LintArgs {
            template_dir: dir.path().to_path_buf(),
        };
        run(&args).unwrap();
    }

    #[test]
    fn test_lint_fails_on_missing_template() {
        let dir = tempfile::tempdir().unwrap();
        let args = LintArgs {
            template_dir: dir.path().join("nope"),
        };
        assert!(run(&args).is_err());
    }
}
