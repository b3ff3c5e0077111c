//! # Synth Subcommand
//!
//! Builds the deployment unit, gates it on the lint pass, and writes the
//! synthesized artifacts: one JSON and one YAML template per stack plus a
//! manifest with template digests and the engine-facing deployment order.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Args;
use cpack_core::Environment;
use cpack_stack::{build_app, lint_app};
use serde_json::json;

/// Arguments for the synth subcommand.
#[derive(Args, Debug)]
pub struct SynthArgs {
    /// Folder holding the conformance-pack template document.
    #[arg(long, default_value = cpack_stack::TEMPLATE_FOLDER)]
    pub template_dir: PathBuf,

    /// Directory the synthesized artifacts are written to.
    #[arg(long, default_value = "cpack.out")]
    pub out: PathBuf,

    /// Target account. Without it the deployment is environment-agnostic.
    #[arg(long, requires = "region")]
    pub account: Option<String>,

    /// Target region.
    #[arg(long, requires = "account")]
    pub region: Option<String>,
}

impl SynthArgs {
    fn environment(&self) -> Option<Environment> {
        match (&self.account, &self.region) {
            (Some(account), Some(region)) => Some(Environment::new(account, region)),
            _ => None,
        }
    }
}

/// Synthesize the deployment into the output directory.
pub fn run(args: &SynthArgs) -> anyhow::Result<()> {
    let app = build_app(args.environment(), &args.template_dir)
        .context("failed to declare the deployment")?;

    for (stack, report) in lint_app(&app) {
        if !report.is_clean() {
            eprint!("{report}");
            bail!(
                "lint pass found {} unsuppressed finding(s) in stack {stack}",
                report.unsuppressed().len()
            );
        }
    }

    fs::create_dir_all(&args.out)
        .with_context(|| format!("failed to create output directory {}", args.out.display()))?;

    let mut manifest_stacks = Vec::new();
    for stack in app.stacks() {
        let template = stack.synthesize()?;

        let json_path = args.out.join(format!("{}.template.json", stack.name()));
        fs::write(&json_path, template.to_json()?)
            .with_context(|| format!("failed to write {}", json_path.display()))?;

        let yaml_path = args.out.join(format!("{}.template.yaml", stack.name()));
        fs::write(&yaml_path, template.to_yaml()?)
            .with_context(|| format!("failed to write {}", yaml_path.display()))?;

        let order: Vec<String> = stack
            .deployment_order()?
            .iter()
            .map(|id| id.as_str().to_string())
            .collect();
        manifest_stacks.push(json!({
            "name": stack.name(),
            "environment": stack.env(),
            "templateDigest": template.digest()?.to_string(),
            "deploymentOrder": order,
            "suppressions": stack.suppressions().len(),
        }));

        tracing::info!(
            stack = stack.name(),
            out = %args.out.display(),
            "synthesized stack"
        );
    }

    let manifest = json!({ "stacks": manifest_stacks });
    let manifest_path = args.out.join("manifest.json");
    fs::write(&manifest_path, serde_json::to_string_pretty(&manifest)?)
        .with_context(|| format!("failed to write {}", manifest_path.display()))?;

    println!("synthesized {} stack(s) to {}", app.stacks().len(), args.out.display());
    Ok(())
}
