//! # cpack CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

/// Conformance-pack stack toolchain.
///
/// Synthesizes the sustainability conformance-pack deployment into
/// templates for the external deployment engine and runs the
/// security-lint pass over the declared graph.
#[derive(Parser, Debug)]
#[command(name = "cpack", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Synthesize the deployment templates into an output directory.
    Synth(cpack_cli::synth::SynthArgs),
    /// Run the security-lint pass and report findings.
    Lint(cpack_cli::lint::LintArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Synth(args) => cpack_cli::synth::run(&args),
        Commands::Lint(args) => cpack_cli::lint::run(&args),
    }
}
