use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use config::CliConfig;

#[derive(Parser, Debug)]
#[command(name = "stratus", version, about = "Stratus provisioning plugin CLI")]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, env = "STRATUS_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Log filter (overrides the config file; RUST_LOG wins over both)
    #[arg(long, env = "STRATUS_LOG", global = true)]
    log_level: Option<String>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the actions of the redis plugin
    Actions,

    /// Read and validate a payload without provisioning
    Check {
        /// Action name, e.g. "create" or "terminate"
        action: String,

        /// Payload file, or "-" for stdin
        #[arg(long, short, default_value = "-")]
        input: PathBuf,
    },

    /// Run an action end-to-end against a simulated provisioner
    DryRun {
        /// Action name, e.g. "create" or "terminate"
        action: String,

        /// Payload file, or "-" for stdin
        #[arg(long, short, default_value = "-")]
        input: PathBuf,

        /// Wrap the result in the result_code / result_message envelope
        #[arg(long, default_value_t = false)]
        envelope: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = CliConfig::load(cli.config.as_deref())?;
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    config.output.pretty |= cli.pretty;

    // stdout carries results only
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Actions => commands::run_actions(&config.output)?,
        Command::Check { action, input } => commands::run_check(&action, &input, &config.output)?,
        Command::DryRun {
            action,
            input,
            envelope,
        } => {
            config.output.envelope |= envelope;
            commands::run_dry_run(&action, &input, &config.output)?
        }
    }

    Ok(())
}
