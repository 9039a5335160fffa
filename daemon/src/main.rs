//! `ballot` — replay a delegated-voting election script and report the result.

use anyhow::Context;
use ballot_daemon::{replay, DaemonConfig, Script};
use ballot_utils::LogFormat;
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "ballot", about = "Delegated-voting election runner")]
struct Cli {
    /// Path to a TOML configuration file. File settings are the base;
    /// CLI flags and env vars override them.
    #[arg(long, env = "BALLOT_CONFIG")]
    config: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "BALLOT_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "BALLOT_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Stop at the first rejected action and exit non-zero.
    /// `--strict=false` turns off a `strict = true` from the config file.
    #[arg(long, env = "BALLOT_STRICT", num_args = 0..=1, default_missing_value = "true")]
    strict: Option<bool>,

    /// Print the report as JSON.
    #[arg(long, env = "BALLOT_JSON", num_args = 0..=1, default_missing_value = "true")]
    json: Option<bool>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Replay a script and print tallies and winners.
    Run {
        /// Election script (TOML).
        script: PathBuf,
    },
    /// Parse and validate a script without replaying it.
    Check {
        /// Election script (TOML).
        script: PathBuf,
    },
}

fn load_config(cli: &Cli) -> anyhow::Result<DaemonConfig> {
    let base = match &cli.config {
        Some(path) => DaemonConfig::from_toml_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => DaemonConfig::default(),
    };
    Ok(base.with_overrides(cli.log_level.clone(), cli.log_format, cli.strict, cli.json))
}

fn load_script(path: &Path) -> anyhow::Result<Script> {
    Script::from_toml_file(path).with_context(|| format!("reading script {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    ballot_utils::init_logging(config.log_format, &config.log_level);

    match &cli.command {
        Command::Run { script } => {
            let parsed = load_script(script)?;
            let (_, report) = replay(&parsed, config.strict)
                .with_context(|| format!("replaying {}", script.display()))?;
            if config.json_output {
                println!("{}", report.to_json()?);
            } else {
                print!("{report}");
            }
        }
        Command::Check { script } => {
            let parsed = load_script(script)?;
            parsed
                .validate()
                .with_context(|| format!("validating {}", script.display()))?;
            tracing::info!(
                proposals = parsed.proposals.len(),
                actions = parsed.actions.len(),
                "script is valid"
            );
            println!(
                "ok: {} proposals, {} actions",
                parsed.proposals.len(),
                parsed.actions.len()
            );
        }
    }

    Ok(())
}
