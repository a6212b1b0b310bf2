use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use eqcalc_cli::config::CalcConfig;
use eqcalc_cli::repl::{run_batch, Repl};

/// Equational calculator - derive equations with the rules of equational reasoning
#[derive(Parser, Debug)]
#[command(name = "eqcalc")]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file (default: ./eqcalc_config.toml if present)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Neither load nor save the history file
    #[arg(long)]
    no_history: bool,

    #[command(subcommand)]
    command: Option<Mode>,
}

#[derive(Subcommand, Debug)]
enum Mode {
    /// Interactive session (the default)
    Repl,
    /// Run commands from FILE (or standard input) without a prompt
    Batch {
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging();

    match args.command.unwrap_or(Mode::Repl) {
        Mode::Repl => {
            let config = CalcConfig::load(args.config.as_deref());
            let mut repl = Repl::new(config);
            if args.no_history {
                repl = repl.without_history();
            }
            repl.run()?;
            Ok(ExitCode::SUCCESS)
        }
        Mode::Batch { file } => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            let failures = match file {
                Some(path) => {
                    let file = File::open(&path)
                        .with_context(|| format!("cannot open {}", path.display()))?;
                    run_batch(BufReader::new(file), &mut out)?
                }
                None => run_batch(io::stdin().lock(), &mut out)?,
            };
            tracing::debug!(failures, "batch finished");
            Ok(if failures == 0 {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}
