//! CLI binary for elfexec.
//!
//! A thin shim over the library crate that maps CLI flags to `RunConfig`,
//! prints one diagnostic line per failure and picks the exit code.

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use elfexec::{run_file, ElfExecError, ExitPolicy, RunConfig};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"EXAMPLES:
  # Run a binary through the base64 round trip
  elfexec ./hello

  # Keep the artifact out of the shared temp directory
  elfexec --temp-dir ~/.cache/elfexec ./hello

  # Exit with the child's status instead of 0
  elfexec --propagate-exit ./hello

  # A path that starts with '-' goes after '--'
  elfexec -- -x

EXIT STATUS:
  0    child ran (its failures are printed, not propagated)
  1    usage error, missing input, or the artifact could not be produced
  With --propagate-exit a failed child sets the exit status instead:
  its own code, 128+N for signal N, 127 if it could not be found, 126 if
  it could not be started.
"#;

/// Materialise an executable from its base64 form and run it.
#[derive(Parser, Debug)]
#[command(
    name = "elfexec",
    version,
    about = "Materialise an executable from its base64 form and run it",
    long_about = "Reads the file, base64-encodes and decodes it, writes the result to a fresh \
temporary file with mode 0755, runs it with no arguments and removes the temporary file \
afterwards, whatever happened.",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Path to the executable. Exactly one is required.
    #[arg(value_name = "PATH_TO_ELF_FILE")]
    paths: Vec<PathBuf>,

    /// Create the temporary file in this directory.
    #[arg(long, value_name = "DIR")]
    temp_dir: Option<PathBuf>,

    /// Exit with the child's status instead of 0.
    #[arg(long)]
    propagate_exit: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all logs except errors.
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let program = std::env::args_os()
        .next()
        .map(|arg| arg.to_string_lossy().into_owned())
        .unwrap_or_else(|| "elfexec".to_string());

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(_) => return usage(program),
    };

    let [input] = cli.paths.as_slice() else {
        return usage(program);
    };

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(io::stderr)
        .init();

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            println!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    // ── Run ──────────────────────────────────────────────────────────────
    match run_file(input, &config) {
        Ok(report) => {
            if let Some(err) = report.outcome.error() {
                println!("{err}");
            }
            ExitCode::from(report.exit_code(config.exit_policy))
        }
        Err(e) => {
            println!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn usage(program: String) -> ExitCode {
    println!("{}", ElfExecError::Usage { program });
    ExitCode::FAILURE
}

/// Map CLI args to `RunConfig`.
fn build_config(cli: &Cli) -> Result<RunConfig> {
    let mut builder = RunConfig::builder().exit_policy(if cli.propagate_exit {
        ExitPolicy::Propagate
    } else {
        ExitPolicy::Report
    });

    if let Some(ref dir) = cli.temp_dir {
        if !dir.is_dir() {
            anyhow::bail!("temp directory '{}' does not exist", dir.display());
        }
        builder = builder.temp_dir(dir);
    }

    builder.build().context("Invalid configuration")
}
