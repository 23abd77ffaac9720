// shipcheck CLI - headless packing-list reconciliation against a BOQ

mod check;
mod exit_codes;
mod load;
mod submit;
mod summary;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use exit_codes::EXIT_SUCCESS;

/// Error with a shell exit code attached; see `exit_codes` for the
/// registry.
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Parser)]
#[command(name = "shipcheck")]
#[command(about = "Packing-list aggregation and BOQ reconciliation (headless)")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile the aggregate view of a session against its BOQ
    #[command(after_help = "\
Examples:
  shipcheck check session.toml
  shipcheck check session.toml --json
  shipcheck check session.toml --output report.json")]
    Check {
        /// Path to the session TOML config
        session: PathBuf,

        /// Output the JSON result to stdout instead of only a summary
        #[arg(long)]
        json: bool,

        /// Write the JSON result to a file
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Show aggregate and per-document header summaries
    #[command(after_help = "\
Examples:
  shipcheck summary session.toml
  shipcheck summary session.toml --json")]
    Summary {
        /// Path to the session TOML config
        session: PathBuf,

        /// Output JSON to stdout instead of human text
        #[arg(long)]
        json: bool,
    },

    /// Validate the session config and its input files without reconciling
    Validate {
        /// Path to the session TOML config
        session: PathBuf,
    },

    /// Emit the submission payload (internal ids stripped) for the
    /// aggregate view
    #[command(after_help = "\
Examples:
  shipcheck submit-payload session.toml
  shipcheck submit-payload session.toml -o payload.json")]
    SubmitPayload {
        /// Path to the session TOML config
        session: PathBuf,

        /// Write the payload to a file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check { session, json, output } => check::cmd_check(session, json, output),
        Commands::Summary { session, json } => summary::cmd_summary(session, json),
        Commands::Validate { session } => check::cmd_validate(session),
        Commands::SubmitPayload { session, output } => {
            submit::cmd_submit_payload(session, output)
        }
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {hint}");
            }
            ExitCode::from(err.code)
        }
    }
}
