//! `mathcraft` command line: score and submit worksheets, open the class dashboard.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "mathcraft",
    version,
    about = "Algebra notation worksheet grading and class dashboard"
)]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter config and a blank responses file
    Init,

    /// Score a responses file without submitting it
    Score {
        /// Path to a responses .toml file
        #[arg(long)]
        responses: PathBuf,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Score and append responses to the submission log
    Submit {
        /// Path to a responses .toml file or a directory of them
        #[arg(long)]
        responses: PathBuf,

        /// Submission log (defaults to log_path from config)
        #[arg(long)]
        log: Option<PathBuf>,
    },

    /// Check a responses file against the worksheet
    Validate {
        /// Path to a responses .toml file or a directory of them
        #[arg(long)]
        responses: PathBuf,
    },

    /// Show the class dashboard (requires the teacher access code)
    Dashboard {
        /// Teacher access code
        #[arg(long)]
        access_code: String,

        /// Submission log (defaults to log_path from config)
        #[arg(long)]
        log: Option<PathBuf>,

        /// Output format: text, json, markdown, html
        #[arg(long, default_value = "text")]
        format: String,

        /// Write to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Export all submissions as CSV (requires the teacher access code)
    Export {
        /// Teacher access code
        #[arg(long)]
        access_code: String,

        /// Submission log (defaults to log_path from config)
        #[arg(long)]
        log: Option<PathBuf>,

        /// CSV output path
        #[arg(long)]
        output: PathBuf,
    },

    /// Append submissions from an exported CSV (requires the teacher access code)
    Import {
        /// Teacher access code
        #[arg(long)]
        access_code: String,

        /// Submission log (defaults to log_path from config)
        #[arg(long)]
        log: Option<PathBuf>,

        /// CSV file written by `mathcraft export`
        #[arg(long)]
        csv: PathBuf,
    },

    /// Print pizza slicing geometry for a number of slices
    Pizza {
        /// Number of slices
        #[arg(long, default_value = "8")]
        slices: u32,

        /// Output format: json, svg
        #[arg(long, default_value = "json")]
        format: String,

        /// Write to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mathcraft=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config;

    let result = match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Score { responses, format } => {
            commands::score::execute(responses, format, config)
        }
        Commands::Submit { responses, log } => commands::submit::execute(responses, log, config),
        Commands::Validate { responses } => commands::validate::execute(responses),
        Commands::Dashboard {
            access_code,
            log,
            format,
            output,
        } => commands::dashboard::execute(access_code, log, format, output, config),
        Commands::Export {
            access_code,
            log,
            output,
        } => commands::export::execute(access_code, log, output, config),
        Commands::Import {
            access_code,
            log,
            csv,
        } => commands::import::execute(access_code, log, csv, config),
        Commands::Pizza {
            slices,
            format,
            output,
        } => commands::pizza::execute(slices, format, output),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
