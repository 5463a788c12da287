use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::io::output::OutputFormat;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FormatArg {
    /// Colored table view
    Terminal,
    /// Machine-readable report for export tooling
    Json,
    /// Markdown report
    Markdown,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Terminal => OutputFormat::Terminal,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Markdown => OutputFormat::Markdown,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "asklytics")]
#[command(about = "Dashboard analytics and SLA urgency engine for expert Q&A marketplaces", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Aggregate dashboard metrics from question/answer exports
    Analyze {
        /// Path to the questions JSON export
        #[arg(short, long)]
        questions: PathBuf,

        /// Path to the answers JSON export
        #[arg(short, long)]
        answers: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pin the evaluation clock to an RFC 3339 instant instead of the
        /// current time (reproducible reports)
        #[arg(long)]
        now: Option<String>,
    },

    /// Live SLA countdowns for pending questions
    Watch {
        /// Path to the questions JSON export
        #[arg(short, long)]
        questions: PathBuf,

        /// Re-classification period in seconds
        #[arg(long, default_value = "60")]
        interval_secs: u64,

        /// Maximum number of questions to track
        #[arg(long, default_value = "50")]
        limit: usize,
    },

    /// Write a default .asklytics.toml to the current directory
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}
