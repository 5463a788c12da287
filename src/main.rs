use anyhow::Result;
use clap::Parser;

use asklytics::cli::{Cli, Commands};
use asklytics::commands;
use asklytics::io::output::OutputFormat;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            questions,
            answers,
            format,
            output,
            now,
        } => commands::analyze::analyze(commands::analyze::AnalyzeConfig {
            questions,
            answers,
            format: format.map(OutputFormat::from),
            output,
            now,
        }),
        Commands::Watch {
            questions,
            interval_secs,
            limit,
        } => commands::watch::watch(commands::watch::WatchConfig {
            questions,
            interval_secs,
            limit,
        }),
        Commands::Init { force } => commands::init::init_config(force),
    }
}
