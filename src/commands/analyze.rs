//! The `analyze` command: load exports, build the report, write it out.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fs::File;
use std::path::PathBuf;

use crate::config;
use crate::formatting::ColorMode;
use crate::io::input::{load_answers, load_questions};
use crate::io::output::{create_writer, OutputFormat};
use crate::metrics::build_report;

#[derive(Debug)]
pub struct AnalyzeConfig {
    pub questions: PathBuf,
    pub answers: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub now: Option<String>,
}

pub fn analyze(cmd: AnalyzeConfig) -> Result<()> {
    let app_config = config::get_config();

    let questions = load_questions(&cmd.questions)
        .with_context(|| format!("loading {}", cmd.questions.display()))?;
    let answers = match &cmd.answers {
        Some(path) => {
            load_answers(path).with_context(|| format!("loading {}", path.display()))?
        }
        None => Vec::new(),
    };

    let now = resolve_now(cmd.now.as_deref())?;
    let report = build_report(&questions, &answers, now, app_config);

    let format = cmd
        .format
        .or_else(|| configured_default_format(app_config))
        .unwrap_or(OutputFormat::Terminal);

    match cmd.output {
        Some(path) => {
            let file =
                File::create(&path).with_context(|| format!("creating {}", path.display()))?;
            // reports written to files are for export, never colored
            let mut writer = create_writer(file, format, ColorMode::plain());
            writer.write_report(&report)?;
            log::info!("report written to {}", path.display());
        }
        None => {
            let mut writer = create_writer(std::io::stdout(), format, ColorMode::from_env());
            writer.write_report(&report)?;
        }
    }

    Ok(())
}

fn resolve_now(pinned: Option<&str>) -> Result<DateTime<Utc>> {
    match pinned {
        Some(raw) => {
            let parsed = DateTime::parse_from_rfc3339(raw)
                .with_context(|| format!("invalid --now value: {raw}"))?;
            Ok(parsed.with_timezone(&Utc))
        }
        None => Ok(Utc::now()),
    }
}

fn configured_default_format(config: &config::AsklyticsConfig) -> Option<OutputFormat> {
    match config.output.default_format.as_deref() {
        Some("json") => Some(OutputFormat::Json),
        Some("markdown") => Some(OutputFormat::Markdown),
        Some("terminal") => Some(OutputFormat::Terminal),
        Some(other) => {
            log::warn!("unknown default_format {other:?} in config, using terminal");
            None
        }
        None => None,
    }
}
