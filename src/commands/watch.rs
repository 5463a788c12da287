//! The `watch` command: live SLA countdowns for pending questions.
//!
//! One countdown task per tracked question; dropping the handles on
//! shutdown aborts every timer.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;
use std::time::Duration;

use crate::config;
use crate::core::normalize::{normalize_questions, EpochSeconds};
use crate::formatting::{format_duration_hours, ColorMode};
use crate::io::input::load_questions;
use crate::metrics::is_pending;
use crate::urgency::watch::{CountdownState, CountdownWatch};
use crate::urgency::{resolve_sla_hours, UrgencyTier};

#[derive(Debug)]
pub struct WatchConfig {
    pub questions: PathBuf,
    pub interval_secs: u64,
    pub limit: usize,
}

#[derive(Debug, Clone, Copy)]
struct TrackedQuestion {
    id: i64,
    created_at: EpochSeconds,
    sla_hours: f64,
}

pub fn watch(cmd: WatchConfig) -> Result<()> {
    let app_config = config::get_config();

    let raw = load_questions(&cmd.questions)
        .with_context(|| format!("loading {}", cmd.questions.display()))?;
    let questions = normalize_questions(&raw);

    let tracked: Vec<TrackedQuestion> = questions
        .iter()
        .filter(|q| is_pending(q, &app_config.pending_exclusion_tags))
        .filter_map(|q| {
            let created_at = q.created_at?;
            let sla_hours =
                resolve_sla_hours(q.sla_hours_snapshot, app_config.fallback_sla_hours)?;
            Some(TrackedQuestion {
                id: q.id,
                created_at,
                sla_hours,
            })
        })
        .take(cmd.limit)
        .collect();

    if tracked.is_empty() {
        println!("No pending questions with a tracked SLA.");
        return Ok(());
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run_watches(
        &tracked,
        app_config,
        Duration::from_secs(cmd.interval_secs.max(1)),
    ))
}

async fn run_watches(
    tracked: &[TrackedQuestion],
    app_config: &config::AsklyticsConfig,
    period: Duration,
) -> Result<()> {
    let use_color = ColorMode::from_env().should_use_color();
    let mut watches = Vec::with_capacity(tracked.len());

    for question in tracked {
        let countdown = CountdownWatch::spawn(
            question.created_at,
            question.sla_hours,
            app_config.urgency.clone(),
            period,
        );
        let state = countdown.current();
        println!("#{} {}", question.id, render_state(&state, use_color));

        let id = question.id;
        let mut rx = countdown.subscribe();
        tokio::spawn(async move {
            let mut last_tier = rx.borrow().tier;
            while rx.changed().await.is_ok() {
                let state = *rx.borrow();
                if state.tier != last_tier {
                    println!("#{} {}", id, render_state(&state, use_color));
                    last_tier = state.tier;
                }
            }
        });

        watches.push(countdown);
    }

    println!("Tracking {} questions (ctrl-c to stop)", watches.len());
    tokio::signal::ctrl_c().await?;
    // dropping the watches aborts every countdown task
    Ok(())
}

fn render_state(state: &CountdownState, use_color: bool) -> String {
    let remaining = if state.remaining_seconds > 0.0 {
        format!(
            "{} remaining",
            format_duration_hours(state.remaining_seconds / 3600.0)
        )
    } else {
        format!(
            "over by {}",
            format_duration_hours(-state.remaining_seconds / 3600.0)
        )
    };

    let label = state.tier.label();
    let label = if !use_color {
        label.to_string()
    } else {
        match state.tier {
            UrgencyTier::Overdue => label.red().bold().to_string(),
            UrgencyTier::Urgent => label.red().to_string(),
            UrgencyTier::Normal => label.yellow().to_string(),
            UrgencyTier::Comfortable => label.green().to_string(),
        }
    };

    format!("[{label}] {remaining}")
}
