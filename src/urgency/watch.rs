//! Cancelable live countdown for a single question.
//!
//! The classifier itself is pure; this module owns the recurring part:
//! a tokio task re-evaluates the tier on a fixed period and publishes the
//! result through a watch channel. Dropping the handle aborts the task, so
//! no timer outlives the display element that owns it.

use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::core::normalize::EpochSeconds;
use crate::urgency::{classify_urgency, remaining_seconds, UrgencyConfig, UrgencyTier};

/// Default re-classification period
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_secs(60);

/// One published countdown observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CountdownState {
    pub tier: UrgencyTier,
    pub remaining_seconds: f64,
}

/// Evaluate the countdown state at a given instant
pub fn countdown_state(
    created_at: EpochSeconds,
    sla_hours: f64,
    now: EpochSeconds,
    config: &UrgencyConfig,
) -> CountdownState {
    CountdownState {
        tier: classify_urgency(created_at, sla_hours, now, config),
        remaining_seconds: remaining_seconds(created_at, sla_hours, now),
    }
}

/// Handle to a running countdown task. The task stops when the handle is
/// dropped or [`CountdownWatch::stop`] is called.
#[derive(Debug)]
pub struct CountdownWatch {
    rx: watch::Receiver<CountdownState>,
    handle: JoinHandle<()>,
}

impl CountdownWatch {
    /// Spawn a countdown task on the current tokio runtime.
    pub fn spawn(
        created_at: EpochSeconds,
        sla_hours: f64,
        config: UrgencyConfig,
        period: Duration,
    ) -> Self {
        let initial = countdown_state(created_at, sla_hours, EpochSeconds::now(), &config);
        let (tx, rx) = watch::channel(initial);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // the first tick resolves immediately and would republish the
            // initial state
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let state = countdown_state(created_at, sla_hours, EpochSeconds::now(), &config);
                log::debug!(
                    "countdown tick: tier={} remaining={:.0}s",
                    state.tier.label(),
                    state.remaining_seconds
                );
                if tx.send(state).is_err() {
                    break;
                }
            }
        });

        Self { rx, handle }
    }

    /// Spawn with the default one-minute period.
    pub fn spawn_default(created_at: EpochSeconds, sla_hours: f64, config: UrgencyConfig) -> Self {
        Self::spawn(created_at, sla_hours, config, DEFAULT_TICK_PERIOD)
    }

    /// Most recently published state.
    pub fn current(&self) -> CountdownState {
        *self.rx.borrow()
    }

    /// Subscribe to state updates.
    pub fn subscribe(&self) -> watch::Receiver<CountdownState> {
        self.rx.clone()
    }

    /// Stop the countdown task. Idempotent; also happens on drop.
    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for CountdownWatch {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
