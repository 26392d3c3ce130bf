//! Active health checking.
//!
//! # Responsibilities
//! - Run every attached check callable once per round, in parallel
//! - Reconcile outcomes into the registry under its lock
//! - Drive rounds on a fixed interval until cancelled

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures::future::join_all;
use tokio::sync::broadcast;
use tokio::time;

use crate::health::registry::HealthRegistry;
use crate::health::state::CheckError;

/// Run one full check round. Every record with a callable is checked
/// exactly once, concurrently; the round returns only after every
/// outcome has been applied, so the caller observes a complete pass.
pub(crate) async fn run_round(registry: &HealthRegistry) {
    let checks = registry.checkable().await;
    if checks.is_empty() {
        return;
    }

    // Callables run as independent tasks outside the registry lock so
    // a slow dependency never serializes the others behind it.
    let mut names = Vec::with_capacity(checks.len());
    let mut tasks = Vec::with_capacity(checks.len());
    for (name, check) in checks {
        names.push(name);
        tasks.push(tokio::spawn(check()));
    }

    for (name, joined) in names.into_iter().zip(join_all(tasks).await) {
        let outcome = match joined {
            Ok(outcome) => outcome,
            // A panicking callable counts as that dependency's own
            // failure; it never aborts the round.
            Err(err) => Err(CheckError::new(format!("check aborted: {err}"))),
        };

        if let Err(err) = &outcome {
            tracing::warn!(dependency = %name, error = %err, "health check failed");
        }

        registry.mutate(&name, |r| r.observe(outcome, Utc::now())).await;
    }
}

/// Periodic driver for check rounds.
///
/// Holds the shared running flag so the read path can tell whether it
/// must run a round inline before answering.
pub(crate) struct Scheduler {
    registry: Arc<HealthRegistry>,
    interval: Duration,
    running: Arc<AtomicBool>,
}

impl Scheduler {
    pub(crate) fn new(registry: Arc<HealthRegistry>, interval: Duration) -> Self {
        Self {
            registry,
            interval,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    pub(crate) fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Start the periodic driver. Starting a running scheduler is a
    /// no-op; after cancellation a later start succeeds again.
    pub(crate) fn start(&self, mut shutdown: broadcast::Receiver<()>) {
        if self
            .running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::debug!("background health check worker already running");
            return;
        }

        let registry = self.registry.clone();
        let running = self.running.clone();
        let interval = self.interval;

        tokio::spawn(async move {
            tracing::info!(
                interval_secs = interval.as_secs(),
                "Background health check worker starting"
            );

            // The first tick completes immediately, so a freshly
            // started service reports observed state without waiting
            // out a full interval.
            let mut ticker = time::interval(interval);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        run_round(&registry).await;
                    }
                    _ = shutdown.recv() => {
                        break;
                    }
                }
            }

            running.store(false, Ordering::SeqCst);
            tracing::info!("Background health check worker stopped");
        });
    }
}
