//! Health checker facade.
//!
//! Owns the registry, the background scheduler, and the passthrough
//! list of externally tracked components, and exposes the
//! registration/update/query surface consumed by the HTTP layer and
//! by service code. Constructor-injected; there is no process-wide
//! singleton.

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use tokio::sync::{broadcast, RwLock};

use crate::health::active::{run_round, Scheduler};
use crate::health::passive;
use crate::health::registry::HealthRegistry;
use crate::health::report::{aggregate, OtherComponent, Report};
use crate::health::state::{CheckError, CheckFn, HealthError};

/// Interval used when the configured one is zero.
pub const DEFAULT_BACKGROUND_CHECK_INTERVAL: Duration = Duration::from_secs(60);

/// Aggregates per-dependency health into one service-level verdict.
pub struct HealthChecker {
    service_name: String,
    registry: Arc<HealthRegistry>,
    scheduler: Scheduler,
    others: RwLock<Vec<OtherComponent>>,
}

impl HealthChecker {
    /// Create a checker for the named service. `interval` paces the
    /// background worker once started.
    pub fn new(service_name: impl Into<String>, interval: Duration) -> Self {
        let interval = if interval.is_zero() {
            DEFAULT_BACKGROUND_CHECK_INTERVAL
        } else {
            interval
        };

        let registry = Arc::new(HealthRegistry::new());
        let scheduler = Scheduler::new(registry.clone(), interval);

        Self {
            service_name: service_name.into(),
            registry,
            scheduler,
            others: RwLock::new(Vec::new()),
        }
    }

    /// Register a soft dependency: its failures are reported but never
    /// affect the overall verdict. Never runs the check itself.
    ///
    /// Pass `check = None` for a dependency managed exclusively
    /// through [`HealthChecker::update_health`].
    pub async fn add_check(
        &self,
        name: impl Into<String>,
        url: impl Into<String>,
        check: Option<CheckFn>,
    ) {
        self.registry.register(name, url, false, check).await;
    }

    /// Register a hard dependency: when unhealthy, the overall verdict
    /// is unhealthy as well.
    pub async fn add_hard_check(
        &self,
        name: impl Into<String>,
        url: impl Into<String>,
        check: Option<CheckFn>,
    ) {
        self.registry.register(name, url, true, check).await;
    }

    /// Push an out-of-band health observation for an already-registered
    /// dependency, bypassing the check executor. Safe to call from any
    /// number of concurrent request handlers.
    pub async fn update_health(
        &self,
        name: &str,
        healthy: bool,
        error: Option<CheckError>,
    ) -> Result<(), HealthError> {
        passive::push_update(&self.registry, name, healthy, error).await
    }

    /// Start the background check worker. The first round runs
    /// immediately, then once per interval until the shutdown signal
    /// fires. Starting an already-running worker is a no-op.
    pub fn start_background_check(&self, shutdown: broadcast::Receiver<()>) {
        self.scheduler.start(shutdown);
    }

    /// Replace the passthrough list of components tracked outside the
    /// registry.
    pub async fn set_others(&self, others: Vec<OtherComponent>) {
        *self.others.write().await = others;
    }

    /// Compute the overall verdict and the full report. When no
    /// background worker is active a round runs inline first, so a
    /// response is never served from an entirely unobserved registry.
    pub async fn report(&self) -> (StatusCode, Report) {
        if !self.scheduler.is_running() {
            run_round(&self.registry).await;
        }

        let snapshot = self.registry.snapshot().await;
        let others = self.others.read().await.clone();
        aggregate(&self.service_name, &snapshot, others)
    }
}
