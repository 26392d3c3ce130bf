//! Passive health updates (external update gateway).
//!
//! # Responsibilities
//! - Accept out-of-band health observations from request-path callers
//! - Reject updates for names that were never registered
//!
//! # Design Decisions
//! - Bypasses the check executor entirely; intended for dependencies
//!   whose health is inferred from live traffic outcomes
//! - Applies the same reconciliation rule as an active check outcome
//! - A success observation discards any caller-supplied error detail

use chrono::Utc;

use crate::health::registry::HealthRegistry;
use crate::health::state::{CheckError, HealthError};

/// Push one observation for an already-registered dependency.
///
/// Called from arbitrary concurrent contexts; the write lock is held
/// only for the field updates themselves.
pub(crate) async fn push_update(
    registry: &HealthRegistry,
    name: &str,
    healthy: bool,
    error: Option<CheckError>,
) -> Result<(), HealthError> {
    let outcome = if healthy {
        Ok(())
    } else {
        Err(error.unwrap_or_else(|| CheckError::new("reported unhealthy")))
    };

    registry
        .mutate(name, |record| record.observe(outcome, Utc::now()))
        .await
        .ok_or_else(|| {
            tracing::warn!(dependency = %name, "health update for unregistered dependency");
            HealthError::UnknownDependency(name.to_string())
        })
}
