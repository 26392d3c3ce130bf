//! Dependency record and health state types.
//!
//! # States
//! - Unknown: registered but never observed
//! - Healthy: last check or update reported healthy
//! - Unhealthy: last check or update reported unhealthy
//!
//! # Design Decisions
//! - Unknown reports `healthy=false` for the dependency itself but is
//!   excluded from the overall verdict until the first observation
//! - A successful observation clears any recorded error
//! - Re-registering a name replaces the record wholesale

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Health state of a single dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthState {
    /// Registered but not yet observed.
    Unknown,
    /// Last observation succeeded.
    Healthy,
    /// Last observation failed.
    Unhealthy,
}

/// Failure detail produced by a check callable or supplied by an
/// external updater.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct CheckError {
    pub message: String,
    /// Explicit failure time; the observation time is used when absent.
    pub timestamp: Option<DateTime<Utc>>,
}

impl CheckError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timestamp: None,
        }
    }

    pub fn at(message: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            message: message.into(),
            timestamp: Some(timestamp),
        }
    }
}

/// Most recent failure recorded on a dependency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LastError {
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

/// Future returned by a check callable.
pub type CheckFuture = Pin<Box<dyn Future<Output = Result<(), CheckError>> + Send>>;

/// Zero-argument async check callable. Each callable bounds its own
/// execution time; the executor imposes no timeout of its own.
pub type CheckFn = Arc<dyn Fn() -> CheckFuture + Send + Sync>;

/// Errors surfaced to callers of the health API.
#[derive(Debug, Error)]
pub enum HealthError {
    /// An update was pushed for a name that was never registered.
    #[error("dependency {0:?} is not registered")]
    UnknownDependency(String),
}

/// Tracked state for one registered dependency.
#[derive(Clone)]
pub struct DependencyRecord {
    /// Unique name, immutable after registration.
    pub name: String,
    /// Descriptive address, display-only.
    pub url: String,
    /// Hard dependencies flip the overall verdict when unhealthy.
    pub hard: bool,
    pub state: HealthState,
    /// Most recent check/update attempt.
    pub last_call: Option<DateTime<Utc>>,
    /// Most recent attempt that reported healthy.
    pub last_known_good: Option<DateTime<Utc>>,
    /// Most recent failure; cleared by a subsequent success.
    pub last_error: Option<LastError>,
    /// Optional check callable; a record without one is managed
    /// exclusively through external updates.
    pub(crate) check: Option<CheckFn>,
}

impl DependencyRecord {
    pub(crate) fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        hard: bool,
        check: Option<CheckFn>,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            hard,
            state: HealthState::Unknown,
            last_call: None,
            last_known_good: None,
            last_error: None,
            check,
        }
    }

    /// True only for an observed healthy dependency.
    pub fn is_healthy(&self) -> bool {
        self.state == HealthState::Healthy
    }

    /// Apply one observation. Success advances the known-good marker
    /// and wipes any recorded error; failure leaves the marker where
    /// it was.
    pub(crate) fn observe(&mut self, outcome: Result<(), CheckError>, now: DateTime<Utc>) {
        self.last_call = Some(now);

        match outcome {
            Ok(()) => {
                self.state = HealthState::Healthy;
                self.last_known_good = Some(now);
                self.last_error = None;
            }
            Err(err) => {
                self.state = HealthState::Unhealthy;
                self.last_error = Some(LastError {
                    timestamp: err.timestamp.unwrap_or(now),
                    message: err.message,
                });
            }
        }
    }
}

impl fmt::Debug for DependencyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependencyRecord")
            .field("name", &self.name)
            .field("url", &self.url)
            .field("hard", &self.hard)
            .field("state", &self.state)
            .field("last_call", &self.last_call)
            .field("last_known_good", &self.last_known_good)
            .field("last_error", &self.last_error)
            .field("check", &self.check.as_ref().map(|_| "CheckFn"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_is_unobserved() {
        let record = DependencyRecord::new("db", "postgres://localhost", true, None);
        assert_eq!(record.state, HealthState::Unknown);
        assert!(!record.is_healthy());
        assert!(record.last_call.is_none());
        assert!(record.last_known_good.is_none());
        assert!(record.last_error.is_none());
    }

    #[test]
    fn test_success_sets_known_good_and_clears_error() {
        let mut record = DependencyRecord::new("db", "postgres://localhost", true, None);

        let failed_at = Utc::now();
        record.observe(Err(CheckError::new("connection refused")), failed_at);
        assert_eq!(record.state, HealthState::Unhealthy);
        assert!(record.last_error.is_some());
        assert!(record.last_known_good.is_none());

        let recovered_at = Utc::now();
        record.observe(Ok(()), recovered_at);
        assert!(record.is_healthy());
        assert!(record.last_error.is_none());
        assert_eq!(record.last_call, Some(recovered_at));
        assert_eq!(record.last_known_good, record.last_call);
    }

    #[test]
    fn test_failure_preserves_known_good() {
        let mut record = DependencyRecord::new("cache", "redis://localhost", false, None);

        let good_at = Utc::now();
        record.observe(Ok(()), good_at);

        let failed_at = Utc::now();
        record.observe(Err(CheckError::new("timeout")), failed_at);

        assert_eq!(record.state, HealthState::Unhealthy);
        assert_eq!(record.last_known_good, Some(good_at));
        assert_eq!(record.last_call, Some(failed_at));
        let err = record.last_error.as_ref().unwrap();
        assert_eq!(err.message, "timeout");
        assert_eq!(err.timestamp, failed_at);
    }

    #[test]
    fn test_explicit_error_timestamp_wins() {
        let mut record = DependencyRecord::new("queue", "amqp://localhost", false, None);

        let reported_at = Utc::now();
        let observed_at = Utc::now();
        record.observe(Err(CheckError::at("smtp timeout", reported_at)), observed_at);

        let err = record.last_error.as_ref().unwrap();
        assert_eq!(err.timestamp, reported_at);
        assert_eq!(record.last_call, Some(observed_at));
    }
}
