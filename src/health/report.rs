//! Report types and the aggregation fold.
//!
//! # Design Decisions
//! - Overall verdict is an AND over hard dependencies only; soft
//!   failures are reported but never flip it
//! - Never-observed records do not count against the verdict
//! - Verdict maps to a status code (200 / 503) for the HTTP layer;
//!   the boolean in the report body is authoritative

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::health::state::{DependencyRecord, HealthState, LastError};

/// Health status of a single dependency as served to probe callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyStatus {
    pub name: String,
    pub url: String,
    pub healthy: bool,
    #[serde(rename = "hardDependency")]
    pub hard_dependency: bool,
    #[serde(rename = "lastKnownGoodCall", default, skip_serializing_if = "Option::is_none")]
    pub last_known_good_call: Option<DateTime<Utc>>,
    #[serde(rename = "lastCall", default, skip_serializing_if = "Option::is_none")]
    pub last_call: Option<DateTime<Utc>>,
    #[serde(rename = "lastError", default, skip_serializing_if = "Option::is_none")]
    pub last_error: Option<LastError>,
}

impl From<&DependencyRecord> for DependencyStatus {
    fn from(record: &DependencyRecord) -> Self {
        Self {
            name: record.name.clone(),
            url: record.url.clone(),
            healthy: record.is_healthy(),
            hard_dependency: record.hard,
            last_known_good_call: record.last_known_good,
            last_call: record.last_call,
            last_error: record.last_error.clone(),
        }
    }
}

/// Health status of a component tracked outside the registry.
/// Pure passthrough; the core never produces these itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtherComponent {
    pub name: String,
    pub healthy: bool,
}

/// Point-in-time projection of the whole registry plus the verdict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub name: String,
    pub healthy: bool,
    pub dependencies: Vec<DependencyStatus>,
    pub others: Vec<OtherComponent>,
}

/// Fold a registry snapshot into the overall verdict and its report.
pub(crate) fn aggregate(
    service_name: &str,
    records: &[DependencyRecord],
    others: Vec<OtherComponent>,
) -> (StatusCode, Report) {
    let unhealthy = records
        .iter()
        .any(|r| r.hard && r.state == HealthState::Unhealthy);

    let report = Report {
        name: service_name.to_string(),
        healthy: !unhealthy,
        dependencies: records.iter().map(DependencyStatus::from).collect(),
        others,
    };

    let status = if report.healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, report)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::health::state::CheckError;

    fn observed(name: &str, hard: bool, healthy: bool) -> DependencyRecord {
        let mut record = DependencyRecord::new(name, format!("http://{name}"), hard, None);
        let outcome = if healthy {
            Ok(())
        } else {
            Err(CheckError::new("down"))
        };
        record.observe(outcome, Utc::now());
        record
    }

    #[test]
    fn test_hard_failure_flips_verdict() {
        let records = vec![observed("db", true, false), observed("cache", false, true)];
        let (status, report) = aggregate("svc", &records, Vec::new());

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(!report.healthy);
        let db = report.dependencies.iter().find(|d| d.name == "db").unwrap();
        let cache = report.dependencies.iter().find(|d| d.name == "cache").unwrap();
        assert!(!db.healthy);
        assert!(cache.healthy);
    }

    #[test]
    fn test_soft_failure_does_not_flip_verdict() {
        let records = vec![observed("db", true, true), observed("queue", false, false)];
        let (status, report) = aggregate("svc", &records, Vec::new());

        assert_eq!(status, StatusCode::OK);
        assert!(report.healthy);
        let queue = report.dependencies.iter().find(|d| d.name == "queue").unwrap();
        assert!(!queue.healthy);
    }

    #[test]
    fn test_unobserved_hard_dependency_does_not_flip_verdict() {
        let records = vec![
            DependencyRecord::new("db", "postgres://localhost", true, None),
            observed("cache", false, true),
        ];
        let (status, report) = aggregate("svc", &records, Vec::new());

        assert_eq!(status, StatusCode::OK);
        assert!(report.healthy);
        // The unobserved record still reports itself as not healthy.
        let db = report.dependencies.iter().find(|d| d.name == "db").unwrap();
        assert!(!db.healthy);
    }

    #[test]
    fn test_report_serialization_field_names() {
        let records = vec![observed("db", true, false)];
        let (_, report) = aggregate("svc", &records, Vec::new());

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["name"], "svc");
        assert_eq!(json["healthy"], false);
        assert!(json["others"].as_array().unwrap().is_empty());

        let dep = &json["dependencies"][0];
        assert_eq!(dep["hardDependency"], true);
        assert!(dep["lastCall"].is_string());
        assert!(dep["lastError"]["timestamp"].is_string());
        assert_eq!(dep["lastError"]["message"], "down");
        // Never observed healthy, so the marker is absent entirely.
        assert!(dep.get("lastKnownGoodCall").is_none());
    }
}
