//! Health registry: concurrency-safe owner of the name→record map.
//!
//! # Design Decisions
//! - One reader/writer lock guards the whole map; registration and
//!   per-record mutation take the write form, snapshots the read form
//! - The lock is never held across a check callable's await; checks
//!   run outside it and only their outcomes are applied under it
//! - Registration overwrites on name collision (last writer wins)

use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::health::state::{CheckFn, DependencyRecord};

/// Thread-safe mapping from dependency name to its record.
#[derive(Default)]
pub struct HealthRegistry {
    records: RwLock<HashMap<String, DependencyRecord>>,
}

impl HealthRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the record for `name`. A replaced record is
    /// dropped wholesale; re-registration starts over from Unknown.
    pub async fn register(
        &self,
        name: impl Into<String>,
        url: impl Into<String>,
        hard: bool,
        check: Option<CheckFn>,
    ) {
        let record = DependencyRecord::new(name, url, hard, check);
        let mut records = self.records.write().await;
        records.insert(record.name.clone(), record);
    }

    /// Defensive copy of every record for read-only consumption.
    pub async fn snapshot(&self) -> Vec<DependencyRecord> {
        let records = self.records.read().await;
        records.values().cloned().collect()
    }

    /// Names and callables of every record with a check attached.
    /// Records without one are skipped; they change state only
    /// through external updates.
    pub(crate) async fn checkable(&self) -> Vec<(String, CheckFn)> {
        let records = self.records.read().await;
        records
            .values()
            .filter_map(|r| r.check.clone().map(|check| (r.name.clone(), check)))
            .collect()
    }

    /// Apply a state transition to exactly one record under the write
    /// lock. Returns None when the name is not registered; the caller
    /// decides whether that is an error.
    pub(crate) async fn mutate<R>(
        &self,
        name: &str,
        f: impl FnOnce(&mut DependencyRecord) -> R,
    ) -> Option<R> {
        let mut records = self.records.write().await;
        records.get_mut(name).map(f)
    }
}
