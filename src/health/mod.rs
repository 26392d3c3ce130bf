//! Dependency health subsystem.
//!
//! # Data Flow
//! ```text
//! Active checks (active.rs):
//!     Scheduler tick (or cold read)
//!     → Run every attached callable in parallel
//!     → Reconcile outcomes into registry.rs
//!
//! Passive updates (passive.rs):
//!     Request-path caller observes an outcome
//!     → update_health
//!     → Reconcile into registry.rs
//!
//! Aggregation (report.rs):
//!     Registry snapshot
//!     → AND over hard dependencies
//!     → (status code, report) for the HTTP layer
//! ```
//!
//! # Design Decisions
//! - Active and passive paths share one reconciliation rule
//! - Soft dependencies are reported individually but never flip the
//!   overall verdict; never-observed records don't count against it
//! - The registry lock is never held across a check callable

pub mod active;
pub mod checker;
pub mod passive;
pub mod registry;
pub mod report;
pub mod state;

pub use checker::{HealthChecker, DEFAULT_BACKGROUND_CHECK_INTERVAL};
pub use registry::HealthRegistry;
pub use report::{DependencyStatus, OtherComponent, Report};
pub use state::{CheckError, CheckFn, CheckFuture, DependencyRecord, HealthError, HealthState, LastError};
