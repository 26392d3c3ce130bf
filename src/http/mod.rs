//! HTTP transport subsystem.
//!
//! # Data Flow
//! ```text
//! GET /healthz (or {base_path}/healthz)
//!     → server.rs (Axum router, middleware)
//!     → HealthChecker::report (inline round on the cold path)
//!     → JSON report, 200 or 503
//! ```

pub mod server;

pub use server::{AppState, HttpServer, HEALTH_CHECK_PATH};
