//! Dependency Health Aggregation Library

pub mod config;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod probes;

pub use config::ServiceConfig;
pub use health::{HealthChecker, Report};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
