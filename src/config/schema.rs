//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! service. All types derive Serde traits for deserialization from
//! config files, and every field has a default so minimal configs
//! load.

use serde::{Deserialize, Serialize};

/// Root configuration for the health aggregator service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Service identity reported at the top of the health report.
    pub service: ServiceInfo,

    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Background health check settings.
    pub health_check: HealthCheckConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Dependencies registered at startup.
    pub dependencies: Vec<DependencyConfig>,
}

/// Service identity.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServiceInfo {
    /// Service name echoed in the report.
    pub name: String,

    /// Optional base path; the health route is additionally exposed
    /// under `{base_path}/healthz`. Empty disables the second route.
    pub base_path: String,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            name: "healthgate".to_string(),
            base_path: String::new(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Background health check configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HealthCheckConfig {
    /// Run checks on a background interval instead of once per
    /// endpoint request.
    pub background: bool,

    /// Interval between background check rounds in seconds.
    pub interval_secs: u64,
}

impl Default for HealthCheckConfig {
    fn default() -> Self {
        Self {
            background: true,
            interval_secs: 60,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout for the health endpoint in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// One dependency registered at startup.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DependencyConfig {
    /// Unique dependency name.
    pub name: String,

    /// Address probed (for http/tcp kinds) and echoed in the report.
    pub url: String,

    /// Probe transport.
    pub kind: ProbeKind,

    /// Hard dependencies flip the overall verdict when unhealthy.
    #[serde(default)]
    pub hard: bool,

    /// Probe timeout in seconds.
    #[serde(default = "default_probe_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_probe_timeout_secs() -> u64 {
    10
}

/// Probe transport for a configured dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeKind {
    /// HTTP GET, healthy on 2xx.
    Http,
    /// TCP connect.
    Tcp,
    /// No attached probe; health arrives via external updates only.
    None,
}
