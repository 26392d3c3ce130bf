//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (intervals and timeouts > 0)
//! - Detect conflicting dependency declarations
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::{ProbeKind, ServiceConfig};

/// A single semantic problem found in a configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a valid socket address")]
    InvalidBindAddress(String),

    #[error("health_check.interval_secs must be greater than zero")]
    ZeroInterval,

    #[error("service.base_path {0:?} must start with '/'")]
    InvalidBasePath(String),

    #[error("a dependency is missing a name")]
    MissingDependencyName,

    #[error("dependency {0:?} is declared more than once")]
    DuplicateDependency(String),

    #[error("dependency {0:?} has timeout_secs = 0")]
    ZeroProbeTimeout(String),
}

/// Check a parsed configuration for semantic problems.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.health_check.interval_secs == 0 {
        errors.push(ValidationError::ZeroInterval);
    }

    if !config.service.base_path.is_empty() && !config.service.base_path.starts_with('/') {
        errors.push(ValidationError::InvalidBasePath(
            config.service.base_path.clone(),
        ));
    }

    let mut seen = HashSet::new();
    for dep in &config.dependencies {
        if dep.name.is_empty() {
            errors.push(ValidationError::MissingDependencyName);
            continue;
        }
        if !seen.insert(dep.name.as_str()) {
            errors.push(ValidationError::DuplicateDependency(dep.name.clone()));
        }
        if dep.kind != ProbeKind::None && dep.timeout_secs == 0 {
            errors.push(ValidationError::ZeroProbeTimeout(dep.name.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
