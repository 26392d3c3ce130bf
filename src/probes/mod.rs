//! Reusable check callables for common transports.
//!
//! # Responsibilities
//! - Provide ready-made probes for dependencies reachable over HTTP
//!   or raw TCP
//! - Bound each probe's execution with its own deadline; the check
//!   executor imposes none
//!
//! # Design Decisions
//! - Any 2xx response counts as healthy for the HTTP probe
//! - Failure messages name the target so the report is actionable

use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpStream;
use tokio::time;

use crate::health::{CheckError, CheckFn};

/// Probe an HTTP endpoint with GET; healthy on any 2xx status.
pub fn http_probe(url: impl Into<String>, timeout: Duration) -> CheckFn {
    let url = url.into();
    let client = reqwest::Client::new();

    Arc::new(move || {
        let url = url.clone();
        let client = client.clone();

        Box::pin(async move {
            let response = client
                .get(&url)
                .timeout(timeout)
                .send()
                .await
                .map_err(|err| CheckError::new(format!("GET {url} failed: {err}")))?;

            let status = response.status();
            if !status.is_success() {
                return Err(CheckError::new(format!(
                    "GET {url} returned unexpected status {status}"
                )));
            }

            Ok(())
        })
    })
}

/// Probe a TCP endpoint by opening and dropping a connection.
pub fn tcp_probe(addr: impl Into<String>, timeout: Duration) -> CheckFn {
    let addr = addr.into();

    Arc::new(move || {
        let addr = addr.clone();

        Box::pin(async move {
            match time::timeout(timeout, TcpStream::connect(&addr)).await {
                Ok(Ok(_stream)) => Ok(()),
                Ok(Err(err)) => Err(CheckError::new(format!("connect {addr} failed: {err}"))),
                Err(_) => Err(CheckError::new(format!(
                    "connect {addr} timed out after {}s",
                    timeout.as_secs()
                ))),
            }
        })
    })
}
