//! Dependency Health Aggregator Service
//!
//! Tracks the liveness of named external dependencies, checks them on
//! a background interval (or inline per probe request), and serves the
//! aggregated verdict to orchestrator liveness/readiness probes.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌───────────────────────────────────────────┐
//!                      │                HEALTHGATE                  │
//!                      │                                            │
//!   GET /healthz       │  ┌─────────┐      ┌──────────────────┐    │
//!   ───────────────────┼─▶│  http   │─────▶│ health::checker  │    │
//!                      │  │ (axum)  │      │   (aggregate)    │    │
//!   200 / 503 + JSON   │  └─────────┘      └────────┬─────────┘    │
//!   ◀──────────────────┼───────────────────────────┐│              │
//!                      │                           ▼▼              │
//!                      │  ┌──────────┐      ┌──────────────┐       │
//!   scheduler tick ────┼─▶│  active  │─────▶│   registry   │       │
//!                      │  │  checks  │      │ (name→record)│       │
//!   update_health ─────┼─▶│ passive  │─────▶│              │       │
//!                      │  └──────────┘      └──────────────┘       │
//!                      │                                            │
//!                      │  ┌────────────────────────────────────┐   │
//!                      │  │      Cross-Cutting Concerns        │   │
//!                      │  │  config │ lifecycle │ tracing      │   │
//!                      │  └────────────────────────────────────┘   │
//!                      └───────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use healthgate::config::{self, ProbeKind, ServiceConfig};
use healthgate::health::HealthChecker;
use healthgate::http::HttpServer;
use healthgate::lifecycle::{signals, Shutdown};
use healthgate::probes;

#[derive(Debug, Parser)]
#[command(name = "healthgate", about = "Dependency health aggregation service")]
struct Args {
    /// Path to the TOML configuration file; defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "healthgate=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("healthgate v0.1.0 starting");

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => config::load_config(path)?,
        None => ServiceConfig::default(),
    };

    tracing::info!(
        service = %config.service.name,
        bind_address = %config.listener.bind_address,
        background = config.health_check.background,
        interval_secs = config.health_check.interval_secs,
        dependencies = config.dependencies.len(),
        "Configuration loaded"
    );

    let checker = Arc::new(HealthChecker::new(
        &config.service.name,
        Duration::from_secs(config.health_check.interval_secs),
    ));

    for dep in &config.dependencies {
        let timeout = Duration::from_secs(dep.timeout_secs);
        let check = match dep.kind {
            ProbeKind::Http => Some(probes::http_probe(&dep.url, timeout)),
            ProbeKind::Tcp => Some(probes::tcp_probe(&dep.url, timeout)),
            ProbeKind::None => None,
        };

        if dep.hard {
            checker.add_hard_check(&dep.name, &dep.url, check).await;
        } else {
            checker.add_check(&dep.name, &dep.url, check).await;
        }
    }

    let shutdown = Shutdown::new();

    if config.health_check.background {
        checker.start_background_check(shutdown.subscribe());
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server = HttpServer::new(&config, checker);
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        signals::listen_for_signals(&shutdown).await;
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
