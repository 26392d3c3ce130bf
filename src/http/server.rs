//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with the health handler
//! - Wire up middleware (tracing, request timeout)
//! - Serve with graceful shutdown on the broadcast signal

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ServiceConfig;
use crate::health::HealthChecker;

/// Default probe path, also exposed under the configured base path.
pub const HEALTH_CHECK_PATH: &str = "/healthz";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub checker: Arc<HealthChecker>,
}

/// HTTP server exposing the aggregated health report.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server serving the given checker.
    pub fn new(config: &ServiceConfig, checker: Arc<HealthChecker>) -> Self {
        let state = AppState { checker };
        let router = Self::build_router(config, state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        // Route to http://example.com/healthz
        let mut router = Router::new().route(HEALTH_CHECK_PATH, get(health_handler));

        // Route to http://example.com/basepath/healthz
        let base_path = config.service.base_path.trim_end_matches('/');
        if !base_path.is_empty() {
            router = router.route(&format!("{base_path}{HEALTH_CHECK_PATH}"), get(health_handler));
        }

        router
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Serve the aggregated health report.
async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let (status, report) = state.checker.report().await;
    (status, Json(report))
}
