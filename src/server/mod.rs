pub mod handlers;
pub mod middleware;

use crate::config::TomlConfig;
use crate::core::{BenchmarkTable, Benchmarker};
use crate::solvers::{AlgebraSolver, AngleSolver, EquationSolver, TrigFunctionSolver};
use crate::utils::error::Result;
use axum::routing::{get, post};
use axum::Router;
use middleware::CorsPolicy;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Immutable state shared by all handlers.
#[derive(Debug, Default)]
pub struct AppState {
    pub benchmarker: Benchmarker,
    pub algebra: AlgebraSolver,
    pub equation: EquationSolver,
    pub angle: AngleSolver,
    pub trig_functions: TrigFunctionSolver,
    pub cors: CorsPolicy,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn from_config(config: &TomlConfig) -> Self {
        Self {
            benchmarker: Benchmarker::new(BenchmarkTable::with_overrides(&config.benchmarks)),
            cors: CorsPolicy::new(config.cors.allow_origins.clone()),
            ..Self::default()
        }
    }
}

pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(handlers::health))
        .route("/solve/algebra", post(handlers::solve_algebra))
        .route("/solve/equation", post(handlers::solve_equation))
        .route("/solve/trig/analyze", post(handlers::analyze_angle))
        .route("/solve/trig/functions", post(handlers::solve_trig_functions))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::cors,
        ))
        .layer(axum::middleware::from_fn(middleware::trace_requests))
        .with_state(state)
}

/// Binds `host:port` and serves until Ctrl-C.
pub async fn serve(host: &str, port: u16, state: SharedState) -> Result<()> {
    let listener = TcpListener::bind((host, port)).await?;
    tracing::info!("🚀 Listening on http://{}", listener.local_addr()?);
    serve_with_listener(listener, state, shutdown_signal()).await
}

pub async fn serve_with_listener<F>(listener: TcpListener, state: SharedState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("🛑 Shutdown signal received"),
        Err(e) => tracing::error!("❌ Failed to listen for shutdown signal: {}", e),
    }
}
