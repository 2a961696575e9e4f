use crate::domain::model::{AngleRequest, ExpressionRequest, SolveResponse, TrigRequest};
use crate::server::SharedState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "Online" }))
}

pub async fn solve_algebra(
    State(state): State<SharedState>,
    Json(request): Json<ExpressionRequest>,
) -> Response {
    run_solver(move || state.benchmarker.run(&state.algebra, &request)).await
}

pub async fn solve_equation(
    State(state): State<SharedState>,
    Json(request): Json<ExpressionRequest>,
) -> Response {
    run_solver(move || state.benchmarker.run(&state.equation, &request)).await
}

pub async fn analyze_angle(
    State(state): State<SharedState>,
    Json(request): Json<AngleRequest>,
) -> Response {
    run_solver(move || state.benchmarker.run(&state.angle, &request)).await
}

pub async fn solve_trig_functions(
    State(state): State<SharedState>,
    Json(request): Json<TrigRequest>,
) -> Response {
    run_solver(move || state.benchmarker.run(&state.trig_functions, &request)).await
}

/// Solving is CPU-bound; keep it off the async workers.
async fn run_solver<T, F>(job: F) -> Response
where
    F: FnOnce() -> SolveResponse<T> + Send + 'static,
    T: Serialize + Send + 'static,
{
    match tokio::task::spawn_blocking(job).await {
        Ok(response) => Json(response).into_response(),
        Err(e) => {
            tracing::error!("❌ Solver task failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "status": "error", "message": "internal solver failure" })),
            )
                .into_response()
        }
    }
}
