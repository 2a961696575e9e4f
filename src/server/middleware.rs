use crate::server::SharedState;
use axum::extract::{Request, State};
use axum::http::{header, HeaderMap, HeaderValue, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::time::Instant;
use tracing::Instrument;

const ALLOWED_METHODS: &str = "GET, POST, OPTIONS";
const ALLOWED_HEADERS: &str = "content-type, authorization";
const MAX_AGE_SECONDS: &str = "600";

/// Allowed origins for cross-origin requests; `*` allows any origin.
#[derive(Debug, Clone, PartialEq)]
pub struct CorsPolicy {
    allow_origins: Vec<String>,
}

impl Default for CorsPolicy {
    fn default() -> Self {
        Self::new(vec!["*".to_string()])
    }
}

impl CorsPolicy {
    pub fn new(allow_origins: Vec<String>) -> Self {
        let allow_origins = allow_origins
            .into_iter()
            .map(|origin| origin.trim_end_matches('/').to_string())
            .collect();
        Self { allow_origins }
    }

    /// Value for `Access-Control-Allow-Origin`, if the origin is allowed.
    pub fn allowed_origin(&self, origin: Option<&str>) -> Option<String> {
        if self.allow_origins.iter().any(|o| o == "*") {
            return Some("*".to_string());
        }
        let origin = origin?;
        self.allow_origins
            .iter()
            .find(|allowed| allowed.as_str() == origin)
            .cloned()
    }

    fn apply(&self, headers: &mut HeaderMap, allowed: Option<&str>, preflight: bool) {
        let Some(allowed) = allowed else {
            return;
        };
        if let Ok(value) = HeaderValue::from_str(allowed) {
            headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
        }
        if allowed != "*" {
            headers.insert(header::VARY, HeaderValue::from_static("origin"));
        }
        if preflight {
            headers.insert(
                header::ACCESS_CONTROL_ALLOW_METHODS,
                HeaderValue::from_static(ALLOWED_METHODS),
            );
            headers.insert(
                header::ACCESS_CONTROL_ALLOW_HEADERS,
                HeaderValue::from_static(ALLOWED_HEADERS),
            );
            headers.insert(
                header::ACCESS_CONTROL_MAX_AGE,
                HeaderValue::from_static(MAX_AGE_SECONDS),
            );
        }
    }
}

/// Answers preflight requests and decorates every response with CORS headers.
pub async fn cors(State(state): State<SharedState>, request: Request, next: Next) -> Response {
    let origin = request
        .headers()
        .get(header::ORIGIN)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let allowed = state.cors.allowed_origin(origin.as_deref());

    if request.method() == Method::OPTIONS {
        let mut response = StatusCode::NO_CONTENT.into_response();
        state
            .cors
            .apply(response.headers_mut(), allowed.as_deref(), true);
        return response;
    }

    let mut response = next.run(request).await;
    state
        .cors
        .apply(response.headers_mut(), allowed.as_deref(), false);
    response
}

/// One span per request, closed with status and latency.
pub async fn trace_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let span = tracing::info_span!("request", %method, %path);
    let start = Instant::now();

    let response = next.run(request).instrument(span).await;

    let status = response.status();
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    if status.is_success() {
        tracing::info!("{} {} -> {} ({:.2} ms)", method, path, status.as_u16(), elapsed_ms);
    } else {
        tracing::warn!("{} {} -> {} ({:.2} ms)", method, path, status.as_u16(), elapsed_ms);
    }
    response
}
