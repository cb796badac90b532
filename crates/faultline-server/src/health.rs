use axum::response::IntoResponse;
use http::StatusCode;

/// Liveness probe; never routed through the error boundary
pub async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}
