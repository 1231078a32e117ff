use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use utoipa::OpenApi;

use crate::SERVICE_NAME;

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service metadata")
    )
)]
#[axum::debug_handler]
pub async fn root() -> impl IntoResponse {
    let body = json!({
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "docs": "/openapi.json",
        "openapi": "/openapi.json",
    });
    (StatusCode::OK, Json(body))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy")
    )
)]
#[axum::debug_handler]
pub async fn health() -> impl IntoResponse {
    let body = json!({
        "status": "healthy",
        "service": SERVICE_NAME,
    });
    (StatusCode::OK, Json(body))
}

#[axum::debug_handler]
pub async fn openapi_json() -> impl IntoResponse {
    Json(crate::ApiDoc::openapi())
}
