// src/handlers/health.rs

use axum::{Json, extract::State, response::IntoResponse};
use utoipa::OpenApi;

use crate::{config::Config, routes::ApiDoc};

/// Readiness message at the API root.
pub async fn server_ready(State(config): State<Config>) -> impl IntoResponse {
    format!(
        "Server ready at http://{}:{}{}",
        config.host, config.port, config.api_prefix
    )
}

/// Serves the OpenAPI document of the student endpoints.
pub async fn openapi() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
