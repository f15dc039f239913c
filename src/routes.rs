// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::{
    handlers::{health, student},
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    paths(student::initiate, student::submit_answers),
    info(title = "bookmatch", description = "Personality quiz matching readers with book genres")
)]
pub struct ApiDoc;

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins.iter().filter_map(|o| {
            let parsed = o.parse::<HeaderValue>();
            if parsed.is_err() {
                tracing::warn!("Ignoring invalid CORS origin: {}", o);
            }
            parsed.ok()
        }))
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([header::CONTENT_TYPE])
}

/// Assembles the main application router.
///
/// * Nests the API under the configured prefix.
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (store, catalog, book source).
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.allowed_origins);
    let prefix = state.config.api_prefix.trim_end_matches('/').to_string();

    let student_routes = Router::new().route(
        "/",
        post(student::initiate).put(student::submit_answers),
    );

    let api_routes = Router::new()
        .route("/", get(health::server_ready))
        .route("/openapi.json", get(health::openapi))
        .nest("/student", student_routes);

    // axum does not nest at the root.
    let router = if prefix.is_empty() {
        Router::new().merge(api_routes)
    } else {
        Router::new().nest(&prefix, api_routes)
    };

    router
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
