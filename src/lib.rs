pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod storage;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::get,
    Router,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::services::candidate_service::CandidateService;
use crate::storage::CandidateStore;

pub const SERVICE_NAME: &str = "agentic-platform";

#[derive(Clone)]
pub struct AppState {
    pub candidate_service: CandidateService,
}

impl AppState {
    pub fn new(store: Arc<dyn CandidateStore>) -> Self {
        Self {
            candidate_service: CandidateService::new(store),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(title = "agentic-platform", description = "Candidate CRUD service"),
    paths(
        routes::health::root,
        routes::health::health,
        routes::candidate_routes::list_candidates,
        routes::candidate_routes::create_candidate,
        routes::candidate_routes::get_candidate,
        routes::candidate_routes::replace_candidate,
        routes::candidate_routes::update_candidate,
        routes::candidate_routes::delete_candidate,
    ),
    components(schemas(
        dto::candidate_dto::CandidateResponse,
        dto::candidate_dto::CreateCandidatePayload,
        dto::candidate_dto::UpdateCandidatePayload,
    ))
)]
pub struct ApiDoc;

/// Builds the full application router. Requires the configuration to be
/// initialized (the uploads dir and CORS origins come from it).
pub fn app(state: AppState) -> Router {
    let config = config::get_config();

    let base_routes = Router::new()
        .route("/", get(routes::health::root))
        .route("/health", get(routes::health::health))
        .route("/openapi.json", get(routes::health::openapi_json));

    let candidate_api = Router::new()
        .route(
            "/api/candidates",
            get(routes::candidate_routes::list_candidates)
                .post(routes::candidate_routes::create_candidate),
        )
        .route(
            "/api/candidates/:id",
            get(routes::candidate_routes::get_candidate)
                .put(routes::candidate_routes::replace_candidate)
                .patch(routes::candidate_routes::update_candidate)
                .delete(routes::candidate_routes::delete_candidate),
        )
        .layer(axum::middleware::from_fn(
            middleware::auth::require_bearer_auth,
        ));

    base_routes
        .merge(candidate_api)
        .nest_service(
            "/uploads",
            tower_http::services::ServeDir::new(config.uploads_dir.clone()),
        )
        .with_state(state)
        .layer(middleware::cors::cors_layer(&config.cors_origin_list()))
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(50 * 1024 * 1024))
}
