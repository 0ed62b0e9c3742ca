use axum::{middleware, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::AppState;
use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        // Corpus
        .route("/movies/titles", get(handlers::get_titles))
        .route("/movies/popular", get(handlers::get_popular))
        .route("/movies/:movie_id", get(handlers::get_movie))
        .route("/recommendations", get(handlers::recommend))
        // Remote catalogue
        .route("/languages", get(handlers::get_languages))
        .route("/latest", get(handlers::get_latest))
}
