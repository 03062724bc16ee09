use axum::{routing::get, Json, Router};
use common::types::Health;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::auth::ServerState;

pub mod toys;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: health check plus the toy API.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let toy_routes = Router::new()
        .route("/api/toy", get(toys::list_toys).post(toys::create_toy))
        .route(
            "/api/toy/:toy_id",
            get(toys::get_toy).put(toys::update_toy).delete(toys::remove_toy),
        );

    Router::new()
        .route("/health", get(health))
        .merge(toy_routes)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
