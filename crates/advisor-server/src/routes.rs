//! Router

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers::{
    crypto_recommendations, health_check, method_not_allowed, recommendations,
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route(
            "/api/recommendations",
            get(recommendations).fallback(method_not_allowed),
        )
        .route(
            "/api/crypto-recommendations",
            get(crypto_recommendations).fallback(method_not_allowed),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
