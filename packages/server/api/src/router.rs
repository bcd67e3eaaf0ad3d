use crate::handlers;
use crate::state::AppState;
use axum::{http, routing::get, Json, Router};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(handlers::router())
        .with_state(state)
}

/// Full application: routes plus request tracing and CORS.
pub fn app(state: AppState, cors_origin: Option<&str>) -> anyhow::Result<Router> {
    let cors = CorsLayer::new()
        .allow_methods([http::Method::GET, http::Method::POST])
        .allow_headers([http::header::CONTENT_TYPE, http::header::ACCEPT]);

    let cors = match cors_origin {
        Some(origin) => cors.allow_origin(origin.parse::<http::HeaderValue>()?),
        None => cors.allow_origin(Any),
    };

    Ok(routes(state).layer(TraceLayer::new_for_http()).layer(cors))
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
