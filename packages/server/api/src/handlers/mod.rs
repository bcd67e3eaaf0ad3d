pub mod outlets;
pub mod query;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/get_outlets", get(outlets::get_outlets))
        .route("/get_outlets_geodesic", get(outlets::get_outlets_geodesic))
        .route("/rag_query", post(query::rag_query))
        .route("/non_rag_query", post(query::non_rag_query))
}
