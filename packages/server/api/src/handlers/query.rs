use application::Query;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use shared::dto::{AnswerResponse, NonRagQueryRequest, RagQueryRequest};

use crate::error::ServiceError;
use crate::state::AppState;

pub async fn rag_query(
    State(state): State<AppState>,
    payload: Result<Json<RagQueryRequest>, JsonRejection>,
) -> Result<Json<AnswerResponse>, ServiceError> {
    let Json(req) = payload?;
    let query = Query::Semantic(req.query.unwrap_or_default());
    answer(&state, "rag_query", query).await
}

pub async fn non_rag_query(
    State(state): State<AppState>,
    payload: Result<Json<NonRagQueryRequest>, JsonRejection>,
) -> Result<Json<AnswerResponse>, ServiceError> {
    let Json(req) = payload?;
    let query = Query::FullContext(req.messages.unwrap_or_default());
    answer(&state, "non_rag_query", query).await
}

async fn answer(
    state: &AppState,
    operation: &'static str,
    query: Query,
) -> Result<Json<AnswerResponse>, ServiceError> {
    let answer = state.retrieval.answer(query).await.map_err(|e| {
        tracing::error!(operation, "Query failed: {}", e);
        ServiceError::from(e)
    })?;

    Ok(Json(AnswerResponse::success(answer)))
}
