use application::{OutletOverlap, OverlapMode};
use axum::{extract::State, Json};
use shared::dto::DataResponse;

use crate::error::ServiceError;
use crate::state::AppState;

type OutletsResponse = Result<Json<DataResponse<Vec<OutletOverlap>>>, ServiceError>;

pub async fn get_outlets(State(state): State<AppState>) -> OutletsResponse {
    list(&state, OverlapMode::ServerPredicate).await
}

pub async fn get_outlets_geodesic(State(state): State<AppState>) -> OutletsResponse {
    list(&state, OverlapMode::Geodesic).await
}

async fn list(state: &AppState, mode: OverlapMode) -> OutletsResponse {
    let outlets = state.overlaps.list_outlets(mode).await.map_err(|e| {
        tracing::error!(?mode, "Listing outlets failed: {}", e);
        ServiceError::from(e)
    })?;

    Ok(Json(DataResponse::success(outlets)))
}
