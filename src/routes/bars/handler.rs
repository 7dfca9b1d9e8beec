use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use crate::AppState;
use crate::database::{BarEntity, NewBar};
use crate::error::AppError;

#[axum::debug_handler]
pub async fn create_bar(
    State(state): State<AppState>,
    Json(req): Json<NewBar>,
) -> Result<impl IntoResponse, AppError> {
    req.validate().map_err(AppError::Validation)?;
    let bar = state.bars.create(req).await;
    Ok((StatusCode::CREATED, Json(bar)))
}

#[axum::debug_handler]
pub async fn list_bars(State(state): State<AppState>) -> Json<Vec<BarEntity>> {
    Json(state.bars.list().await)
}

#[axum::debug_handler]
pub async fn get_bar(
    State(state): State<AppState>,
    Path(bar_id): Path<Uuid>,
) -> Result<Json<BarEntity>, AppError> {
    state
        .bars
        .find_by_id(bar_id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Bar".to_string()))
}
