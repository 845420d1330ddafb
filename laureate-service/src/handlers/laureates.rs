use crate::dtos::{LaureateListResponse, LAUREATE_NOT_FOUND};
use crate::startup::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use service_core::error::AppError;

/// GET /laureates
pub async fn list_laureates(
    State(state): State<AppState>,
) -> Result<Json<LaureateListResponse>, AppError> {
    let laureates = state.store.find_all().await?;
    tracing::debug!(count = laureates.len(), "Listed laureates");
    Ok(Json(LaureateListResponse::new(laureates)))
}

/// GET /laureates/id/:id
///
/// A missing record and an id that is not an integer both answer 404 with a
/// bare JSON string.
pub async fn get_laureate_by_id(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, AppError> {
    let Some(id) = parse_laureate_id(&raw_id) else {
        tracing::debug!(raw_id = %raw_id, "Laureate id is not an integer");
        return Ok(not_found());
    };

    match state.store.find_by_id(id).await? {
        Some(laureate) => Ok((StatusCode::OK, Json(laureate)).into_response()),
        None => Ok(not_found()),
    }
}

/// Path ids are matched numerically; surrounding whitespace and a leading
/// `+` are tolerated.
pub fn parse_laureate_id(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(LAUREATE_NOT_FOUND)).into_response()
}
