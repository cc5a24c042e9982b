use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::controllers::airport_controller::AirportController;
use crate::dto::airport_dto::{AirportRequest, AirportResponse};
use crate::dto::turnaround_dto::DateFilter;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_airport_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_airports).post(create_airport))
        .route("/available_airports", get(available_airports))
        .route("/:id", get(get_airport).put(update_airport).delete(delete_airport))
}

async fn create_airport(
    State(state): State<AppState>,
    Json(request): Json<AirportRequest>,
) -> Result<(StatusCode, Json<AirportResponse>), AppError> {
    let controller = AirportController::new(state.store.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_airports(State(state): State<AppState>) -> Result<Json<Vec<AirportResponse>>, AppError> {
    let controller = AirportController::new(state.store.clone());
    Ok(Json(controller.list().await?))
}

async fn get_airport(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<AirportResponse>, AppError> {
    let controller = AirportController::new(state.store.clone());
    Ok(Json(controller.get_by_id(id).await?))
}

async fn update_airport(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<AirportRequest>,
) -> Result<Json<AirportResponse>, AppError> {
    let controller = AirportController::new(state.store.clone());
    Ok(Json(controller.update(id, request).await?))
}

async fn delete_airport(State(state): State<AppState>, Path(id): Path<i64>) -> Result<StatusCode, AppError> {
    let controller = AirportController::new(state.store.clone());
    controller.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn available_airports(
    State(state): State<AppState>,
    Query(filter): Query<DateFilter>,
) -> Result<Json<Vec<AirportResponse>>, AppError> {
    let controller = AirportController::new(state.store.clone());
    Ok(Json(controller.available_airports(filter.date.as_deref()).await?))
}
