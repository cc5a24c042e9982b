use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::controllers::airline_controller::AirlineController;
use crate::dto::airline_dto::{AirlineRequest, AirlineResponse};
use crate::services::turnaround_analytics::AirlineTurnaroundStats;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_airline_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_airlines).post(create_airline))
        .route("/turnaround_stats", get(turnaround_stats))
        .route("/:id", get(get_airline).put(update_airline).delete(delete_airline))
}

async fn create_airline(
    State(state): State<AppState>,
    Json(request): Json<AirlineRequest>,
) -> Result<(StatusCode, Json<AirlineResponse>), AppError> {
    let controller = AirlineController::new(state.store.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_airlines(State(state): State<AppState>) -> Result<Json<Vec<AirlineResponse>>, AppError> {
    let controller = AirlineController::new(state.store.clone());
    Ok(Json(controller.list().await?))
}

async fn get_airline(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<AirlineResponse>, AppError> {
    let controller = AirlineController::new(state.store.clone());
    Ok(Json(controller.get_by_id(id).await?))
}

async fn update_airline(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<AirlineRequest>,
) -> Result<Json<AirlineResponse>, AppError> {
    let controller = AirlineController::new(state.store.clone());
    Ok(Json(controller.update(id, request).await?))
}

async fn delete_airline(State(state): State<AppState>, Path(id): Path<i64>) -> Result<StatusCode, AppError> {
    let controller = AirlineController::new(state.store.clone());
    controller.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn turnaround_stats(State(state): State<AppState>) -> Result<Json<Vec<AirlineTurnaroundStats>>, AppError> {
    let controller = AirlineController::new(state.store.clone());
    Ok(Json(controller.turnaround_stats().await?))
}
