use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;

use crate::controllers::turnaround_controller::TurnaroundController;
use crate::dto::turnaround_dto::{DateFilter, TurnaroundFilters, TurnaroundRequest, TurnaroundResponse};
use crate::services::turnaround_analytics::AverageDuration;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_turnaround_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_turnarounds).post(create_turnaround))
        .route("/by_date_and_airport", get(by_date_and_airport))
        .route("/average_duration", get(average_duration))
        .route("/available_dates", get(available_dates))
        .route("/:id", get(get_turnaround).put(update_turnaround).delete(delete_turnaround))
}

async fn create_turnaround(
    State(state): State<AppState>,
    Json(request): Json<TurnaroundRequest>,
) -> Result<(StatusCode, Json<TurnaroundResponse>), AppError> {
    let controller = TurnaroundController::new(state.store.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_turnarounds(State(state): State<AppState>) -> Result<Json<Vec<TurnaroundResponse>>, AppError> {
    let controller = TurnaroundController::new(state.store.clone());
    Ok(Json(controller.list().await?))
}

async fn get_turnaround(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<TurnaroundResponse>, AppError> {
    let controller = TurnaroundController::new(state.store.clone());
    Ok(Json(controller.get_by_id(id).await?))
}

async fn update_turnaround(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<TurnaroundRequest>,
) -> Result<Json<TurnaroundResponse>, AppError> {
    let controller = TurnaroundController::new(state.store.clone());
    Ok(Json(controller.update(id, request).await?))
}

async fn delete_turnaround(State(state): State<AppState>, Path(id): Path<i64>) -> Result<StatusCode, AppError> {
    let controller = TurnaroundController::new(state.store.clone());
    controller.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn by_date_and_airport(
    State(state): State<AppState>,
    Query(filters): Query<TurnaroundFilters>,
) -> Result<Json<Vec<TurnaroundResponse>>, AppError> {
    let controller = TurnaroundController::new(state.store.clone());
    Ok(Json(controller.by_date_and_airport(&filters).await?))
}

async fn average_duration(
    State(state): State<AppState>,
    Query(filter): Query<DateFilter>,
) -> Result<Json<AverageDuration>, AppError> {
    let controller = TurnaroundController::new(state.store.clone());
    Ok(Json(controller.average_duration(filter.date.as_deref()).await?))
}

async fn available_dates(State(state): State<AppState>) -> Result<Json<Vec<NaiveDate>>, AppError> {
    let controller = TurnaroundController::new(state.store.clone());
    Ok(Json(controller.available_dates().await?))
}
