use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::controllers::flight_controller::FlightController;
use crate::dto::flight_dto::{FlightRequest, FlightResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_flight_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_flights).post(create_flight))
        .route("/:id", get(get_flight).put(update_flight).delete(delete_flight))
}

async fn create_flight(
    State(state): State<AppState>,
    Json(request): Json<FlightRequest>,
) -> Result<(StatusCode, Json<FlightResponse>), AppError> {
    let controller = FlightController::new(state.store.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_flights(State(state): State<AppState>) -> Result<Json<Vec<FlightResponse>>, AppError> {
    let controller = FlightController::new(state.store.clone());
    Ok(Json(controller.list().await?))
}

async fn get_flight(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<FlightResponse>, AppError> {
    let controller = FlightController::new(state.store.clone());
    Ok(Json(controller.get_by_id(id).await?))
}

async fn update_flight(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<FlightRequest>,
) -> Result<Json<FlightResponse>, AppError> {
    let controller = FlightController::new(state.store.clone());
    Ok(Json(controller.update(id, request).await?))
}

async fn delete_flight(State(state): State<AppState>, Path(id): Path<i64>) -> Result<StatusCode, AppError> {
    let controller = FlightController::new(state.store.clone());
    controller.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
