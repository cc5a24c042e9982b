//! Routers de la API
//!
//! Cada entidad tiene su router; `create_api_router` los monta bajo `/api`.

pub mod airline_routes;
pub mod airport_routes;
pub mod flight_routes;
pub mod turnaround_routes;

use axum::Router;

use crate::state::AppState;

pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/airlines", airline_routes::create_airline_router())
        .nest("/airports", airport_routes::create_airport_router())
        .nest("/flights", flight_routes::create_flight_router())
        .nest("/turnarounds", turnaround_routes::create_turnaround_router())
}
