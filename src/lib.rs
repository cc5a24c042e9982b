//! AGOA backend
//!
//! API de seguimiento de aerolíneas, aeropuertos, vuelos y turnarounds.
//! El binario `agoa-server` arranca el servidor; `create_app` construye la
//! aplicación completa para un `AppState` dado, también desde los tests.
//! Las URLs se aceptan con y sin barra final (`/api/airlines/`).

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use axum::{middleware::from_fn_with_state, response::Json, routing::get, Router};
use serde_json::{json, Value};
use tower::Layer;
use tower_http::{
    compression::CompressionLayer,
    normalize_path::{NormalizePath, NormalizePathLayer},
    trace::TraceLayer,
};

use crate::middleware::{auth::auth_middleware, cors::cors_layer};
use crate::state::AppState;

/// Router con la barra final recortada antes del enrutado
pub type App = NormalizePath<Router>;

/// Construir la aplicación
pub fn create_app(state: AppState) -> App {
    let api = routes::create_api_router().layer(from_fn_with_state(state.clone(), auth_middleware));

    let router = Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(CompressionLayer::new())
        .layer(cors_layer(&state.config))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Como capa del Router llegaría tarde: el match de rutas ya estaría hecho
    NormalizePathLayer::trim_trailing_slash().layer(router)
}

/// Health check público
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "agoa-backend",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
