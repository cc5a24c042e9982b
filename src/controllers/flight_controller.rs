use std::sync::Arc;
use validator::Validate;

use crate::dto::flight_dto::{FlightRequest, FlightResponse};
use crate::repositories::Store;
use crate::utils::errors::{not_found_error, AppResult};

pub struct FlightController {
    store: Arc<dyn Store>,
}

impl FlightController {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn create(&self, request: FlightRequest) -> AppResult<FlightResponse> {
        request.validate()?;

        let flight = self.store.create_flight(request.into()).await?;
        tracing::info!(id = flight.id, flight_number = %flight.flight_number, "🛫 Vuelo creado");

        Ok(flight.into())
    }

    pub async fn list(&self) -> AppResult<Vec<FlightResponse>> {
        let flights = self.store.list_flights().await?;
        Ok(flights.into_iter().map(FlightResponse::from).collect())
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<FlightResponse> {
        self.store
            .find_flight(id)
            .await?
            .map(FlightResponse::from)
            .ok_or_else(|| not_found_error("Flight", id))
    }

    // Los turnarounds existentes no se revalidan al mover un vuelo
    pub async fn update(&self, id: i64, request: FlightRequest) -> AppResult<FlightResponse> {
        request.validate()?;

        self.store
            .update_flight(id, request.into())
            .await?
            .map(FlightResponse::from)
            .ok_or_else(|| not_found_error("Flight", id))
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.store.delete_flight(id).await? {
            return Err(not_found_error("Flight", id));
        }
        tracing::info!(id, "🗑️ Vuelo eliminado");
        Ok(())
    }
}
