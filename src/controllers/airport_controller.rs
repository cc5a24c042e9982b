use std::sync::Arc;
use validator::Validate;

use crate::dto::airport_dto::{AirportRequest, AirportResponse};
use crate::repositories::Store;
use crate::services::turnaround_query::TurnaroundQueryService;
use crate::utils::errors::{not_found_error, AppResult};

pub struct AirportController {
    store: Arc<dyn Store>,
}

impl AirportController {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn create(&self, request: AirportRequest) -> AppResult<AirportResponse> {
        request.validate()?;

        let airport = self.store.create_airport(request.into()).await?;
        tracing::info!(id = airport.id, "🛬 Aeropuerto creado: {}", airport);

        Ok(airport.into())
    }

    pub async fn list(&self) -> AppResult<Vec<AirportResponse>> {
        let airports = self.store.list_airports().await?;
        Ok(airports.into_iter().map(AirportResponse::from).collect())
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<AirportResponse> {
        self.store
            .find_airport(id)
            .await?
            .map(AirportResponse::from)
            .ok_or_else(|| not_found_error("Airport", id))
    }

    pub async fn update(&self, id: i64, request: AirportRequest) -> AppResult<AirportResponse> {
        request.validate()?;

        self.store
            .update_airport(id, request.into())
            .await?
            .map(AirportResponse::from)
            .ok_or_else(|| not_found_error("Airport", id))
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.store.delete_airport(id).await? {
            return Err(not_found_error("Airport", id));
        }
        tracing::info!(id, "🗑️ Aeropuerto eliminado con sus vuelos y turnarounds");
        Ok(())
    }

    /// Aeropuertos con turnarounds en la fecha indicada
    pub async fn available_airports(&self, date: Option<&str>) -> AppResult<Vec<AirportResponse>> {
        let airports = TurnaroundQueryService::new(self.store.clone())
            .available_airports(date)
            .await?;
        Ok(airports.into_iter().map(AirportResponse::from).collect())
    }
}
