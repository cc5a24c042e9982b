use std::sync::Arc;
use validator::Validate;

use crate::dto::airline_dto::{AirlineRequest, AirlineResponse};
use crate::repositories::Store;
use crate::services::turnaround_analytics::AirlineTurnaroundStats;
use crate::services::turnaround_query::TurnaroundQueryService;
use crate::utils::errors::{not_found_error, AppResult};

pub struct AirlineController {
    store: Arc<dyn Store>,
}

impl AirlineController {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn create(&self, request: AirlineRequest) -> AppResult<AirlineResponse> {
        request.validate()?;

        let airline = self.store.create_airline(request.into()).await?;
        tracing::info!(id = airline.id, "✈️ Aerolínea creada: {}", airline);

        Ok(airline.into())
    }

    pub async fn list(&self) -> AppResult<Vec<AirlineResponse>> {
        let airlines = self.store.list_airlines().await?;
        Ok(airlines.into_iter().map(AirlineResponse::from).collect())
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<AirlineResponse> {
        self.store
            .find_airline(id)
            .await?
            .map(AirlineResponse::from)
            .ok_or_else(|| not_found_error("Airline", id))
    }

    pub async fn update(&self, id: i64, request: AirlineRequest) -> AppResult<AirlineResponse> {
        request.validate()?;

        self.store
            .update_airline(id, request.into())
            .await?
            .map(AirlineResponse::from)
            .ok_or_else(|| not_found_error("Airline", id))
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.store.delete_airline(id).await? {
            return Err(not_found_error("Airline", id));
        }
        tracing::info!(id, "🗑️ Aerolínea eliminada con sus vuelos");
        Ok(())
    }

    /// Duración media de turnaround por aerolínea
    pub async fn turnaround_stats(&self) -> AppResult<Vec<AirlineTurnaroundStats>> {
        TurnaroundQueryService::new(self.store.clone()).turnaround_stats().await
    }
}
