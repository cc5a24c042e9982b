use chrono::NaiveDate;
use std::sync::Arc;

use crate::dto::turnaround_dto::{TurnaroundFilters, TurnaroundRequest, TurnaroundResponse};
use crate::repositories::Store;
use crate::services::turnaround_analytics::AverageDuration;
use crate::services::turnaround_query::TurnaroundQueryService;
use crate::utils::errors::{not_found_error, AppResult};

pub struct TurnaroundController {
    store: Arc<dyn Store>,
}

impl TurnaroundController {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    fn queries(&self) -> TurnaroundQueryService {
        TurnaroundQueryService::new(self.store.clone())
    }

    /// Crear un turnaround; el store valida la coherencia de aeropuertos antes de persistir
    pub async fn create(&self, request: TurnaroundRequest) -> AppResult<TurnaroundResponse> {
        let turnaround = self.store.create_turnaround(request.into()).await?;
        tracing::info!(
            id = turnaround.id,
            arrival_flight = turnaround.arrival_flight_id,
            departure_flight = turnaround.departure_flight_id,
            airport = turnaround.airport_id,
            "🔄 Turnaround creado"
        );

        Ok(turnaround.into())
    }

    pub async fn list(&self) -> AppResult<Vec<TurnaroundResponse>> {
        let turnarounds = self.store.list_turnarounds().await?;
        Ok(turnarounds.into_iter().map(TurnaroundResponse::from).collect())
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<TurnaroundResponse> {
        self.store
            .find_turnaround(id)
            .await?
            .map(TurnaroundResponse::from)
            .ok_or_else(|| not_found_error("Turnaround", id))
    }

    pub async fn update(&self, id: i64, request: TurnaroundRequest) -> AppResult<TurnaroundResponse> {
        self.store
            .update_turnaround(id, request.into())
            .await?
            .map(TurnaroundResponse::from)
            .ok_or_else(|| not_found_error("Turnaround", id))
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.store.delete_turnaround(id).await? {
            return Err(not_found_error("Turnaround", id));
        }
        tracing::info!(id, "🗑️ Turnaround eliminado");
        Ok(())
    }

    pub async fn by_date_and_airport(&self, filters: &TurnaroundFilters) -> AppResult<Vec<TurnaroundResponse>> {
        let turnarounds = self
            .queries()
            .by_date_and_airport(filters.date.as_deref(), filters.airport_code())
            .await?;
        Ok(turnarounds.into_iter().map(TurnaroundResponse::from).collect())
    }

    pub async fn average_duration(&self, date: Option<&str>) -> AppResult<AverageDuration> {
        self.queries().average_duration(date).await
    }

    pub async fn available_dates(&self) -> AppResult<Vec<NaiveDate>> {
        self.queries().available_dates().await
    }
}
