//! Consultas de turnarounds por fecha y aeropuerto
//!
//! Convierte los parámetros externos (fecha `YYYY-MM-DD`, código IATA) en
//! filtros del store y alimenta las estadísticas de `turnaround_analytics`.

use chrono::NaiveDate;
use std::sync::Arc;

use crate::models::{Airport, Turnaround};
use crate::repositories::Store;
use crate::services::turnaround_analytics::{
    airline_turnaround_stats, average_duration_minutes, AirlineTurnaroundStats, AverageDuration,
};
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::{parse_date, require_param};

pub struct TurnaroundQueryService {
    store: Arc<dyn Store>,
}

impl TurnaroundQueryService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Turnarounds que empiezan en `date` en el aeropuerto con ese código IATA
    pub async fn by_date_and_airport(&self, date: Option<&str>, airport_code: Option<&str>) -> AppResult<Vec<Turnaround>> {
        let message = "Date and airport parameters are required";
        let date = parse_date(require_param(date, message)?)?;
        let airport_code = require_param(airport_code, message)?;

        let airport = self
            .store
            .find_airport_by_iata(airport_code)
            .await?
            .ok_or_else(|| AppError::BadRequest(format!("Airport '{}' does not exist", airport_code)))?;

        self.store
            .list_turnarounds_by_start_date_and_airport(date, airport.id)
            .await
    }

    /// Duración media de los turnarounds del día, `NotFound` si no hay ninguno
    pub async fn average_duration(&self, date: Option<&str>) -> AppResult<AverageDuration> {
        let date = parse_date(require_param(date, "Date parameter is required")?)?;
        let details = self.store.list_turnaround_details_by_start_date(date).await?;

        let average_duration_minutes = average_duration_minutes(&details)
            .ok_or_else(|| AppError::NotFound("No turnarounds found for this date".to_string()))?;

        tracing::debug!(%date, turnarounds = details.len(), average_duration_minutes, "duración media calculada");

        Ok(AverageDuration {
            date,
            average_duration_minutes,
        })
    }

    pub async fn turnaround_stats(&self) -> AppResult<Vec<AirlineTurnaroundStats>> {
        let airlines = self.store.list_airlines().await?;
        let details = self.store.list_turnaround_details().await?;
        Ok(airline_turnaround_stats(&airlines, &details))
    }

    pub async fn available_dates(&self) -> AppResult<Vec<NaiveDate>> {
        self.store.list_turnaround_start_dates().await
    }

    pub async fn available_airports(&self, date: Option<&str>) -> AppResult<Vec<Airport>> {
        let date = parse_date(require_param(date, "Date parameter is required")?)?;
        self.store.list_airports_with_turnarounds_on(date).await
    }
}
