//! Repositorios de acceso a datos
//!
//! Cada entidad expone su repositorio como trait asíncrono. Hay dos
//! implementaciones:
//! - `postgres`: PostgreSQL con SQLx (producción)
//! - `memory`: store en memoria para tests y desarrollo local
//!
//! Ambas garantizan las mismas reglas: unicidad, claves foráneas, borrado
//! en cascada y validación atómica de turnarounds.

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::models::{
    Airline, Airport, Flight, NewAirline, NewAirport, NewFlight, NewTurnaround, Turnaround, TurnaroundDetail,
};
use crate::utils::errors::AppResult;

#[async_trait]
pub trait AirlineRepository: Send + Sync {
    async fn create_airline(&self, airline: NewAirline) -> AppResult<Airline>;
    async fn list_airlines(&self) -> AppResult<Vec<Airline>>;
    async fn find_airline(&self, id: i64) -> AppResult<Option<Airline>>;
    /// `None` si el id no existe
    async fn update_airline(&self, id: i64, airline: NewAirline) -> AppResult<Option<Airline>>;
    /// Borra en cascada sus vuelos y los turnarounds de esos vuelos
    async fn delete_airline(&self, id: i64) -> AppResult<bool>;
}

#[async_trait]
pub trait AirportRepository: Send + Sync {
    async fn create_airport(&self, airport: NewAirport) -> AppResult<Airport>;
    async fn list_airports(&self) -> AppResult<Vec<Airport>>;
    async fn find_airport(&self, id: i64) -> AppResult<Option<Airport>>;
    async fn find_airport_by_iata(&self, iata_code: &str) -> AppResult<Option<Airport>>;
    async fn update_airport(&self, id: i64, airport: NewAirport) -> AppResult<Option<Airport>>;
    /// Borra en cascada los vuelos que lo tocan y los turnarounds asociados
    async fn delete_airport(&self, id: i64) -> AppResult<bool>;
    /// Aeropuertos con al menos un turnaround que empieza en `date`, por código IATA
    async fn list_airports_with_turnarounds_on(&self, date: NaiveDate) -> AppResult<Vec<Airport>>;
}

#[async_trait]
pub trait FlightRepository: Send + Sync {
    async fn create_flight(&self, flight: NewFlight) -> AppResult<Flight>;
    async fn list_flights(&self) -> AppResult<Vec<Flight>>;
    async fn find_flight(&self, id: i64) -> AppResult<Option<Flight>>;
    async fn update_flight(&self, id: i64, flight: NewFlight) -> AppResult<Option<Flight>>;
    /// Borra en cascada los turnarounds que lo referencian
    async fn delete_flight(&self, id: i64) -> AppResult<bool>;
}

#[async_trait]
pub trait TurnaroundRepository: Send + Sync {
    /// Valida la coherencia de aeropuertos y persiste en una sola unidad atómica
    async fn create_turnaround(&self, turnaround: NewTurnaround) -> AppResult<Turnaround>;
    async fn list_turnarounds(&self) -> AppResult<Vec<Turnaround>>;
    async fn find_turnaround(&self, id: i64) -> AppResult<Option<Turnaround>>;
    /// Mismas garantías que `create_turnaround`
    async fn update_turnaround(&self, id: i64, turnaround: NewTurnaround) -> AppResult<Option<Turnaround>>;
    async fn delete_turnaround(&self, id: i64) -> AppResult<bool>;
    async fn list_turnarounds_by_start_date_and_airport(
        &self,
        date: NaiveDate,
        airport_id: i64,
    ) -> AppResult<Vec<Turnaround>>;
    async fn list_turnaround_details(&self) -> AppResult<Vec<TurnaroundDetail>>;
    async fn list_turnaround_details_by_start_date(&self, date: NaiveDate) -> AppResult<Vec<TurnaroundDetail>>;
    /// Fechas distintas de `scheduled_start`, en orden ascendente
    async fn list_turnaround_start_dates(&self) -> AppResult<Vec<NaiveDate>>;
}

/// Store completo que usan los controladores
pub trait Store: AirlineRepository + AirportRepository + FlightRepository + TurnaroundRepository {}

impl<T> Store for T where T: AirlineRepository + AirportRepository + FlightRepository + TurnaroundRepository {}
