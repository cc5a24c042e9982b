//! Modelo de Flight
//!
//! Un vuelo pertenece a una aerolínea y une dos aeropuertos.
//! La tupla (flight_number, airline_id, scheduled_departure) es única.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Flight principal - mapea exactamente a la tabla flights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Flight {
    pub id: i64,
    pub flight_number: String,
    pub airline_id: i64,
    pub departure_airport_id: i64,
    pub arrival_airport_id: i64,
    pub scheduled_departure: DateTime<Utc>,
    pub actual_departure: Option<DateTime<Utc>>,
    pub scheduled_arrival: DateTime<Utc>,
    pub actual_arrival: Option<DateTime<Utc>>,
}

/// Datos para crear o reemplazar un vuelo
#[derive(Debug, Clone)]
pub struct NewFlight {
    pub flight_number: String,
    pub airline_id: i64,
    pub departure_airport_id: i64,
    pub arrival_airport_id: i64,
    pub scheduled_departure: DateTime<Utc>,
    pub actual_departure: Option<DateTime<Utc>>,
    pub scheduled_arrival: DateTime<Utc>,
    pub actual_arrival: Option<DateTime<Utc>>,
}

impl NewFlight {
    /// Misma clave natural que otro vuelo ya registrado
    pub fn same_schedule_key(&self, other: &Flight) -> bool {
        self.flight_number == other.flight_number
            && self.airline_id == other.airline_id
            && self.scheduled_departure == other.scheduled_departure
    }
}
