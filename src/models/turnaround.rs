//! Modelo de Turnaround
//!
//! Período en tierra entre la llegada de un vuelo y la salida del
//! siguiente en el mismo aeropuerto. Cada vuelo participa como mucho
//! en un turnaround como llegada y en uno como salida.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::flight::Flight;

/// Turnaround principal - mapea exactamente a la tabla turnarounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Turnaround {
    pub id: i64,
    pub arrival_flight_id: i64,
    pub departure_flight_id: i64,
    pub airport_id: i64,
    pub scheduled_start: DateTime<Utc>,
    pub actual_start: Option<DateTime<Utc>>,
    pub scheduled_end: DateTime<Utc>,
    pub actual_end: Option<DateTime<Utc>>,
}

/// Datos para crear o reemplazar un turnaround
#[derive(Debug, Clone)]
pub struct NewTurnaround {
    pub arrival_flight_id: i64,
    pub departure_flight_id: i64,
    pub airport_id: i64,
    pub scheduled_start: DateTime<Utc>,
    pub actual_start: Option<DateTime<Utc>>,
    pub scheduled_end: DateTime<Utc>,
    pub actual_end: Option<DateTime<Utc>>,
}

/// Turnaround junto con sus dos vuelos, base de los cálculos agregados
#[derive(Debug, Clone)]
pub struct TurnaroundDetail {
    pub turnaround: Turnaround,
    pub arrival_flight: Flight,
    pub departure_flight: Flight,
}

impl TurnaroundDetail {
    /// El turnaround involucra a la aerolínea en la llegada o en la salida
    pub fn involves_airline(&self, airline_id: i64) -> bool {
        self.arrival_flight.airline_id == airline_id || self.departure_flight.airline_id == airline_id
    }
}
