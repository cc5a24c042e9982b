use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{NewTurnaround, Turnaround};

// Request para crear o reemplazar un turnaround; las referencias las comprueba el store
#[derive(Debug, Deserialize)]
pub struct TurnaroundRequest {
    pub arrival_flight: i64,
    pub departure_flight: i64,
    pub airport: i64,
    pub scheduled_start: DateTime<Utc>,
    pub actual_start: Option<DateTime<Utc>>,
    pub scheduled_end: DateTime<Utc>,
    pub actual_end: Option<DateTime<Utc>>,
}

impl From<TurnaroundRequest> for NewTurnaround {
    fn from(request: TurnaroundRequest) -> Self {
        Self {
            arrival_flight_id: request.arrival_flight,
            departure_flight_id: request.departure_flight,
            airport_id: request.airport,
            scheduled_start: request.scheduled_start,
            actual_start: request.actual_start,
            scheduled_end: request.scheduled_end,
            actual_end: request.actual_end,
        }
    }
}

// Response de turnaround
#[derive(Debug, Serialize, Deserialize)]
pub struct TurnaroundResponse {
    pub id: i64,
    pub arrival_flight: i64,
    pub departure_flight: i64,
    pub airport: i64,
    pub scheduled_start: DateTime<Utc>,
    pub actual_start: Option<DateTime<Utc>>,
    pub scheduled_end: DateTime<Utc>,
    pub actual_end: Option<DateTime<Utc>>,
}

impl From<Turnaround> for TurnaroundResponse {
    fn from(turnaround: Turnaround) -> Self {
        Self {
            id: turnaround.id,
            arrival_flight: turnaround.arrival_flight_id,
            departure_flight: turnaround.departure_flight_id,
            airport: turnaround.airport_id,
            scheduled_start: turnaround.scheduled_start,
            actual_start: turnaround.actual_start,
            scheduled_end: turnaround.scheduled_end,
            actual_end: turnaround.actual_end,
        }
    }
}

// Query de `by_date_and_airport`; el dashboard envía `airport_code`
#[derive(Debug, Default, Deserialize)]
pub struct TurnaroundFilters {
    pub date: Option<String>,
    pub airport: Option<String>,
    pub airport_code: Option<String>,
}

impl TurnaroundFilters {
    pub fn airport_code(&self) -> Option<&str> {
        self.airport.as_deref().or(self.airport_code.as_deref())
    }
}

// Query con solo una fecha
#[derive(Debug, Default, Deserialize)]
pub struct DateFilter {
    pub date: Option<String>,
}
