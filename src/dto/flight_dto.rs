use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{Flight, NewFlight};

// Request para crear o reemplazar un vuelo; las referencias van por id
#[derive(Debug, Deserialize, Validate)]
pub struct FlightRequest {
    #[validate(length(min = 1, max = 10))]
    pub flight_number: String,
    pub airline: i64,
    pub departure_airport: i64,
    pub arrival_airport: i64,
    pub scheduled_departure: DateTime<Utc>,
    pub actual_departure: Option<DateTime<Utc>>,
    pub scheduled_arrival: DateTime<Utc>,
    pub actual_arrival: Option<DateTime<Utc>>,
}

impl From<FlightRequest> for NewFlight {
    fn from(request: FlightRequest) -> Self {
        Self {
            flight_number: request.flight_number,
            airline_id: request.airline,
            departure_airport_id: request.departure_airport,
            arrival_airport_id: request.arrival_airport,
            scheduled_departure: request.scheduled_departure,
            actual_departure: request.actual_departure,
            scheduled_arrival: request.scheduled_arrival,
            actual_arrival: request.actual_arrival,
        }
    }
}

// Response de vuelo
#[derive(Debug, Serialize, Deserialize)]
pub struct FlightResponse {
    pub id: i64,
    pub flight_number: String,
    pub airline: i64,
    pub departure_airport: i64,
    pub arrival_airport: i64,
    pub scheduled_departure: DateTime<Utc>,
    pub actual_departure: Option<DateTime<Utc>>,
    pub scheduled_arrival: DateTime<Utc>,
    pub actual_arrival: Option<DateTime<Utc>>,
}

impl From<Flight> for FlightResponse {
    fn from(flight: Flight) -> Self {
        Self {
            id: flight.id,
            flight_number: flight.flight_number,
            airline: flight.airline_id,
            departure_airport: flight.departure_airport_id,
            arrival_airport: flight.arrival_airport_id,
            scheduled_departure: flight.scheduled_departure,
            actual_departure: flight.actual_departure,
            scheduled_arrival: flight.scheduled_arrival,
            actual_arrival: flight.actual_arrival,
        }
    }
}
