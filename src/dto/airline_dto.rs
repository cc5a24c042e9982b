use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{Airline, NewAirline};

// Request para crear o reemplazar una aerolínea
#[derive(Debug, Deserialize, Validate)]
pub struct AirlineRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(regex(path = "crate::utils::validation::AIRLINE_IATA_RE", message = "must be 2 uppercase letters or digits"))]
    pub iata_code: String,
}

impl From<AirlineRequest> for NewAirline {
    fn from(request: AirlineRequest) -> Self {
        Self {
            name: request.name,
            iata_code: request.iata_code,
        }
    }
}

// Response de aerolínea
#[derive(Debug, Serialize, Deserialize)]
pub struct AirlineResponse {
    pub id: i64,
    pub name: String,
    pub iata_code: String,
}

impl From<Airline> for AirlineResponse {
    fn from(airline: Airline) -> Self {
        Self {
            id: airline.id,
            name: airline.name,
            iata_code: airline.iata_code,
        }
    }
}
