use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{Airport, NewAirport};

// Request para crear o reemplazar un aeropuerto
#[derive(Debug, Deserialize, Validate)]
pub struct AirportRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(regex(path = "crate::utils::validation::AIRPORT_IATA_RE", message = "must be 3 uppercase letters"))]
    pub iata_code: String,
    #[validate(length(min = 1, max = 100))]
    pub city: String,
    #[validate(length(min = 1, max = 100))]
    pub country: String,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
}

impl From<AirportRequest> for NewAirport {
    fn from(request: AirportRequest) -> Self {
        Self {
            name: request.name,
            iata_code: request.iata_code,
            city: request.city,
            country: request.country,
            latitude: request.latitude,
            longitude: request.longitude,
        }
    }
}

// Response de aeropuerto
#[derive(Debug, Serialize, Deserialize)]
pub struct AirportResponse {
    pub id: i64,
    pub name: String,
    pub iata_code: String,
    pub city: String,
    pub country: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl From<Airport> for AirportResponse {
    fn from(airport: Airport) -> Self {
        Self {
            id: airport.id,
            name: airport.name,
            iata_code: airport.iata_code,
            city: airport.city,
            country: airport.country,
            latitude: airport.latitude,
            longitude: airport.longitude,
        }
    }
}
