//! Modelo de Airport

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Airport principal - mapea exactamente a la tabla airports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Airport {
    pub id: i64,
    pub name: String,
    pub iata_code: String,
    pub city: String,
    pub country: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Datos para crear o reemplazar un aeropuerto
#[derive(Debug, Clone)]
pub struct NewAirport {
    pub name: String,
    pub iata_code: String,
    pub city: String,
    pub country: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl std::fmt::Display for Airport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.iata_code)
    }
}
