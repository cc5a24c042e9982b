//! Modelo de Airline
//!
//! Compañía aérea identificada por su código IATA de 2 caracteres.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Airline principal - mapea exactamente a la tabla airlines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Airline {
    pub id: i64,
    pub name: String,
    pub iata_code: String,
}

/// Datos para crear o reemplazar una aerolínea
#[derive(Debug, Clone)]
pub struct NewAirline {
    pub name: String,
    pub iata_code: String,
}

impl std::fmt::Display for Airline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.iata_code)
    }
}
