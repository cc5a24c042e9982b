//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de parámetros de consulta.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

use crate::utils::errors::{bad_request_error, AppResult};

/// Formato de fecha aceptado en parámetros y respuestas
pub const DATE_FORMAT: &str = "%Y-%m-%d";

lazy_static! {
    /// Código IATA de aerolínea: 2 caracteres alfanuméricos en mayúscula (AF, U2)
    pub static ref AIRLINE_IATA_RE: Regex = Regex::new(r"^[A-Z0-9]{2}$").unwrap();
    /// Código IATA de aeropuerto: 3 letras en mayúscula (CDG, JFK)
    pub static ref AIRPORT_IATA_RE: Regex = Regex::new(r"^[A-Z]{3}$").unwrap();
}

/// Exigir un parámetro de consulta; vacío cuenta como ausente
pub fn require_param<'a>(value: Option<&'a str>, message: &str) -> AppResult<&'a str> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(bad_request_error(message)),
    }
}

/// Validar y convertir string a fecha YYYY-MM-DD
pub fn parse_date(value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| bad_request_error("Invalid date format. Use YYYY-MM-DD"))
}
