//! Validación de coherencia de un turnaround
//!
//! Un turnaround solo es válido si su vuelo de llegada aterriza en el
//! aeropuerto del turnaround y su vuelo de salida despega del mismo
//! aeropuerto. La comprobación se ejecuta antes de cada creación o
//! actualización, dentro de la misma unidad de escritura del store.
//!
//! No se comprueba el orden cronológico de los horarios.

use crate::models::Flight;
use crate::utils::errors::{AppError, AppResult};

/// Mensaje devuelto al cliente cuando la regla no se cumple
pub const CONSISTENCY_MESSAGE: &str =
    "Flights must arrive and depart from the same airport as the turnaround";

/// Verificar que los dos vuelos tocan el aeropuerto del turnaround
pub fn validate_turnaround(arrival_flight: &Flight, departure_flight: &Flight, airport_id: i64) -> AppResult<()> {
    if arrival_flight.arrival_airport_id != airport_id || departure_flight.departure_airport_id != airport_id {
        tracing::debug!(
            arrival_flight = arrival_flight.id,
            arrival_airport = arrival_flight.arrival_airport_id,
            departure_flight = departure_flight.id,
            departure_airport = departure_flight.departure_airport_id,
            airport_id,
            "turnaround rechazado por incoherencia de aeropuertos"
        );
        return Err(AppError::ConsistencyViolation(CONSISTENCY_MESSAGE.to_string()));
    }

    Ok(())
}
