//! Estadísticas de turnarounds
//!
//! Dos definiciones distintas conviven aquí y deben mantenerse así:
//!
//! - [`average_duration_minutes`]: media de las salidas programadas de los
//!   vuelos de salida menos media de las salidas programadas de los vuelos
//!   de llegada, en minutos. Es `mean(A) - mean(B)`, no `mean(A - B)`.
//! - [`airline_turnaround_stats`]: media por turnaround de
//!   `scheduled_end - scheduled_start`, en horas, agrupada por aerolínea.
//!
//! Las funciones son puras; los datos los carga el controlador desde el store.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Airline, TurnaroundDetail};

/// Resultado de `average_duration` para una fecha
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AverageDuration {
    pub date: NaiveDate,
    pub average_duration_minutes: f64,
}

/// Duración media de turnaround de una aerolínea, en horas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirlineTurnaroundStats {
    pub airline: String,
    pub average_duration: f64,
}

/// Instante en nanosegundos desde epoch, sin perder la parte fraccionaria
fn epoch_nanos(instant: DateTime<Utc>) -> i128 {
    i128::from(instant.timestamp()) * 1_000_000_000 + i128::from(instant.timestamp_subsec_nanos())
}

/// Duración media (en minutos) de los turnarounds que empiezan en una fecha.
///
/// Los `details` deben venir ya filtrados por fecha de `scheduled_start`.
/// Devuelve `None` si no hay turnarounds, para distinguirlo de una media de cero.
pub fn average_duration_minutes(details: &[TurnaroundDetail]) -> Option<f64> {
    if details.is_empty() {
        return None;
    }

    // Las dos medias comparten divisor: mean(A) - mean(B) = (sum(A) - sum(B)) / n
    let departures: i128 = details
        .iter()
        .map(|d| epoch_nanos(d.departure_flight.scheduled_departure))
        .sum();
    let arrivals: i128 = details
        .iter()
        .map(|d| epoch_nanos(d.arrival_flight.scheduled_departure))
        .sum();

    Some((departures - arrivals) as f64 / details.len() as f64 / 60_000_000_000.0)
}

/// Duración media de turnaround por aerolínea, en horas.
///
/// Una aerolínea cuenta un turnaround si opera el vuelo de llegada o el de
/// salida. Las aerolíneas sin turnarounds no aparecen. El orden sigue al de
/// `airlines`.
pub fn airline_turnaround_stats(airlines: &[Airline], details: &[TurnaroundDetail]) -> Vec<AirlineTurnaroundStats> {
    airlines
        .iter()
        .filter_map(|airline| {
            let durations: Vec<f64> = details
                .iter()
                .filter(|d| d.involves_airline(airline.id))
                .map(|d| {
                    let span = d.turnaround.scheduled_end - d.turnaround.scheduled_start;
                    span.num_milliseconds() as f64 / 3_600_000.0
                })
                .collect();

            if durations.is_empty() {
                return None;
            }

            Some(AirlineTurnaroundStats {
                airline: airline.name.clone(),
                average_duration: durations.iter().sum::<f64>() / durations.len() as f64,
            })
        })
        .collect()
}
