//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL.

pub mod airline;
pub mod airport;
pub mod flight;
pub mod turnaround;

pub use airline::{Airline, NewAirline};
pub use airport::{Airport, NewAirport};
pub use flight::{Flight, NewFlight};
pub use turnaround::{NewTurnaround, Turnaround, TurnaroundDetail};
