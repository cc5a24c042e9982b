//! Services module
//!
//! Este módulo contiene la lógica de negocio de turnarounds: la regla de
//! coherencia de aeropuertos, las estadísticas y las consultas por fecha.

pub mod turnaround_analytics;
pub mod turnaround_query;
pub mod turnaround_validator;

pub use turnaround_analytics::{AirlineTurnaroundStats, AverageDuration};
pub use turnaround_query::TurnaroundQueryService;
pub use turnaround_validator::validate_turnaround;
