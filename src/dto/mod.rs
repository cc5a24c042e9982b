pub mod airline_dto;
pub mod airport_dto;
pub mod flight_dto;
pub mod turnaround_dto;

pub use airline_dto::*;
pub use airport_dto::*;
pub use flight_dto::*;
pub use turnaround_dto::*;
