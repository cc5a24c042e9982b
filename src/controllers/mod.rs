pub mod airline_controller;
pub mod airport_controller;
pub mod flight_controller;
pub mod turnaround_controller;

pub use airline_controller::AirlineController;
pub use airport_controller::AirportController;
pub use flight_controller::FlightController;
pub use turnaround_controller::TurnaroundController;
