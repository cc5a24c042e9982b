//! Store en memoria
//!
//! Reproduce las reglas del schema PostgreSQL (unicidad, claves foráneas,
//! cascadas) sobre tablas `BTreeMap` protegidas por un único `RwLock`.
//! Cada escritura toma el lock de escritura completo, así que la validación
//! de un turnaround y su inserción no se intercalan con otra escritura.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};
use tokio::sync::RwLock;

use super::{AirlineRepository, AirportRepository, FlightRepository, TurnaroundRepository};
use crate::models::{
    Airline, Airport, Flight, NewAirline, NewAirport, NewFlight, NewTurnaround, Turnaround, TurnaroundDetail,
};
use crate::services::turnaround_validator::validate_turnaround;
use crate::utils::errors::{duplicate_error, missing_reference_error, AppResult};

#[derive(Debug, Default)]
struct Tables {
    airlines: BTreeMap<i64, Airline>,
    airports: BTreeMap<i64, Airport>,
    flights: BTreeMap<i64, Flight>,
    turnarounds: BTreeMap<i64, Turnaround>,
    airline_seq: i64,
    airport_seq: i64,
    flight_seq: i64,
    turnaround_seq: i64,
}

fn next_id(seq: &mut i64) -> i64 {
    *seq += 1;
    *seq
}

impl Tables {
    fn check_airline(&self, airline: &NewAirline, exclude: Option<i64>) -> AppResult<()> {
        let taken = self
            .airlines
            .values()
            .any(|a| Some(a.id) != exclude && a.iata_code == airline.iata_code);
        if taken {
            return Err(duplicate_error("Airline", "iata_code"));
        }
        Ok(())
    }

    fn check_airport(&self, airport: &NewAirport, exclude: Option<i64>) -> AppResult<()> {
        let taken = self
            .airports
            .values()
            .any(|a| Some(a.id) != exclude && a.iata_code == airport.iata_code);
        if taken {
            return Err(duplicate_error("Airport", "iata_code"));
        }
        Ok(())
    }

    fn check_flight(&self, flight: &NewFlight, exclude: Option<i64>) -> AppResult<()> {
        if !self.airlines.contains_key(&flight.airline_id) {
            return Err(missing_reference_error("airline", flight.airline_id));
        }
        if !self.airports.contains_key(&flight.departure_airport_id) {
            return Err(missing_reference_error("departure_airport", flight.departure_airport_id));
        }
        if !self.airports.contains_key(&flight.arrival_airport_id) {
            return Err(missing_reference_error("arrival_airport", flight.arrival_airport_id));
        }

        let taken = self
            .flights
            .values()
            .any(|f| Some(f.id) != exclude && flight.same_schedule_key(f));
        if taken {
            return Err(duplicate_error("Flight", "flight_number, airline and scheduled_departure"));
        }
        Ok(())
    }

    fn check_turnaround(&self, turnaround: &NewTurnaround, exclude: Option<i64>) -> AppResult<()> {
        let arrival = self
            .flights
            .get(&turnaround.arrival_flight_id)
            .ok_or_else(|| missing_reference_error("arrival_flight", turnaround.arrival_flight_id))?;
        let departure = self
            .flights
            .get(&turnaround.departure_flight_id)
            .ok_or_else(|| missing_reference_error("departure_flight", turnaround.departure_flight_id))?;
        if !self.airports.contains_key(&turnaround.airport_id) {
            return Err(missing_reference_error("airport", turnaround.airport_id));
        }

        validate_turnaround(arrival, departure, turnaround.airport_id)?;

        for other in self.turnarounds.values().filter(|t| Some(t.id) != exclude) {
            if other.arrival_flight_id == turnaround.arrival_flight_id {
                return Err(duplicate_error("Turnaround", "arrival_flight"));
            }
            if other.departure_flight_id == turnaround.departure_flight_id {
                return Err(duplicate_error("Turnaround", "departure_flight"));
            }
        }
        Ok(())
    }

    fn remove_flight(&mut self, id: i64) -> bool {
        self.turnarounds
            .retain(|_, t| t.arrival_flight_id != id && t.departure_flight_id != id);
        self.flights.remove(&id).is_some()
    }

    fn remove_flights_where<P>(&mut self, predicate: P)
    where
        P: Fn(&Flight) -> bool,
    {
        let doomed: Vec<i64> = self.flights.values().filter(|f| predicate(f)).map(|f| f.id).collect();
        for flight_id in doomed {
            self.remove_flight(flight_id);
        }
    }

    fn detail(&self, turnaround: &Turnaround) -> Option<TurnaroundDetail> {
        Some(TurnaroundDetail {
            turnaround: turnaround.clone(),
            arrival_flight: self.flights.get(&turnaround.arrival_flight_id)?.clone(),
            departure_flight: self.flights.get(&turnaround.departure_flight_id)?.clone(),
        })
    }
}

/// Store en memoria con las mismas garantías que `PgStore`
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AirlineRepository for MemoryStore {
    async fn create_airline(&self, airline: NewAirline) -> AppResult<Airline> {
        let mut tables = self.tables.write().await;
        tables.check_airline(&airline, None)?;

        let record = Airline {
            id: next_id(&mut tables.airline_seq),
            name: airline.name,
            iata_code: airline.iata_code,
        };
        tables.airlines.insert(record.id, record.clone());
        Ok(record)
    }

    async fn list_airlines(&self) -> AppResult<Vec<Airline>> {
        Ok(self.tables.read().await.airlines.values().cloned().collect())
    }

    async fn find_airline(&self, id: i64) -> AppResult<Option<Airline>> {
        Ok(self.tables.read().await.airlines.get(&id).cloned())
    }

    async fn update_airline(&self, id: i64, airline: NewAirline) -> AppResult<Option<Airline>> {
        let mut tables = self.tables.write().await;
        if !tables.airlines.contains_key(&id) {
            return Ok(None);
        }
        tables.check_airline(&airline, Some(id))?;

        let record = Airline {
            id,
            name: airline.name,
            iata_code: airline.iata_code,
        };
        tables.airlines.insert(id, record.clone());
        Ok(Some(record))
    }

    async fn delete_airline(&self, id: i64) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        if !tables.airlines.contains_key(&id) {
            return Ok(false);
        }
        tables.remove_flights_where(|f| f.airline_id == id);
        tables.airlines.remove(&id);
        Ok(true)
    }
}

#[async_trait]
impl AirportRepository for MemoryStore {
    async fn create_airport(&self, airport: NewAirport) -> AppResult<Airport> {
        let mut tables = self.tables.write().await;
        tables.check_airport(&airport, None)?;

        let record = Airport {
            id: next_id(&mut tables.airport_seq),
            name: airport.name,
            iata_code: airport.iata_code,
            city: airport.city,
            country: airport.country,
            latitude: airport.latitude,
            longitude: airport.longitude,
        };
        tables.airports.insert(record.id, record.clone());
        Ok(record)
    }

    async fn list_airports(&self) -> AppResult<Vec<Airport>> {
        Ok(self.tables.read().await.airports.values().cloned().collect())
    }

    async fn find_airport(&self, id: i64) -> AppResult<Option<Airport>> {
        Ok(self.tables.read().await.airports.get(&id).cloned())
    }

    async fn find_airport_by_iata(&self, iata_code: &str) -> AppResult<Option<Airport>> {
        let tables = self.tables.read().await;
        Ok(tables.airports.values().find(|a| a.iata_code == iata_code).cloned())
    }

    async fn update_airport(&self, id: i64, airport: NewAirport) -> AppResult<Option<Airport>> {
        let mut tables = self.tables.write().await;
        if !tables.airports.contains_key(&id) {
            return Ok(None);
        }
        tables.check_airport(&airport, Some(id))?;

        let record = Airport {
            id,
            name: airport.name,
            iata_code: airport.iata_code,
            city: airport.city,
            country: airport.country,
            latitude: airport.latitude,
            longitude: airport.longitude,
        };
        tables.airports.insert(id, record.clone());
        Ok(Some(record))
    }

    async fn delete_airport(&self, id: i64) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        if !tables.airports.contains_key(&id) {
            return Ok(false);
        }
        tables.turnarounds.retain(|_, t| t.airport_id != id);
        tables.remove_flights_where(|f| f.departure_airport_id == id || f.arrival_airport_id == id);
        tables.airports.remove(&id);
        Ok(true)
    }

    async fn list_airports_with_turnarounds_on(&self, date: NaiveDate) -> AppResult<Vec<Airport>> {
        let tables = self.tables.read().await;
        let airport_ids: BTreeSet<i64> = tables
            .turnarounds
            .values()
            .filter(|t| t.scheduled_start.date_naive() == date)
            .map(|t| t.airport_id)
            .collect();

        let mut airports: Vec<Airport> = airport_ids
            .iter()
            .filter_map(|id| tables.airports.get(id).cloned())
            .collect();
        airports.sort_by(|a, b| a.iata_code.cmp(&b.iata_code));
        Ok(airports)
    }
}

#[async_trait]
impl FlightRepository for MemoryStore {
    async fn create_flight(&self, flight: NewFlight) -> AppResult<Flight> {
        let mut tables = self.tables.write().await;
        tables.check_flight(&flight, None)?;

        let record = Flight {
            id: next_id(&mut tables.flight_seq),
            flight_number: flight.flight_number,
            airline_id: flight.airline_id,
            departure_airport_id: flight.departure_airport_id,
            arrival_airport_id: flight.arrival_airport_id,
            scheduled_departure: flight.scheduled_departure,
            actual_departure: flight.actual_departure,
            scheduled_arrival: flight.scheduled_arrival,
            actual_arrival: flight.actual_arrival,
        };
        tables.flights.insert(record.id, record.clone());
        Ok(record)
    }

    async fn list_flights(&self) -> AppResult<Vec<Flight>> {
        Ok(self.tables.read().await.flights.values().cloned().collect())
    }

    async fn find_flight(&self, id: i64) -> AppResult<Option<Flight>> {
        Ok(self.tables.read().await.flights.get(&id).cloned())
    }

    async fn update_flight(&self, id: i64, flight: NewFlight) -> AppResult<Option<Flight>> {
        let mut tables = self.tables.write().await;
        if !tables.flights.contains_key(&id) {
            return Ok(None);
        }
        tables.check_flight(&flight, Some(id))?;

        let record = Flight {
            id,
            flight_number: flight.flight_number,
            airline_id: flight.airline_id,
            departure_airport_id: flight.departure_airport_id,
            arrival_airport_id: flight.arrival_airport_id,
            scheduled_departure: flight.scheduled_departure,
            actual_departure: flight.actual_departure,
            scheduled_arrival: flight.scheduled_arrival,
            actual_arrival: flight.actual_arrival,
        };
        tables.flights.insert(id, record.clone());
        Ok(Some(record))
    }

    async fn delete_flight(&self, id: i64) -> AppResult<bool> {
        Ok(self.tables.write().await.remove_flight(id))
    }
}

#[async_trait]
impl TurnaroundRepository for MemoryStore {
    async fn create_turnaround(&self, turnaround: NewTurnaround) -> AppResult<Turnaround> {
        let mut tables = self.tables.write().await;
        tables.check_turnaround(&turnaround, None)?;

        let record = Turnaround {
            id: next_id(&mut tables.turnaround_seq),
            arrival_flight_id: turnaround.arrival_flight_id,
            departure_flight_id: turnaround.departure_flight_id,
            airport_id: turnaround.airport_id,
            scheduled_start: turnaround.scheduled_start,
            actual_start: turnaround.actual_start,
            scheduled_end: turnaround.scheduled_end,
            actual_end: turnaround.actual_end,
        };
        tables.turnarounds.insert(record.id, record.clone());
        Ok(record)
    }

    async fn list_turnarounds(&self) -> AppResult<Vec<Turnaround>> {
        Ok(self.tables.read().await.turnarounds.values().cloned().collect())
    }

    async fn find_turnaround(&self, id: i64) -> AppResult<Option<Turnaround>> {
        Ok(self.tables.read().await.turnarounds.get(&id).cloned())
    }

    async fn update_turnaround(&self, id: i64, turnaround: NewTurnaround) -> AppResult<Option<Turnaround>> {
        let mut tables = self.tables.write().await;
        if !tables.turnarounds.contains_key(&id) {
            return Ok(None);
        }
        tables.check_turnaround(&turnaround, Some(id))?;

        let record = Turnaround {
            id,
            arrival_flight_id: turnaround.arrival_flight_id,
            departure_flight_id: turnaround.departure_flight_id,
            airport_id: turnaround.airport_id,
            scheduled_start: turnaround.scheduled_start,
            actual_start: turnaround.actual_start,
            scheduled_end: turnaround.scheduled_end,
            actual_end: turnaround.actual_end,
        };
        tables.turnarounds.insert(id, record.clone());
        Ok(Some(record))
    }

    async fn delete_turnaround(&self, id: i64) -> AppResult<bool> {
        Ok(self.tables.write().await.turnarounds.remove(&id).is_some())
    }

    async fn list_turnarounds_by_start_date_and_airport(
        &self,
        date: NaiveDate,
        airport_id: i64,
    ) -> AppResult<Vec<Turnaround>> {
        let tables = self.tables.read().await;
        Ok(tables
            .turnarounds
            .values()
            .filter(|t| t.airport_id == airport_id && t.scheduled_start.date_naive() == date)
            .cloned()
            .collect())
    }

    async fn list_turnaround_details(&self) -> AppResult<Vec<TurnaroundDetail>> {
        let tables = self.tables.read().await;
        Ok(tables.turnarounds.values().filter_map(|t| tables.detail(t)).collect())
    }

    async fn list_turnaround_details_by_start_date(&self, date: NaiveDate) -> AppResult<Vec<TurnaroundDetail>> {
        let tables = self.tables.read().await;
        Ok(tables
            .turnarounds
            .values()
            .filter(|t| t.scheduled_start.date_naive() == date)
            .filter_map(|t| tables.detail(t))
            .collect())
    }

    async fn list_turnaround_start_dates(&self) -> AppResult<Vec<NaiveDate>> {
        let tables = self.tables.read().await;
        let dates: BTreeSet<NaiveDate> = tables
            .turnarounds
            .values()
            .map(|t| t.scheduled_start.date_naive())
            .collect();
        Ok(dates.into_iter().collect())
    }
}
