//! Store PostgreSQL
//!
//! Las reglas de unicidad, claves foráneas y cascadas las impone el schema
//! (`migrations/`). Aquí solo se traducen las violaciones a `AppError` y se
//! ejecuta la escritura validada de turnarounds dentro de una transacción.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{PgConnection, PgPool};
use std::collections::HashMap;

use super::{AirlineRepository, AirportRepository, FlightRepository, TurnaroundRepository};
use crate::models::{
    Airline, Airport, Flight, NewAirline, NewAirport, NewFlight, NewTurnaround, Turnaround, TurnaroundDetail,
};
use crate::services::turnaround_validator::validate_turnaround;
use crate::utils::errors::{duplicate_error, missing_reference_error, AppError, AppResult};

/// Fecha UTC de `scheduled_start`, comparable con un `DATE`
const START_DATE: &str = "(scheduled_start AT TIME ZONE 'UTC')::date";

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Turnarounds (todos o los que empiezan en `date`) con sus dos vuelos,
    /// leídos en un mismo snapshot
    async fn load_details(&self, date: Option<NaiveDate>) -> AppResult<Vec<TurnaroundDetail>> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;

        let sql = match date {
            Some(_) => format!("SELECT * FROM turnarounds WHERE {} = $1 ORDER BY id", START_DATE),
            None => "SELECT * FROM turnarounds ORDER BY id".to_string(),
        };
        let mut query = sqlx::query_as::<_, Turnaround>(&sql);
        if let Some(date) = date {
            query = query.bind(date);
        }
        let turnarounds = query.fetch_all(&mut *tx).await?;
        if turnarounds.is_empty() {
            return Ok(Vec::new());
        }

        let flight_ids: Vec<i64> = turnarounds
            .iter()
            .flat_map(|t| [t.arrival_flight_id, t.departure_flight_id])
            .collect();
        let flights = sqlx::query_as::<_, Flight>("SELECT * FROM flights WHERE id = ANY($1)")
            .bind(&flight_ids)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;
        attach_flights(turnarounds, flights)
    }

    /// Crear (`id = None`) o reemplazar un turnaround validando en la misma transacción
    async fn write_turnaround(&self, id: Option<i64>, turnaround: NewTurnaround) -> AppResult<Option<Turnaround>> {
        let mut tx = self.pool.begin().await?;

        if let Some(id) = id {
            let exists = sqlx::query_as::<_, (i64,)>("SELECT id FROM turnarounds WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
            if exists.is_none() {
                return Ok(None);
            }
        }

        // FOR SHARE: nadie puede mover los vuelos ni el aeropuerto hasta el commit
        let arrival = lock_flight(&mut tx, turnaround.arrival_flight_id)
            .await?
            .ok_or_else(|| missing_reference_error("arrival_flight", turnaround.arrival_flight_id))?;
        let departure = lock_flight(&mut tx, turnaround.departure_flight_id)
            .await?
            .ok_or_else(|| missing_reference_error("departure_flight", turnaround.departure_flight_id))?;
        let airport = sqlx::query_as::<_, (i64,)>("SELECT id FROM airports WHERE id = $1 FOR SHARE")
            .bind(turnaround.airport_id)
            .fetch_optional(&mut *tx)
            .await?;
        if airport.is_none() {
            return Err(missing_reference_error("airport", turnaround.airport_id));
        }

        validate_turnaround(&arrival, &departure, turnaround.airport_id)?;

        let saved = match id {
            None => bind_turnaround(
                sqlx::query_as::<_, Turnaround>(
                    r#"
                    INSERT INTO turnarounds (
                        arrival_flight_id, departure_flight_id, airport_id,
                        scheduled_start, actual_start, scheduled_end, actual_end
                    )
                    VALUES ($1, $2, $3, $4, $5, $6, $7)
                    RETURNING *
                    "#,
                ),
                &turnaround,
            )
            .fetch_one(&mut *tx)
            .await,
            Some(id) => bind_turnaround(
                sqlx::query_as::<_, Turnaround>(
                    r#"
                    UPDATE turnarounds SET
                        arrival_flight_id = $1, departure_flight_id = $2, airport_id = $3,
                        scheduled_start = $4, actual_start = $5, scheduled_end = $6, actual_end = $7
                    WHERE id = $8
                    RETURNING *
                    "#,
                ),
                &turnaround,
            )
            .bind(id)
            .fetch_one(&mut *tx)
            .await,
        }
        .map_err(constraint_error)?;

        tx.commit().await?;
        Ok(Some(saved))
    }
}

async fn lock_flight(conn: &mut PgConnection, id: i64) -> AppResult<Option<Flight>> {
    Ok(sqlx::query_as::<_, Flight>("SELECT * FROM flights WHERE id = $1 FOR SHARE")
        .bind(id)
        .fetch_optional(conn)
        .await?)
}

type TurnaroundQuery<'q> = sqlx::query::QueryAs<'q, sqlx::Postgres, Turnaround, sqlx::postgres::PgArguments>;

fn bind_turnaround<'q>(query: TurnaroundQuery<'q>, turnaround: &NewTurnaround) -> TurnaroundQuery<'q> {
    query
        .bind(turnaround.arrival_flight_id)
        .bind(turnaround.departure_flight_id)
        .bind(turnaround.airport_id)
        .bind(turnaround.scheduled_start)
        .bind(turnaround.actual_start)
        .bind(turnaround.scheduled_end)
        .bind(turnaround.actual_end)
}

/// Unir cada turnaround con sus vuelos; un vuelo ausente es un error, nunca un hueco
fn attach_flights(turnarounds: Vec<Turnaround>, flights: Vec<Flight>) -> AppResult<Vec<TurnaroundDetail>> {
    let flights: HashMap<i64, Flight> = flights.into_iter().map(|f| (f.id, f)).collect();
    let flight = |id: i64| {
        flights
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::Internal(format!("Flight '{}' missing from turnaround snapshot", id)))
    };

    turnarounds
        .into_iter()
        .map(|turnaround| {
            Ok(TurnaroundDetail {
                arrival_flight: flight(turnaround.arrival_flight_id)?,
                departure_flight: flight(turnaround.departure_flight_id)?,
                turnaround,
            })
        })
        .collect()
}

/// Traducir violaciones de unicidad (23505) y de clave foránea (23503)
fn constraint_error(err: sqlx::Error) -> AppError {
    let violation = match &err {
        sqlx::Error::Database(db) => {
            let code = db.code();
            constraint_violation(code.as_deref(), db.constraint())
        }
        _ => None,
    };
    violation.unwrap_or(AppError::Database(err))
}

fn constraint_violation(code: Option<&str>, constraint: Option<&str>) -> Option<AppError> {
    let error = match (code?, constraint) {
        ("23505", Some("airlines_iata_code_key")) => duplicate_error("Airline", "iata_code"),
        ("23505", Some("airports_iata_code_key")) => duplicate_error("Airport", "iata_code"),
        ("23505", Some("flights_schedule_key")) => {
            duplicate_error("Flight", "flight_number, airline and scheduled_departure")
        }
        ("23505", Some("turnarounds_arrival_flight_id_key")) => duplicate_error("Turnaround", "arrival_flight"),
        ("23505", Some("turnarounds_departure_flight_id_key")) => duplicate_error("Turnaround", "departure_flight"),
        ("23505", _) => AppError::ConstraintViolation("Unique constraint violated".to_string()),
        ("23503", Some(name)) => AppError::ConstraintViolation(format!(
            "Invalid {}: object does not exist",
            foreign_key_field(name)
        )),
        ("23503", None) => AppError::ConstraintViolation("Referenced object does not exist".to_string()),
        _ => return None,
    };
    Some(error)
}

/// `flights_departure_airport_id_fkey` -> `departure_airport`
fn foreign_key_field(constraint: &str) -> &str {
    constraint
        .strip_suffix("_fkey")
        .map(|name| name.strip_suffix("_id").unwrap_or(name))
        .and_then(|name| name.split_once('_'))
        .map(|(_, field)| field)
        .unwrap_or(constraint)
}

#[async_trait]
impl AirlineRepository for PgStore {
    async fn create_airline(&self, airline: NewAirline) -> AppResult<Airline> {
        sqlx::query_as::<_, Airline>("INSERT INTO airlines (name, iata_code) VALUES ($1, $2) RETURNING *")
            .bind(&airline.name)
            .bind(&airline.iata_code)
            .fetch_one(&self.pool)
            .await
            .map_err(constraint_error)
    }

    async fn list_airlines(&self) -> AppResult<Vec<Airline>> {
        Ok(sqlx::query_as::<_, Airline>("SELECT * FROM airlines ORDER BY id")
            .fetch_all(&self.pool)
            .await?)
    }

    async fn find_airline(&self, id: i64) -> AppResult<Option<Airline>> {
        Ok(sqlx::query_as::<_, Airline>("SELECT * FROM airlines WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn update_airline(&self, id: i64, airline: NewAirline) -> AppResult<Option<Airline>> {
        sqlx::query_as::<_, Airline>("UPDATE airlines SET name = $1, iata_code = $2 WHERE id = $3 RETURNING *")
            .bind(&airline.name)
            .bind(&airline.iata_code)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(constraint_error)
    }

    async fn delete_airline(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM airlines WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl AirportRepository for PgStore {
    async fn create_airport(&self, airport: NewAirport) -> AppResult<Airport> {
        sqlx::query_as::<_, Airport>(
            r#"
            INSERT INTO airports (name, iata_code, city, country, latitude, longitude)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&airport.name)
        .bind(&airport.iata_code)
        .bind(&airport.city)
        .bind(&airport.country)
        .bind(airport.latitude)
        .bind(airport.longitude)
        .fetch_one(&self.pool)
        .await
        .map_err(constraint_error)
    }

    async fn list_airports(&self) -> AppResult<Vec<Airport>> {
        Ok(sqlx::query_as::<_, Airport>("SELECT * FROM airports ORDER BY id")
            .fetch_all(&self.pool)
            .await?)
    }

    async fn find_airport(&self, id: i64) -> AppResult<Option<Airport>> {
        Ok(sqlx::query_as::<_, Airport>("SELECT * FROM airports WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_airport_by_iata(&self, iata_code: &str) -> AppResult<Option<Airport>> {
        Ok(sqlx::query_as::<_, Airport>("SELECT * FROM airports WHERE iata_code = $1")
            .bind(iata_code)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn update_airport(&self, id: i64, airport: NewAirport) -> AppResult<Option<Airport>> {
        sqlx::query_as::<_, Airport>(
            r#"
            UPDATE airports SET
                name = $1, iata_code = $2, city = $3, country = $4, latitude = $5, longitude = $6
            WHERE id = $7
            RETURNING *
            "#,
        )
        .bind(&airport.name)
        .bind(&airport.iata_code)
        .bind(&airport.city)
        .bind(&airport.country)
        .bind(airport.latitude)
        .bind(airport.longitude)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(constraint_error)
    }

    async fn delete_airport(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM airports WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_airports_with_turnarounds_on(&self, date: NaiveDate) -> AppResult<Vec<Airport>> {
        let sql = format!(
            r#"
            SELECT ap.* FROM airports ap
            WHERE EXISTS (
                SELECT 1 FROM turnarounds
                WHERE turnarounds.airport_id = ap.id AND {} = $1
            )
            ORDER BY ap.iata_code
            "#,
            START_DATE
        );
        Ok(sqlx::query_as::<_, Airport>(&sql)
            .bind(date)
            .fetch_all(&self.pool)
            .await?)
    }
}

#[async_trait]
impl FlightRepository for PgStore {
    async fn create_flight(&self, flight: NewFlight) -> AppResult<Flight> {
        sqlx::query_as::<_, Flight>(
            r#"
            INSERT INTO flights (
                flight_number, airline_id, departure_airport_id, arrival_airport_id,
                scheduled_departure, actual_departure, scheduled_arrival, actual_arrival
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&flight.flight_number)
        .bind(flight.airline_id)
        .bind(flight.departure_airport_id)
        .bind(flight.arrival_airport_id)
        .bind(flight.scheduled_departure)
        .bind(flight.actual_departure)
        .bind(flight.scheduled_arrival)
        .bind(flight.actual_arrival)
        .fetch_one(&self.pool)
        .await
        .map_err(constraint_error)
    }

    async fn list_flights(&self) -> AppResult<Vec<Flight>> {
        Ok(sqlx::query_as::<_, Flight>("SELECT * FROM flights ORDER BY id")
            .fetch_all(&self.pool)
            .await?)
    }

    async fn find_flight(&self, id: i64) -> AppResult<Option<Flight>> {
        Ok(sqlx::query_as::<_, Flight>("SELECT * FROM flights WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn update_flight(&self, id: i64, flight: NewFlight) -> AppResult<Option<Flight>> {
        sqlx::query_as::<_, Flight>(
            r#"
            UPDATE flights SET
                flight_number = $1, airline_id = $2, departure_airport_id = $3, arrival_airport_id = $4,
                scheduled_departure = $5, actual_departure = $6, scheduled_arrival = $7, actual_arrival = $8
            WHERE id = $9
            RETURNING *
            "#,
        )
        .bind(&flight.flight_number)
        .bind(flight.airline_id)
        .bind(flight.departure_airport_id)
        .bind(flight.arrival_airport_id)
        .bind(flight.scheduled_departure)
        .bind(flight.actual_departure)
        .bind(flight.scheduled_arrival)
        .bind(flight.actual_arrival)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(constraint_error)
    }

    async fn delete_flight(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM flights WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl TurnaroundRepository for PgStore {
    async fn create_turnaround(&self, turnaround: NewTurnaround) -> AppResult<Turnaround> {
        self.write_turnaround(None, turnaround)
            .await?
            .ok_or_else(|| AppError::Internal("Turnaround insert returned no row".to_string()))
    }

    async fn list_turnarounds(&self) -> AppResult<Vec<Turnaround>> {
        Ok(sqlx::query_as::<_, Turnaround>("SELECT * FROM turnarounds ORDER BY id")
            .fetch_all(&self.pool)
            .await?)
    }

    async fn find_turnaround(&self, id: i64) -> AppResult<Option<Turnaround>> {
        Ok(sqlx::query_as::<_, Turnaround>("SELECT * FROM turnarounds WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn update_turnaround(&self, id: i64, turnaround: NewTurnaround) -> AppResult<Option<Turnaround>> {
        self.write_turnaround(Some(id), turnaround).await
    }

    async fn delete_turnaround(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM turnarounds WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_turnarounds_by_start_date_and_airport(
        &self,
        date: NaiveDate,
        airport_id: i64,
    ) -> AppResult<Vec<Turnaround>> {
        let sql = format!(
            "SELECT * FROM turnarounds WHERE {} = $1 AND airport_id = $2 ORDER BY id",
            START_DATE
        );
        Ok(sqlx::query_as::<_, Turnaround>(&sql)
            .bind(date)
            .bind(airport_id)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn list_turnaround_details(&self) -> AppResult<Vec<TurnaroundDetail>> {
        self.load_details(None).await
    }

    async fn list_turnaround_details_by_start_date(&self, date: NaiveDate) -> AppResult<Vec<TurnaroundDetail>> {
        self.load_details(Some(date)).await
    }

    async fn list_turnaround_start_dates(&self) -> AppResult<Vec<NaiveDate>> {
        let sql = format!("SELECT DISTINCT {} AS start_date FROM turnarounds ORDER BY 1", START_DATE);
        let rows = sqlx::query_as::<_, (NaiveDate,)>(&sql).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(|(date,)| date).collect())
    }
}
