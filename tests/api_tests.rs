mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{create_test_app, seed_scenario, sign_token, turnaround_body, JWT_SECRET};

#[tokio::test]
async fn test_health_check_is_public() {
    let app = create_test_app();
    let response = app.request(Method::GET, "/health", None, None).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "agoa-backend");
}

#[tokio::test]
async fn test_api_requires_valid_token() {
    let app = create_test_app();

    let missing = app.request(Method::GET, "/api/airlines", None, None).await;
    assert_eq!(missing.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(missing.json()["code"], "UNAUTHORIZED");

    let wrong_secret = sign_token("another-secret", 3600);
    let forged = app
        .request(Method::GET, "/api/airlines", None, Some(&wrong_secret))
        .await;
    assert_eq!(forged.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(forged.json()["code"], "JWT_ERROR");

    let expired = sign_token(JWT_SECRET, -3600);
    let response = app.request(Method::GET, "/api/airlines", None, Some(&expired)).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_airline_crud() {
    let app = create_test_app();

    let created = app
        .post("/api/airlines", json!({ "name": "Air France", "iata_code": "AF" }))
        .await;
    assert_eq!(created.status_code(), StatusCode::CREATED);
    let id = created.json()["id"].as_i64().unwrap();
    assert_eq!(created.json(), json!({ "id": id, "name": "Air France", "iata_code": "AF" }));

    let listed = app.get("/api/airlines").await;
    assert_eq!(listed.json().as_array().unwrap().len(), 1);

    let updated = app
        .put(
            &format!("/api/airlines/{}", id),
            json!({ "name": "Air France KLM", "iata_code": "AF" }),
        )
        .await;
    assert_eq!(updated.status_code(), StatusCode::OK);
    assert_eq!(updated.json()["name"], "Air France KLM");

    let deleted = app.delete(&format!("/api/airlines/{}", id)).await;
    assert_eq!(deleted.status_code(), StatusCode::NO_CONTENT);

    let gone = app.get(&format!("/api/airlines/{}", id)).await;
    assert_eq!(gone.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(gone.json()["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_missing_ids_are_not_found() {
    let app = create_test_app();

    for uri in ["/api/airlines/99", "/api/airports/99", "/api/flights/99", "/api/turnarounds/99"] {
        assert_eq!(app.get(uri).await.status_code(), StatusCode::NOT_FOUND, "GET {}", uri);
        assert_eq!(app.delete(uri).await.status_code(), StatusCode::NOT_FOUND, "DELETE {}", uri);
    }

    let update = app
        .put("/api/airlines/99", json!({ "name": "Ghost", "iata_code": "GH" }))
        .await;
    assert_eq!(update.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_body_validation() {
    let app = create_test_app();

    let bad_airline = app
        .post("/api/airlines", json!({ "name": "Lowercase", "iata_code": "af" }))
        .await;
    assert_eq!(bad_airline.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(bad_airline.json()["code"], "VALIDATION_ERROR");
    assert!(bad_airline.json()["details"]["iata_code"].is_array());

    let bad_airport = app
        .post(
            "/api/airports",
            json!({
                "name": "Nowhere",
                "iata_code": "NWH",
                "city": "Nowhere",
                "country": "Nowhere",
                "latitude": 123.0,
            }),
        )
        .await;
    assert_eq!(bad_airport.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(bad_airport.json()["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_uniqueness_and_references() {
    let app = create_test_app();
    let airline = app.create_airline("Test Airline", "TA").await;
    let cdg = app.create_airport("CDG", "Paris").await;
    let jfk = app.create_airport("JFK", "New York").await;

    let duplicate_airline = app
        .post("/api/airlines", json!({ "name": "Copycat", "iata_code": "TA" }))
        .await;
    assert_eq!(duplicate_airline.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(duplicate_airline.json()["code"], "CONSTRAINT_VIOLATION");

    let flight = json!({
        "flight_number": "TA123",
        "airline": airline,
        "departure_airport": cdg,
        "arrival_airport": jfk,
        "scheduled_departure": "2024-01-01T08:00:00Z",
        "scheduled_arrival": "2024-01-01T16:00:00Z",
    });
    assert_eq!(app.post("/api/flights", flight.clone()).await.status_code(), StatusCode::CREATED);

    let duplicate_flight = app.post("/api/flights", flight.clone()).await;
    assert_eq!(duplicate_flight.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(duplicate_flight.json()["code"], "CONSTRAINT_VIOLATION");

    let mut orphan = flight;
    orphan["airline"] = json!(999);
    orphan["scheduled_departure"] = json!("2024-01-02T08:00:00Z");
    let orphan = app.post("/api/flights", orphan).await;
    assert_eq!(orphan.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(orphan.json()["code"], "CONSTRAINT_VIOLATION");
}

#[tokio::test]
async fn test_turnaround_representation() {
    let app = create_test_app();
    let s = seed_scenario(&app).await;

    let response = app.get(&format!("/api/turnarounds/{}", s.turnaround)).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json(),
        json!({
            "id": s.turnaround,
            "arrival_flight": s.ta123,
            "departure_flight": s.ta124,
            "airport": s.jfk,
            "scheduled_start": "2024-01-01T16:10:00Z",
            "actual_start": null,
            "scheduled_end": "2024-01-01T18:00:00Z",
            "actual_end": null,
        })
    );

    let flight = app.get(&format!("/api/flights/{}", s.ta123)).await.json();
    assert_eq!(flight["airline"], s.airline);
    assert_eq!(flight["departure_airport"], s.cdg);
    assert_eq!(flight["arrival_airport"], s.jfk);
}

#[tokio::test]
async fn test_turnaround_rejected_when_flights_miss_the_airport() {
    let app = create_test_app();
    let s = seed_scenario(&app).await;
    let ta125 = app
        .create_flight("TA125", s.airline, s.cdg, s.jfk, "2024-01-03T08:00:00Z", "2024-01-03T16:00:00Z")
        .await;

    // TA125 llega a JFK y despega de CDG: no puede ser la salida de un turnaround en JFK
    let same_flight = app
        .post(
            "/api/turnarounds",
            turnaround_body(ta125, ta125, s.jfk, "2024-01-03T16:10:00Z", "2024-01-03T18:00:00Z"),
        )
        .await;
    assert_eq!(same_flight.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(same_flight.json()["code"], "CONSISTENCY_VIOLATION");
    assert_eq!(
        same_flight.json()["error"],
        "Flights must arrive and depart from the same airport as the turnaround"
    );

    let wrong_airport = app
        .put(
            &format!("/api/turnarounds/{}", s.turnaround),
            turnaround_body(s.ta123, s.ta124, s.cdg, "2024-01-01T16:10:00Z", "2024-01-01T18:00:00Z"),
        )
        .await;
    assert_eq!(wrong_airport.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(wrong_airport.json()["code"], "CONSISTENCY_VIOLATION");

    let stored = app.get(&format!("/api/turnarounds/{}", s.turnaround)).await.json();
    assert_eq!(stored["airport"], s.jfk);
    assert_eq!(app.get("/api/turnarounds").await.json().as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_flight_belongs_to_one_turnaround_per_side() {
    let app = create_test_app();
    let s = seed_scenario(&app).await;
    let ta126 = app
        .create_flight("TA126", s.airline, s.jfk, s.cdg, "2024-01-01T21:00:00Z", "2024-01-02T05:00:00Z")
        .await;

    let reused_arrival = app
        .post(
            "/api/turnarounds",
            turnaround_body(s.ta123, ta126, s.jfk, "2024-01-01T16:30:00Z", "2024-01-01T20:30:00Z"),
        )
        .await;
    assert_eq!(reused_arrival.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(reused_arrival.json()["code"], "CONSTRAINT_VIOLATION");

    // Actualizar el propio turnaround sin cambiar sus vuelos no choca consigo mismo
    let rescheduled = app
        .put(
            &format!("/api/turnarounds/{}", s.turnaround),
            turnaround_body(s.ta123, s.ta124, s.jfk, "2024-01-01T16:20:00Z", "2024-01-01T18:10:00Z"),
        )
        .await;
    assert_eq!(rescheduled.status_code(), StatusCode::OK);
    assert_eq!(rescheduled.json()["scheduled_start"], "2024-01-01T16:20:00Z");
}

#[tokio::test]
async fn test_turnaround_references_must_exist() {
    let app = create_test_app();
    let s = seed_scenario(&app).await;

    for (body, field) in [
        (
            turnaround_body(999, s.ta124, s.jfk, "2024-01-01T16:10:00Z", "2024-01-01T18:00:00Z"),
            "arrival_flight",
        ),
        (
            turnaround_body(s.ta123, 0, s.jfk, "2024-01-01T16:10:00Z", "2024-01-01T18:00:00Z"),
            "departure_flight",
        ),
        (
            turnaround_body(s.ta123, s.ta124, -1, "2024-01-01T16:10:00Z", "2024-01-01T18:00:00Z"),
            "airport",
        ),
    ] {
        let response = app
            .put(&format!("/api/turnarounds/{}", s.turnaround), body)
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "{}", field);
        assert_eq!(response.json()["code"], "CONSTRAINT_VIOLATION", "{}", field);
        let message = response.json()["error"].as_str().unwrap().to_string();
        assert!(message.starts_with(&format!("Invalid {} ", field)), "{}", message);
    }

    let stored = app.get(&format!("/api/turnarounds/{}", s.turnaround)).await.json();
    assert_eq!(stored["arrival_flight"], s.ta123);
    assert_eq!(stored["airport"], s.jfk);
}

#[tokio::test]
async fn test_by_date_and_airport() {
    let app = create_test_app();
    let s = seed_scenario(&app).await;

    let at_jfk = app.get("/api/turnarounds/by_date_and_airport?date=2024-01-01&airport=JFK").await;
    assert_eq!(at_jfk.status_code(), StatusCode::OK);
    let records = at_jfk.json();
    assert_eq!(records.as_array().unwrap().len(), 1);
    assert_eq!(records[0]["id"], s.turnaround);

    let at_cdg = app.get("/api/turnarounds/by_date_and_airport?date=2024-01-01&airport=CDG").await;
    assert_eq!(at_cdg.status_code(), StatusCode::OK);
    assert!(at_cdg.json().as_array().unwrap().is_empty());

    let alias = app
        .get("/api/turnarounds/by_date_and_airport?date=2024-01-01&airport_code=JFK")
        .await;
    assert_eq!(alias.json().as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_by_date_and_airport_bad_requests() {
    let app = create_test_app();
    seed_scenario(&app).await;

    for uri in [
        "/api/turnarounds/by_date_and_airport",
        "/api/turnarounds/by_date_and_airport?date=2024-01-01",
        "/api/turnarounds/by_date_and_airport?airport=JFK",
        "/api/turnarounds/by_date_and_airport?date=01/01/2024&airport=JFK",
        "/api/turnarounds/by_date_and_airport?date=2024-01-01&airport=ZZZ",
    ] {
        let response = app.get(uri).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(response.json()["code"], "BAD_REQUEST", "{}", uri);
    }
}

#[tokio::test]
async fn test_trailing_slash_urls() {
    let app = create_test_app();
    let s = seed_scenario(&app).await;

    for uri in [
        "/api/airlines/",
        "/api/airlines/turnaround_stats/",
        "/api/airports/available_airports/?date=2024-01-01",
        "/api/turnarounds/available_dates/",
        "/api/turnarounds/average_duration/?date=2024-01-01",
    ] {
        let response = app.get(uri).await;
        assert_eq!(response.status_code(), StatusCode::OK, "{}", uri);
        let bare = app.get(&uri.replacen("/?", "?", 1).trim_end_matches('/').to_string()).await;
        assert_eq!(response.json(), bare.json(), "{}", uri);
    }

    let at_jfk = app
        .get("/api/turnarounds/by_date_and_airport/?date=2024-01-01&airport_code=JFK")
        .await;
    assert_eq!(at_jfk.status_code(), StatusCode::OK);
    assert_eq!(at_jfk.json()[0]["id"], s.turnaround);

    let detail = app.get(&format!("/api/turnarounds/{}/", s.turnaround)).await;
    assert_eq!(detail.status_code(), StatusCode::OK);
    assert_eq!(detail.json()["airport"], s.jfk);

    let created = app
        .post("/api/airlines/", json!({ "name": "Slash Air", "iata_code": "SL" }))
        .await;
    assert_eq!(created.status_code(), StatusCode::CREATED);

    let anonymous = app
        .request(Method::GET, "/api/turnarounds/available_dates/", None, None)
        .await;
    assert_eq!(anonymous.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_average_duration() {
    let app = create_test_app();
    seed_scenario(&app).await;

    let response = app.get("/api/turnarounds/average_duration?date=2024-01-01").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    // TA124 despega a las 18:30, TA123 despegó a las 08:00
    assert_eq!(
        response.json(),
        json!({ "date": "2024-01-01", "average_duration_minutes": 630.0 })
    );

    let empty_day = app.get("/api/turnarounds/average_duration?date=2024-02-01").await;
    assert_eq!(empty_day.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(empty_day.json()["error"], "No turnarounds found for this date");

    let missing = app.get("/api/turnarounds/average_duration").await;
    assert_eq!(missing.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(missing.json()["error"], "Date parameter is required");

    let malformed = app.get("/api/turnarounds/average_duration?date=2024-1-1x").await;
    assert_eq!(malformed.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_average_duration_keeps_fractional_seconds() {
    let app = create_test_app();
    let s = seed_scenario(&app).await;
    let ta201 = app
        .create_flight("TA201", s.airline, s.cdg, s.jfk, "2024-01-05T08:00:00.000900Z", "2024-01-05T16:00:00Z")
        .await;
    let ta202 = app
        .create_flight("TA202", s.airline, s.jfk, s.cdg, "2024-01-05T18:00:00Z", "2024-01-06T02:00:00Z")
        .await;
    app.create(
        "/api/turnarounds",
        turnaround_body(ta201, ta202, s.jfk, "2024-01-05T16:10:00Z", "2024-01-05T17:40:00Z"),
    )
    .await;

    let response = app.get("/api/turnarounds/average_duration?date=2024-01-05").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let minutes = response.json()["average_duration_minutes"].as_f64().unwrap();
    assert!((minutes - 599.999985).abs() < 1e-9, "got {}", minutes);
}

#[tokio::test]
async fn test_average_duration_uses_difference_of_means() {
    let app = create_test_app();
    let airline = app.create_airline("Test Airline", "TA").await;
    let cdg = app.create_airport("CDG", "Paris").await;
    let jfk = app.create_airport("JFK", "New York").await;

    let in1 = app
        .create_flight("TA1", airline, cdg, jfk, "2024-03-01T06:00:00Z", "2024-03-01T07:00:00Z")
        .await;
    let out1 = app
        .create_flight("TA2", airline, jfk, cdg, "2024-03-01T09:00:00Z", "2024-03-01T10:00:00Z")
        .await;
    let in2 = app
        .create_flight("TA3", airline, cdg, jfk, "2024-03-01T10:00:00Z", "2024-03-01T10:20:00Z")
        .await;
    let out2 = app
        .create_flight("TA4", airline, jfk, cdg, "2024-03-01T11:00:00Z", "2024-03-01T12:00:00Z")
        .await;

    app.create(
        "/api/turnarounds",
        turnaround_body(in1, out1, jfk, "2024-03-01T07:10:00Z", "2024-03-01T08:50:00Z"),
    )
    .await;
    app.create(
        "/api/turnarounds",
        turnaround_body(in2, out2, jfk, "2024-03-01T10:30:00Z", "2024-03-01T10:55:00Z"),
    )
    .await;

    let response = app.get("/api/turnarounds/average_duration?date=2024-03-01").await;
    assert_eq!(response.json()["average_duration_minutes"], 120.0);
}

#[tokio::test]
async fn test_turnaround_stats_by_airline() {
    let app = create_test_app();
    seed_scenario(&app).await;
    app.create_airline("Idle Air", "IA").await;

    let response = app.get("/api/airlines/turnaround_stats").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let stats = response.json();
    let stats = stats.as_array().unwrap();
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0]["airline"], "Test Airline");
    let hours = stats[0]["average_duration"].as_f64().unwrap();
    assert!((hours - 110.0 / 60.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_available_dates_and_airports() {
    let app = create_test_app();
    let s = seed_scenario(&app).await;
    let ta127 = app
        .create_flight("TA127", s.airline, s.jfk, s.cdg, "2023-12-30T20:00:00Z", "2023-12-31T04:00:00Z")
        .await;
    let ta128 = app
        .create_flight("TA128", s.airline, s.cdg, s.jfk, "2023-12-31T08:00:00Z", "2023-12-31T16:00:00Z")
        .await;
    app.create(
        "/api/turnarounds",
        turnaround_body(ta127, ta128, s.cdg, "2023-12-31T05:00:00Z", "2023-12-31T07:00:00Z"),
    )
    .await;

    let dates = app.get("/api/turnarounds/available_dates").await;
    assert_eq!(dates.status_code(), StatusCode::OK);
    assert_eq!(dates.json(), json!(["2023-12-31", "2024-01-01"]));

    let airports = app.get("/api/airports/available_airports?date=2024-01-01").await;
    assert_eq!(airports.status_code(), StatusCode::OK);
    let airports = airports.json();
    assert_eq!(airports.as_array().unwrap().len(), 1);
    assert_eq!(airports[0]["iata_code"], "JFK");

    let missing = app.get("/api/airports/available_airports").await;
    assert_eq!(missing.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cascading_deletes() {
    let app = create_test_app();
    let s = seed_scenario(&app).await;

    let deleted = app.delete(&format!("/api/flights/{}", s.ta124)).await;
    assert_eq!(deleted.status_code(), StatusCode::NO_CONTENT);
    assert_eq!(
        app.get(&format!("/api/turnarounds/{}", s.turnaround)).await.status_code(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        app.get(&format!("/api/flights/{}", s.ta123)).await.status_code(),
        StatusCode::OK
    );

    let deleted = app.delete(&format!("/api/airlines/{}", s.airline)).await;
    assert_eq!(deleted.status_code(), StatusCode::NO_CONTENT);
    assert!(app.get("/api/flights").await.json().as_array().unwrap().is_empty());
    assert_eq!(app.get("/api/airports").await.json().as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_deleting_airport_removes_its_turnarounds() {
    let app = create_test_app();
    let s = seed_scenario(&app).await;

    let deleted = app.delete(&format!("/api/airports/{}", s.jfk)).await;
    assert_eq!(deleted.status_code(), StatusCode::NO_CONTENT);

    assert!(app.get("/api/turnarounds").await.json().as_array().unwrap().is_empty());
    assert!(app.get("/api/flights").await.json().as_array().unwrap().is_empty());
    assert!(app
        .get("/api/turnarounds/available_dates")
        .await
        .json()
        .as_array()
        .unwrap()
        .is_empty());
}
