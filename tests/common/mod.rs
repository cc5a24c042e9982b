//! Helpers compartidos por los tests de integración
//!
//! Levantan la aplicación completa sobre `MemoryStore` y la llaman con
//! `tower::ServiceExt::oneshot`, sin abrir sockets.

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use agoa_backend::config::EnvironmentConfig;
use agoa_backend::{create_app, App};
use agoa_backend::repositories::MemoryStore;
use agoa_backend::state::AppState;
use agoa_backend::utils::jwt::JwtClaims;

pub const JWT_SECRET: &str = "integration-test-secret";

pub struct TestResponse {
    status: StatusCode,
    body: Value,
}

impl TestResponse {
    pub fn status_code(&self) -> StatusCode {
        self.status
    }

    pub fn json(&self) -> Value {
        self.body.clone()
    }
}

pub struct TestApp {
    app: App,
    token: String,
}

/// Firmar un token como lo haría el proveedor de identidad
pub fn sign_token(secret: &str, expires_in_secs: i64) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = JwtClaims {
        sub: "42".to_string(),
        username: Some("ops".to_string()),
        exp: (now + expires_in_secs) as usize,
        iat: now as usize,
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
}

pub fn create_test_app() -> TestApp {
    let config = EnvironmentConfig::from_lookup(|key| match key {
        "JWT_SECRET" => Some(JWT_SECRET.to_string()),
        "STORE_BACKEND" => Some("memory".to_string()),
        _ => None,
    })
    .unwrap();

    let state = AppState::new(Arc::new(MemoryStore::new()), config);
    TestApp {
        app: create_app(state),
        token: sign_token(JWT_SECRET, 3600),
    }
}

impl TestApp {
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>, token: Option<&str>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        TestResponse { status, body }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None, Some(&self.token)).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::POST, uri, Some(body), Some(&self.token)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::PUT, uri, Some(body), Some(&self.token)).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.request(Method::DELETE, uri, None, Some(&self.token)).await
    }

    /// Crear y devolver el id, fallando el test si no es 201
    pub async fn create(&self, uri: &str, body: Value) -> i64 {
        let response = self.post(uri, body).await;
        assert_eq!(
            response.status_code(),
            StatusCode::CREATED,
            "POST {} failed: {}",
            uri,
            response.json()
        );
        response.json()["id"].as_i64().unwrap()
    }

    pub async fn create_airline(&self, name: &str, iata: &str) -> i64 {
        self.create("/api/airlines", json!({ "name": name, "iata_code": iata })).await
    }

    pub async fn create_airport(&self, iata: &str, city: &str) -> i64 {
        self.create(
            "/api/airports",
            json!({
                "name": format!("{} Airport", city),
                "iata_code": iata,
                "city": city,
                "country": "Somewhere",
            }),
        )
        .await
    }

    pub async fn create_flight(&self, number: &str, airline: i64, from: i64, to: i64, departs: &str, arrives: &str) -> i64 {
        self.create(
            "/api/flights",
            json!({
                "flight_number": number,
                "airline": airline,
                "departure_airport": from,
                "arrival_airport": to,
                "scheduled_departure": departs,
                "scheduled_arrival": arrives,
            }),
        )
        .await
    }
}

pub fn turnaround_body(arrival: i64, departure: i64, airport: i64, start: &str, end: &str) -> Value {
    json!({
        "arrival_flight": arrival,
        "departure_flight": departure,
        "airport": airport,
        "scheduled_start": start,
        "scheduled_end": end,
    })
}

/// Escenario base: TA123 CDG -> JFK, TA124 JFK -> CDG y un turnaround en JFK
pub struct Scenario {
    pub airline: i64,
    pub cdg: i64,
    pub jfk: i64,
    pub ta123: i64,
    pub ta124: i64,
    pub turnaround: i64,
}

pub async fn seed_scenario(app: &TestApp) -> Scenario {
    let airline = app.create_airline("Test Airline", "TA").await;
    let cdg = app.create_airport("CDG", "Paris").await;
    let jfk = app.create_airport("JFK", "New York").await;
    let ta123 = app
        .create_flight("TA123", airline, cdg, jfk, "2024-01-01T08:00:00Z", "2024-01-01T16:00:00Z")
        .await;
    let ta124 = app
        .create_flight("TA124", airline, jfk, cdg, "2024-01-01T18:30:00Z", "2024-01-02T02:30:00Z")
        .await;
    let turnaround = app
        .create(
            "/api/turnarounds",
            turnaround_body(ta123, ta124, jfk, "2024-01-01T16:10:00Z", "2024-01-01T18:00:00Z"),
        )
        .await;

    Scenario {
        airline,
        cdg,
        jfk,
        ta123,
        ta124,
        turnaround,
    }
}
