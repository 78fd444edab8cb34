//! End-to-end tests driving the full router over an in-memory store.

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use clinic_api::api::{clinic_router, ApiContext};
use clinic_api::db::open_memory_database;

fn app() -> Router {
    let ctx = ApiContext::new(open_memory_database().unwrap());
    clinic_router(ctx, &["http://localhost:3000".to_string()])
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn seed_doctor(app: &Router, name: &str, specialty: &str) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/doctors",
        Some(json!({"name": name, "specialty": specialty})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().unwrap()
}

async fn seed_patient(app: &Router, name: &str, age: i64, gender: &str, condition: &str, doctor_id: i64) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/patients",
        Some(json!({
            "name": name, "age": age, "gender": gender,
            "condition": condition, "doctor_id": doctor_id
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().unwrap()
}

async fn seed_appointment(app: &Router, patient_id: i64, doctor_id: i64, date: &str, time: &str, duration: i64) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/appointments",
        Some(json!({
            "patient_id": patient_id, "doctor_id": doctor_id,
            "date": date, "time": time, "duration": duration
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn doctor_deletion_guard_scenario() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/doctors",
        Some(json!({"name": "A", "specialty": "Cardiology"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 1);
    assert_eq!(body["message"], "Doctor added");

    let (status, body) = send(
        &app,
        Method::POST,
        "/patients",
        Some(json!({"name": "B", "age": 30, "gender": "F", "condition": "x", "doctor_id": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 1);

    // Blocked while the patient references the doctor.
    let (status, body) = send(&app, Method::DELETE, "/doctors/1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Doctor has patients! Update patients to a new doctor first!"
    );

    // Neither row was deleted.
    let (_, doctors) = send(&app, Method::GET, "/doctors", None).await;
    assert_eq!(doctors.as_array().unwrap().len(), 1);
    let (_, patients) = send(&app, Method::GET, "/patients", None).await;
    assert_eq!(patients.as_array().unwrap().len(), 1);

    let (status, body) = send(&app, Method::DELETE, "/patients/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Patient deleted");

    let (status, body) = send(&app, Method::DELETE, "/doctors/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Doctor deleted");

    let (_, doctors) = send(&app, Method::GET, "/doctors", None).await;
    assert!(doctors.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn patient_filters() {
    let app = app();
    let doc = seed_doctor(&app, "House", "Diagnostics").await;
    seed_patient(&app, "Alice", 30, "F", "Flu", doc).await;
    seed_patient(&app, "alina", 30, "f", "Cold", doc).await;
    seed_patient(&app, "Bob", 41, "M", "Flu", doc).await;

    // Name substring is case-sensitive.
    let (status, body) = send(&app, Method::GET, "/patients?name=Ali", None).await;
    assert_eq!(status, StatusCode::OK);
    let hits = body.as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["name"], "Alice");

    // Gender is case-insensitive; filters AND together.
    let (_, body) = send(&app, Method::GET, "/patients?gender=F&age=30", None).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    // Condition substring is case-sensitive.
    let (_, body) = send(&app, Method::GET, "/patients?condition=flu", None).await;
    assert!(body.as_array().unwrap().is_empty());
    let (_, body) = send(&app, Method::GET, "/patients?condition=Flu", None).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    // Empty filter values are ignored.
    let (_, body) = send(&app, Method::GET, "/patients?name=&gender=", None).await;
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn patient_partial_update() {
    let app = app();
    let doc = seed_doctor(&app, "House", "Diagnostics").await;
    let id = seed_patient(&app, "Alice", 30, "F", "cold", doc).await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/patients/{id}"),
        Some(json!({"condition": "flu"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Patient updated");

    let (_, body) = send(&app, Method::GET, "/patients", None).await;
    let p = &body.as_array().unwrap()[0];
    assert_eq!(p["name"], "Alice");
    assert_eq!(p["age"], 30);
    assert_eq!(p["gender"], "F");
    assert_eq!(p["condition"], "flu");
    assert_eq!(p["doctor_id"], doc);
}

#[tokio::test]
async fn numeric_fields_coerce_from_strings() {
    let app = app();
    seed_doctor(&app, "House", "Diagnostics").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/patients",
        Some(json!({"name": "Alice", "age": "30", "gender": "F", "condition": "flu", "doctor_id": "1"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "numeric strings must coerce");
    assert_eq!(body["message"], "Patient added");

    let (status, body) = send(
        &app,
        Method::POST,
        "/patients",
        Some(json!({"name": "Bob", "age": "old", "gender": "M", "condition": "flu", "doctor_id": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("age"));
}

#[tokio::test]
async fn missing_ids_return_404() {
    let app = app();
    let (status, _) = send(
        &app,
        Method::PUT,
        "/patients/99",
        Some(json!({"condition": "flu"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, "/doctors/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, "/appointments/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn doctor_specialty_search_and_by_doctor_listing() {
    let app = app();
    let cardio = seed_doctor(&app, "A", "Cardiology").await;
    seed_doctor(&app, "B", "Neurology").await;
    seed_patient(&app, "Alice", 30, "F", "flu", cardio).await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/doctors/by-specialty?specialty=cardio",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let hits = body.as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["name"], "A");

    // Absent or empty needle matches everyone.
    let (_, body) = send(&app, Method::GET, "/doctors/by-specialty", None).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/patients/by-doctor/{cardio}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    // Unknown doctor id is not an error, just empty.
    let (status, body) = send(&app, Method::GET, "/patients/by-doctor/999", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn doctor_report_counts() {
    let app = app();
    let zoe = seed_doctor(&app, "Zoe", "Cardiology").await;
    seed_doctor(&app, "Abe", "Neurology").await;
    seed_patient(&app, "P1", 30, "F", "x", zoe).await;
    seed_patient(&app, "P2", 40, "M", "y", zoe).await;

    let (status, body) = send(&app, Method::GET, "/doctors/report", None).await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["name"], "Abe");
    assert_eq!(rows[0]["patient_count"], 0);
    assert_eq!(rows[1]["name"], "Zoe");
    assert_eq!(rows[1]["patient_count"], 2);
}

#[tokio::test]
async fn appointment_full_update_requires_all_fields() {
    let app = app();
    let doc = seed_doctor(&app, "House", "Diagnostics").await;
    let pat = seed_patient(&app, "Alice", 30, "F", "flu", doc).await;
    let id = seed_appointment(&app, pat, doc, "2024-01-10", "09:00", 30).await;

    // Missing `time` — 500-class failure, row untouched.
    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/appointments/{id}"),
        Some(json!({"patient_id": pat, "doctor_id": doc, "date": "2024-03-03", "duration": 60})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("time"));

    let (_, body) = send(&app, Method::GET, "/appointments", None).await;
    let a = &body.as_array().unwrap()[0];
    assert_eq!(a["date"], "2024-01-10");
    assert_eq!(a["time"], "09:00");
    assert_eq!(a["duration"], 30);

    // Complete replacement succeeds and resets absent notes.
    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/appointments/{id}"),
        Some(json!({
            "patient_id": pat, "doctor_id": doc,
            "date": "2024-03-03", "time": "10:15", "duration": 60
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, Method::GET, "/appointments", None).await;
    let a = &body.as_array().unwrap()[0];
    assert_eq!(a["date"], "2024-03-03");
    assert_eq!(a["time"], "10:15");
    assert_eq!(a["notes"], "");
    assert_eq!(a["patient_name"], "Alice");
    assert_eq!(a["doctor_name"], "House");
}

#[tokio::test]
async fn appointment_listing_tolerates_dangling_references() {
    let app = app();
    let doc = seed_doctor(&app, "House", "Diagnostics").await;
    let pat = seed_patient(&app, "Alice", 30, "F", "flu", doc).await;
    seed_appointment(&app, pat, doc, "2024-01-10", "09:00", 30).await;

    let (status, _) = send(&app, Method::DELETE, &format!("/patients/{pat}"), None).await;
    assert_eq!(status, StatusCode::OK);

    // Plain listing keeps the orphan with an empty patient name.
    let (_, body) = send(&app, Method::GET, "/appointments", None).await;
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["patient_name"], "");
    assert_eq!(rows[0]["doctor_name"], "House");

    // The report's inner join drops it.
    let (_, body) = send(&app, Method::GET, "/appointments/report", None).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn appointment_report_filters_and_ordering() {
    let app = app();
    let house = seed_doctor(&app, "House", "Diagnostics").await;
    let wilson = seed_doctor(&app, "Wilson", "Oncology").await;
    let alice = seed_patient(&app, "Alice", 30, "F", "flu", house).await;
    let bob = seed_patient(&app, "Bob", 40, "M", "cold", wilson).await;

    seed_appointment(&app, alice, house, "2024-02-05", "09:00", 30).await;
    seed_appointment(&app, alice, house, "2024-01-15", "14:00", 45).await;
    seed_appointment(&app, bob, wilson, "2024-01-15", "08:00", 30).await;
    seed_appointment(&app, bob, wilson, "2023-12-31", "10:00", 30).await;

    // Inclusive date range, ordered by date then time.
    let (status, body) = send(
        &app,
        Method::GET,
        "/appointments/report?date_from=2024-01-01&date_to=2024-01-31",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["time"], "08:00");
    assert_eq!(rows[1]["time"], "14:00");

    // Name and duration filters AND together.
    let (_, body) = send(
        &app,
        Method::GET,
        "/appointments/report?doctor_name=House&duration=45",
        None,
    )
    .await;
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["patient_name"], "Alice");
    assert_eq!(rows[0]["date"], "2024-01-15");
}
