//! Patient endpoints: filtered listing, CRUD, listing by doctor.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use crate::api::error::ApiError;
use crate::api::types::{coerce_int, non_empty, require, require_str, ApiContext, Created, Message};
use crate::db;
use crate::models::{NewPatient, Patient, PatientFilter, PatientPatch};

#[derive(Deserialize)]
pub struct PatientListQuery {
    pub name: Option<String>,
    pub age: Option<String>,
    pub gender: Option<String>,
    pub condition: Option<String>,
}

/// Input body for create (all fields required) and update (all optional).
/// Numeric fields arrive as raw JSON so that both numbers and numeric
/// strings coerce.
#[derive(Deserialize)]
pub struct PatientInput {
    pub name: Option<String>,
    pub age: Option<Value>,
    pub gender: Option<String>,
    pub condition: Option<String>,
    pub doctor_id: Option<Value>,
}

/// `GET /patients` — list with optional AND-combined filters.
pub async fn list(
    State(ctx): State<ApiContext>,
    Query(query): Query<PatientListQuery>,
) -> Result<Json<Vec<Patient>>, ApiError> {
    let filter = PatientFilter {
        name: non_empty(query.name),
        age: non_empty(query.age),
        gender: non_empty(query.gender),
        condition: non_empty(query.condition),
    };
    let conn = ctx.conn()?;
    let patients = db::list_patients(&conn, &filter)?;
    Ok(Json(patients))
}

/// `GET /patients/by-doctor/:doctor_id`
pub async fn by_doctor(
    State(ctx): State<ApiContext>,
    Path(doctor_id): Path<i64>,
) -> Result<Json<Vec<Patient>>, ApiError> {
    let conn = ctx.conn()?;
    let patients = db::list_patients_by_doctor(&conn, doctor_id)?;
    Ok(Json(patients))
}

/// `POST /patients` — 201 with `{message, id}`.
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(input): Json<PatientInput>,
) -> Result<(StatusCode, Json<Created>), ApiError> {
    let patient = NewPatient {
        name: require_str(&input.name, "name")?,
        age: coerce_int(require(&input.age, "age")?, "age")?,
        gender: require_str(&input.gender, "gender")?,
        condition: require_str(&input.condition, "condition")?,
        doctor_id: coerce_int(require(&input.doctor_id, "doctor_id")?, "doctor_id")?,
    };
    let mut conn = ctx.conn()?;
    let id = db::create_patient(&mut conn, &patient)?;
    Ok((
        StatusCode::CREATED,
        Json(Created {
            message: "Patient added",
            id,
        }),
    ))
}

/// `PUT /patients/:id` — partial update; absent fields keep prior values.
pub async fn update(
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
    Json(input): Json<PatientInput>,
) -> Result<Json<Message>, ApiError> {
    let patch = PatientPatch {
        name: input.name,
        age: input
            .age
            .as_ref()
            .map(|v| coerce_int(v, "age"))
            .transpose()?,
        gender: input.gender,
        condition: input.condition,
        doctor_id: input
            .doctor_id
            .as_ref()
            .map(|v| coerce_int(v, "doctor_id"))
            .transpose()?,
    };
    let mut conn = ctx.conn()?;
    db::update_patient(&mut conn, id, &patch)?;
    Ok(Json(Message {
        message: "Patient updated",
    }))
}

/// `DELETE /patients/:id` — unconditional; appointments are left dangling.
pub async fn remove(
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
) -> Result<Json<Message>, ApiError> {
    let mut conn = ctx.conn()?;
    db::delete_patient(&mut conn, id)?;
    Ok(Json(Message {
        message: "Patient deleted",
    }))
}
