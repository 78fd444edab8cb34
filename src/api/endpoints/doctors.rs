//! Doctor endpoints: CRUD with the guarded delete, specialty search,
//! and the patient-count report.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::{require_str, ApiContext, Created, Message};
use crate::db;
use crate::models::{Doctor, DoctorPatch, DoctorReportRow, NewDoctor};

#[derive(Deserialize)]
pub struct DoctorInput {
    pub name: Option<String>,
    pub specialty: Option<String>,
}

#[derive(Deserialize)]
pub struct SpecialtyQuery {
    pub specialty: Option<String>,
}

/// `GET /doctors`
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<Vec<Doctor>>, ApiError> {
    let conn = ctx.conn()?;
    Ok(Json(db::list_doctors(&conn)?))
}

/// `GET /doctors/by-specialty?specialty=` — case-insensitive substring;
/// an absent or empty needle matches every doctor.
pub async fn by_specialty(
    State(ctx): State<ApiContext>,
    Query(query): Query<SpecialtyQuery>,
) -> Result<Json<Vec<Doctor>>, ApiError> {
    let conn = ctx.conn()?;
    let specialty = query.specialty.unwrap_or_default();
    Ok(Json(db::list_doctors_by_specialty(&conn, &specialty)?))
}

/// `GET /doctors/report` — patient counts per doctor, name-ordered.
pub async fn report(State(ctx): State<ApiContext>) -> Result<Json<Vec<DoctorReportRow>>, ApiError> {
    let conn = ctx.conn()?;
    Ok(Json(db::doctor_report(&conn)?))
}

/// `POST /doctors` — 201 with `{message, id}`.
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(input): Json<DoctorInput>,
) -> Result<(StatusCode, Json<Created>), ApiError> {
    let doctor = NewDoctor {
        name: require_str(&input.name, "name")?,
        specialty: require_str(&input.specialty, "specialty")?,
    };
    let mut conn = ctx.conn()?;
    let id = db::create_doctor(&mut conn, &doctor)?;
    Ok((
        StatusCode::CREATED,
        Json(Created {
            message: "Doctor added",
            id,
        }),
    ))
}

/// `PUT /doctors/:id` — partial update.
pub async fn update(
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
    Json(input): Json<DoctorInput>,
) -> Result<Json<Message>, ApiError> {
    let patch = DoctorPatch {
        name: input.name,
        specialty: input.specialty,
    };
    let mut conn = ctx.conn()?;
    db::update_doctor(&mut conn, id, &patch)?;
    Ok(Json(Message {
        message: "Doctor updated",
    }))
}

/// `DELETE /doctors/:id` — 400 with a fixed message while any patient
/// still references the doctor.
pub async fn remove(
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
) -> Result<Json<Message>, ApiError> {
    let mut conn = ctx.conn()?;
    db::delete_doctor(&mut conn, id)?;
    Ok(Json(Message {
        message: "Doctor deleted",
    }))
}
