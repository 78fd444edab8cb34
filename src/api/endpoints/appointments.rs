//! Appointment endpoints: joined listing, CRUD with full-replace update,
//! and the filtered report.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use crate::api::error::ApiError;
use crate::api::types::{coerce_int, non_empty, require, require_str, ApiContext, Created, Message};
use crate::db;
use crate::models::{AppointmentReportFilter, AppointmentWithNames, NewAppointment};

/// Input body for create and full-replace update. `notes` is the only
/// optional field and defaults to empty.
#[derive(Deserialize)]
pub struct AppointmentInput {
    pub patient_id: Option<Value>,
    pub doctor_id: Option<Value>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub duration: Option<Value>,
    pub notes: Option<String>,
}

impl AppointmentInput {
    /// Every field but `notes` must be present; numeric fields coerce.
    fn into_new_appointment(self) -> Result<NewAppointment, ApiError> {
        Ok(NewAppointment {
            patient_id: coerce_int(require(&self.patient_id, "patient_id")?, "patient_id")?,
            doctor_id: coerce_int(require(&self.doctor_id, "doctor_id")?, "doctor_id")?,
            date: require_str(&self.date, "date")?,
            time: require_str(&self.time, "time")?,
            duration: coerce_int(require(&self.duration, "duration")?, "duration")?,
            notes: self.notes.unwrap_or_default(),
        })
    }
}

#[derive(Deserialize)]
pub struct AppointmentReportQuery {
    pub patient_name: Option<String>,
    pub doctor_name: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub duration: Option<String>,
}

/// `GET /appointments` — all appointments with patient/doctor names
/// joined; missing referenced rows show as empty names.
pub async fn list(
    State(ctx): State<ApiContext>,
) -> Result<Json<Vec<AppointmentWithNames>>, ApiError> {
    let conn = ctx.conn()?;
    Ok(Json(db::list_appointments(&conn)?))
}

/// `GET /appointments/report` — filtered, inner-joined, date/time ordered.
pub async fn report(
    State(ctx): State<ApiContext>,
    Query(query): Query<AppointmentReportQuery>,
) -> Result<Json<Vec<AppointmentWithNames>>, ApiError> {
    let filter = AppointmentReportFilter {
        patient_name: non_empty(query.patient_name),
        doctor_name: non_empty(query.doctor_name),
        date_from: non_empty(query.date_from),
        date_to: non_empty(query.date_to),
        duration: non_empty(query.duration),
    };
    let conn = ctx.conn()?;
    Ok(Json(db::appointment_report(&conn, &filter)?))
}

/// `POST /appointments` — 201 with `{message, id}`.
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(input): Json<AppointmentInput>,
) -> Result<(StatusCode, Json<Created>), ApiError> {
    let appt = input.into_new_appointment()?;
    let mut conn = ctx.conn()?;
    let id = db::create_appointment(&mut conn, &appt)?;
    Ok((
        StatusCode::CREATED,
        Json(Created {
            message: "Appointment added",
            id,
        }),
    ))
}

/// `PUT /appointments/:id` — full replace; a missing required field
/// fails the request and leaves the stored row untouched.
pub async fn update(
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
    Json(input): Json<AppointmentInput>,
) -> Result<Json<Message>, ApiError> {
    let appt = input.into_new_appointment()?;
    let mut conn = ctx.conn()?;
    db::update_appointment(&mut conn, id, &appt)?;
    Ok(Json(Message {
        message: "Appointment updated",
    }))
}

/// `DELETE /appointments/:id`
pub async fn remove(
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
) -> Result<Json<Message>, ApiError> {
    let mut conn = ctx.conn()?;
    db::delete_appointment(&mut conn, id)?;
    Ok(Json(Message {
        message: "Appointment deleted",
    }))
}
