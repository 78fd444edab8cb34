use serde::{Deserialize, Serialize};

/// Fields for inserting or fully replacing an appointment.
///
/// `date` is `YYYY-MM-DD` and `time` is 24h `HH:MM`; both are stored and
/// compared as fixed-width strings, so lexicographic order is chronological
/// order. `duration` is minutes.
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub patient_id: i64,
    pub doctor_id: i64,
    pub date: String,
    pub time: String,
    pub duration: i64,
    pub notes: String,
}

/// Appointment joined with the referenced patient and doctor names.
/// Served by both the plain listing and the filtered report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentWithNames {
    pub id: i64,
    pub patient_id: i64,
    pub doctor_id: i64,
    pub date: String,
    pub time: String,
    pub duration: i64,
    pub notes: String,
    pub patient_name: String,
    pub doctor_name: String,
}
