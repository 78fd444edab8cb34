use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: i64,
    pub name: String,
    pub specialty: String,
}

#[derive(Debug, Clone)]
pub struct NewDoctor {
    pub name: String,
    pub specialty: String,
}

/// Partial update: absent fields keep their stored values.
#[derive(Debug, Default)]
pub struct DoctorPatch {
    pub name: Option<String>,
    pub specialty: Option<String>,
}

/// One row of the doctor report: patient headcount per doctor,
/// zero included for doctors with no patients.
#[derive(Debug, Clone, Serialize)]
pub struct DoctorReportRow {
    pub id: i64,
    pub name: String,
    pub specialty: String,
    pub patient_count: i64,
}
