use serde::{Deserialize, Serialize};

/// Patient row as stored and served. Every patient references a doctor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub gender: String,
    pub condition: String,
    pub doctor_id: i64,
}

/// Fields for inserting a patient; the id is store-assigned.
#[derive(Debug, Clone)]
pub struct NewPatient {
    pub name: String,
    pub age: i64,
    pub gender: String,
    pub condition: String,
    pub doctor_id: i64,
}

/// Partial update: absent fields keep their stored values.
#[derive(Debug, Default)]
pub struct PatientPatch {
    pub name: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub condition: Option<String>,
    pub doctor_id: Option<i64>,
}
