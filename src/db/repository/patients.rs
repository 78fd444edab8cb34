use rusqlite::{params, Connection, OptionalExtension};

use crate::db::DatabaseError;
use crate::models::{NewPatient, Patient, PatientFilter, PatientPatch};

fn row_to_patient(row: &rusqlite::Row<'_>) -> rusqlite::Result<Patient> {
    Ok(Patient {
        id: row.get(0)?,
        name: row.get(1)?,
        age: row.get(2)?,
        gender: row.get(3)?,
        condition: row.get(4)?,
        doctor_id: row.get(5)?,
    })
}

/// Lists patients with optional AND-combined filters.
///
/// Name and condition match as case-sensitive substrings (`instr`, since
/// SQLite's `LIKE` folds ASCII case), gender as a case-insensitive exact
/// match, age exactly. Results come back in storage order.
pub fn list_patients(
    conn: &Connection,
    filter: &PatientFilter,
) -> Result<Vec<Patient>, DatabaseError> {
    let mut sql = String::from(
        "SELECT id, name, age, gender, condition, doctor_id FROM patient WHERE 1=1",
    );
    let mut params_vec: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();
    let mut param_idx = 1u32;

    if let Some(ref name) = filter.name {
        sql.push_str(&format!(" AND instr(name, ?{param_idx}) > 0"));
        params_vec.push(Box::new(name.clone()));
        param_idx += 1;
    }
    if let Some(ref age) = filter.age {
        sql.push_str(&format!(" AND age = ?{param_idx}"));
        params_vec.push(Box::new(age.clone()));
        param_idx += 1;
    }
    if let Some(ref gender) = filter.gender {
        sql.push_str(&format!(" AND lower(gender) = lower(?{param_idx})"));
        params_vec.push(Box::new(gender.clone()));
        param_idx += 1;
    }
    if let Some(ref condition) = filter.condition {
        sql.push_str(&format!(" AND instr(condition, ?{param_idx}) > 0"));
        params_vec.push(Box::new(condition.clone()));
        param_idx += 1;
    }
    let _ = param_idx;

    let param_refs: Vec<&dyn rusqlite::types::ToSql> =
        params_vec.iter().map(|p| p.as_ref()).collect();

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(param_refs.as_slice(), row_to_patient)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

/// Lists patients assigned to one doctor. The doctor itself is not
/// checked for existence; an unknown id just yields an empty list.
pub fn list_patients_by_doctor(
    conn: &Connection,
    doctor_id: i64,
) -> Result<Vec<Patient>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, age, gender, condition, doctor_id FROM patient
         WHERE doctor_id = ?1",
    )?;
    let rows = stmt.query_map(params![doctor_id], row_to_patient)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

/// Inserts a patient and returns the store-assigned id.
pub fn create_patient(conn: &mut Connection, patient: &NewPatient) -> Result<i64, DatabaseError> {
    let tx = conn.transaction()?;
    tx.execute(
        "INSERT INTO patient (name, age, gender, condition, doctor_id)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            patient.name,
            patient.age,
            patient.gender,
            patient.condition,
            patient.doctor_id,
        ],
    )?;
    let id = tx.last_insert_rowid();
    tx.commit()?;
    Ok(id)
}

/// Partial update: only fields present in the patch change, the rest keep
/// their stored values.
pub fn update_patient(
    conn: &mut Connection,
    id: i64,
    patch: &PatientPatch,
) -> Result<(), DatabaseError> {
    let tx = conn.transaction()?;
    let current = tx
        .query_row(
            "SELECT id, name, age, gender, condition, doctor_id FROM patient WHERE id = ?1",
            params![id],
            row_to_patient,
        )
        .optional()?
        .ok_or(DatabaseError::NotFound {
            entity: "Patient",
            id,
        })?;

    tx.execute(
        "UPDATE patient SET name = ?1, age = ?2, gender = ?3, condition = ?4, doctor_id = ?5
         WHERE id = ?6",
        params![
            patch.name.as_ref().unwrap_or(&current.name),
            patch.age.unwrap_or(current.age),
            patch.gender.as_ref().unwrap_or(&current.gender),
            patch.condition.as_ref().unwrap_or(&current.condition),
            patch.doctor_id.unwrap_or(current.doctor_id),
            id,
        ],
    )?;
    tx.commit()?;
    Ok(())
}

/// Unconditional delete. Appointments referencing the patient are left
/// in place (dangling).
pub fn delete_patient(conn: &mut Connection, id: i64) -> Result<(), DatabaseError> {
    let tx = conn.transaction()?;
    let deleted = tx.execute("DELETE FROM patient WHERE id = ?1", params![id])?;
    if deleted == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Patient",
            id,
        });
    }
    tx.commit()?;
    Ok(())
}
