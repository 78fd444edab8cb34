use rusqlite::{params, Connection, OptionalExtension};

use crate::db::DatabaseError;
use crate::models::{Doctor, DoctorPatch, NewDoctor};

/// Fixed message returned when deleting a doctor who still has patients.
pub const DOCTOR_HAS_PATIENTS: &str = "Doctor has patients! Update patients to a new doctor first!";

fn row_to_doctor(row: &rusqlite::Row<'_>) -> rusqlite::Result<Doctor> {
    Ok(Doctor {
        id: row.get(0)?,
        name: row.get(1)?,
        specialty: row.get(2)?,
    })
}

pub fn list_doctors(conn: &Connection) -> Result<Vec<Doctor>, DatabaseError> {
    let mut stmt = conn.prepare("SELECT id, name, specialty FROM doctor")?;
    let rows = stmt.query_map([], row_to_doctor)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

/// Case-insensitive substring search on specialty. An empty needle
/// matches every doctor.
pub fn list_doctors_by_specialty(
    conn: &Connection,
    specialty: &str,
) -> Result<Vec<Doctor>, DatabaseError> {
    // LIKE folds ASCII case in SQLite, which is exactly the semantics wanted here.
    let mut stmt = conn.prepare(
        "SELECT id, name, specialty FROM doctor WHERE specialty LIKE '%' || ?1 || '%'",
    )?;
    let rows = stmt.query_map(params![specialty], row_to_doctor)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

/// Inserts a doctor and returns the store-assigned id.
pub fn create_doctor(conn: &mut Connection, doctor: &NewDoctor) -> Result<i64, DatabaseError> {
    let tx = conn.transaction()?;
    tx.execute(
        "INSERT INTO doctor (name, specialty) VALUES (?1, ?2)",
        params![doctor.name, doctor.specialty],
    )?;
    let id = tx.last_insert_rowid();
    tx.commit()?;
    Ok(id)
}

/// Partial update: only fields present in the patch change.
pub fn update_doctor(
    conn: &mut Connection,
    id: i64,
    patch: &DoctorPatch,
) -> Result<(), DatabaseError> {
    let tx = conn.transaction()?;
    let current = tx
        .query_row(
            "SELECT id, name, specialty FROM doctor WHERE id = ?1",
            params![id],
            row_to_doctor,
        )
        .optional()?
        .ok_or(DatabaseError::NotFound {
            entity: "Doctor",
            id,
        })?;

    tx.execute(
        "UPDATE doctor SET name = ?1, specialty = ?2 WHERE id = ?3",
        params![
            patch.name.as_ref().unwrap_or(&current.name),
            patch.specialty.as_ref().unwrap_or(&current.specialty),
            id,
        ],
    )?;
    tx.commit()?;
    Ok(())
}

/// Deletes a doctor unless any patient still references them.
///
/// The guard lives here, not in a store constraint, so the conflict
/// surfaces as a client error with a fixed message rather than as an
/// opaque store failure.
pub fn delete_doctor(conn: &mut Connection, id: i64) -> Result<(), DatabaseError> {
    let tx = conn.transaction()?;
    let patient_count: i64 = tx.query_row(
        "SELECT COUNT(*) FROM patient WHERE doctor_id = ?1",
        params![id],
        |row| row.get(0),
    )?;
    if patient_count > 0 {
        return Err(DatabaseError::Conflict(DOCTOR_HAS_PATIENTS.to_string()));
    }

    let deleted = tx.execute("DELETE FROM doctor WHERE id = ?1", params![id])?;
    if deleted == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Doctor",
            id,
        });
    }
    tx.commit()?;
    Ok(())
}
