use rusqlite::{params, Connection};

use crate::db::DatabaseError;
use crate::models::{AppointmentWithNames, NewAppointment};

pub(crate) fn row_to_appointment_with_names(
    row: &rusqlite::Row<'_>,
) -> rusqlite::Result<AppointmentWithNames> {
    Ok(AppointmentWithNames {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        doctor_id: row.get(2)?,
        date: row.get(3)?,
        time: row.get(4)?,
        duration: row.get(5)?,
        notes: row.get::<_, Option<String>>(6)?.unwrap_or_default(),
        patient_name: row.get::<_, Option<String>>(7)?.unwrap_or_default(),
        doctor_name: row.get::<_, Option<String>>(8)?.unwrap_or_default(),
    })
}

/// Lists every appointment joined with patient and doctor names.
/// LEFT JOINs keep appointments whose referenced rows were deleted;
/// their names come back as empty strings.
pub fn list_appointments(conn: &Connection) -> Result<Vec<AppointmentWithNames>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT a.id, a.patient_id, a.doctor_id, a.date, a.time, a.duration, a.notes,
                p.name, d.name
         FROM appointment a
         LEFT JOIN patient p ON a.patient_id = p.id
         LEFT JOIN doctor d ON a.doctor_id = d.id",
    )?;
    let rows = stmt.query_map([], row_to_appointment_with_names)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

/// Inserts an appointment and returns the store-assigned id.
pub fn create_appointment(
    conn: &mut Connection,
    appt: &NewAppointment,
) -> Result<i64, DatabaseError> {
    let tx = conn.transaction()?;
    tx.execute(
        "INSERT INTO appointment (patient_id, doctor_id, date, time, duration, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            appt.patient_id,
            appt.doctor_id,
            appt.date,
            appt.time,
            appt.duration,
            appt.notes,
        ],
    )?;
    let id = tx.last_insert_rowid();
    tx.commit()?;
    Ok(id)
}

/// Full replace: every field is written, none carried over.
pub fn update_appointment(
    conn: &mut Connection,
    id: i64,
    appt: &NewAppointment,
) -> Result<(), DatabaseError> {
    let tx = conn.transaction()?;
    let updated = tx.execute(
        "UPDATE appointment
         SET patient_id = ?1, doctor_id = ?2, date = ?3, time = ?4, duration = ?5, notes = ?6
         WHERE id = ?7",
        params![
            appt.patient_id,
            appt.doctor_id,
            appt.date,
            appt.time,
            appt.duration,
            appt.notes,
            id,
        ],
    )?;
    if updated == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Appointment",
            id,
        });
    }
    tx.commit()?;
    Ok(())
}

pub fn delete_appointment(conn: &mut Connection, id: i64) -> Result<(), DatabaseError> {
    let tx = conn.transaction()?;
    let deleted = tx.execute("DELETE FROM appointment WHERE id = ?1", params![id])?;
    if deleted == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Appointment",
            id,
        });
    }
    tx.commit()?;
    Ok(())
}
