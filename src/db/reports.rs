//! Reporting queries: per-doctor patient counts and the filtered
//! appointment report.
//!
//! Both report endpoints share one pattern: start from an always-true
//! predicate, append one parameterized predicate per present filter, and
//! bind every value — filter text never reaches the SQL string itself.

use rusqlite::types::ToSql;
use rusqlite::Connection;

use super::repository::row_to_appointment_with_names;
use super::DatabaseError;
use crate::models::{AppointmentReportFilter, AppointmentWithNames, DoctorReportRow};

/// Incrementally composed query with positional parameters.
struct FilterClause {
    sql: String,
    params: Vec<Box<dyn ToSql>>,
}

impl FilterClause {
    fn new(base: &str) -> Self {
        Self {
            sql: format!("{base} WHERE 1=1"),
            params: Vec::new(),
        }
    }

    /// Appends `AND <predicate>` with the predicate's single `?` numbered
    /// to the next parameter slot.
    fn and(&mut self, predicate: &str, value: impl ToSql + 'static) {
        self.params.push(Box::new(value));
        let idx = self.params.len();
        self.sql.push_str(" AND ");
        self.sql
            .push_str(&predicate.replace('?', &format!("?{idx}")));
    }

    fn order_by(&mut self, columns: &str) {
        self.sql.push_str(" ORDER BY ");
        self.sql.push_str(columns);
    }

    fn params(&self) -> Vec<&dyn ToSql> {
        self.params.iter().map(|p| p.as_ref()).collect()
    }
}

/// Patient headcount per doctor, ordered by doctor name. The LEFT JOIN
/// keeps doctors with no patients at count 0.
pub fn doctor_report(conn: &Connection) -> Result<Vec<DoctorReportRow>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT d.id, d.name, d.specialty, COUNT(p.id) AS patient_count
         FROM doctor d
         LEFT JOIN patient p ON d.id = p.doctor_id
         GROUP BY d.id, d.name, d.specialty
         ORDER BY d.name",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(DoctorReportRow {
            id: row.get(0)?,
            name: row.get(1)?,
            specialty: row.get(2)?,
            patient_count: row.get(3)?,
        })
    })?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

/// Filtered appointment report, ordered by date then time.
///
/// INNER JOINs exclude appointments whose patient or doctor row is gone,
/// unlike the plain listing. Date bounds are inclusive; dates and times
/// are fixed-width strings, so lexicographic comparison is chronological.
pub fn appointment_report(
    conn: &Connection,
    filter: &AppointmentReportFilter,
) -> Result<Vec<AppointmentWithNames>, DatabaseError> {
    let mut clause = FilterClause::new(
        "SELECT a.id, a.patient_id, a.doctor_id, a.date, a.time, a.duration, a.notes,
                p.name, d.name
         FROM appointment a
         JOIN patient p ON a.patient_id = p.id
         JOIN doctor d ON a.doctor_id = d.id",
    );

    if let Some(ref name) = filter.patient_name {
        clause.and("p.name LIKE '%' || ? || '%'", name.clone());
    }
    if let Some(ref name) = filter.doctor_name {
        clause.and("d.name LIKE '%' || ? || '%'", name.clone());
    }
    if let Some(ref from) = filter.date_from {
        clause.and("a.date >= ?", from.clone());
    }
    if let Some(ref to) = filter.date_to {
        clause.and("a.date <= ?", to.clone());
    }
    if let Some(ref duration) = filter.duration {
        clause.and("a.duration = ?", duration.clone());
    }
    clause.order_by("a.date, a.time");

    let mut stmt = conn.prepare(&clause.sql)?;
    let rows = stmt.query_map(clause.params().as_slice(), row_to_appointment_with_names)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}
