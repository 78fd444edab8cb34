/// Optional patient list filters; present filters combine with AND.
///
/// `age` is kept as the raw query string and bound as-is: the column's
/// INTEGER affinity converts numeric strings before comparison, and a
/// non-numeric value simply matches no rows.
#[derive(Debug, Default)]
pub struct PatientFilter {
    pub name: Option<String>,
    pub age: Option<String>,
    pub gender: Option<String>,
    pub condition: Option<String>,
}

/// Optional appointment report filters; present filters combine with AND.
/// Date bounds are inclusive and compare lexicographically.
#[derive(Debug, Default)]
pub struct AppointmentReportFilter {
    pub patient_name: Option<String>,
    pub doctor_name: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub duration: Option<String>,
}
