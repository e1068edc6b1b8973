use std::io::{self, Write};

use chrono::NaiveDate;

use super::overview::StudentOverview;

const ROSTER_HEADER: [&str; 13] = [
    "Student",
    "Program",
    "Department",
    "Evaluation Type",
    "Main Supervisor",
    "Co-Supervisor",
    "Research Title",
    "Examiner 1",
    "Examiner 2",
    "Examiner 3",
    "Chairperson",
    "Status",
    "Locked",
];

/// Write the evaluation roster as CSV, names upper-cased the way the faculty circulates it.
pub fn write_roster_csv<W: Write>(rows: &[StudentOverview], writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(ROSTER_HEADER)?;

    for row in rows {
        let upper = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::to_uppercase)
                .unwrap_or_default()
        };
        csv_writer.write_record([
            row.name.to_uppercase(),
            row.program_label.to_string(),
            row.department_name.clone(),
            row.evaluation_type.to_string(),
            upper(&row.supervisor),
            upper(&row.co_supervisor),
            upper(&row.research_title),
            upper(&row.examiner1),
            upper(&row.examiner2),
            upper(&row.examiner3),
            upper(&row.chairperson),
            row.status_label.to_string(),
            if row.is_locked { "yes" } else { "no" }.to_string(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

pub fn roster_csv(rows: &[StudentOverview]) -> Result<String, csv::Error> {
    let mut buffer = Vec::new();
    write_roster_csv(rows, &mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|err| csv::Error::from(io::Error::new(io::ErrorKind::InvalidData, err)))
}

/// Download name for a roster generated on `date`.
pub fn roster_file_name(date: NaiveDate) -> String {
    format!("fses-roster-{}.csv", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_carries_generation_date() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).expect("valid date");
        assert_eq!(roster_file_name(date), "fses-roster-2025-03-07.csv");
    }

    #[test]
    fn empty_roster_still_has_header() {
        let csv = roster_csv(&[]).expect("csv");
        assert_eq!(csv.lines().count(), 1);
        assert!(csv.starts_with("Student,Program,Department,Evaluation Type"));
    }
}
