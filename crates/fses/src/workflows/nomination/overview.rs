use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::domain::{
    Department, DepartmentId, Lecturer, LecturerId, Nomination, NominationId, Program, Student,
    StudentId,
};
use super::eligibility::Roster;
use super::status::{derive_status, NominationStatus, StatusTally};

/// One dashboard row: a student joined with names and the derived status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentOverview {
    pub student_id: StudentId,
    pub name: String,
    pub program: Program,
    pub program_label: &'static str,
    pub department: DepartmentId,
    pub department_name: String,
    pub evaluation_type: &'static str,
    pub semester: u8,
    pub supervisor: Option<String>,
    pub co_supervisor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nomination_id: Option<NominationId>,
    pub research_title: Option<String>,
    pub examiner1: Option<String>,
    pub examiner2: Option<String>,
    pub examiner3: Option<String>,
    pub chairperson: Option<String>,
    pub status: NominationStatus,
    pub status_label: &'static str,
    pub is_locked: bool,
}

impl StudentOverview {
    fn searchable(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(
            [
                &self.research_title,
                &self.supervisor,
                &self.co_supervisor,
                &self.examiner1,
                &self.examiner2,
                &self.examiner3,
                &self.chairperson,
            ]
            .into_iter()
            .filter_map(|value| value.as_deref()),
        )
    }
}

/// Dashboard filters; unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OverviewFilter {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub status: Option<NominationStatus>,
    #[serde(default)]
    pub program: Option<Program>,
    #[serde(default)]
    pub department: Option<DepartmentId>,
}

impl OverviewFilter {
    pub fn matches(&self, row: &StudentOverview) -> bool {
        if self.status.is_some_and(|status| status != row.status) {
            return false;
        }
        if self.program.is_some_and(|program| program != row.program) {
            return false;
        }
        if self
            .department
            .is_some_and(|department| department != row.department)
        {
            return false;
        }

        match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                row.searchable()
                    .any(|value| value.to_lowercase().contains(&term))
            }
        }
    }
}

/// Filtered rows plus counters computed over the rows that passed the filter.
#[derive(Debug, Clone, Serialize)]
pub struct OverviewPage {
    pub rows: Vec<StudentOverview>,
    pub tally: StatusTally,
}

pub fn build_overview(
    students: &[Student],
    lecturers: &[Lecturer],
    departments: &[Department],
    nominations: &[Nomination],
) -> Vec<StudentOverview> {
    let roster = Roster::new(lecturers, students, nominations);
    let department_names: HashMap<DepartmentId, &str> = departments
        .iter()
        .map(|d| (d.id, d.name.as_str()))
        .collect();
    let owned = |name: Option<&str>| name.map(str::to_string);

    let mut rows: Vec<StudentOverview> = students
        .iter()
        .map(|student| {
            let nomination = roster.nomination_for(student.id);
            let status = derive_status(student, nomination);
            let examiner = |pick: fn(&Nomination) -> Option<LecturerId>| {
                owned(roster.lecturer_name(nomination.and_then(pick)))
            };

            StudentOverview {
                student_id: student.id,
                name: student.name.clone(),
                program: student.program,
                program_label: student.program.label(),
                department: student.department,
                department_name: department_names
                    .get(&student.department)
                    .map(|name| name.to_string())
                    .unwrap_or_else(|| "N/A".to_string()),
                evaluation_type: student.evaluation_type.label(),
                semester: student.semester,
                supervisor: owned(roster.lecturer_name(student.supervisor)),
                co_supervisor: owned(roster.lecturer_name(student.co_supervisor)),
                nomination_id: nomination.map(|n| n.id),
                research_title: nomination.and_then(|n| n.research_title.clone()),
                examiner1: examiner(|n| n.examiners.examiner1),
                examiner2: examiner(|n| n.examiners.examiner2),
                examiner3: examiner(|n| n.examiners.examiner3),
                chairperson: examiner(|n| n.chairperson),
                status,
                status_label: status.label(),
                is_locked: nomination.is_some_and(|n| n.is_locked),
            }
        })
        .collect();

    rows.sort_by(|a, b| a.name.cmp(&b.name).then(a.student_id.cmp(&b.student_id)));
    rows
}

pub fn filter_overview(rows: Vec<StudentOverview>, filter: &OverviewFilter) -> OverviewPage {
    let rows: Vec<StudentOverview> = rows.into_iter().filter(|row| filter.matches(row)).collect();
    let mut tally = StatusTally::empty();
    for row in &rows {
        tally.record(row.program, row.department, row.status);
    }
    OverviewPage { rows, tally }
}
