use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{DepartmentId, Nomination, Program, Student};

/// Workflow position of a student's nomination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NominationStatus {
    PendingExaminerNomination,
    PendingChairAssignment,
    ChairAssigned,
}

impl NominationStatus {
    pub const fn ordered() -> [NominationStatus; 3] {
        [
            NominationStatus::PendingExaminerNomination,
            NominationStatus::PendingChairAssignment,
            NominationStatus::ChairAssigned,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            NominationStatus::PendingExaminerNomination => "Pending Examiner Nomination",
            NominationStatus::PendingChairAssignment => "Pending Chair Assignment",
            NominationStatus::ChairAssigned => "Chair Assigned",
        }
    }
}

/// Derive the status from field completeness. A nomination belonging to another student
/// counts as missing, and a partial examiner set counts the same as no nomination.
pub fn derive_status(student: &Student, nomination: Option<&Nomination>) -> NominationStatus {
    match nomination.filter(|n| n.student == student.id) {
        Some(n) if n.examiners_complete() => {
            if n.chairperson.is_some() {
                NominationStatus::ChairAssigned
            } else {
                NominationStatus::PendingChairAssignment
            }
        }
        _ => NominationStatus::PendingExaminerNomination,
    }
}

/// Dashboard counters over a set of students.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusTally {
    pub total: usize,
    pub by_status: BTreeMap<NominationStatus, usize>,
    pub by_program: BTreeMap<&'static str, usize>,
    pub by_department: BTreeMap<DepartmentId, usize>,
}

impl StatusTally {
    /// A tally with every status and program bucket present at zero.
    pub fn empty() -> Self {
        let mut tally = StatusTally::default();
        for status in NominationStatus::ordered() {
            tally.by_status.insert(status, 0);
        }
        for program in Program::ordered() {
            tally.by_program.insert(program.label(), 0);
        }
        tally
    }

    pub fn from_students<'a, I>(students: I, nominations: &[Nomination]) -> Self
    where
        I: IntoIterator<Item = &'a Student>,
    {
        let mut tally = StatusTally::empty();
        for student in students {
            let nomination = nominations.iter().find(|n| n.student == student.id);
            let status = derive_status(student, nomination);
            tally.record(student.program, student.department, status);
        }
        tally
    }

    pub(crate) fn record(
        &mut self,
        program: Program,
        department: DepartmentId,
        status: NominationStatus,
    ) {
        self.total += 1;
        *self.by_status.entry(status).or_default() += 1;
        *self.by_program.entry(program.label()).or_default() += 1;
        *self.by_department.entry(department).or_default() += 1;
    }

    pub fn count(&self, status: NominationStatus) -> usize {
        self.by_status.get(&status).copied().unwrap_or_default()
    }
}
