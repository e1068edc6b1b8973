use serde::Serialize;

use super::super::domain::{DepartmentId, ExaminerSlot, Title};

/// Why a lecturer was left out of a candidate list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Ineligibility {
    UnknownLecturer,
    Supervises,
    AlreadyExamining { slot: ExaminerSlot },
    ExternalInstitution,
    Seniority { required: Title },
    NoNomination,
    ExaminersIncomplete,
    ChairLimitReached {
        department: DepartmentId,
        sessions: usize,
        cap: usize,
    },
}

impl Ineligibility {
    pub fn summary(&self) -> String {
        match self {
            Ineligibility::UnknownLecturer => "lecturer does not exist".to_string(),
            Ineligibility::Supervises => "lecturer supervises the student".to_string(),
            Ineligibility::AlreadyExamining { slot } => {
                format!("lecturer is already examiner {}", slot.number())
            }
            Ineligibility::ExternalInstitution => {
                "lecturer is outside the home institution".to_string()
            }
            Ineligibility::Seniority { required } => {
                format!("requires {} or more senior", required.label())
            }
            Ineligibility::NoNomination => "student has no nomination yet".to_string(),
            Ineligibility::ExaminersIncomplete => {
                "all three examiners must be nominated first".to_string()
            }
            Ineligibility::ChairLimitReached {
                department,
                sessions,
                cap,
            } => format!(
                "already chairs {sessions} session(s) in department {department} (cap {cap})"
            ),
        }
    }
}
