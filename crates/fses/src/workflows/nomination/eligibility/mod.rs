mod chairperson;
mod config;
mod examiners;
mod rejection;
mod roster;

pub use config::{EligibilityConfig, DEFAULT_CHAIR_SESSION_CAP, DEFAULT_HOME_INSTITUTION};
pub use rejection::Ineligibility;
pub use roster::Roster;

use super::domain::{
    ExaminerDraft, ExaminerSlot, Lecturer, LecturerId, Nomination, Student, Title,
};
use chairperson::{check_chairperson, ChairContext};
use examiners::check_examiner;

/// Stateless evaluator applying the faculty's nomination rules.
///
/// Every method degrades to an empty candidate list (or an [`Ineligibility`]) on partial
/// input instead of failing.
#[derive(Debug, Clone, Default)]
pub struct EligibilityEngine {
    config: EligibilityConfig,
}

impl EligibilityEngine {
    pub fn new(config: EligibilityConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EligibilityConfig {
        &self.config
    }

    /// Lecturers who may fill `slot` for `student`, ordered by name.
    pub fn eligible_examiners(
        &self,
        student: &Student,
        lecturers: &[Lecturer],
        draft: &ExaminerDraft,
        slot: ExaminerSlot,
    ) -> Vec<Lecturer> {
        let supervisor_title = supervisor_title(student, lecturers);
        let candidates = lecturers.iter().filter(|candidate| {
            check_examiner(
                candidate,
                student,
                draft,
                slot,
                supervisor_title,
                &self.config,
            )
            .is_ok()
        });
        sorted_by_name(candidates)
    }

    /// Explains whether `lecturer` could fill `slot`.
    pub fn examiner_eligibility(
        &self,
        student: &Student,
        lecturers: &[Lecturer],
        draft: &ExaminerDraft,
        slot: ExaminerSlot,
        lecturer: LecturerId,
    ) -> Result<(), Ineligibility> {
        let candidate = lecturers
            .iter()
            .find(|l| l.id == lecturer)
            .ok_or(Ineligibility::UnknownLecturer)?;
        let supervisor_title = supervisor_title(student, lecturers);
        check_examiner(
            candidate,
            student,
            draft,
            slot,
            supervisor_title,
            &self.config,
        )
    }

    /// Lecturers who may chair `student`'s evaluation, ordered by name.
    ///
    /// `students` resolves the department of every other nomination for the per-department
    /// session cap. Returns nothing until the nomination has all three examiners.
    pub fn eligible_chairpersons(
        &self,
        student: &Student,
        lecturers: &[Lecturer],
        students: &[Student],
        nominations: &[Nomination],
        nomination: Option<&Nomination>,
    ) -> Vec<Lecturer> {
        let roster = Roster::new(lecturers, students, nominations);
        let Ok(context) = ChairContext::prepare(student, nomination, &roster) else {
            return Vec::new();
        };

        let candidates = lecturers.iter().filter(|candidate| {
            check_chairperson(candidate, &context, &roster, &self.config).is_ok()
        });
        sorted_by_name(candidates)
    }

    /// Explains whether `lecturer` could chair `student`'s evaluation.
    pub fn chairperson_eligibility(
        &self,
        student: &Student,
        roster: &Roster<'_>,
        nomination: Option<&Nomination>,
        lecturer: LecturerId,
    ) -> Result<(), Ineligibility> {
        let context = ChairContext::prepare(student, nomination, roster)?;
        let candidate = roster
            .lecturer(lecturer)
            .ok_or(Ineligibility::UnknownLecturer)?;
        check_chairperson(candidate, &context, roster, &self.config)
    }
}

fn supervisor_title(student: &Student, lecturers: &[Lecturer]) -> Option<Title> {
    let supervisor = student.supervisor?;
    lecturers
        .iter()
        .find(|l| l.id == supervisor)
        .map(|l| l.title)
}

fn sorted_by_name<'a>(candidates: impl Iterator<Item = &'a Lecturer>) -> Vec<Lecturer> {
    let mut eligible: Vec<Lecturer> = candidates.cloned().collect();
    eligible.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
    eligible
}
