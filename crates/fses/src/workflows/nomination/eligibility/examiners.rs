use super::super::domain::{ExaminerDraft, ExaminerSlot, Lecturer, Student, Title};
use super::config::EligibilityConfig;
use super::rejection::Ineligibility;

/// Most junior title a slot accepts, given the supervisor's seniority.
pub(crate) fn required_title(slot: ExaminerSlot, supervisor_title: Option<Title>) -> Option<Title> {
    match slot {
        ExaminerSlot::First => Some(match supervisor_title {
            Some(Title::Professor) => Title::Professor,
            _ => Title::AssociateProfessor,
        }),
        ExaminerSlot::Second => None,
        ExaminerSlot::Third => Some(Title::Doctor),
    }
}

pub(crate) fn check_examiner(
    candidate: &Lecturer,
    student: &Student,
    draft: &ExaminerDraft,
    slot: ExaminerSlot,
    supervisor_title: Option<Title>,
    config: &EligibilityConfig,
) -> Result<(), Ineligibility> {
    if student.supervisors().any(|id| id == candidate.id) {
        return Err(Ineligibility::Supervises);
    }

    if let Some((other, _)) = draft.others(slot).find(|(_, id)| *id == candidate.id) {
        return Err(Ineligibility::AlreadyExamining { slot: other });
    }

    if slot.is_internal() && !config.is_internal(&candidate.university) {
        return Err(Ineligibility::ExternalInstitution);
    }

    if let Some(required) = required_title(slot, supervisor_title) {
        if !candidate.title.within(required.rank()) {
            return Err(Ineligibility::Seniority { required });
        }
    }

    Ok(())
}
