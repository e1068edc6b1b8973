use super::super::domain::{ExaminerSlot, Lecturer, Nomination, Student, Title};
use super::config::EligibilityConfig;
use super::rejection::Ineligibility;
use super::roster::Roster;

/// Facts about a nomination that every chair candidate is measured against.
pub(crate) struct ChairContext<'a> {
    pub student: &'a Student,
    pub nomination: &'a Nomination,
    pub requires_professor: bool,
}

impl<'a> ChairContext<'a> {
    pub(crate) fn prepare(
        student: &'a Student,
        nomination: Option<&'a Nomination>,
        roster: &Roster<'_>,
    ) -> Result<Self, Ineligibility> {
        let nomination = nomination
            .filter(|n| n.student == student.id)
            .ok_or(Ineligibility::NoNomination)?;

        if !nomination.examiners_complete() {
            return Err(Ineligibility::ExaminersIncomplete);
        }

        let requires_professor = std::iter::once(student.supervisor)
            .chain(nomination.examiners.assigned().map(Some))
            .any(|id| roster.title_of(id) == Some(Title::Professor));

        Ok(Self {
            student,
            nomination,
            requires_professor,
        })
    }
}

pub(crate) fn check_chairperson(
    candidate: &Lecturer,
    context: &ChairContext<'_>,
    roster: &Roster<'_>,
    config: &EligibilityConfig,
) -> Result<(), Ineligibility> {
    if !config.is_internal(&candidate.university) {
        return Err(Ineligibility::ExternalInstitution);
    }

    if !candidate.title.within(Title::AssociateProfessor.rank()) {
        return Err(Ineligibility::Seniority {
            required: Title::AssociateProfessor,
        });
    }

    if context.requires_professor && !candidate.title.is_professor() {
        return Err(Ineligibility::Seniority {
            required: Title::Professor,
        });
    }

    if context.student.supervisors().any(|id| id == candidate.id) {
        return Err(Ineligibility::Supervises);
    }

    let examiners = &context.nomination.examiners;
    if let Some(slot) = ExaminerSlot::ordered()
        .into_iter()
        .find(|slot| examiners.get(*slot) == Some(candidate.id))
    {
        return Err(Ineligibility::AlreadyExamining { slot });
    }

    let department = context.student.department;
    let sessions = chair_sessions_in_department(candidate, context.student, roster);
    if sessions >= config.chair_session_cap {
        return Err(Ineligibility::ChairLimitReached {
            department,
            sessions,
            cap: config.chair_session_cap,
        });
    }

    Ok(())
}

/// Sessions the candidate already chairs for other students of the target's department.
pub(crate) fn chair_sessions_in_department(
    candidate: &Lecturer,
    target: &Student,
    roster: &Roster<'_>,
) -> usize {
    roster
        .nominations()
        .iter()
        .filter(|n| n.student != target.id && n.chairperson == Some(candidate.id))
        .filter(|n| {
            roster
                .student(n.student)
                .is_some_and(|s| s.department == target.department)
        })
        .count()
}
