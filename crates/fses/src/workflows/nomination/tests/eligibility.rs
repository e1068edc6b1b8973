use super::common::*;
use crate::workflows::nomination::domain::{ExaminerDraft, ExaminerSlot, LecturerId, Title};
use crate::workflows::nomination::status::{derive_status, NominationStatus};
use crate::workflows::nomination::{EligibilityConfig, EligibilityEngine, Ineligibility, Roster};

fn engine() -> EligibilityEngine {
    EligibilityEngine::default()
}

fn promote_supervisor(lecturers: &mut [crate::workflows::nomination::Lecturer]) {
    lecturers
        .iter_mut()
        .find(|l| l.id == LecturerId(1))
        .expect("supervisor fixture")
        .title = Title::Professor;
}

#[test]
fn associate_supervisor_scenario_admits_senior_internal_chairs() {
    let student = scenario_student();
    let nomination = scenario_nomination();
    let lecturers = lecturers();
    let students = vec![student.clone()];
    let nominations = vec![nomination.clone()];

    assert_eq!(
        derive_status(&student, Some(&nomination)),
        NominationStatus::PendingChairAssignment
    );

    let chairs = engine().eligible_chairpersons(
        &student,
        &lecturers,
        &students,
        &nominations,
        Some(&nomination),
    );

    assert_eq!(
        names(&chairs),
        vec!["Elena Petrova", "Fauzi Ismail", "Ismail Zakaria"]
    );
    for excluded in [1, 2, 3, 4] {
        assert!(!ids(&chairs).contains(&excluded), "L{excluded} must be excluded");
    }
}

#[test]
fn professor_supervisor_restricts_chairs_to_professors() {
    let student = scenario_student();
    let nomination = scenario_nomination();
    let mut lecturers = lecturers();
    promote_supervisor(&mut lecturers);

    let chairs = engine().eligible_chairpersons(
        &student,
        &lecturers,
        &[student.clone()],
        &[nomination.clone()],
        Some(&nomination),
    );

    assert_eq!(ids(&chairs), vec![5, 9]);
    assert!(chairs.iter().all(|l| l.title == Title::Professor));
}

#[test]
fn professor_examiner_also_escalates_chair_seniority() {
    let student = scenario_student();
    let nomination = nomination(1, 1, [Some(2), Some(8), Some(4)], None);

    let chairs = engine().eligible_chairpersons(
        &student,
        &lecturers(),
        &[student.clone()],
        &[nomination.clone()],
        Some(&nomination),
    );

    assert_eq!(ids(&chairs), vec![5, 9]);
}

#[test]
fn chairs_require_complete_examiners() {
    let student = scenario_student();
    let partial = nomination(1, 1, [Some(2), None, Some(4)], None);
    let engine = engine();

    assert!(engine
        .eligible_chairpersons(&student, &lecturers(), &[], &[], None)
        .is_empty());
    assert!(engine
        .eligible_chairpersons(
            &student,
            &lecturers(),
            &[student.clone()],
            &[partial.clone()],
            Some(&partial)
        )
        .is_empty());
}

#[test]
fn chair_cap_is_per_department() {
    let target = scenario_student();
    let ee_student = student(20, "Wong Kar Yee", EE, 6);
    let mut students = vec![target.clone(), ee_student.clone()];
    let mut nominations = vec![
        scenario_nomination(),
        nomination(20, 20, [Some(2), Some(3), Some(4)], None),
    ];
    for id in 10..14 {
        students.push(student(id, &format!("CS student {id}"), CS, 2));
        nominations.push(nomination(id, id, [Some(4), Some(3), Some(7)], Some(5)));
    }
    let lecturers = lecturers();
    let engine = engine();

    let cs_chairs = engine.eligible_chairpersons(
        &target,
        &lecturers,
        &students,
        &nominations,
        Some(&nominations[0]),
    );
    assert!(!ids(&cs_chairs).contains(&5), "fifth CS chair must be refused");

    let roster = Roster::new(&lecturers, &students, &nominations);
    assert_eq!(
        engine.chairperson_eligibility(&target, &roster, Some(&nominations[0]), LecturerId(5)),
        Err(Ineligibility::ChairLimitReached {
            department: CS,
            sessions: 4,
            cap: 4,
        })
    );

    let ee_chairs = engine.eligible_chairpersons(
        &ee_student,
        &lecturers,
        &students,
        &nominations,
        Some(&nominations[1]),
    );
    assert!(ids(&ee_chairs).contains(&5), "EE sessions are counted separately");
}

#[test]
fn chair_cap_follows_configuration() {
    let target = scenario_student();
    let mut students = vec![target.clone()];
    let mut nominations = vec![scenario_nomination()];
    students.push(student(10, "CS student 10", CS, 2));
    nominations.push(nomination(10, 10, [Some(4), Some(3), Some(7)], Some(5)));

    let engine = EligibilityEngine::new(EligibilityConfig {
        chair_session_cap: 1,
        ..EligibilityConfig::default()
    });
    let chairs = engine.eligible_chairpersons(
        &target,
        &lecturers(),
        &students,
        &nominations,
        Some(&nominations[0]),
    );

    assert_eq!(ids(&chairs), vec![6, 9]);
}

#[test]
fn first_examiner_seniority_tracks_supervisor() {
    let student = scenario_student();
    let mut lecturers = lecturers();
    let engine = engine();
    let empty = ExaminerDraft::default();

    let candidates = engine.eligible_examiners(&student, &lecturers, &empty, ExaminerSlot::First);
    assert_eq!(ids(&candidates), vec![2, 4, 5, 6, 9]);

    promote_supervisor(&mut lecturers);
    let candidates = engine.eligible_examiners(&student, &lecturers, &empty, ExaminerSlot::First);
    assert_eq!(ids(&candidates), vec![5, 9]);
}

#[test]
fn second_examiner_admits_external_lecturers() {
    let student = scenario_student();
    let candidates = engine().eligible_examiners(
        &student,
        &lecturers(),
        &ExaminerDraft::default(),
        ExaminerSlot::Second,
    );

    assert!(ids(&candidates).contains(&8));
    assert!(!ids(&candidates).contains(&1));
    assert_eq!(candidates.len(), 8);
}

#[test]
fn third_examiner_is_internal_with_any_title() {
    let student = scenario_student();
    let candidates = engine().eligible_examiners(
        &student,
        &lecturers(),
        &ExaminerDraft::default(),
        ExaminerSlot::Third,
    );

    assert_eq!(ids(&candidates), vec![2, 3, 4, 5, 6, 7, 9]);
}

#[test]
fn examiners_exclude_lecturers_in_other_draft_slots() {
    let student = scenario_student();
    let draft = draft([Some(2), Some(8), None]);
    let engine = engine();

    let third = engine.eligible_examiners(&student, &lecturers(), &draft, ExaminerSlot::Third);
    assert!(!ids(&third).contains(&2));
    assert!(!ids(&third).contains(&8));

    let first = engine.eligible_examiners(&student, &lecturers(), &draft, ExaminerSlot::First);
    assert!(ids(&first).contains(&2), "a lecturer may keep their own slot");

    assert_eq!(
        engine.examiner_eligibility(
            &student,
            &lecturers(),
            &draft,
            ExaminerSlot::Third,
            LecturerId(2)
        ),
        Err(Ineligibility::AlreadyExamining {
            slot: ExaminerSlot::First
        })
    );
}

#[test]
fn co_supervisor_is_never_a_candidate() {
    let mut student = scenario_student();
    student.co_supervisor = Some(LecturerId(5));
    let nomination = scenario_nomination();
    let engine = engine();

    let examiners = engine.eligible_examiners(
        &student,
        &lecturers(),
        &ExaminerDraft::default(),
        ExaminerSlot::Second,
    );
    assert!(!ids(&examiners).contains(&5));

    let chairs = engine.eligible_chairpersons(
        &student,
        &lecturers(),
        &[student.clone()],
        &[nomination.clone()],
        Some(&nomination),
    );
    assert_eq!(ids(&chairs), vec![6, 9]);
}

#[test]
fn unknown_lecturer_is_reported() {
    let student = scenario_student();
    assert_eq!(
        engine().examiner_eligibility(
            &student,
            &lecturers(),
            &ExaminerDraft::default(),
            ExaminerSlot::Second,
            LecturerId(99)
        ),
        Err(Ineligibility::UnknownLecturer)
    );
}

#[test]
fn home_institution_comparison_ignores_case_and_padding() {
    let config = EligibilityConfig {
        home_institution: "utm".to_string(),
        ..EligibilityConfig::default()
    };
    assert!(config.is_internal(" UTM "));
    assert!(!config.is_internal("UM"));
}
