use super::common::*;
use crate::workflows::nomination::domain::{LecturerId, Program, StudentId};
use crate::workflows::nomination::{NominationRequest, NominationStatus, OverviewFilter};

fn service_with_second_student() -> crate::workflows::nomination::FacultyService<MemoryStore> {
    let (service, _) = build_service();
    let mut second = student(0, "Ahmad Faiz", EE, 6);
    second.program = Program::Mphil;
    let second = service.create_student(second).expect("student created");
    service
        .save_nomination(
            second.id,
            NominationRequest {
                research_title: Some("Smart grid forecasting".to_string()),
                examiners: draft([Some(2), None, None]),
            },
        )
        .expect("nomination saved");
    service
        .assign_chairperson(StudentId(1), Some(LecturerId(5)))
        .expect("chair assigned");
    service
}

#[test]
fn overview_rows_resolve_names_and_status() {
    let service = service_with_second_student();

    let page = service
        .overview(&OverviewFilter::default())
        .expect("overview");

    assert_eq!(page.rows.len(), 2);
    assert_eq!(page.rows[0].name, "Ahmad Faiz");
    assert_eq!(page.rows[0].department_name, "Electrical Engineering");
    assert_eq!(page.rows[0].examiner1.as_deref(), Some("Bakar Salleh"));
    assert_eq!(page.rows[0].status, NominationStatus::PendingExaminerNomination);

    let scenario = &page.rows[1];
    assert_eq!(scenario.supervisor.as_deref(), Some("Aishah Karim"));
    assert_eq!(scenario.chairperson.as_deref(), Some("Elena Petrova"));
    assert_eq!(scenario.status_label, "Chair Assigned");

    assert_eq!(page.tally.total, 2);
    assert_eq!(page.tally.count(NominationStatus::ChairAssigned), 1);
    assert_eq!(page.tally.by_program.get("MPhil"), Some(&1));
}

#[test]
fn overview_filters_combine() {
    let service = service_with_second_student();

    let by_status = service
        .overview(&OverviewFilter {
            status: Some(NominationStatus::ChairAssigned),
            ..OverviewFilter::default()
        })
        .expect("overview");
    assert_eq!(by_status.rows.len(), 1);
    assert_eq!(by_status.rows[0].student_id, StudentId(1));
    assert_eq!(by_status.tally.total, 1);

    let by_search = service
        .overview(&OverviewFilter {
            search: Some("grid".to_string()),
            ..OverviewFilter::default()
        })
        .expect("overview");
    assert_eq!(by_search.rows.len(), 1);
    assert_eq!(by_search.rows[0].name, "Ahmad Faiz");

    let by_examiner_name = service
        .overview(&OverviewFilter {
            search: Some("petrova".to_string()),
            ..OverviewFilter::default()
        })
        .expect("overview");
    assert_eq!(by_examiner_name.rows.len(), 1);

    let none = service
        .overview(&OverviewFilter {
            program: Some(Program::Mphil),
            department: Some(CS),
            ..OverviewFilter::default()
        })
        .expect("overview");
    assert!(none.rows.is_empty());
    assert_eq!(none.tally.count(NominationStatus::PendingChairAssignment), 0);
}

#[test]
fn roster_csv_lists_panel_in_upper_case() {
    let service = service_with_second_student();

    let csv = service
        .roster_csv(&OverviewFilter::default())
        .expect("csv export");
    let mut lines = csv.lines();

    let header = lines.next().expect("header");
    assert!(header.starts_with("Student,Program,Department"));
    assert!(header.ends_with("Chairperson,Status,Locked"));

    let first = lines.next().expect("first row");
    assert!(first.starts_with("AHMAD FAIZ,MPhil,Electrical Engineering"));
    let second = lines.next().expect("second row");
    assert!(second.contains("RESEARCH TOPIC 1"));
    assert!(second.contains("ELENA PETROVA,Chair Assigned,no"));
    assert!(lines.next().is_none());
}

#[test]
fn workload_counts_every_panel_seat() {
    let service = service_with_second_student();

    let report = service.workload().expect("workload");

    assert_eq!(report.examiner_sessions(LecturerId(2)), 2);
    assert_eq!(report.examiner_sessions(LecturerId(3)), 1);
    assert_eq!(report.chairperson_sessions(LecturerId(5)), 1);
    assert_eq!(report.examiner_counts[0].name, "Bakar Salleh");
    assert_eq!(report.total_examiners, 3);
    assert_eq!(report.total_chairpersons, 1);
    assert!((report.average_sessions_per_examiner - 4.0 / 3.0).abs() < f32::EPSILON);
}
