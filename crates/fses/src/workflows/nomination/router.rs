use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use super::domain::{
    Department, DepartmentId, ExaminerDraft, ExaminerSlot, Lecturer, LecturerId, NominationId,
    Student, StudentId,
};
use super::export::roster_file_name;
use super::overview::OverviewFilter;
use super::repository::FacultyStore;
use super::service::{FacultyService, FacultyServiceError, NominationRequest};

/// Router builder exposing the faculty collections and the engine derivations.
pub fn faculty_router<S>(service: Arc<FacultyService<S>>) -> Router
where
    S: FacultyStore + 'static,
{
    Router::new()
        .route("/fses/api/students/", get(list_students_handler::<S>))
        .route("/fses/api/student/create", post(create_student_handler::<S>))
        .route(
            "/fses/api/student/update/:id/",
            put(update_student_handler::<S>),
        )
        .route(
            "/fses/api/student/delete/:id/",
            axum::routing::delete(delete_student_handler::<S>),
        )
        .route("/fses/api/student/:id/", get(get_student_handler::<S>))
        .route(
            "/fses/api/student/:id/nomination/",
            put(save_nomination_handler::<S>),
        )
        .route(
            "/fses/api/student/:id/chairperson/",
            put(assign_chairperson_handler::<S>),
        )
        .route("/fses/api/student/:id/lock/", put(lock_handler::<S>))
        .route("/fses/api/student/:id/status/", get(status_handler::<S>))
        .route(
            "/fses/api/student/:id/eligible-examiners/",
            get(eligible_examiners_handler::<S>),
        )
        .route(
            "/fses/api/student/:id/eligible-chairpersons/",
            get(eligible_chairpersons_handler::<S>),
        )
        .route("/fses/api/lecturers/", get(list_lecturers_handler::<S>))
        .route(
            "/fses/api/lecturer/create",
            post(create_lecturer_handler::<S>),
        )
        .route(
            "/fses/api/lecturer/update/:id/",
            put(update_lecturer_handler::<S>),
        )
        .route(
            "/fses/api/lecturer/delete/:id/",
            axum::routing::delete(delete_lecturer_handler::<S>),
        )
        .route("/fses/api/lecturer/:id/", get(get_lecturer_handler::<S>))
        .route("/fses/api/departments/", get(list_departments_handler::<S>))
        .route(
            "/fses/api/department/create",
            post(create_department_handler::<S>),
        )
        .route(
            "/fses/api/department/update/:id/",
            put(update_department_handler::<S>),
        )
        .route(
            "/fses/api/department/delete/:id/",
            axum::routing::delete(delete_department_handler::<S>),
        )
        .route(
            "/fses/api/department/:id/",
            get(get_department_handler::<S>),
        )
        .route("/fses/api/nominations/", get(list_nominations_handler::<S>))
        .route(
            "/fses/api/nomination/:id/",
            get(get_nomination_handler::<S>),
        )
        .route("/fses/api/overview/", get(overview_handler::<S>))
        .route("/fses/api/workload/", get(workload_handler::<S>))
        .route("/fses/api/export/roster.csv", get(roster_csv_handler::<S>))
        .with_state(service)
}

/// Coordinator payload for `PUT /student/:id/chairperson/`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ChairpersonRequest {
    #[serde(default)]
    pub chairperson: Option<LecturerId>,
}

/// Coordinator payload for `PUT /student/:id/lock/`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LockRequest {
    pub is_locked: bool,
}

/// Query for examiner candidates. Any examiner given here replaces the stored draft.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ExaminerQuery {
    pub slot: ExaminerSlot,
    #[serde(default)]
    pub examiner1: Option<LecturerId>,
    #[serde(default)]
    pub examiner2: Option<LecturerId>,
    #[serde(default)]
    pub examiner3: Option<LecturerId>,
}

impl ExaminerQuery {
    fn draft(&self) -> Option<ExaminerDraft> {
        let draft = ExaminerDraft {
            examiner1: self.examiner1,
            examiner2: self.examiner2,
            examiner3: self.examiner3,
        };
        (draft != ExaminerDraft::default()).then_some(draft)
    }
}

type Shared<S> = State<Arc<FacultyService<S>>>;

fn respond<T: Serialize>(status: StatusCode, result: Result<T, FacultyServiceError>) -> Response {
    match result {
        Ok(body) => (status, Json(body)).into_response(),
        Err(err) => failure(err),
    }
}

fn failure(err: FacultyServiceError) -> Response {
    let status = err.status_code();
    if status.is_server_error() {
        error!(error = %err, "faculty request failed");
    }
    let payload = json!({
        "error": err.to_string(),
    });
    (status, Json(payload)).into_response()
}

fn deleted(result: Result<(), FacultyServiceError>) -> Response {
    match result {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => failure(err),
    }
}

pub(crate) async fn list_students_handler<S>(State(service): Shared<S>) -> Response
where
    S: FacultyStore + 'static,
{
    respond(StatusCode::OK, service.list_students())
}

pub(crate) async fn get_student_handler<S>(
    State(service): Shared<S>,
    Path(id): Path<u64>,
) -> Response
where
    S: FacultyStore + 'static,
{
    respond(StatusCode::OK, service.get_student(StudentId(id)))
}

pub(crate) async fn create_student_handler<S>(
    State(service): Shared<S>,
    Json(student): Json<Student>,
) -> Response
where
    S: FacultyStore + 'static,
{
    respond(StatusCode::CREATED, service.create_student(student))
}

pub(crate) async fn update_student_handler<S>(
    State(service): Shared<S>,
    Path(id): Path<u64>,
    Json(student): Json<Student>,
) -> Response
where
    S: FacultyStore + 'static,
{
    respond(StatusCode::OK, service.update_student(StudentId(id), student))
}

pub(crate) async fn delete_student_handler<S>(
    State(service): Shared<S>,
    Path(id): Path<u64>,
) -> Response
where
    S: FacultyStore + 'static,
{
    deleted(service.delete_student(StudentId(id)))
}

pub(crate) async fn list_lecturers_handler<S>(State(service): Shared<S>) -> Response
where
    S: FacultyStore + 'static,
{
    respond(StatusCode::OK, service.list_lecturers())
}

pub(crate) async fn get_lecturer_handler<S>(
    State(service): Shared<S>,
    Path(id): Path<u64>,
) -> Response
where
    S: FacultyStore + 'static,
{
    respond(StatusCode::OK, service.get_lecturer(LecturerId(id)))
}

pub(crate) async fn create_lecturer_handler<S>(
    State(service): Shared<S>,
    Json(lecturer): Json<Lecturer>,
) -> Response
where
    S: FacultyStore + 'static,
{
    respond(StatusCode::CREATED, service.create_lecturer(lecturer))
}

pub(crate) async fn update_lecturer_handler<S>(
    State(service): Shared<S>,
    Path(id): Path<u64>,
    Json(lecturer): Json<Lecturer>,
) -> Response
where
    S: FacultyStore + 'static,
{
    respond(
        StatusCode::OK,
        service.update_lecturer(LecturerId(id), lecturer),
    )
}

pub(crate) async fn delete_lecturer_handler<S>(
    State(service): Shared<S>,
    Path(id): Path<u64>,
) -> Response
where
    S: FacultyStore + 'static,
{
    deleted(service.delete_lecturer(LecturerId(id)))
}

pub(crate) async fn list_departments_handler<S>(State(service): Shared<S>) -> Response
where
    S: FacultyStore + 'static,
{
    respond(StatusCode::OK, service.list_departments())
}

pub(crate) async fn get_department_handler<S>(
    State(service): Shared<S>,
    Path(id): Path<u64>,
) -> Response
where
    S: FacultyStore + 'static,
{
    respond(StatusCode::OK, service.get_department(DepartmentId(id)))
}

pub(crate) async fn create_department_handler<S>(
    State(service): Shared<S>,
    Json(department): Json<Department>,
) -> Response
where
    S: FacultyStore + 'static,
{
    respond(StatusCode::CREATED, service.create_department(department))
}

pub(crate) async fn update_department_handler<S>(
    State(service): Shared<S>,
    Path(id): Path<u64>,
    Json(department): Json<Department>,
) -> Response
where
    S: FacultyStore + 'static,
{
    respond(
        StatusCode::OK,
        service.update_department(DepartmentId(id), department),
    )
}

pub(crate) async fn delete_department_handler<S>(
    State(service): Shared<S>,
    Path(id): Path<u64>,
) -> Response
where
    S: FacultyStore + 'static,
{
    deleted(service.delete_department(DepartmentId(id)))
}

pub(crate) async fn list_nominations_handler<S>(State(service): Shared<S>) -> Response
where
    S: FacultyStore + 'static,
{
    respond(StatusCode::OK, service.list_nominations())
}

pub(crate) async fn get_nomination_handler<S>(
    State(service): Shared<S>,
    Path(id): Path<u64>,
) -> Response
where
    S: FacultyStore + 'static,
{
    respond(StatusCode::OK, service.get_nomination(NominationId(id)))
}

pub(crate) async fn save_nomination_handler<S>(
    State(service): Shared<S>,
    Path(id): Path<u64>,
    Json(request): Json<NominationRequest>,
) -> Response
where
    S: FacultyStore + 'static,
{
    respond(StatusCode::OK, service.save_nomination(StudentId(id), request))
}

pub(crate) async fn assign_chairperson_handler<S>(
    State(service): Shared<S>,
    Path(id): Path<u64>,
    Json(request): Json<ChairpersonRequest>,
) -> Response
where
    S: FacultyStore + 'static,
{
    respond(
        StatusCode::OK,
        service.assign_chairperson(StudentId(id), request.chairperson),
    )
}

pub(crate) async fn lock_handler<S>(
    State(service): Shared<S>,
    Path(id): Path<u64>,
    Json(request): Json<LockRequest>,
) -> Response
where
    S: FacultyStore + 'static,
{
    respond(
        StatusCode::OK,
        service.set_lock(StudentId(id), request.is_locked),
    )
}

pub(crate) async fn status_handler<S>(State(service): Shared<S>, Path(id): Path<u64>) -> Response
where
    S: FacultyStore + 'static,
{
    respond(StatusCode::OK, service.status(StudentId(id)))
}

pub(crate) async fn eligible_examiners_handler<S>(
    State(service): Shared<S>,
    Path(id): Path<u64>,
    Query(query): Query<ExaminerQuery>,
) -> Response
where
    S: FacultyStore + 'static,
{
    respond(
        StatusCode::OK,
        service.eligible_examiners(StudentId(id), query.slot, query.draft()),
    )
}

pub(crate) async fn eligible_chairpersons_handler<S>(
    State(service): Shared<S>,
    Path(id): Path<u64>,
) -> Response
where
    S: FacultyStore + 'static,
{
    respond(StatusCode::OK, service.eligible_chairpersons(StudentId(id)))
}

pub(crate) async fn overview_handler<S>(
    State(service): Shared<S>,
    Query(filter): Query<OverviewFilter>,
) -> Response
where
    S: FacultyStore + 'static,
{
    respond(StatusCode::OK, service.overview(&filter))
}

pub(crate) async fn workload_handler<S>(State(service): Shared<S>) -> Response
where
    S: FacultyStore + 'static,
{
    respond(StatusCode::OK, service.workload())
}

pub(crate) async fn roster_csv_handler<S>(
    State(service): Shared<S>,
    Query(filter): Query<OverviewFilter>,
) -> Response
where
    S: FacultyStore + 'static,
{
    match service.roster_csv(&filter) {
        Ok(body) => {
            let disposition = format!(
                "attachment; filename=\"{}\"",
                roster_file_name(Utc::now().date_naive())
            );
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                body,
            )
                .into_response()
        }
        Err(err) => failure(err),
    }
}
