use std::sync::{Arc, Mutex, MutexGuard};

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::domain::{
    Department, DepartmentId, ExaminerDraft, ExaminerSlot, Lecturer, LecturerId, Nomination,
    NominationId, Student, StudentId,
};
use super::eligibility::{EligibilityConfig, EligibilityEngine, Ineligibility, Roster};
use super::export::roster_csv;
use super::overview::{build_overview, filter_overview, OverviewFilter, OverviewPage};
use super::repository::{FacultySnapshot, FacultyStore, Record, RepositoryError};
use super::status::{derive_status, NominationStatus};
use super::workload::{compute_workload, WorkloadReport};

/// Supervisor payload for creating or editing a nomination.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NominationRequest {
    #[serde(default)]
    pub research_title: Option<String>,
    #[serde(flatten)]
    pub examiners: ExaminerDraft,
}

/// Derived workflow position of one student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentStatusView {
    pub student: StudentId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nomination: Option<NominationId>,
    pub status: NominationStatus,
    pub status_label: &'static str,
    pub is_locked: bool,
}

/// Service composing the faculty store and the eligibility engine behind role operations.
///
/// Mutations run one at a time: each holds `writes` from its snapshot read until its last
/// store write, so rules that read the whole faculty (one nomination per student, the chair
/// session cap) see every earlier change.
pub struct FacultyService<S> {
    store: Arc<S>,
    engine: Arc<EligibilityEngine>,
    writes: Mutex<()>,
}

impl<S> FacultyService<S>
where
    S: FacultyStore + 'static,
{
    pub fn new(store: Arc<S>, config: EligibilityConfig) -> Self {
        Self {
            store,
            engine: Arc::new(EligibilityEngine::new(config)),
            writes: Mutex::new(()),
        }
    }

    pub fn engine(&self) -> &EligibilityEngine {
        &self.engine
    }

    pub fn snapshot(&self) -> Result<FacultySnapshot, FacultyServiceError> {
        Ok(FacultySnapshot::load(self.store.as_ref())?)
    }

    pub fn list_students(&self) -> Result<Vec<Student>, FacultyServiceError> {
        Ok(self.store.students().list()?)
    }

    pub fn get_student(&self, id: StudentId) -> Result<Student, FacultyServiceError> {
        found(self.store.students().fetch(id)?, id)
    }

    pub fn create_student(&self, student: Student) -> Result<Student, FacultyServiceError> {
        let _writes = self.exclusive()?;
        self.validate_student(&student)?;
        let stored = self.store.students().insert(student)?;
        info!(student = %stored.id, name = %stored.name, "student created");
        Ok(stored)
    }

    pub fn update_student(
        &self,
        id: StudentId,
        mut student: Student,
    ) -> Result<Student, FacultyServiceError> {
        let _writes = self.exclusive()?;
        self.get_student(id)?;
        student.id = id;
        self.validate_student(&student)?;

        let mut snapshot = self.snapshot()?;
        if let Some(stored) = snapshot.students.iter_mut().find(|s| s.id == id) {
            *stored = student.clone();
        }
        if let Some(nomination) = snapshot.nomination_for(id) {
            self.verify_panel(&snapshot, nomination)?;
        }

        Ok(self.store.students().update(student)?)
    }

    /// Remove a student together with its nomination.
    pub fn delete_student(&self, id: StudentId) -> Result<(), FacultyServiceError> {
        let _writes = self.exclusive()?;
        self.get_student(id)?;
        let nominations = self.store.nominations();
        for nomination in nominations.list()?.into_iter().filter(|n| n.student == id) {
            nominations.delete(nomination.id)?;
            info!(student = %id, nomination = %nomination.id, "nomination removed with student");
        }
        self.store.students().delete(id)?;
        info!(student = %id, "student deleted");
        Ok(())
    }

    pub fn list_lecturers(&self) -> Result<Vec<Lecturer>, FacultyServiceError> {
        Ok(self.store.lecturers().list()?)
    }

    pub fn get_lecturer(&self, id: LecturerId) -> Result<Lecturer, FacultyServiceError> {
        found(self.store.lecturers().fetch(id)?, id)
    }

    pub fn create_lecturer(&self, lecturer: Lecturer) -> Result<Lecturer, FacultyServiceError> {
        let _writes = self.exclusive()?;
        self.validate_lecturer(&lecturer)?;
        let stored = self.store.lecturers().insert(lecturer)?;
        info!(lecturer = %stored.id, name = %stored.name, "lecturer created");
        Ok(stored)
    }

    pub fn update_lecturer(
        &self,
        id: LecturerId,
        mut lecturer: Lecturer,
    ) -> Result<Lecturer, FacultyServiceError> {
        let _writes = self.exclusive()?;
        self.get_lecturer(id)?;
        lecturer.id = id;
        self.validate_lecturer(&lecturer)?;

        // Title and university feed every panel the lecturer sits on or supervises.
        let mut snapshot = self.snapshot()?;
        if let Some(stored) = snapshot.lecturers.iter_mut().find(|l| l.id == id) {
            *stored = lecturer.clone();
        }
        let affected = snapshot.nominations.iter().filter(|nomination| {
            nomination.panel().any(|member| member == id)
                || snapshot
                    .student(nomination.student)
                    .is_some_and(|student| student.supervisors().any(|s| s == id))
        });
        for nomination in affected {
            self.verify_panel(&snapshot, nomination)?;
        }

        Ok(self.store.lecturers().update(lecturer)?)
    }

    /// Remove a lecturer and clear every supervision and panel reference to them. A panel that
    /// loses an examiner also loses its chairperson.
    pub fn delete_lecturer(&self, id: LecturerId) -> Result<(), FacultyServiceError> {
        let _writes = self.exclusive()?;
        self.get_lecturer(id)?;

        let students = self.store.students();
        for mut student in students.list()? {
            let mut touched = false;
            for slot in [&mut student.supervisor, &mut student.co_supervisor] {
                if *slot == Some(id) {
                    *slot = None;
                    touched = true;
                }
            }
            if touched {
                students.update(student)?;
            }
        }

        let nominations = self.store.nominations();
        for mut nomination in nominations.list()? {
            if !nomination.panel().any(|member| member == id) {
                continue;
            }
            let examiners = &mut nomination.examiners;
            let mut examiner_removed = false;
            for slot in [
                &mut examiners.examiner1,
                &mut examiners.examiner2,
                &mut examiners.examiner3,
            ] {
                if *slot == Some(id) {
                    *slot = None;
                    examiner_removed = true;
                }
            }
            if examiner_removed || nomination.chairperson == Some(id) {
                nomination.chairperson = None;
            }
            nominations.update(nomination)?;
        }

        self.store.lecturers().delete(id)?;
        info!(lecturer = %id, "lecturer deleted");
        Ok(())
    }

    pub fn list_departments(&self) -> Result<Vec<Department>, FacultyServiceError> {
        Ok(self.store.departments().list()?)
    }

    pub fn get_department(&self, id: DepartmentId) -> Result<Department, FacultyServiceError> {
        found(self.store.departments().fetch(id)?, id)
    }

    pub fn create_department(
        &self,
        department: Department,
    ) -> Result<Department, FacultyServiceError> {
        require_text("department name", &department.name)?;
        let _writes = self.exclusive()?;
        Ok(self.store.departments().insert(department)?)
    }

    pub fn update_department(
        &self,
        id: DepartmentId,
        mut department: Department,
    ) -> Result<Department, FacultyServiceError> {
        let _writes = self.exclusive()?;
        self.get_department(id)?;
        department.id = id;
        require_text("department name", &department.name)?;
        Ok(self.store.departments().update(department)?)
    }

    /// Remove a department that no student or lecturer belongs to.
    pub fn delete_department(&self, id: DepartmentId) -> Result<(), FacultyServiceError> {
        let _writes = self.exclusive()?;
        self.get_department(id)?;
        let in_use = self
            .store
            .students()
            .list()?
            .iter()
            .any(|s| s.department == id)
            || self
                .store
                .lecturers()
                .list()?
                .iter()
                .any(|l| l.department == id);
        if in_use {
            return Err(FacultyServiceError::InUse {
                kind: Department::KIND,
                id: id.to_string(),
            });
        }
        self.store.departments().delete(id)?;
        Ok(())
    }

    pub fn list_nominations(&self) -> Result<Vec<Nomination>, FacultyServiceError> {
        Ok(self.store.nominations().list()?)
    }

    pub fn get_nomination(&self, id: NominationId) -> Result<Nomination, FacultyServiceError> {
        found(self.store.nominations().fetch(id)?, id)
    }

    /// Supervisor save: creates the nomination on first save, otherwise updates the research
    /// title and examiners. Each examiner must be eligible for its slot against the submitted
    /// draft. A changed examiner panel clears the chairperson so it is re-assigned.
    pub fn save_nomination(
        &self,
        student_id: StudentId,
        request: NominationRequest,
    ) -> Result<Nomination, FacultyServiceError> {
        let _writes = self.exclusive()?;
        let snapshot = self.snapshot()?;
        let student = snapshot
            .student(student_id)
            .ok_or_else(|| not_found::<Student>(student_id))?;
        let existing = snapshot.nomination_for(student_id).cloned();

        if let Some(nomination) = existing.as_ref().filter(|n| n.is_locked) {
            warn!(
                student = %student_id,
                nomination = %nomination.id,
                "edit rejected on locked nomination"
            );
            return Err(FacultyServiceError::Locked(nomination.id));
        }

        let research_title = request
            .research_title
            .map(|title| title.trim().to_string())
            .filter(|title| !title.is_empty())
            .or_else(|| existing.as_ref().and_then(|n| n.research_title.clone()));
        let Some(research_title) = research_title else {
            return Err(FacultyServiceError::Validation(
                "a research title is required before nominating examiners".to_string(),
            ));
        };

        let draft = request.examiners;
        for slot in ExaminerSlot::ordered() {
            let Some(lecturer) = draft.get(slot) else {
                continue;
            };
            self.engine
                .examiner_eligibility(student, &snapshot.lecturers, &draft, slot, lecturer)
                .map_err(|reason| examiner_rejected(student_id, slot, lecturer, reason))?;
        }

        let stored = match existing {
            Some(mut nomination) => {
                if nomination.examiners != draft && nomination.chairperson.take().is_some() {
                    info!(nomination = %nomination.id, "chairperson cleared after examiner change");
                }
                nomination.research_title = Some(research_title);
                nomination.examiners = draft;
                self.store.nominations().update(nomination)?
            }
            None => {
                let mut nomination = Nomination::new(student_id, research_title);
                nomination.examiners = draft;
                let stored = self.store.nominations().insert(nomination)?;
                info!(student = %student_id, nomination = %stored.id, "nomination created");
                stored
            }
        };

        Ok(stored)
    }

    /// Coordinator/PGAM chair assignment. `None` clears the chair.
    pub fn assign_chairperson(
        &self,
        student_id: StudentId,
        chairperson: Option<LecturerId>,
    ) -> Result<Nomination, FacultyServiceError> {
        let _writes = self.exclusive()?;
        let snapshot = self.snapshot()?;
        let student = snapshot
            .student(student_id)
            .ok_or_else(|| not_found::<Student>(student_id))?;
        let nomination = snapshot.nomination_for(student_id);

        if let Some(lecturer) = chairperson {
            let roster = Roster::new(
                &snapshot.lecturers,
                &snapshot.students,
                &snapshot.nominations,
            );
            self.engine
                .chairperson_eligibility(student, &roster, nomination, lecturer)
                .map_err(|reason| chairperson_rejected(student_id, lecturer, reason))?;
        }

        let mut nomination = nomination
            .cloned()
            .ok_or(FacultyServiceError::NoNomination(student_id))?;
        nomination.chairperson = chairperson;
        let stored = self.store.nominations().update(nomination)?;
        info!(
            student = %student_id,
            nomination = %stored.id,
            chairperson = ?chairperson,
            "chairperson assigned"
        );
        Ok(stored)
    }

    /// Freeze or release supervisor edits. Locking needs an assigned chairperson.
    pub fn set_lock(
        &self,
        student_id: StudentId,
        locked: bool,
    ) -> Result<Nomination, FacultyServiceError> {
        let _writes = self.exclusive()?;
        let student = self.get_student(student_id)?;
        let mut nomination = self
            .store
            .nominations()
            .list()?
            .into_iter()
            .find(|n| n.student == student_id)
            .ok_or(FacultyServiceError::NoNomination(student_id))?;

        if locked && derive_status(&student, Some(&nomination)) != NominationStatus::ChairAssigned
        {
            return Err(FacultyServiceError::Validation(
                "a nomination can only be locked once its chairperson is assigned".to_string(),
            ));
        }

        nomination.is_locked = locked;
        let stored = self.store.nominations().update(nomination)?;
        info!(
            student = %student_id,
            nomination = %stored.id,
            locked,
            "nomination lock updated"
        );
        Ok(stored)
    }

    pub fn status(&self, student_id: StudentId) -> Result<StudentStatusView, FacultyServiceError> {
        let student = self.get_student(student_id)?;
        let nomination = self
            .store
            .nominations()
            .list()?
            .into_iter()
            .find(|n| n.student == student_id);
        let status = derive_status(&student, nomination.as_ref());

        Ok(StudentStatusView {
            student: student_id,
            nomination: nomination.as_ref().map(|n| n.id),
            status,
            status_label: status.label(),
            is_locked: nomination.is_some_and(|n| n.is_locked),
        })
    }

    /// Candidates for `slot`. Without an explicit draft the stored examiners are used.
    pub fn eligible_examiners(
        &self,
        student_id: StudentId,
        slot: ExaminerSlot,
        draft: Option<ExaminerDraft>,
    ) -> Result<Vec<Lecturer>, FacultyServiceError> {
        let snapshot = self.snapshot()?;
        let student = snapshot
            .student(student_id)
            .ok_or_else(|| not_found::<Student>(student_id))?;
        let draft = draft.unwrap_or_else(|| {
            snapshot
                .nomination_for(student_id)
                .map(|n| n.examiners)
                .unwrap_or_default()
        });
        Ok(self
            .engine
            .eligible_examiners(student, &snapshot.lecturers, &draft, slot))
    }

    pub fn eligible_chairpersons(
        &self,
        student_id: StudentId,
    ) -> Result<Vec<Lecturer>, FacultyServiceError> {
        let snapshot = self.snapshot()?;
        let student = snapshot
            .student(student_id)
            .ok_or_else(|| not_found::<Student>(student_id))?;
        Ok(self.engine.eligible_chairpersons(
            student,
            &snapshot.lecturers,
            &snapshot.students,
            &snapshot.nominations,
            snapshot.nomination_for(student_id),
        ))
    }

    pub fn workload(&self) -> Result<WorkloadReport, FacultyServiceError> {
        let snapshot = self.snapshot()?;
        Ok(compute_workload(&snapshot.nominations, &snapshot.lecturers))
    }

    pub fn overview(&self, filter: &OverviewFilter) -> Result<OverviewPage, FacultyServiceError> {
        let snapshot = self.snapshot()?;
        let rows = build_overview(
            &snapshot.students,
            &snapshot.lecturers,
            &snapshot.departments,
            &snapshot.nominations,
        );
        Ok(filter_overview(rows, filter))
    }

    pub fn roster_csv(&self, filter: &OverviewFilter) -> Result<String, FacultyServiceError> {
        let page = self.overview(filter)?;
        Ok(roster_csv(&page.rows)?)
    }

    fn exclusive(&self) -> Result<MutexGuard<'_, ()>, FacultyServiceError> {
        self.writes.lock().map_err(|_| {
            FacultyServiceError::Repository(RepositoryError::Unavailable(
                "faculty write lock poisoned".to_string(),
            ))
        })
    }

    /// Re-checks a stored panel against `snapshot`, which already carries the pending edit.
    fn verify_panel(
        &self,
        snapshot: &FacultySnapshot,
        nomination: &Nomination,
    ) -> Result<(), FacultyServiceError> {
        let Some(student) = snapshot.student(nomination.student) else {
            return Ok(());
        };
        let draft = &nomination.examiners;
        for slot in ExaminerSlot::ordered() {
            let Some(lecturer) = draft.get(slot) else {
                continue;
            };
            self.engine
                .examiner_eligibility(student, &snapshot.lecturers, draft, slot, lecturer)
                .map_err(|reason| examiner_rejected(student.id, slot, lecturer, reason))?;
        }
        if let Some(lecturer) = nomination.chairperson {
            let roster = Roster::new(
                &snapshot.lecturers,
                &snapshot.students,
                &snapshot.nominations,
            );
            self.engine
                .chairperson_eligibility(student, &roster, Some(nomination), lecturer)
                .map_err(|reason| chairperson_rejected(student.id, lecturer, reason))?;
        }
        Ok(())
    }

    fn validate_student(&self, student: &Student) -> Result<(), FacultyServiceError> {
        require_text("student name", &student.name)?;
        if student.semester == 0 {
            return Err(FacultyServiceError::Validation(
                "semester must be at least 1".to_string(),
            ));
        }
        let department = student.department;
        require_exists(self.store.departments().fetch(department)?, department)?;
        for lecturer in student.supervisors() {
            require_exists(self.store.lecturers().fetch(lecturer)?, lecturer)?;
        }
        if student.co_supervisor.is_some() && student.co_supervisor == student.supervisor {
            return Err(FacultyServiceError::Validation(
                "co-supervisor must differ from the main supervisor".to_string(),
            ));
        }
        Ok(())
    }

    fn validate_lecturer(&self, lecturer: &Lecturer) -> Result<(), FacultyServiceError> {
        require_text("lecturer name", &lecturer.name)?;
        require_text("lecturer university", &lecturer.university)?;
        let department = lecturer.department;
        require_exists(self.store.departments().fetch(department)?, department)
    }
}

fn examiner_rejected(
    student: StudentId,
    slot: ExaminerSlot,
    lecturer: LecturerId,
    reason: Ineligibility,
) -> FacultyServiceError {
    warn!(
        student = %student,
        lecturer = %lecturer,
        slot = slot.number(),
        reason = %reason.summary(),
        "examiner rejected"
    );
    FacultyServiceError::Ineligible {
        role: ExaminerRole::Examiner(slot),
        lecturer,
        reason,
    }
}

fn chairperson_rejected(
    student: StudentId,
    lecturer: LecturerId,
    reason: Ineligibility,
) -> FacultyServiceError {
    warn!(
        student = %student,
        lecturer = %lecturer,
        reason = %reason.summary(),
        "chairperson rejected"
    );
    FacultyServiceError::Ineligible {
        role: ExaminerRole::Chairperson,
        lecturer,
        reason,
    }
}

fn require_exists<T: Record>(record: Option<T>, id: T::Id) -> Result<(), FacultyServiceError> {
    match record {
        Some(_) => Ok(()),
        None => Err(FacultyServiceError::Validation(format!(
            "unknown {} {}",
            T::KIND,
            id
        ))),
    }
}

fn found<T: Record>(record: Option<T>, id: T::Id) -> Result<T, FacultyServiceError> {
    record.ok_or_else(|| not_found::<T>(id))
}

fn not_found<T: Record>(id: T::Id) -> FacultyServiceError {
    FacultyServiceError::NotFound {
        kind: T::KIND,
        id: id.to_string(),
    }
}

fn require_text(field: &str, value: &str) -> Result<(), FacultyServiceError> {
    if value.trim().is_empty() {
        Err(FacultyServiceError::Validation(format!(
            "{field} must not be blank"
        )))
    } else {
        Ok(())
    }
}

/// Panel position a lecturer was proposed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExaminerRole {
    Examiner(ExaminerSlot),
    Chairperson,
}

impl std::fmt::Display for ExaminerRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExaminerRole::Examiner(slot) => write!(f, "examiner {}", slot.number()),
            ExaminerRole::Chairperson => write!(f, "chairperson"),
        }
    }
}

/// Error raised by the faculty service.
#[derive(Debug, thiserror::Error)]
pub enum FacultyServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },
    #[error("{kind} {id} is still referenced")]
    InUse { kind: &'static str, id: String },
    #[error("{0}")]
    Validation(String),
    #[error("student {0} has no nomination")]
    NoNomination(StudentId),
    #[error("nomination {0} is locked")]
    Locked(NominationId),
    #[error("lecturer {lecturer} cannot be {role}: {}", .reason.summary())]
    Ineligible {
        role: ExaminerRole,
        lecturer: LecturerId,
        reason: Ineligibility,
    },
    #[error("roster export failed: {0}")]
    Export(#[from] csv::Error),
}

impl FacultyServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            FacultyServiceError::NotFound { .. }
            | FacultyServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
            FacultyServiceError::InUse { .. }
            | FacultyServiceError::Locked(_)
            | FacultyServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
            FacultyServiceError::Validation(_)
            | FacultyServiceError::NoNomination(_)
            | FacultyServiceError::Ineligible { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            FacultyServiceError::Repository(RepositoryError::Unavailable(_))
            | FacultyServiceError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
