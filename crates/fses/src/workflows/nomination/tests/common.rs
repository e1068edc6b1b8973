use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use axum::response::Response;
use serde_json::Value;

use crate::workflows::nomination::domain::{
    Department, DepartmentId, EvaluationType, ExaminerDraft, Lecturer, LecturerId, Nomination,
    NominationId, Program, Student, StudentId, Title,
};
use crate::workflows::nomination::repository::{
    Collection, FacultyStore, Record, RepositoryError,
};
use crate::workflows::nomination::{faculty_router, EligibilityConfig, FacultyService};

pub(super) const CS: DepartmentId = DepartmentId(1);
pub(super) const EE: DepartmentId = DepartmentId(2);

pub(super) fn departments() -> Vec<Department> {
    vec![
        Department {
            id: CS,
            name: "Computer Science".to_string(),
            code: "CS".to_string(),
        },
        Department {
            id: EE,
            name: "Electrical Engineering".to_string(),
            code: "EE".to_string(),
        },
    ]
}

pub(super) fn lecturer(
    id: u64,
    name: &str,
    title: Title,
    department: DepartmentId,
    university: &str,
) -> Lecturer {
    Lecturer {
        id: LecturerId(id),
        name: name.to_string(),
        title,
        department,
        university: university.to_string(),
    }
}

/// L1 supervises the scenario student; L2-L4 sit on its panel.
pub(super) fn lecturers() -> Vec<Lecturer> {
    vec![
        lecturer(1, "Aishah Karim", Title::AssociateProfessor, CS, "UTM"),
        lecturer(2, "Bakar Salleh", Title::AssociateProfessor, CS, "UTM"),
        lecturer(3, "Chen Mei Ling", Title::Doctor, CS, "UTM"),
        lecturer(4, "Dinesh Kumar", Title::AssociateProfessor, CS, "UTM"),
        lecturer(5, "Elena Petrova", Title::Professor, CS, "UTM"),
        lecturer(6, "Fauzi Ismail", Title::AssociateProfessor, EE, "UTM"),
        lecturer(7, "Gopal Raj", Title::Doctor, CS, "UTM"),
        lecturer(8, "Hana Yusof", Title::Professor, CS, "UM"),
        lecturer(9, "Ismail Zakaria", Title::Professor, CS, "UTM"),
    ]
}

pub(super) fn student(id: u64, name: &str, department: DepartmentId, supervisor: u64) -> Student {
    Student {
        id: StudentId(id),
        name: name.to_string(),
        department,
        supervisor: Some(LecturerId(supervisor)),
        co_supervisor: None,
        program: Program::Phd,
        evaluation_type: EvaluationType::FirstEvaluation,
        semester: 2,
    }
}

pub(super) fn scenario_student() -> Student {
    student(1, "Siti Nurhaliza", CS, 1)
}

pub(super) fn draft(examiners: [Option<u64>; 3]) -> ExaminerDraft {
    ExaminerDraft {
        examiner1: examiners[0].map(LecturerId),
        examiner2: examiners[1].map(LecturerId),
        examiner3: examiners[2].map(LecturerId),
    }
}

pub(super) fn nomination(
    id: u64,
    student: u64,
    examiners: [Option<u64>; 3],
    chairperson: Option<u64>,
) -> Nomination {
    Nomination {
        id: NominationId(id),
        student: StudentId(student),
        research_title: Some(format!("Research topic {student}")),
        examiners: draft(examiners),
        chairperson: chairperson.map(LecturerId),
        is_locked: false,
    }
}

/// Examiners L2, L3, L4 and no chairperson.
pub(super) fn scenario_nomination() -> Nomination {
    nomination(1, 1, [Some(2), Some(3), Some(4)], None)
}

pub(super) fn names(lecturers: &[Lecturer]) -> Vec<&str> {
    lecturers.iter().map(|l| l.name.as_str()).collect()
}

pub(super) fn ids(lecturers: &[Lecturer]) -> Vec<u64> {
    lecturers.iter().map(|l| l.id.0).collect()
}

pub(super) struct MemoryCollection<T: Record> {
    records: Mutex<BTreeMap<T::Id, T>>,
    next_id: AtomicU64,
    /// Latency added to every `list`, like a remote backing store.
    pub(super) list_delay: Option<Duration>,
}

impl<T: Record> Default for MemoryCollection<T> {
    fn default() -> Self {
        Self {
            records: Mutex::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
            list_delay: None,
        }
    }
}

impl<T: Record> MemoryCollection<T> {
    /// Stores a record under its own id.
    pub(super) fn seed(&self, record: T) {
        let mut guard = self.records.lock().expect("collection mutex poisoned");
        guard.insert(record.id(), record);
    }
}

impl<T: Record> Collection<T> for MemoryCollection<T> {
    fn list(&self) -> Result<Vec<T>, RepositoryError> {
        let records: Vec<T> = {
            let guard = self.records.lock().expect("collection mutex poisoned");
            guard.values().cloned().collect()
        };
        if let Some(delay) = self.list_delay {
            thread::sleep(delay);
        }
        Ok(records)
    }

    fn fetch(&self, id: T::Id) -> Result<Option<T>, RepositoryError> {
        let guard = self.records.lock().expect("collection mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn insert(&self, mut record: T) -> Result<T, RepositoryError> {
        let mut guard = self.records.lock().expect("collection mutex poisoned");
        if guard.values().any(|stored| record.conflicts_with(stored)) {
            return Err(RepositoryError::Conflict);
        }
        let id = loop {
            let candidate = T::Id::from(self.next_id.fetch_add(1, Ordering::SeqCst));
            if !guard.contains_key(&candidate) {
                break candidate;
            }
        };
        record.set_id(id);
        guard.insert(id, record.clone());
        Ok(record)
    }

    fn update(&self, record: T) -> Result<T, RepositoryError> {
        let mut guard = self.records.lock().expect("collection mutex poisoned");
        if guard.values().any(|stored| record.conflicts_with(stored)) {
            return Err(RepositoryError::Conflict);
        }
        match guard.get_mut(&record.id()) {
            Some(slot) => {
                *slot = record.clone();
                Ok(record)
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn delete(&self, id: T::Id) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("collection mutex poisoned");
        guard
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}

#[derive(Default)]
pub(super) struct MemoryStore {
    pub(super) students: MemoryCollection<Student>,
    pub(super) lecturers: MemoryCollection<Lecturer>,
    pub(super) departments: MemoryCollection<Department>,
    pub(super) nominations: MemoryCollection<Nomination>,
}

impl MemoryStore {
    /// Departments, lecturers, the scenario student and its nomination.
    pub(super) fn seeded() -> Self {
        let store = MemoryStore::default();
        for department in departments() {
            store.departments.seed(department);
        }
        for lecturer in lecturers() {
            store.lecturers.seed(lecturer);
        }
        store.students.seed(scenario_student());
        store.nominations.seed(scenario_nomination());
        store
    }
}

impl FacultyStore for MemoryStore {
    fn students(&self) -> &dyn Collection<Student> {
        &self.students
    }

    fn lecturers(&self) -> &dyn Collection<Lecturer> {
        &self.lecturers
    }

    fn departments(&self) -> &dyn Collection<Department> {
        &self.departments
    }

    fn nominations(&self) -> &dyn Collection<Nomination> {
        &self.nominations
    }
}

pub(super) struct UnavailableCollection;

impl<T: Record> Collection<T> for UnavailableCollection {
    fn list(&self) -> Result<Vec<T>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: T::Id) -> Result<Option<T>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert(&self, _record: T) -> Result<T, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: T) -> Result<T, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn delete(&self, _id: T::Id) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) struct UnavailableStore;

impl FacultyStore for UnavailableStore {
    fn students(&self) -> &dyn Collection<Student> {
        &UnavailableCollection
    }

    fn lecturers(&self) -> &dyn Collection<Lecturer> {
        &UnavailableCollection
    }

    fn departments(&self) -> &dyn Collection<Department> {
        &UnavailableCollection
    }

    fn nominations(&self) -> &dyn Collection<Nomination> {
        &UnavailableCollection
    }
}

pub(super) fn build_service() -> (FacultyService<MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::seeded());
    let service = FacultyService::new(store.clone(), EligibilityConfig::default());
    (service, store)
}

pub(super) fn faculty_router_with_service(service: FacultyService<MemoryStore>) -> axum::Router {
    faculty_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
