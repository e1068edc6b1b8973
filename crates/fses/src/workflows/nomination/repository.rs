use std::fmt;
use std::hash::Hash;

use super::domain::{
    Department, DepartmentId, Lecturer, LecturerId, Nomination, NominationId, Student, StudentId,
};

/// A persisted resource with a store-assigned identifier.
pub trait Record: Clone + Send + Sync + 'static {
    type Id: Copy + Eq + Ord + Hash + fmt::Display + From<u64> + Send + Sync + 'static;

    /// Resource name used in error messages and logs.
    const KIND: &'static str;

    fn id(&self) -> Self::Id;
    fn set_id(&mut self, id: Self::Id);

    /// Whether `self` may not be stored next to `other`. Stores answer `Conflict` when true.
    fn conflicts_with(&self, _other: &Self) -> bool {
        false
    }
}

macro_rules! impl_record {
    ($record:ty, $id:ty, $kind:literal) => {
        impl Record for $record {
            type Id = $id;
            const KIND: &'static str = $kind;

            fn id(&self) -> Self::Id {
                self.id
            }

            fn set_id(&mut self, id: Self::Id) {
                self.id = id;
            }
        }
    };
}

impl_record!(Student, StudentId, "student");
impl_record!(Lecturer, LecturerId, "lecturer");
impl_record!(Department, DepartmentId, "department");

impl Record for Nomination {
    type Id = NominationId;
    const KIND: &'static str = "nomination";

    fn id(&self) -> Self::Id {
        self.id
    }

    fn set_id(&mut self, id: Self::Id) {
        self.id = id;
    }

    /// A student holds at most one nomination.
    fn conflicts_with(&self, other: &Self) -> bool {
        self.id != other.id && self.student == other.student
    }
}

/// List/get/create/update/delete over one resource collection.
pub trait Collection<T: Record>: Send + Sync {
    fn list(&self) -> Result<Vec<T>, RepositoryError>;
    fn fetch(&self, id: T::Id) -> Result<Option<T>, RepositoryError>;
    /// Stores `record` under a freshly assigned id and returns the stored copy. Fails with
    /// `Conflict` when a stored record [`Record::conflicts_with`] it.
    fn insert(&self, record: T) -> Result<T, RepositoryError>;
    fn update(&self, record: T) -> Result<T, RepositoryError>;
    fn delete(&self, id: T::Id) -> Result<(), RepositoryError>;
}

/// Storage abstraction injected into the service so it can be exercised in isolation.
pub trait FacultyStore: Send + Sync {
    fn students(&self) -> &dyn Collection<Student>;
    fn lecturers(&self) -> &dyn Collection<Lecturer>;
    fn departments(&self) -> &dyn Collection<Department>;
    fn nominations(&self) -> &dyn Collection<Nomination>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Every collection read at one point in time, as the engine consumes them.
#[derive(Debug, Clone, Default)]
pub struct FacultySnapshot {
    pub students: Vec<Student>,
    pub lecturers: Vec<Lecturer>,
    pub departments: Vec<Department>,
    pub nominations: Vec<Nomination>,
}

impl FacultySnapshot {
    pub fn load<S: FacultyStore + ?Sized>(store: &S) -> Result<Self, RepositoryError> {
        Ok(Self {
            students: store.students().list()?,
            lecturers: store.lecturers().list()?,
            departments: store.departments().list()?,
            nominations: store.nominations().list()?,
        })
    }

    pub fn student(&self, id: StudentId) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    pub fn nomination_for(&self, student: StudentId) -> Option<&Nomination> {
        self.nominations.iter().find(|n| n.student == student)
    }
}
