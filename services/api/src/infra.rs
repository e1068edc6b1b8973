use fses::workflows::nomination::{
    Collection, Department, EligibilityConfig, FacultyService, FacultyStore, Lecturer, Nomination,
    Record, RepositoryError, Student,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// One resource table with store-assigned ids.
pub(crate) struct InMemoryTable<T: Record> {
    records: Mutex<BTreeMap<T::Id, T>>,
    next_id: AtomicU64,
}

impl<T: Record> Default for InMemoryTable<T> {
    fn default() -> Self {
        Self {
            records: Mutex::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

impl<T: Record> InMemoryTable<T> {
    fn guard(&self) -> Result<MutexGuard<'_, BTreeMap<T::Id, T>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable(format!("{} table poisoned", T::KIND)))
    }
}

impl<T: Record> Collection<T> for InMemoryTable<T> {
    fn list(&self) -> Result<Vec<T>, RepositoryError> {
        Ok(self.guard()?.values().cloned().collect())
    }

    fn fetch(&self, id: T::Id) -> Result<Option<T>, RepositoryError> {
        Ok(self.guard()?.get(&id).cloned())
    }

    fn insert(&self, mut record: T) -> Result<T, RepositoryError> {
        let mut guard = self.guard()?;
        if guard.values().any(|stored| record.conflicts_with(stored)) {
            return Err(RepositoryError::Conflict);
        }
        let id = T::Id::from(self.next_id.fetch_add(1, Ordering::SeqCst));
        record.set_id(id);
        guard.insert(id, record.clone());
        Ok(record)
    }

    fn update(&self, record: T) -> Result<T, RepositoryError> {
        let mut guard = self.guard()?;
        if guard.values().any(|stored| record.conflicts_with(stored)) {
            return Err(RepositoryError::Conflict);
        }
        match guard.get_mut(&record.id()) {
            Some(existing) => {
                *existing = record.clone();
                Ok(record)
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn delete(&self, id: T::Id) -> Result<(), RepositoryError> {
        self.guard()?
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}

#[derive(Default)]
pub(crate) struct InMemoryFacultyStore {
    students: InMemoryTable<Student>,
    lecturers: InMemoryTable<Lecturer>,
    departments: InMemoryTable<Department>,
    nominations: InMemoryTable<Nomination>,
}

impl FacultyStore for InMemoryFacultyStore {
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

pub(crate) type InMemoryFacultyService = FacultyService<InMemoryFacultyStore>;

pub(crate) fn in_memory_service(config: EligibilityConfig) -> Arc<InMemoryFacultyService> {
    Arc::new(FacultyService::new(
        Arc::new(InMemoryFacultyStore::default()),
        config,
    ))
}
