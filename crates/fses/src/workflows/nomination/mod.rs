//! Examiner and chairperson nomination workflow for first stage evaluations.
//!
//! The eligibility engine, status derivation and workload aggregation are pure functions
//! over fetched collections. [`FacultyService`] composes them with an injected
//! [`FacultyStore`] and [`router::faculty_router`] exposes the result over HTTP.

pub mod domain;
pub mod eligibility;
pub mod export;
pub mod overview;
pub mod repository;
pub mod router;
pub mod service;
pub mod status;
pub mod workload;

#[cfg(test)]
mod tests;

pub use domain::{
    Department, DepartmentId, EvaluationType, ExaminerDraft, ExaminerSlot, Lecturer, LecturerId,
    Nomination, NominationId, Program, Student, StudentId, Title,
};
pub use eligibility::{EligibilityConfig, EligibilityEngine, Ineligibility, Roster};
pub use export::{roster_csv, roster_file_name, write_roster_csv};
pub use overview::{build_overview, filter_overview, OverviewFilter, OverviewPage, StudentOverview};
pub use repository::{Collection, FacultySnapshot, FacultyStore, Record, RepositoryError};
pub use router::faculty_router;
pub use service::{
    ExaminerRole, FacultyService, FacultyServiceError, NominationRequest, StudentStatusView,
};
pub use status::{derive_status, NominationStatus, StatusTally};
pub use workload::{compute_workload, WorkloadEntry, WorkloadReport};
