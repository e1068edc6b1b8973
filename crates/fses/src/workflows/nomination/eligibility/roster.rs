use std::collections::HashMap;

use super::super::domain::{Lecturer, LecturerId, Nomination, Student, StudentId, Title};

/// Borrowed lookup tables over the fetched collections. Dangling ids resolve to `None`.
#[derive(Debug, Clone)]
pub struct Roster<'a> {
    nominations: &'a [Nomination],
    lecturer_index: HashMap<LecturerId, &'a Lecturer>,
    student_index: HashMap<StudentId, &'a Student>,
}

impl<'a> Roster<'a> {
    pub fn new(
        lecturers: &'a [Lecturer],
        students: &'a [Student],
        nominations: &'a [Nomination],
    ) -> Self {
        Self {
            nominations,
            lecturer_index: lecturers.iter().map(|l| (l.id, l)).collect(),
            student_index: students.iter().map(|s| (s.id, s)).collect(),
        }
    }

    pub fn nominations(&self) -> &'a [Nomination] {
        self.nominations
    }

    pub fn lecturer(&self, id: LecturerId) -> Option<&'a Lecturer> {
        self.lecturer_index.get(&id).copied()
    }

    pub fn lecturer_name(&self, id: Option<LecturerId>) -> Option<&'a str> {
        id.and_then(|id| self.lecturer(id)).map(|l| l.name.as_str())
    }

    pub fn title_of(&self, id: Option<LecturerId>) -> Option<Title> {
        id.and_then(|id| self.lecturer(id)).map(|l| l.title)
    }

    pub fn student(&self, id: StudentId) -> Option<&'a Student> {
        self.student_index.get(&id).copied()
    }

    pub fn nomination_for(&self, student: StudentId) -> Option<&'a Nomination> {
        self.nominations.iter().find(|n| n.student == student)
    }
}
