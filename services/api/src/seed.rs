//! Deterministic faculty data for local runs, the CLI report and the demo.

use fses::workflows::nomination::{
    Department, DepartmentId, EvaluationType, ExaminerDraft, FacultyServiceError, Lecturer,
    LecturerId, NominationRequest, Program, Student, StudentId, Title,
};

use crate::infra::InMemoryFacultyService;

/// Ids handed out while seeding, for follow-up calls.
#[derive(Debug, Clone, Default)]
pub(crate) struct SeededFaculty {
    pub(crate) departments: Vec<DepartmentId>,
    pub(crate) lecturers: Vec<LecturerId>,
    pub(crate) students: Vec<StudentId>,
}

impl SeededFaculty {
    pub(crate) fn lecturer(&self, index: usize) -> Option<LecturerId> {
        self.lecturers.get(index).copied()
    }
}

const DEPARTMENTS: [(&str, &str); 3] = [
    ("Software Engineering", "SE"),
    ("Data Engineering", "DE"),
    ("Computer Networks", "CN"),
];

const LECTURERS: [(&str, Title, usize, &str); 10] = [
    ("Azlan Mohamad", Title::Professor, 0, "UTM"),
    ("Farah Hanim", Title::AssociateProfessor, 0, "UTM"),
    ("Kamarul Ariffin", Title::Doctor, 0, "UTM"),
    ("Lim Siew Ling", Title::AssociateProfessor, 1, "UTM"),
    ("Mohd Razak", Title::Professor, 1, "UTM"),
    ("Nurul Izzah", Title::Doctor, 1, "UTM"),
    ("Prakash Nair", Title::AssociateProfessor, 2, "UTM"),
    ("Rozita Ahmad", Title::Professor, 2, "UKM"),
    ("Suresh Pillai", Title::Doctor, 2, "UPM"),
    ("Zainab Osman", Title::Professor, 0, "UTM"),
];

struct SeedStudent {
    name: &'static str,
    department: usize,
    supervisor: usize,
    co_supervisor: Option<usize>,
    program: Program,
    evaluation_type: EvaluationType,
    semester: u8,
}

const STUDENTS: [SeedStudent; 6] = [
    SeedStudent {
        name: "Aiman Hakim",
        department: 0,
        supervisor: 1,
        co_supervisor: None,
        program: Program::Phd,
        evaluation_type: EvaluationType::FirstEvaluation,
        semester: 3,
    },
    SeedStudent {
        name: "Balqis Rahim",
        department: 0,
        supervisor: 0,
        co_supervisor: Some(2),
        program: Program::Phd,
        evaluation_type: EvaluationType::FirstEvaluation,
        semester: 4,
    },
    SeedStudent {
        name: "Chandra Devi",
        department: 1,
        supervisor: 3,
        co_supervisor: None,
        program: Program::Mphil,
        evaluation_type: EvaluationType::FirstEvaluation,
        semester: 2,
    },
    SeedStudent {
        name: "Daniel Wong",
        department: 1,
        supervisor: 5,
        co_supervisor: Some(4),
        program: Program::Dse,
        evaluation_type: EvaluationType::ReEvaluation,
        semester: 5,
    },
    SeedStudent {
        name: "Erina Sofea",
        department: 2,
        supervisor: 6,
        co_supervisor: None,
        program: Program::Phd,
        evaluation_type: EvaluationType::FirstEvaluation,
        semester: 2,
    },
    SeedStudent {
        name: "Faizal Noor",
        department: 2,
        supervisor: 8,
        co_supervisor: None,
        program: Program::Mphil,
        evaluation_type: EvaluationType::FirstEvaluation,
        semester: 1,
    },
];

/// Panels as `(student, title, [examiner1, examiner2, examiner3], chairperson)`, indices into
/// the lecturer table.
const PANELS: [(usize, &str, [usize; 3], Option<usize>); 3] = [
    (
        0,
        "Requirements traceability with language models",
        [3, 7, 2],
        Some(9),
    ),
    (
        2,
        "Streaming feature stores for clinical data",
        [1, 8, 5],
        None,
    ),
    (4, "Congestion control for LEO satellite links", [1, 7, 5], Some(4)),
];

/// Populate an empty store through the service so every record passes validation.
pub(crate) fn seed_faculty(
    service: &InMemoryFacultyService,
) -> Result<SeededFaculty, FacultyServiceError> {
    let mut seeded = SeededFaculty::default();

    for (name, code) in DEPARTMENTS {
        let department = service.create_department(Department {
            id: DepartmentId::default(),
            name: name.to_string(),
            code: code.to_string(),
        })?;
        seeded.departments.push(department.id);
    }

    for (name, title, department, university) in LECTURERS {
        let lecturer = service.create_lecturer(Lecturer {
            id: LecturerId::default(),
            name: name.to_string(),
            title,
            department: seeded.departments[department],
            university: university.to_string(),
        })?;
        seeded.lecturers.push(lecturer.id);
    }

    for entry in &STUDENTS {
        let student = service.create_student(Student {
            id: StudentId::default(),
            name: entry.name.to_string(),
            department: seeded.departments[entry.department],
            supervisor: Some(seeded.lecturers[entry.supervisor]),
            co_supervisor: entry.co_supervisor.map(|index| seeded.lecturers[index]),
            program: entry.program,
            evaluation_type: entry.evaluation_type,
            semester: entry.semester,
        })?;
        seeded.students.push(student.id);
    }

    for (student, title, [first, second, third], chairperson) in PANELS {
        let student = seeded.students[student];
        service.save_nomination(
            student,
            NominationRequest {
                research_title: Some(title.to_string()),
                examiners: ExaminerDraft {
                    examiner1: Some(seeded.lecturers[first]),
                    examiner2: Some(seeded.lecturers[second]),
                    examiner3: Some(seeded.lecturers[third]),
                },
            },
        )?;
        if let Some(chair) = chairperson {
            service.assign_chairperson(student, Some(seeded.lecturers[chair]))?;
        }
    }

    Ok(seeded)
}
