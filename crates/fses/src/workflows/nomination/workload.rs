use std::collections::HashMap;

use serde::Serialize;

use super::domain::{Lecturer, LecturerId, Nomination};

/// Sessions assigned to one lecturer in one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkloadEntry {
    pub lecturer: LecturerId,
    pub name: String,
    pub sessions: usize,
}

/// Examiner and chairperson assignment frequencies across all nominations.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WorkloadReport {
    /// Busiest examiners first.
    pub examiner_counts: Vec<WorkloadEntry>,
    /// Busiest chairpersons first.
    pub chairperson_counts: Vec<WorkloadEntry>,
    pub total_examiners: usize,
    pub total_chairpersons: usize,
    pub average_sessions_per_examiner: f32,
}

impl WorkloadReport {
    pub fn examiner_sessions(&self, lecturer: LecturerId) -> usize {
        sessions_for(&self.examiner_counts, lecturer)
    }

    pub fn chairperson_sessions(&self, lecturer: LecturerId) -> usize {
        sessions_for(&self.chairperson_counts, lecturer)
    }
}

fn sessions_for(entries: &[WorkloadEntry], lecturer: LecturerId) -> usize {
    entries
        .iter()
        .find(|entry| entry.lecturer == lecturer)
        .map(|entry| entry.sessions)
        .unwrap_or_default()
}

pub fn compute_workload(nominations: &[Nomination], lecturers: &[Lecturer]) -> WorkloadReport {
    let names: HashMap<LecturerId, &str> = lecturers
        .iter()
        .filter(|l| !l.name.trim().is_empty())
        .map(|l| (l.id, l.name.as_str()))
        .collect();

    let mut examiners = Tally::default();
    let mut chairs = Tally::default();

    for nomination in nominations {
        for examiner in nomination.examiners.assigned() {
            examiners.bump(examiner, &names);
        }
        if let Some(chair) = nomination.chairperson {
            chairs.bump(chair, &names);
        }
    }

    let examiner_counts = examiners.into_ranked();
    let chairperson_counts = chairs.into_ranked();
    let examiner_sessions: usize = examiner_counts.iter().map(|e| e.sessions).sum();
    let average_sessions_per_examiner =
        examiner_sessions as f32 / examiner_counts.len().max(1) as f32;

    WorkloadReport {
        total_examiners: examiner_counts.len(),
        total_chairpersons: chairperson_counts.len(),
        examiner_counts,
        chairperson_counts,
        average_sessions_per_examiner,
    }
}

#[derive(Default)]
struct Tally<'a> {
    counts: HashMap<LecturerId, (&'a str, usize)>,
}

impl<'a> Tally<'a> {
    fn bump(&mut self, lecturer: LecturerId, names: &HashMap<LecturerId, &'a str>) {
        // unresolved or blank names are not reportable
        let Some(name) = names.get(&lecturer) else {
            return;
        };
        self.counts.entry(lecturer).or_insert((*name, 0)).1 += 1;
    }

    fn into_ranked(self) -> Vec<WorkloadEntry> {
        let mut entries: Vec<WorkloadEntry> = self
            .counts
            .into_iter()
            .map(|(lecturer, (name, sessions))| WorkloadEntry {
                lecturer,
                name: name.to_string(),
                sessions,
            })
            .collect();
        entries.sort_by(|a, b| {
            b.sessions
                .cmp(&a.sessions)
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.lecturer.cmp(&b.lecturer))
        });
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::nomination::domain::{
        DepartmentId, ExaminerDraft, NominationId, StudentId, Title,
    };

    fn lecturer(id: u64, name: &str) -> Lecturer {
        Lecturer {
            id: LecturerId(id),
            name: name.to_string(),
            title: Title::AssociateProfessor,
            department: DepartmentId(1),
            university: "UTM".to_string(),
        }
    }

    fn nomination(id: u64, examiners: [u64; 3], chair: Option<u64>) -> Nomination {
        Nomination {
            id: NominationId(id),
            student: StudentId(id),
            research_title: None,
            examiners: ExaminerDraft {
                examiner1: Some(LecturerId(examiners[0])),
                examiner2: Some(LecturerId(examiners[1])),
                examiner3: Some(LecturerId(examiners[2])),
            },
            chairperson: chair.map(LecturerId),
            is_locked: false,
        }
    }

    #[test]
    fn empty_nominations_produce_empty_report() {
        let report = compute_workload(&[], &[lecturer(1, "Aziz")]);
        assert!(report.examiner_counts.is_empty());
        assert!(report.chairperson_counts.is_empty());
        assert_eq!(report.total_examiners, 0);
        assert_eq!(report.average_sessions_per_examiner, 0.0);
    }

    #[test]
    fn counts_examiners_and_chairs_independently() {
        let lecturers = vec![
            lecturer(1, "Aziz"),
            lecturer(2, "Farah"),
            lecturer(3, "Lim"),
            lecturer(4, "Ravi"),
        ];
        let nominations = vec![
            nomination(1, [1, 2, 3], Some(4)),
            nomination(2, [2, 3, 4], Some(1)),
            nomination(3, [2, 1, 4], Some(1)),
        ];

        let report = compute_workload(&nominations, &lecturers);

        assert_eq!(report.examiner_sessions(LecturerId(2)), 3);
        assert_eq!(report.examiner_counts[0].name, "Farah");
        assert_eq!(report.chairperson_sessions(LecturerId(1)), 2);
        assert_eq!(report.chairperson_counts[0].name, "Aziz");
        assert_eq!(report.total_chairpersons, 2);
        assert_eq!(report.total_examiners, 4);
        assert!((report.average_sessions_per_examiner - 9.0 / 4.0).abs() < f32::EPSILON);
    }

    #[test]
    fn ties_are_ordered_by_name() {
        let lecturers = vec![lecturer(1, "Zul"), lecturer(2, "Amin"), lecturer(3, "Mei")];
        let nominations = vec![nomination(1, [1, 2, 3], None)];

        let report = compute_workload(&nominations, &lecturers);
        let names: Vec<_> = report
            .examiner_counts
            .iter()
            .map(|entry| entry.name.as_str())
            .collect();
        assert_eq!(names, vec!["Amin", "Mei", "Zul"]);
    }

    #[test]
    fn skips_blank_and_dangling_lecturers() {
        let lecturers = vec![lecturer(1, "Aziz"), lecturer(2, "   ")];
        let nominations = vec![nomination(1, [1, 2, 99], Some(2))];

        let report = compute_workload(&nominations, &lecturers);

        assert_eq!(report.examiner_counts.len(), 1);
        assert_eq!(report.examiner_sessions(LecturerId(1)), 1);
        assert!(report.chairperson_counts.is_empty());
    }
}
