use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            Default,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Serialize,
            Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

record_id!(
    /// Identifier of a lecturer record.
    LecturerId
);
record_id!(
    /// Identifier of a student record.
    StudentId
);
record_id!(
    /// Identifier of a department record.
    DepartmentId
);
record_id!(
    /// Identifier of a nomination record.
    NominationId
);

/// Academic seniority. Lower rank is more senior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Title {
    Professor,
    AssociateProfessor,
    Doctor,
}

impl Title {
    pub const fn rank(self) -> u8 {
        match self {
            Title::Professor => 1,
            Title::AssociateProfessor => 2,
            Title::Doctor => 3,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Title::Professor => "Professor",
            Title::AssociateProfessor => "Associate Professor",
            Title::Doctor => "Doctor",
        }
    }

    pub const fn is_professor(self) -> bool {
        matches!(self, Title::Professor)
    }

    /// True when this title is at least as senior as `rank`.
    pub const fn within(self, rank: u8) -> bool {
        self.rank() <= rank
    }
}

impl TryFrom<u8> for Title {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Title::Professor),
            2 => Ok(Title::AssociateProfessor),
            3 => Ok(Title::Doctor),
            other => Err(format!("title must be 1, 2 or 3 (found {other})")),
        }
    }
}

impl From<Title> for u8 {
    fn from(value: Title) -> Self {
        value.rank()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Program {
    Phd,
    Mphil,
    Dse,
}

impl Program {
    pub const fn ordered() -> [Program; 3] {
        [Program::Phd, Program::Mphil, Program::Dse]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Program::Phd => "PhD",
            Program::Mphil => "MPhil",
            Program::Dse => "DSE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EvaluationType {
    #[default]
    FirstEvaluation,
    ReEvaluation,
}

impl EvaluationType {
    pub const fn label(self) -> &'static str {
        match self {
            EvaluationType::FirstEvaluation => "First Evaluation",
            EvaluationType::ReEvaluation => "Re-Evaluation",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    #[serde(default)]
    pub id: DepartmentId,
    pub name: String,
    #[serde(default)]
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lecturer {
    #[serde(default)]
    pub id: LecturerId,
    pub name: String,
    pub title: Title,
    pub department: DepartmentId,
    /// Institution code, compared against the faculty's home institution.
    pub university: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    #[serde(default)]
    pub id: StudentId,
    pub name: String,
    pub department: DepartmentId,
    #[serde(default)]
    pub supervisor: Option<LecturerId>,
    #[serde(default)]
    pub co_supervisor: Option<LecturerId>,
    pub program: Program,
    #[serde(default)]
    pub evaluation_type: EvaluationType,
    #[serde(default = "default_semester")]
    pub semester: u8,
}

fn default_semester() -> u8 {
    1
}

impl Student {
    /// Lecturers who already supervise this student and so cannot examine or chair.
    pub fn supervisors(&self) -> impl Iterator<Item = LecturerId> {
        self.supervisor.into_iter().chain(self.co_supervisor)
    }
}

/// Examiner position on a nomination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ExaminerSlot {
    First,
    Second,
    Third,
}

impl ExaminerSlot {
    pub const fn ordered() -> [ExaminerSlot; 3] {
        [ExaminerSlot::First, ExaminerSlot::Second, ExaminerSlot::Third]
    }

    pub const fn number(self) -> u8 {
        match self {
            ExaminerSlot::First => 1,
            ExaminerSlot::Second => 2,
            ExaminerSlot::Third => 3,
        }
    }

    /// Internal slots only admit lecturers from the home institution.
    pub const fn is_internal(self) -> bool {
        !matches!(self, ExaminerSlot::Second)
    }
}

impl TryFrom<u8> for ExaminerSlot {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ExaminerSlot::First),
            2 => Ok(ExaminerSlot::Second),
            3 => Ok(ExaminerSlot::Third),
            other => Err(format!("examiner slot must be 1, 2 or 3 (found {other})")),
        }
    }
}

impl From<ExaminerSlot> for u8 {
    fn from(value: ExaminerSlot) -> Self {
        value.number()
    }
}

/// Examiner choices, either persisted on a nomination or still being edited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExaminerDraft {
    #[serde(default)]
    pub examiner1: Option<LecturerId>,
    #[serde(default)]
    pub examiner2: Option<LecturerId>,
    #[serde(default)]
    pub examiner3: Option<LecturerId>,
}

impl ExaminerDraft {
    pub fn get(&self, slot: ExaminerSlot) -> Option<LecturerId> {
        match slot {
            ExaminerSlot::First => self.examiner1,
            ExaminerSlot::Second => self.examiner2,
            ExaminerSlot::Third => self.examiner3,
        }
    }

    /// Filled slots other than `slot`, with their lecturer.
    pub fn others(
        &self,
        slot: ExaminerSlot,
    ) -> impl Iterator<Item = (ExaminerSlot, LecturerId)> + '_ {
        ExaminerSlot::ordered()
            .into_iter()
            .filter(move |other| *other != slot)
            .filter_map(|other| self.get(other).map(|id| (other, id)))
    }

    pub fn assigned(&self) -> impl Iterator<Item = LecturerId> {
        [self.examiner1, self.examiner2, self.examiner3]
            .into_iter()
            .flatten()
    }

    pub fn is_complete(&self) -> bool {
        self.examiner1.is_some() && self.examiner2.is_some() && self.examiner3.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nomination {
    #[serde(default)]
    pub id: NominationId,
    pub student: StudentId,
    #[serde(default)]
    pub research_title: Option<String>,
    #[serde(flatten)]
    pub examiners: ExaminerDraft,
    #[serde(default)]
    pub chairperson: Option<LecturerId>,
    #[serde(default)]
    pub is_locked: bool,
}

impl Nomination {
    pub fn new(student: StudentId, research_title: impl Into<String>) -> Self {
        Self {
            id: NominationId::default(),
            student,
            research_title: Some(research_title.into()),
            examiners: ExaminerDraft::default(),
            chairperson: None,
            is_locked: false,
        }
    }

    pub fn examiners_complete(&self) -> bool {
        self.examiners.is_complete()
    }

    /// Every lecturer sitting on the panel: examiners and chairperson.
    pub fn panel(&self) -> impl Iterator<Item = LecturerId> {
        self.examiners.assigned().chain(self.chairperson)
    }
}
