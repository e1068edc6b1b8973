use serde::{Deserialize, Serialize};

pub const DEFAULT_HOME_INSTITUTION: &str = "UTM";
pub const DEFAULT_CHAIR_SESSION_CAP: usize = 4;

/// Faculty-level dials for the nomination rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityConfig {
    /// Institution code that marks a lecturer as internal.
    pub home_institution: String,
    /// Chair sessions a lecturer may hold per department.
    pub chair_session_cap: usize,
}

impl EligibilityConfig {
    pub fn is_internal(&self, university: &str) -> bool {
        university
            .trim()
            .eq_ignore_ascii_case(self.home_institution.trim())
    }
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self {
            home_institution: DEFAULT_HOME_INSTITUTION.to_string(),
            chair_session_cap: DEFAULT_CHAIR_SESSION_CAP,
        }
    }
}
