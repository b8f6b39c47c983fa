use serde::{Deserialize, Serialize};

/// Posting fields as submitted by the client. Every field is optional, and a blank value is
/// treated exactly like a missing one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InternshipPosting {
    pub title: Option<String>,
    pub company_name: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub email: Option<String>,
}

impl InternshipPosting {
    pub fn title(&self) -> Option<&str> {
        present(&self.title)
    }

    pub fn company_name(&self) -> Option<&str> {
        present(&self.company_name)
    }

    pub fn description(&self) -> Option<&str> {
        present(&self.description)
    }

    pub fn link(&self) -> Option<&str> {
        present(&self.link)
    }

    pub fn email(&self) -> Option<&str> {
        present(&self.email)
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
}

/// Verdict derived from the clamped credibility score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CredibilityStatus {
    Real,
    Suspicious,
    Fake,
}

impl CredibilityStatus {
    pub fn label(&self) -> &'static str {
        match self {
            CredibilityStatus::Real => "Real",
            CredibilityStatus::Suspicious => "Suspicious",
            CredibilityStatus::Fake => "Fake",
        }
    }
}

/// Whether the posting text says the internship pays. Serialized as `true`, `false`, or
/// `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum PaidStatus {
    Paid,
    Unpaid,
    Unknown,
}

impl PaidStatus {
    pub fn as_option(self) -> Option<bool> {
        match self {
            PaidStatus::Paid => Some(true),
            PaidStatus::Unpaid => Some(false),
            PaidStatus::Unknown => None,
        }
    }
}

impl From<Option<bool>> for PaidStatus {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => PaidStatus::Paid,
            Some(false) => PaidStatus::Unpaid,
            None => PaidStatus::Unknown,
        }
    }
}

impl From<PaidStatus> for Option<bool> {
    fn from(value: PaidStatus) -> Self {
        value.as_option()
    }
}

/// Output of a single evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub status: CredibilityStatus,
    pub paid: PaidStatus,
    pub credibility: u8,
    pub explanations: Vec<String>,
}
