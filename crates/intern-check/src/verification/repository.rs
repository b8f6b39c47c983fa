use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{InternshipPosting, ScoreResult};

/// Posting plus the verdict it received, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewInternshipRecord {
    pub title: Option<String>,
    pub company_name: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub email: Option<String>,
    pub is_paid: Option<bool>,
    pub credibility_score: Option<i32>,
    pub status: Option<String>,
}

impl NewInternshipRecord {
    /// Stores trimmed field values; blank fields become `None`.
    pub fn from_evaluation(posting: &InternshipPosting, result: &ScoreResult) -> Self {
        Self {
            title: posting.title().map(str::to_string),
            company_name: posting.company_name().map(str::to_string),
            description: posting.description().map(str::to_string),
            link: posting.link().map(str::to_string),
            email: posting.email().map(str::to_string),
            is_paid: result.paid.as_option(),
            credibility_score: Some(i32::from(result.credibility)),
            status: Some(result.status.label().to_string()),
        }
    }
}

/// Stored check, as returned by the history repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternshipRecord {
    pub id: i64,
    pub title: Option<String>,
    pub company_name: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub email: Option<String>,
    pub is_paid: Option<bool>,
    pub credibility_score: Option<i32>,
    pub status: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl InternshipRecord {
    pub fn from_new(id: i64, record: NewInternshipRecord, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: record.title,
            company_name: record.company_name,
            description: record.description,
            link: record.link,
            email: record.email,
            is_paid: record.is_paid,
            credibility_score: record.credibility_score,
            status: record.status,
            created_at,
        }
    }
}

/// Storage abstraction for evaluated postings.
pub trait InternshipRepository: Send + Sync {
    fn record(&self, record: NewInternshipRecord) -> Result<InternshipRecord, RepositoryError>;
    /// Most recent records first.
    fn recent(&self, limit: usize) -> Result<Vec<InternshipRecord>, RepositoryError>;
}

/// Error enumeration for history repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record rejected: {0}")]
    Rejected(String),
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
