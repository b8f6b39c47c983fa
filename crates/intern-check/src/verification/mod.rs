//! Internship posting verification: domain classification, scam-pattern rules, credibility
//! scoring, and the service and HTTP surface that wrap them.

pub mod classifier;
pub mod domain;
pub mod paid;
pub mod repository;
pub mod router;
pub mod rules;
pub mod scoring;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use classifier::{extract_domain, DomainTables};
pub use domain::{CredibilityStatus, InternshipPosting, PaidStatus, ScoreResult};
pub use paid::detect_paid_status;
pub use repository::{
    InternshipRecord, InternshipRepository, NewInternshipRecord, RepositoryError,
};
pub use router::{verification_router, CheckRequest, CheckResponse};
pub use rules::{default_rules, NewScamRule, RuleStore, RuleStoreError, ScamRule};
pub use scoring::{ScoreBreakdown, ScoreComponent, ScoringEngine, SignalKind};
pub use service::{CheckOutcome, VerificationError, VerificationService};
pub use store::{InMemoryInternshipRepository, InMemoryRuleStore, SqliteStore, StoreError};
