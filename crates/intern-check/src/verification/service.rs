use std::sync::Arc;

use tracing::{debug, warn};

use super::domain::{InternshipPosting, ScoreResult};
use super::repository::{InternshipRecord, InternshipRepository, NewInternshipRecord};
use super::rules::{RuleStore, RuleStoreError};
use super::scoring::{ScoreBreakdown, ScoringEngine};

/// Service composing the rule store, scoring engine, and check history.
pub struct VerificationService<S, R> {
    rules: Arc<S>,
    history: Arc<R>,
    engine: Arc<ScoringEngine>,
}

impl<S, R> VerificationService<S, R>
where
    S: RuleStore + 'static,
    R: InternshipRepository + 'static,
{
    pub fn new(rules: Arc<S>, history: Arc<R>) -> Self {
        Self::with_engine(rules, history, ScoringEngine::standard())
    }

    pub fn with_engine(rules: Arc<S>, history: Arc<R>, engine: ScoringEngine) -> Self {
        Self {
            rules,
            history,
            engine: Arc::new(engine),
        }
    }

    pub fn rules(&self) -> &S {
        &self.rules
    }

    pub fn history(&self) -> &R {
        &self.history
    }

    /// Score a posting against the rules currently in the store.
    pub fn evaluate(&self, posting: &InternshipPosting) -> Result<ScoreResult, VerificationError> {
        Ok(self.explain(posting)?.into_result())
    }

    /// Same as [`Self::evaluate`] but keeps the per-signal contributions.
    pub fn explain(
        &self,
        posting: &InternshipPosting,
    ) -> Result<ScoreBreakdown, VerificationError> {
        let rules = self.rules.all_rules()?;
        let breakdown = self.engine.breakdown(posting, &rules);
        debug!(
            rules = rules.len(),
            components = breakdown.components.len(),
            raw_total = breakdown.raw_total(),
            "posting evaluated"
        );
        Ok(breakdown)
    }

    /// Evaluate and then record the posting with its verdict. Recording is best effort: a
    /// history failure is logged and the evaluation is still returned.
    pub fn check(&self, posting: InternshipPosting) -> Result<CheckOutcome, VerificationError> {
        let result = self.evaluate(&posting)?;
        let record = NewInternshipRecord::from_evaluation(&posting, &result);

        let saved = match self.history.record(record) {
            Ok(stored) => Some(stored),
            Err(error) => {
                warn!(%error, status = result.status.label(), "failed to record internship check");
                None
            }
        };

        Ok(CheckOutcome { result, saved })
    }
}

/// Evaluation plus the stored record, when recording succeeded.
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub result: ScoreResult,
    pub saved: Option<InternshipRecord>,
}

impl CheckOutcome {
    pub fn record_id(&self) -> Option<i64> {
        self.saved.as_ref().map(|record| record.id)
    }
}

/// Error raised by the verification service.
#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
    #[error(transparent)]
    Rules(#[from] RuleStoreError),
}
