mod policy;
mod signals;

pub use policy::{classify, BASE_SCORE, FAKE_CEILING, REAL_FLOOR};

use std::borrow::Cow;
use std::collections::HashSet;

use serde::Serialize;

use super::classifier::DomainTables;
use super::domain::{InternshipPosting, PaidStatus, ScoreResult};
use super::paid::detect_paid_status;
use super::rules::ScamRule;
use policy::clamp_score;

/// Stateless evaluator that applies the domain tables and scam rules to a posting.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    tables: Cow<'static, DomainTables>,
}

impl ScoringEngine {
    pub fn new(tables: DomainTables) -> Self {
        Self {
            tables: Cow::Owned(tables),
        }
    }

    /// Engine backed by the built-in process-wide tables.
    pub fn standard() -> Self {
        Self {
            tables: Cow::Borrowed(DomainTables::standard()),
        }
    }

    pub fn tables(&self) -> &DomainTables {
        &self.tables
    }

    pub fn score(&self, posting: &InternshipPosting, rules: &[ScamRule]) -> ScoreResult {
        self.breakdown(posting, rules).into_result()
    }

    /// Every signal that fired, in evaluation order, before clamping.
    pub fn breakdown(&self, posting: &InternshipPosting, rules: &[ScamRule]) -> ScoreBreakdown {
        let mut components = Vec::new();

        components.extend(signals::email_signal(posting.email(), &self.tables));
        components.extend(signals::link_signals(posting.link(), &self.tables));
        components.extend(signals::keyword_signals(posting.description(), rules));

        let paid = posting
            .description()
            .map(detect_paid_status)
            .unwrap_or(PaidStatus::Unknown);

        ScoreBreakdown {
            base: BASE_SCORE,
            components,
            paid,
        }
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::standard()
    }
}

/// Posting attribute a component was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    Email,
    Link,
    Keyword,
    Description,
}

/// Discrete contribution to a credibility score, kept for transparent audits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreComponent {
    pub signal: SignalKind,
    pub delta: i32,
    pub explanation: String,
}

impl ScoreComponent {
    pub(crate) fn new(signal: SignalKind, delta: i32, explanation: impl Into<String>) -> Self {
        Self {
            signal,
            delta,
            explanation: explanation.into(),
        }
    }
}

/// Unclamped view of an evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub base: i32,
    pub components: Vec<ScoreComponent>,
    pub paid: PaidStatus,
}

impl ScoreBreakdown {
    /// Base plus every delta; may fall outside `0..=100`.
    pub fn raw_total(&self) -> i32 {
        self.base
            + self
                .components
                .iter()
                .map(|component| component.delta)
                .sum::<i32>()
    }

    pub fn into_result(self) -> ScoreResult {
        let credibility = clamp_score(self.raw_total());
        let explanations = dedup_explanations(
            self.components
                .into_iter()
                .map(|component| component.explanation),
        );

        ScoreResult {
            status: classify(credibility),
            paid: self.paid,
            credibility,
            explanations,
        }
    }
}

fn dedup_explanations(explanations: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    explanations
        .into_iter()
        .filter(|explanation| seen.insert(explanation.clone()))
        .collect()
}
