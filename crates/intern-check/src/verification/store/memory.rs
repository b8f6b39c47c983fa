use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;

use super::super::repository::{
    InternshipRecord, InternshipRepository, NewInternshipRecord, RepositoryError,
};
use super::super::rules::{default_rules, NewScamRule, RuleStore, RuleStoreError, ScamRule};

/// Process-local rule store for tests and database-free CLI checks.
#[derive(Debug, Default, Clone)]
pub struct InMemoryRuleStore {
    rules: Arc<Mutex<Vec<ScamRule>>>,
}

impl InMemoryRuleStore {
    /// Store pre-loaded with the default rule set.
    pub fn with_defaults() -> Self {
        let rules = default_rules()
            .into_iter()
            .zip(1..)
            .map(|(rule, id)| materialize(id, rule))
            .collect();
        Self {
            rules: Arc::new(Mutex::new(rules)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<ScamRule>>, RuleStoreError> {
        self.rules
            .lock()
            .map_err(|_| RuleStoreError::Unavailable("rule store mutex poisoned".to_string()))
    }
}

fn materialize(id: i64, rule: NewScamRule) -> ScamRule {
    ScamRule {
        id,
        keyword: rule.keyword,
        description: rule.description,
        weight: rule.weight,
        tag: rule.tag,
    }
}

impl RuleStore for InMemoryRuleStore {
    fn all_rules(&self) -> Result<Vec<ScamRule>, RuleStoreError> {
        Ok(self.lock()?.clone())
    }

    fn seed_defaults_if_empty(&self) -> Result<usize, RuleStoreError> {
        let mut guard = self.lock()?;
        if !guard.is_empty() {
            return Ok(0);
        }

        let defaults = default_rules();
        let inserted = defaults.len();
        guard.extend(
            defaults
                .into_iter()
                .zip(1..)
                .map(|(rule, id)| materialize(id, rule)),
        );
        Ok(inserted)
    }

    fn add_rule(&self, rule: NewScamRule) -> Result<ScamRule, RuleStoreError> {
        let rule = rule.normalized()?;
        let mut guard = self.lock()?;
        if guard.iter().any(|existing| existing.keyword == rule.keyword) {
            return Err(RuleStoreError::Conflict(rule.keyword));
        }

        let id = guard.iter().map(|existing| existing.id).max().unwrap_or(0) + 1;
        let stored = materialize(id, rule);
        guard.push(stored.clone());
        Ok(stored)
    }
}

/// Process-local history of evaluated postings.
#[derive(Debug, Default, Clone)]
pub struct InMemoryInternshipRepository {
    records: Arc<Mutex<Vec<InternshipRecord>>>,
}

impl InMemoryInternshipRepository {
    fn lock(&self) -> Result<MutexGuard<'_, Vec<InternshipRecord>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("history mutex poisoned".to_string()))
    }
}

impl InternshipRepository for InMemoryInternshipRepository {
    fn record(&self, record: NewInternshipRecord) -> Result<InternshipRecord, RepositoryError> {
        let mut guard = self.lock()?;
        let id = guard.len() as i64 + 1;
        let stored = InternshipRecord::from_new(id, record, Utc::now());
        guard.push(stored.clone());
        Ok(stored)
    }

    fn recent(&self, limit: usize) -> Result<Vec<InternshipRecord>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.iter().rev().take(limit).cloned().collect())
    }
}
