use std::sync::{Arc, Condvar, Mutex};
use std::time::Duration;

use axum::response::Response;
use serde_json::Value;

use crate::verification::repository::{
    InternshipRecord, InternshipRepository, NewInternshipRecord, RepositoryError,
};
use crate::verification::rules::{NewScamRule, RuleStore, RuleStoreError, ScamRule};
use crate::verification::store::{InMemoryInternshipRepository, InMemoryRuleStore};
use crate::verification::{verification_router, InternshipPosting, VerificationService};

pub(super) fn posting() -> InternshipPosting {
    InternshipPosting {
        title: Some("Backend Engineering Intern".to_string()),
        company_name: Some("Acme Robotics".to_string()),
        description: Some(
            "Work with our platform team on Rust services. Stipend of ₹20,000 per month."
                .to_string(),
        ),
        link: Some("https://www.linkedin.com/jobs/view/3912345678".to_string()),
        email: Some("talent@careers.acmerobotics.io".to_string()),
    }
}

pub(super) fn scam_posting() -> InternshipPosting {
    InternshipPosting {
        title: Some("Work From Home Intern".to_string()),
        company_name: None,
        description: Some(
            "Pay to apply! Registration fee of ₹999 and training fee required. Telegram only."
                .to_string(),
        ),
        link: Some("http://intern-offers.xyz/Zq8x7Lp0Rt5Vn2Mb4Kc9Wd1Yf".to_string()),
        email: Some("hiring.desk@gmail.com".to_string()),
    }
}

pub(super) fn rule(id: i64, keyword: &str, weight: i32, description: Option<&str>) -> ScamRule {
    ScamRule {
        id,
        keyword: keyword.to_string(),
        description: description.map(str::to_string),
        weight,
        tag: None,
    }
}

pub(super) fn seeded_rules() -> Vec<ScamRule> {
    InMemoryRuleStore::with_defaults()
        .all_rules()
        .expect("in-memory rules load")
}

pub(super) fn build_service() -> (
    VerificationService<InMemoryRuleStore, InMemoryInternshipRepository>,
    Arc<InMemoryRuleStore>,
    Arc<InMemoryInternshipRepository>,
) {
    let rules = Arc::new(InMemoryRuleStore::with_defaults());
    let history = Arc::new(InMemoryInternshipRepository::default());
    let service = VerificationService::new(rules.clone(), history.clone());
    (service, rules, history)
}

pub(super) fn router_with_service(
    service: VerificationService<InMemoryRuleStore, InMemoryInternshipRepository>,
) -> axum::Router {
    verification_router(Arc::new(service))
}

pub(super) struct UnavailableRules;

impl RuleStore for UnavailableRules {
    fn all_rules(&self) -> Result<Vec<ScamRule>, RuleStoreError> {
        Err(RuleStoreError::Unavailable("database offline".to_string()))
    }

    fn seed_defaults_if_empty(&self) -> Result<usize, RuleStoreError> {
        Err(RuleStoreError::Unavailable("database offline".to_string()))
    }

    fn add_rule(&self, _rule: NewScamRule) -> Result<ScamRule, RuleStoreError> {
        Err(RuleStoreError::Unavailable("database offline".to_string()))
    }
}

pub(super) struct FailingHistory;

impl InternshipRepository for FailingHistory {
    fn record(&self, _record: NewInternshipRecord) -> Result<InternshipRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("disk full".to_string()))
    }

    fn recent(&self, _limit: usize) -> Result<Vec<InternshipRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("disk full".to_string()))
    }
}

/// Rule store whose rule set can be swapped between evaluations.
#[derive(Default)]
pub(super) struct SwappableRules {
    pub(super) rules: Mutex<Vec<ScamRule>>,
}

impl RuleStore for SwappableRules {
    fn all_rules(&self) -> Result<Vec<ScamRule>, RuleStoreError> {
        Ok(self.rules.lock().expect("rules mutex poisoned").clone())
    }

    fn seed_defaults_if_empty(&self) -> Result<usize, RuleStoreError> {
        Ok(0)
    }

    fn add_rule(&self, rule: NewScamRule) -> Result<ScamRule, RuleStoreError> {
        let mut guard = self.rules.lock().expect("rules mutex poisoned");
        let stored = ScamRule {
            id: guard.len() as i64 + 1,
            keyword: rule.keyword,
            description: rule.description,
            weight: rule.weight,
            tag: rule.tag,
        };
        guard.push(stored.clone());
        Ok(stored)
    }
}

/// Rule store whose reads only succeed once `expected` callers are inside `all_rules` at the
/// same time. Callers that are never joined give up after `patience`.
pub(super) struct RendezvousRules {
    expected: usize,
    patience: Duration,
    arrived: Mutex<usize>,
    all_here: Condvar,
}

impl RendezvousRules {
    pub(super) fn new(expected: usize, patience: Duration) -> Self {
        Self {
            expected,
            patience,
            arrived: Mutex::new(0),
            all_here: Condvar::new(),
        }
    }
}

impl RuleStore for RendezvousRules {
    fn all_rules(&self) -> Result<Vec<ScamRule>, RuleStoreError> {
        let mut arrived = self.arrived.lock().expect("rendezvous mutex poisoned");
        *arrived += 1;
        self.all_here.notify_all();

        let (arrived, _) = self
            .all_here
            .wait_timeout_while(arrived, self.patience, |count| *count < self.expected)
            .expect("rendezvous mutex poisoned");
        if *arrived < self.expected {
            return Err(RuleStoreError::Unavailable(format!(
                "only {} of {} evaluations ran concurrently",
                *arrived, self.expected
            )));
        }
        Ok(Vec::new())
    }

    fn seed_defaults_if_empty(&self) -> Result<usize, RuleStoreError> {
        Ok(0)
    }

    fn add_rule(&self, _rule: NewScamRule) -> Result<ScamRule, RuleStoreError> {
        Err(RuleStoreError::Unavailable("read-only".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
