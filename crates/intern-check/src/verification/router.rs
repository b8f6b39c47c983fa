use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use crate::error::AppError;

use super::domain::{CredibilityStatus, InternshipPosting, PaidStatus};
use super::repository::InternshipRepository;
use super::rules::RuleStore;
use super::service::{CheckOutcome, VerificationService};

/// Body accepted by `POST /check`. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckRequest {
    pub title: Option<String>,
    pub company_name: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub email: Option<String>,
}

impl From<CheckRequest> for InternshipPosting {
    fn from(value: CheckRequest) -> Self {
        Self {
            title: value.title,
            company_name: value.company_name,
            description: value.description,
            link: value.link,
            email: value.email,
        }
    }
}

/// Verdict returned to the client, with the history id when the check was recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResponse {
    pub status: CredibilityStatus,
    pub paid: PaidStatus,
    pub credibility: u8,
    pub explanations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

impl From<CheckOutcome> for CheckResponse {
    fn from(outcome: CheckOutcome) -> Self {
        let id = outcome.record_id();
        let result = outcome.result;
        Self {
            status: result.status,
            paid: result.paid,
            credibility: result.credibility,
            explanations: result.explanations,
            id,
        }
    }
}

/// Router builder exposing the checker endpoints.
pub fn verification_router<S, R>(service: Arc<VerificationService<S, R>>) -> Router
where
    S: RuleStore + 'static,
    R: InternshipRepository + 'static,
{
    Router::new()
        .route("/", get(home_handler))
        .route("/check", post(check_handler::<S, R>))
        .with_state(service)
}

pub(crate) async fn home_handler() -> Json<serde_json::Value> {
    Json(json!({ "message": "Backend is running ✅" }))
}

pub(crate) async fn check_handler<S, R>(
    State(service): State<Arc<VerificationService<S, R>>>,
    Json(request): Json<CheckRequest>,
) -> Result<Json<CheckResponse>, AppError>
where
    S: RuleStore + 'static,
    R: InternshipRepository + 'static,
{
    // Rule reads and history writes hit SQLite; keep them off the async workers.
    let posting: InternshipPosting = request.into();
    let outcome = tokio::task::spawn_blocking(move || service.check(posting))
        .await
        .map_err(|err| {
            error!(error = %err, "credibility check task failed");
            axum::Error::new(err)
        })?
        .inspect_err(|err| error!(error = %err, "credibility check failed"))?;
    Ok(Json(outcome.into()))
}
