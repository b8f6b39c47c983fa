use axum::http::{header, HeaderValue, Method};
use intern_check::config::{AppConfig, CorsConfig};
use intern_check::error::AppError;
use intern_check::verification::{RuleStore, SqliteStore};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Open the configured database and make sure the default rules exist.
pub(crate) fn open_seeded_store(config: &AppConfig) -> Result<Arc<SqliteStore>, AppError> {
    let store = SqliteStore::open(config.database.sqlite_path())?;
    let inserted = store.seed_defaults_if_empty()?;
    if inserted == 0 {
        info!("scam pattern table already populated");
    }
    Ok(Arc::new(store))
}

pub(crate) fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    if config.allows_any_origin() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "ignoring unparsable CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}
