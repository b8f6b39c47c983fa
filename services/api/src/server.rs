use crate::cli::ServeArgs;
use crate::infra::{cors_layer, open_seeded_store, AppState};
use crate::routes::with_verification_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use intern_check::config::AppConfig;
use intern_check::error::AppError;
use intern_check::telemetry;
use intern_check::verification::VerificationService;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = open_seeded_store(&config)?;
    let verification_service = Arc::new(VerificationService::new(store.clone(), store));

    let app = with_verification_routes(verification_service)
        .layer(Extension(app_state))
        .layer(cors_layer(&config.cors))
        .layer(TraceLayer::new_for_http())
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "internship credibility checker ready");

    axum::serve(listener, app).await?;
    Ok(())
}
