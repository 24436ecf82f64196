use crate::cli::ServeArgs;
use crate::infra::{load_tables, AppState, InMemorySessionRepository};
use crate::routes::with_operational_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use compliance_pilot::assistant::AssistantService;
use compliance_pilot::config::AppConfig;
use compliance_pilot::error::AppError;
use compliance_pilot::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
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
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let (directory, responses) = load_tables(&config.tables)?;
    let repository = Arc::new(InMemorySessionRepository::with_capacity(
        config.server.max_sessions,
    ));
    let assistant = Arc::new(AssistantService::new(
        directory,
        responses,
        repository,
        config.assistant.clone(),
    ));

    let app = with_operational_routes(assistant)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        reply_delay_ms = config.assistant.reply_delay.as_millis() as u64,
        "compliance assistant ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
