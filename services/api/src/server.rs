use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_quote_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use optima_underwriter::config::AppConfig;
use optima_underwriter::error::AppError;
use optima_underwriter::telemetry;
use optima_underwriter::workflows::quote::{provider_from_config, QuoteDecisionService};
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

    // The insights client is blocking; build it off the async workers.
    let insights_config = config.insights.clone();
    let insights =
        tokio::task::spawn_blocking(move || provider_from_config(&insights_config)).await?;
    let service = Arc::new(QuoteDecisionService::new(insights));

    let app = with_quote_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        insights = config.insights.enabled(),
        "quote underwriting service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
