use crate::cli::ServeArgs;
use crate::infra::{build_service, AppState, TrackerFallback};
use crate::routes::with_pipeline_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use job_scout::config::AppConfig;
use job_scout::error::AppError;
use job_scout::workflows::pipeline::PipelineError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut config: AppConfig, mut args: ServeArgs) -> Result<(), AppError> {
    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let service = build_service(&config, TrackerFallback::InMemory)
        .await
        .map_err(PipelineError::from)?;
    let service = Arc::new(service);
    let tracker_backend = service.tracker().label();

    let app = with_pipeline_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, tracker = tracker_backend, "job scout ready");

    axum::serve(listener, app).await?;
    Ok(())
}
