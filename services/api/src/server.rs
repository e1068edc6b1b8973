use crate::cli::ServeArgs;
use crate::infra::{in_memory_service, AppState};
use crate::routes::with_faculty_routes;
use crate::seed::seed_faculty;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use fses::config::AppConfig;
use fses::error::AppError;
use fses::telemetry;
use std::sync::atomic::Ordering;
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
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let faculty_service = in_memory_service(config.eligibility.clone());
    if args.seed {
        let seeded = seed_faculty(&faculty_service)?;
        info!(
            students = seeded.students.len(),
            lecturers = seeded.lecturers.len(),
            "seeded in-memory faculty store"
        );
    }

    let app = with_faculty_routes(faculty_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        home_institution = %config.eligibility.home_institution,
        chair_session_cap = config.eligibility.chair_session_cap,
        "first stage evaluation service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
