use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryRosterRepository, InMemoryScoreRepository};
use crate::routes::with_scoring_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use courier_scoreboard::config::AppConfig;
use courier_scoreboard::error::AppError;
use courier_scoreboard::telemetry;
use courier_scoreboard::workflows::scoring::{MatchScoringService, SessionLogImporter};
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

    let roster = Arc::new(InMemoryRosterRepository::default());
    let scores = Arc::new(InMemoryScoreRepository::default());

    if args.demo_data {
        crate::demo::seed_sample_roster(&roster);
    }
    if let Some(sessions_csv) = args.sessions.take() {
        let outcome = SessionLogImporter::from_path(&sessions_csv, roster.as_ref())?;
        info!(
            imported = outcome.imported,
            skipped = outcome.skipped,
            "session logs loaded"
        );
    }

    let scoring_service = Arc::new(MatchScoringService::new(roster, scores));

    let app = with_scoring_routes(scoring_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "match scoring service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
