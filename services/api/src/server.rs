use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use tokio::net::TcpListener;
use tracing::info;

use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryAuditLog, InMemoryEventBus, InMemoryProfileRepository};
use crate::routes::with_profile_routes;
use maidlink::config::AppConfig;
use maidlink::error::AppError;
use maidlink::telemetry;
use maidlink::workflows::profiles::bulk::{BulkUploadRequest, BulkUploadService, MAX_BATCH_ROWS};
use maidlink::workflows::profiles::{AgencyId, UserId};
use maidlink::workflows::roster::RosterImporter;

const SEED_AGENCY: &str = "demo-agency";
const SEED_UPLOADER: &str = "system";

pub(crate) async fn run(args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (metrics_layer, metrics_handle) = PrometheusMetricLayer::pair();
    let readiness = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: Arc::clone(&readiness),
        metrics: Arc::new(metrics_handle),
    };

    let repository = Arc::new(InMemoryProfileRepository::default());
    let audit = Arc::new(InMemoryAuditLog::default());
    let events = Arc::new(InMemoryEventBus::default());
    let service = Arc::new(BulkUploadService::with_event_bus(repository, audit, events));

    if let Some(path) = &config.seed_roster {
        seed_profiles(&service, path)?;
    }

    let app = with_profile_routes(service)
        .layer(Extension(state))
        .layer(metrics_layer);

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    readiness.store(true, Ordering::Release);

    info!(?config.environment, %addr, "maid marketplace api ready");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Loads the configured roster sheet into the fresh store before the
/// service starts accepting traffic. Rows the validator rejects are logged
/// and skipped; an unreadable sheet aborts startup.
fn seed_profiles(
    service: &BulkUploadService<InMemoryProfileRepository, InMemoryAuditLog>,
    path: &Path,
) -> Result<(), AppError> {
    let rows = RosterImporter::from_path(path)?;
    if rows.is_empty() {
        info!(sheet = %path.display(), "seed roster contained no rows");
        return Ok(());
    }

    let mut created = 0;
    let mut rejected = 0;
    for batch in rows.chunks(MAX_BATCH_ROWS) {
        let request = BulkUploadRequest {
            agency_id: AgencyId(SEED_AGENCY.to_string()),
            uploaded_by: UserId(SEED_UPLOADER.to_string()),
            rows: batch.to_vec(),
            dry_run: false,
        };
        let result = service.run(request)?;
        created += result.summary.succeeded;
        rejected += result.summary.failed;
    }

    info!(
        sheet = %path.display(),
        created,
        rejected,
        "seeded profiles from roster sheet"
    );
    Ok(())
}
