use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::BulkUploadRequest;
use super::repository::{AuditLogger, ProfileRepository};
use super::service::{BulkUploadError, BulkUploadService};
use crate::workflows::profiles::domain::ProfileId;

/// Router builder exposing HTTP endpoints for bulk upload and profile
/// lookup.
pub fn bulk_upload_router<R, L>(service: Arc<BulkUploadService<R, L>>) -> Router
where
    R: ProfileRepository + 'static,
    L: AuditLogger + 'static,
{
    Router::new()
        .route("/api/v1/maids/bulk-upload", post(upload_handler::<R, L>))
        .route("/api/v1/maids/:profile_id", get(profile_handler::<R, L>))
        .with_state(service)
}

pub(crate) async fn upload_handler<R, L>(
    State(service): State<Arc<BulkUploadService<R, L>>>,
    axum::Json(request): axum::Json<BulkUploadRequest>,
) -> Response
where
    R: ProfileRepository + 'static,
    L: AuditLogger + 'static,
{
    match service.run(request) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(BulkUploadError::Cancelled { submitted, partial }) => {
            let payload = json!({
                "error": format!("upload cancelled after {submitted} rows"),
                "partial": partial,
            });
            (StatusCode::SERVICE_UNAVAILABLE, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn profile_handler<R, L>(
    State(service): State<Arc<BulkUploadService<R, L>>>,
    Path(profile_id): Path<String>,
) -> Response
where
    R: ProfileRepository + 'static,
    L: AuditLogger + 'static,
{
    let id = ProfileId(profile_id);
    match service.profile(&id) {
        Ok(Some(record)) => (StatusCode::OK, axum::Json(record)).into_response(),
        Ok(None) => {
            let payload = json!({
                "error": "profile not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(err) => {
            let payload = json!({
                "error": err.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
