//! Batch orchestration for agency bulk profile uploads.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{info, warn};

use super::domain::{BulkUploadRequest, BulkUploadResult, MAX_BATCH_ROWS};
use super::processor::RowProcessor;
use super::reporting::ReportingSink;
use super::repository::{
    AuditLogger, EventBus, ProfileRecord, ProfileRepository, RepositoryError,
};
use crate::workflows::profiles::domain::ProfileId;

/// Rejections raised before any row is touched, plus the interrupted case.
/// Per-row problems never surface here; they live in the result's outcome
/// lists.
#[derive(Debug, Error)]
pub enum BulkUploadError {
    #[error("agency id is required")]
    MissingAgency,
    #[error("uploading user id is required")]
    MissingUploader,
    #[error("at least one profile row is required")]
    EmptyBatch,
    #[error("batch of {got} rows exceeds maximum of {max} profiles", max = MAX_BATCH_ROWS)]
    TooManyRows { got: usize },
    /// The cancel flag was observed mid-batch. Rows already submitted stay
    /// submitted; `partial` accounts for exactly those.
    #[error("upload cancelled after {submitted} rows")]
    Cancelled {
        submitted: usize,
        partial: BulkUploadResult,
    },
}

/// Drives a whole upload: request preconditions, the sequential row loop,
/// then reporting. Generic over its collaborators so tests can run it
/// against in-memory fakes.
pub struct BulkUploadService<R, L> {
    repository: Arc<R>,
    processor: RowProcessor<R>,
    reporting: ReportingSink<L>,
    cancel: Option<Arc<AtomicBool>>,
}

impl<R, L> BulkUploadService<R, L>
where
    R: ProfileRepository,
    L: AuditLogger,
{
    pub fn new(repository: Arc<R>, audit: Arc<L>) -> Self {
        Self {
            processor: RowProcessor::new(Arc::clone(&repository)),
            repository,
            reporting: ReportingSink::new(audit),
            cancel: None,
        }
    }

    pub fn with_event_bus(repository: Arc<R>, audit: Arc<L>, events: Arc<dyn EventBus>) -> Self {
        Self {
            processor: RowProcessor::new(Arc::clone(&repository)),
            repository,
            reporting: ReportingSink::new(audit).with_event_bus(events),
            cancel: None,
        }
    }

    /// Installs a flag that aborts the row loop once set. Rows already
    /// processed are kept and reported.
    pub fn with_cancel_flag(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn run(&self, request: BulkUploadRequest) -> Result<BulkUploadResult, BulkUploadError> {
        self.run_at(request, Utc::now())
    }

    /// Like [`run`](Self::run) but with an explicit clock, so age and expiry
    /// rules can be pinned in tests.
    pub fn run_at(
        &self,
        request: BulkUploadRequest,
        now: DateTime<Utc>,
    ) -> Result<BulkUploadResult, BulkUploadError> {
        let BulkUploadRequest {
            agency_id,
            uploaded_by,
            rows,
            dry_run,
        } = request;

        if agency_id.0.trim().is_empty() {
            return Err(BulkUploadError::MissingAgency);
        }
        if uploaded_by.0.trim().is_empty() {
            return Err(BulkUploadError::MissingUploader);
        }
        if rows.is_empty() {
            return Err(BulkUploadError::EmptyBatch);
        }
        if rows.len() > MAX_BATCH_ROWS {
            return Err(BulkUploadError::TooManyRows { got: rows.len() });
        }

        let total = rows.len();
        let today = now.date_naive();
        let mut successful = Vec::new();
        let mut failed = Vec::new();

        info!(agency = %agency_id.0, rows = total, dry_run, "starting bulk profile upload");

        for (index, raw) in rows.into_iter().enumerate() {
            if self.cancelled() {
                let submitted = index;
                let partial = BulkUploadResult::from_outcomes(successful, failed, dry_run);
                let message = format!("upload cancelled after {submitted} rows");
                warn!(agency = %agency_id.0, submitted, total, "bulk profile upload cancelled");
                self.reporting
                    .record_failure(&agency_id, &uploaded_by, &partial, &message, now);
                return Err(BulkUploadError::Cancelled { submitted, partial });
            }

            let outcome = self
                .processor
                .process(index + 1, raw, &agency_id, dry_run, today);
            if outcome.is_success() {
                successful.push(outcome);
            } else {
                failed.push(outcome);
            }
        }

        let result = BulkUploadResult::from_outcomes(successful, failed, dry_run);
        info!(
            agency = %agency_id.0,
            succeeded = result.summary.succeeded,
            failed = result.summary.failed,
            dry_run,
            "bulk profile upload finished"
        );
        self.reporting
            .record_outcome(&agency_id, &uploaded_by, &result, now);
        Ok(result)
    }

    /// Read-side passthrough for the profile lookup endpoint.
    pub fn profile(&self, id: &ProfileId) -> Result<Option<ProfileRecord>, RepositoryError> {
        self.repository.fetch(id)
    }

    fn cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}
