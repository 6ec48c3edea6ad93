//! Agency bulk upload of worker profiles.
//!
//! One request carries up to [`MAX_BATCH_ROWS`](domain::MAX_BATCH_ROWS) raw
//! rows. Each row is validated, stamped with the uploading agency, and
//! persisted (or merely validated in dry-run mode); the batch never aborts
//! because of a bad row. Reporting to the audit trail and event bus happens
//! once per batch, after the row loop.

pub mod domain;
pub(crate) mod processor;
pub(crate) mod reporting;
pub mod repository;
pub mod router;
pub mod service;
pub mod validator;

#[cfg(test)]
mod tests;

pub use domain::{
    BatchSummary, BulkUploadRequest, BulkUploadResult, FailureKind, RawProfileRecord, RowOutcome,
    MAX_BATCH_ROWS,
};
pub use repository::{
    AuditAction, AuditError, AuditLogger, AuditRecord, BulkUploadedEvent, DomainEvent, EventBus,
    EventError, ProfileRecord, ProfileRepository, ProfileStatusView, RepositoryError,
};
pub use router::bulk_upload_router;
pub use service::{BulkUploadError, BulkUploadService};
pub use validator::{ProfileValidationError, ProfileValidator, MAX_WORKER_AGE, MIN_WORKER_AGE};
