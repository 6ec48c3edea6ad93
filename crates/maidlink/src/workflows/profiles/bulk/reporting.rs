//! Batch-level reporting: audit trail entries and the uploaded event.
//!
//! Reporting is best-effort by contract. Once rows have been processed the
//! accounting is already final, so a broken audit sink or event bus is
//! logged and swallowed rather than failing the batch.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::{debug, warn};

use super::domain::BulkUploadResult;
use super::repository::{
    AuditAction, AuditLogger, AuditRecord, BulkUploadedEvent, EventBus,
};
use crate::workflows::profiles::domain::{AgencyId, UserId};

pub struct ReportingSink<L> {
    audit: Arc<L>,
    events: Option<Arc<dyn EventBus>>,
}

impl<L> ReportingSink<L>
where
    L: AuditLogger,
{
    pub fn new(audit: Arc<L>) -> Self {
        Self {
            audit,
            events: None,
        }
    }

    pub fn with_event_bus(mut self, events: Arc<dyn EventBus>) -> Self {
        self.events = Some(events);
        self
    }

    /// Records the audit entry for a finished batch and, for real runs that
    /// created at least one profile, announces it on the event bus.
    pub fn record_outcome(
        &self,
        agency_id: &AgencyId,
        uploaded_by: &UserId,
        result: &BulkUploadResult,
        now: DateTime<Utc>,
    ) {
        let action = if result.summary.dry_run {
            AuditAction::BulkUploadValidated
        } else {
            AuditAction::BulkUploadCompleted
        };
        self.write_audit(AuditRecord {
            action,
            user_id: uploaded_by.clone(),
            agency_id: agency_id.clone(),
            resource_id: None,
            metadata: Some(batch_metadata(result)),
            error: None,
            timestamp: now,
        });

        if result.summary.dry_run || result.summary.succeeded == 0 {
            return;
        }
        if let Some(events) = &self.events {
            let event = BulkUploadedEvent {
                agency_id: agency_id.clone(),
                uploaded_by: uploaded_by.clone(),
                count: result.summary.succeeded,
                uploaded_at: now,
            }
            .into_event();
            match events.publish(event) {
                Ok(()) => debug!(
                    agency = %agency_id.0,
                    count = result.summary.succeeded,
                    "published bulk upload event"
                ),
                Err(err) => warn!(
                    agency = %agency_id.0,
                    error = %err,
                    "event bus rejected bulk upload event"
                ),
            }
        }
    }

    /// Records a `bulk_upload_failed` entry for a run that was interrupted,
    /// keeping whatever partial accounting exists.
    pub fn record_failure(
        &self,
        agency_id: &AgencyId,
        uploaded_by: &UserId,
        result: &BulkUploadResult,
        error: &str,
        now: DateTime<Utc>,
    ) {
        self.write_audit(AuditRecord {
            action: AuditAction::BulkUploadFailed,
            user_id: uploaded_by.clone(),
            agency_id: agency_id.clone(),
            resource_id: None,
            metadata: Some(batch_metadata(result)),
            error: Some(error.to_string()),
            timestamp: now,
        });
    }

    fn write_audit(&self, record: AuditRecord) {
        let action = record.action.label();
        match self.audit.log(record) {
            Ok(()) => debug!(action, "recorded bulk upload audit entry"),
            Err(err) => warn!(action, error = %err, "audit sink rejected bulk upload entry"),
        }
    }
}

fn batch_metadata(result: &BulkUploadResult) -> serde_json::Value {
    json!({
        "total_attempted": result.summary.total,
        "succeeded": result.summary.succeeded,
        "failed": result.summary.failed,
        "failure_rate": result.summary.failure_rate(),
    })
}
