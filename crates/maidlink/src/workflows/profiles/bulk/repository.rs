use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::super::domain::{AgencyId, MaritalStatus, ProfileId, UserId, WorkerProfile};

/// Repository record pairing a stored profile with its identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub id: ProfileId,
    pub profile: WorkerProfile,
}

impl ProfileRecord {
    /// Operator-facing summary with every status rendered as its label.
    pub fn status_view(&self) -> ProfileStatusView {
        ProfileStatusView {
            profile_id: self.id.clone(),
            full_name: self.profile.full_name.clone(),
            marital_status: self.profile.marital_status.map(MaritalStatus::label),
            availability: self.profile.availability_status.label(),
            verification: self.profile.verification_status.label(),
            listing: self.profile.status.label(),
        }
    }
}

/// Storage abstraction so the bulk upload service can be exercised in
/// isolation. `create` is the only call the batch path makes; `fetch` backs
/// the read-side endpoints.
pub trait ProfileRepository: Send + Sync {
    fn create(&self, profile: WorkerProfile) -> Result<ProfileId, RepositoryError>;
    fn fetch(&self, id: &ProfileId) -> Result<Option<ProfileRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Constraint rejections carry the store's own message unchanged so a
    /// failed row can surface it verbatim.
    #[error("{0}")]
    Conflict(String),
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Action tags recorded in the audit trail for bulk uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    BulkUploadValidated,
    BulkUploadCompleted,
    BulkUploadFailed,
}

impl AuditAction {
    pub const fn label(self) -> &'static str {
        match self {
            AuditAction::BulkUploadValidated => "bulk_upload_validated",
            AuditAction::BulkUploadCompleted => "bulk_upload_completed",
            AuditAction::BulkUploadFailed => "bulk_upload_failed",
        }
    }
}

/// One entry for the audit log sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub action: AuditAction,
    pub user_id: UserId,
    pub agency_id: AgencyId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Trait describing the audit-log sink. Callers treat failures as
/// best-effort; a broken sink must not undo committed work.
pub trait AuditLogger: Send + Sync {
    fn log(&self, record: AuditRecord) -> Result<(), AuditError>;
}

/// Audit sink dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("audit sink unavailable: {0}")]
    Transport(String),
}

/// Envelope published on the domain event bus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: Value,
}

/// Trait describing the outbound event bus. Optional collaborator; the
/// service works without one wired in.
pub trait EventBus: Send + Sync {
    fn publish(&self, event: DomainEvent) -> Result<(), EventError>;
}

/// Event bus dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error("event bus unavailable: {0}")]
    Transport(String),
}

/// Payload for the event announcing a committed batch of agency profiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkUploadedEvent {
    pub agency_id: AgencyId,
    pub uploaded_by: UserId,
    pub count: usize,
    pub uploaded_at: DateTime<Utc>,
}

impl BulkUploadedEvent {
    pub const EVENT_TYPE: &'static str = "MaidsBulkUploaded";

    pub fn into_event(self) -> DomainEvent {
        let data = serde_json::to_value(&self).unwrap_or(Value::Null);
        DomainEvent {
            event_type: Self::EVENT_TYPE.to_string(),
            data,
        }
    }
}

/// Sanitized representation of a stored profile's placement state.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileStatusView {
    pub profile_id: ProfileId,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marital_status: Option<&'static str>,
    pub availability: &'static str,
    pub verification: &'static str,
    pub listing: &'static str,
}
