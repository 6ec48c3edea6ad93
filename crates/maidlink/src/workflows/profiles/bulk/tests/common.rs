use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::{json, Value};

use crate::workflows::profiles::bulk::domain::{BulkUploadRequest, RawProfileRecord};
use crate::workflows::profiles::bulk::repository::{
    AuditError, AuditLogger, AuditRecord, DomainEvent, EventBus, EventError, ProfileRecord,
    ProfileRepository, RepositoryError,
};
use crate::workflows::profiles::bulk::{bulk_upload_router, BulkUploadService};
use crate::workflows::profiles::domain::{AgencyId, ProfileId, UserId, WorkerProfile};

/// Frozen clock shared by the suite so age and expiry rules are stable.
pub(super) fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 15, 10, 30, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn today() -> NaiveDate {
    fixed_now().date_naive()
}

pub(super) fn agency() -> AgencyId {
    AgencyId("agency-7".to_string())
}

pub(super) fn uploader() -> UserId {
    UserId("user-42".to_string())
}

pub(super) fn valid_row(name: &str) -> RawProfileRecord {
    let mut row = RawProfileRecord::default();
    row.insert("fullName", json!(name));
    row.insert("dateOfBirth", json!("1995-04-12"));
    row.insert("skills", json!(["cooking", "childcare"]));
    row.insert("languages", json!(["amharic", "english"]));
    row.insert("experienceYears", json!(4));
    row
}

pub(super) fn row_with_phone(name: &str, phone: &str) -> RawProfileRecord {
    let mut row = valid_row(name);
    row.insert("phone", json!(phone));
    row
}

pub(super) fn empty_row() -> RawProfileRecord {
    RawProfileRecord::default()
}

pub(super) fn request(rows: Vec<RawProfileRecord>) -> BulkUploadRequest {
    BulkUploadRequest {
        agency_id: agency(),
        uploaded_by: uploader(),
        rows,
        dry_run: false,
    }
}

pub(super) fn dry_run_request(rows: Vec<RawProfileRecord>) -> BulkUploadRequest {
    BulkUploadRequest {
        dry_run: true,
        ..request(rows)
    }
}

pub(super) fn build_service() -> (
    BulkUploadService<MemoryProfiles, MemoryAudit>,
    Arc<MemoryProfiles>,
    Arc<MemoryAudit>,
    Arc<MemoryEvents>,
) {
    let repository = Arc::new(MemoryProfiles::default());
    let audit = Arc::new(MemoryAudit::default());
    let events = Arc::new(MemoryEvents::default());
    let service =
        BulkUploadService::with_event_bus(repository.clone(), audit.clone(), events.clone());
    (service, repository, audit, events)
}

pub(super) fn bulk_router_with_service(
    service: BulkUploadService<MemoryProfiles, MemoryAudit>,
) -> axum::Router {
    bulk_upload_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 256 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

#[derive(Default)]
struct MemoryProfilesInner {
    records: HashMap<ProfileId, ProfileRecord>,
    next_id: u64,
}

/// Store fake with the production uniqueness rule: one profile per phone.
#[derive(Default, Clone)]
pub(super) struct MemoryProfiles {
    inner: Arc<Mutex<MemoryProfilesInner>>,
}

impl MemoryProfiles {
    pub(super) fn stored(&self) -> Vec<ProfileRecord> {
        let guard = self.inner.lock().expect("repository mutex poisoned");
        guard.records.values().cloned().collect()
    }

    pub(super) fn len(&self) -> usize {
        let guard = self.inner.lock().expect("repository mutex poisoned");
        guard.records.len()
    }
}

impl ProfileRepository for MemoryProfiles {
    fn create(&self, profile: WorkerProfile) -> Result<ProfileId, RepositoryError> {
        let mut guard = self.inner.lock().expect("repository mutex poisoned");
        if let Some(phone) = profile.phone.as_deref() {
            let taken = guard
                .records
                .values()
                .any(|record| record.profile.phone.as_deref() == Some(phone));
            if taken {
                return Err(RepositoryError::Conflict("duplicate phone".to_string()));
            }
        }

        guard.next_id += 1;
        let id = ProfileId(format!("maid-{}", guard.next_id));
        guard.records.insert(
            id.clone(),
            ProfileRecord {
                id: id.clone(),
                profile,
            },
        );
        Ok(id)
    }

    fn fetch(&self, id: &ProfileId) -> Result<Option<ProfileRecord>, RepositoryError> {
        let guard = self.inner.lock().expect("repository mutex poisoned");
        Ok(guard.records.get(id).cloned())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryAudit {
    records: Arc<Mutex<Vec<AuditRecord>>>,
}

impl MemoryAudit {
    pub(super) fn records(&self) -> Vec<AuditRecord> {
        self.records.lock().expect("audit mutex poisoned").clone()
    }
}

impl AuditLogger for MemoryAudit {
    fn log(&self, record: AuditRecord) -> Result<(), AuditError> {
        self.records
            .lock()
            .expect("audit mutex poisoned")
            .push(record);
        Ok(())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryEvents {
    events: Arc<Mutex<Vec<DomainEvent>>>,
}

impl MemoryEvents {
    pub(super) fn events(&self) -> Vec<DomainEvent> {
        self.events.lock().expect("event mutex poisoned").clone()
    }
}

impl EventBus for MemoryEvents {
    fn publish(&self, event: DomainEvent) -> Result<(), EventError> {
        self.events
            .lock()
            .expect("event mutex poisoned")
            .push(event);
        Ok(())
    }
}

/// Refuses every insert the way a unique-index violation would.
pub(super) struct ConflictProfiles;

impl ProfileRepository for ConflictProfiles {
    fn create(&self, _profile: WorkerProfile) -> Result<ProfileId, RepositoryError> {
        Err(RepositoryError::Conflict("duplicate phone".to_string()))
    }

    fn fetch(&self, _id: &ProfileId) -> Result<Option<ProfileRecord>, RepositoryError> {
        Ok(None)
    }
}

pub(super) struct UnavailableProfiles;

impl ProfileRepository for UnavailableProfiles {
    fn create(&self, _profile: WorkerProfile) -> Result<ProfileId, RepositoryError> {
        Err(RepositoryError::Unavailable("profile store offline".to_string()))
    }

    fn fetch(&self, _id: &ProfileId) -> Result<Option<ProfileRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("profile store offline".to_string()))
    }
}

pub(super) struct FailingAudit;

impl AuditLogger for FailingAudit {
    fn log(&self, _record: AuditRecord) -> Result<(), AuditError> {
        Err(AuditError::Transport("audit store offline".to_string()))
    }
}

/// Sets the cancel flag after each successful insert, so the loop observes
/// cancellation before the following row.
pub(super) struct FlagSettingProfiles {
    pub(super) inner: MemoryProfiles,
    pub(super) flag: Arc<AtomicBool>,
}

impl ProfileRepository for FlagSettingProfiles {
    fn create(&self, profile: WorkerProfile) -> Result<ProfileId, RepositoryError> {
        let id = self.inner.create(profile)?;
        self.flag.store(true, Ordering::Relaxed);
        Ok(id)
    }

    fn fetch(&self, id: &ProfileId) -> Result<Option<ProfileRecord>, RepositoryError> {
        self.inner.fetch(id)
    }
}
