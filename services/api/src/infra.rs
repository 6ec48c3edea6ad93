use chrono::NaiveDate;
use maidlink::workflows::profiles::bulk::{
    AuditError, AuditLogger, AuditRecord, DomainEvent, EventBus, EventError, ProfileRecord,
    ProfileRepository, RepositoryError,
};
use maidlink::workflows::profiles::{ProfileId, WorkerProfile};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default)]
struct ProfileStoreInner {
    records: HashMap<ProfileId, ProfileRecord>,
    next_id: u64,
}

/// Process-local profile store. Enforces the same phone uniqueness a real
/// database holds via a unique index.
#[derive(Default, Clone)]
pub(crate) struct InMemoryProfileRepository {
    inner: Arc<Mutex<ProfileStoreInner>>,
}

impl ProfileRepository for InMemoryProfileRepository {
    fn create(&self, profile: WorkerProfile) -> Result<ProfileId, RepositoryError> {
        let mut guard = self.inner.lock().expect("repository mutex poisoned");
        if let Some(phone) = profile.phone.as_deref() {
            let taken = guard
                .records
                .values()
                .any(|record| record.profile.phone.as_deref() == Some(phone));
            if taken {
                return Err(RepositoryError::Conflict(format!(
                    "phone number {phone} is already registered"
                )));
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
pub(crate) struct InMemoryAuditLog {
    records: Arc<Mutex<Vec<AuditRecord>>>,
}

impl InMemoryAuditLog {
    pub(crate) fn records(&self) -> Vec<AuditRecord> {
        self.records.lock().expect("audit mutex poisoned").clone()
    }
}

impl AuditLogger for InMemoryAuditLog {
    fn log(&self, record: AuditRecord) -> Result<(), AuditError> {
        let mut guard = self.records.lock().expect("audit mutex poisoned");
        guard.push(record);
        Ok(())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryEventBus {
    events: Arc<Mutex<Vec<DomainEvent>>>,
}

impl InMemoryEventBus {
    pub(crate) fn events(&self) -> Vec<DomainEvent> {
        self.events.lock().expect("event mutex poisoned").clone()
    }
}

impl EventBus for InMemoryEventBus {
    fn publish(&self, event: DomainEvent) -> Result<(), EventError> {
        let mut guard = self.events.lock().expect("event mutex poisoned");
        guard.push(event);
        Ok(())
    }
}

/// clap value parser for date flags.
pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| format!("{raw:?} is not a YYYY-MM-DD date"))
}
