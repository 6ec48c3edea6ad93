use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::super::domain::{AgencyId, ProfileId, UserId, WorkerProfile};

/// Hard cap on rows per upload. Larger batches are rejected before any row
/// is touched.
pub const MAX_BATCH_ROWS: usize = 100;

/// One untrusted row as the caller supplied it: a free-form mapping of field
/// name to value. No invariants hold here; the validator is the single choke
/// point that turns this into a [`WorkerProfile`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawProfileRecord(pub serde_json::Map<String, Value>);

impl RawProfileRecord {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: Value) -> &mut Self {
        self.0.insert(field.into(), value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A full batch submission from one agency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkUploadRequest {
    pub agency_id: AgencyId,
    pub uploaded_by: UserId,
    pub rows: Vec<RawProfileRecord>,
    /// Validate-only mode: run every rule, persist nothing.
    #[serde(default)]
    pub dry_run: bool,
}

/// Distinguishes rows rejected by validation from rows the store refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Validation,
    Persistence,
}

/// Result for one row, created once by the row processor and immutable
/// thereafter. `row_number` is 1-indexed and equals the row's position in
/// the submitted array, so callers can correlate failures back to their
/// spreadsheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RowOutcome {
    /// Row validated and persisted (real runs only).
    Created {
        row_number: usize,
        profile_id: ProfileId,
        full_name: String,
    },
    /// Row validated; persistence skipped (dry-run only).
    Validated {
        row_number: usize,
        profile: WorkerProfile,
    },
    /// Row rejected. Carries the caller's original input untouched.
    Failed {
        row_number: usize,
        input: RawProfileRecord,
        kind: FailureKind,
        error: String,
    },
}

impl RowOutcome {
    pub fn row_number(&self) -> usize {
        match self {
            RowOutcome::Created { row_number, .. }
            | RowOutcome::Validated { row_number, .. }
            | RowOutcome::Failed { row_number, .. } => *row_number,
        }
    }

    pub fn is_success(&self) -> bool {
        !matches!(self, RowOutcome::Failed { .. })
    }
}

/// Derived batch accounting. Always recomputed from the outcome lists so it
/// cannot drift from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub dry_run: bool,
}

impl BatchSummary {
    /// Share of failed rows, formatted to two decimals with a trailing `%`.
    pub fn failure_rate(&self) -> String {
        if self.total == 0 {
            return "0.00%".to_string();
        }
        format!("{:.2}%", self.failed as f64 / self.total as f64 * 100.0)
    }
}

/// The sole return value of a bulk upload: per-row outcomes split by result,
/// plus the derived summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkUploadResult {
    pub successful: Vec<RowOutcome>,
    pub failed: Vec<RowOutcome>,
    pub summary: BatchSummary,
}

impl BulkUploadResult {
    pub fn from_outcomes(
        successful: Vec<RowOutcome>,
        failed: Vec<RowOutcome>,
        dry_run: bool,
    ) -> Self {
        let summary = BatchSummary {
            total: successful.len() + failed.len(),
            succeeded: successful.len(),
            failed: failed.len(),
            dry_run,
        };
        Self {
            successful,
            failed,
            summary,
        }
    }
}
