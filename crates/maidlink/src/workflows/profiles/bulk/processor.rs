//! Per-row pipeline: validate, stamp agency ownership, persist.
//!
//! Processing a row never fails; every error is folded into the returned
//! [`RowOutcome`] so one bad row cannot abort the rows behind it.

use std::sync::Arc;

use chrono::NaiveDate;

use super::domain::{FailureKind, RawProfileRecord, RowOutcome};
use super::repository::ProfileRepository;
use super::validator::ProfileValidator;
use crate::workflows::profiles::domain::AgencyId;

pub struct RowProcessor<R> {
    validator: ProfileValidator,
    repository: Arc<R>,
}

impl<R> RowProcessor<R>
where
    R: ProfileRepository,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            validator: ProfileValidator::new(),
            repository,
        }
    }

    /// Runs one row through validation and, unless `dry_run`, persistence.
    ///
    /// The stored profile always belongs to `agency_id` and is marked agency
    /// approved, whatever the row claimed. Failed outcomes keep the caller's
    /// input verbatim for resubmission.
    pub fn process(
        &self,
        row_number: usize,
        raw: RawProfileRecord,
        agency_id: &AgencyId,
        dry_run: bool,
        today: NaiveDate,
    ) -> RowOutcome {
        let mut profile = match self.validator.validate(&raw, today) {
            Ok(profile) => profile,
            Err(err) => {
                return RowOutcome::Failed {
                    row_number,
                    input: raw,
                    kind: FailureKind::Validation,
                    error: format!("Row {row_number} validation errors: {err}"),
                };
            }
        };

        profile.agency_id = Some(agency_id.clone());
        profile.agency_approved = true;

        if dry_run {
            return RowOutcome::Validated {
                row_number,
                profile,
            };
        }

        let full_name = profile.full_name.clone();
        match self.repository.create(profile) {
            Ok(profile_id) => RowOutcome::Created {
                row_number,
                profile_id,
                full_name,
            },
            Err(err) => RowOutcome::Failed {
                row_number,
                input: raw,
                kind: FailureKind::Persistence,
                error: err.to_string(),
            },
        }
    }
}
