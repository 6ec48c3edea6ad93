use crate::infra::{parse_date, InMemoryAuditLog, InMemoryEventBus, InMemoryProfileRepository};
use chrono::{NaiveDate, NaiveTime, Utc};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use maidlink::error::AppError;
use maidlink::workflows::profiles::bulk::{
    BatchSummary, BulkUploadRequest, BulkUploadService, RowOutcome, MAX_BATCH_ROWS,
};
use maidlink::workflows::profiles::{AgencyId, UserId};
use maidlink::workflows::roster::RosterImporter;

#[derive(Args, Debug)]
pub(crate) struct UploadArgs {
    /// Roster CSV exported from the agency's spreadsheet
    #[arg(long)]
    pub(crate) file: PathBuf,
    /// Agency the uploaded workers belong to
    #[arg(long)]
    pub(crate) agency: String,
    /// User recorded in the audit trail as the uploader
    #[arg(long, default_value = "cli")]
    pub(crate) user: String,
    /// Validate every row without persisting anything
    #[arg(long)]
    pub(crate) dry_run: bool,
    /// Evaluate age and expiry rules as of this date (YYYY-MM-DD) instead of today
    #[arg(long, value_parser = parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
}

pub(crate) fn run_upload(args: UploadArgs) -> Result<(), AppError> {
    let UploadArgs {
        file,
        agency,
        user,
        dry_run,
        as_of,
    } = args;

    let rows = RosterImporter::from_path(&file)?;
    println!("Imported {} rows from {}", rows.len(), file.display());
    if rows.is_empty() {
        return Ok(());
    }

    let now = match as_of {
        Some(date) => date.and_time(NaiveTime::MIN).and_utc(),
        None => Utc::now(),
    };

    let repository = Arc::new(InMemoryProfileRepository::default());
    let audit = Arc::new(InMemoryAuditLog::default());
    let events = Arc::new(InMemoryEventBus::default());
    let service = BulkUploadService::with_event_bus(repository, audit.clone(), events.clone());

    let mut totals = BatchSummary {
        total: 0,
        succeeded: 0,
        failed: 0,
        dry_run,
    };
    let batches = rows.len().div_ceil(MAX_BATCH_ROWS);
    for (index, batch) in rows.chunks(MAX_BATCH_ROWS).enumerate() {
        let offset = index * MAX_BATCH_ROWS;
        let request = BulkUploadRequest {
            agency_id: AgencyId(agency.clone()),
            uploaded_by: UserId(user.clone()),
            rows: batch.to_vec(),
            dry_run,
        };
        let result = service.run_at(request, now)?;

        if batches > 1 {
            println!(
                "\nBatch {}/{} (rows {}-{})",
                index + 1,
                batches,
                offset + 1,
                offset + batch.len()
            );
        }
        println!(
            "  {} succeeded, {} failed",
            result.summary.succeeded, result.summary.failed
        );
        for outcome in &result.failed {
            if let RowOutcome::Failed {
                row_number, error, ..
            } = outcome
            {
                println!("  - row {}: {}", offset + row_number, error);
            }
        }
        for outcome in &result.successful {
            if let RowOutcome::Created {
                row_number,
                profile_id,
                ..
            } = outcome
            {
                if let Ok(Some(record)) = service.profile(profile_id) {
                    let view = record.status_view();
                    println!(
                        "  + row {}: {} -> {} | {} | {} | verification {} | listing {}",
                        offset + row_number,
                        view.full_name,
                        view.profile_id.0,
                        view.marital_status.unwrap_or("undisclosed"),
                        view.availability,
                        view.verification,
                        view.listing
                    );
                }
            }
        }

        totals.total += result.summary.total;
        totals.succeeded += result.summary.succeeded;
        totals.failed += result.summary.failed;
    }

    println!(
        "\nTotals: {} attempted | {} succeeded | {} failed | {} failure rate",
        totals.total,
        totals.succeeded,
        totals.failed,
        totals.failure_rate()
    );
    if dry_run {
        println!("Dry run: no profiles were persisted");
    }
    println!("Audit entries recorded: {}", audit.records().len());
    println!("Events published: {}", events.events().len());

    Ok(())
}
