//! Core library for the maid placement marketplace.
//!
//! The crate centers on agency-facing profile ingestion: the bulk upload
//! workflow under [`workflows::profiles::bulk`], the roster sheet importer
//! under [`workflows::roster`], and the shared configuration, telemetry,
//! and error plumbing the API service builds on.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;

pub use error::AppError;
