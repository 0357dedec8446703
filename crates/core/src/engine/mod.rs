//! Report orchestration.
//!
//! Validates the report configuration, runs the statement generators in
//! dependency order over one entry snapshot and assembles the bundle handed
//! back to callers.

pub mod service;
pub mod types;


pub use service::{StatementEngine, generate_financial_statements};
pub use types::{ReportBundle, ReportInput, ReportJob, ReportMetadata, Warning};
