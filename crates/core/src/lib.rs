//! Financial statement engine for Douke.
//!
//! This crate turns a snapshot of SYSCOHADA ledger entries into the statutory
//! statements of the NORMAL or MINIMAL regime. It is pure computation with
//! ZERO I/O: entries come in, a serializable report bundle comes out.
//!
//! # Modules
//!
//! - `ledger` - Entries and the pre-aggregated balances adapter
//! - `classification` - Account classes and rubric aggregation
//! - `reports` - Balance sheet, income statement, cash flow, notes, receipts
//! - `analysis` - Financial ratios
//! - `engine` - Orchestration into a report bundle

pub mod analysis;
pub mod classification;
pub mod engine;
pub mod ledger;
pub mod reports;

pub use engine::{
    ReportBundle, ReportInput, ReportJob, StatementEngine, Warning, generate_financial_statements,
};
pub use ledger::{AccountCode, Entry};
pub use reports::{Configuration, Regime, StatementError};
