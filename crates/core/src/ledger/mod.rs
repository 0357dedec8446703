//! Ledger input types.
//!
//! The engine consumes entries that an external ledger subsystem has already
//! validated and signed. This module defines:
//! - Account codes and entries
//! - The adapter serving callers that only hold pre-aggregated totals

pub mod adapter;
pub mod entry;

pub use adapter::PreAggregatedBalances;
pub use entry::{AccountCode, Entry};
