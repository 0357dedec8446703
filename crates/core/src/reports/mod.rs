//! Statutory statement generation.
//!
//! This module provides pure business logic for generating the statements of
//! both regimes from one entry snapshot:
//! - Balance Sheet (bilan)
//! - Income Statement (compte de résultat)
//! - Cash-Flow Statement (tableau des flux de trésorerie)
//! - Notes (notes annexes)
//! - Cash-basis Receipts and Payments (état des recettes et dépenses)

pub mod balance_sheet;
pub mod cash_flow;
pub mod configuration;
pub mod error;
pub mod income_statement;
pub mod notes;
pub mod receipts;
pub mod service;


pub use balance_sheet::{
    BalanceGroup, BalanceRubric, BalanceSheet, BalanceSheetStatement, BalanceTotals,
    LiabilityRubric, MinimalAsset, MinimalBalanceSheet, MinimalLiability, NormalAsset,
    NormalBalanceSheet, NormalLiability,
};
pub use cash_flow::{ActivityRubric, CashFlowDetail, CashFlowStatement, CashMovements};
pub use configuration::{Configuration, Regime, ValidatedConfiguration};
pub use error::StatementError;
pub use income_statement::{
    ExpenseRubric, FunctionBalances, FunctionRubric, IncomeAggregate, IncomeStatement,
    MinimalIncomeStatement, NatureBalances, NatureRubric, NormalIncomeStatement, RevenueRubric,
};
pub use notes::{Disclosures, NoteBlock, NoteRow, NoteSection, NotesAnnexes, NotesContext};
pub use receipts::{CashBasisRubric, ReceiptsStatement};
pub use service::ReportService;
