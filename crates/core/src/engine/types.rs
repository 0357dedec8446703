//! Engine input and output types.

use chrono::{DateTime, Utc};
use douke_shared::CashFlowMethod;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::analysis::RatioReport;
use crate::ledger::{AccountCode, Entry};
use crate::reports::{
    BalanceSheet, CashFlowStatement, CashMovements, Configuration, Disclosures, IncomeStatement,
    NotesAnnexes, ReceiptsStatement, ValidatedConfiguration,
};

/// Everything the engine reads for one report.
///
/// Unknown fields are rejected so that a misspelled key cannot silently
/// yield an empty report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct ReportInput {
    /// Ledger entries of the fiscal year.
    #[serde(alias = "ecritures", alias = "écritures")]
    pub entries: Vec<Entry>,
    /// Classified cash movements, required by the direct cash-flow method.
    pub cash_movements: Option<CashMovements>,
    /// Qualitative statements for the notes.
    pub disclosures: Disclosures,
}

impl From<Vec<Entry>> for ReportInput {
    fn from(entries: Vec<Entry>) -> Self {
        Self {
            entries,
            ..Self::default()
        }
    }
}

/// One independent report request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportJob {
    /// Snapshot to report on.
    pub input: ReportInput,
    /// Report configuration.
    pub configuration: Configuration,
}

/// Non-blocking finding attached to a report bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Warning {
    /// No statement classifies this entry; its amount appears nowhere.
    #[serde(rename_all = "camelCase")]
    UnclassifiedEntry {
        /// Position of the entry in the input.
        index: usize,
        /// Account code as received.
        compte: AccountCode,
        /// Amount that was left out.
        montant: Decimal,
    },
    /// The balance sheet's result lines disagree with the income statement.
    #[serde(rename_all = "camelCase")]
    ResultMismatch {
        /// Sum of the class-12 lines in equity.
        bilan: Decimal,
        /// Net result of the income statement.
        compte_resultat: Decimal,
    },
}

/// Metadata echoed in every bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    /// Configuration the statements were generated with.
    #[serde(flatten)]
    pub configuration: ValidatedConfiguration,
    /// Generation timestamp (RFC 3339).
    pub date_generation: DateTime<Utc>,
    /// Cash-flow method of the deployment.
    pub methode_flux: CashFlowMethod,
}

/// All statements of one fiscal year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportBundle {
    /// Configuration echo and timestamp.
    pub metadata: ReportMetadata,
    /// Balance sheet.
    pub bilan: BalanceSheet,
    /// Income statement.
    pub compte_resultat: IncomeStatement,
    /// Cash-flow statement.
    pub flux_tresorerie: CashFlowStatement,
    /// Notes.
    pub notes_annexes: NotesAnnexes,
    /// Ratios, or the unavailable sentinel.
    pub ratios_financiers: RatioReport,
    /// Receipts and payments statement (MINIMAL only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etat_recettes_depenses: Option<ReceiptsStatement>,
    /// Warnings raised while generating.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub avertissements: Vec<Warning>,
}

impl ReportBundle {
    /// Returns true if no warning was raised.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.avertissements.is_empty()
    }
}
