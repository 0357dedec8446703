//! Cash-basis receipts and payments statement (état des recettes et dépenses).
//!
//! Treasury-only reporting for the MINIMAL regime. Classes are read on the
//! first digit.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::classification::{ClassSet, Rubric, Rubrics, aggregate};
use crate::ledger::Entry;

/// Receipts and payments buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum CashBasisRubric {
    /// Receipts (class 7).
    #[serde(rename = "recettes")]
    Receipts,
    /// Payments (class 6).
    #[serde(rename = "depenses")]
    Payments,
}

impl Rubric for CashBasisRubric {
    const ALL: &'static [Self] = &[Self::Receipts, Self::Payments];

    fn classes(self) -> ClassSet {
        match self {
            Self::Receipts => const { ClassSet::one_digit(&[7..=7]) },
            Self::Payments => const { ClassSet::one_digit(&[6..=6]) },
        }
    }

    fn title(self) -> &'static str {
        match self {
            Self::Receipts => "Recettes",
            Self::Payments => "Dépenses",
        }
    }
}

/// Receipts and payments statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptsStatement {
    /// Receipts and payments lines.
    #[serde(flatten)]
    pub rubriques: Rubrics<CashBasisRubric>,
    /// Total receipts.
    pub total_recettes: Decimal,
    /// Total payments.
    pub total_depenses: Decimal,
    /// Receipts minus payments.
    pub solde: Decimal,
    /// Balance is strictly positive.
    #[serde(rename = "excédent")]
    pub excedent: bool,
    /// Balance is strictly negative.
    #[serde(rename = "déficit")]
    pub deficit: bool,
}

impl ReceiptsStatement {
    /// Builds the statement from ledger entries.
    #[must_use]
    pub fn from_entries(entries: &[Entry]) -> Self {
        let rubriques: Rubrics<CashBasisRubric> = aggregate(entries);
        let total_recettes = rubriques.total_of(CashBasisRubric::Receipts);
        let total_depenses = rubriques.total_of(CashBasisRubric::Payments);
        let solde = total_recettes - total_depenses;

        Self {
            rubriques,
            total_recettes,
            total_depenses,
            solde,
            excedent: solde > Decimal::ZERO,
            deficit: solde < Decimal::ZERO,
        }
    }
}
