//! Statement generation service.

use douke_shared::CashFlowMethod;
use tracing::debug;

use super::balance_sheet::BalanceSheet;
use super::cash_flow::{CashFlowStatement, CashMovements};
use super::configuration::Configuration;
use super::error::StatementError;
use super::income_statement::IncomeStatement;
use super::notes::{NotesAnnexes, NotesContext};
use super::receipts::ReceiptsStatement;
use crate::classification::volume;
use crate::ledger::Entry;

/// Service for generating the statutory statements.
///
/// Every generator branches on the configured regime and rejects any other
/// value with `StatementError::UnsupportedRegime`.
pub struct ReportService;

impl ReportService {
    /// Generates the balance sheet.
    ///
    /// # Errors
    ///
    /// Returns `StatementError::UnsupportedRegime` if `systeme` is neither
    /// `NORMAL` nor `MINIMAL`, or `StatementError::AmountsOutOfRange` if the
    /// amounts cannot be summed.
    pub fn generate_balance_sheet(
        entries: &[Entry],
        config: &Configuration,
    ) -> Result<BalanceSheet, StatementError> {
        let regime = config.regime_for("Bilan")?;
        ensure_in_range(entries)?;
        let sheet = BalanceSheet::for_regime(regime, entries);
        debug!(
            systeme = %regime,
            total_actif = %sheet.totals().total_actif,
            total_passif = %sheet.totals().total_passif,
            equilibre = sheet.totals().equilibre,
            "Balance sheet generated"
        );
        Ok(sheet)
    }

    /// Generates the income statement.
    ///
    /// # Errors
    ///
    /// Returns `StatementError::UnsupportedRegime` if `systeme` is neither
    /// `NORMAL` nor `MINIMAL`, or `StatementError::AmountsOutOfRange` if the
    /// amounts cannot be summed.
    pub fn generate_income_statement(
        entries: &[Entry],
        config: &Configuration,
    ) -> Result<IncomeStatement, StatementError> {
        let regime = config.regime_for("Compte de résultat")?;
        ensure_in_range(entries)?;
        let statement = IncomeStatement::for_regime(regime, entries);
        debug!(
            systeme = %regime,
            resultat_net = %statement.net_result(),
            "Income statement generated"
        );
        Ok(statement)
    }

    /// Generates the cash-flow statement with the deployment's method.
    ///
    /// # Errors
    ///
    /// Returns `StatementError::UnsupportedRegime` for an unknown regime, or
    /// `StatementError::Configuration` when the direct method is selected
    /// without cash movements, or `StatementError::AmountsOutOfRange` if the
    /// amounts it reads cannot be summed.
    pub fn generate_cash_flow(
        entries: &[Entry],
        movements: Option<&CashMovements>,
        method: CashFlowMethod,
        config: &Configuration,
    ) -> Result<CashFlowStatement, StatementError> {
        let regime = config.regime_for("Flux de trésorerie")?;
        let statement = match method {
            CashFlowMethod::ByClass => {
                ensure_in_range(entries)?;
                CashFlowStatement::by_class(regime, entries)
            }
            CashFlowMethod::Direct => {
                let movements = movements.ok_or_else(missing_cash_movements)?;
                let amounts = movements.amounts();
                if volume(amounts).is_none() {
                    return Err(StatementError::AmountsOutOfRange {
                        count: amounts.len(),
                    });
                }
                CashFlowStatement::direct(regime, movements)
            }
        };
        debug!(
            systeme = %regime,
            methode = ?method,
            variation = %statement.variation_tresorerie,
            "Cash-flow statement generated"
        );
        Ok(statement)
    }

    /// Generates the notes.
    ///
    /// # Errors
    ///
    /// Returns `StatementError::UnsupportedRegime` if `systeme` is neither
    /// `NORMAL` nor `MINIMAL`, or `StatementError::AmountsOutOfRange` if the
    /// amounts cannot be summed.
    pub fn generate_notes(
        context: &NotesContext<'_>,
        config: &Configuration,
    ) -> Result<NotesAnnexes, StatementError> {
        let regime = config.regime_for("Notes annexes")?;
        ensure_in_range(context.entries)?;
        let notes = NotesAnnexes::for_regime(regime, context);
        debug!(systeme = %regime, notes = notes.nombre_total, "Notes generated");
        Ok(notes)
    }

    /// Generates the cash-basis receipts and payments statement.
    ///
    /// # Errors
    ///
    /// Returns `StatementError::AmountsOutOfRange` if the amounts cannot be
    /// summed.
    pub fn generate_receipts(entries: &[Entry]) -> Result<ReceiptsStatement, StatementError> {
        ensure_in_range(entries)?;
        let statement = ReceiptsStatement::from_entries(entries);
        debug!(solde = %statement.solde, "Receipts statement generated");
        Ok(statement)
    }
}

/// Rejects snapshots whose totals would not fit in a `Decimal`.
///
/// # Errors
///
/// Returns `StatementError::AmountsOutOfRange` when the sum of absolute
/// amounts exceeds [`crate::classification::MAX_VOLUME`].
pub fn ensure_in_range(entries: &[Entry]) -> Result<(), StatementError> {
    match volume(entries.iter().map(|entry| entry.amount)) {
        Some(_) => Ok(()),
        None => Err(StatementError::AmountsOutOfRange {
            count: entries.len(),
        }),
    }
}

/// Error raised when the direct method has no cash movements to read.
#[must_use]
pub fn missing_cash_movements() -> StatementError {
    StatementError::Configuration(
        "la méthode DIRECTE exige les mouvements de trésorerie (cashMovements)".to_string(),
    )
}
