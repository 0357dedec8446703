//! Statement engine.

use chrono::{DateTime, Utc};
use douke_shared::{CashFlowMethod, EngineOptions};
use rayon::prelude::*;
use tracing::{info, warn};

use super::types::{ReportBundle, ReportInput, ReportJob, ReportMetadata, Warning};
use crate::analysis::RatioCalculator;
use crate::classification::is_covered;
use crate::ledger::Entry;
use crate::reports::service::{ensure_in_range, missing_cash_movements};
use crate::reports::{
    ActivityRubric, BalanceSheet, CashBasisRubric, Configuration, ExpenseRubric, IncomeStatement,
    MinimalAsset, MinimalLiability, NormalAsset, NormalLiability, NotesContext, Regime,
    ReportService, RevenueRubric, StatementError,
};

/// Generates the complete report bundle from one entry snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatementEngine {
    options: EngineOptions,
}

impl StatementEngine {
    /// Creates an engine with the deployment's options.
    #[must_use]
    pub const fn new(options: EngineOptions) -> Self {
        Self { options }
    }

    /// Returns the engine options.
    #[must_use]
    pub const fn options(&self) -> EngineOptions {
        self.options
    }

    /// Generates every statement, stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns `StatementError::Configuration` if the configuration is
    /// incomplete or the direct method has no cash movements, and
    /// `StatementError::AmountsOutOfRange` if the amounts cannot be summed.
    pub fn generate(
        &self,
        input: &ReportInput,
        config: &Configuration,
    ) -> Result<ReportBundle, StatementError> {
        self.generate_at(input, config, Utc::now())
    }

    /// Generates every statement, stamped with `generated_at`.
    ///
    /// Two calls with the same input, configuration and timestamp yield equal
    /// bundles.
    ///
    /// # Errors
    ///
    /// Returns `StatementError::Configuration` if the configuration is
    /// incomplete or the direct method has no cash movements, and
    /// `StatementError::AmountsOutOfRange` if the amounts cannot be summed.
    /// Nothing is generated in either case.
    pub fn generate_at(
        &self,
        input: &ReportInput,
        config: &Configuration,
        generated_at: DateTime<Utc>,
    ) -> Result<ReportBundle, StatementError> {
        let validated = config.validate()?;
        let method = self.options.cash_flow_method;
        if method == CashFlowMethod::Direct && input.cash_movements.is_none() {
            return Err(missing_cash_movements());
        }
        ensure_in_range(&input.entries)?;
        let config = Configuration::from(&validated);
        let entries = input.entries.as_slice();

        info!(
            entreprise_id = %validated.entreprise_id,
            systeme = %validated.systeme,
            exercice = validated.exercice,
            entries = entries.len(),
            "Generating financial statements"
        );

        let mut avertissements = Vec::new();

        let mut bilan = ReportService::generate_balance_sheet(entries, &config)?;
        let compte_resultat = ReportService::generate_income_statement(entries, &config)?;
        reconcile(&mut bilan, &compte_resultat, &mut avertissements);

        let flux_tresorerie = ReportService::generate_cash_flow(
            entries,
            input.cash_movements.as_ref(),
            method,
            &config,
        )?;

        let notes_annexes = ReportService::generate_notes(
            &NotesContext {
                entries,
                disclosures: &input.disclosures,
                exercice: validated.exercice,
                income_statement: &compte_resultat,
                cash_flow: &flux_tresorerie,
            },
            &config,
        )?;

        let ratios_financiers = RatioCalculator::compute(&bilan, &compte_resultat, &config);

        let etat_recettes_depenses = (validated.systeme == Regime::Minimal)
            .then(|| ReportService::generate_receipts(entries))
            .transpose()?;

        if self.options.strict {
            avertissements.extend(unclassified_entries(validated.systeme, method, entries));
        }

        info!(
            entreprise_id = %validated.entreprise_id,
            equilibre = bilan.totals().equilibre,
            resultat_net = %compte_resultat.net_result(),
            ratios = ratios_financiers.is_available(),
            warnings = avertissements.len(),
            "Financial statements generated"
        );

        Ok(ReportBundle {
            metadata: ReportMetadata {
                configuration: validated,
                date_generation: generated_at,
                methode_flux: method,
            },
            bilan,
            compte_resultat,
            flux_tresorerie,
            notes_annexes,
            ratios_financiers,
            etat_recettes_depenses,
            avertissements,
        })
    }

    /// Runs independent jobs in parallel.
    ///
    /// Results come back in job order; one failing job does not affect the
    /// others.
    #[must_use]
    pub fn generate_many(&self, jobs: &[ReportJob]) -> Vec<Result<ReportBundle, StatementError>> {
        let generated_at = Utc::now();
        jobs.par_iter()
            .map(|job| self.generate_at(&job.input, &job.configuration, generated_at))
            .collect()
    }
}

/// Generates the report bundle with the default engine options.
///
/// # Errors
///
/// Returns `StatementError::Configuration` if the configuration is incomplete,
/// and `StatementError::AmountsOutOfRange` if the amounts cannot be summed.
pub fn generate_financial_statements(
    entries: &[Entry],
    config: &Configuration,
) -> Result<ReportBundle, StatementError> {
    StatementEngine::default().generate(&ReportInput::from(entries.to_vec()), config)
}

/// Carries the net result into equity, or flags a disagreement with the
/// result lines already present.
fn reconcile(
    bilan: &mut BalanceSheet,
    compte_resultat: &IncomeStatement,
    warnings: &mut Vec<Warning>,
) {
    let net_result = compte_resultat.net_result();
    if !bilan.has_result_lines() {
        bilan.carry_net_result(net_result);
        return;
    }

    let posted = bilan.totals().resultat_exercice;
    if posted != net_result {
        warn!(
            bilan = %posted,
            compte_resultat = %net_result,
            "Balance sheet result differs from income statement"
        );
        warnings.push(Warning::ResultMismatch {
            bilan: posted,
            compte_resultat: net_result,
        });
    }
}

/// Entries that land in no statement of the regime.
fn unclassified_entries(
    regime: Regime,
    method: CashFlowMethod,
    entries: &[Entry],
) -> Vec<Warning> {
    entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| !is_classified(regime, method, entry))
        .map(|(index, entry)| {
            warn!(
                index,
                compte = %entry.account,
                montant = %entry.amount,
                "Entry is not classified by any statement"
            );
            Warning::UnclassifiedEntry {
                index,
                compte: entry.account.clone(),
                montant: entry.amount,
            }
        })
        .collect()
}

fn is_classified(regime: Regime, method: CashFlowMethod, entry: &Entry) -> bool {
    let code = &entry.account;
    let on_balance_sheet = match regime {
        Regime::Normal => is_covered::<NormalAsset>(code) || is_covered::<NormalLiability>(code),
        Regime::Minimal => {
            is_covered::<MinimalAsset>(code)
                || is_covered::<MinimalLiability>(code)
                || is_covered::<CashBasisRubric>(code)
        }
    };

    on_balance_sheet
        || is_covered::<RevenueRubric>(code)
        || is_covered::<ExpenseRubric>(code)
        || (method == CashFlowMethod::ByClass && is_covered::<ActivityRubric>(code))
}
