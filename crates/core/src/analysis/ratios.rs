//! Financial ratios.
//!
//! Every denominator that would be zero is replaced by one. This keeps the
//! ratios finite; it is an approximation, not a correctness guarantee.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use tracing::error;

use super::error::RatioError;
use crate::reports::{BalanceSheet, Configuration, IncomeStatement};

/// Message of the unavailable-ratios sentinel.
pub const UNAVAILABLE: &str =
    "Impossible de calculer les ratios (Données manquantes ou division par zéro).";

const COMMENT: &str = "Les ratios sont calculés à partir des rubriques du Bilan/CR générés.";

/// Profitability, structure and liquidity ratios, rounded to 2 decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialRatios {
    /// Net result over net sales, in percent.
    pub rentabilite_nette: Decimal,
    /// Net result over equity, in percent.
    pub rentabilite_fonds_propres: Decimal,
    /// Equity over total liabilities and equity, in percent.
    pub autonomie_financiere: Decimal,
    /// Equity over fixed assets.
    pub couverture_immobilisations: Decimal,
    /// Current assets over debts.
    pub liquidite_generale: Decimal,
}

/// Computed ratios, or the sentinel callers must check for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RatioOutcome {
    /// Ratios were computed.
    Calcules(FinancialRatios),
    /// Ratios are unavailable; statements are still valid.
    Indisponibles {
        /// Why the ratios are missing.
        erreur: String,
    },
}

/// Ratio section of the report bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatioReport {
    /// Regime value echoed from the configuration.
    pub systeme: String,
    /// Ratios or sentinel.
    pub ratios: RatioOutcome,
    /// Reading note, present when ratios were computed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commentaire: Option<String>,
}

impl RatioReport {
    /// Returns the ratios, or `None` for the sentinel.
    #[must_use]
    pub const fn ratios(&self) -> Option<&FinancialRatios> {
        match &self.ratios {
            RatioOutcome::Calcules(ratios) => Some(ratios),
            RatioOutcome::Indisponibles { .. } => None,
        }
    }

    /// Returns true if the ratios were computed.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self.ratios, RatioOutcome::Calcules(_))
    }
}

/// Derives ratios from a balance sheet and an income statement.
pub struct RatioCalculator;

impl RatioCalculator {
    /// Computes the ratios.
    ///
    /// Never fails: any computation error is logged and returned as the
    /// [`RatioOutcome::Indisponibles`] sentinel.
    #[must_use]
    pub fn compute(
        balance_sheet: &BalanceSheet,
        income_statement: &IncomeStatement,
        config: &Configuration,
    ) -> RatioReport {
        let systeme = config.systeme.clone().unwrap_or_default();

        match Self::try_compute(balance_sheet, income_statement, config) {
            Ok(ratios) => RatioReport {
                systeme,
                ratios: RatioOutcome::Calcules(ratios),
                commentaire: Some(COMMENT.to_string()),
            },
            Err(err) => {
                error!(error = %err, systeme = %systeme, "Ratio computation failed");
                RatioReport {
                    systeme,
                    ratios: RatioOutcome::Indisponibles {
                        erreur: UNAVAILABLE.to_string(),
                    },
                    commentaire: None,
                }
            }
        }
    }

    /// Computes the ratios, reporting the first error.
    ///
    /// # Errors
    ///
    /// Returns `RatioError` if the regimes disagree or an operation overflows.
    pub fn try_compute(
        balance_sheet: &BalanceSheet,
        income_statement: &IncomeStatement,
        config: &Configuration,
    ) -> Result<FinancialRatios, RatioError> {
        let regime = config
            .regime_for("Ratios")
            .map_err(|err| RatioError::UnsupportedRegime(err.to_string()))?;
        if balance_sheet.regime() != regime || income_statement.regime() != regime {
            return Err(RatioError::RegimeMismatch {
                bilan: balance_sheet.regime(),
                compte_resultat: income_statement.regime(),
            });
        }

        let totals = balance_sheet.totals();
        let net_result = income_statement.net_result();
        let equity = totals.total_capitaux_propres;

        Ok(FinancialRatios {
            rentabilite_nette: percent(
                "rentabiliteNette",
                net_result,
                income_statement.net_revenue(),
            )?,
            rentabilite_fonds_propres: percent("rentabiliteFondsPropres", net_result, equity)?,
            autonomie_financiere: percent("autonomieFinanciere", equity, totals.total_passif)?,
            couverture_immobilisations: quotient(
                "couvertureImmobilisations",
                equity,
                totals.total_actif_immobilise,
            )?,
            liquidite_generale: quotient(
                "liquiditeGenerale",
                totals.total_actif_circulant,
                totals.total_dettes,
            )?,
        })
    }
}

/// Substitutes one for a zero denominator.
fn guard(denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        Decimal::ONE
    } else {
        denominator
    }
}

fn round(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn quotient(
    ratio: &'static str,
    numerator: Decimal,
    denominator: Decimal,
) -> Result<Decimal, RatioError> {
    numerator
        .checked_div(guard(denominator))
        .map(round)
        .ok_or(RatioError::Overflow { ratio })
}

fn percent(
    ratio: &'static str,
    numerator: Decimal,
    denominator: Decimal,
) -> Result<Decimal, RatioError> {
    numerator
        .checked_div(guard(denominator))
        .and_then(|q| q.checked_mul(Decimal::ONE_HUNDRED))
        .map(round)
        .ok_or(RatioError::Overflow { ratio })
}
