//! Ratio computation error types.

use thiserror::Error;

use crate::reports::Regime;

/// Errors that can occur while deriving ratios.
///
/// These never escape the calculator: they are logged and turned into the
/// unavailable-ratios sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RatioError {
    /// A division or multiplication overflowed.
    #[error("Dépassement de capacité lors du calcul du ratio {ratio}")]
    Overflow {
        /// Ratio being computed.
        ratio: &'static str,
    },

    /// The statements were generated under different regimes.
    #[error("Régimes incohérents: bilan {bilan}, compte de résultat {compte_resultat}")]
    RegimeMismatch {
        /// Regime of the balance sheet.
        bilan: Regime,
        /// Regime of the income statement.
        compte_resultat: Regime,
    },

    /// The configuration names a regime the calculator does not know.
    #[error("Système non pris en charge: {0}")]
    UnsupportedRegime(String),
}
