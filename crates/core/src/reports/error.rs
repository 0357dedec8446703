//! Statement generation error types.

use thiserror::Error;

/// Errors that can occur during statement generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatementError {
    /// The report configuration is incomplete or invalid.
    #[error("Configuration invalide: {0}")]
    Configuration(String),

    /// A generator was handed a regime it does not branch on.
    #[error("{statement}: le système '{systeme}' n'est pas pris en charge pour l'exercice {exercice}")]
    UnsupportedRegime {
        /// Statement that rejected the regime.
        statement: &'static str,
        /// Offending regime value.
        systeme: String,
        /// Configured fiscal year, or `inconnu`.
        exercice: String,
    },

    /// The amounts are too large for the statement totals to be represented.
    #[error("montants hors limites: la somme des {count} montants dépasse la capacité de calcul")]
    AmountsOutOfRange {
        /// Number of amounts in the rejected input.
        count: usize,
    },
}

impl StatementError {
    /// Returns true for errors that must block report generation.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

impl From<StatementError> for douke_shared::AppError {
    fn from(err: StatementError) -> Self {
        match err {
            StatementError::Configuration(message) => Self::Configuration(message),
            unsupported @ StatementError::UnsupportedRegime { .. } => {
                Self::UnsupportedRegime(unsupported.to_string())
            }
            out_of_range @ StatementError::AmountsOutOfRange { .. } => {
                Self::Input(out_of_range.to_string())
            }
        }
    }
}
