//! Per-report configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::StatementError;

/// Presentation regime of the statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Regime {
    /// Detailed regime with narrow rubrics and intermediate balances.
    #[serde(rename = "NORMAL")]
    Normal,
    /// Simplified regime with a few broad rubrics.
    #[serde(rename = "MINIMAL")]
    Minimal,
}

impl Regime {
    /// Wire value of the regime.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Minimal => "MINIMAL",
        }
    }

    /// Parses a wire value. Matching is exact.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "NORMAL" => Some(Self::Normal),
            "MINIMAL" => Some(Self::Minimal),
            _ => None,
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration supplied with every report request.
///
/// Every field is optional here so that an incomplete request can be reported
/// precisely; [`Configuration::validate`] turns it into a
/// [`ValidatedConfiguration`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    /// Regime value, `NORMAL` or `MINIMAL`.
    pub systeme: Option<String>,
    /// Fiscal year.
    pub exercice: Option<i32>,
    /// Company identifier.
    pub entreprise_id: Option<String>,
    /// Role of the requesting user.
    pub utilisateur_role: Option<String>,
}

impl Configuration {
    /// Creates a fully populated configuration.
    #[must_use]
    pub fn new(
        systeme: impl Into<String>,
        exercice: i32,
        entreprise_id: impl Into<String>,
        utilisateur_role: impl Into<String>,
    ) -> Self {
        Self {
            systeme: Some(systeme.into()),
            exercice: Some(exercice),
            entreprise_id: Some(entreprise_id.into()),
            utilisateur_role: Some(utilisateur_role.into()),
        }
    }

    /// Checks that every field is present and the regime is known.
    ///
    /// Empty strings and a zero fiscal year count as missing.
    ///
    /// # Errors
    ///
    /// Returns `StatementError::Configuration` listing the missing fields, or
    /// naming the regime value when it is neither `NORMAL` nor `MINIMAL`.
    pub fn validate(&self) -> Result<ValidatedConfiguration, StatementError> {
        let systeme = present(self.systeme.as_deref());
        let exercice = self.exercice.filter(|year| *year != 0);
        let entreprise_id = present(self.entreprise_id.as_deref());
        let utilisateur_role = present(self.utilisateur_role.as_deref());

        let missing: Vec<&str> = [
            ("systeme", systeme.is_none()),
            ("exercice", exercice.is_none()),
            ("entrepriseId", entreprise_id.is_none()),
            ("utilisateurRole", utilisateur_role.is_none()),
        ]
        .into_iter()
        .filter_map(|(field, is_missing)| is_missing.then_some(field))
        .collect();

        let (Some(systeme), Some(exercice), Some(entreprise_id), Some(utilisateur_role)) =
            (systeme, exercice, entreprise_id, utilisateur_role)
        else {
            return Err(StatementError::Configuration(format!(
                "champs manquants: {}",
                missing.join(", ")
            )));
        };

        let regime = Regime::parse(systeme).ok_or_else(|| {
            StatementError::Configuration(format!(
                "système '{systeme}' inconnu (attendu NORMAL ou MINIMAL)"
            ))
        })?;

        Ok(ValidatedConfiguration {
            systeme: regime,
            exercice,
            entreprise_id: entreprise_id.to_string(),
            utilisateur_role: utilisateur_role.to_string(),
        })
    }

    /// Resolves the regime a statement generator must branch on.
    ///
    /// # Errors
    ///
    /// Returns `StatementError::UnsupportedRegime` naming the statement, the
    /// offending value and the fiscal year.
    pub fn regime_for(&self, statement: &'static str) -> Result<Regime, StatementError> {
        let value = self.systeme.as_deref().unwrap_or_default();
        Regime::parse(value).ok_or_else(|| StatementError::UnsupportedRegime {
            statement,
            systeme: value.to_string(),
            exercice: self
                .exercice
                .map_or_else(|| "inconnu".to_string(), |year| year.to_string()),
        })
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// A complete configuration with a known regime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedConfiguration {
    /// Regime.
    pub systeme: Regime,
    /// Fiscal year.
    pub exercice: i32,
    /// Company identifier.
    pub entreprise_id: String,
    /// Role of the requesting user.
    pub utilisateur_role: String,
}

impl From<&ValidatedConfiguration> for Configuration {
    fn from(config: &ValidatedConfiguration) -> Self {
        Self::new(
            config.systeme.as_str(),
            config.exercice,
            config.entreprise_id.clone(),
            config.utilisateur_role.clone(),
        )
    }
}
