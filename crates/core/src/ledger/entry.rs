//! Ledger entry domain types.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Account code from the chart of accounts (e.g. `"411"`, `"521000"`).
///
/// The leading digits identify the account class. Codes arrive either as JSON
/// integers or as numeric strings; both are kept in their textual form and never
/// validated here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct AccountCode(String);

impl AccountCode {
    /// Creates an account code from its textual form.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Returns the code as text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<String> for AccountCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

impl From<u32> for AccountCode {
    fn from(code: u32) -> Self {
        Self(code.to_string())
    }
}

impl<'de> Deserialize<'de> for AccountCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawCode {
            Signed(i64),
            Unsigned(u64),
            Float(f64),
            Text(String),
        }

        Ok(match RawCode::deserialize(deserializer)? {
            RawCode::Signed(n) => Self(n.to_string()),
            RawCode::Unsigned(n) => Self(n.to_string()),
            RawCode::Float(f) => {
                // JSON writers sometimes emit `411.0`; only integral values are codes.
                let code = Decimal::try_from(f)
                    .ok()
                    .filter(|value| value.fract().is_zero())
                    .ok_or_else(|| {
                        <D::Error as serde::de::Error>::custom(format!(
                            "code de compte non entier: {f}"
                        ))
                    })?;
                Self(code.trunc().normalize().to_string())
            }
            RawCode::Text(s) => Self(s),
        })
    }
}

/// A single accounting entry handed over by the ledger subsystem.
///
/// Amounts are already validated and signed upstream; the engine only reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Account the amount is booked on.
    #[serde(alias = "compte")]
    pub account: AccountCode,
    /// Booked amount.
    #[serde(alias = "montant")]
    pub amount: Decimal,
    /// Optional line label.
    #[serde(default, alias = "libelle", alias = "libellé", skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Entry {
    /// Creates an entry without a label.
    #[must_use]
    pub fn new(account: impl Into<AccountCode>, amount: Decimal) -> Self {
        Self {
            account: account.into(),
            amount,
            label: None,
        }
    }

    /// Attaches a label to the entry.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Returns the label, or an empty string when none was provided.
    #[must_use]
    pub fn label_or_empty(&self) -> &str {
        self.label.as_deref().unwrap_or_default()
    }
}
