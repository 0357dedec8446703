//! Adapter for callers holding pre-aggregated balances.
//!
//! Some callers already know their balance-sheet totals by category instead of
//! holding the detailed entries. They are served by synthesizing one entry per
//! known total at an account code that routes to the matching rubric, so the
//! balance sheet is always produced by the single entry-based algorithm.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::entry::Entry;

/// Balance-sheet totals computed upstream, one field per category.
///
/// Missing fields default to zero; unknown fields are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreAggregatedBalances {
    /// Intangible fixed assets.
    pub immobilisations_incorporelles: Decimal,
    /// Tangible fixed assets.
    pub immobilisations_corporelles: Decimal,
    /// Financial fixed assets.
    pub immobilisations_financieres: Decimal,
    /// Inventories.
    pub stocks: Decimal,
    /// Trade receivables.
    pub creances_clients: Decimal,
    /// Other current receivables.
    pub autres_creances_circulantes: Decimal,
    /// Banks and cash on hand.
    pub banques_caisses: Decimal,
    /// Share capital.
    pub capital_social: Decimal,
    /// Reserves.
    pub reserves: Decimal,
    /// Net result of the period.
    pub resultat_net: Decimal,
    /// Depreciation and provisions.
    pub amortissements_provisions: Decimal,
    /// Borrowings.
    pub emprunts: Decimal,
    /// Trade payables.
    pub dettes_fournisseurs: Decimal,
    /// Other payables.
    pub autres_dettes: Decimal,
}

impl PreAggregatedBalances {
    /// Synthesizes the entries standing for these totals.
    ///
    /// Zero totals produce no entry. The synthesized accounts only make sense
    /// for the balance sheet: borrowings and other payables sit on accounts the
    /// income statement would read as expenses.
    #[must_use]
    pub fn to_entries(&self) -> Vec<Entry> {
        [
            ("201", self.immobilisations_incorporelles, "Immobilisations incorporelles"),
            ("211", self.immobilisations_corporelles, "Immobilisations corporelles"),
            ("221", self.immobilisations_financieres, "Immobilisations financières"),
            ("310", self.stocks, "Stocks"),
            ("411", self.creances_clients, "Créances clients"),
            ("421", self.autres_creances_circulantes, "Autres créances"),
            ("521", self.banques_caisses, "Banques et caisses"),
            ("101", self.capital_social, "Capital social"),
            ("106", self.reserves, "Réserves"),
            ("120", self.resultat_net, "Résultat net de l'exercice"),
            ("150", self.amortissements_provisions, "Amortissements et provisions"),
            ("600", self.emprunts, "Emprunts"),
            ("401", self.dettes_fournisseurs, "Dettes fournisseurs"),
            ("620", self.autres_dettes, "Autres dettes"),
        ]
        .into_iter()
        .filter(|(_, amount, _)| !amount.is_zero())
        .map(|(account, amount, label)| Entry::new(account, amount).with_label(label))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::{BalanceSheet, MinimalLiability, NormalLiability, Regime};
    use rust_decimal_macros::dec;

    #[test]
    fn test_zero_totals_are_skipped() {
        let balances = PreAggregatedBalances {
            stocks: dec!(1000),
            ..PreAggregatedBalances::default()
        };
        let entries = balances.to_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].account.as_str(), "310");
        assert_eq!(entries[0].label_or_empty(), "Stocks");
    }

    #[test]
    fn test_deserializes_partial_record() {
        let balances: PreAggregatedBalances =
            serde_json::from_str(r#"{"capital_social": 5000, "emprunts": "1200.50"}"#).unwrap();
        assert_eq!(balances.capital_social, dec!(5000));
        assert_eq!(balances.emprunts, dec!(1200.50));
        assert_eq!(balances.stocks, Decimal::ZERO);
    }

    #[test]
    fn test_misspelled_field_is_rejected() {
        let result = serde_json::from_str::<PreAggregatedBalances>(r#"{"capital": 5000}"#);
        assert!(result.is_err());
    }

    fn balanced() -> PreAggregatedBalances {
        PreAggregatedBalances {
            immobilisations_incorporelles: dec!(100),
            immobilisations_corporelles: dec!(400),
            immobilisations_financieres: dec!(50),
            stocks: dec!(150),
            creances_clients: dec!(200),
            autres_creances_circulantes: dec!(50),
            banques_caisses: dec!(50),
            capital_social: dec!(300),
            reserves: dec!(100),
            resultat_net: dec!(50),
            amortissements_provisions: dec!(100),
            emprunts: dec!(200),
            dettes_fournisseurs: dec!(150),
            autres_dettes: dec!(100),
        }
    }

    #[test]
    fn test_balanced_totals_give_normal_balance_sheet() {
        let BalanceSheet::Normal(sheet) =
            BalanceSheet::for_regime(Regime::Normal, &balanced().to_entries())
        else {
            unreachable!("NORMAL regime always yields a NORMAL balance sheet");
        };

        assert!(sheet.totals.equilibre);
        assert_eq!(sheet.totals.total_actif, dec!(1000));
        assert_eq!(sheet.totals.total_actif_immobilise, dec!(550));
        assert_eq!(sheet.totals.total_capitaux_propres, dec!(450));
        assert_eq!(sheet.totals.resultat_exercice, dec!(50));
        assert_eq!(sheet.passif.total_of(NormalLiability::FinancialDebt), dec!(200));
        assert_eq!(sheet.passif.total_of(NormalLiability::Provisions), dec!(100));
        assert_eq!(sheet.passif.total_of(NormalLiability::OtherPayables), dec!(100));
        assert_eq!(sheet.passif.total_of(NormalLiability::TradePayables), dec!(150));
    }

    #[test]
    fn test_balanced_totals_give_minimal_balance_sheet() {
        let BalanceSheet::Minimal(sheet) =
            BalanceSheet::for_regime(Regime::Minimal, &balanced().to_entries())
        else {
            unreachable!("MINIMAL regime always yields a MINIMAL balance sheet");
        };

        assert!(sheet.totals.equilibre);
        assert_eq!(sheet.totals.total_passif, dec!(1000));
        assert_eq!(sheet.passif.total_of(MinimalLiability::Debts), dec!(550));
        assert_eq!(sheet.passif.total_of(MinimalLiability::Equity), dec!(450));
    }
}
