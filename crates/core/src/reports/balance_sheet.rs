//! Balance sheet (bilan).
//!
//! Both regimes read the same class universe; MINIMAL only collapses the
//! NORMAL rubrics, so a ledger that balances in one regime balances in the
//! other.

use rust_decimal::Decimal;
use serde::Serialize;

use super::configuration::Regime;
use crate::classification::{ClassSet, Rubric, Rubrics, aggregate, class_prefix};
use crate::ledger::Entry;

/// Label of the synthesized period-result entry.
pub const NET_RESULT_LABEL: &str = "Résultat net de l'exercice";

/// Account the synthesized period-result entry is posted on.
pub const NET_RESULT_ACCOUNT: &str = "120";

/// Balance-sheet group a rubric contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceGroup {
    /// Fixed assets (actif immobilisé).
    FixedAssets,
    /// Current assets including cash (actif circulant).
    CurrentAssets,
    /// Equity (capitaux propres).
    Equity,
    /// Provisions and debts.
    Debts,
}

/// A rubric of either side of the balance sheet.
pub trait BalanceRubric: Rubric {
    /// Group used for the subtotals.
    fn group(self) -> BalanceGroup;
}

/// A rubric of the liabilities-and-equity side.
pub trait LiabilityRubric: BalanceRubric {
    /// Rubric receiving the period result.
    const EQUITY: Self;
}

/// NORMAL-regime asset rubrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum NormalAsset {
    /// Intangible fixed assets (20).
    #[serde(rename = "immobilisationsIncorporelles")]
    IntangibleAssets,
    /// Tangible fixed assets (21).
    #[serde(rename = "immobilisationsCorporelles")]
    TangibleAssets,
    /// Financial fixed assets (22).
    #[serde(rename = "immobilisationsFinancières")]
    FinancialAssets,
    /// Inventories (30 to 35).
    #[serde(rename = "stocks")]
    Inventories,
    /// Trade receivables (41).
    #[serde(rename = "créancesClients")]
    TradeReceivables,
    /// Other receivables (42 to 45).
    #[serde(rename = "autresCréances")]
    OtherReceivables,
    /// Cash and equivalents (50 to 52).
    #[serde(rename = "trésorerieActif")]
    Cash,
}

impl Rubric for NormalAsset {
    const ALL: &'static [Self] = &[
        Self::IntangibleAssets,
        Self::TangibleAssets,
        Self::FinancialAssets,
        Self::Inventories,
        Self::TradeReceivables,
        Self::OtherReceivables,
        Self::Cash,
    ];

    fn classes(self) -> ClassSet {
        match self {
            Self::IntangibleAssets => const { ClassSet::two_digit(&[20..=20]) },
            Self::TangibleAssets => const { ClassSet::two_digit(&[21..=21]) },
            Self::FinancialAssets => const { ClassSet::two_digit(&[22..=22]) },
            Self::Inventories => const { ClassSet::two_digit(&[30..=35]) },
            Self::TradeReceivables => const { ClassSet::two_digit(&[41..=41]) },
            Self::OtherReceivables => const { ClassSet::two_digit(&[42..=45]) },
            Self::Cash => const { ClassSet::two_digit(&[50..=52]) },
        }
    }

    fn title(self) -> &'static str {
        match self {
            Self::IntangibleAssets => "Immobilisations incorporelles",
            Self::TangibleAssets => "Immobilisations corporelles",
            Self::FinancialAssets => "Immobilisations financières",
            Self::Inventories => "Stocks et encours",
            Self::TradeReceivables => "Créances clients",
            Self::OtherReceivables => "Autres créances",
            Self::Cash => "Trésorerie-Actif",
        }
    }
}

impl BalanceRubric for NormalAsset {
    fn group(self) -> BalanceGroup {
        match self {
            Self::IntangibleAssets | Self::TangibleAssets | Self::FinancialAssets => {
                BalanceGroup::FixedAssets
            }
            _ => BalanceGroup::CurrentAssets,
        }
    }
}

/// NORMAL-regime liability and equity rubrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum NormalLiability {
    /// Equity (10 to 14).
    #[serde(rename = "capitauxPropres")]
    Equity,
    /// Provisions (15 to 17).
    #[serde(rename = "provisions")]
    Provisions,
    /// Borrowings and financial debt (60, 61).
    #[serde(rename = "empruntsEtDettesFinancières")]
    FinancialDebt,
    /// Trade payables (40).
    #[serde(rename = "dettesFournisseurs")]
    TradePayables,
    /// Other payables (62 to 65).
    #[serde(rename = "autresDettes")]
    OtherPayables,
    /// Short-term treasury liabilities (53, 54).
    #[serde(rename = "trésoreriePassif")]
    TreasuryLiabilities,
}

impl Rubric for NormalLiability {
    const ALL: &'static [Self] = &[
        Self::Equity,
        Self::Provisions,
        Self::FinancialDebt,
        Self::TradePayables,
        Self::OtherPayables,
        Self::TreasuryLiabilities,
    ];

    fn classes(self) -> ClassSet {
        match self {
            Self::Equity => const { ClassSet::two_digit(&[10..=14]) },
            Self::Provisions => const { ClassSet::two_digit(&[15..=17]) },
            Self::FinancialDebt => const { ClassSet::two_digit(&[60..=61]) },
            Self::TradePayables => const { ClassSet::two_digit(&[40..=40]) },
            Self::OtherPayables => const { ClassSet::two_digit(&[62..=65]) },
            Self::TreasuryLiabilities => const { ClassSet::two_digit(&[53..=54]) },
        }
    }

    fn title(self) -> &'static str {
        match self {
            Self::Equity => "Capitaux propres et ressources assimilées",
            Self::Provisions => "Provisions",
            Self::FinancialDebt => "Emprunts et dettes financières",
            Self::TradePayables => "Dettes fournisseurs",
            Self::OtherPayables => "Autres dettes",
            Self::TreasuryLiabilities => "Trésorerie-Passif",
        }
    }
}

impl BalanceRubric for NormalLiability {
    fn group(self) -> BalanceGroup {
        match self {
            Self::Equity => BalanceGroup::Equity,
            _ => BalanceGroup::Debts,
        }
    }
}

impl LiabilityRubric for NormalLiability {
    const EQUITY: Self = Self::Equity;
}

/// MINIMAL-regime asset rubrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum MinimalAsset {
    /// Fixed assets (20 to 22).
    #[serde(rename = "immobilisations")]
    FixedAssets,
    /// Inventories and receivables (30 to 35, 41 to 45).
    #[serde(rename = "stocksEtCréances")]
    InventoriesAndReceivables,
    /// Treasury (50 to 52).
    #[serde(rename = "trésorerie")]
    Treasury,
}

impl Rubric for MinimalAsset {
    const ALL: &'static [Self] = &[
        Self::FixedAssets,
        Self::InventoriesAndReceivables,
        Self::Treasury,
    ];

    fn classes(self) -> ClassSet {
        match self {
            Self::FixedAssets => const { ClassSet::two_digit(&[20..=22]) },
            Self::InventoriesAndReceivables => const { ClassSet::two_digit(&[30..=35, 41..=45]) },
            Self::Treasury => const { ClassSet::two_digit(&[50..=52]) },
        }
    }

    fn title(self) -> &'static str {
        match self {
            Self::FixedAssets => "Immobilisations",
            Self::InventoriesAndReceivables => "Stocks et créances",
            Self::Treasury => "Trésorerie",
        }
    }
}

impl BalanceRubric for MinimalAsset {
    fn group(self) -> BalanceGroup {
        match self {
            Self::FixedAssets => BalanceGroup::FixedAssets,
            _ => BalanceGroup::CurrentAssets,
        }
    }
}

/// MINIMAL-regime liability and equity rubrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum MinimalLiability {
    /// Provisions and debts (15 to 17, 40, 53, 54, 60 to 65).
    #[serde(rename = "dettes")]
    Debts,
    /// Equity (10 to 14).
    #[serde(rename = "capitauxPropres")]
    Equity,
}

impl Rubric for MinimalLiability {
    const ALL: &'static [Self] = &[Self::Debts, Self::Equity];

    fn classes(self) -> ClassSet {
        match self {
            Self::Debts => const { ClassSet::two_digit(&[15..=17, 40..=40, 53..=54, 60..=65]) },
            Self::Equity => const { ClassSet::two_digit(&[10..=14]) },
        }
    }

    fn title(self) -> &'static str {
        match self {
            Self::Debts => "Dettes",
            Self::Equity => "Capitaux propres",
        }
    }
}

impl BalanceRubric for MinimalLiability {
    fn group(self) -> BalanceGroup {
        match self {
            Self::Debts => BalanceGroup::Debts,
            Self::Equity => BalanceGroup::Equity,
        }
    }
}

impl LiabilityRubric for MinimalLiability {
    const EQUITY: Self = Self::Equity;
}

/// Totals and subtotals of a balance sheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceTotals {
    /// Fixed assets subtotal.
    pub total_actif_immobilise: Decimal,
    /// Current assets subtotal, cash included.
    pub total_actif_circulant: Decimal,
    /// Equity subtotal.
    pub total_capitaux_propres: Decimal,
    /// Provisions and debts subtotal.
    pub total_dettes: Decimal,
    /// Sum of the class-12 (period result) lines inside equity.
    pub resultat_exercice: Decimal,
    /// Total assets.
    pub total_actif: Decimal,
    /// Total liabilities and equity.
    pub total_passif: Decimal,
    /// Whether total assets equal total liabilities and equity, exactly.
    pub equilibre: bool,
}

/// Balance sheet of one regime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceSheetStatement<A: BalanceRubric, L: LiabilityRubric> {
    /// Asset rubrics.
    pub actif: Rubrics<A>,
    /// Liability and equity rubrics.
    pub passif: Rubrics<L>,
    /// Totals.
    #[serde(flatten)]
    pub totals: BalanceTotals,
}

/// NORMAL balance sheet.
pub type NormalBalanceSheet = BalanceSheetStatement<NormalAsset, NormalLiability>;

/// MINIMAL balance sheet.
pub type MinimalBalanceSheet = BalanceSheetStatement<MinimalAsset, MinimalLiability>;

impl<A: BalanceRubric, L: LiabilityRubric> BalanceSheetStatement<A, L> {
    /// Builds the balance sheet from ledger entries.
    #[must_use]
    pub fn from_entries(entries: &[Entry]) -> Self {
        let mut statement = Self {
            actif: aggregate(entries),
            passif: aggregate(entries),
            totals: BalanceTotals::default(),
        };
        statement.refresh_totals();
        statement
    }

    /// Returns true if equity holds at least one class-12 line.
    #[must_use]
    pub fn has_result_lines(&self) -> bool {
        self.passif
            .get(L::EQUITY)
            .lines
            .iter()
            .any(|entry| is_result_account(entry))
    }

    /// Posts an entry into the equity rubric and recomputes the totals.
    pub fn post_to_equity(&mut self, entry: Entry) {
        self.passif.post(L::EQUITY, entry);
        self.refresh_totals();
    }

    fn refresh_totals(&mut self) {
        let group_total_actif = |group: BalanceGroup| self.actif.total_where(|r| r.group() == group);
        let group_total_passif = |group: BalanceGroup| self.passif.total_where(|r| r.group() == group);

        let total_actif = self.actif.total();
        let total_passif = self.passif.total();

        self.totals = BalanceTotals {
            total_actif_immobilise: group_total_actif(BalanceGroup::FixedAssets),
            total_actif_circulant: group_total_actif(BalanceGroup::CurrentAssets),
            total_capitaux_propres: group_total_passif(BalanceGroup::Equity),
            total_dettes: group_total_passif(BalanceGroup::Debts),
            resultat_exercice: self
                .passif
                .get(L::EQUITY)
                .lines
                .iter()
                .filter(|entry| is_result_account(entry))
                .map(|entry| entry.amount)
                .sum(),
            total_actif,
            total_passif,
            equilibre: total_actif == total_passif,
        };
    }
}

fn is_result_account(entry: &Entry) -> bool {
    class_prefix(&entry.account, 2) == Some(12)
}

/// Balance sheet in the configured regime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "systeme")]
pub enum BalanceSheet {
    /// Detailed balance sheet.
    #[serde(rename = "NORMAL")]
    Normal(NormalBalanceSheet),
    /// Simplified balance sheet.
    #[serde(rename = "MINIMAL")]
    Minimal(MinimalBalanceSheet),
}

impl BalanceSheet {
    /// Builds the balance sheet of a regime from ledger entries.
    #[must_use]
    pub fn for_regime(regime: Regime, entries: &[Entry]) -> Self {
        match regime {
            Regime::Normal => Self::Normal(BalanceSheetStatement::from_entries(entries)),
            Regime::Minimal => Self::Minimal(BalanceSheetStatement::from_entries(entries)),
        }
    }

    /// Regime of this balance sheet.
    #[must_use]
    pub const fn regime(&self) -> Regime {
        match self {
            Self::Normal(_) => Regime::Normal,
            Self::Minimal(_) => Regime::Minimal,
        }
    }

    /// Totals and subtotals.
    #[must_use]
    pub const fn totals(&self) -> &BalanceTotals {
        match self {
            Self::Normal(statement) => &statement.totals,
            Self::Minimal(statement) => &statement.totals,
        }
    }

    /// Returns true if the snapshot already carries a period-result line.
    #[must_use]
    pub fn has_result_lines(&self) -> bool {
        match self {
            Self::Normal(statement) => statement.has_result_lines(),
            Self::Minimal(statement) => statement.has_result_lines(),
        }
    }

    /// Posts the income-statement net result into equity.
    ///
    /// A zero result posts nothing.
    pub fn carry_net_result(&mut self, net_result: Decimal) {
        if net_result.is_zero() {
            return;
        }
        let entry = Entry::new(NET_RESULT_ACCOUNT, net_result).with_label(NET_RESULT_LABEL);
        match self {
            Self::Normal(statement) => statement.post_to_equity(entry),
            Self::Minimal(statement) => statement.post_to_equity(entry),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn balanced_ledger() -> Vec<Entry> {
        vec![
            Entry::new("101", dec!(8000000)),
            Entry::new("106", dec!(5000000)),
            Entry::new("120", dec!(4000000)),
            Entry::new("162", dec!(5000000)),
            Entry::new("401", dec!(3000000)),
            Entry::new("201", dec!(500000)),
            Entry::new("213", dec!(15000000)),
            Entry::new("221", dec!(500000)),
            Entry::new("331", dec!(3000000)),
            Entry::new("411", dec!(4000000)),
            Entry::new("421", dec!(500000)),
            Entry::new("521", dec!(1500000)),
        ]
    }

    #[test]
    fn test_normal_rubrics_and_subtotals() {
        let sheet = NormalBalanceSheet::from_entries(&balanced_ledger());

        assert_eq!(sheet.actif.total_of(NormalAsset::TangibleAssets), dec!(15000000));
        assert_eq!(sheet.actif.total_of(NormalAsset::OtherReceivables), dec!(500000));
        assert_eq!(sheet.passif.total_of(NormalLiability::Provisions), dec!(5000000));
        assert_eq!(sheet.totals.total_actif_immobilise, dec!(16000000));
        assert_eq!(sheet.totals.total_actif_circulant, dec!(9000000));
        assert_eq!(sheet.totals.total_capitaux_propres, dec!(17000000));
        assert_eq!(sheet.totals.total_dettes, dec!(8000000));
        assert_eq!(sheet.totals.resultat_exercice, dec!(4000000));
        assert_eq!(sheet.totals.total_actif, dec!(25000000));
        assert_eq!(sheet.totals.total_passif, dec!(25000000));
        assert!(sheet.totals.equilibre);
    }

    #[test]
    fn test_minimal_collapses_same_universe() {
        let normal = BalanceSheet::for_regime(Regime::Normal, &balanced_ledger());
        let minimal = BalanceSheet::for_regime(Regime::Minimal, &balanced_ledger());

        assert_eq!(normal.totals().total_actif, minimal.totals().total_actif);
        assert_eq!(normal.totals().total_passif, minimal.totals().total_passif);
        assert_eq!(
            normal.totals().total_capitaux_propres,
            minimal.totals().total_capitaux_propres
        );
        assert!(minimal.totals().equilibre);

        let BalanceSheet::Minimal(sheet) = minimal else {
            panic!("expected a MINIMAL balance sheet");
        };
        assert_eq!(
            sheet.actif.total_of(MinimalAsset::InventoriesAndReceivables),
            dec!(7500000)
        );
        assert_eq!(sheet.passif.total_of(MinimalLiability::Debts), dec!(8000000));
    }

    #[test]
    fn test_equilibre_is_exact() {
        let sheet = NormalBalanceSheet::from_entries(&[
            Entry::new("521", dec!(100.00)),
            Entry::new("101", dec!(100.01)),
        ]);
        assert!(!sheet.totals.equilibre);
    }

    #[test]
    fn test_carry_net_result_into_equity() {
        let mut sheet = BalanceSheet::for_regime(
            Regime::Normal,
            &[Entry::new("521", dec!(1000)), Entry::new("101", dec!(600))],
        );
        assert!(!sheet.has_result_lines());
        assert!(!sheet.totals().equilibre);

        sheet.carry_net_result(dec!(400));

        assert!(sheet.has_result_lines());
        assert_eq!(sheet.totals().resultat_exercice, dec!(400));
        assert_eq!(sheet.totals().total_capitaux_propres, dec!(1000));
        assert!(sheet.totals().equilibre);
    }

    #[test]
    fn test_zero_net_result_posts_nothing() {
        let mut sheet = BalanceSheet::for_regime(Regime::Minimal, &[]);
        sheet.carry_net_result(Decimal::ZERO);
        assert!(!sheet.has_result_lines());
    }

    #[test]
    fn test_serialized_shape() {
        let sheet = BalanceSheet::for_regime(Regime::Normal, &balanced_ledger());
        let json = serde_json::to_value(&sheet).unwrap();
        assert_eq!(json["systeme"], "NORMAL");
        assert_eq!(json["actif"]["créancesClients"]["total"], "4000000");
        assert_eq!(
            json["passif"]["empruntsEtDettesFinancières"]["intitule"],
            "Emprunts et dettes financières"
        );
        assert_eq!(json["passif"]["capitauxPropres"]["lignes"][2]["account"], "120");
        assert_eq!(json["totalActif"], "25000000");
        assert_eq!(json["equilibre"], true);
    }
}
