//! Income statement (compte de résultat).
//!
//! The NORMAL regime carries three views of the same figures: the aggregate
//! by class, the by-nature list of intermediate balances and the by-function
//! presentation. Residual "other" buckets make the three net results equal by
//! construction.

use rust_decimal::Decimal;
use serde::Serialize;

use super::configuration::Regime;
use crate::classification::{ClassSet, Rubric, Rubrics, aggregate};
use crate::ledger::Entry;

/// Revenue rubrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum RevenueRubric {
    /// Operating revenue (70).
    #[serde(rename = "exploitation")]
    Operating,
    /// Financial revenue (76).
    #[serde(rename = "financiers")]
    Financial,
    /// Extraordinary revenue (77).
    #[serde(rename = "exceptionnels")]
    Extraordinary,
}

impl Rubric for RevenueRubric {
    const ALL: &'static [Self] = &[Self::Operating, Self::Financial, Self::Extraordinary];

    fn classes(self) -> ClassSet {
        match self {
            Self::Operating => const { ClassSet::two_digit(&[70..=70]) },
            Self::Financial => const { ClassSet::two_digit(&[76..=76]) },
            Self::Extraordinary => const { ClassSet::two_digit(&[77..=77]) },
        }
    }

    fn title(self) -> &'static str {
        match self {
            Self::Operating => "Produits d'exploitation",
            Self::Financial => "Produits financiers",
            Self::Extraordinary => "Produits HAO",
        }
    }
}

/// Expense rubrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ExpenseRubric {
    /// Operating expenses (60 to 65).
    #[serde(rename = "exploitation")]
    Operating,
    /// Financial expenses (66).
    #[serde(rename = "financiers")]
    Financial,
    /// Extraordinary expenses (67).
    #[serde(rename = "exceptionnels")]
    Extraordinary,
    /// Income tax (68).
    #[serde(rename = "impôt")]
    IncomeTax,
}

impl Rubric for ExpenseRubric {
    const ALL: &'static [Self] = &[
        Self::Operating,
        Self::Financial,
        Self::Extraordinary,
        Self::IncomeTax,
    ];

    fn classes(self) -> ClassSet {
        match self {
            Self::Operating => const { ClassSet::two_digit(&[60..=65]) },
            Self::Financial => const { ClassSet::two_digit(&[66..=66]) },
            Self::Extraordinary => const { ClassSet::two_digit(&[67..=67]) },
            Self::IncomeTax => const { ClassSet::two_digit(&[68..=68]) },
        }
    }

    fn title(self) -> &'static str {
        match self {
            Self::Operating => "Charges d'exploitation",
            Self::Financial => "Charges financières",
            Self::Extraordinary => "Charges HAO",
            Self::IncomeTax => "Impôt sur le résultat",
        }
    }
}

/// Sub-rubrics of the by-nature presentation, read on three digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NatureRubric {
    /// Sales of goods (701).
    VentesMarchandises,
    /// Products and services sold (702 to 706).
    ProductionVendue,
    /// Purchases of goods (601).
    AchatsMarchandises,
    /// External consumption (600, 602 to 629).
    ConsommationsExternes,
    /// Taxes and duties (630 to 639).
    ImpotsEtTaxes,
    /// Personnel costs (640 to 649).
    ChargesPersonnel,
}

impl Rubric for NatureRubric {
    const ALL: &'static [Self] = &[
        Self::VentesMarchandises,
        Self::ProductionVendue,
        Self::AchatsMarchandises,
        Self::ConsommationsExternes,
        Self::ImpotsEtTaxes,
        Self::ChargesPersonnel,
    ];

    fn classes(self) -> ClassSet {
        match self {
            Self::VentesMarchandises => const { ClassSet::three_digit(&[701..=701]) },
            Self::ProductionVendue => const { ClassSet::three_digit(&[702..=706]) },
            Self::AchatsMarchandises => const { ClassSet::three_digit(&[601..=601]) },
            Self::ConsommationsExternes => {
                const { ClassSet::three_digit(&[600..=600, 602..=629]) }
            }
            Self::ImpotsEtTaxes => const { ClassSet::three_digit(&[630..=639]) },
            Self::ChargesPersonnel => const { ClassSet::three_digit(&[640..=649]) },
        }
    }

    fn title(self) -> &'static str {
        match self {
            Self::VentesMarchandises => "Ventes de marchandises",
            Self::ProductionVendue => "Production vendue",
            Self::AchatsMarchandises => "Achats de marchandises",
            Self::ConsommationsExternes => "Consommations externes",
            Self::ImpotsEtTaxes => "Impôts et taxes",
            Self::ChargesPersonnel => "Charges de personnel",
        }
    }
}

/// Functional expense buckets of the by-function presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FunctionRubric {
    /// Cost of goods sold (601).
    CoutMarchandisesVendues,
    /// Cost of production of the goods sold (602 to 609).
    CoutProduction,
    /// Selling expenses (620 to 629).
    ChargesCommerciales,
    /// Administrative expenses (610 to 619, 630 to 649).
    ChargesAdministratives,
}

impl Rubric for FunctionRubric {
    const ALL: &'static [Self] = &[
        Self::CoutMarchandisesVendues,
        Self::CoutProduction,
        Self::ChargesCommerciales,
        Self::ChargesAdministratives,
    ];

    fn classes(self) -> ClassSet {
        match self {
            Self::CoutMarchandisesVendues => const { ClassSet::three_digit(&[601..=601]) },
            Self::CoutProduction => const { ClassSet::three_digit(&[602..=609]) },
            Self::ChargesCommerciales => const { ClassSet::three_digit(&[620..=629]) },
            Self::ChargesAdministratives => {
                const { ClassSet::three_digit(&[610..=619, 630..=649]) }
            }
        }
    }

    fn title(self) -> &'static str {
        match self {
            Self::CoutMarchandisesVendues => "Coût d'achat des marchandises vendues",
            Self::CoutProduction => "Coût de production",
            Self::ChargesCommerciales => "Charges commerciales",
            Self::ChargesAdministratives => "Charges administratives",
        }
    }
}

/// Revenue and expense rubrics with the net result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeAggregate {
    /// Revenue rubrics.
    pub produits: Rubrics<RevenueRubric>,
    /// Expense rubrics.
    pub charges: Rubrics<ExpenseRubric>,
    /// Total revenue.
    pub total_produits: Decimal,
    /// Total expenses.
    pub total_charges: Decimal,
    /// Total revenue minus total expenses.
    pub resultat_net: Decimal,
    /// Net result is strictly positive.
    #[serde(rename = "bénéfice")]
    pub benefice: bool,
    /// Net result is strictly negative.
    pub perte: bool,
}

impl IncomeAggregate {
    /// Aggregates revenue and expense entries.
    #[must_use]
    pub fn from_entries(entries: &[Entry]) -> Self {
        let produits: Rubrics<RevenueRubric> = aggregate(entries);
        let charges: Rubrics<ExpenseRubric> = aggregate(entries);
        let total_produits = produits.total();
        let total_charges = charges.total();
        let resultat_net = total_produits - total_charges;

        Self {
            produits,
            charges,
            total_produits,
            total_charges,
            resultat_net,
            benefice: resultat_net > Decimal::ZERO,
            perte: resultat_net < Decimal::ZERO,
        }
    }

    /// Net sales, the class-70 total.
    #[must_use]
    pub fn chiffre_affaires_net(&self) -> Decimal {
        self.produits.total_of(RevenueRubric::Operating)
    }

    /// Financial revenue minus financial expenses.
    #[must_use]
    pub fn resultat_financier(&self) -> Decimal {
        self.produits.total_of(RevenueRubric::Financial)
            - self.charges.total_of(ExpenseRubric::Financial)
    }

    /// Extraordinary revenue minus extraordinary expenses.
    #[must_use]
    pub fn resultat_hao(&self) -> Decimal {
        self.produits.total_of(RevenueRubric::Extraordinary)
            - self.charges.total_of(ExpenseRubric::Extraordinary)
    }

    /// Income tax.
    #[must_use]
    pub fn impot_resultat(&self) -> Decimal {
        self.charges.total_of(ExpenseRubric::IncomeTax)
    }
}

/// By-nature presentation with every intermediate balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NatureBalances {
    /// Sub-rubrics.
    pub rubriques: Rubrics<NatureRubric>,
    /// Sales of goods.
    pub ventes_marchandises: Decimal,
    /// Purchases of goods.
    pub achats_marchandises: Decimal,
    /// Sales minus purchases of goods.
    pub marge_commerciale: Decimal,
    /// Products and services sold.
    pub production_vendue: Decimal,
    /// External consumption.
    pub consommations_externes: Decimal,
    /// Margin plus production minus external consumption.
    pub valeur_ajoutee: Decimal,
    /// Operating subsidies. Always zero for entry input: class 74 is not
    /// operating revenue.
    pub subventions_exploitation: Decimal,
    /// Personnel costs.
    pub charges_personnel: Decimal,
    /// Taxes and duties.
    pub impots_et_taxes: Decimal,
    /// Gross operating surplus (EBE).
    pub excedent_brut_exploitation: Decimal,
    /// Operating revenue outside the explicit sub-rubrics.
    pub autres_produits: Decimal,
    /// Operating expenses outside the explicit sub-rubrics.
    pub autres_charges: Decimal,
    /// Operating result.
    pub resultat_exploitation: Decimal,
    /// Financial result.
    pub resultat_financier: Decimal,
    /// Extraordinary (HAO) result.
    pub resultat_hao: Decimal,
    /// Income tax.
    pub impot_resultat: Decimal,
    /// Net result.
    pub resultat_net: Decimal,
}

impl NatureBalances {
    fn compute(entries: &[Entry], aggregate_view: &IncomeAggregate) -> Self {
        let rubriques: Rubrics<NatureRubric> = aggregate(entries);
        let ventes_marchandises = rubriques.total_of(NatureRubric::VentesMarchandises);
        let production_vendue = rubriques.total_of(NatureRubric::ProductionVendue);
        let achats_marchandises = rubriques.total_of(NatureRubric::AchatsMarchandises);
        let consommations_externes = rubriques.total_of(NatureRubric::ConsommationsExternes);
        let impots_et_taxes = rubriques.total_of(NatureRubric::ImpotsEtTaxes);
        let charges_personnel = rubriques.total_of(NatureRubric::ChargesPersonnel);
        let subventions_exploitation = Decimal::ZERO;

        let autres_produits =
            aggregate_view.chiffre_affaires_net() - ventes_marchandises - production_vendue;
        let autres_charges = aggregate_view.charges.total_of(ExpenseRubric::Operating)
            - achats_marchandises
            - consommations_externes
            - impots_et_taxes
            - charges_personnel;

        let marge_commerciale = ventes_marchandises - achats_marchandises;
        let valeur_ajoutee = marge_commerciale + production_vendue - consommations_externes;
        let excedent_brut_exploitation =
            valeur_ajoutee + subventions_exploitation - charges_personnel - impots_et_taxes;
        let resultat_exploitation = excedent_brut_exploitation + autres_produits - autres_charges;
        let resultat_financier = aggregate_view.resultat_financier();
        let resultat_hao = aggregate_view.resultat_hao();
        let impot_resultat = aggregate_view.impot_resultat();

        Self {
            rubriques,
            ventes_marchandises,
            achats_marchandises,
            marge_commerciale,
            production_vendue,
            consommations_externes,
            valeur_ajoutee,
            subventions_exploitation,
            charges_personnel,
            impots_et_taxes,
            excedent_brut_exploitation,
            autres_produits,
            autres_charges,
            resultat_exploitation,
            resultat_financier,
            resultat_hao,
            impot_resultat,
            resultat_net: resultat_exploitation + resultat_financier + resultat_hao
                - impot_resultat,
        }
    }
}

/// By-function presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionBalances {
    /// Functional expense buckets.
    pub rubriques: Rubrics<FunctionRubric>,
    /// Net sales.
    pub chiffre_affaires_net: Decimal,
    /// Cost of sales: cost of goods sold plus cost of production.
    pub cout_des_ventes: Decimal,
    /// Net sales minus cost of sales.
    pub marge_brute: Decimal,
    /// Selling expenses.
    pub charges_commerciales: Decimal,
    /// Administrative expenses.
    pub charges_administratives: Decimal,
    /// Operating expenses outside the functional buckets.
    pub autres_charges_fonctionnelles: Decimal,
    /// Operating result.
    pub resultat_exploitation: Decimal,
    /// Financial result.
    pub resultat_financier: Decimal,
    /// Extraordinary (HAO) result.
    pub resultat_hao: Decimal,
    /// Income tax.
    pub impot_resultat: Decimal,
    /// Net result.
    pub resultat_net: Decimal,
}

impl FunctionBalances {
    fn compute(entries: &[Entry], aggregate_view: &IncomeAggregate) -> Self {
        let rubriques: Rubrics<FunctionRubric> = aggregate(entries);
        let chiffre_affaires_net = aggregate_view.chiffre_affaires_net();
        let cout_des_ventes = rubriques.total_of(FunctionRubric::CoutMarchandisesVendues)
            + rubriques.total_of(FunctionRubric::CoutProduction);
        let charges_commerciales = rubriques.total_of(FunctionRubric::ChargesCommerciales);
        let charges_administratives = rubriques.total_of(FunctionRubric::ChargesAdministratives);
        let autres_charges_fonctionnelles =
            aggregate_view.charges.total_of(ExpenseRubric::Operating) - rubriques.total();

        let marge_brute = chiffre_affaires_net - cout_des_ventes;
        let resultat_exploitation = marge_brute
            - (charges_commerciales + charges_administratives + autres_charges_fonctionnelles);
        let resultat_financier = aggregate_view.resultat_financier();
        let resultat_hao = aggregate_view.resultat_hao();
        let impot_resultat = aggregate_view.impot_resultat();

        Self {
            rubriques,
            chiffre_affaires_net,
            cout_des_ventes,
            marge_brute,
            charges_commerciales,
            charges_administratives,
            autres_charges_fonctionnelles,
            resultat_exploitation,
            resultat_financier,
            resultat_hao,
            impot_resultat,
            resultat_net: resultat_exploitation + resultat_financier + resultat_hao
                - impot_resultat,
        }
    }
}

/// NORMAL income statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalIncomeStatement {
    /// Aggregate by class.
    #[serde(flatten)]
    pub aggregate: IncomeAggregate,
    /// By-nature list of intermediate balances.
    pub presentation_liste: NatureBalances,
    /// By-function presentation.
    pub presentation_fonction: FunctionBalances,
}

/// MINIMAL income statement: totals only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MinimalIncomeStatement {
    /// Total revenue.
    pub produits_totaux: Decimal,
    /// Total expenses.
    pub charges_totales: Decimal,
    /// Net result.
    pub resultat_net: Decimal,
    /// Net sales.
    pub chiffre_affaires_net: Decimal,
    /// Net result is strictly positive.
    #[serde(rename = "bénéfice")]
    pub benefice: bool,
    /// Net result is strictly negative.
    pub perte: bool,
}

/// Income statement in the configured regime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "systeme")]
pub enum IncomeStatement {
    /// Detailed income statement.
    #[serde(rename = "NORMAL")]
    Normal(NormalIncomeStatement),
    /// Simplified income statement.
    #[serde(rename = "MINIMAL")]
    Minimal(MinimalIncomeStatement),
}

impl IncomeStatement {
    /// Builds the income statement of a regime from ledger entries.
    #[must_use]
    pub fn for_regime(regime: Regime, entries: &[Entry]) -> Self {
        let aggregate_view = IncomeAggregate::from_entries(entries);
        match regime {
            Regime::Normal => Self::Normal(NormalIncomeStatement {
                presentation_liste: NatureBalances::compute(entries, &aggregate_view),
                presentation_fonction: FunctionBalances::compute(entries, &aggregate_view),
                aggregate: aggregate_view,
            }),
            Regime::Minimal => Self::Minimal(MinimalIncomeStatement {
                produits_totaux: aggregate_view.total_produits,
                charges_totales: aggregate_view.total_charges,
                resultat_net: aggregate_view.resultat_net,
                chiffre_affaires_net: aggregate_view.chiffre_affaires_net(),
                benefice: aggregate_view.benefice,
                perte: aggregate_view.perte,
            }),
        }
    }

    /// Regime of this statement.
    #[must_use]
    pub const fn regime(&self) -> Regime {
        match self {
            Self::Normal(_) => Regime::Normal,
            Self::Minimal(_) => Regime::Minimal,
        }
    }

    /// Net result of the period.
    #[must_use]
    pub const fn net_result(&self) -> Decimal {
        match self {
            Self::Normal(statement) => statement.aggregate.resultat_net,
            Self::Minimal(statement) => statement.resultat_net,
        }
    }

    /// Net sales, the class-70 total.
    #[must_use]
    pub fn net_revenue(&self) -> Decimal {
        match self {
            Self::Normal(statement) => statement.aggregate.chiffre_affaires_net(),
            Self::Minimal(statement) => statement.chiffre_affaires_net,
        }
    }

    /// Returns (benefice, perte).
    #[must_use]
    pub const fn flags(&self) -> (bool, bool) {
        match self {
            Self::Normal(statement) => (statement.aggregate.benefice, statement.aggregate.perte),
            Self::Minimal(statement) => (statement.benefice, statement.perte),
        }
    }
}
