//! Cash-flow statement (tableau des flux de trésorerie).
//!
//! Two methods exist and a deployment picks one:
//! - `PAR_CLASSES` filters ledger entries by account class
//! - `DIRECTE` reads classified cash movements supplied with the input

use douke_shared::CashFlowMethod;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::configuration::Regime;
use crate::classification::{ClassSet, Rubric, Rubrics, aggregate};
use crate::ledger::Entry;

/// Activity buckets of the class-based method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ActivityRubric {
    /// Operating flows (60 to 65, 70).
    #[serde(rename = "operationnels")]
    Operating,
    /// Investing flows (20 to 27).
    #[serde(rename = "investissement")]
    Investing,
    /// Financing flows (10 to 14, 16, 17).
    #[serde(rename = "financement")]
    Financing,
}

impl Rubric for ActivityRubric {
    const ALL: &'static [Self] = &[Self::Operating, Self::Investing, Self::Financing];

    fn classes(self) -> ClassSet {
        match self {
            Self::Operating => const { ClassSet::two_digit(&[60..=65, 70..=70]) },
            Self::Investing => const { ClassSet::two_digit(&[20..=27]) },
            Self::Financing => const { ClassSet::two_digit(&[10..=14, 16..=17]) },
        }
    }

    fn title(self) -> &'static str {
        match self {
            Self::Operating => "Flux des activités opérationnelles",
            Self::Investing => "Flux des activités d'investissement",
            Self::Financing => "Flux des activités de financement",
        }
    }
}

/// Classified cash movements of the period, input of the direct method.
///
/// Missing fields default to zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CashMovements {
    /// Cash collected from customers.
    pub encaissements_clients: Decimal,
    /// Cash paid to suppliers.
    pub decaissements_fournisseurs: Decimal,
    /// Cash paid to personnel.
    pub decaissements_personnel: Decimal,
    /// Net tax and miscellaneous cash flows.
    pub net_taxes_divers: Decimal,
    /// Cash paid for fixed-asset acquisitions.
    pub acquisitions_immobilisations: Decimal,
    /// Cash received from fixed-asset disposals.
    pub cessions_immobilisations: Decimal,
    /// Cash from share issuance.
    pub emission_actions: Decimal,
    /// Cash from new borrowings.
    pub nouveaux_emprunts: Decimal,
    /// Loan repayments.
    pub remboursement_emprunts: Decimal,
    /// Dividends paid.
    pub dividendes_verses: Decimal,
    /// Cash at the opening of the period.
    pub tresorerie_ouverture: Decimal,
}

impl CashMovements {
    /// Every movement, opening cash included.
    #[must_use]
    pub const fn amounts(&self) -> [Decimal; 11] {
        [
            self.encaissements_clients,
            self.decaissements_fournisseurs,
            self.decaissements_personnel,
            self.net_taxes_divers,
            self.acquisitions_immobilisations,
            self.cessions_immobilisations,
            self.emission_actions,
            self.nouveaux_emprunts,
            self.remboursement_emprunts,
            self.dividendes_verses,
            self.tresorerie_ouverture,
        ]
    }
}

/// Operating line items of the direct method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatingFlows {
    /// Cash collected from customers.
    pub encaissements_clients: Decimal,
    /// Cash paid to suppliers.
    pub decaissements_fournisseurs: Decimal,
    /// Cash paid to personnel.
    pub decaissements_personnel: Decimal,
    /// Net tax and miscellaneous flows.
    pub autres_encaissements_decaissements: Decimal,
    /// Net operating flow.
    pub flux_net_operationnel: Decimal,
}

/// Investing line items of the direct method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestingFlows {
    /// Cash paid for acquisitions.
    pub decaissements_acquisition_immo: Decimal,
    /// Cash received from disposals.
    pub encaissements_cession_immo: Decimal,
    /// Net investing flow.
    pub flux_net_investissement: Decimal,
}

/// Financing line items of the direct method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancingFlows {
    /// Cash from share issuance.
    pub encaissements_augmentation_capital: Decimal,
    /// Cash from new borrowings.
    pub encaissements_emprunts: Decimal,
    /// Loan repayments.
    pub decaissements_remboursement_emprunts: Decimal,
    /// Dividends paid.
    pub decaissements_dividendes: Decimal,
    /// Net financing flow.
    pub flux_net_financement: Decimal,
}

/// Line-item detail, exposed in the NORMAL regime only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CashFlowDetail {
    /// Entries per activity bucket.
    ByClass {
        /// Activity buckets.
        flux: Rubrics<ActivityRubric>,
    },
    /// Cash movements per activity.
    #[serde(rename_all = "camelCase")]
    Direct {
        /// Operating line items.
        flux_operationnel: OperatingFlows,
        /// Investing line items.
        flux_investissement: InvestingFlows,
        /// Financing line items.
        flux_financement: FinancingFlows,
    },
}

/// Cash-flow statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowStatement {
    /// Regime.
    pub systeme: Regime,
    /// Method used.
    pub methode: CashFlowMethod,
    /// Line-item detail (NORMAL only).
    #[serde(flatten)]
    pub detail: Option<CashFlowDetail>,
    /// Net operating flow.
    pub flux_net_operationnel: Decimal,
    /// Net investing flow.
    pub flux_net_investissement: Decimal,
    /// Net financing flow.
    pub flux_net_financement: Decimal,
    /// Sum of the three net flows.
    pub variation_tresorerie: Decimal,
    /// Opening cash (direct method, NORMAL only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tresorerie_ouverture: Option<Decimal>,
    /// Closing cash (direct method only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tresorerie_cloture: Option<Decimal>,
}

impl CashFlowStatement {
    /// Builds the statement by filtering entries by account class.
    ///
    /// The investing net is the opposite of the class 20 to 27 total, so the
    /// variation is operating plus financing minus investing.
    #[must_use]
    pub fn by_class(regime: Regime, entries: &[Entry]) -> Self {
        let flux: Rubrics<ActivityRubric> = aggregate(entries);
        let flux_net_operationnel = flux.total_of(ActivityRubric::Operating);
        let flux_net_investissement = -flux.total_of(ActivityRubric::Investing);
        let flux_net_financement = flux.total_of(ActivityRubric::Financing);

        Self {
            systeme: regime,
            methode: CashFlowMethod::ByClass,
            detail: (regime == Regime::Normal).then_some(CashFlowDetail::ByClass { flux }),
            flux_net_operationnel,
            flux_net_investissement,
            flux_net_financement,
            variation_tresorerie: flux_net_operationnel
                + flux_net_investissement
                + flux_net_financement,
            tresorerie_ouverture: None,
            tresorerie_cloture: None,
        }
    }

    /// Builds the statement from classified cash movements.
    #[must_use]
    pub fn direct(regime: Regime, movements: &CashMovements) -> Self {
        let operating = OperatingFlows {
            encaissements_clients: movements.encaissements_clients,
            decaissements_fournisseurs: movements.decaissements_fournisseurs,
            decaissements_personnel: movements.decaissements_personnel,
            autres_encaissements_decaissements: movements.net_taxes_divers,
            flux_net_operationnel: movements.encaissements_clients
                - movements.decaissements_fournisseurs
                - movements.decaissements_personnel
                + movements.net_taxes_divers,
        };
        let investing = InvestingFlows {
            decaissements_acquisition_immo: movements.acquisitions_immobilisations,
            encaissements_cession_immo: movements.cessions_immobilisations,
            flux_net_investissement: movements.cessions_immobilisations
                - movements.acquisitions_immobilisations,
        };
        let financing = FinancingFlows {
            encaissements_augmentation_capital: movements.emission_actions,
            encaissements_emprunts: movements.nouveaux_emprunts,
            decaissements_remboursement_emprunts: movements.remboursement_emprunts,
            decaissements_dividendes: movements.dividendes_verses,
            flux_net_financement: movements.emission_actions + movements.nouveaux_emprunts
                - movements.remboursement_emprunts
                - movements.dividendes_verses,
        };

        let flux_net_operationnel = operating.flux_net_operationnel;
        let flux_net_investissement = investing.flux_net_investissement;
        let flux_net_financement = financing.flux_net_financement;
        let variation_tresorerie =
            flux_net_operationnel + flux_net_investissement + flux_net_financement;
        let is_normal = regime == Regime::Normal;

        Self {
            systeme: regime,
            methode: CashFlowMethod::Direct,
            detail: is_normal.then_some(CashFlowDetail::Direct {
                flux_operationnel: operating,
                flux_investissement: investing,
                flux_financement: financing,
            }),
            flux_net_operationnel,
            flux_net_investissement,
            flux_net_financement,
            variation_tresorerie,
            tresorerie_ouverture: is_normal.then_some(movements.tresorerie_ouverture),
            tresorerie_cloture: Some(movements.tresorerie_ouverture + variation_tresorerie),
        }
    }
}
