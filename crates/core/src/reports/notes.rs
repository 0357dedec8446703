//! Notes to the financial statements (notes annexes).
//!
//! Notes are an ordered sequence of numbered sections. Table-backed notes list
//! the entries of a class range; qualitative notes come from the
//! user-supplied [`Disclosures`]. A missing disclosure renders a placeholder
//! and marks its note as not compliant.

use std::fmt::Write as _;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::cash_flow::CashFlowStatement;
use super::configuration::Regime;
use super::income_statement::IncomeStatement;
use crate::classification::ClassSet;
use crate::ledger::{AccountCode, Entry};

/// Text rendered in place of a missing qualitative statement.
pub const PLACEHOLDER: &str = "_À compléter par l'utilisateur._";

/// Text rendered in place of an empty table.
pub const NO_DATA: &str = "_Aucune donnée disponible._";

const CAPITAL: ClassSet = ClassSet::two_digit(&[10..=10]);
const SUBSIDIES: ClassSet = ClassSet::two_digit(&[13..=13]);
const PROVISIONS: ClassSet = ClassSet::two_digit(&[15..=17]);
const FIXED_ASSETS: ClassSet = ClassSet::two_digit(&[20..=22]);
const DEPRECIATION: ClassSet = ClassSet::two_digit(&[28..=29]);
const INVENTORIES: ClassSet = ClassSet::two_digit(&[30..=35]);
const RECEIVABLES: ClassSet = ClassSet::two_digit(&[41..=45]);
const DEBTS: ClassSet = ClassSet::two_digit(&[60..=65]);
const AGGREGATED_DEBTS: ClassSet = ClassSet::two_digit(&[15..=17, 40..=40, 53..=54, 60..=65]);

/// Qualitative statements supplied by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Disclosures {
    /// Accounting principles and methods.
    pub methodes: Option<String>,
    /// Off-balance-sheet commitments.
    pub engagements: Option<String>,
    /// Post-closing events.
    pub evenements: Option<String>,
    /// Related-party transactions.
    pub parties_liees: Option<String>,
}

/// One row of a note table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteRow {
    /// Account code.
    pub compte: AccountCode,
    /// Entry label, empty when none.
    pub libelle: String,
    /// Amount.
    pub montant: Decimal,
}

/// A content block of a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum NoteBlock {
    /// Free text.
    Texte {
        /// Text.
        texte: String,
    },
    /// Entries of a class range.
    Tableau {
        /// Table caption.
        intitule: String,
        /// Rows in input order.
        lignes: Vec<NoteRow>,
        /// Sum of the rows.
        total: Decimal,
    },
    /// A table whose class range holds no entry.
    AucuneDonnee {
        /// Table caption.
        intitule: String,
        /// Placeholder text.
        message: String,
    },
}

impl NoteBlock {
    fn text(texte: impl Into<String>) -> Self {
        Self::Texte {
            texte: texte.into(),
        }
    }

    fn table(intitule: &str, entries: &[Entry], classes: &ClassSet) -> Self {
        let lignes: Vec<NoteRow> = entries
            .iter()
            .filter(|entry| classes.contains(&entry.account))
            .map(|entry| NoteRow {
                compte: entry.account.clone(),
                libelle: entry.label_or_empty().to_string(),
                montant: entry.amount,
            })
            .collect();

        if lignes.is_empty() {
            return Self::AucuneDonnee {
                intitule: intitule.to_string(),
                message: NO_DATA.to_string(),
            };
        }

        Self::Tableau {
            intitule: intitule.to_string(),
            total: lignes.iter().map(|row| row.montant).sum(),
            lignes,
        }
    }
}

/// A numbered note section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteSection {
    /// Regulatory note number.
    pub numero: u8,
    /// Title.
    pub titre: String,
    /// Content blocks.
    pub contenu: Vec<NoteBlock>,
    /// False when a required qualitative statement is missing.
    pub conforme: bool,
}

impl NoteSection {
    fn new(numero: u8, titre: &str, contenu: Vec<NoteBlock>) -> Self {
        Self {
            numero,
            titre: titre.to_string(),
            contenu,
            conforme: true,
        }
    }

    fn disclosure(numero: u8, titre: &str, statement: Option<&str>) -> Self {
        let statement = statement.map(str::trim).filter(|s| !s.is_empty());
        Self {
            conforme: statement.is_some(),
            ..Self::new(numero, titre, vec![NoteBlock::text(statement.unwrap_or(PLACEHOLDER))])
        }
    }
}

/// Inputs the notes are built from.
#[derive(Debug, Clone, Copy)]
pub struct NotesContext<'a> {
    /// Ledger entries.
    pub entries: &'a [Entry],
    /// Qualitative statements.
    pub disclosures: &'a Disclosures,
    /// Fiscal year.
    pub exercice: i32,
    /// Income statement of the same snapshot.
    pub income_statement: &'a IncomeStatement,
    /// Cash-flow statement of the same snapshot.
    pub cash_flow: &'a CashFlowStatement,
}

/// Notes of one regime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotesAnnexes {
    /// Regime.
    pub systeme: Regime,
    /// Sections in regulatory order.
    pub notes: Vec<NoteSection>,
    /// Number of sections.
    pub nombre_total: usize,
}

impl NotesAnnexes {
    /// Builds the notes of a regime.
    #[must_use]
    pub fn for_regime(regime: Regime, context: &NotesContext<'_>) -> Self {
        let notes = match regime {
            Regime::Normal => normal_notes(context),
            Regime::Minimal => minimal_notes(context),
        };
        Self {
            systeme: regime,
            nombre_total: notes.len(),
            notes,
        }
    }

    /// Returns true if every note is complete.
    #[must_use]
    pub fn is_compliant(&self) -> bool {
        self.notes.iter().all(|note| note.conforme)
    }

    /// Renders the notes as Markdown.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = format!("# Notes annexes ({})\n", self.systeme);
        for note in &self.notes {
            let _ = write!(out, "\n## Note {} : {}\n", note.numero, note.titre);
            for block in &note.contenu {
                match block {
                    NoteBlock::Texte { texte } => {
                        let _ = writeln!(out, "{texte}");
                    }
                    NoteBlock::Tableau {
                        intitule,
                        lignes,
                        total,
                    } => {
                        let _ = writeln!(out, "\n### {intitule}");
                        out.push_str("| Compte | Libellé | Montant |\n|--------|---------|--------|\n");
                        for row in lignes {
                            let _ = writeln!(
                                out,
                                "| {} | {} | {} |",
                                row.compte,
                                row.libelle,
                                format_amount(row.montant)
                            );
                        }
                        let _ = writeln!(out, "| **Total** | | {} |", format_amount(*total));
                    }
                    NoteBlock::AucuneDonnee { intitule, message } => {
                        let _ = writeln!(out, "\n### {intitule}\n{message}");
                    }
                }
            }
        }
        out
    }
}

fn format_amount(amount: Decimal) -> String {
    let mut rounded = amount.round_dp(2);
    rounded.rescale(2);
    rounded.to_string()
}

fn methods_note(regime: Regime, context: &NotesContext<'_>) -> NoteSection {
    let mut note = NoteSection::disclosure(
        1,
        "Principes et méthodes comptables",
        context.disclosures.methodes.as_deref(),
    );
    note.contenu.insert(
        0,
        NoteBlock::text(format!(
            "États financiers établis selon le SYSCOHADA révisé, système {regime}, exercice {}.",
            context.exercice
        )),
    );
    note
}

fn capital_note(context: &NotesContext<'_>) -> NoteSection {
    NoteSection::new(
        2,
        "Capital social",
        vec![NoteBlock::table("Capital", context.entries, &CAPITAL)],
    )
}

fn income_detail_note(context: &NotesContext<'_>) -> NoteSection {
    let lines: Vec<(&str, Decimal)> = match context.income_statement {
        IncomeStatement::Normal(statement) => {
            let list = &statement.presentation_liste;
            vec![
                ("Marge commerciale", list.marge_commerciale),
                ("Valeur ajoutée", list.valeur_ajoutee),
                ("Excédent brut d'exploitation", list.excedent_brut_exploitation),
                ("Résultat d'exploitation", list.resultat_exploitation),
                ("Résultat financier", list.resultat_financier),
                ("Résultat HAO", list.resultat_hao),
                ("Impôt sur le résultat", list.impot_resultat),
                ("Résultat net", list.resultat_net),
            ]
        }
        IncomeStatement::Minimal(statement) => vec![
            ("Produits totaux", statement.produits_totaux),
            ("Charges totales", statement.charges_totales),
            ("Résultat net", statement.resultat_net),
        ],
    };

    NoteSection::new(
        7,
        "Détail du compte de résultat (par nature)",
        lines
            .into_iter()
            .map(|(label, amount)| NoteBlock::text(format!("{label} : {}", format_amount(amount))))
            .collect(),
    )
}

fn cash_flow_note(context: &NotesContext<'_>) -> NoteSection {
    let flows = context.cash_flow;
    let mut contenu = vec![
        NoteBlock::text(format!(
            "Flux net des activités opérationnelles : {}",
            format_amount(flows.flux_net_operationnel)
        )),
        NoteBlock::text(format!(
            "Flux net des activités d'investissement : {}",
            format_amount(flows.flux_net_investissement)
        )),
        NoteBlock::text(format!(
            "Flux net des activités de financement : {}",
            format_amount(flows.flux_net_financement)
        )),
        NoteBlock::text(format!(
            "Variation de trésorerie : {}",
            format_amount(flows.variation_tresorerie)
        )),
    ];
    if let Some(closing) = flows.tresorerie_cloture {
        contenu.push(NoteBlock::text(format!(
            "Trésorerie de clôture : {}",
            format_amount(closing)
        )));
    }
    NoteSection::new(11, "Flux de trésorerie (détails)", contenu)
}

fn normal_notes(context: &NotesContext<'_>) -> Vec<NoteSection> {
    let entries = context.entries;
    let disclosures = context.disclosures;

    vec![
        methods_note(Regime::Normal, context),
        capital_note(context),
        NoteSection::new(
            3,
            "Créances et dettes",
            vec![
                NoteBlock::table("Créances", entries, &RECEIVABLES),
                NoteBlock::table("Dettes", entries, &DEBTS),
            ],
        ),
        NoteSection::new(
            4,
            "Immobilisations et amortissements",
            vec![
                NoteBlock::table("Immobilisations", entries, &FIXED_ASSETS),
                NoteBlock::table("Amortissements", entries, &DEPRECIATION),
            ],
        ),
        NoteSection::new(
            5,
            "État des provisions",
            vec![NoteBlock::table("Provisions", entries, &PROVISIONS)],
        ),
        NoteSection::new(
            6,
            "Variation des stocks",
            vec![NoteBlock::table("Stocks", entries, &INVENTORIES)],
        ),
        income_detail_note(context),
        NoteSection::disclosure(8, "Engagements hors bilan", disclosures.engagements.as_deref()),
        NoteSection::new(
            9,
            "Subventions reçues",
            vec![NoteBlock::table("Subventions d'investissement", entries, &SUBSIDIES)],
        ),
        NoteSection::disclosure(
            10,
            "Opérations avec les parties liées",
            disclosures.parties_liees.as_deref(),
        ),
        cash_flow_note(context),
        NoteSection::disclosure(
            12,
            "Événements postérieurs à la clôture",
            disclosures.evenements.as_deref(),
        ),
    ]
}

fn minimal_notes(context: &NotesContext<'_>) -> Vec<NoteSection> {
    let entries = context.entries;

    vec![
        methods_note(Regime::Minimal, context),
        capital_note(context),
        NoteSection::new(
            3,
            "Créances et dettes agrégées",
            vec![
                NoteBlock::table("Créances", entries, &RECEIVABLES),
                NoteBlock::table("Dettes", entries, &AGGREGATED_DEBTS),
            ],
        ),
        NoteSection::new(
            4,
            "État global des immobilisations",
            vec![NoteBlock::table("Immobilisations", entries, &FIXED_ASSETS)],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn entries() -> Vec<Entry> {
        vec![
            Entry::new("101", dec!(8000000)).with_label("Capital social"),
            Entry::new("213", dec!(15000000)).with_label("Bâtiments"),
            Entry::new("411", dec!(4000000)),
            Entry::new("701", dec!(1000)),
        ]
    }

    fn build(regime: Regime, disclosures: &Disclosures) -> NotesAnnexes {
        let entries = entries();
        let income_statement = IncomeStatement::for_regime(regime, &entries);
        let cash_flow = CashFlowStatement::by_class(regime, &entries);
        let context = NotesContext {
            entries: &entries,
            disclosures,
            exercice: 2024,
            income_statement: &income_statement,
            cash_flow: &cash_flow,
        };
        NotesAnnexes::for_regime(regime, &context)
    }

    #[test]
    fn test_note_counts_and_numbering() {
        let normal = build(Regime::Normal, &Disclosures::default());
        let minimal = build(Regime::Minimal, &Disclosures::default());

        assert_eq!(normal.nombre_total, 12);
        assert_eq!(minimal.nombre_total, 4);
        let numbers: Vec<u8> = normal.notes.iter().map(|note| note.numero).collect();
        assert_eq!(numbers, (1..=12).collect::<Vec<u8>>());
    }

    #[test]
    fn test_missing_disclosures_render_placeholder() {
        let notes = build(Regime::Normal, &Disclosures::default());
        let commitments = &notes.notes[7];
        assert_eq!(commitments.numero, 8);
        assert!(!commitments.conforme);
        assert_eq!(commitments.contenu, vec![NoteBlock::text(PLACEHOLDER)]);
        assert!(!notes.is_compliant());
    }

    #[test]
    fn test_complete_disclosures_are_compliant() {
        let disclosures = Disclosures {
            methodes: Some("Coût historique.".into()),
            engagements: Some("Aucun engagement.".into()),
            evenements: Some("Néant.".into()),
            parties_liees: Some("Néant.".into()),
        };
        assert!(build(Regime::Normal, &disclosures).is_compliant());
    }

    #[test]
    fn test_table_rows_and_empty_placeholder() {
        let notes = build(Regime::Normal, &Disclosures::default());

        let capital = &notes.notes[1];
        assert_eq!(
            capital.contenu,
            vec![NoteBlock::Tableau {
                intitule: "Capital".into(),
                lignes: vec![NoteRow {
                    compte: "101".into(),
                    libelle: "Capital social".into(),
                    montant: dec!(8000000),
                }],
                total: dec!(8000000),
            }]
        );

        let provisions = &notes.notes[4];
        assert!(matches!(
            &provisions.contenu[0],
            NoteBlock::AucuneDonnee { message, .. } if message == NO_DATA
        ));
    }

    #[test]
    fn test_markdown_layout() {
        let markdown = build(Regime::Minimal, &Disclosures::default()).to_markdown();

        assert!(markdown.starts_with("# Notes annexes (MINIMAL)"));
        assert!(markdown.contains("## Note 4 : État global des immobilisations"));
        assert!(markdown.contains("| 213 | Bâtiments | 15000000.00 |"));
        assert!(markdown.contains("| 411 |  | 4000000.00 |"));
        assert!(markdown.contains(PLACEHOLDER));
    }

    #[test]
    fn test_blocks_serialize_with_type_tag() {
        let json = serde_json::to_value(NoteBlock::text("x")).unwrap();
        assert_eq!(json["type"], "texte");
        let json = serde_json::to_value(NoteBlock::table("Stocks", &[], &INVENTORIES)).unwrap();
        assert_eq!(json["type"], "aucuneDonnee");
    }
}
