//! Input file decoding.

use std::path::Path;

use douke_core::Configuration;
use douke_core::engine::ReportInput;
use douke_core::ledger::{Entry, PreAggregatedBalances};
use douke_shared::AppError;
use serde::Deserialize;

/// Accepted shapes of the input file.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InputFile {
    /// A bare array of entries.
    Entries(Vec<Entry>),
    /// Balance-sheet totals computed upstream.
    Balances(BalancesFile),
    /// Entries with cash movements and disclosures.
    Full(ReportInput),
}

/// `{"soldes": {...}}` and nothing else.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct BalancesFile {
    soldes: PreAggregatedBalances,
}

impl From<InputFile> for ReportInput {
    fn from(file: InputFile) -> Self {
        match file {
            InputFile::Entries(entries) => Self::from(entries),
            InputFile::Balances(file) => Self::from(file.soldes.to_entries()),
            InputFile::Full(input) => input,
        }
    }
}

/// Decodes a report input from JSON text.
pub fn parse_input(json: &str) -> Result<ReportInput, AppError> {
    serde_json::from_str::<InputFile>(json)
        .map(ReportInput::from)
        .map_err(|err| AppError::Input(format!("écritures illisibles: {err}")))
}

/// Decodes a report configuration from JSON text.
pub fn parse_configuration(json: &str) -> Result<Configuration, AppError> {
    serde_json::from_str(json)
        .map_err(|err| AppError::Input(format!("configuration illisible: {err}")))
}

/// Reads a whole file, reporting failures as input errors.
pub fn read(path: &Path) -> Result<String, AppError> {
    std::fs::read_to_string(path)
        .map_err(|err| AppError::Input(format!("{}: {err}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_bare_entry_array() {
        let input = parse_input(r#"[{"compte": 521, "montant": "1500"}, {"account": "101", "amount": "1500"}]"#)
            .unwrap();
        assert_eq!(input.entries.len(), 2);
        assert!(input.cash_movements.is_none());
    }

    #[test]
    fn test_full_input() {
        let input = parse_input(
            r#"{
                "entries": [{"account": "701", "amount": "900"}],
                "disclosures": {"engagements": "Aucun engagement hors bilan."}
            }"#,
        )
        .unwrap();
        assert_eq!(input.entries[0].amount, dec!(900));
        assert!(input.disclosures.engagements.is_some());
    }

    #[test]
    fn test_pre_aggregated_balances() {
        let input = parse_input(r#"{"soldes": {"banques_caisses": "2500", "capital_social": "2500"}}"#)
            .unwrap();
        assert_eq!(input.entries.len(), 2);
    }

    #[test]
    fn test_misspelled_entries_key_is_an_input_error() {
        let err = parse_input(r#"{"entrees": [{"account": "701", "amount": "1000"}]}"#)
            .unwrap_err();
        assert_eq!(err.error_code(), "ERR_INPUT");
    }

    #[test]
    fn test_balances_mixed_with_entries_is_an_input_error() {
        let err = parse_input(
            r#"{
                "soldes": {"banques_caisses": "2500", "capital_social": "2500"},
                "entries": [{"account": "701", "amount": "900"}]
            }"#,
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "ERR_INPUT");
    }

    #[test]
    fn test_garbage_is_an_input_error() {
        let err = parse_input("not json").unwrap_err();
        assert_eq!(err.error_code(), "ERR_INPUT");
    }

    #[test]
    fn test_configuration() {
        let config = parse_configuration(
            r#"{"systeme": "MINIMAL", "exercice": 2024, "entrepriseId": "E1", "utilisateurRole": "gerant"}"#,
        )
        .unwrap();
        assert_eq!(config.systeme.as_deref(), Some("MINIMAL"));
        assert_eq!(config.exercice, Some(2024));
    }
}
