//! End-to-end statement generation scenarios.
//!
//! These tests verify that:
//! - A balanced ledger yields a balanced sheet through the full engine
//! - Net result, flags and ratios come out of one snapshot consistently
//! - Configuration errors stop generation before any statement is built
//! - Generation is idempotent and independent jobs run in parallel

use chrono::{Duration, TimeZone, Utc};
use douke_core::analysis::RatioCalculator;
use douke_core::engine::{ReportInput, ReportJob, StatementEngine, Warning};
use douke_core::reports::{BalanceSheet, IncomeStatement, ReportService, StatementError};
use douke_core::{Configuration, Entry, Regime, generate_financial_statements};
use douke_shared::{AppError, EngineOptions};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn config(systeme: &str) -> Configuration {
    Configuration::new(systeme, 2024, "ENT-42", "comptable")
}

/// The listed entries of the first scenario, completed so that both sides
/// reach 25,000,000.
fn balanced_ledger() -> Vec<Entry> {
    vec![
        Entry::new(101u32, dec!(8000000)),
        Entry::new(106u32, dec!(5000000)),
        Entry::new(120u32, dec!(4000000)),
        Entry::new(162u32, dec!(5000000)),
        Entry::new(401u32, dec!(3000000)),
        Entry::new(201u32, dec!(500000)),
        Entry::new(213u32, dec!(15000000)),
        Entry::new(221u32, dec!(500000)),
        Entry::new(331u32, dec!(3000000)),
        Entry::new(411u32, dec!(4000000)),
        Entry::new(451u32, dec!(500000)),
        Entry::new(521u32, dec!(1500000)),
    ]
}

/// A trading year: 60,000,000 of sales against 56,000,000 of charges.
fn trading_year() -> Vec<Entry> {
    vec![
        Entry::new("701", dec!(40000000)),
        Entry::new("706", dec!(20000000)),
        Entry::new("601", dec!(30000000)),
        Entry::new("622", dec!(10000000)),
        Entry::new("641", dec!(10000000)),
        Entry::new("661", dec!(2000000)),
        Entry::new("671", dec!(1000000)),
        Entry::new("681", dec!(3000000)),
    ]
}

#[test]
fn test_balanced_ledger_balances_in_both_regimes() {
    for systeme in ["NORMAL", "MINIMAL"] {
        let bundle = generate_financial_statements(&balanced_ledger(), &config(systeme)).unwrap();
        let totals = bundle.bilan.totals();

        assert_eq!(totals.total_actif, dec!(25000000), "{systeme}");
        assert_eq!(totals.total_passif, dec!(25000000), "{systeme}");
        assert!(totals.equilibre, "{systeme}");
        assert_eq!(totals.resultat_exercice, dec!(4000000));
    }
}

#[test]
fn test_result_lines_without_activity_are_flagged() {
    let bundle = generate_financial_statements(&balanced_ledger(), &config("NORMAL")).unwrap();

    assert_eq!(
        bundle.avertissements,
        vec![Warning::ResultMismatch {
            bilan: dec!(4000000),
            compte_resultat: Decimal::ZERO,
        }]
    );
}

#[test]
fn test_profitable_year() {
    let statement =
        ReportService::generate_income_statement(&trading_year(), &config("NORMAL")).unwrap();

    assert_eq!(statement.net_result(), dec!(4000000));
    assert_eq!(statement.net_revenue(), dec!(60000000));
    assert_eq!(statement.flags(), (true, false));
}

#[test]
fn test_empty_year_is_neither_profit_nor_loss() {
    for systeme in ["NORMAL", "MINIMAL"] {
        let statement = ReportService::generate_income_statement(&[], &config(systeme)).unwrap();
        assert_eq!(statement.net_result(), Decimal::ZERO);
        assert_eq!(statement.flags(), (false, false));
    }
}

#[test]
fn test_ratios_with_zero_equity_stay_finite() {
    let sheet = BalanceSheet::for_regime(Regime::Normal, &[Entry::new("521", dec!(2000))]);
    let statement = IncomeStatement::for_regime(Regime::Normal, &trading_year());

    let report = RatioCalculator::compute(&sheet, &statement, &config("NORMAL"));

    let ratios = report.ratios().unwrap();
    assert_eq!(sheet.totals().total_capitaux_propres, Decimal::ZERO);
    assert_eq!(ratios.rentabilite_fonds_propres, dec!(400000000));
}

#[test]
fn test_legacy_regime_names_value_and_year() {
    let err = ReportService::generate_balance_sheet(&balanced_ledger(), &config("LEGACY"))
        .unwrap_err();

    match &err {
        StatementError::UnsupportedRegime {
            systeme, exercice, ..
        } => {
            assert_eq!(systeme, "LEGACY");
            assert_eq!(exercice, "2024");
        }
        other => panic!("expected an unsupported regime, got {other}"),
    }

    let app_error = AppError::from(err);
    assert_eq!(app_error.error_code(), "ERR_REGIME");
    assert!(app_error.is_blocking());
}

#[test]
fn test_engine_rejects_legacy_before_generating() {
    let err = generate_financial_statements(&balanced_ledger(), &config("LEGACY")).unwrap_err();
    assert!(err.is_configuration());
    assert!(err.to_string().contains("LEGACY"));
}

#[test]
fn test_generation_is_idempotent() {
    let engine = StatementEngine::default();
    let input = ReportInput::from(trading_year());
    let at = Utc.with_ymd_and_hms(2025, 1, 15, 8, 30, 0).unwrap();

    let first = engine.generate_at(&input, &config("NORMAL"), at).unwrap();
    let second = engine.generate_at(&input, &config("NORMAL"), at).unwrap();
    assert_eq!(first, second);

    let later = engine
        .generate_at(&input, &config("NORMAL"), at + Duration::hours(1))
        .unwrap();
    assert_ne!(first.metadata, later.metadata);
    assert_eq!(first.bilan, later.bilan);
    assert_eq!(first.compte_resultat, later.compte_resultat);
    assert_eq!(first.notes_annexes, later.notes_annexes);
}

#[test]
fn test_normal_notes_outnumber_minimal() {
    let entries = balanced_ledger();
    let normal = generate_financial_statements(&entries, &config("NORMAL")).unwrap();
    let minimal = generate_financial_statements(&entries, &config("MINIMAL")).unwrap();

    assert!(normal.notes_annexes.nombre_total >= minimal.notes_annexes.nombre_total);
    assert_eq!(normal.notes_annexes.nombre_total, 12);
    assert_eq!(minimal.notes_annexes.nombre_total, 4);
    assert!(
        normal
            .notes_annexes
            .to_markdown()
            .starts_with("# Notes annexes (NORMAL)")
    );
}

#[test]
fn test_carried_result_matches_income_statement() {
    let mut entries = trading_year();
    entries.extend([
        Entry::new("101", dec!(6000000)),
        Entry::new("521", dec!(10000000)),
    ]);

    for systeme in ["NORMAL", "MINIMAL"] {
        let bundle = generate_financial_statements(&entries, &config(systeme)).unwrap();
        assert_eq!(
            bundle.bilan.totals().resultat_exercice,
            bundle.compte_resultat.net_result(),
            "{systeme}"
        );
    }
}

#[test]
fn test_generate_many_keeps_job_order() {
    let engine = StatementEngine::new(EngineOptions::default());
    let jobs = vec![
        ReportJob {
            input: ReportInput::from(balanced_ledger()),
            configuration: config("NORMAL"),
        },
        ReportJob {
            input: ReportInput::from(trading_year()),
            configuration: config("LEGACY"),
        },
        ReportJob {
            input: ReportInput::from(trading_year()),
            configuration: config("MINIMAL"),
        },
    ];

    let results = engine.generate_many(&jobs);

    assert_eq!(results.len(), 3);
    assert_eq!(
        results[0].as_ref().unwrap().metadata.configuration.systeme,
        Regime::Normal
    );
    assert!(results[1].is_err());
    let minimal = results[2].as_ref().unwrap();
    assert!(minimal.etat_recettes_depenses.is_some());
    assert_eq!(minimal.compte_resultat.net_result(), dec!(4000000));
}
