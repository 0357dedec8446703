//! Douke command-line interface.
//!
//! Reads a snapshot of ledger entries, generates the statements of the
//! configured regime and writes the report bundle as JSON.

mod input;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use douke_core::analysis::RatioOutcome;
use douke_core::engine::StatementEngine;
use douke_core::{Configuration, ReportBundle};
use douke_shared::{AppConfig, AppError, CashFlowMethod};

#[derive(Parser)]
#[command(
    name = "douke",
    about = "Douke - SYSCOHADA financial statements from ledger entries"
)]
struct Cli {
    /// JSON file: an array of entries, `{"soldes": {...}}`, or a full input object.
    #[arg(long)]
    input: PathBuf,

    /// JSON file with the report configuration.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Accounting regime (NORMAL or MINIMAL).
    #[arg(long)]
    systeme: Option<String>,

    /// Fiscal year.
    #[arg(long)]
    exercice: Option<i32>,

    /// Company identifier.
    #[arg(long)]
    entreprise: Option<String>,

    /// Role of the requesting user.
    #[arg(long)]
    role: Option<String>,

    /// Output file for the report bundle. Defaults to stdout.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Also write the notes as Markdown to this file.
    #[arg(long)]
    notes_markdown: Option<PathBuf>,

    /// Report entries that no statement classifies.
    #[arg(long, default_value_t = false)]
    strict: bool,

    /// Use the direct cash-flow method (needs `cashMovements` in the input).
    #[arg(long, default_value_t = false)]
    direct: bool,
}

impl Cli {
    /// Report configuration from `--config`, overridden by individual flags.
    fn configuration(&self) -> Result<Configuration, AppError> {
        let mut config = match &self.config {
            Some(path) => input::parse_configuration(&input::read(path)?)?,
            None => Configuration::default(),
        };
        if let Some(systeme) = &self.systeme {
            config.systeme = Some(systeme.clone());
        }
        if let Some(exercice) = self.exercice {
            config.exercice = Some(exercice);
        }
        if let Some(entreprise) = &self.entreprise {
            config.entreprise_id = Some(entreprise.clone());
        }
        if let Some(role) = &self.role {
            config.utilisateur_role = Some(role.clone());
        }
        Ok(config)
    }
}

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("douke: configuration illisible: {err}");
            return ExitCode::from(2);
        }
    };

    // Initialize tracing; stdout is reserved for the bundle
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log.filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(&cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let app_error = err.downcast_ref::<AppError>();
            let code = app_error.map_or(1, AppError::exit_code);
            error!(
                code = app_error.map_or("ERR_INTERNAL", AppError::error_code),
                error = %err,
                "Report generation failed"
            );
            eprintln!("douke: {err:#}");
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn run(cli: &Cli, config: &AppConfig) -> anyhow::Result<()> {
    let mut options = config.engine;
    options.strict |= cli.strict;
    if cli.direct {
        options.cash_flow_method = CashFlowMethod::Direct;
    }

    let report_input = input::parse_input(&input::read(&cli.input)?)?;
    let report_config = cli.configuration()?;

    let bundle = StatementEngine::new(options)
        .generate(&report_input, &report_config)
        .map_err(AppError::from)?;

    if let Some(degraded) = degraded_ratios(&bundle) {
        warn!(
            code = degraded.error_code(),
            blocking = degraded.is_blocking(),
            error = %degraded,
            "Statements generated; ratios unavailable"
        );
    }

    write_bundle(&bundle, cli.output.as_deref(), config.output.pretty)?;

    if let Some(path) = &cli.notes_markdown {
        std::fs::write(path, bundle.notes_annexes.to_markdown())
            .with_context(|| format!("writing notes to {}", path.display()))?;
        info!(path = %path.display(), "Notes written");
    }

    Ok(())
}

/// The computation error behind the ratio sentinel, if any.
fn degraded_ratios(bundle: &ReportBundle) -> Option<AppError> {
    match &bundle.ratios_financiers.ratios {
        RatioOutcome::Calcules(_) => None,
        RatioOutcome::Indisponibles { erreur } => Some(AppError::Computation(erreur.clone())),
    }
}

fn write_bundle(
    bundle: &ReportBundle,
    output: Option<&Path>,
    pretty: bool,
) -> anyhow::Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(bundle)
    } else {
        serde_json::to_string(bundle)
    }
    .map_err(|err| AppError::Internal(err.to_string()))?;

    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("writing report to {}", path.display()))?;
            info!(path = %path.display(), "Report written");
        }
        None => println!("{json}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use douke_core::{Entry, generate_financial_statements};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn config() -> Configuration {
        Configuration::new("NORMAL", 2024, "ENT-01", "comptable")
    }

    #[test]
    fn test_ratio_overflow_degrades_without_blocking() {
        let entries = vec![
            Entry::new("701", Decimal::MAX / dec!(8)),
            Entry::new("101", dec!(0.01)),
            Entry::new("120", dec!(0.01)),
        ];
        let bundle = generate_financial_statements(&entries, &config()).unwrap();

        let degraded = degraded_ratios(&bundle).unwrap();

        assert_eq!(degraded.error_code(), "ERR_COMPUTATION");
        assert!(!degraded.is_blocking());
        assert!(serde_json::to_string(&bundle).is_ok());
    }

    #[test]
    fn test_computed_ratios_are_not_degraded() {
        let entries = vec![
            Entry::new("101", dec!(1000)),
            Entry::new("521", dec!(1000)),
        ];
        let bundle = generate_financial_statements(&entries, &config()).unwrap();

        assert!(degraded_ratios(&bundle).is_none());
    }
}
