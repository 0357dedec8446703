//! Deployment configuration management.
//!
//! This is the configuration of a Douke installation (which cash-flow method
//! the deployment uses, strict mode, output and logging). The per-report
//! configuration (regime, fiscal year, company, role) travels with each request
//! and lives in `douke-core`.

use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Statement engine options.
    pub engine: EngineOptions,
    /// Output configuration.
    pub output: OutputConfig,
    /// Logging configuration.
    pub log: LogConfig,
}

/// Method used to build the cash-flow statement.
///
/// A deployment picks one; the two are not interchangeable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CashFlowMethod {
    /// Ledger entries filtered by account class.
    #[default]
    #[serde(rename = "PAR_CLASSES")]
    ByClass,
    /// Direct method over classified cash movements.
    #[serde(rename = "DIRECTE")]
    Direct,
}

/// Options that change what the statement engine produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// Cash-flow method of this deployment.
    pub cash_flow_method: CashFlowMethod,
    /// Report entries that no statement classifies as warnings.
    pub strict: bool,
}

/// Output configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default `tracing` filter directive, overridden by `RUST_LOG`.
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "douke=info,douke_core=info".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, lowest priority first: `config/default`, `config/{RUN_MODE}`,
    /// then `DOUKE__SECTION__KEY` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be parsed or holds a value of the
    /// wrong type.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("DOUKE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
