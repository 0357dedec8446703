//! Financial analysis derived from generated statements.

pub mod error;
pub mod ratios;

pub use error::RatioError;
pub use ratios::{FinancialRatios, RatioCalculator, RatioOutcome, RatioReport};
