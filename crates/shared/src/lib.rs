//! Shared errors and configuration for Douke.
//!
//! This crate provides what every other crate needs at the boundary:
//! - Application-wide error taxonomy with stable error codes
//! - Deployment configuration (engine options, output, logging)

pub mod config;
pub mod error;

pub use config::{AppConfig, CashFlowMethod, EngineOptions};
pub use error::{AppError, AppResult};
