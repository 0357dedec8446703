//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// Domain crates keep their own error enums; this is what callers at the
/// boundary (CLI, future API) report to the user.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration is missing a field or carries an invalid value.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A generator received a regime it does not branch on.
    #[error("Unsupported regime: {0}")]
    UnsupportedRegime(String),

    /// A derived figure could not be computed.
    #[error("Computation error: {0}")]
    Computation(String),

    /// Input data could not be read or decoded.
    #[error("Invalid input: {0}")]
    Input(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the error code for machine-readable output.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "ERR_CONFIG",
            Self::UnsupportedRegime(_) => "ERR_REGIME",
            Self::Computation(_) => "ERR_COMPUTATION",
            Self::Input(_) => "ERR_INPUT",
            Self::Internal(_) => "ERR_INTERNAL",
        }
    }

    /// Returns the process exit code for command-line front ends.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Configuration(_) | Self::UnsupportedRegime(_) => 2,
            Self::Input(_) => 3,
            Self::Computation(_) => 4,
            Self::Internal(_) => 1,
        }
    }

    /// Returns true if no report can be produced until the caller fixes the setup.
    ///
    /// Computation errors only degrade a report (ratios unavailable), everything
    /// else blocks generation.
    #[must_use]
    pub const fn is_blocking(&self) -> bool {
        !matches!(self, Self::Computation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AppError::Configuration(String::new()), "ERR_CONFIG", 2)]
    #[case(AppError::UnsupportedRegime(String::new()), "ERR_REGIME", 2)]
    #[case(AppError::Computation(String::new()), "ERR_COMPUTATION", 4)]
    #[case(AppError::Input(String::new()), "ERR_INPUT", 3)]
    #[case(AppError::Internal(String::new()), "ERR_INTERNAL", 1)]
    fn test_error_codes(#[case] error: AppError, #[case] code: &str, #[case] exit: i32) {
        assert_eq!(error.error_code(), code);
        assert_eq!(error.exit_code(), exit);
    }

    #[test]
    fn test_only_computation_errors_are_non_blocking() {
        assert!(AppError::Configuration("x".into()).is_blocking());
        assert!(AppError::UnsupportedRegime("x".into()).is_blocking());
        assert!(AppError::Input("x".into()).is_blocking());
        assert!(AppError::Internal("x".into()).is_blocking());
        assert!(!AppError::Computation("x".into()).is_blocking());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::Configuration("msg".into()).to_string(),
            "Configuration error: msg"
        );
        assert_eq!(
            AppError::UnsupportedRegime("msg".into()).to_string(),
            "Unsupported regime: msg"
        );
        assert_eq!(
            AppError::Computation("msg".into()).to_string(),
            "Computation error: msg"
        );
        assert_eq!(AppError::Input("msg".into()).to_string(), "Invalid input: msg");
        assert_eq!(
            AppError::Internal("msg".into()).to_string(),
            "Internal error: msg"
        );
    }
}
