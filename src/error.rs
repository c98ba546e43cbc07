//! Error types.
//!
//! Two layers:
//!
//! - [`WaveformError`]: typed failures of the synthesis core, each carrying enough
//!   context to identify the offending regime/quantity.
//! - [`AppError`]: what the `uwave` binary reports (message + process exit code).

use thiserror::Error;

use crate::domain::ModelKey;

/// Failures of a single synthesis call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WaveformError {
    /// Bad `nu`, parity, multipolar index, or malformed time samples.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The validated time domain (or the stitcher input) is empty.
    #[error("Empty time domain: {0}")]
    EmptyDomain(String),

    /// A required polynomial model could not be obtained from the provider.
    #[error("Polynomial model {key} unavailable: {reason}")]
    PolynomialUnavailable { key: ModelKey, reason: String },

    /// A model produced a non-finite value.
    #[error("Evaluation of {key} failed at x={at}: {reason}")]
    Evaluation { key: ModelKey, at: f64, reason: String },
}

impl WaveformError {
    /// Exit code used when this error terminates the binary.
    pub fn exit_code(&self) -> u8 {
        match self {
            WaveformError::InvalidParameter(_) => 2,
            WaveformError::EmptyDomain(_) => 3,
            WaveformError::PolynomialUnavailable { .. } | WaveformError::Evaluation { .. } => 4,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<WaveformError> for AppError {
    fn from(err: WaveformError) -> Self {
        AppError::new(err.exit_code(), format!("Failed to generate waveform: {err}"))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Quantity, Regime};

    #[test]
    fn waveform_errors_map_to_exit_codes() {
        let invalid = AppError::from(WaveformError::InvalidParameter("nu".to_string()));
        assert_eq!(invalid.exit_code(), 2);

        let empty = AppError::from(WaveformError::EmptyDomain("no samples".to_string()));
        assert_eq!(empty.exit_code(), 3);

        let missing = AppError::from(WaveformError::PolynomialUnavailable {
            key: ModelKey::new(Regime::Gui, Quantity::Phase),
            reason: "file not found".to_string(),
        });
        assert_eq!(missing.exit_code(), 4);
        assert!(missing.to_string().contains("gui phase"));
    }
}
