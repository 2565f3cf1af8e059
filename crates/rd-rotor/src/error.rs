//! Error types for the rotor model.

use rd_bearing::BearingError;
use rd_core::RdError;
use thiserror::Error;

/// Errors that can occur while building or evaluating the rotor model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RotorError {
    #[error("Invalid system matrices: {what}")]
    InvalidMatrices { what: String },

    #[error("Invalid rotor state: {what}")]
    InvalidState { what: String },

    #[error("Invalid rotor parameter: {0}")]
    InvalidParameter(#[from] RdError),

    #[error("Bearing error: {0}")]
    Bearing(#[from] BearingError),
}

pub type RotorResult<T> = Result<T, RotorError>;

impl RotorError {
    /// True when a bearing reported journal contact.
    pub fn is_domain_violation(&self) -> bool {
        matches!(self, RotorError::Bearing(e) if e.is_domain_violation())
    }
}
