//! Error types for bearing force evaluation.

use rd_core::RdError;
use thiserror::Error;

/// Errors that can occur while evaluating bearing forces.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BearingError {
    #[error("Invalid bearing geometry: {0}")]
    InvalidGeometry(#[from] RdError),

    #[error("Width/diameter ratio {b2d} outside short-bearing range (0, 1)")]
    NotShortBearing { b2d: f64 },

    /// The journal has effectively reached the bearing wall.
    #[error("Bearing domain violation at eps={eps}: {what}")]
    DomainViolation { eps: f64, what: &'static str },

    /// Zero eccentricity with a squeeze term leaves the closed form undefined.
    #[error("Singular bearing input: eps=0 with eps_s={eps_s}, phi_s={phi_s}")]
    SingularInput { eps_s: f64, phi_s: f64 },
}

pub type BearingResult<T> = Result<T, BearingError>;

impl BearingError {
    /// True for every condition that means the run has to stop at contact.
    pub fn is_domain_violation(&self) -> bool {
        matches!(
            self,
            BearingError::DomainViolation { .. } | BearingError::SingularInput { .. }
        )
    }
}
