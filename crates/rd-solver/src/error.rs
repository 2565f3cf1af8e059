//! Error types for solver operations.

use std::fmt;

use thiserror::Error;

/// Errors that can occur during time integration.
#[derive(Error, Debug)]
pub enum SolverError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },

    /// The system's right-hand side failed. Terminal for the run.
    #[error("Model evaluation failed at t={t}: {source}")]
    Model {
        t: f64,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Jacobian solve failed: {what}")]
    JacobianSolve { what: String },

    #[error("Integration did not complete: stopped at t={t} of t_end={t_end} ({reason})")]
    IntegrationIncomplete {
        t: f64,
        t_end: f64,
        reason: IncompleteReason,
    },
}

pub type SolverResult<T> = Result<T, SolverError>;

/// Which budget stopped an integration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum IncompleteReason {
    /// Accepted plus rejected steps reached the limit.
    StepBudget { max_steps: usize },
    /// The controller asked for a step below the minimum.
    StepTooSmall { h: f64, min_step: f64 },
    /// The wall-clock limit elapsed.
    WallClock { limit_s: f64 },
}

impl fmt::Display for IncompleteReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IncompleteReason::StepBudget { max_steps } => {
                write!(f, "step budget of {max_steps} exhausted")
            }
            IncompleteReason::StepTooSmall { h, min_step } => {
                write!(f, "step size {h:e} below minimum {min_step:e}")
            }
            IncompleteReason::WallClock { limit_s } => {
                write!(f, "wall-clock limit of {limit_s} s reached")
            }
        }
    }
}

impl SolverError {
    /// Time of a `Model` failure.
    pub fn model_time(&self) -> Option<f64> {
        match self {
            SolverError::Model { t, .. } => Some(*t),
            _ => None,
        }
    }

    /// The model error behind a `Model` failure, if it has type `E`.
    pub fn model_error<E: std::error::Error + 'static>(&self) -> Option<&E> {
        match self {
            SolverError::Model { source, .. } => source.downcast_ref::<E>(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Error, Debug)]
    #[error("wall contact")]
    struct Contact;

    #[test]
    fn incomplete_message_names_the_budget() {
        let err = SolverError::IntegrationIncomplete {
            t: 0.25,
            t_end: 1.0,
            reason: IncompleteReason::StepBudget { max_steps: 10 },
        };
        let msg = err.to_string();
        assert!(msg.contains("did not complete"));
        assert!(msg.contains("step budget of 10"));
    }

    #[test]
    fn model_error_downcasts() {
        let err = SolverError::Model {
            t: 0.1,
            source: Box::new(Contact),
        };
        assert!(err.model_error::<Contact>().is_some());
        assert!(err.model_error::<std::fmt::Error>().is_none());
    }
}
