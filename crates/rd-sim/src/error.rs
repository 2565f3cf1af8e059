//! Error types for run-up simulations.

use rd_bearing::BearingError;
use rd_config::ValidationError;
use rd_rotor::RotorError;
use rd_solver::SolverError;
use thiserror::Error;

/// Errors encountered while setting up or running a run-up.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Configuration error: {0}")]
    Config(#[from] ValidationError),

    #[error("Rotor model error: {0}")]
    Rotor(#[from] RotorError),

    /// The journal reached the bearing wall.
    #[error("Bearing domain violation at t={t}: {source}")]
    DomainViolation {
        t: f64,
        #[source]
        source: RotorError,
    },

    #[error("Integration failure: {0}")]
    IntegrationFailure(SolverError),
}

pub type SimResult<T> = Result<T, SimError>;

impl SimError {
    /// True when a step, wall-clock or step-size budget ran out.
    pub fn is_incomplete(&self) -> bool {
        matches!(
            self,
            SimError::IntegrationFailure(SolverError::IntegrationIncomplete { .. })
        )
    }
}

impl From<BearingError> for SimError {
    fn from(e: BearingError) -> Self {
        SimError::Rotor(e.into())
    }
}

impl From<SolverError> for SimError {
    fn from(e: SolverError) -> Self {
        let t = match e.model_time() {
            Some(t) => t,
            None => return SimError::IntegrationFailure(e),
        };
        let classified = e.model_error::<RotorError>().map(|rotor| {
            if rotor.is_domain_violation() {
                SimError::DomainViolation {
                    t,
                    source: rotor.clone(),
                }
            } else {
                SimError::Rotor(rotor.clone())
            }
        });
        classified.unwrap_or(SimError::IntegrationFailure(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rd_solver::IncompleteReason;

    #[test]
    fn model_domain_violation_is_classified() {
        let rotor = RotorError::Bearing(BearingError::DomainViolation {
            eps: 1.2,
            what: "eccentricity outside [0, 1)",
        });
        let solver = SolverError::Model {
            t: 0.4,
            source: Box::new(rotor),
        };
        match SimError::from(solver) {
            SimError::DomainViolation { t, .. } => assert_eq!(t, 0.4),
            other => panic!("unexpected: {other}"),
        }
    }

    #[test]
    fn singular_input_counts_as_domain_violation() {
        let rotor = RotorError::Bearing(BearingError::SingularInput {
            eps_s: 0.0,
            phi_s: 0.3,
        });
        let solver = SolverError::Model {
            t: 0.1,
            source: Box::new(rotor),
        };
        assert!(matches!(
            SimError::from(solver),
            SimError::DomainViolation { .. }
        ));
    }

    #[test]
    fn other_failures_pass_through() {
        let solver = SolverError::IntegrationIncomplete {
            t: 0.2,
            t_end: 1.0,
            reason: IncompleteReason::StepBudget { max_steps: 3 },
        };
        let err = SimError::from(solver);
        assert!(err.is_incomplete());

        let state = SolverError::Model {
            t: 0.0,
            source: Box::new(RotorError::InvalidState {
                what: "expected 8 components, got 7".to_string(),
            }),
        };
        assert!(matches!(SimError::from(state), SimError::Rotor(_)));
    }
}
