//! Stiff ODE integration for rotor run-up simulations.
//!
//! Provides:
//! - the `OdeSystem` trait implemented by dynamic models
//! - finite-difference Jacobians
//! - a simplified-Newton solver for implicit stage equations
//! - an adaptive ESDIRK32 integrator with dense output and run budgets

pub mod dense;
pub mod error;
pub mod esdirk;
pub mod jacobian;
pub mod newton;
pub mod system;

pub use error::{IncompleteReason, SolverError, SolverResult};
pub use esdirk::{
    Esdirk32, IntegrationStats, IntegratorOptions, JacobianKind, Solution, StepProgress,
};
pub use newton::{NewtonConfig, NewtonResult};
pub use system::OdeSystem;
