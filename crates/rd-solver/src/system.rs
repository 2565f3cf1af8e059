//! OdeSystem trait for pluggable dynamic systems.

use nalgebra::DVector;

/// A first-order system `x' = f(t, x)`.
///
/// Implementations must be pure: the integrator evaluates trial states,
/// perturbed states for Jacobians, and rejected steps, all of which are
/// discarded.
pub trait OdeSystem {
    /// Model-specific failure, carried through `SolverError::Model`.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Number of state components.
    fn dim(&self) -> usize;

    /// Compute the state derivative at `(t, x)`.
    fn rhs(&self, t: f64, x: &DVector<f64>) -> Result<DVector<f64>, Self::Error>;
}
