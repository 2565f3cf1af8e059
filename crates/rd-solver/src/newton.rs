//! Simplified Newton iteration for implicit stage equations.

use crate::error::SolverResult;
use nalgebra::{DVector, Dyn, LU};
use rd_core::Tolerances;

/// Newton solver configuration.
#[derive(Clone, Debug)]
pub struct NewtonConfig {
    /// Maximum iterations per stage
    pub max_iterations: usize,
    /// Convergence threshold on the weighted max-norm of the last increment
    pub increment_tol: f64,
}

impl Default for NewtonConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10,
            increment_tol: 1e-2,
        }
    }
}

/// Newton iteration result.
#[derive(Clone, Debug)]
pub struct NewtonResult {
    /// Last iterate
    pub x: DVector<f64>,
    /// Weighted max-norm of the last increment
    pub increment_norm: f64,
    /// Number of iterations
    pub iterations: usize,
    /// Converged flag
    pub converged: bool,
}

/// Solve `residual(z) = 0` with a frozen, factorised iteration matrix.
///
/// The matrix approximates `-d residual / dz`, so each increment is
/// `lu.solve(residual(z))`. Non-convergence is reported through
/// `converged = false` so the caller can retry with a smaller step; only
/// errors from `residual` itself are returned as `Err`.
pub fn simplified_newton<F>(
    z0: DVector<f64>,
    lu: &LU<f64, Dyn, Dyn>,
    mut residual: F,
    tol: Tolerances,
    config: &NewtonConfig,
) -> SolverResult<NewtonResult>
where
    F: FnMut(&DVector<f64>) -> SolverResult<DVector<f64>>,
{
    let mut z = z0;
    let mut increment_norm = f64::INFINITY;

    for iter in 1..=config.max_iterations {
        let r = residual(&z)?;
        let Some(dz) = lu.solve(&r) else {
            break;
        };
        z += &dz;

        if !z.iter().all(|v| v.is_finite()) {
            break;
        }

        increment_norm = dz
            .iter()
            .zip(z.iter())
            .map(|(d, v)| d.abs() / tol.weight(*v))
            .fold(0.0, f64::max);

        if increment_norm < config.increment_tol {
            return Ok(NewtonResult {
                x: z,
                increment_norm,
                iterations: iter,
                converged: true,
            });
        }
    }

    Ok(NewtonResult {
        x: z,
        increment_norm,
        iterations: config.max_iterations,
        converged: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::DMatrix;

    fn tol() -> Tolerances {
        Tolerances {
            abs: 1e-8,
            rel: 1e-8,
        }
    }

    #[test]
    fn linear_stage_converges_immediately() {
        // z = 1 + 0.5 * (-2 z)  =>  z = 0.5
        let m = DMatrix::from_element(1, 1, 2.0);
        let lu = m.lu();
        let residual = |z: &DVector<f64>| -> SolverResult<DVector<f64>> {
            Ok(DVector::from_element(1, 1.0 - z[0] - z[0]))
        };

        let result =
            simplified_newton(DVector::zeros(1), &lu, residual, tol(), &NewtonConfig::default())
                .unwrap();

        assert!(result.converged);
        assert!((result.x[0] - 0.5).abs() < 1e-12);
        assert!(result.iterations <= 2);
    }

    #[test]
    fn nonlinear_stage_with_frozen_matrix() {
        // z - 1 - 0.1 * z^2 = 0, matrix frozen at z = 1
        let m = DMatrix::from_element(1, 1, 1.0 - 0.2);
        let lu = m.lu();
        let residual = |z: &DVector<f64>| -> SolverResult<DVector<f64>> {
            Ok(DVector::from_element(1, 1.0 + 0.1 * z[0] * z[0] - z[0]))
        };

        let config = NewtonConfig {
            max_iterations: 50,
            increment_tol: 1e-3,
        };
        let result = simplified_newton(DVector::from_element(1, 1.0), &lu, residual, tol(), &config)
            .unwrap();

        let exact = (1.0 - (1.0_f64 - 0.4).sqrt()) / 0.2;
        assert!(result.converged);
        assert!((result.x[0] - exact).abs() < 1e-9);
    }

    #[test]
    fn divergence_is_reported_not_raised() {
        // wrong-signed matrix pushes the iterate away from the root
        let m = DMatrix::from_element(1, 1, -1.0);
        let lu = m.lu();
        let residual = |z: &DVector<f64>| -> SolverResult<DVector<f64>> {
            Ok(DVector::from_element(1, 2.0 - z[0]))
        };

        let result =
            simplified_newton(DVector::zeros(1), &lu, residual, tol(), &NewtonConfig::default())
                .unwrap();
        assert!(!result.converged);
    }
}
