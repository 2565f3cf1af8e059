//! Finite difference Jacobian computation.

use crate::error::SolverResult;
use nalgebra::{DMatrix, DVector};

/// Perturbation for column `j`: `sqrt(eps_mach) * max(|x_j|, floor)`.
///
/// The returned step is exactly representable as `(x_j + dx) - x_j`.
pub fn column_step(xj: f64, floor: f64) -> f64 {
    let dx = f64::EPSILON.sqrt() * xj.abs().max(floor);
    (xj + dx) - xj
}

/// Compute Jacobian using forward finite differences.
///
/// `f_x` is `f(x)`, already known to the caller. For each column j, perturbs
/// x[j] and computes (f(x+e) - f(x))/dx.
pub fn finite_difference_jacobian<F>(
    x: &DVector<f64>,
    f_x: &DVector<f64>,
    mut f: F,
    floor: f64,
) -> SolverResult<DMatrix<f64>>
where
    F: FnMut(&DVector<f64>) -> SolverResult<DVector<f64>>,
{
    let n = x.len();
    let m = f_x.len();
    let mut jac = DMatrix::zeros(m, n);
    let mut x_perturbed = x.clone();

    for j in 0..n {
        let dx = column_step(x[j], floor);
        x_perturbed[j] = x[j] + dx;

        let f_perturbed = f(&x_perturbed)?;
        jac.set_column(j, &((f_perturbed - f_x) / dx));

        x_perturbed[j] = x[j];
    }

    Ok(jac)
}

/// Compute Jacobian using central finite differences (more accurate but 2x cost).
pub fn central_difference_jacobian<F>(
    x: &DVector<f64>,
    mut f: F,
    floor: f64,
) -> SolverResult<DMatrix<f64>>
where
    F: FnMut(&DVector<f64>) -> SolverResult<DVector<f64>>,
{
    let n = x.len();
    let mut jac: Option<DMatrix<f64>> = None;
    let mut x_perturbed = x.clone();

    for j in 0..n {
        let dx = column_step(x[j], floor);

        x_perturbed[j] = x[j] + dx;
        let f_plus = f(&x_perturbed)?;
        x_perturbed[j] = x[j] - dx;
        let f_minus = f(&x_perturbed)?;
        x_perturbed[j] = x[j];

        let jac = jac.get_or_insert_with(|| DMatrix::zeros(f_plus.len(), n));
        jac.set_column(j, &((f_plus - f_minus) / (2.0 * dx)));
    }

    Ok(jac.unwrap_or_else(|| DMatrix::zeros(0, 0)))
}
