//! First-order state-space form of the rotor equations.

use nalgebra::{SMatrix, SVector, Vector4};

use crate::error::{RotorError, RotorResult};
use crate::matrices::{Matrix4, SystemMatrices};
use crate::state::{DOF, STATE_DIM};

pub type Matrix8 = SMatrix<f64, STATE_DIM, STATE_DIM>;

/// `x' = A x + [0; M^-1 F]` with `x = [q; q']`.
///
/// ```text
/// A = [     0,        I    ]
///     [ -M^-1 C,  -M^-1 D  ]
/// ```
///
/// Built once per run and never mutated.
#[derive(Clone, Debug, PartialEq)]
pub struct StateSpaceModel {
    a: Matrix8,
    m_inv: Matrix4,
}

impl StateSpaceModel {
    /// Build `A` and `M^-1` from mass, damping and stiffness.
    ///
    /// # Errors
    /// `InvalidMatrices` when the mass matrix is singular or non-finite.
    pub fn build(mass: &Matrix4, damping: &Matrix4, stiffness: &Matrix4) -> RotorResult<Self> {
        let m_inv = mass
            .try_inverse()
            .filter(|inv| inv.iter().all(|v| v.is_finite()))
            .ok_or_else(|| RotorError::InvalidMatrices {
                what: "mass matrix is singular".to_string(),
            })?;

        let mut a = Matrix8::zeros();
        a.fixed_view_mut::<DOF, DOF>(0, DOF)
            .copy_from(&Matrix4::identity());
        a.fixed_view_mut::<DOF, DOF>(DOF, 0)
            .copy_from(&(-(m_inv * stiffness)));
        a.fixed_view_mut::<DOF, DOF>(DOF, DOF)
            .copy_from(&(-(m_inv * damping)));

        Ok(Self { a, m_inv })
    }

    pub fn from_matrices(matrices: &SystemMatrices) -> RotorResult<Self> {
        Self::build(&matrices.mass, &matrices.damping, &matrices.stiffness)
    }

    pub fn a(&self) -> &Matrix8 {
        &self.a
    }

    pub fn m_inv(&self) -> &Matrix4 {
        &self.m_inv
    }

    /// Map generalised forces `F = [Fxj, Fxm, Fyj, Fym]` to `[0; M^-1 F]`.
    pub fn forcing(&self, force: &Vector4<f64>) -> SVector<f64, STATE_DIM> {
        let mut out = SVector::<f64, STATE_DIM>::zeros();
        out.fixed_rows_mut::<DOF>(DOF)
            .copy_from(&(self.m_inv * force));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> StateSpaceModel {
        let m = SystemMatrices::jeffcott(1e-5, 0.1, 3.0, 1e5).unwrap();
        StateSpaceModel::from_matrices(&m).unwrap()
    }

    #[test]
    fn block_structure() {
        let ss = model();
        let a = ss.a();

        for i in 0..DOF {
            for j in 0..DOF {
                assert_eq!(a[(i, j)], 0.0);
                assert_eq!(a[(i, DOF + j)], if i == j { 1.0 } else { 0.0 });
            }
        }
        // journal x row: -C/mj
        assert!((a[(DOF, 0)] + 1e5 / 1e-5).abs() < 1e-3);
        assert!((a[(DOF, 1)] - 1e5 / 1e-5).abs() < 1e-3);
        // disc y row: -D/m
        assert!((a[(DOF + 3, DOF + 3)] + 3.0 / 0.1).abs() < 1e-12);
        assert!((a[(DOF + 3, DOF + 2)] - 3.0 / 0.1).abs() < 1e-12);
    }

    #[test]
    fn forcing_scales_by_inverse_mass() {
        let ss = model();
        let f = ss.forcing(&Vector4::new(1e-5, 0.2, 0.0, -0.1));
        assert_eq!(f.fixed_rows::<DOF>(0).amax(), 0.0);
        assert!((f[DOF] - 1.0).abs() < 1e-12);
        assert!((f[DOF + 1] - 2.0).abs() < 1e-12);
        assert!((f[DOF + 3] + 1.0).abs() < 1e-12);
    }

    #[test]
    fn singular_mass_is_rejected() {
        let z = Matrix4::zeros();
        let err = StateSpaceModel::build(&z, &z, &z).unwrap_err();
        assert!(matches!(err, RotorError::InvalidMatrices { .. }));
    }
}
