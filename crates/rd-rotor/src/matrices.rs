//! Mass, damping and stiffness matrices of the symmetric rotor.

use nalgebra::SMatrix;
use rd_core::{ensure_finite, ensure_positive};

use crate::error::{RotorError, RotorResult};
use crate::state::{DOF, XJ, XM, YJ, YM};

pub type Matrix4 = SMatrix<f64, DOF, DOF>;

/// Second-order model `M q'' + D q' + C q = F` in the coordinates
/// `q = [xj, xm, yj, ym]`.
#[derive(Clone, Debug, PartialEq)]
pub struct SystemMatrices {
    pub mass: Matrix4,
    pub damping: Matrix4,
    pub stiffness: Matrix4,
}

impl SystemMatrices {
    /// Jeffcott rotor: journal and disc masses coupled by a massless shaft.
    ///
    /// The shaft acts on the relative displacement between journal and disc
    /// in each lateral direction:
    ///
    /// ```text
    /// k * [[ 1, -1],
    ///      [-1,  1]]
    /// ```
    ///
    /// # Errors
    /// Masses must be positive, damping and stiffness non-negative.
    pub fn jeffcott(
        journal_mass: f64,
        mass: f64,
        damping: f64,
        stiffness: f64,
    ) -> RotorResult<Self> {
        let journal_mass = ensure_positive(journal_mass, "journal mass")?;
        let mass = ensure_positive(mass, "rotor mass")?;
        let damping = non_negative(damping, "shaft damping")?;
        let stiffness = non_negative(stiffness, "shaft stiffness")?;

        let matrices = Self {
            mass: Matrix4::from_diagonal(&nalgebra::Vector4::new(
                journal_mass,
                mass,
                journal_mass,
                mass,
            )),
            damping: relative_coupling(damping),
            stiffness: relative_coupling(stiffness),
        };
        matrices.validate()?;
        Ok(matrices)
    }

    /// Check symmetry, positive semi-definiteness and a positive mass diagonal.
    pub fn validate(&self) -> RotorResult<()> {
        for i in 0..DOF {
            if !(self.mass[(i, i)].is_finite() && self.mass[(i, i)] > 0.0) {
                return Err(RotorError::InvalidMatrices {
                    what: format!("mass diagonal entry {i} must be positive"),
                });
            }
        }
        for (name, m) in [
            ("mass", &self.mass),
            ("damping", &self.damping),
            ("stiffness", &self.stiffness),
        ] {
            check_symmetric_psd(name, m)?;
        }
        Ok(())
    }
}

fn non_negative(v: f64, what: &'static str) -> RotorResult<f64> {
    let v = ensure_finite(v, what)?;
    if v < 0.0 {
        return Err(RotorError::InvalidMatrices {
            what: format!("{what} must not be negative, got {v}"),
        });
    }
    Ok(v)
}

fn relative_coupling(k: f64) -> Matrix4 {
    let mut m = Matrix4::zeros();
    for (a, b) in [(XJ, XM), (YJ, YM)] {
        m[(a, a)] = k;
        m[(b, b)] = k;
        m[(a, b)] = -k;
        m[(b, a)] = -k;
    }
    m
}

fn check_symmetric_psd(name: &str, m: &Matrix4) -> RotorResult<()> {
    if !m.iter().all(|v| v.is_finite()) {
        return Err(RotorError::InvalidMatrices {
            what: format!("{name} matrix has non-finite entries"),
        });
    }
    let scale = m.amax().max(f64::MIN_POSITIVE);
    let tol = 1e-12 * scale;

    if (m - m.transpose()).amax() > tol {
        return Err(RotorError::InvalidMatrices {
            what: format!("{name} matrix is not symmetric"),
        });
    }
    let min_eigen = m.symmetric_eigenvalues().min();
    if min_eigen < -tol {
        return Err(RotorError::InvalidMatrices {
            what: format!("{name} matrix is not positive semi-definite (eigenvalue {min_eigen})"),
        });
    }
    Ok(())
}
