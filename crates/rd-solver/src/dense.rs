//! Dense output between accepted steps.

use nalgebra::DVector;

/// Cubic Hermite interpolant over one accepted step.
///
/// Matches the state and slope at both ends.
#[derive(Clone, Copy, Debug)]
pub struct HermiteStep<'a> {
    pub t0: f64,
    pub x0: &'a DVector<f64>,
    pub f0: &'a DVector<f64>,
    pub t1: f64,
    pub x1: &'a DVector<f64>,
    pub f1: &'a DVector<f64>,
}

impl HermiteStep<'_> {
    /// Interpolated state at `t`, expected in `[t0, t1]`.
    pub fn eval(&self, t: f64) -> DVector<f64> {
        let h = self.t1 - self.t0;
        if h == 0.0 {
            return self.x1.clone();
        }
        let s = (t - self.t0) / h;
        let s2 = s * s;
        let s3 = s2 * s;

        let h00 = 2.0 * s3 - 3.0 * s2 + 1.0;
        let h10 = s3 - 2.0 * s2 + s;
        let h01 = -2.0 * s3 + 3.0 * s2;
        let h11 = s3 - s2;

        self.x0 * h00 + self.f0 * (h10 * h) + self.x1 * h01 + self.f1 * (h11 * h)
    }
}
