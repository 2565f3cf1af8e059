//! Bearing geometry and lubricant.

use rd_core::ensure_positive;
use rd_core::units::{DynVisc, Length};

use crate::error::{BearingError, BearingResult};

/// Plain cylindrical journal bearing, immutable for a run.
///
/// All values are stored in SI units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BearingGeometry {
    /// Axial width B (m)
    width: f64,
    /// Journal diameter D (m)
    diameter: f64,
    /// Radial clearance C (m)
    clearance: f64,
    /// Dynamic oil viscosity (Pa·s)
    viscosity: f64,
}

impl BearingGeometry {
    /// Create a geometry from unit-checked quantities.
    ///
    /// # Errors
    /// Fails on non-positive or non-finite values, or when `B/D >= 1`
    /// (outside short-bearing theory).
    pub fn new(
        width: Length,
        diameter: Length,
        clearance: Length,
        viscosity: DynVisc,
    ) -> BearingResult<Self> {
        Self::from_si(width.value, diameter.value, clearance.value, viscosity.value)
    }

    /// Create a geometry from raw SI values.
    pub fn from_si(
        width: f64,
        diameter: f64,
        clearance: f64,
        viscosity: f64,
    ) -> BearingResult<Self> {
        let width = ensure_positive(width, "bearing width")?;
        let diameter = ensure_positive(diameter, "bearing diameter")?;
        let clearance = ensure_positive(clearance, "radial clearance")?;
        let viscosity = ensure_positive(viscosity, "oil viscosity")?;

        let b2d = width / diameter;
        if b2d >= 1.0 {
            return Err(BearingError::NotShortBearing { b2d });
        }

        Ok(Self {
            width,
            diameter,
            clearance,
            viscosity,
        })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn diameter(&self) -> f64 {
        self.diameter
    }

    pub fn radius(&self) -> f64 {
        0.5 * self.diameter
    }

    pub fn clearance(&self) -> f64 {
        self.clearance
    }

    pub fn viscosity(&self) -> f64 {
        self.viscosity
    }

    /// Width/diameter ratio B/D.
    pub fn b2d(&self) -> f64 {
        self.width / self.diameter
    }

    /// Force per unit reference speed, `eta * B * D * (D / 2C)^2` (N·s).
    ///
    /// Multiplying by the reference speed gives the newtons that correspond
    /// to a dimensionless film force of 1.
    pub fn force_scale(&self) -> f64 {
        let relative = self.diameter / (2.0 * self.clearance);
        self.viscosity * self.width * self.diameter * relative * relative
    }

    /// Pure squeeze damping of a centred journal, `pi eta B^3 R / (2 C^3)` (N·s/m).
    pub fn centred_squeeze_damping(&self) -> f64 {
        std::f64::consts::PI * self.viscosity * self.width.powi(3) * self.radius()
            / (2.0 * self.clearance.powi(3))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rd_core::units::{mm, pa_s, um};

    fn nominal() -> BearingGeometry {
        BearingGeometry::new(mm(3.5), mm(7.0), um(15.0), pa_s(1e-2)).unwrap()
    }

    #[test]
    fn derived_quantities() {
        let g = nominal();
        assert!((g.b2d() - 0.5).abs() < 1e-12);
        assert!((g.radius() - 3.5e-3).abs() < 1e-15);

        let expected = 1e-2 * 3.5e-3 * 7e-3 * (7e-3 / 30e-6_f64).powi(2);
        assert!((g.force_scale() - expected).abs() < 1e-12 * expected);
        assert!((g.centred_squeeze_damping() - 698.42).abs() < 0.01);
    }

    #[test]
    fn rejects_long_bearing() {
        let err = BearingGeometry::from_si(8e-3, 7e-3, 15e-6, 1e-2).unwrap_err();
        assert!(matches!(err, BearingError::NotShortBearing { .. }));
    }

    #[test]
    fn rejects_non_physical_values() {
        assert!(BearingGeometry::from_si(3.5e-3, 7e-3, 0.0, 1e-2).is_err());
        assert!(BearingGeometry::from_si(3.5e-3, 7e-3, 15e-6, -1.0).is_err());
        assert!(BearingGeometry::from_si(f64::NAN, 7e-3, 15e-6, 1e-2).is_err());
    }
}
