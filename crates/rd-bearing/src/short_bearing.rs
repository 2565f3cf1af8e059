//! Short-bearing film force law with squeeze terms.
//!
//! Dimensionless inputs:
//! - `eps`: eccentricity ratio in `[0, 1)`
//! - `eps_s`: radial speed of the journal centre, `eps' / omega`
//! - `phi_s`: whirl speed of the line of centres, `phi' / omega`
//! - `b2d`: width/diameter ratio (short-bearing theory needs `b2d < 1`)
//!
//! With `E = 2 eps_s` and `G = 2 phi_s` the positive-pressure region of the
//! film starts at the auxiliary angle `kappa_1`, `tan(kappa_1) = E / (eps (1 - G))`.
//! The pressure moments `I1..I3` are closed-form integrals over that region.
//!
//! ## Output frames
//!
//! The two case families report in different frames. With `Jc`, `Js` the
//! cosine/sine moments of the positive film pressure about the line of
//! centres:
//!
//! ```text
//! PureRotation:   (fr, fphi) = ( Jc,          Js         )
//! squeeze cases:  (fr, fphi) = (-b2d^2 * Js, -b2d^2 * Jc )
//! ```
//!
//! [`FilmForce::polar`] maps both onto one physical radial/tangential pair.

use std::f64::consts::PI;

use crate::error::{BearingError, BearingResult};

/// Stand-in for `tan(kappa_1)` at the `G == 1` singularity.
pub const SINGULAR_TAN: f64 = 1e16;

/// Closed-form branch of the force law.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ForceCase {
    /// No squeeze motion: `E == 0` and `G == 0`.
    PureRotation,
    /// `G > 1`.
    SqueezeGreaterOne,
    /// `G == 1` and `E > 0`.
    SqueezeEqualOnePositive,
    /// `G == 1` and `E <= 0`.
    SqueezeEqualOneNegative,
    /// `G < 1`, and anything the comparisons above reject (NaN `G`).
    SqueezeLessOne,
}

impl ForceCase {
    /// Select the branch from `E = 2 eps_s` and `G = 2 phi_s`.
    pub fn classify(e: f64, g: f64) -> Self {
        if e == 0.0 && g == 0.0 {
            ForceCase::PureRotation
        } else if g > 1.0 {
            ForceCase::SqueezeGreaterOne
        } else if g == 1.0 {
            if e > 0.0 {
                ForceCase::SqueezeEqualOnePositive
            } else {
                ForceCase::SqueezeEqualOneNegative
            }
        } else {
            ForceCase::SqueezeLessOne
        }
    }

    pub fn is_squeeze(self) -> bool {
        self != ForceCase::PureRotation
    }

    /// Auxiliary angle `kappa_1`; `None` for pure rotation.
    pub fn kappa(self, eps: f64, e: f64, g: f64) -> Option<Kappa> {
        match self {
            ForceCase::PureRotation => None,
            ForceCase::SqueezeGreaterOne => Some(Kappa::from_tan(e / (eps * (1.0 - g)))),
            ForceCase::SqueezeEqualOnePositive => Some(Kappa::from_tan(-SINGULAR_TAN).negated()),
            ForceCase::SqueezeEqualOneNegative => Some(Kappa::from_tan(SINGULAR_TAN).negated()),
            ForceCase::SqueezeLessOne => {
                Some(Kappa::from_tan(e / (eps * (1.0 - g))).negated())
            }
        }
    }

    /// Evaluate this branch. `e` and `g` are the doubled speeds.
    pub fn force(self, eps: f64, e: f64, g: f64, b2d: f64) -> (f64, f64) {
        match self.kappa(eps, e, g) {
            None => pure_rotation(eps),
            Some(kappa) => squeeze(eps, e, g, b2d, kappa),
        }
    }
}

/// `cos`/`sin` of the auxiliary angle `kappa_1`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Kappa {
    pub cos: f64,
    pub sin: f64,
}

impl Kappa {
    /// Right-triangle identities, positive branch.
    pub fn from_tan(tan: f64) -> Self {
        let root = (1.0 + tan * tan).sqrt();
        Self {
            cos: 1.0 / root,
            sin: tan / root,
        }
    }

    /// Opposite quadrant: both components change sign.
    pub fn negated(self) -> Self {
        Self {
            cos: -self.cos,
            sin: -self.sin,
        }
    }

    /// `pi` when `sin / (1 + cos) < 0`, else `0`.
    ///
    /// Keeps `atan(sqrt(1 - eps^2) / (eps sin))` on the branch continuous
    /// with the film boundary. A NaN quotient selects `0`.
    pub fn phase(self) -> f64 {
        if self.sin / (1.0 + self.cos) < 0.0 {
            PI
        } else {
            0.0
        }
    }
}

/// Ocvirk solution without squeeze motion.
pub fn pure_rotation(eps: f64) -> (f64, f64) {
    let eps2 = eps * eps;
    let fr = 2.0 * eps2 / (1.0 - eps2).powi(2);
    let fphi = -0.5 * PI * eps / (1.0 - eps2).powf(1.5);
    (fr, fphi)
}

/// Rotation plus squeeze, for a given `kappa_1`.
pub fn squeeze(eps: f64, e: f64, g: f64, b2d: f64, kappa: Kappa) -> (f64, f64) {
    let (i1, i2, i3) = pressure_integrals(eps, kappa);
    let b2d2 = b2d * b2d;
    let fr = b2d2 * (i2 * eps * (1.0 - g) - e * i1);
    let fphi = b2d2 * (i1 * eps * (1.0 - g) + e * (i2 - i3));
    (fr, fphi)
}

/// Sommerfeld-type integrals `(I1, I2, I3)` over the positive film region.
pub fn pressure_integrals(eps: f64, kappa: Kappa) -> (f64, f64, f64) {
    let Kappa { cos, sin } = kappa;
    let eps2 = eps * eps;
    let cos2 = cos * cos;
    let one_minus = 1.0 - eps2;
    let film = (1.0 - eps2 * cos2).powi(2);
    let arc = kappa.phase() + (one_minus.sqrt() / eps / sin).atan();

    let i1 = 2.0 * eps * cos.powi(3) / film;
    let i2 = -eps * sin * (1.0 - (2.0 - eps2) * cos2) / one_minus / film
        + arc / one_minus.powf(1.5);
    let i3 = -eps * sin * (4.0 - eps2 * (1.0 + (2.0 + eps2) * cos2)) / one_minus.powi(2) / film
        + arc * (2.0 + eps2) / one_minus.powf(2.5);
    (i1, i2, i3)
}

/// Raw force law: dimensionless `(fr, fphi)`.
///
/// Never clamps. Inputs outside the domain (`eps -> 1`, `eps == 0` with
/// squeeze) give non-finite output; use [`evaluate`] for a checked call.
pub fn force(eps: f64, eps_s: f64, phi_s: f64, b2d: f64) -> (f64, f64) {
    let e = 2.0 * eps_s;
    let g = 2.0 * phi_s;
    ForceCase::classify(e, g).force(eps, e, g, b2d)
}

/// Checked force law result.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FilmForce {
    pub case: ForceCase,
    pub fr: f64,
    pub fphi: f64,
    pub b2d: f64,
}

impl FilmForce {
    /// Physical `(radial, tangential)` components in the line-of-centres frame.
    ///
    /// Radial is positive away from the bearing centre, tangential positive
    /// in the sense of rotation. Both are in units of the force scale
    /// `eta * omega * B * D * (D / 2C)^2`.
    pub fn polar(&self) -> (f64, f64) {
        match self.case {
            ForceCase::PureRotation => {
                let b2d2 = self.b2d * self.b2d;
                (-b2d2 * self.fr, -b2d2 * self.fphi)
            }
            _ => (self.fphi, self.fr),
        }
    }
}

/// Evaluate the force law and classify domain violations.
pub fn evaluate(eps: f64, eps_s: f64, phi_s: f64, b2d: f64) -> BearingResult<FilmForce> {
    if !(eps_s.is_finite() && phi_s.is_finite() && b2d.is_finite()) {
        return Err(BearingError::DomainViolation {
            eps,
            what: "non-finite speed or width ratio",
        });
    }
    if !(0.0..1.0).contains(&eps) {
        return Err(BearingError::DomainViolation {
            eps,
            what: "eccentricity outside [0, 1)",
        });
    }

    let e = 2.0 * eps_s;
    let g = 2.0 * phi_s;
    let case = ForceCase::classify(e, g);
    if eps == 0.0 && case.is_squeeze() {
        return Err(BearingError::SingularInput { eps_s, phi_s });
    }

    let (fr, fphi) = case.force(eps, e, g, b2d);
    if !(fr.is_finite() && fphi.is_finite()) {
        return Err(BearingError::DomainViolation {
            eps,
            what: "non-finite film force",
        });
    }

    Ok(FilmForce {
        case,
        fr,
        fphi,
        b2d,
    })
}
