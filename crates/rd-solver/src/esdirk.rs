//! Adaptive ESDIRK32 stiff integrator.
//!
//! ESDIRK3(2)4L[2]SA of Kennedy & Carpenter: four stages, L-stable and
//! stiffly accurate, order 3 with an embedded order-2 solution. The first
//! stage is explicit and reuses the slope at the start of the step; the
//! three implicit stages share the diagonal coefficient `gamma ~ 0.4359`
//! and are solved by simplified Newton on `I - h gamma J`.
//!
//! The Jacobian is rebuilt by finite differences once per accepted step and
//! reused across rejected attempts. The local error estimate is filtered
//! through the same factorised iteration matrix, which keeps it bounded on
//! stiff components.

use std::time::Duration;

use nalgebra::{DMatrix, DVector, Dyn, LU};
use rd_core::{Timer, Tolerances};

use crate::dense::HermiteStep;
use crate::error::{IncompleteReason, SolverError, SolverResult};
use crate::jacobian::{central_difference_jacobian, finite_difference_jacobian};
use crate::newton::{NewtonConfig, simplified_newton};
use crate::system::OdeSystem;

const STAGES: usize = 4;
const GAMMA: f64 = 1767732205903.0 / 4055673282236.0;
const C: [f64; STAGES] = [0.0, 2.0 * GAMMA, 3.0 / 5.0, 1.0];
const A: [[f64; STAGES]; STAGES] = [
    [0.0, 0.0, 0.0, 0.0],
    [GAMMA, GAMMA, 0.0, 0.0],
    [
        2746238789719.0 / 10658868560708.0,
        -640167445237.0 / 6845629431997.0,
        GAMMA,
        0.0,
    ],
    [
        1471266399579.0 / 7840856788654.0,
        -4482444167858.0 / 7529755066697.0,
        11266239266428.0 / 11593286722821.0,
        GAMMA,
    ],
];
/// Embedded second-order weights.
const B_HAT: [f64; STAGES] = [
    2756255671327.0 / 12835298489170.0,
    -10771552573575.0 / 22201958757719.0,
    9247589265047.0 / 10645013368117.0,
    2193209047091.0 / 5459859503100.0,
];
/// `b - b_hat`; `b` is the last row of `A`.
const ERROR_WEIGHTS: [f64; STAGES] = [
    A[3][0] - B_HAT[0],
    A[3][1] - B_HAT[1],
    A[3][2] - B_HAT[2],
    A[3][3] - B_HAT[3],
];

const SAFETY: f64 = 0.9;
const MIN_FACTOR: f64 = 0.2;
const MAX_FACTOR: f64 = 5.0;
const NEWTON_CUTBACK: f64 = 0.25;

/// How the integrator builds the Jacobian.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum JacobianKind {
    /// Forward differences, one extra evaluation per state.
    #[default]
    Forward,
    /// Central differences, two extra evaluations per state.
    Central,
}

/// Options for an integration run.
#[derive(Clone, Debug)]
pub struct IntegratorOptions {
    /// Relative tolerance
    pub rtol: f64,
    /// Absolute tolerance, also the Jacobian perturbation floor
    pub atol: f64,
    /// Accepted plus rejected steps before giving up
    pub max_steps: usize,
    /// Smallest step the controller may request (seconds)
    pub min_step: f64,
    /// First trial step (seconds)
    pub initial_step: f64,
    /// Largest step (seconds)
    pub max_step: f64,
    /// Optional wall-clock budget
    pub wall_clock_limit: Option<Duration>,
    pub jacobian: JacobianKind,
    pub newton: NewtonConfig,
}

impl Default for IntegratorOptions {
    fn default() -> Self {
        Self {
            rtol: 1e-6,
            atol: 1e-6,
            max_steps: 100_000,
            min_step: 1e-14,
            initial_step: 1e-6,
            max_step: f64::INFINITY,
            wall_clock_limit: None,
            jacobian: JacobianKind::default(),
            newton: NewtonConfig::default(),
        }
    }
}

impl IntegratorOptions {
    pub fn validate(&self) -> SolverResult<()> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.rtol) || !positive(self.atol) {
            return Err(invalid("tolerances must be positive and finite"));
        }
        if self.max_steps == 0 {
            return Err(invalid("max_steps must be positive"));
        }
        if !(self.min_step.is_finite() && self.min_step >= 0.0) {
            return Err(invalid("min_step must be non-negative and finite"));
        }
        if !positive(self.initial_step) {
            return Err(invalid("initial_step must be positive and finite"));
        }
        if self.max_step.is_nan() || self.max_step <= 0.0 {
            return Err(invalid("max_step must be positive"));
        }
        if self.newton.max_iterations == 0 || !positive(self.newton.increment_tol) {
            return Err(invalid("Newton settings must be positive"));
        }
        Ok(())
    }

    fn tolerances(&self) -> Tolerances {
        Tolerances {
            abs: self.atol,
            rel: self.rtol,
        }
    }
}

fn invalid(what: &str) -> SolverError {
    SolverError::InvalidArg {
        what: what.to_string(),
    }
}

/// Counters collected during a run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IntegrationStats {
    pub accepted_steps: usize,
    pub rejected_steps: usize,
    /// Rejections caused by a stage iteration that did not converge
    pub newton_failures: usize,
    pub rhs_evaluations: usize,
    pub jacobian_evaluations: usize,
    pub lu_decompositions: usize,
    /// Size of the last accepted step (seconds)
    pub last_step: f64,
    pub wall_time_s: f64,
}

impl IntegrationStats {
    pub fn steps(&self) -> usize {
        self.accepted_steps + self.rejected_steps
    }
}

/// States at the requested output times.
#[derive(Clone, Debug)]
pub struct Solution {
    pub t: Vec<f64>,
    pub x: Vec<DVector<f64>>,
    pub stats: IntegrationStats,
}

/// Reported after every accepted step.
#[derive(Clone, Debug)]
pub struct StepProgress {
    pub t: f64,
    pub t_end: f64,
    pub fraction_complete: f64,
    pub accepted_steps: usize,
    pub rejected_steps: usize,
    pub step_size: f64,
}

/// Right-hand side with evaluation count and output checks.
struct Rhs<'a, S> {
    system: &'a S,
    evaluations: usize,
}

impl<S: OdeSystem> Rhs<'_, S> {
    fn eval(&mut self, t: f64, x: &DVector<f64>) -> SolverResult<DVector<f64>> {
        self.evaluations += 1;
        let dx = self
            .system
            .rhs(t, x)
            .map_err(|e| SolverError::Model {
                t,
                source: Box::new(e),
            })?;
        if dx.len() != x.len() {
            return Err(SolverError::Model {
                t,
                source: format!(
                    "derivative has {} components, state has {}",
                    dx.len(),
                    x.len()
                )
                .into(),
            });
        }
        if !dx.iter().all(|v| v.is_finite()) {
            return Err(SolverError::Model {
                t,
                source: "non-finite derivative".into(),
            });
        }
        Ok(dx)
    }
}

enum Attempt {
    Accepted {
        x: DVector<f64>,
        f: DVector<f64>,
        err: f64,
    },
    Rejected {
        err: f64,
    },
    NewtonFailed,
}

/// ESDIRK32 integrator.
#[derive(Clone, Debug, Default)]
pub struct Esdirk32 {
    options: IntegratorOptions,
}

impl Esdirk32 {
    pub fn new(options: IntegratorOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &IntegratorOptions {
        &self.options
    }

    /// Integrate from `t_eval[0]` to the last entry of `t_eval`.
    ///
    /// `t_eval` must be non-empty, finite and non-decreasing; the solution
    /// holds one state per entry.
    pub fn integrate<S: OdeSystem>(
        &self,
        system: &S,
        x0: &DVector<f64>,
        t_eval: &[f64],
    ) -> SolverResult<Solution> {
        self.integrate_with_progress(system, x0, t_eval, None)
    }

    /// Integrate and report each accepted step.
    pub fn integrate_with_progress<S: OdeSystem>(
        &self,
        system: &S,
        x0: &DVector<f64>,
        t_eval: &[f64],
        mut progress: Option<&mut dyn FnMut(StepProgress)>,
    ) -> SolverResult<Solution> {
        let opts = &self.options;
        opts.validate()?;
        validate_inputs(system.dim(), x0, t_eval)?;

        let timer = Timer::start("esdirk32");
        let tol = opts.tolerances();
        let t0 = t_eval[0];
        let t_end = t_eval[t_eval.len() - 1];

        let mut rhs = Rhs {
            system,
            evaluations: 0,
        };
        let mut stats = IntegrationStats::default();
        let mut out_t = Vec::with_capacity(t_eval.len());
        let mut out_x = Vec::with_capacity(t_eval.len());

        let mut t = t0;
        let mut x = x0.clone();
        let mut f = rhs.eval(t, &x)?;

        let mut next = 0;
        while next < t_eval.len() && t_eval[next] <= t0 {
            out_t.push(t_eval[next]);
            out_x.push(x.clone());
            next += 1;
        }

        let n = x.len();
        let identity = DMatrix::<f64>::identity(n, n);
        let mut h = opts.initial_step.min(opts.max_step);

        while t < t_end {
            let jac = self.jacobian(&mut rhs, t, &x, &f)?;
            stats.jacobian_evaluations += 1;
            if !jac.iter().all(|v| v.is_finite()) {
                return Err(SolverError::JacobianSolve {
                    what: format!("non-finite Jacobian entries at t={t}"),
                });
            }

            loop {
                self.check_budgets(&stats, &timer, t, t_end, h)?;

                let last = h >= t_end - t;
                let h_step = if last { t_end - t } else { h };
                let lu = (&identity - &jac * (h_step * GAMMA)).lu();
                stats.lu_decompositions += 1;

                match self.attempt(&mut rhs, &lu, t, &x, &f, h_step, tol)? {
                    Attempt::NewtonFailed => {
                        stats.rejected_steps += 1;
                        stats.newton_failures += 1;
                        h = h_step * NEWTON_CUTBACK;
                        tracing::warn!(t, h = h_step, "stage iteration failed, cutting step");
                    }
                    Attempt::Rejected { err } => {
                        stats.rejected_steps += 1;
                        h = h_step * step_factor(err);
                        tracing::debug!(t, h = h_step, err, "step rejected");
                    }
                    Attempt::Accepted {
                        x: x_new,
                        f: f_new,
                        err,
                    } => {
                        let t_new = if last { t_end } else { t + h_step };
                        let step = HermiteStep {
                            t0: t,
                            x0: &x,
                            f0: &f,
                            t1: t_new,
                            x1: &x_new,
                            f1: &f_new,
                        };
                        while next < t_eval.len() && t_eval[next] <= t_new {
                            out_t.push(t_eval[next]);
                            out_x.push(step.eval(t_eval[next]));
                            next += 1;
                        }

                        t = t_new;
                        x = x_new;
                        f = f_new;
                        stats.accepted_steps += 1;
                        stats.last_step = h_step;
                        h = (h_step * step_factor(err)).min(opts.max_step);

                        if let Some(cb) = progress.as_deref_mut() {
                            cb(StepProgress {
                                t,
                                t_end,
                                fraction_complete: fraction(t0, t, t_end),
                                accepted_steps: stats.accepted_steps,
                                rejected_steps: stats.rejected_steps,
                                step_size: h_step,
                            });
                        }
                        break;
                    }
                }
            }
        }

        stats.rhs_evaluations = rhs.evaluations;
        stats.wall_time_s = timer.elapsed_s();
        tracing::debug!(
            accepted = stats.accepted_steps,
            rejected = stats.rejected_steps,
            rhs_evaluations = stats.rhs_evaluations,
            "integration finished"
        );

        Ok(Solution {
            t: out_t,
            x: out_x,
            stats,
        })
    }

    fn jacobian<S: OdeSystem>(
        &self,
        rhs: &mut Rhs<'_, S>,
        t: f64,
        x: &DVector<f64>,
        f: &DVector<f64>,
    ) -> SolverResult<DMatrix<f64>> {
        let floor = self.options.atol;
        match self.options.jacobian {
            JacobianKind::Forward => finite_difference_jacobian(x, f, |xp| rhs.eval(t, xp), floor),
            JacobianKind::Central => central_difference_jacobian(x, |xp| rhs.eval(t, xp), floor),
        }
    }

    fn check_budgets(
        &self,
        stats: &IntegrationStats,
        timer: &Timer,
        t: f64,
        t_end: f64,
        h: f64,
    ) -> SolverResult<()> {
        let opts = &self.options;
        let reason = if stats.steps() >= opts.max_steps {
            Some(IncompleteReason::StepBudget {
                max_steps: opts.max_steps,
            })
        } else if h < opts.min_step || (t + h == t && h < t_end - t) {
            Some(IncompleteReason::StepTooSmall {
                h,
                min_step: opts.min_step,
            })
        } else {
            opts.wall_clock_limit
                .filter(|limit| timer.exceeded(*limit))
                .map(|limit| IncompleteReason::WallClock {
                    limit_s: limit.as_secs_f64(),
                })
        };

        match reason {
            Some(reason) => {
                tracing::warn!(t, t_end, %reason, "integration stopped");
                Err(SolverError::IntegrationIncomplete { t, t_end, reason })
            }
            None => Ok(()),
        }
    }

    /// One step attempt of size `h` from `(t, x)` with slope `f`.
    #[allow(clippy::too_many_arguments)]
    fn attempt<S: OdeSystem>(
        &self,
        rhs: &mut Rhs<'_, S>,
        lu: &LU<f64, Dyn, Dyn>,
        t: f64,
        x: &DVector<f64>,
        f: &DVector<f64>,
        h: f64,
        tol: Tolerances,
    ) -> SolverResult<Attempt> {
        let mut k: Vec<DVector<f64>> = Vec::with_capacity(STAGES);
        k.push(f.clone());
        let mut z = x.clone();
        let hg = h * GAMMA;

        for s in 1..STAGES {
            let mut base = x.clone();
            for (j, kj) in k.iter().enumerate() {
                base.axpy(h * A[s][j], kj, 1.0);
            }
            let ts = t + C[s] * h;

            let stage = simplified_newton(
                z,
                lu,
                |zi| {
                    let fz = rhs.eval(ts, zi)?;
                    Ok(&base + fz * hg - zi)
                },
                tol,
                &self.options.newton,
            )?;
            if !stage.converged {
                return Ok(Attempt::NewtonFailed);
            }
            z = stage.x;
            k.push(rhs.eval(ts, &z)?);
        }

        let mut e = DVector::zeros(x.len());
        for (w, ks) in ERROR_WEIGHTS.iter().zip(&k) {
            e.axpy(h * w, ks, 1.0);
        }
        let e = lu.solve(&e).ok_or_else(|| SolverError::JacobianSolve {
            what: format!("singular iteration matrix at t={t}, h={h}"),
        })?;
        let err = weighted_rms(&e, x, &z, tol);

        if err <= 1.0 {
            // stiffly accurate: the last stage is the new solution
            let f_new = k.swap_remove(STAGES - 1);
            Ok(Attempt::Accepted { x: z, f: f_new, err })
        } else {
            Ok(Attempt::Rejected { err })
        }
    }
}

fn validate_inputs(dim: usize, x0: &DVector<f64>, t_eval: &[f64]) -> SolverResult<()> {
    if x0.len() != dim {
        return Err(SolverError::InvalidArg {
            what: format!("initial state has {} components, system has {dim}", x0.len()),
        });
    }
    if !x0.iter().all(|v| v.is_finite()) {
        return Err(invalid("initial state must be finite"));
    }
    if t_eval.is_empty() {
        return Err(invalid("t_eval must not be empty"));
    }
    if !t_eval.iter().all(|t| t.is_finite()) {
        return Err(invalid("t_eval must be finite"));
    }
    if t_eval.windows(2).any(|w| w[1] < w[0]) {
        return Err(invalid("t_eval must be non-decreasing"));
    }
    Ok(())
}

/// RMS of `e` weighted by `atol + rtol * max(|x|, |z|)`.
fn weighted_rms(e: &DVector<f64>, x: &DVector<f64>, z: &DVector<f64>, tol: Tolerances) -> f64 {
    if e.is_empty() {
        return 0.0;
    }
    let sum: f64 = e
        .iter()
        .zip(x.iter().zip(z.iter()))
        .map(|(ei, (xi, zi))| {
            let scaled = ei / tol.weight(xi.abs().max(zi.abs()));
            scaled * scaled
        })
        .sum();
    (sum / e.len() as f64).sqrt()
}

fn step_factor(err: f64) -> f64 {
    if err == 0.0 {
        MAX_FACTOR
    } else if !err.is_finite() {
        MIN_FACTOR
    } else {
        (SAFETY * err.powf(-1.0 / 3.0)).clamp(MIN_FACTOR, MAX_FACTOR)
    }
}

fn fraction(t0: f64, t: f64, t_end: f64) -> f64 {
    if t_end > t0 {
        ((t - t0) / (t_end - t0)).clamp(0.0, 1.0)
    } else {
        1.0
    }
}
