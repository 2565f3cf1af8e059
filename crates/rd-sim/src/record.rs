//! Run-up results and post-processing.

use serde::{Deserialize, Serialize};

use rd_rotor::state::{self, XJ, YJ};
use rd_rotor::{RotorState, SpeedProfile};
use rd_solver::IntegrationStats;

/// States at the output times of one run-up.
#[derive(Clone, Debug)]
pub struct RunUpRecord {
    /// Sample times (s)
    pub t: Vec<f64>,
    /// `[xj, xm, yj, ym, xj', xm', yj', ym']` at each sample
    pub states: Vec<RotorState>,
    pub stats: IntegrationStats,
    /// Radial bearing clearance (m)
    pub clearance: f64,
    pub speed: SpeedProfile,
}

/// Condensed result of a run, suitable for JSON export and sweep tables.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub name: String,
    pub samples: usize,
    pub t_end: f64,
    /// Rotor frequency at `t_end` (Hz)
    pub f_end: f64,
    pub max_eccentricity: f64,
    /// Rotor frequency where the journal eccentricity peaks (Hz)
    pub max_eccentricity_frequency: f64,
    pub final_eccentricity: f64,
    /// Largest disc displacement (m)
    pub peak_disc_amplitude: f64,
    /// Rotor frequency at the largest disc displacement (Hz)
    pub peak_disc_frequency: f64,
    pub accepted_steps: usize,
    pub rejected_steps: usize,
    pub rhs_evaluations: usize,
    pub jacobian_evaluations: usize,
    pub wall_time_s: f64,
}

impl RunUpRecord {
    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    /// Journal eccentricity ratio `|r_j| / C` at each sample.
    pub fn journal_eccentricity(&self) -> Vec<f64> {
        self.states
            .iter()
            .map(|s| s[XJ].hypot(s[YJ]) / self.clearance)
            .collect()
    }

    /// Journal centre path `(x, y)` (m).
    pub fn journal_orbit(&self) -> Vec<(f64, f64)> {
        self.states.iter().map(|s| (s[XJ], s[YJ])).collect()
    }

    /// Disc centre path `(x, y)` (m).
    pub fn disc_orbit(&self) -> Vec<(f64, f64)> {
        self.states.iter().map(state::mass_position).collect()
    }

    /// Rotor frequency (Hz) at each sample.
    pub fn frequency(&self) -> Vec<f64> {
        self.t.iter().map(|t| self.speed.frequency(*t)).collect()
    }

    /// Largest journal eccentricity ratio over the run.
    pub fn max_eccentricity(&self) -> f64 {
        self.journal_eccentricity()
            .into_iter()
            .fold(0.0, f64::max)
    }

    pub fn summary(&self, name: &str) -> RunSummary {
        let eps = self.journal_eccentricity();
        let (eps_idx, max_eps) = argmax(&eps);

        let disc: Vec<f64> = self
            .disc_orbit()
            .into_iter()
            .map(|(x, y)| x.hypot(y))
            .collect();
        let (disc_idx, peak_disc) = argmax(&disc);

        let t_end = self.t.last().copied().unwrap_or(0.0);
        let f_at = |i: usize| self.t.get(i).map_or(0.0, |t| self.speed.frequency(*t));

        RunSummary {
            name: name.to_string(),
            samples: self.len(),
            t_end,
            f_end: self.speed.frequency(t_end),
            max_eccentricity: max_eps,
            max_eccentricity_frequency: f_at(eps_idx),
            final_eccentricity: eps.last().copied().unwrap_or(0.0),
            peak_disc_amplitude: peak_disc,
            peak_disc_frequency: f_at(disc_idx),
            accepted_steps: self.stats.accepted_steps,
            rejected_steps: self.stats.rejected_steps,
            rhs_evaluations: self.stats.rhs_evaluations,
            jacobian_evaluations: self.stats.jacobian_evaluations,
            wall_time_s: self.stats.wall_time_s,
        }
    }

    /// One row per sample: time, rotor frequency, the 8 states and the
    /// journal eccentricity ratio.
    pub fn to_csv(&self) -> String {
        let mut csv = String::from("time_s,freq_hz,xj,xm,yj,ym,vxj,vxm,vyj,vym,eps\n");
        for (t, s) in self.t.iter().zip(&self.states) {
            csv.push_str(&format!("{},{}", t, self.speed.frequency(*t)));
            for v in s.iter() {
                csv.push_str(&format!(",{}", v));
            }
            csv.push_str(&format!(",{}\n", s[XJ].hypot(s[YJ]) / self.clearance));
        }
        csv
    }

    pub fn write_csv(&self, path: &std::path::Path) -> std::io::Result<()> {
        std::fs::write(path, self.to_csv())
    }
}

/// Index and value of the largest entry; `(0, 0.0)` when empty.
fn argmax(values: &[f64]) -> (usize, f64) {
    values
        .iter()
        .copied()
        .enumerate()
        .fold((0, 0.0), |best, (i, v)| if v > best.1 { (i, v) } else { best })
}
