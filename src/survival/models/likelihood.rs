//! GUTS likelihood engine: damage integration, survival curve, log-likelihood.
//!
//! This module holds the numerical core behind
//! [`GutsModel::evaluate`](crate::survival::models::GutsModel::evaluate):
//!
//! 1. [`integrate_survival`] walks the time grid from 0 to the last
//!    observation in steps of `dtau`, computing the damage trajectory with the
//!    closed-form segment solution, bucketing each damage value against the
//!    sorted tolerance sample, and evaluating the survival probability at
//!    every observation time.
//! 2. [`loglik_from_survival`] folds survival drops against observed death
//!    counts into a multinomial log-likelihood.
//!
//! Survival at observation time `t_i` is the sample average
//!
//! ```text
//! S(t_i) = exp(-h_b t_i) / N · Σ_u exp(k_k dtau (z_u F_u - E_u))
//! ```
//!
//! where `E_u` / `F_u` are the sum / count of damage values in tiers `u..N`.
//! Both suffix totals start at the full totals and are decremented as `u`
//! advances, so each observation costs O(N).
//!
//! Everything here assumes the caller has already run the precondition
//! checks (horizon, `dtau > 0`, sample present, all setters successful).
use crate::survival::{
    core::{
        damage::{Bucket, Segment, ThresholdCursor, damage_step},
        exposure::ExposureProfile,
        observations::ObservationSeries,
        params::ModelParams,
        workspace::GutsScratch,
    },
    errors::{InvalidReason, LoglikOutcome},
};
use ndarray::ArrayView1;

/// Read-only view of everything one evaluation consumes.
#[derive(Debug, Clone, Copy)]
pub struct EngineInputs<'a> {
    pub exposure: &'a ExposureProfile,
    pub observations: &'a ObservationSeries,
    pub params: &'a ModelParams,
    pub sample: ArrayView1<'a, f64>,
    pub grid_points: usize,
    pub dtau: f64,
}

fn segment(exposure: &ExposureProfile, k: usize) -> Segment {
    Segment {
        start: exposure.times()[k],
        concentration: exposure.values()[k],
        slope: exposure.slope(k),
    }
}

/// Integrate damage over the grid and fill `scratch.survival`.
///
/// Steps
/// -----
/// - Reset `damage[0]` and both excess accumulators.
/// - For each observation time, advance the grid while `τ < t_i` (and at
///   most `M` steps overall): compute `D_j` from the damage at the start of
///   the current exposure segment, locate it in the sample, add it to its
///   tier, then advance `τ` and, once `τ` passes the next breakpoint, move to
///   the next exposure segment.
/// - Evaluate `S(t_i)` from the accumulated tiers.
///
/// The last survival entry (terminal zero) is never written.
pub fn integrate_survival(inputs: &EngineInputs<'_>, scratch: &mut GutsScratch) {
    let EngineInputs { exposure, observations, params, sample, grid_points, dtau } = *inputs;
    let n = sample.len();
    let elimination = params.elimination();
    let dk = params.killing() * dtau;
    let background = params.background();
    let breakpoints = exposure.times();
    let last_segment = exposure.len() - 2;

    if scratch.damage.len() != grid_points {
        scratch.reset_damage(grid_points);
    }
    if scratch.survival.len() != observations.len() + 1 {
        scratch.resize_survival(observations.len());
    }
    scratch.damage[0] = 0.0;
    scratch.reset_excess(n);

    let mut j = 0;
    let mut seg_start = 0;
    let mut k = 0;
    let mut tau = 0.0;
    let mut seg = segment(exposure, 0);
    let mut cursor = ThresholdCursor::new();

    for (i, &t_obs) in observations.times().iter().enumerate() {
        while tau < t_obs && j < grid_points {
            let d = damage_step(&seg, scratch.damage[seg_start], elimination, tau);
            scratch.damage[j] = d;

            let tier = match cursor.locate(d, sample) {
                Bucket::Saturated => Some(n - 1),
                Bucket::Tier(b) => Some(b),
                Bucket::Below => None,
            };
            if let Some(b) = tier {
                scratch.excess_sum[b] += d;
                scratch.excess_count[b] += 1;
            }

            j += 1;
            tau += dtau;
            if k < last_segment && tau > breakpoints[k + 1] {
                k += 1;
                seg_start = j - 1;
                seg = segment(exposure, k);
            }
        }

        scratch.survival[i] = survival_at(scratch, sample, dk, background, t_obs);
    }
}

fn survival_at(
    scratch: &GutsScratch, sample: ArrayView1<f64>, dk: f64, background: f64, t_obs: f64,
) -> f64 {
    let n = sample.len();
    let mut e = scratch.excess_sum.sum();
    let mut f = scratch.excess_count.iter().sum::<u64>() as f64;

    let mut acc = (dk * (sample[0] * f - e)).exp();
    for u in 1..n {
        e -= scratch.excess_sum[u - 1];
        f -= scratch.excess_count[u - 1] as f64;
        acc += (dk * (sample[u] * f - e)).exp();
    }
    acc * (-background * t_obs).exp() / n as f64
}

/// Fold survival drops against death counts.
///
/// For each interval `i` (including the terminal one), with
/// `ΔS = S_i - S_{i+1}` and `Δy = y_i - y_{i+1}`:
///
/// - `ΔS < min_drop` and `Δy != 0` aborts with
///   [`InvalidReason::IncompatibleData`]; any partial sum is discarded.
/// - `ΔS < min_drop` and `Δy == 0` contributes nothing.
/// - Otherwise `Δy · ln(ΔS)` is added.
///
/// `counts` and `survival` must have the same length (observations + 1).
pub fn loglik_from_survival(
    counts: ArrayView1<i64>, survival: ArrayView1<f64>, min_drop: f64,
) -> LoglikOutcome {
    let mut out = 0.0;
    for i in 0..counts.len() - 1 {
        let diff_s = survival[i] - survival[i + 1];
        let diff_y = counts[i] - counts[i + 1];
        if diff_s < min_drop {
            if diff_y != 0 {
                return LoglikOutcome::Invalid(InvalidReason::IncompatibleData { index: i });
            }
        } else {
            out += diff_y as f64 * diff_s.ln();
        }
    }
    LoglikOutcome::Value(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{Array1, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - `integrate_survival` on exposure scenarios with known answers
    //   (no exposure, exposure far below every threshold, grid capping).
    // - `loglik_from_survival` accumulation and early abort.
    //
    // End-to-end behavior through `GutsModel` (setters, sampler, sentinel
    // mapping) is covered in the model tests and the integration suite.
    // -------------------------------------------------------------------------

    struct Fixture {
        exposure: ExposureProfile,
        observations: ObservationSeries,
        params: ModelParams,
        sample: Array1<f64>,
    }

    impl Fixture {
        fn new(concentration: f64, par: Array1<f64>) -> Self {
            let times = array![0.0, 5.0, 10.0];
            let exposure =
                ExposureProfile::new(Array1::from_elem(3, concentration).view(), times.view())
                    .unwrap();
            let observations =
                ObservationSeries::new(array![10_i64, 8, 5].view(), times.view()).unwrap();
            let params =
                ModelParams::new(par.view(), &ModelParams::placeholder(), Default::default())
                    .unwrap();
            let sample = Array1::linspace(1.0, 3.0, 20);
            Fixture { exposure, observations, params, sample }
        }

        fn inputs(&self, grid_points: usize) -> EngineInputs<'_> {
            EngineInputs {
                exposure: &self.exposure,
                observations: &self.observations,
                params: &self.params,
                sample: self.sample.view(),
                grid_points,
                dtau: 10.0 / grid_points as f64,
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // With zero exposure no damage accumulates, so survival is the
    // background term alone.
    //
    // Given
    // -----
    // - C ≡ 0, h_b = 0.02, k_e = 0.5, k_k = 1.0, M = 200.
    //
    // Expect
    // ------
    // - S = [1, e^{-0.1}, e^{-0.2}, 0]; damage trajectory all zero.
    fn zero_exposure_gives_background_survival() {
        let fx = Fixture::new(0.0, array![0.02, 0.5, 1.0]);
        let mut scratch = GutsScratch::new(200, 3, 20);

        integrate_survival(&fx.inputs(200), &mut scratch);

        assert_relative_eq!(scratch.survival[0], 1.0, max_relative = 1e-12);
        assert_relative_eq!(scratch.survival[1], (-0.1f64).exp(), max_relative = 1e-12);
        assert_relative_eq!(scratch.survival[2], (-0.2f64).exp(), max_relative = 1e-12);
        assert_eq!(scratch.survival[3], 0.0);
        assert!(scratch.damage.iter().all(|&d| d == 0.0));
        assert!(scratch.excess_count.iter().all(|&c| c == 0));
    }

    #[test]
    // Purpose
    // -------
    // Damage that stays below every threshold never contributes to the
    // hazard, whatever the killing rate.
    //
    // Given
    // -----
    // - C ≡ 0.5 (below z_min = 1), h_b = 0, k_k = 5.
    //
    // Expect
    // ------
    // - Survival stays 1 at every observation; damage rises toward 0.5.
    fn sub_threshold_damage_has_no_effect() {
        let fx = Fixture::new(0.5, array![0.0, 0.8, 5.0]);
        let mut scratch = GutsScratch::new(100, 3, 20);

        integrate_survival(&fx.inputs(100), &mut scratch);

        for i in 0..3 {
            assert_relative_eq!(scratch.survival[i], 1.0, max_relative = 1e-12);
        }
        let last = scratch.damage[99];
        assert!(last > 0.49 && last < 0.5);
    }

    #[test]
    // Purpose
    // -------
    // Supra-threshold exposure reduces survival monotonically over time and
    // more strongly for larger killing rates.
    //
    // Given
    // -----
    // - C ≡ 4 (above every threshold), k_e = 1, killing rates 0.1 and 0.5.
    //
    // Expect
    // ------
    // - Survival non-increasing in time for both.
    // - Pointwise, the larger killing rate never yields higher survival.
    fn survival_decreases_with_time_and_killing_rate() {
        let weak = Fixture::new(4.0, array![0.0, 1.0, 0.1]);
        let strong = Fixture::new(4.0, array![0.0, 1.0, 0.5]);
        let mut s_weak = GutsScratch::new(500, 3, 20);
        let mut s_strong = GutsScratch::new(500, 3, 20);

        integrate_survival(&weak.inputs(500), &mut s_weak);
        integrate_survival(&strong.inputs(500), &mut s_strong);

        for i in 0..3 {
            assert!(s_weak.survival[i + 1] <= s_weak.survival[i]);
            assert!(s_strong.survival[i] <= s_weak.survival[i]);
        }
        assert!(s_strong.survival[2] < s_weak.survival[2]);
    }

    #[test]
    fn damage_buffer_is_resized_to_grid() {
        let fx = Fixture::new(1.0, array![0.0, 1.0, 0.1]);
        let mut scratch = GutsScratch::new(10, 3, 20);
        integrate_survival(&fx.inputs(64), &mut scratch);
        assert_eq!(scratch.damage.len(), 64);
    }

    #[test]
    // Purpose
    // -------
    // Verify the fold: ΔS/Δy terms accumulate, and the terminal interval
    // uses the appended zero count and zero survival.
    //
    // Given
    // -----
    // - y = [10, 8, 5, 0], S = [1.0, 0.8, 0.5, 0.0].
    //
    // Expect
    // ------
    // - ℓ = 2 ln 0.2 + 3 ln 0.3 + 5 ln 0.5.
    fn loglik_accumulates_interval_terms() {
        let counts = array![10_i64, 8, 5, 0];
        let survival = array![1.0, 0.8, 0.5, 0.0];

        let out = loglik_from_survival(counts.view(), survival.view(), 0.001);

        let expected = 2.0 * 0.2f64.ln() + 3.0 * 0.3f64.ln() + 5.0 * 0.5f64.ln();
        assert_relative_eq!(out.value().unwrap(), expected, max_relative = 1e-12);
    }

    #[test]
    fn loglik_aborts_when_deaths_have_no_probability() {
        let counts = array![10_i64, 8, 5, 0];
        let survival = array![1.0, 0.9995, 0.5, 0.0];

        let out = loglik_from_survival(counts.view(), survival.view(), 0.001);

        assert_eq!(out, LoglikOutcome::Invalid(InvalidReason::IncompatibleData { index: 0 }));
    }

    #[test]
    fn loglik_skips_flat_intervals_without_deaths() {
        let counts = array![10_i64, 10, 4, 0];
        let survival = array![1.0, 1.0, 0.5, 0.0];

        let out = loglik_from_survival(counts.view(), survival.view(), 0.001);

        let expected = 6.0 * 0.5f64.ln() + 4.0 * 0.5f64.ln();
        assert_relative_eq!(out.value().unwrap(), expected, max_relative = 1e-12);
    }
}
