//! GUTS individual-tolerance model: configuration state and evaluation entry.
//!
//! [`GutsModel`] is the object external fitting routines talk to. It holds
//! the exposure profile, observations, parameters, grid resolution,
//! distribution choice and tolerance sample, records a validation status per
//! setter, and evaluates the log-likelihood on demand.
//!
//! Key ideas:
//! - Setters never panic and never return an error value; they record a
//!   [`SetterStatus`] (returned for convenience) and keep the previous value
//!   of their field on failure.
//! - [`GutsModel::evaluate`] returns a tagged [`LoglikOutcome`];
//!   [`GutsModel::calc_loglikelihood`] maps it onto the legacy numeric
//!   contract (`0.0`, `-1000.0`, raw status values) for hosts that expect it.
//! - Scratch buffers and the random generator are owned by the instance and
//!   mutated through `&mut self`, so each model evaluates independently.
use crate::survival::{
    core::{
        distribution::ThresholdDistribution,
        exposure::ExposureProfile,
        observations::ObservationSeries,
        options::{GutsOptions, SampleRefresh},
        params::ModelParams,
        sampler::{SamplePlan, ToleranceSampler},
        status::{SetterSlot, SetterStatus, ValidationStatus},
        validation::{validate_grid_points, validate_sample_size, validate_thresholds},
        workspace::GutsScratch,
    },
    errors::{GutsResult, InvalidReason, LoglikOutcome},
    models::likelihood::{EngineInputs, integrate_survival, loglik_from_survival},
};
use log::{debug, trace};
use ndarray::{Array1, ArrayView1};

const DEFAULT_GRID_POINTS: usize = 10_000;
const DEFAULT_SAMPLE_LEN: usize = 10_000;

/// GUTS survival model with validated configuration and likelihood engine.
///
/// A freshly constructed model holds non-physical placeholders sized so that
/// nothing can index out of bounds; evaluating it yields
/// [`InvalidReason::DegenerateGrid`] because its observation horizon has
/// zero width.
#[derive(Debug, Clone)]
pub struct GutsModel {
    exposure: ExposureProfile,
    observations: ObservationSeries,
    params: ModelParams,
    grid_points: usize,
    distribution: ThresholdDistribution,
    sample_len: usize,
    sample: Array1<f64>,
    dist_params: Vec<f64>,
    /// An internally drawn sample must be refreshed before the next use.
    needs_sample: bool,
    dtau: f64,
    status: ValidationStatus,
    scratch: GutsScratch,
    sampler: ToleranceSampler,
    options: GutsOptions,
}

impl Default for GutsModel {
    fn default() -> Self {
        Self::new()
    }
}

impl GutsModel {
    /// Model with placeholder configuration and default options.
    pub fn new() -> Self {
        Self::with_options(GutsOptions::default())
    }

    /// Model with placeholder configuration and explicit options.
    pub fn with_options(options: GutsOptions) -> Self {
        let observations = ObservationSeries::placeholder();
        let scratch = GutsScratch::new(DEFAULT_GRID_POINTS, observations.len(), DEFAULT_SAMPLE_LEN);
        let mut model = GutsModel {
            exposure: ExposureProfile::placeholder(),
            observations,
            params: ModelParams::placeholder(),
            grid_points: DEFAULT_GRID_POINTS,
            distribution: ThresholdDistribution::Lognormal,
            sample_len: DEFAULT_SAMPLE_LEN,
            sample: Array1::from_elem(DEFAULT_SAMPLE_LEN, 1.0),
            dist_params: vec![1.0, 1.0],
            needs_sample: true,
            dtau: 0.0,
            status: ValidationStatus::new(),
            scratch,
            sampler: ToleranceSampler::new(options.seed),
            options,
        };
        model.refresh_dtau();
        model
    }

    /// Restart the model's generator from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.sampler.reseed(seed);
        self.options.seed = Some(seed);
    }

    // ---- Setters -----------------------------------------------------------

    /// Replace the exposure profile.
    ///
    /// Fails (keeping the stored profile) unless both sequences have the same
    /// length ≥ 3, the first time is 0 and times strictly increase.
    pub fn set_exposure(&mut self, values: ArrayView1<f64>, times: ArrayView1<f64>) -> SetterStatus {
        let result = ExposureProfile::new(values, times);
        let status = self.record(SetterSlot::Exposure, &result);
        if let Ok(profile) = result {
            self.exposure = profile;
        }
        status
    }

    /// Replace the observation series.
    ///
    /// On success the stored counts gain a terminal `0`, the survival scratch
    /// is resized and `dtau` is recomputed.
    pub fn set_observations(
        &mut self, counts: ArrayView1<i64>, times: ArrayView1<f64>,
    ) -> SetterStatus {
        let result = ObservationSeries::new(counts, times);
        let status = self.record(SetterSlot::Observations, &result);
        if let Ok(series) = result {
            self.scratch.resize_survival(series.len());
            self.observations = series;
            self.refresh_dtau();
        }
        status
    }

    /// Replace the parameter vector `[h_b, k_e, k_k, θ…]`.
    ///
    /// Entries from index 3 overwrite the distribution parameters and force a
    /// fresh draw on the next evaluation. An out-of-range rate is recorded as
    /// [`SetterStatus::OutOfRange`], whose legacy value is `-1000.0`.
    pub fn set_parameters(&mut self, par: ArrayView1<f64>) -> SetterStatus {
        let result = ModelParams::new(par, &self.params, self.options.parameter_check);
        let status = self.record(SetterSlot::Parameters, &result);
        if let Ok(params) = result {
            if params.has_distribution_params() {
                params.overwrite_distribution_params(&mut self.dist_params);
                self.needs_sample = true;
            }
            self.params = params;
        }
        status
    }

    /// Replace the grid resolution `M` (must be > 4).
    ///
    /// On success the damage scratch is reallocated to `M` zeros and `dtau`
    /// is recomputed.
    pub fn set_grid_points(&mut self, points: usize) -> SetterStatus {
        let result = validate_grid_points(points);
        let status = self.record(SetterSlot::GridResolution, &result);
        if let Ok(points) = result {
            self.grid_points = points;
            self.scratch.reset_damage(points);
            self.refresh_dtau();
        }
        status
    }

    /// Select the tolerance distribution by name.
    ///
    /// `"lognormal"` requires a draw before the next evaluation;
    /// `"empirical"` keeps the stored sample. Any other name is rejected and
    /// the distribution falls back to [`ThresholdDistribution::None`].
    pub fn set_distribution(&mut self, name: &str) -> SetterStatus {
        let result = name.parse::<ThresholdDistribution>();
        let status = self.record(SetterSlot::Distribution, &result);
        match result {
            Ok(ThresholdDistribution::Empirical) => {
                self.distribution = ThresholdDistribution::Empirical;
                self.needs_sample = false;
            }
            Ok(dist) => {
                self.distribution = dist;
                self.needs_sample = true;
            }
            Err(_) => self.distribution = ThresholdDistribution::None,
        }
        status
    }

    /// Replace the sample size `N` (must be > 4).
    pub fn set_sample_size(&mut self, len: usize) -> SetterStatus {
        let result = validate_sample_size(len);
        let status = self.record(SetterSlot::SampleSize, &result);
        if let Ok(len) = result {
            self.sample_len = len;
            self.needs_sample = true;
        }
        status
    }

    /// Supply the tolerance sample directly.
    ///
    /// The sample is sorted, the distribution becomes empirical, `N` becomes
    /// the sample length, and one sampler pass runs immediately. Requires
    /// more than 4 finite, non-negative values.
    pub fn set_sample(&mut self, sample: ArrayView1<f64>) -> SetterStatus {
        let result = validate_thresholds(sample);
        if result.is_err() {
            return self.record(SetterSlot::Sample, &result);
        }

        let mut sorted = sample.to_vec();
        sorted.sort_by(f64::total_cmp);
        self.sample = Array1::from_vec(sorted);
        self.sample_len = self.sample.len();
        self.distribution = ThresholdDistribution::Empirical;
        self.needs_sample = false;
        self.status.record(SetterSlot::Distribution, &Ok::<(), _>(()));
        self.status.record(SetterSlot::SampleSize, &Ok::<(), _>(()));

        let pass = self.run_sampler();
        self.record(SetterSlot::Sample, &pass)
    }

    // ---- Evaluation --------------------------------------------------------

    /// Evaluate the log-likelihood of the stored observations.
    ///
    /// Preconditions are checked in order, each short-circuiting:
    /// 1. last observation time ≤ last exposure time,
    /// 2. `dtau > 0`,
    /// 3. the sampler provides a sample,
    /// 4. every setter succeeded.
    ///
    /// The configuration is never modified; the scratch buffers, the sample
    /// (when redrawn) and the generator state are.
    pub fn evaluate(&mut self) -> LoglikOutcome {
        let outcome = self.evaluate_inner();
        if let LoglikOutcome::Invalid(reason) = &outcome {
            debug!("GUTS evaluation not possible: {reason}");
        }
        outcome
    }

    fn evaluate_inner(&mut self) -> LoglikOutcome {
        if self.observations.last_time() > self.exposure.horizon() {
            return LoglikOutcome::Invalid(InvalidReason::HorizonExceedsExposure);
        }
        if !(self.dtau > 0.0) {
            return LoglikOutcome::Invalid(InvalidReason::DegenerateGrid);
        }
        if let Err(err) = self.run_sampler() {
            debug!("tolerance sampling failed: {err}");
            return LoglikOutcome::Invalid(InvalidReason::SamplingFailed);
        }
        if let Some((slot, status)) = self.status.first_failure() {
            return LoglikOutcome::Invalid(InvalidReason::SetterFailed { slot, status });
        }

        let inputs = EngineInputs {
            exposure: &self.exposure,
            observations: &self.observations,
            params: &self.params,
            sample: self.sample.view(),
            grid_points: self.grid_points,
            dtau: self.dtau,
        };
        integrate_survival(&inputs, &mut self.scratch);
        loglik_from_survival(
            self.observations.counts(),
            self.scratch.survival.view(),
            self.options.min_survival_drop,
        )
    }

    /// Evaluate and map onto the legacy numeric contract.
    pub fn calc_loglikelihood(&mut self) -> f64 {
        self.evaluate().to_legacy()
    }

    /// Set the parameter vector, then evaluate.
    ///
    /// A rejected vector is reported through the outcome
    /// ([`InvalidReason::SetterFailed`] for the parameter slot).
    pub fn loglik_at(&mut self, par: ArrayView1<f64>) -> LoglikOutcome {
        self.set_parameters(par);
        self.evaluate()
    }

    // ---- Accessors ---------------------------------------------------------

    pub fn concentrations(&self) -> ArrayView1<'_, f64> {
        self.exposure.values()
    }

    pub fn concentration_times(&self) -> ArrayView1<'_, f64> {
        self.exposure.times()
    }

    /// Survivor counts including the terminal zero.
    pub fn survivors(&self) -> ArrayView1<'_, i64> {
        self.observations.counts()
    }

    pub fn survivor_times(&self) -> ArrayView1<'_, f64> {
        self.observations.times()
    }

    pub fn parameters(&self) -> ArrayView1<'_, f64> {
        self.params.as_array()
    }

    pub fn grid_points(&self) -> usize {
        self.grid_points
    }

    pub fn distribution(&self) -> ThresholdDistribution {
        self.distribution
    }

    pub fn sample_len(&self) -> usize {
        self.sample_len
    }

    /// Current tolerance sample (sorted ascending after a successful pass).
    pub fn sample(&self) -> ArrayView1<'_, f64> {
        self.sample.view()
    }

    pub fn distribution_params(&self) -> &[f64] {
        &self.dist_params
    }

    pub fn dtau(&self) -> f64 {
        self.dtau
    }

    pub fn status(&self) -> &ValidationStatus {
        &self.status
    }

    /// `true` when every setter succeeded.
    pub fn is_ready(&self) -> bool {
        self.status.is_ready()
    }

    /// Damage trajectory of the last evaluation (zeros after a grid change).
    pub fn damage(&self) -> ArrayView1<'_, f64> {
        self.scratch.damage.view()
    }

    /// Survival probabilities of the last evaluation, terminal zero included.
    pub fn survival(&self) -> ArrayView1<'_, f64> {
        self.scratch.survival.view()
    }

    pub fn options(&self) -> &GutsOptions {
        &self.options
    }

    /// Emit the diagnostic dump at trace level.
    pub fn log_state(&self) {
        trace!("GUTS model state:\n{self}");
    }

    // ---- Internals ---------------------------------------------------------

    fn record<T>(&mut self, slot: SetterSlot, result: &GutsResult<T>) -> SetterStatus {
        if let Err(err) = result {
            debug!("rejected {slot} update: {err}");
        }
        self.status.record(slot, result)
    }

    fn refresh_dtau(&mut self) {
        let span = self.observations.last_time() - self.observations.first_time();
        self.dtau = span / self.grid_points as f64;
    }

    fn run_sampler(&mut self) -> GutsResult<()> {
        let plan = SamplePlan {
            distribution: self.distribution,
            size: self.sample_len,
            dist_params: &self.dist_params,
            resample: self.needs_sample || self.options.refresh == SampleRefresh::EveryEvaluation,
            placeholder: self.options.placeholder_threshold,
            location_bound: self.options.location_bound,
        };
        self.sampler.populate(&plan, &mut self.sample)?;
        if self.distribution == ThresholdDistribution::Lognormal {
            self.needs_sample = false;
        }
        Ok(())
    }
}

fn summary<T: std::fmt::Display>(view: ArrayView1<T>) -> String {
    let n = view.len();
    if n == 0 {
        return "size: 0".to_string();
    }
    format!("first: {}, last: {}, size: {n}", view[0], view[n - 1])
}

/// Diagnostic dump: endpoints and sizes of every stored sequence.
impl std::fmt::Display for GutsModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "concentrations: {}", summary(self.concentrations()))?;
        writeln!(f, "concentration times: {}", summary(self.concentration_times()))?;
        writeln!(f, "survivors: {}", summary(self.survivors()))?;
        writeln!(f, "survivor times: {}", summary(self.survivor_times()))?;
        writeln!(f, "grid points: {}", self.grid_points)?;
        writeln!(f, "sample size: {}", self.sample_len)?;
        writeln!(f, "distribution: {}", self.distribution)?;
        writeln!(f, "parameters: {}", summary(self.parameters()))?;
        writeln!(f, "sample: {}", summary(self.sample()))?;
        writeln!(f, "damage: {}", summary(self.damage()))?;
        writeln!(f, "survival: {}", summary(self.survival()))?;
        writeln!(f, "excess sum: {}", summary(self.scratch.excess_sum.view()))?;
        writeln!(f, "excess count: {}", summary(self.scratch.excess_count.view()))?;
        write!(f, "dtau: {}", self.dtau)
    }
}
