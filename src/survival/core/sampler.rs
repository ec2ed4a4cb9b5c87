//! Tolerance sampler: draw or validate the sorted threshold sample.
//!
//! Purpose
//! -------
//! Provide the population sample of tolerance thresholds consumed by the
//! likelihood engine. Depending on the configured
//! [`ThresholdDistribution`] the sampler draws a fresh lognormal sample,
//! accepts a caller-supplied (empirical) sample as-is, or reports that no
//! usable distribution exists.
//!
//! Key behaviors
//! -------------
//! - Owns its own [`StdRng`]; there is no process-wide generator. Seeding is
//!   explicit (`Some(seed)`) or from OS entropy (`None`).
//! - Lognormal draws go through `statrs::distribution::LogNormal`, are sorted
//!   ascending, and replace the stored sample.
//! - `None` fills the sample with a constant placeholder and fails, so the
//!   engine never runs on a meaningless sample.
//!
//! Invariants & assumptions
//! ------------------------
//! - On success the sample has exactly `plan.size` entries in ascending order.
//! - Lognormal parameters: location finite (and `> 0` under
//!   [`LocationBound::StrictlyPositive`]), scale finite and `> 0`.
//! - A failed lognormal draw leaves the stored sample untouched.
use crate::survival::{
    core::{distribution::ThresholdDistribution, options::LocationBound},
    errors::{GutsError, GutsResult},
};
use ndarray::Array1;
use rand::{SeedableRng, distributions::Distribution, rngs::StdRng};
use statrs::distribution::LogNormal;

/// What the sampler is asked to provide.
///
/// Fields
/// ------
/// - `distribution`: configured distribution.
/// - `size`: required sample length `N`.
/// - `dist_params`: distribution parameters (`[location, scale]` for the
///   lognormal).
/// - `resample`: whether an internally drawn sample must be redrawn.
/// - `placeholder`: fill value when no distribution is usable.
/// - `location_bound`: admissible lognormal locations.
#[derive(Debug, Clone, Copy)]
pub struct SamplePlan<'a> {
    pub distribution: ThresholdDistribution,
    pub size: usize,
    pub dist_params: &'a [f64],
    pub resample: bool,
    pub placeholder: f64,
    pub location_bound: LocationBound,
}

/// Whether a sampler pass replaced the sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleAction {
    Kept,
    Drawn,
}

/// ToleranceSampler: instance-local generator for tolerance samples.
#[derive(Debug, Clone)]
pub struct ToleranceSampler {
    rng: StdRng,
}

impl ToleranceSampler {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        ToleranceSampler { rng }
    }

    /// Restart the generator from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Draw, keep, or reject the sample according to `plan`.
    ///
    /// Returns
    /// -------
    /// - `Ok(SampleAction::Kept)` for an empirical sample of the right
    ///   length, or a lognormal sample that needs no refresh.
    /// - `Ok(SampleAction::Drawn)` after a fresh lognormal draw.
    ///
    /// Errors
    /// ------
    /// - `GutsError::SampleLengthMismatch` for an empirical sample whose
    ///   length differs from `plan.size`.
    /// - `GutsError::InvalidLognormalParam` for unusable lognormal
    ///   parameters.
    /// - `GutsError::NoDistribution` for [`ThresholdDistribution::None`];
    ///   `sample` is overwritten with `plan.size` copies of
    ///   `plan.placeholder`.
    pub fn populate(
        &mut self, plan: &SamplePlan<'_>, sample: &mut Array1<f64>,
    ) -> GutsResult<SampleAction> {
        match plan.distribution {
            ThresholdDistribution::Empirical => {
                if sample.len() != plan.size {
                    return Err(GutsError::SampleLengthMismatch {
                        expected: plan.size,
                        actual: sample.len(),
                    });
                }
                Ok(SampleAction::Kept)
            }
            ThresholdDistribution::Lognormal => {
                if !plan.resample && sample.len() == plan.size {
                    return Ok(SampleAction::Kept);
                }
                let (location, scale) = lognormal_params(plan.dist_params, plan.location_bound)?;
                *sample = self.draw_lognormal(plan.size, location, scale)?;
                Ok(SampleAction::Drawn)
            }
            ThresholdDistribution::None => {
                *sample = Array1::from_elem(plan.size, plan.placeholder);
                Err(GutsError::NoDistribution)
            }
        }
    }

    /// Draw `n` sorted values from `LogNormal(location, scale)`.
    pub fn draw_lognormal(&mut self, n: usize, location: f64, scale: f64) -> GutsResult<Array1<f64>> {
        let dist = LogNormal::new(location, scale)?;
        let mut draws: Vec<f64> = (0..n).map(|_| dist.sample(&mut self.rng)).collect();
        draws.sort_by(f64::total_cmp);
        Ok(Array1::from_vec(draws))
    }
}

fn lognormal_params(dist_params: &[f64], bound: LocationBound) -> GutsResult<(f64, f64)> {
    let (location, scale) = match dist_params {
        [location, scale, ..] => (*location, *scale),
        [only] => {
            return Err(GutsError::InvalidLognormalParam {
                param: *only,
                reason: "Lognormal needs a location and a scale.",
            });
        }
        [] => {
            return Err(GutsError::InvalidLognormalParam {
                param: f64::NAN,
                reason: "Lognormal needs a location and a scale.",
            });
        }
    };
    if !location.is_finite() {
        return Err(GutsError::InvalidLognormalParam {
            param: location,
            reason: "Location must be finite.",
        });
    }
    if bound == LocationBound::StrictlyPositive && location <= 0.0 {
        return Err(GutsError::InvalidLognormalParam {
            param: location,
            reason: "Location must be > 0.",
        });
    }
    if !scale.is_finite() || scale <= 0.0 {
        return Err(GutsError::InvalidLognormalParam {
            param: scale,
            reason: "Scale must be finite and > 0.",
        });
    }
    Ok((location, scale))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Each distribution branch of `populate` (empirical, lognormal, none).
    // - Sortedness, length and reproducibility of lognormal draws.
    // - Rejection of invalid lognormal parameters without touching the sample.
    //
    // These tests intentionally DO NOT cover:
    // - Goodness of fit of the drawn sample; that belongs to statrs.
    // -------------------------------------------------------------------------

    fn lognormal_plan(params: &[f64], resample: bool) -> SamplePlan<'_> {
        SamplePlan {
            distribution: ThresholdDistribution::Lognormal,
            size: 50,
            dist_params: params,
            resample,
            placeholder: 1.0,
            location_bound: LocationBound::Finite,
        }
    }

    #[test]
    // Purpose
    // -------
    // A lognormal draw is sorted, positive, of the requested length, and
    // reproducible under a fixed seed.
    //
    // Given
    // -----
    // - Two samplers seeded with 11; location 0, scale 1; N = 50.
    //
    // Expect
    // ------
    // - Both samples are identical, ascending, strictly positive.
    fn lognormal_draw_is_sorted_and_reproducible() {
        let params = [0.0, 1.0];
        let mut a = ToleranceSampler::new(Some(11));
        let mut b = ToleranceSampler::new(Some(11));
        let mut za = Array1::zeros(0);
        let mut zb = Array1::zeros(0);

        assert_eq!(a.populate(&lognormal_plan(&params, true), &mut za), Ok(SampleAction::Drawn));
        b.populate(&lognormal_plan(&params, true), &mut zb).unwrap();

        assert_eq!(za.len(), 50);
        assert_eq!(za, zb);
        assert!(za.iter().all(|&z| z > 0.0));
        assert!(za.windows(2).into_iter().all(|w| w[0] <= w[1]));
    }

    #[test]
    fn lognormal_without_refresh_keeps_sample() {
        let params = [0.0, 1.0];
        let mut sampler = ToleranceSampler::new(Some(3));
        let mut z = Array1::linspace(0.1, 5.0, 50);
        let before = z.clone();

        let action = sampler.populate(&lognormal_plan(&params, false), &mut z).unwrap();

        assert_eq!(action, SampleAction::Kept);
        assert_eq!(z, before);
    }

    #[test]
    // Purpose
    // -------
    // Invalid lognormal parameters fail and leave the sample alone.
    //
    // Given
    // -----
    // - Scale 0 and scale -1, then a single-entry parameter slice.
    //
    // Expect
    // ------
    // - `InvalidLognormalParam` each time; the sample is unchanged.
    fn lognormal_rejects_invalid_scale() {
        let mut sampler = ToleranceSampler::new(Some(3));
        let mut z = array![1.0, 2.0, 3.0];

        for params in [&[0.0, 0.0][..], &[1.0, -1.0][..], &[1.0][..]] {
            let result = sampler.populate(&lognormal_plan(params, true), &mut z);
            assert!(matches!(result, Err(GutsError::InvalidLognormalParam { .. })));
        }
        assert_eq!(z, array![1.0, 2.0, 3.0]);
    }

    #[test]
    // Purpose
    // -------
    // The strict location bound rejects non-positive locations that the
    // default bound accepts.
    //
    // Given
    // -----
    // - Locations 0 and -0.5 with scale 1; then location 0.2.
    //
    // Expect
    // ------
    // - Default bound draws for every location; the strict bound rejects
    //   0 and -0.5 without touching the sample and draws for 0.2.
    fn strict_location_bound_rejects_non_positive_location() {
        let mut sampler = ToleranceSampler::new(Some(3));

        for location in [0.0, -0.5] {
            let params = [location, 1.0];
            let mut z = array![1.0, 2.0, 3.0];
            let mut plan = lognormal_plan(&params, true);
            plan.location_bound = LocationBound::StrictlyPositive;

            assert_eq!(
                sampler.populate(&plan, &mut z),
                Err(GutsError::InvalidLognormalParam {
                    param: location,
                    reason: "Location must be > 0.",
                })
            );
            assert_eq!(z, array![1.0, 2.0, 3.0]);

            plan.location_bound = LocationBound::Finite;
            assert_eq!(sampler.populate(&plan, &mut z), Ok(SampleAction::Drawn));
        }

        let params = [0.2, 1.0];
        let mut z = Array1::zeros(0);
        let mut plan = lognormal_plan(&params, true);
        plan.location_bound = LocationBound::StrictlyPositive;
        assert_eq!(sampler.populate(&plan, &mut z), Ok(SampleAction::Drawn));
        assert_eq!(z.len(), 50);
    }

    #[test]
    fn empirical_requires_matching_length() {
        let mut sampler = ToleranceSampler::new(Some(3));
        let mut z = array![0.5, 1.0, 1.5, 2.0, 2.5];
        let mut plan = SamplePlan {
            distribution: ThresholdDistribution::Empirical,
            size: 5,
            dist_params: &[],
            resample: true,
            placeholder: 1.0,
            location_bound: LocationBound::Finite,
        };

        assert_eq!(sampler.populate(&plan, &mut z), Ok(SampleAction::Kept));
        plan.size = 6;
        assert_eq!(
            sampler.populate(&plan, &mut z),
            Err(GutsError::SampleLengthMismatch { expected: 6, actual: 5 })
        );
    }

    #[test]
    fn none_fills_placeholder_and_fails() {
        let mut sampler = ToleranceSampler::new(Some(3));
        let mut z = array![0.5, 1.0];
        let plan = SamplePlan {
            distribution: ThresholdDistribution::None,
            size: 8,
            dist_params: &[0.0, 1.0],
            resample: true,
            placeholder: 1.25,
            location_bound: LocationBound::Finite,
        };

        assert_eq!(sampler.populate(&plan, &mut z), Err(GutsError::NoDistribution));
        assert_eq!(z, Array1::from_elem(8, 1.25));
    }

    #[test]
    fn reseed_restarts_stream() {
        let mut sampler = ToleranceSampler::new(Some(5));
        let first = sampler.draw_lognormal(10, 0.0, 1.0).unwrap();
        let second = sampler.draw_lognormal(10, 0.0, 1.0).unwrap();
        sampler.reseed(5);
        let again = sampler.draw_lognormal(10, 0.0, 1.0).unwrap();

        assert_ne!(first, second);
        assert_eq!(first, again);
    }
}
