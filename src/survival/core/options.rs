//! GUTS options: configuration knobs for sampling and likelihood evaluation.
//!
//! Purpose
//! -------
//! Collect the settings that are not part of the statistical model itself
//! but change how a [`GutsModel`](crate::survival::models::GutsModel)
//! evaluates: generator seeding, parameter-check policy, the placeholder
//! threshold for unusable distributions, the minimum survival drop, the
//! lognormal location bound, and when internally drawn samples are
//! refreshed.
//!
//! Conventions
//! -----------
//! - `GutsOptions::default()` reproduces the historical behavior except for
//!   seeding, which is instance-local (`seed = None` draws a seed from OS
//!   entropy once per model), and the lognormal location bound, which
//!   accepts any finite location unless set to
//!   [`LocationBound::StrictlyPositive`].
//! - Options are plain data; nothing here validates or panics.

use crate::survival::core::params::ParameterCheck;

/// Fill value of the tolerance sample when no usable distribution is set.
pub const DEFAULT_PLACEHOLDER_THRESHOLD: f64 = 1.0;

/// Survival drops below this are treated as "no deaths predicted".
pub const DEFAULT_MIN_SURVIVAL_DROP: f64 = 0.001;

/// When an internally drawn (lognormal) sample is redrawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleRefresh {
    /// Redraw before every evaluation; consecutive evaluations see
    /// successive generator state.
    #[default]
    EveryEvaluation,
    /// Redraw only after a setter invalidated the sample (parameters with
    /// distribution entries, distribution, or sample size).
    OnChange,
}

/// Admissible lognormal locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocationBound {
    /// Any finite location (log-median tolerance may be ≤ 0).
    #[default]
    Finite,
    /// Finite and `> 0`, the historical rule.
    StrictlyPositive,
}

/// GutsOptions: evaluation-time configuration for a GUTS model.
///
/// Fields
/// ------
/// - `seed`: `Option<u64>`
///   Seed for the model's own generator. `Some(seed)` gives reproducible
///   samples; `None` seeds from OS entropy.
/// - `parameter_check`: [`ParameterCheck`]
///   Which vector the rate lower-bound check inspects.
/// - `placeholder_threshold`: `f64`
///   Constant written into the sample when sampling is impossible.
/// - `min_survival_drop`: `f64`
///   Survival drops below this value are considered zero.
/// - `refresh`: [`SampleRefresh`]
/// - `location_bound`: [`LocationBound`]
///   Which lognormal locations the sampler accepts.
#[derive(Debug, Clone, PartialEq)]
pub struct GutsOptions {
    pub seed: Option<u64>,
    pub parameter_check: ParameterCheck,
    pub placeholder_threshold: f64,
    pub min_survival_drop: f64,
    pub refresh: SampleRefresh,
    pub location_bound: LocationBound,
}

impl Default for GutsOptions {
    fn default() -> Self {
        GutsOptions {
            seed: None,
            parameter_check: ParameterCheck::Incoming,
            placeholder_threshold: DEFAULT_PLACEHOLDER_THRESHOLD,
            min_survival_drop: DEFAULT_MIN_SURVIVAL_DROP,
            refresh: SampleRefresh::EveryEvaluation,
            location_bound: LocationBound::Finite,
        }
    }
}

impl GutsOptions {
    /// Default options with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        GutsOptions { seed: Some(seed), ..Default::default() }
    }

    pub fn with_parameter_check(mut self, check: ParameterCheck) -> Self {
        self.parameter_check = check;
        self
    }

    pub fn with_refresh(mut self, refresh: SampleRefresh) -> Self {
        self.refresh = refresh;
        self
    }

    pub fn with_placeholder_threshold(mut self, value: f64) -> Self {
        self.placeholder_threshold = value;
        self
    }

    pub fn with_location_bound(mut self, bound: LocationBound) -> Self {
        self.location_bound = bound;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_documented_values() {
        let opts = GutsOptions::default();
        assert_eq!(opts.seed, None);
        assert_eq!(opts.parameter_check, ParameterCheck::Incoming);
        assert_eq!(opts.placeholder_threshold, 1.0);
        assert_eq!(opts.min_survival_drop, 0.001);
        assert_eq!(opts.refresh, SampleRefresh::EveryEvaluation);
        assert_eq!(opts.location_bound, LocationBound::Finite);
    }

    #[test]
    fn builders_override_single_fields() {
        let opts = GutsOptions::seeded(7)
            .with_parameter_check(ParameterCheck::LegacyPrevious)
            .with_refresh(SampleRefresh::OnChange)
            .with_placeholder_threshold(1.0000001)
            .with_location_bound(LocationBound::StrictlyPositive);
        assert_eq!(opts.seed, Some(7));
        assert_eq!(opts.parameter_check, ParameterCheck::LegacyPrevious);
        assert_eq!(opts.refresh, SampleRefresh::OnChange);
        assert_eq!(opts.placeholder_threshold, 1.0000001);
        assert_eq!(opts.min_survival_drop, 0.001);
        assert_eq!(opts.location_bound, LocationBound::StrictlyPositive);
    }
}
