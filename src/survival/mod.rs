//! survival: GUTS individual-tolerance survival model.
//!
//! Purpose
//! -------
//! Evaluate the log-likelihood of observed survivor counts under the
//! stochastic GUTS model with individual tolerance: a piecewise-linear
//! exposure drives a first-order damage process, a population sample of
//! tolerance thresholds turns damage into a survival curve, and survival
//! drops are scored against observed deaths.
//!
//! Key behaviors
//! -------------
//! - [`core`] holds validated containers, the tolerance sampler, the damage
//!   kernel and the validation status.
//! - [`models`] exposes [`GutsModel`], the configurable object external
//!   fitting code evaluates repeatedly.
//! - [`errors`] defines [`GutsError`] and the tagged [`LoglikOutcome`] with
//!   its mapping onto the legacy sentinel values.
//!
//! Conventions
//! -----------
//! - Parameters are `[h_b, k_e, k_k, θ…]`: background hazard, elimination
//!   rate, killing rate, then tolerance-distribution parameters.
//! - Times start at 0; observation times must not exceed the last exposure
//!   time.
//! - Survivor counts carry an appended terminal 0 and the survival series a
//!   terminal 0.0.
//!
//! Downstream usage
//! ----------------
//! 1. Build a [`GutsModel`] (optionally with seeded [`GutsOptions`]).
//! 2. Call the setters in any order; inspect the returned [`SetterStatus`]
//!    or [`GutsModel::status`] if needed.
//! 3. Call [`GutsModel::evaluate`] (tagged) or
//!    [`GutsModel::calc_loglikelihood`] (legacy `f64`) as often as required,
//!    changing parameters in between.

pub mod core;
pub mod errors;
pub mod models;

pub use self::core::{
    ExposureProfile, GutsOptions, LocationBound, ModelParams, ObservationSeries, ParameterCheck,
    SampleRefresh, SetterSlot, SetterStatus, ThresholdDistribution, ValidationStatus,
};
pub use self::errors::{GutsError, GutsResult, InvalidReason, LoglikOutcome};
pub use self::models::GutsModel;

pub mod prelude {
    pub use super::{
        GutsError, GutsModel, GutsOptions, GutsResult, InvalidReason, LocationBound,
        LoglikOutcome, ParameterCheck, SampleRefresh, SetterSlot, SetterStatus,
        ThresholdDistribution,
    };
}
