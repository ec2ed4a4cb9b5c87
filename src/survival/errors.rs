//! Errors and evaluation outcomes for the GUTS survival stack.
//!
//! This module defines the validation error type, [`GutsError`], raised by the
//! data containers and setters, and the tagged evaluation outcome,
//! [`LoglikOutcome`], produced by the likelihood engine. Both are plain enums
//! with hand-written `Display` impls.
//!
//! ## Conventions
//! - **Indices are 0-based** and point at the first offending element.
//! - Setters never return a `GutsError` directly; they record it in the
//!   model's [`ValidationStatus`](crate::survival::core::status::ValidationStatus)
//!   and hand back the coarse [`SetterStatus`].
//! - The legacy numeric contract (`0.0`, `-1000.0`, raw status values) is
//!   produced only by [`LoglikOutcome::to_legacy`]; internal code works with
//!   the tagged form.
use crate::survival::core::status::{SetterSlot, SetterStatus};
use statrs::distribution::LogNormalError;

/// Result alias for validation paths that may produce [`GutsError`].
pub type GutsResult<T> = Result<T, GutsError>;

/// Legacy return value for "incoherent configuration".
pub const LEGACY_INCOHERENT: f64 = 0.0;

/// Legacy return value for "numerically degenerate".
pub const LEGACY_DEGENERATE: f64 = -1000.0;

/// Unified validation error type for GUTS model configuration.
///
/// Covers the structural checks performed by every setter and by the sampler.
/// Each variant maps onto a coarse [`SetterStatus`] through
/// [`GutsError::status`].
#[derive(Debug, Clone, PartialEq)]
pub enum GutsError {
    // ---- Time series structure ----
    /// Values and time points differ in length.
    LengthMismatch { values: usize, times: usize },

    /// Series is shorter than the required minimum.
    SeriesTooShort { len: usize, min: usize },

    /// First time point must be exactly 0.
    NonZeroStartTime { first: f64 },

    /// Time points must be strictly increasing.
    NonIncreasingTimes { index: usize, prev: f64, next: f64 },

    // ---- Parameters ----
    /// Fewer than three model parameters supplied.
    ParameterVectorTooShort { len: usize },

    /// A rate parameter violates its bound.
    InvalidRate { index: usize, value: f64, reason: &'static str },

    // ---- Grid / sample ----
    /// Grid resolution must be greater than 4.
    GridTooCoarse { points: usize },

    /// Sample size must be greater than 4.
    SampleTooSmall { len: usize },

    /// Tolerance thresholds must be finite and non-negative.
    InvalidThreshold { index: usize, value: f64 },

    /// Stored sample length disagrees with the configured sample size.
    SampleLengthMismatch { expected: usize, actual: usize },

    // ---- Distribution ----
    /// Distribution name not recognised.
    UnknownDistribution { name: String },

    /// Lognormal parameters invalid.
    InvalidLognormalParam { param: f64, reason: &'static str },

    /// No usable distribution configured for sampling.
    NoDistribution,
}

impl GutsError {
    /// Coarse status category recorded in the validation status.
    pub fn status(&self) -> SetterStatus {
        match self {
            GutsError::LengthMismatch { .. }
            | GutsError::SeriesTooShort { .. }
            | GutsError::ParameterVectorTooShort { .. }
            | GutsError::GridTooCoarse { .. }
            | GutsError::SampleTooSmall { .. }
            | GutsError::SampleLengthMismatch { .. } => SetterStatus::InvalidLength,
            GutsError::NonZeroStartTime { .. } | GutsError::NonIncreasingTimes { .. } => {
                SetterStatus::InvalidOrdering
            }
            GutsError::InvalidRate { .. }
            | GutsError::InvalidThreshold { .. }
            | GutsError::UnknownDistribution { .. }
            | GutsError::InvalidLognormalParam { .. }
            | GutsError::NoDistribution => SetterStatus::OutOfRange,
        }
    }
}

impl std::error::Error for GutsError {}

impl std::fmt::Display for GutsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Time series structure ----
            GutsError::LengthMismatch { values, times } => {
                write!(f, "Values ({values}) and time points ({times}) must have equal length.")
            }
            GutsError::SeriesTooShort { len, min } => {
                write!(f, "Series must have at least {min} entries; got {len}.")
            }
            GutsError::NonZeroStartTime { first } => {
                write!(f, "First time point must be 0; got {first}.")
            }
            GutsError::NonIncreasingTimes { index, prev, next } => {
                write!(
                    f,
                    "Time points must be strictly increasing; index {index} goes from {prev} to {next}."
                )
            }
            // ---- Parameters ----
            GutsError::ParameterVectorTooShort { len } => {
                write!(f, "Parameter vector needs at least 3 entries; got {len}.")
            }
            GutsError::InvalidRate { index, value, reason } => {
                write!(f, "Parameter at index {index} is out of range: {value}. {reason}")
            }
            // ---- Grid / sample ----
            GutsError::GridTooCoarse { points } => {
                write!(f, "Number of time grid points must be > 4; got {points}.")
            }
            GutsError::SampleTooSmall { len } => {
                write!(f, "Sample length must be > 4; got {len}.")
            }
            GutsError::InvalidThreshold { index, value } => {
                write!(
                    f,
                    "Tolerance threshold at index {index} must be finite and >= 0; got {value}."
                )
            }
            GutsError::SampleLengthMismatch { expected, actual } => {
                write!(f, "Sample length {actual} does not match sample size {expected}.")
            }
            // ---- Distribution ----
            GutsError::UnknownDistribution { name } => {
                write!(f, "Unknown distribution '{name}'; expected 'lognormal' or 'empirical'.")
            }
            GutsError::InvalidLognormalParam { param, reason } => {
                write!(f, "Lognormal parameter is invalid: {param}. {reason}")
            }
            GutsError::NoDistribution => {
                write!(f, "No usable distribution configured for the tolerance sample.")
            }
        }
    }
}

impl From<LogNormalError> for GutsError {
    fn from(err: LogNormalError) -> GutsError {
        match err {
            LogNormalError::LocationInvalid => GutsError::InvalidLognormalParam {
                param: f64::NAN,
                reason: "Location must be finite.",
            },
            LogNormalError::ScaleInvalid => GutsError::InvalidLognormalParam {
                param: f64::NAN,
                reason: "Scale must be finite and > 0.",
            },
            _ => GutsError::NoDistribution,
        }
    }
}

/// Reason why an evaluation did not produce a log-likelihood.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InvalidReason {
    /// Last observation lies beyond the last exposure time point.
    HorizonExceedsExposure,
    /// Time step `dtau` is not positive.
    DegenerateGrid,
    /// The sampler could not provide a tolerance sample.
    SamplingFailed,
    /// A setter recorded a failure.
    SetterFailed { slot: SetterSlot, status: SetterStatus },
    /// The model predicts (almost) no deaths in an interval where deaths
    /// were observed.
    IncompatibleData { index: usize },
}

impl std::fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidReason::HorizonExceedsExposure => {
                write!(f, "Observation horizon exceeds the exposure profile.")
            }
            InvalidReason::DegenerateGrid => write!(f, "Time step dtau is not positive."),
            InvalidReason::SamplingFailed => write!(f, "Tolerance sample could not be drawn."),
            InvalidReason::SetterFailed { slot, status } => {
                write!(f, "Setter '{slot}' failed with status {status:?}.")
            }
            InvalidReason::IncompatibleData { index } => {
                write!(
                    f,
                    "Deaths observed after time index {index} but predicted survival drop is negligible."
                )
            }
        }
    }
}

/// Tagged result of one likelihood evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoglikOutcome {
    /// Genuine log-likelihood (finite, ≤ 0 for consistent data).
    Value(f64),
    /// The configuration could not be evaluated.
    Invalid(InvalidReason),
}

impl LoglikOutcome {
    /// Map onto the legacy numeric contract.
    ///
    /// - `HorizonExceedsExposure`, `SamplingFailed` → `0.0`
    /// - `DegenerateGrid`, `IncompatibleData` → `-1000.0`
    /// - `SetterFailed` → the raw status value of the failing slot
    pub fn to_legacy(&self) -> f64 {
        match self {
            LoglikOutcome::Value(v) => *v,
            LoglikOutcome::Invalid(reason) => match reason {
                InvalidReason::HorizonExceedsExposure | InvalidReason::SamplingFailed => {
                    LEGACY_INCOHERENT
                }
                InvalidReason::DegenerateGrid | InvalidReason::IncompatibleData { .. } => {
                    LEGACY_DEGENERATE
                }
                InvalidReason::SetterFailed { slot, status } => status.legacy_value(*slot),
            },
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            LoglikOutcome::Value(v) => Some(*v),
            LoglikOutcome::Invalid(_) => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, LoglikOutcome::Value(_))
    }
}
