//! Exposure profile: piecewise-linear concentration time series.
//!
//! Purpose
//! -------
//! Hold the external concentration profile that drives the damage ODE. The
//! concentration is linear between consecutive breakpoints, so the profile is
//! fully described by paired `(values, times)` arrays.
//!
//! Invariants & assumptions
//! ------------------------
//! - `values.len() == times.len() >= 3`.
//! - `times[0] == 0.0` and `times` is strictly increasing, so every segment
//!   has positive width and the slope `ΔC / Δt` is finite.
//!
//! Testing notes
//! -------------
//! - Unit tests cover construction on valid input and the segment slope
//!   helper; structural rejections are covered in `validation`.
use crate::survival::{core::validation::validate_time_axis, errors::GutsResult};
use ndarray::{Array1, ArrayView1};

/// `ExposureProfile`: validated concentration breakpoints.
///
/// Fields
/// ------
/// - `values`: `Array1<f64>`
///   Concentrations at each breakpoint.
/// - `times`: `Array1<f64>`
///   Breakpoint times; start at 0, strictly increasing.
#[derive(Debug, Clone, PartialEq)]
pub struct ExposureProfile {
    values: Array1<f64>,
    times: Array1<f64>,
}

impl ExposureProfile {
    /// Construct a validated profile.
    ///
    /// Errors
    /// ------
    /// - Any error from [`validate_time_axis`].
    pub fn new(values: ArrayView1<f64>, times: ArrayView1<f64>) -> GutsResult<Self> {
        validate_time_axis(values.len(), times)?;
        Ok(ExposureProfile { values: values.to_owned(), times: times.to_owned() })
    }

    /// Placeholder used by a freshly constructed model: zero concentration at
    /// the ten breakpoints `0, 1, …, 9`. It satisfies the profile invariants,
    /// so a model evaluated before its exposure is set sees no exposure
    /// rather than undefined slopes.
    pub(crate) fn placeholder() -> Self {
        ExposureProfile { values: Array1::zeros(10), times: Array1::range(0.0, 10.0, 1.0) }
    }

    pub fn values(&self) -> ArrayView1<'_, f64> {
        self.values.view()
    }

    pub fn times(&self) -> ArrayView1<'_, f64> {
        self.times.view()
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Last breakpoint time; the model cannot simulate beyond it.
    pub fn horizon(&self) -> f64 {
        self.times[self.times.len() - 1]
    }

    /// Concentration slope on segment `k`, i.e. between breakpoints `k` and
    /// `k + 1`.
    pub fn slope(&self, k: usize) -> f64 {
        (self.values[k + 1] - self.values[k]) / (self.times[k + 1] - self.times[k])
    }
}
