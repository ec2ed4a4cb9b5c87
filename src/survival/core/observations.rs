//! Observation series: survivor counts over time.
//!
//! The stored count series always carries one extra trailing `0`: the
//! logical terminal element "eventually every individual dies". Its
//! probability counterpart is the fixed `S = 0` at the end of the survival
//! series, so the last interval of the likelihood collects everyone who was
//! still alive at the final observation.
use crate::survival::{core::validation::validate_time_axis, errors::GutsResult};
use ndarray::{Array1, ArrayView1, s};

/// `ObservationSeries`: validated survivor counts and their time points.
///
/// Invariants
/// ----------
/// - `counts.len() == times.len() + 1` and `counts[times.len()] == 0`.
/// - `times` starts at 0 and is strictly increasing with at least 3 points.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationSeries {
    counts: Array1<i64>,
    times: Array1<f64>,
}

impl ObservationSeries {
    /// Construct a validated series and append the terminal zero count.
    pub fn new(counts: ArrayView1<i64>, times: ArrayView1<f64>) -> GutsResult<Self> {
        validate_time_axis(counts.len(), times)?;
        let counts = counts.iter().copied().chain(std::iter::once(0)).collect::<Array1<i64>>();
        Ok(ObservationSeries { counts, times: times.to_owned() })
    }

    /// Placeholder: ten observations at time 1.0, all counts zero.
    pub(crate) fn placeholder() -> Self {
        ObservationSeries { counts: Array1::zeros(11), times: Array1::from_elem(10, 1.0) }
    }

    /// Survivor counts including the appended terminal zero.
    pub fn counts(&self) -> ArrayView1<'_, i64> {
        self.counts.view()
    }

    /// Survivor counts as supplied, without the terminal zero.
    pub fn observed_counts(&self) -> ArrayView1<'_, i64> {
        self.counts.slice(s![..self.times.len()])
    }

    pub fn times(&self) -> ArrayView1<'_, f64> {
        self.times.view()
    }

    /// Number of observation time points.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn first_time(&self) -> f64 {
        self.times[0]
    }

    pub fn last_time(&self) -> f64 {
        self.times[self.times.len() - 1]
    }
}
