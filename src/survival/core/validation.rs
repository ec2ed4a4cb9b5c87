//! GUTS validation helpers: reusable structural checks for model inputs.
//!
//! Purpose
//! -------
//! Centralize the small checks shared by the GUTS data containers and setters:
//! paired time series (exposure, observations), the parameter vector, grid
//! resolution, sample size, and tolerance thresholds.
//!
//! Invariants & assumptions
//! ------------------------
//! - Time axes must have at least [`MIN_SERIES_LEN`] points, start at exactly
//!   `0.0` and be strictly increasing (no zero-width exposure segments).
//! - Rates: background and killing rates `>= 0`, elimination rate `> 0`.
//! - Grid resolution and sample size must exceed [`MIN_GRID_POINTS`] /
//!   [`MIN_SAMPLE_LEN`].
//!
//! Conventions
//! -----------
//! - All helpers return [`GutsResult`] and never panic on invalid inputs.
//! - No I/O or logging happens here; the model logs rejected inputs.
use crate::survival::errors::{GutsError, GutsResult};
use ndarray::ArrayView1;

/// Minimum number of points in an exposure or observation series.
pub const MIN_SERIES_LEN: usize = 3;

/// Grid resolution must be strictly greater than this.
pub const MIN_GRID_POINTS: usize = 4;

/// Sample size must be strictly greater than this.
pub const MIN_SAMPLE_LEN: usize = 4;

/// Minimum number of model parameters (background, elimination, killing).
pub const MIN_PARAMS: usize = 3;

/// Validate a paired time series: equal lengths, minimum length, start at 0
/// and strictly increasing time points.
///
/// Errors
/// ------
/// - `GutsError::LengthMismatch` when `values_len != times.len()`.
/// - `GutsError::SeriesTooShort` when fewer than [`MIN_SERIES_LEN`] points.
/// - `GutsError::NonZeroStartTime` when `times[0] != 0.0`.
/// - `GutsError::NonIncreasingTimes` at the first `i` with
///   `times[i + 1] - times[i] <= 0` (NaN deltas included).
pub fn validate_time_axis(values_len: usize, times: ArrayView1<f64>) -> GutsResult<()> {
    if values_len != times.len() {
        return Err(GutsError::LengthMismatch { values: values_len, times: times.len() });
    }
    if times.len() < MIN_SERIES_LEN {
        return Err(GutsError::SeriesTooShort { len: times.len(), min: MIN_SERIES_LEN });
    }
    if times[0] != 0.0 {
        return Err(GutsError::NonZeroStartTime { first: times[0] });
    }
    for (index, pair) in times.windows(2).into_iter().enumerate() {
        let (prev, next) = (pair[0], pair[1]);
        if !(next - prev > 0.0) {
            return Err(GutsError::NonIncreasingTimes { index, prev, next });
        }
    }
    Ok(())
}

/// Validate the rate block `[background, elimination, killing]` of a
/// parameter vector.
///
/// Errors
/// ------
/// - `GutsError::ParameterVectorTooShort` when fewer than three entries.
/// - `GutsError::InvalidRate` when any of the first three entries is `< 0`
///   or NaN, or the elimination rate is `<= 0`.
pub fn validate_rates(par: ArrayView1<f64>) -> GutsResult<()> {
    if par.len() < MIN_PARAMS {
        return Err(GutsError::ParameterVectorTooShort { len: par.len() });
    }
    validate_rate_lower_bounds(par)?;
    validate_elimination(par[1])
}

/// Lower bound check on the first three entries only.
pub fn validate_rate_lower_bounds(par: ArrayView1<f64>) -> GutsResult<()> {
    for (index, &value) in par.iter().take(MIN_PARAMS).enumerate() {
        if !(value >= 0.0) {
            return Err(GutsError::InvalidRate {
                index,
                value,
                reason: "Rates must be non-negative.",
            });
        }
    }
    Ok(())
}

pub fn validate_elimination(value: f64) -> GutsResult<()> {
    if !(value > 0.0) {
        return Err(GutsError::InvalidRate {
            index: 1,
            value,
            reason: "Elimination rate must be strictly positive.",
        });
    }
    Ok(())
}

pub fn validate_grid_points(points: usize) -> GutsResult<usize> {
    if points <= MIN_GRID_POINTS {
        return Err(GutsError::GridTooCoarse { points });
    }
    Ok(points)
}

pub fn validate_sample_size(len: usize) -> GutsResult<usize> {
    if len <= MIN_SAMPLE_LEN {
        return Err(GutsError::SampleTooSmall { len });
    }
    Ok(len)
}

/// Validate a user-supplied tolerance sample: more than [`MIN_SAMPLE_LEN`]
/// entries, each finite and non-negative.
pub fn validate_thresholds(sample: ArrayView1<f64>) -> GutsResult<()> {
    validate_sample_size(sample.len())?;
    for (index, &value) in sample.iter().enumerate() {
        if !value.is_finite() || value < 0.0 {
            return Err(GutsError::InvalidThreshold { index, value });
        }
    }
    Ok(())
}
