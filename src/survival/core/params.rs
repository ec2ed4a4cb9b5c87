//! GUTS parameter vector: rates plus optional distribution parameters.
//!
//! Purpose
//! -------
//! Hold the model parameter vector `[h_b, k_e, k_k, θ_0, θ_1, …]`:
//! background hazard rate, elimination rate, killing rate, followed by any
//! number of tolerance-distribution parameters. Entries from index 3 onward
//! overwrite the sampler's distribution parameters.
//!
//! Key behaviors
//! -------------
//! - [`ModelParams::new`] validates the incoming vector under a chosen
//!   [`ParameterCheck`] policy.
//! - [`ModelParams::overwrite_distribution_params`] writes the trailing
//!   entries into an existing distribution parameter buffer.
//!
//! Invariants & assumptions
//! ------------------------
//! - At least three entries; `h_b >= 0`, `k_k >= 0`, `k_e > 0` under the
//!   default [`ParameterCheck::Incoming`] policy.
//! - Trailing entries are not validated here; the sampler checks them for the
//!   distribution it is about to draw from.
use crate::survival::{
    core::validation::{
        MIN_PARAMS, validate_elimination, validate_rate_lower_bounds, validate_rates,
    },
    errors::{GutsError, GutsResult},
};
use ndarray::{Array1, ArrayView1, s};

/// Which vector the lower-bound check of a parameter update inspects.
///
/// One historical revision of the model checked the non-negativity of the
/// first three rates on the *previously stored* vector instead of the new
/// one. `LegacyPrevious` reproduces that; `Incoming` checks the new vector.
/// The elimination-rate check always inspects the incoming vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParameterCheck {
    #[default]
    Incoming,
    LegacyPrevious,
}

/// `ModelParams`: validated parameter vector.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelParams {
    par: Array1<f64>,
}

impl ModelParams {
    /// Validate `par` and build a parameter vector.
    ///
    /// Parameters
    /// ----------
    /// - `par`: `ArrayView1<f64>`
    ///   Candidate vector of length ≥ 3.
    /// - `previous`: `&ModelParams`
    ///   Currently stored vector; consulted only under
    ///   [`ParameterCheck::LegacyPrevious`].
    /// - `check`: [`ParameterCheck`]
    ///
    /// Errors
    /// ------
    /// - `GutsError::ParameterVectorTooShort` for fewer than three entries.
    /// - `GutsError::InvalidRate` when a rate violates its bound.
    pub fn new(
        par: ArrayView1<f64>, previous: &ModelParams, check: ParameterCheck,
    ) -> GutsResult<Self> {
        match check {
            ParameterCheck::Incoming => validate_rates(par)?,
            ParameterCheck::LegacyPrevious => {
                if par.len() < MIN_PARAMS {
                    return Err(GutsError::ParameterVectorTooShort { len: par.len() });
                }
                validate_rate_lower_bounds(previous.par.view())?;
                validate_elimination(par[1])?;
            }
        }
        Ok(ModelParams { par: par.to_owned() })
    }

    /// Placeholder of five ones.
    pub(crate) fn placeholder() -> Self {
        ModelParams { par: Array1::ones(5) }
    }

    pub fn as_array(&self) -> ArrayView1<'_, f64> {
        self.par.view()
    }

    pub fn background(&self) -> f64 {
        self.par[0]
    }

    pub fn elimination(&self) -> f64 {
        self.par[1]
    }

    pub fn killing(&self) -> f64 {
        self.par[2]
    }

    /// Trailing entries (index ≥ 3), possibly empty.
    pub fn distribution_params(&self) -> ArrayView1<'_, f64> {
        self.par.slice(s![MIN_PARAMS..])
    }

    pub fn has_distribution_params(&self) -> bool {
        self.par.len() > MIN_PARAMS
    }

    /// Copy trailing entries into `target[i - 3]`, growing `target` if it is
    /// shorter than the trailing block. Entries of `target` beyond the block
    /// keep their value.
    pub fn overwrite_distribution_params(&self, target: &mut Vec<f64>) {
        let trailing = self.distribution_params();
        if target.len() < trailing.len() {
            target.resize(trailing.len(), 1.0);
        }
        for (slot, &value) in target.iter_mut().zip(trailing.iter()) {
            *slot = value;
        }
    }
}
