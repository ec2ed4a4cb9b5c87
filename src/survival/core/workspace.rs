//! Evaluation scratch buffers for the GUTS likelihood engine.
//!
//! Purpose
//! -------
//! Own the buffers one likelihood evaluation writes into, so the inner loops
//! allocate nothing beyond an occasional resize after a configuration change:
//!
//! - `damage`: damage trajectory on the time grid (length `M`).
//! - `survival`: survival probability at each observation time plus the
//!   terminal `0.0` (length `observations + 1`).
//! - `excess_sum` / `excess_count`: per-tier sum and count of damage values
//!   exceeding the tolerance thresholds (length `N`).
//!
//! Invariants & assumptions
//! ------------------------
//! - `survival[survival.len() - 1] == 0.0` at all times.
//! - Buffers are fully rewritten by every evaluation; their content between
//!   evaluations is diagnostic only.
//! - A scratch object is owned by exactly one model and mutated through
//!   `&mut`, so concurrent evaluation of one model is ruled out statically.
use ndarray::Array1;

/// GutsScratch: per-model evaluation buffers.
#[derive(Debug, Clone, PartialEq)]
pub struct GutsScratch {
    pub damage: Array1<f64>,
    pub survival: Array1<f64>,
    pub excess_sum: Array1<f64>,
    pub excess_count: Array1<u64>,
}

impl GutsScratch {
    /// Allocate buffers for `grid_points` grid steps, `n_obs` observation
    /// times and a sample of `sample_len` thresholds.
    pub fn new(grid_points: usize, n_obs: usize, sample_len: usize) -> Self {
        GutsScratch {
            damage: Array1::zeros(grid_points),
            survival: Array1::zeros(n_obs + 1),
            excess_sum: Array1::zeros(sample_len),
            excess_count: Array1::zeros(sample_len),
        }
    }

    /// Reallocate the damage trajectory, all zeros.
    pub fn reset_damage(&mut self, grid_points: usize) {
        self.damage = Array1::zeros(grid_points);
    }

    /// Resize the survival series to `n_obs + 1` entries, terminal entry 0.
    pub fn resize_survival(&mut self, n_obs: usize) {
        self.survival = Array1::zeros(n_obs + 1);
    }

    /// Clear the excess accumulators to length `sample_len`.
    pub fn reset_excess(&mut self, sample_len: usize) {
        if self.excess_sum.len() == sample_len {
            self.excess_sum.fill(0.0);
            self.excess_count.fill(0);
        } else {
            self.excess_sum = Array1::zeros(sample_len);
            self.excess_count = Array1::zeros(sample_len);
        }
    }
}
