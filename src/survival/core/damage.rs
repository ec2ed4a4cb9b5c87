//! Damage dynamics and threshold lookup.
//!
//! Purpose
//! -------
//! Provide the two per-step numerical kernels of the likelihood engine:
//!
//! - [`damage_step`]: exact solution of `dD/dt = k_e (C(t) - D)` over a
//!   segment on which `C` is linear, so the exposure ramp itself introduces
//!   no discretization error.
//! - [`ThresholdCursor`]: a position in the sorted tolerance sample that is
//!   walked up or down from its previous location instead of searched for
//!   afresh, keeping total pointer movement proportional to how far the
//!   damage trajectory actually travels through the sample.
//!
//! Conventions
//! -----------
//! - With `Δ = τ - t_k` and `E = exp(-k_e Δ)`:
//!   `D(τ) = D_0 E + C_k (1 - E) + s_k (Δ - (1 - E) / k_e)`
//!   where `s_k` is the concentration slope of segment `k`.
//! - The cursor convention: after [`ThresholdCursor::locate`], a damage value
//!   strictly between `z[0]` and `z[n-1]` lies in bucket `pos - 1`, i.e. in
//!   `(z[pos - 1], z[pos]]`.
use ndarray::ArrayView1;

/// Linear exposure segment seen from the damage ODE.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Breakpoint time `t_k`.
    pub start: f64,
    /// Concentration at `t_k`.
    pub concentration: f64,
    /// Concentration slope on `[t_k, t_{k+1}]`.
    pub slope: f64,
}

/// Damage at time `tau` given damage `start_damage` at the segment start and
/// elimination rate `k_e > 0`.
#[inline]
pub fn damage_step(segment: &Segment, start_damage: f64, elimination: f64, tau: f64) -> f64 {
    let elapsed = tau - segment.start;
    let decay = (-elimination * elapsed).exp();
    start_damage * decay
        + segment.concentration * (1.0 - decay)
        + segment.slope * (elapsed - (1.0 - decay) / elimination)
}

/// Where a damage value fell relative to the tolerance sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    /// At or below the smallest threshold; no individual is affected.
    Below,
    /// Between `z[i]` and `z[i + 1]`.
    Tier(usize),
    /// Above the largest threshold.
    Saturated,
}

/// Moving pointer into a sorted tolerance sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThresholdCursor {
    pos: usize,
}

impl ThresholdCursor {
    pub fn new() -> Self {
        ThresholdCursor { pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Move the cursor to `damage` and classify it.
    ///
    /// Walks down while the threshold under the cursor is no longer reached,
    /// steps back up once if it overshot, or walks up while the damage still
    /// exceeds the threshold under the cursor.
    ///
    /// `sample` must be sorted ascending and non-empty.
    pub fn locate(&mut self, damage: f64, sample: ArrayView1<f64>) -> Bucket {
        let last = sample.len() - 1;
        if damage < sample[self.pos] {
            while damage < sample[self.pos] && self.pos > 0 {
                self.pos -= 1;
            }
            if damage > sample[self.pos] {
                self.pos += 1;
            }
        } else {
            while damage > sample[self.pos] && self.pos < last {
                self.pos += 1;
            }
        }

        if damage > sample[last] {
            Bucket::Saturated
        } else if damage > sample[0] {
            // damage > z[0] guarantees pos >= 1 here
            Bucket::Tier(self.pos.saturating_sub(1))
        } else {
            Bucket::Below
        }
    }
}
