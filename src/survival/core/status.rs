//! Per-setter validation status for a GUTS model.
//!
//! Purpose
//! -------
//! Record the outcome of the most recent call to each of the seven model
//! setters so the likelihood engine can refuse to run on a partially invalid
//! configuration, and so callers can find out *why* without parsing sentinel
//! values.
//!
//! Key behaviors
//! -------------
//! - [`SetterSlot`] names the seven setters in a fixed order.
//! - [`SetterStatus`] is the coarse outcome of one setter call.
//! - [`ValidationStatus`] stores one status (plus the last structured error)
//!   per slot and answers the aggregate readiness query
//!   [`ValidationStatus::is_ready`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Every slot starts out `Ok`; the default model configuration is
//!   non-physical but structurally evaluable.
//! - A slot reflects only the *last* call to its setter; a later successful
//!   call clears an earlier failure.
//!
//! Conventions
//! -----------
//! - Legacy raw values: `Ok` → `1.0`, any failure → `0.0`, except an
//!   out-of-range parameter vector which maps to `-1000.0`.
use crate::survival::errors::{GutsError, LEGACY_DEGENERATE, LEGACY_INCOHERENT};

/// The seven configuration setters of a GUTS model, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetterSlot {
    Exposure,
    Observations,
    Parameters,
    GridResolution,
    Distribution,
    SampleSize,
    Sample,
}

impl SetterSlot {
    /// All slots in the order the engine checks them.
    pub const ALL: [SetterSlot; 7] = [
        SetterSlot::Exposure,
        SetterSlot::Observations,
        SetterSlot::Parameters,
        SetterSlot::GridResolution,
        SetterSlot::Distribution,
        SetterSlot::SampleSize,
        SetterSlot::Sample,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for SetterSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SetterSlot::Exposure => "exposure",
            SetterSlot::Observations => "observations",
            SetterSlot::Parameters => "parameters",
            SetterSlot::GridResolution => "grid resolution",
            SetterSlot::Distribution => "distribution",
            SetterSlot::SampleSize => "sample size",
            SetterSlot::Sample => "sample",
        };
        f.write_str(name)
    }
}

/// Outcome of a single setter call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetterStatus {
    Ok,
    /// Wrong or inconsistent length.
    InvalidLength,
    /// Time axis does not start at 0 or is not strictly increasing.
    InvalidOrdering,
    /// A value lies outside its admissible range.
    OutOfRange,
}

impl SetterStatus {
    pub fn is_ok(self) -> bool {
        self == SetterStatus::Ok
    }

    /// Raw status value of the legacy flag vector for `slot`.
    pub fn legacy_value(self, slot: SetterSlot) -> f64 {
        match (self, slot) {
            (SetterStatus::Ok, _) => 1.0,
            (SetterStatus::OutOfRange, SetterSlot::Parameters) => LEGACY_DEGENERATE,
            _ => LEGACY_INCOHERENT,
        }
    }
}

/// ValidationStatus: one status per setter, plus the last error seen.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationStatus {
    statuses: [SetterStatus; 7],
    errors: [Option<GutsError>; 7],
}

impl Default for ValidationStatus {
    fn default() -> Self {
        ValidationStatus {
            statuses: [SetterStatus::Ok; 7],
            errors: Default::default(),
        }
    }
}

impl ValidationStatus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of a setter call and return its coarse status.
    pub fn record<T>(&mut self, slot: SetterSlot, result: &Result<T, GutsError>) -> SetterStatus {
        let status = match result {
            Ok(_) => {
                self.errors[slot.index()] = None;
                SetterStatus::Ok
            }
            Err(err) => {
                self.errors[slot.index()] = Some(err.clone());
                err.status()
            }
        };
        self.statuses[slot.index()] = status;
        status
    }

    pub fn get(&self, slot: SetterSlot) -> SetterStatus {
        self.statuses[slot.index()]
    }

    /// Structured error behind a failing slot, if any.
    pub fn error(&self, slot: SetterSlot) -> Option<&GutsError> {
        self.errors[slot.index()].as_ref()
    }

    /// `true` when every slot reports success.
    pub fn is_ready(&self) -> bool {
        self.statuses.iter().all(|s| s.is_ok())
    }

    /// First failing slot in evaluation order.
    pub fn first_failure(&self) -> Option<(SetterSlot, SetterStatus)> {
        SetterSlot::ALL
            .iter()
            .map(|&slot| (slot, self.get(slot)))
            .find(|(_, status)| !status.is_ok())
    }

    /// The legacy flag vector, one raw value per slot.
    pub fn legacy_values(&self) -> [f64; 7] {
        let mut out = [0.0; 7];
        for slot in SetterSlot::ALL {
            out[slot.index()] = self.get(slot).legacy_value(slot);
        }
        out
    }
}
