//! core: validated GUTS inputs, sampling, and per-step numerics.
//!
//! Purpose
//! -------
//! Collect the building blocks behind the GUTS likelihood engine: containers
//! for the exposure profile, observations and parameters, the distribution
//! choice and tolerance sampler, the per-setter validation status, the
//! closed-form damage kernel with its threshold cursor, and the evaluation
//! scratch buffers.
//!
//! Invariants & assumptions
//! ------------------------
//! - Containers ([`ExposureProfile`], [`ObservationSeries`], [`ModelParams`])
//!   can only be built through validating constructors, so the engine can
//!   index them without re-checking lengths or time ordering.
//! - The tolerance sample handed to the engine is sorted ascending; the
//!   [`ThresholdCursor`] relies on it.
//! - Nothing in this module performs I/O; logging of rejected inputs happens
//!   in the model layer.
//!
//! Testing notes
//! -------------
//! - Each submodule carries unit tests for its constructors and kernels;
//!   end-to-end behavior is covered by `models` and the integration suite.

pub mod damage;
pub mod distribution;
pub mod exposure;
pub mod observations;
pub mod options;
pub mod params;
pub mod sampler;
pub mod status;
pub mod validation;
pub mod workspace;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::damage::{Bucket, Segment, ThresholdCursor, damage_step};
pub use self::distribution::ThresholdDistribution;
pub use self::exposure::ExposureProfile;
pub use self::observations::ObservationSeries;
pub use self::options::{GutsOptions, LocationBound, SampleRefresh};
pub use self::params::{ModelParams, ParameterCheck};
pub use self::sampler::{SampleAction, SamplePlan, ToleranceSampler};
pub use self::status::{SetterSlot, SetterStatus, ValidationStatus};
pub use self::workspace::GutsScratch;
