//! tktd_guts: GUTS individual-tolerance survival likelihood.
//!
//! Purpose
//! -------
//! Serve as the crate root for the stochastic General Unified Threshold model
//! of Survival with individual tolerance (GUTS-IT). The crate evaluates the
//! log-likelihood of observed survivor counts given a time-varying exposure
//! profile, a parameter vector, and a population sample of tolerance
//! thresholds, so that an external fitting routine can call it repeatedly.
//!
//! Key behaviors
//! -------------
//! - Re-export the `survival` module as the public crate surface.
//! - Damage follows the exact solution of first-order kinetics under
//!   piecewise-linear exposure; survival is computed against a sorted
//!   tolerance sample using a moving threshold cursor.
//! - Every setter reports a structured status; evaluation returns either a
//!   tagged [`survival::LoglikOutcome`] or the legacy `f64` sentinel.
//!
//! Invariants & assumptions
//! ------------------------
//! - Exposure and observation times start at 0 and are strictly increasing.
//! - Each model owns its random generator and scratch buffers; evaluation
//!   takes `&mut self`, so one model is never evaluated concurrently.
//! - Parameter estimation, confidence intervals, and file I/O are out of
//!   scope; the crate is a likelihood kernel.
//!
//! Conventions
//! -----------
//! - Parameter vectors are `[h_b, k_e, k_k, θ…]`.
//! - Rejected inputs are logged at `debug` through the `log` facade; callers
//!   choose the logger implementation.
//!
//! Downstream usage
//! ----------------
//! - `use tktd_guts::survival::prelude::*;` pulls in the model, its options
//!   and the status/outcome types.
//!
//! Testing notes
//! -------------
//! - Numerical kernels and containers are covered by unit tests in the inner
//!   modules; `tests/integration_guts_pipeline.rs` exercises the full
//!   configure-then-evaluate flow.

pub mod survival;
