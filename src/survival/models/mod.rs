//! models: the GUTS model object and its likelihood engine.
//!
//! - [`guts`] defines [`GutsModel`]: setters, accessors, the diagnostic dump
//!   and the evaluation entry points.
//! - [`likelihood`] holds the integration of damage and survival and the
//!   log-likelihood fold used by [`GutsModel::evaluate`].

pub mod guts;
pub mod likelihood;

pub use self::guts::GutsModel;
pub use self::likelihood::{EngineInputs, integrate_survival, loglik_from_survival};
