//! Tolerance-threshold distribution choice.
use crate::survival::errors::GutsError;
use std::str::FromStr;

/// Distribution the tolerance sample comes from.
///
/// - `None`: nothing usable configured; sampling fails.
/// - `Lognormal`: drawn internally from `LogNormal(θ_0, θ_1)`.
/// - `Empirical`: supplied by the caller, never redrawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThresholdDistribution {
    None,
    #[default]
    Lognormal,
    Empirical,
}

impl ThresholdDistribution {
    pub fn name(&self) -> &'static str {
        match self {
            ThresholdDistribution::None => "none",
            ThresholdDistribution::Lognormal => "lognormal",
            ThresholdDistribution::Empirical => "empirical",
        }
    }
}

impl std::fmt::Display for ThresholdDistribution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Only `"lognormal"` and `"empirical"` can be selected by name; `"none"` is
/// the fallback state after a rejected name, not a valid choice.
impl FromStr for ThresholdDistribution {
    type Err = GutsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lognormal" => Ok(ThresholdDistribution::Lognormal),
            "empirical" => Ok(ThresholdDistribution::Empirical),
            other => Err(GutsError::UnknownDistribution { name: other.to_string() }),
        }
    }
}
