//! Tunable election parameters.

use serde::{Deserialize, Serialize};

/// An exact fraction, compared without floating point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ratio {
    pub numerator: u64,
    pub denominator: u64,
}

impl Ratio {
    pub const fn new(numerator: u64, denominator: u64) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// `part / whole >= numerator / denominator`.
    pub fn reached_by(&self, part: u128, whole: u128) -> bool {
        part.saturating_mul(self.denominator as u128)
            >= whole.saturating_mul(self.numerator as u128)
    }

    pub fn is_valid(&self) -> bool {
        self.denominator != 0 && self.numerator <= self.denominator
    }
}

/// Share of the baseline total power that concludes an election.
pub const QUORUM: Ratio = Ratio::new(2, 3);

/// Parameters of election admission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionParams {
    /// A single change must request strictly less than this share of the
    /// current total power.
    #[serde(default = "default_power_change_bound")]
    pub power_change_bound: Ratio,
}

fn default_power_change_bound() -> Ratio {
    Ratio::new(1, 3)
}

impl Default for ElectionParams {
    fn default() -> Self {
        Self {
            power_change_bound: default_power_change_bound(),
        }
    }
}
