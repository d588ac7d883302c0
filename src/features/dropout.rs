//! Dropout for regularizing or sparsifying features.

use crate::error::{FeatureError, Result};
use crate::features::Feature;
use crate::types::Real;
use crate::utils::Random;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parameters for creating a [`DropOut`] feature.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DropOutParams {
    /// Length of every input vector.
    pub n_input: usize,

    /// Probability of zeroing each entry.
    pub p: f64,

    /// Seed for the generator. `None` draws one from OS entropy.
    pub seed: Option<u64>,
}

impl Default for DropOutParams {
    fn default() -> Self {
        Self {
            n_input: 1,
            p: 0.5,
            seed: None,
        }
    }
}

/// Zeroes each input entry independently with probability `p`.
///
/// The input is left untouched; a modified copy is returned. Surviving
/// entries are not rescaled.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DropOut {
    n_input: usize,
    p: f64,
    rng: Random,
}

impl DropOut {
    /// Creates a new dropout feature.
    pub fn new(params: DropOutParams) -> Result<Self> {
        if params.n_input == 0 {
            return Err(FeatureError::invalid_config("n_input", "Must be > 0"));
        }
        if !(0.0..=1.0).contains(&params.p) {
            return Err(FeatureError::invalid_config(
                "p",
                format!("Must be between 0.0 and 1.0, got {}", params.p),
            ));
        }

        Ok(Self {
            n_input: params.n_input,
            p: params.p,
            rng: Random::from_optional_seed(params.seed),
        })
    }

    /// Returns the drop probability.
    pub fn p(&self) -> f64 {
        self.p
    }

    /// Returns a copy of `input` with randomly dropped entries.
    pub fn apply_to(&mut self, input: &[Real]) -> Result<Vec<Real>> {
        FeatureError::check_len(self.n_input, input.len())?;

        Ok(input
            .iter()
            .map(|&x| {
                if self.rng.get_bool_with_prob(self.p) {
                    0.0
                } else {
                    x
                }
            })
            .collect())
    }
}

impl Feature<[Real]> for DropOut {
    type Output = Real;

    fn n_input(&self) -> usize {
        self.n_input
    }

    fn n_output(&self) -> usize {
        self.n_input
    }

    fn apply(&mut self, input: &[Real]) -> Result<Vec<Real>> {
        self.apply_to(input)
    }
}
