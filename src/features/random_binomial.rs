//! Random fixed-weight binary codes.
//!
//! Each distinct key is assigned a binary vector with exactly `num_active`
//! ones at random positions. Assignments are drawn lazily the first time a
//! key is seen and remembered afterwards.

use crate::error::{FeatureError, Result};
use crate::features::Feature;
use crate::types::Bit;
use crate::utils::Random;
use ahash::AHashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parameters for creating a [`RandomBinomial`] feature.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RandomBinomialParams {
    /// Length of every output vector.
    pub length: usize,

    /// Number of ones in every output vector.
    pub num_active: usize,

    /// Seed for the generator. `None` draws one from OS entropy.
    pub seed: Option<u64>,
}

impl Default for RandomBinomialParams {
    fn default() -> Self {
        Self {
            length: 1024,
            num_active: 32,
            seed: None,
        }
    }
}

/// Assigns each key a random binary vector of fixed weight.
///
/// The vector for a key depends on the seed and on the order in which keys
/// were first seen.
///
/// # Example
///
/// ```rust
/// use featvec::features::{RandomBinomial, RandomBinomialParams};
///
/// let mut feature = RandomBinomial::new(RandomBinomialParams {
///     length: 100,
///     num_active: 5,
///     seed: Some(42),
/// }).unwrap();
///
/// let a = feature.encode(7).to_vec();
/// assert_eq!(a.iter().filter(|&&b| b == 1).count(), 5);
/// assert_eq!(feature.encode(7), a.as_slice());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RandomBinomial {
    length: usize,
    num_active: usize,
    rng: Random,
    mapping: AHashMap<u64, Vec<Bit>>,
}

impl RandomBinomial {
    /// Creates a new random binomial feature.
    pub fn new(params: RandomBinomialParams) -> Result<Self> {
        if params.length == 0 {
            return Err(FeatureError::invalid_config("length", "Must be > 0"));
        }
        if params.num_active > params.length {
            return Err(FeatureError::invalid_config(
                "num_active",
                format!("Cannot exceed length ({})", params.length),
            ));
        }

        Ok(Self {
            length: params.length,
            num_active: params.num_active,
            rng: Random::from_optional_seed(params.seed),
            mapping: AHashMap::new(),
        })
    }

    /// Returns the output length.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Returns the number of ones per output.
    pub fn num_active(&self) -> usize {
        self.num_active
    }

    /// Returns how many keys have been assigned a vector so far.
    pub fn num_keys(&self) -> usize {
        self.mapping.len()
    }

    /// Returns the vector for `key`, drawing it on first use.
    pub fn encode(&mut self, key: u64) -> &[Bit] {
        let Self {
            length,
            num_active,
            rng,
            mapping,
        } = self;
        mapping.entry(key).or_insert_with(|| {
            let mut out = vec![0; *length];
            for idx in rng.sample_indices(*length, *num_active) {
                out[idx] = 1;
            }
            out
        })
    }

    /// Returns the vector for `key` if it has already been drawn.
    pub fn get(&self, key: u64) -> Option<&[Bit]> {
        self.mapping.get(&key).map(Vec::as_slice)
    }
}

impl Feature<u64> for RandomBinomial {
    type Output = Bit;

    fn n_input(&self) -> usize {
        1
    }

    fn n_output(&self) -> usize {
        self.length
    }

    fn apply(&mut self, input: &u64) -> Result<Vec<Bit>> {
        Ok(self.encode(*input).to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feature(seed: u64) -> RandomBinomial {
        RandomBinomial::new(RandomBinomialParams {
            length: 200,
            num_active: 20,
            seed: Some(seed),
        })
        .unwrap()
    }

    #[test]
    fn test_fixed_weight() {
        let mut f = feature(1);

        for key in 0..50 {
            let bits = f.encode(key);
            assert_eq!(bits.len(), 200);
            assert_eq!(bits.iter().filter(|&&b| b == 1).count(), 20);
        }
        assert_eq!(f.num_keys(), 50);
    }

    #[test]
    fn test_memoized() {
        let mut f = feature(1);
        let first = f.encode(99).to_vec();
        f.encode(100);
        assert_eq!(f.encode(99), first.as_slice());
        assert_eq!(f.get(99), Some(first.as_slice()));
        assert_eq!(f.get(12345), None);
    }

    #[test]
    fn test_deterministic() {
        let mut a = feature(5);
        let mut b = feature(5);
        for key in [3, 1, 4, 1, 5] {
            assert_eq!(a.encode(key), b.encode(key));
        }
    }

    #[test]
    fn test_distinct_keys_differ() {
        let mut f = feature(5);
        let a = f.encode(1).to_vec();
        let b = f.encode(2).to_vec();
        assert_ne!(a, b);
    }

    #[test]
    fn test_all_active() {
        let mut f = RandomBinomial::new(RandomBinomialParams {
            length: 8,
            num_active: 8,
            seed: Some(0),
        })
        .unwrap();
        assert_eq!(f.encode(0), &[1; 8]);
    }

    #[test]
    fn test_invalid_params() {
        assert!(RandomBinomial::new(RandomBinomialParams {
            length: 0,
            num_active: 0,
            seed: None,
        })
        .is_err());
        assert!(RandomBinomial::new(RandomBinomialParams {
            length: 4,
            num_active: 5,
            seed: None,
        })
        .is_err());
    }

    #[test]
    fn test_feature_trait() {
        let mut f = feature(2);
        let direct = f.encode(10).to_vec();
        assert_eq!(f.apply(&10).unwrap(), direct);
    }
}
