//! Kanerva-style prototype distance.

use crate::error::{FeatureError, Result};
use crate::features::Feature;
use crate::norm::hamming_distance;
use crate::types::Bit;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Measures the Hamming distance from its input to a fixed prototype.
///
/// # Example
///
/// ```rust
/// use featvec::features::HammingPrototype;
///
/// let proto = HammingPrototype::new(vec![1, 0, 1, 0]).unwrap();
/// assert_eq!(proto.distance(&[1, 1, 1, 1]).unwrap(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HammingPrototype {
    prototype: Vec<Bit>,
}

impl HammingPrototype {
    /// Creates a feature around `prototype`.
    pub fn new(prototype: Vec<Bit>) -> Result<Self> {
        if prototype.is_empty() {
            return Err(FeatureError::invalid_config("prototype", "Must not be empty"));
        }
        Ok(Self { prototype })
    }

    /// Returns the prototype.
    pub fn prototype(&self) -> &[Bit] {
        &self.prototype
    }

    /// Hamming distance between `input` and the prototype.
    pub fn distance(&self, input: &[Bit]) -> Result<usize> {
        FeatureError::check_len(self.prototype.len(), input.len())?;
        hamming_distance(&self.prototype, input)
    }
}

impl Feature<[Bit]> for HammingPrototype {
    type Output = usize;

    fn n_input(&self) -> usize {
        self.prototype.len()
    }

    fn n_output(&self) -> usize {
        1
    }

    fn apply(&mut self, input: &[Bit]) -> Result<Vec<usize>> {
        Ok(vec![self.distance(input)?])
    }
}
