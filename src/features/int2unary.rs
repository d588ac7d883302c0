//! Integer to one-hot conversion.
//!
//! Useful for expressing the tabular case as a linear feature vector.

use crate::error::{FeatureError, Result};
use crate::features::Feature;
use crate::types::Bit;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maps an index to a vector that is zero everywhere except at that index.
///
/// # Example
///
/// ```rust
/// use featvec::features::Int2Unary;
///
/// let encoder = Int2Unary::new(4).unwrap();
/// assert_eq!(encoder.encode(2).unwrap(), vec![0, 0, 1, 0]);
/// assert!(encoder.encode(4).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Int2Unary {
    length: usize,
}

impl Int2Unary {
    /// Creates a one-hot encoder over `length` positions.
    pub fn new(length: usize) -> Result<Self> {
        if length == 0 {
            return Err(FeatureError::invalid_config("length", "Must be > 0"));
        }
        Ok(Self { length })
    }

    /// Returns the output length.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Encodes `index` as a one-hot vector.
    pub fn encode(&self, index: usize) -> Result<Vec<Bit>> {
        if index >= self.length {
            return Err(FeatureError::IndexOutOfBounds {
                index,
                size: self.length,
            });
        }
        let mut out = vec![0; self.length];
        out[index] = 1;
        Ok(out)
    }
}

impl Feature<usize> for Int2Unary {
    type Output = Bit;

    fn n_input(&self) -> usize {
        1
    }

    fn n_output(&self) -> usize {
        self.length
    }

    fn apply(&mut self, input: &usize) -> Result<Vec<Bit>> {
        self.encode(*input)
    }
}
