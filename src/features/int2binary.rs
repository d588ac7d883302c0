//! Integer to bit vector conversion.

use crate::error::{FeatureError, Result};
use crate::features::Feature;
use crate::types::Bit;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Converts integers into their binary representation.
///
/// Only the lowest `length` bits are kept, so the conversion is modulo
/// `2^length`: `2^length` encodes like `0` and `-1` encodes like
/// `2^length - 1`. Bit `i` of the output is bit `i` of the integer
/// (least significant first).
///
/// # Example
///
/// ```rust
/// use featvec::features::Int2Binary;
///
/// let encoder = Int2Binary::new(4).unwrap();
/// assert_eq!(encoder.encode(6), vec![0, 1, 1, 0]);
/// assert_eq!(encoder.encode(-1), vec![1, 1, 1, 1]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Int2Binary {
    length: usize,
}

impl Int2Binary {
    /// Largest supported output length.
    pub const MAX_LENGTH: usize = 64;

    /// Creates a converter producing `length` bits.
    pub fn new(length: usize) -> Result<Self> {
        if length == 0 || length > Self::MAX_LENGTH {
            return Err(FeatureError::invalid_config(
                "length",
                format!("Must be in 1..={}, got {length}", Self::MAX_LENGTH),
            ));
        }
        Ok(Self { length })
    }

    /// Returns the number of output bits.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Encodes a single integer.
    pub fn encode(&self, value: i64) -> Vec<Bit> {
        (0..self.length)
            .map(|i| ((value >> i) & 1) as Bit)
            .collect()
    }

    /// Encodes every integer, one row per value.
    pub fn encode_all(&self, values: &[i64]) -> Vec<Vec<Bit>> {
        values.iter().map(|&v| self.encode(v)).collect()
    }
}

impl Feature<i64> for Int2Binary {
    type Output = Bit;

    fn n_input(&self) -> usize {
        1
    }

    fn n_output(&self) -> usize {
        self.length
    }

    fn apply(&mut self, input: &i64) -> Result<Vec<Bit>> {
        Ok(self.encode(*input))
    }
}
