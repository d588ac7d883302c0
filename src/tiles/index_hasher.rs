//! Table-driven hashing into a bounded index space.

use crate::error::{FeatureError, Result};
use crate::utils::Random;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A fixed table of pseudo-random integers used to scramble coordinates.
///
/// Every key, negative ones included, maps to `table[key mod table_size]`,
/// and every table entry lies in `[0, value_range)`. The table is drawn once
/// from a seeded generator and never changes, so a hasher can be shared
/// freely between threads.
///
/// # Example
///
/// ```rust
/// use featvec::tiles::IndexHasher;
///
/// let hasher = IndexHasher::new(16, 100, Some(7)).unwrap();
/// assert!(hasher.lookup(-3) < 100);
/// assert_eq!(hasher.lookup(5), hasher.lookup(5 + 16));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "IndexHasherState"))]
pub struct IndexHasher {
    value_range: usize,
    seed: u64,
    table: Vec<usize>,
}

/// Unchecked wire form of an [`IndexHasher`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct IndexHasherState {
    value_range: usize,
    seed: u64,
    table: Vec<usize>,
}

#[cfg(feature = "serde")]
impl TryFrom<IndexHasherState> for IndexHasher {
    type Error = FeatureError;

    fn try_from(state: IndexHasherState) -> Result<Self> {
        let hasher = Self {
            value_range: state.value_range,
            seed: state.seed,
            table: state.table,
        };
        hasher.validate()?;
        Ok(hasher)
    }
}

impl IndexHasher {
    /// Checks the invariants `new` establishes.
    #[cfg_attr(not(feature = "serde"), allow(dead_code))]
    pub(crate) fn validate(&self) -> Result<()> {
        if self.table.is_empty() {
            return Err(FeatureError::invalid_config("table_size", "Must be > 0"));
        }
        if self.value_range == 0 {
            return Err(FeatureError::invalid_config("value_range", "Must be > 0"));
        }
        if let Some(&bad) = self.table.iter().find(|&&v| v >= self.value_range) {
            return Err(FeatureError::invalid_config(
                "table",
                format!("Entry {bad} exceeds value range {}", self.value_range),
            ));
        }
        Ok(())
    }

    /// Creates a hasher with `table_size` entries drawn uniformly from
    /// `[0, value_range)`.
    ///
    /// A `None` seed draws one from OS entropy; it can be recovered through
    /// [`IndexHasher::seed`] to reproduce the table later.
    pub fn new(table_size: usize, value_range: usize, seed: Option<u64>) -> Result<Self> {
        if table_size == 0 {
            return Err(FeatureError::invalid_config("table_size", "Must be > 0"));
        }
        if value_range == 0 {
            return Err(FeatureError::invalid_config("value_range", "Must be > 0"));
        }

        let mut rng = Random::from_optional_seed(seed);
        let table = (0..table_size).map(|_| rng.get_usize(value_range)).collect();

        tracing::debug!(table_size, value_range, seed = rng.seed(), "built index hash table");

        Ok(Self {
            value_range,
            seed: rng.seed(),
            table,
        })
    }

    /// Returns the table entry for `key`, wrapping it into the table.
    #[inline]
    pub fn lookup(&self, key: i64) -> usize {
        // rem_euclid keeps the slot non-negative for negative keys
        let slot = key.rem_euclid(self.table.len() as i64) as usize;
        self.table[slot]
    }

    /// Like [`IndexHasher::lookup`], for keys that may not fit in an `i64`.
    #[inline]
    pub(crate) fn lookup_wide(&self, key: i128) -> usize {
        let slot = key.rem_euclid(self.table.len() as i128) as usize;
        self.table[slot]
    }

    /// Returns the number of table entries.
    pub fn table_size(&self) -> usize {
        self.table.len()
    }

    /// Returns the exclusive upper bound of the table entries.
    pub fn value_range(&self) -> usize {
        self.value_range
    }

    /// Returns the seed the table was drawn from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the hash table.
    pub fn table(&self) -> &[usize] {
        &self.table
    }
}
