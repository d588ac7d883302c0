//! Tile usage statistics.
//!
//! Tracks how often each tile index is activated across encoded inputs, which
//! is the practical way to check that a hashed tile coder spreads its inputs
//! evenly over the index space.

use crate::error::{FeatureError, Result};
use std::fmt;

/// Histogram of active tile indices observed over many encodings.
#[derive(Debug, Clone)]
pub struct TileUsage {
    /// Number of encoded outputs seen.
    num_samples: usize,

    /// Activation counts per tile.
    counts: Vec<usize>,
}

impl TileUsage {
    /// Creates a tracker for indices in `[0, n_tiles)`.
    #[must_use]
    pub fn new(n_tiles: usize) -> Self {
        Self {
            num_samples: 0,
            counts: vec![0; n_tiles],
        }
    }

    /// Records one encoded output.
    ///
    /// A sample holding an index outside `[0, n_tiles)` is rejected as a
    /// whole and leaves the statistics unchanged.
    pub fn add_sample(&mut self, active: &[usize]) -> Result<()> {
        let size = self.counts.len();
        if let Some(&index) = active.iter().find(|&&idx| idx >= size) {
            return Err(FeatureError::IndexOutOfBounds { index, size });
        }

        self.num_samples += 1;
        for &idx in active {
            self.counts[idx] += 1;
        }
        Ok(())
    }

    /// Returns the number of encoded outputs observed.
    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    /// Returns the activation count of every tile.
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Sums the tile counts into `num_bins` equal-width bins.
    ///
    /// The last bin absorbs the remainder when `n_tiles` is not a multiple
    /// of `num_bins`.
    #[must_use]
    pub fn binned(&self, num_bins: usize) -> Vec<usize> {
        let num_bins = num_bins.clamp(1, self.counts.len().max(1));
        let width = (self.counts.len() / num_bins).max(1);
        let mut bins = vec![0; num_bins];
        for (idx, &count) in self.counts.iter().enumerate() {
            bins[(idx / width).min(num_bins - 1)] += count;
        }
        bins
    }

    /// Mean activation count per tile.
    pub fn mean(&self) -> f64 {
        mean(&self.counts)
    }

    /// Population standard deviation of the activation counts.
    pub fn std_dev(&self) -> f64 {
        std_dev(&self.counts)
    }

    /// Largest absolute z-score among the bins of [`TileUsage::binned`].
    ///
    /// Returns `0.0` when all bins are equal.
    #[must_use]
    pub fn max_z_score(&self, num_bins: usize) -> f64 {
        let bins = self.binned(num_bins);
        let mu = mean(&bins);
        let sigma = std_dev(&bins);
        if sigma == 0.0 {
            return 0.0;
        }
        bins.iter()
            .map(|&count| (count as f64 - mu).abs() / sigma)
            .fold(0.0, f64::max)
    }

    /// Returns the number of tiles that have never been active.
    pub fn num_unused(&self) -> usize {
        self.counts.iter().filter(|&&c| c == 0).count()
    }

    /// Resets all statistics.
    pub fn reset(&mut self) {
        self.num_samples = 0;
        self.counts.fill(0);
    }
}

fn mean(values: &[usize]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<usize>() as f64 / values.len() as f64
}

fn std_dev(values: &[usize]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mu = mean(values);
    let variance = values
        .iter()
        .map(|&v| (v as f64 - mu).powi(2))
        .sum::<f64>()
        / values.len() as f64;
    variance.sqrt()
}

impl fmt::Display for TileUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tile Usage ({} samples):", self.num_samples)?;
        writeln!(
            f,
            "  Counts: mean={:.2}, std={:.2}",
            self.mean(),
            self.std_dev()
        )?;
        writeln!(
            f,
            "  Unused tiles: {} of {}",
            self.num_unused(),
            self.counts.len()
        )?;
        Ok(())
    }
}
