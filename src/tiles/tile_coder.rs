//! Hashed tile coding.
//!
//! The tile coder overlays `n_output` grids ("tilings") on the input space.
//! Every tiling partitions each axis into cells of width `n_output` (after
//! scaling), and successive tilings are shifted against each other by a
//! per-dimension displacement so their cell boundaries rarely coincide. The
//! cell occupied in each tiling is hashed into `[0, n_tiles)`, giving one
//! active tile index per tiling.
//!
//! All tilings and dimensions share a single [`IndexHasher`] table, which
//! keeps the memory footprint small at the cost of slightly more collisions
//! than one table per tiling would have.

use crate::error::{FeatureError, Result};
use crate::features::Feature;
use crate::tiles::IndexHasher;
use crate::types::{Real, TileIdx, DEFAULT_TABLE_SIZE};
use crate::utils::math::coprimes_below;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Parameters for creating a [`TileCoder`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TileCoderParams {
    /// Length of every input vector.
    pub n_input: usize,

    /// Number of tilings, which is also the length of every output.
    pub n_output: usize,

    /// Size of the index space; every output lies in `[0, n_tiles)`.
    pub n_tiles: usize,

    /// Per-dimension divisor applied before discretization.
    /// `None` means no scaling.
    pub scale: Option<Vec<Real>>,

    /// Number of entries in the hash table.
    pub table_size: usize,

    /// Seed for the hash table. `None` draws one from OS entropy.
    pub seed: Option<u64>,
}

impl Default for TileCoderParams {
    fn default() -> Self {
        Self {
            n_input: 1,
            n_output: 8,
            n_tiles: 1024,
            scale: None,
            table_size: DEFAULT_TABLE_SIZE,
            seed: None,
        }
    }
}

/// Hashed tile coder.
///
/// Converts a real-valued vector of length `n_input` into `n_output` active
/// tile indices, one per tiling. Construction does all allocation and
/// consumes all randomness; encoding is a pure function of the input, so a
/// single coder can be shared across threads.
///
/// # Example
///
/// ```rust
/// use featvec::tiles::{TileCoder, TileCoderParams};
///
/// let coder = TileCoder::new(TileCoderParams {
///     n_input: 2,
///     n_output: 8,
///     n_tiles: 512,
///     scale: Some(vec![0.5, 0.5]),
///     seed: Some(1),
///     ..Default::default()
/// }).unwrap();
///
/// let a = coder.encode(&[1.0, 2.0]).unwrap();
/// let b = coder.encode(&[1.0, 2.0]).unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.len(), 8);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "TileCoderState"))]
pub struct TileCoder {
    n_input: usize,
    n_output: usize,
    n_tiles: usize,

    /// Per-dimension divisor.
    scale: Vec<Real>,

    /// Per-dimension stagger between successive tilings.
    displacement: Vec<i64>,

    /// Row `t` holds `t * displacement`, flattened row-major.
    offset_matrix: Vec<i64>,

    hasher: IndexHasher,
}

/// Unchecked wire form of a [`TileCoder`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct TileCoderState {
    n_input: usize,
    n_output: usize,
    n_tiles: usize,
    scale: Vec<Real>,
    displacement: Vec<i64>,
    offset_matrix: Vec<i64>,
    hasher: IndexHasher,
}

#[cfg(feature = "serde")]
impl TryFrom<TileCoderState> for TileCoder {
    type Error = FeatureError;

    fn try_from(state: TileCoderState) -> Result<Self> {
        let coder = Self {
            n_input: state.n_input,
            n_output: state.n_output,
            n_tiles: state.n_tiles,
            scale: state.scale,
            displacement: state.displacement,
            offset_matrix: state.offset_matrix,
            hasher: state.hasher,
        };
        coder.validate()?;
        Ok(coder)
    }
}

impl TileCoder {
    /// Creates a new tile coder.
    pub fn new(params: TileCoderParams) -> Result<Self> {
        if params.n_input == 0 {
            return Err(FeatureError::invalid_config("n_input", "Must be > 0"));
        }
        if params.n_output == 0 {
            return Err(FeatureError::invalid_config("n_output", "Must be > 0"));
        }
        if params.n_tiles == 0 {
            return Err(FeatureError::invalid_config("n_tiles", "Must be > 0"));
        }

        let scale = match params.scale {
            Some(scale) => {
                Self::check_scale(params.n_input, &scale)?;
                scale
            }
            None => vec![1.0; params.n_input],
        };

        let displacement = Self::displacement_vector(params.n_input, params.n_output)?;

        let offset_matrix = (0..params.n_output as i64)
            .flat_map(|t| displacement.iter().map(move |&d| t * d))
            .collect();

        let hasher = IndexHasher::new(params.table_size, params.n_tiles, params.seed)?;

        tracing::debug!(
            n_input = params.n_input,
            n_output = params.n_output,
            n_tiles = params.n_tiles,
            ?displacement,
            "built tile coder"
        );

        Ok(Self {
            n_input: params.n_input,
            n_output: params.n_output,
            n_tiles: params.n_tiles,
            scale,
            displacement,
            offset_matrix,
            hasher,
        })
    }

    fn check_scale(n_input: usize, scale: &[Real]) -> Result<()> {
        FeatureError::check_len(n_input, scale.len())?;
        if let Some(bad) = scale.iter().find(|s| !(s.is_finite() && **s > 0.0)) {
            return Err(FeatureError::invalid_config(
                "scale",
                format!("Entries must be finite and > 0, got {bad}"),
            ));
        }
        Ok(())
    }

    /// Checks the invariants `new` establishes, for coders restored from
    /// storage.
    #[cfg_attr(not(feature = "serde"), allow(dead_code))]
    pub(crate) fn validate(&self) -> Result<()> {
        if self.n_input == 0 {
            return Err(FeatureError::invalid_config("n_input", "Must be > 0"));
        }
        if self.n_output == 0 {
            return Err(FeatureError::invalid_config("n_output", "Must be > 0"));
        }
        if self.n_tiles == 0 {
            return Err(FeatureError::invalid_config("n_tiles", "Must be > 0"));
        }
        Self::check_scale(self.n_input, &self.scale)?;
        FeatureError::check_len(self.n_input, self.displacement.len())?;
        if self.displacement.iter().any(|&d| d < 1) {
            return Err(FeatureError::invalid_config("displacement", "Entries must be >= 1"));
        }

        let expected = self.n_output.checked_mul(self.n_input).ok_or_else(|| {
            FeatureError::invalid_config("n_output", "Offset matrix size overflows")
        })?;
        FeatureError::check_len(expected, self.offset_matrix.len())?;
        let consistent = self
            .offset_matrix()
            .zip(0i64..)
            .all(|(row, t)| row.iter().zip(&self.displacement).all(|(&o, &d)| t.checked_mul(d) == Some(o)));
        if !consistent {
            return Err(FeatureError::invalid_config(
                "offset_matrix",
                "Rows must equal tiling index times displacement",
            ));
        }

        self.hasher.validate()?;
        if self.hasher.value_range() != self.n_tiles {
            return Err(FeatureError::invalid_config(
                "n_tiles",
                format!("Hasher value range {} differs", self.hasher.value_range()),
            ));
        }
        Ok(())
    }

    /// Chooses the per-dimension displacements.
    ///
    /// Candidates are the integers in `[1, n_output / 2)` coprime with
    /// `n_output`, in increasing order. When there are fewer candidates than
    /// dimensions the list is cycled, so some dimensions share a displacement;
    /// more tilings give more distinct candidates.
    fn displacement_vector(n_input: usize, n_output: usize) -> Result<Vec<i64>> {
        let candidates = coprimes_below(n_output, n_output / 2);
        if candidates.is_empty() {
            return Err(FeatureError::invalid_config(
                "n_output",
                format!("No displacement coprime with {n_output} below {}; use at least 4 tilings", n_output / 2),
            ));
        }

        if candidates.len() < n_input {
            tracing::warn!(
                n_input,
                n_output,
                available = candidates.len(),
                "not enough coprime displacements, reusing them across dimensions"
            );
        }

        Ok(candidates
            .iter()
            .cycle()
            .take(n_input)
            .map(|&c| c as i64)
            .collect())
    }

    /// Encodes one input vector into `n_output` active tile indices.
    pub fn encode(&self, input: &[Real]) -> Result<Vec<TileIdx>> {
        let mut output = vec![0; self.n_output];
        self.encode_into(input, &mut output)?;
        Ok(output)
    }

    /// Encodes one input vector, writing the active tiles into `output`.
    ///
    /// `output` must have length `n_output`.
    pub fn encode_into(&self, input: &[Real], output: &mut [TileIdx]) -> Result<()> {
        FeatureError::check_len(self.n_input, input.len())?;
        FeatureError::check_len(self.n_output, output.len())?;

        let coords = self.discretize(input);
        let width = self.n_output as i128;
        let n_tiles = self.n_tiles;

        for (tile, offsets) in output
            .iter_mut()
            .zip(self.offset_matrix.chunks_exact(self.n_input))
        {
            // Snap each coordinate down to this tiling's grid, then hash it.
            *tile = coords
                .iter()
                .zip(offsets)
                .map(|(&x, &offset)| {
                    let snapped = x - (x - i128::from(offset)).rem_euclid(width);
                    self.hasher.lookup_wide(snapped)
                })
                .fold(0, |acc, h| (acc + h) % n_tiles);
        }

        Ok(())
    }

    /// Scales and floors the input. Floats outside the `i64` range saturate
    /// and NaN maps to zero.
    fn discretize(&self, input: &[Real]) -> Vec<i128> {
        input
            .iter()
            .zip(&self.scale)
            .map(|(&value, &scale)| i128::from((value / scale).floor() as i64))
            .collect()
    }

    /// Encodes every input in order, failing on the first malformed one.
    pub fn encode_batch<V: AsRef<[Real]>>(&self, inputs: &[V]) -> Result<Vec<Vec<TileIdx>>> {
        inputs.iter().map(|input| self.encode(input.as_ref())).collect()
    }

    /// Parallel version of [`TileCoder::encode_batch`]; output order matches
    /// input order.
    #[cfg(feature = "rayon")]
    pub fn encode_batch_par<V>(&self, inputs: &[V]) -> Result<Vec<Vec<TileIdx>>>
    where
        V: AsRef<[Real]> + Sync,
    {
        inputs
            .par_iter()
            .map(|input| self.encode(input.as_ref()))
            .collect()
    }

    /// Returns the input length.
    pub fn n_input(&self) -> usize {
        self.n_input
    }

    /// Returns the number of tilings.
    pub fn n_output(&self) -> usize {
        self.n_output
    }

    /// Returns the size of the index space.
    pub fn n_tiles(&self) -> usize {
        self.n_tiles
    }

    /// Returns the per-dimension scale.
    pub fn scale(&self) -> &[Real] {
        &self.scale
    }

    /// Returns the per-dimension displacement.
    pub fn displacement(&self) -> &[i64] {
        &self.displacement
    }

    /// Returns the offsets of tiling `t`, i.e. `t * displacement`.
    ///
    /// # Panics
    ///
    /// Panics if `t >= n_output`.
    pub fn offsets(&self, t: usize) -> &[i64] {
        &self.offset_matrix[t * self.n_input..(t + 1) * self.n_input]
    }

    /// Returns the offset matrix as rows, one per tiling.
    pub fn offset_matrix(&self) -> impl Iterator<Item = &[i64]> {
        self.offset_matrix.chunks_exact(self.n_input)
    }

    /// Returns the hasher shared by all tilings.
    pub fn hasher(&self) -> &IndexHasher {
        &self.hasher
    }
}

impl Feature<[Real]> for TileCoder {
    type Output = TileIdx;

    fn n_input(&self) -> usize {
        self.n_input
    }

    fn n_output(&self) -> usize {
        self.n_output
    }

    fn apply(&mut self, input: &[Real]) -> Result<Vec<TileIdx>> {
        self.encode(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::math::gcd;

    fn coder(n_input: usize, n_output: usize, n_tiles: usize) -> TileCoder {
        TileCoder::new(TileCoderParams {
            n_input,
            n_output,
            n_tiles,
            seed: Some(123),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_create_coder() {
        let coder = coder(4, 16, 1000);

        assert_eq!(coder.n_input(), 4);
        assert_eq!(coder.n_output(), 16);
        assert_eq!(coder.n_tiles(), 1000);
        assert!(coder.scale().iter().all(|&s| s == 1.0));
        assert_eq!(coder.hasher().table_size(), DEFAULT_TABLE_SIZE);
        assert_eq!(coder.hasher().value_range(), 1000);
    }

    #[test]
    fn test_worked_example() {
        let coder = coder(4, 16, 1000);
        assert_eq!(coder.displacement(), &[1, 3, 5, 7]);

        let first = coder.encode(&[10.0, 20.0, 30.0, 40.0]).unwrap();
        let second = coder.encode(&[10.0, 20.0, 30.0, 40.0]).unwrap();

        assert_eq!(first.len(), 16);
        assert!(first.iter().all(|&tile| tile < 1000));
        assert_eq!(first, second);
    }

    #[test]
    fn test_matches_direct_formula() {
        let coder = coder(3, 8, 97);
        let input: [Real; 3] = [-3.5, 0.25, 17.0];
        let encoded = coder.encode(&input).unwrap();

        for (t, &tile) in encoded.iter().enumerate() {
            let mut sum = 0;
            for d in 0..3 {
                let x = input[d].floor() as i64;
                let offset = t as i64 * coder.displacement()[d];
                let v = x - (x - offset).rem_euclid(8);
                sum += coder.hasher().lookup(v);
            }
            assert_eq!(tile, sum % 97);
        }
    }

    #[test]
    fn test_invalid_dimensions() {
        for (n_input, n_output, n_tiles, name) in [
            (0, 16, 100, "n_input"),
            (4, 0, 100, "n_output"),
            (4, 16, 0, "n_tiles"),
        ] {
            let result = TileCoder::new(TileCoderParams {
                n_input,
                n_output,
                n_tiles,
                seed: Some(1),
                ..Default::default()
            });
            assert!(
                matches!(result, Err(FeatureError::InvalidConfig { name: n, .. }) if n == name),
                "expected InvalidConfig for {name}"
            );
        }
    }

    #[test]
    fn test_zero_table_size() {
        let result = TileCoder::new(TileCoderParams {
            n_input: 2,
            n_output: 8,
            n_tiles: 10,
            table_size: 0,
            ..Default::default()
        });
        assert!(matches!(result, Err(FeatureError::InvalidConfig { .. })));
    }

    #[test]
    fn test_too_few_tilings() {
        for n_output in 1..4 {
            let result = TileCoder::new(TileCoderParams {
                n_input: 2,
                n_output,
                n_tiles: 10,
                seed: Some(1),
                ..Default::default()
            });
            assert!(matches!(
                result,
                Err(FeatureError::InvalidConfig { name: "n_output", .. })
            ));
        }
    }

    #[test]
    fn test_scale_length_mismatch() {
        let result = TileCoder::new(TileCoderParams {
            n_input: 4,
            n_output: 16,
            n_tiles: 100,
            scale: Some(vec![1.0, 2.0]),
            ..Default::default()
        });
        assert_eq!(
            result.unwrap_err(),
            FeatureError::ShapeMismatch {
                expected: 4,
                actual: 2
            }
        );
    }

    #[test]
    fn test_non_positive_scale() {
        for bad in [0.0, -1.0, Real::NAN, Real::INFINITY] {
            let result = TileCoder::new(TileCoderParams {
                n_input: 2,
                n_output: 8,
                n_tiles: 100,
                scale: Some(vec![1.0, bad]),
                ..Default::default()
            });
            assert!(matches!(
                result,
                Err(FeatureError::InvalidConfig { name: "scale", .. })
            ));
        }
    }

    #[test]
    fn test_scale_coarsens_grid() {
        let plain = coder(1, 8, 1000);
        let scaled = TileCoder::new(TileCoderParams {
            n_input: 1,
            n_output: 8,
            n_tiles: 1000,
            scale: Some(vec![10.0]),
            seed: Some(123),
            ..Default::default()
        })
        .unwrap();

        // Scaling by 10 makes 35 land where 3.5 lands without scaling.
        assert_eq!(
            scaled.encode(&[35.0]).unwrap(),
            plain.encode(&[3.5]).unwrap()
        );
    }

    #[test]
    fn test_displacement_cycles_when_short() {
        // Only 1 and 3 are coprime with 8 below 4.
        let coder = coder(5, 8, 100);
        assert_eq!(coder.displacement(), &[1, 3, 1, 3, 1]);
    }

    #[test]
    fn test_displacement_coprime() {
        for n_output in 4..64 {
            let coder = coder(6, n_output, 100);
            assert_eq!(coder.displacement().len(), 6);
            for &d in coder.displacement() {
                assert_eq!(gcd(d as usize, n_output), 1);
                assert!((d as usize) < n_output / 2);
            }
        }
    }

    #[test]
    fn test_offset_matrix() {
        let coder = coder(4, 16, 1000);
        let rows: Vec<&[i64]> = coder.offset_matrix().collect();

        assert_eq!(rows.len(), 16);
        assert_eq!(rows[0], &[0, 0, 0, 0]);
        assert_eq!(rows[1], &[1, 3, 5, 7]);
        assert_eq!(rows[3], &[3, 9, 15, 21]);
        assert_eq!(coder.offsets(15), &[15, 45, 75, 105]);
    }

    #[test]
    fn test_input_length_mismatch() {
        let coder = coder(4, 16, 1000);

        assert_eq!(
            coder.encode(&[1.0, 2.0, 3.0]).unwrap_err(),
            FeatureError::ShapeMismatch {
                expected: 4,
                actual: 3
            }
        );
        // Still usable afterwards
        assert!(coder.encode(&[1.0, 2.0, 3.0, 4.0]).is_ok());
    }

    #[test]
    fn test_encode_into_checks_output() {
        let coder = coder(2, 8, 100);
        let mut short = [0; 4];
        assert!(matches!(
            coder.encode_into(&[1.0, 2.0], &mut short),
            Err(FeatureError::ShapeMismatch { expected: 8, actual: 4 })
        ));

        let mut out = [0; 8];
        coder.encode_into(&[1.0, 2.0], &mut out).unwrap();
        assert_eq!(out.to_vec(), coder.encode(&[1.0, 2.0]).unwrap());
    }

    #[test]
    fn test_same_cell_same_tiles() {
        let coder = coder(2, 8, 1000);
        // Inputs with identical floors always land in the same tiles.
        assert_eq!(
            coder.encode(&[5.1, -2.9]).unwrap(),
            coder.encode(&[5.9, -2.1]).unwrap()
        );
    }

    #[test]
    fn test_generalization_decays_with_distance() {
        let coder = coder(1, 16, 100_000);
        let base = coder.encode(&[100.0]).unwrap();

        let shared = |other: &[TileIdx]| base.iter().zip(other).filter(|(a, b)| a == b).count();
        let near = coder.encode(&[101.0]).unwrap();
        let far = coder.encode(&[150.0]).unwrap();

        // One unit step crosses exactly one tiling boundary.
        assert!(shared(&near) >= 15);
        assert!(shared(&far) < shared(&near));
    }

    #[test]
    fn test_extreme_inputs_stay_in_range() {
        let coder = coder(3, 8, 50);
        let out = coder
            .encode(&[Real::MAX, Real::NEG_INFINITY, Real::NAN])
            .unwrap();
        assert!(out.iter().all(|&tile| tile < 50));
    }

    #[test]
    fn test_batch_matches_single() {
        let coder = coder(2, 8, 100);
        let inputs: Vec<Vec<Real>> = vec![vec![0.0, 1.0], vec![2.5, -3.0], vec![100.0, 7.0]];

        let batch = coder.encode_batch(&inputs).unwrap();
        assert_eq!(batch.len(), 3);
        for (input, encoded) in inputs.iter().zip(&batch) {
            assert_eq!(&coder.encode(input).unwrap(), encoded);
        }
    }

    #[test]
    fn test_batch_rejects_bad_row() {
        let coder = coder(2, 8, 100);
        let inputs: Vec<Vec<Real>> = vec![vec![0.0, 1.0], vec![2.5]];
        assert!(matches!(
            coder.encode_batch(&inputs),
            Err(FeatureError::ShapeMismatch { expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn test_empty_batch() {
        let coder = coder(2, 8, 100);
        let inputs: [[Real; 2]; 0] = [];
        assert!(coder.encode_batch(&inputs).unwrap().is_empty());
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn test_parallel_batch_preserves_order() {
        let coder = coder(3, 16, 1000);
        let inputs: Vec<[Real; 3]> = (0..200)
            .map(|i| {
                let x = i as Real;
                [x, x * 0.5, -x]
            })
            .collect();

        assert_eq!(
            coder.encode_batch_par(&inputs).unwrap(),
            coder.encode_batch(&inputs).unwrap()
        );
    }

    #[test]
    fn test_feature_trait() {
        let mut coder = coder(2, 8, 100);
        assert_eq!(Feature::n_input(&coder), 2);
        assert_eq!(Feature::n_output(&coder), 8);

        let direct = coder.encode(&[3.0, 4.0]).unwrap();
        assert_eq!(coder.apply(&[3.0, 4.0][..]).unwrap(), direct);
    }

    #[test]
    fn test_validate() {
        let coder = coder(2, 8, 100);
        assert!(coder.validate().is_ok());

        let mut truncated = coder.clone();
        truncated.offset_matrix.truncate(2);
        assert!(matches!(
            truncated.validate(),
            Err(FeatureError::ShapeMismatch { expected: 16, actual: 2 })
        ));

        let mut skewed = coder.clone();
        skewed.offset_matrix[5] += 1;
        assert!(matches!(
            skewed.validate(),
            Err(FeatureError::InvalidConfig { name: "offset_matrix", .. })
        ));

        let mut flat = coder.clone();
        flat.n_input = 0;
        assert!(flat.validate().is_err());

        let mut rescaled = coder.clone();
        rescaled.scale = vec![1.0];
        assert!(rescaled.validate().is_err());

        let mut retiled = coder;
        retiled.n_tiles = 50;
        assert!(matches!(
            retiled.validate(),
            Err(FeatureError::InvalidConfig { name: "n_tiles", .. })
        ));
    }

    #[test]
    fn test_coder_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TileCoder>();
        assert_send_sync::<IndexHasher>();
    }
}
