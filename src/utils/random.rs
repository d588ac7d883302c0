//! Seeded pseudo-random number generator.
//!
//! Every stochastic object in this crate owns its own `Random` instance, so the
//! sequence of draws is fully determined by the seed handed to its constructor.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// A deterministic pseudo-random number generator.
///
/// Uses ChaCha20 for high-quality randomness with reproducible behavior
/// across platforms when seeded.
///
/// # Example
///
/// ```rust
/// use featvec::utils::Random;
///
/// let mut rng = Random::new(42);
///
/// // Sample from a range
/// let idx = rng.get_usize(100);
/// assert!(idx < 100);
///
/// // Generate random floats
/// let f = rng.get_real64();
/// assert!((0.0..1.0).contains(&f));
/// ```
pub struct Random {
    rng: ChaCha20Rng,
    seed: u64,
}

// The generator serializes as its seed plus the ChaCha word position, which
// restores the stream exactly regardless of how many words each draw consumed.
#[cfg(feature = "serde")]
mod serde_impl {
    use super::*;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct RandomState {
        seed: u64,
        word_pos: u128,
    }

    impl Serialize for Random {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            let state = RandomState {
                seed: self.seed,
                word_pos: self.rng.get_word_pos(),
            };
            state.serialize(serializer)
        }
    }

    impl<'de> Deserialize<'de> for Random {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let state = RandomState::deserialize(deserializer)?;
            let mut rng = ChaCha20Rng::seed_from_u64(state.seed);
            rng.set_word_pos(state.word_pos);
            Ok(Random {
                rng,
                seed: state.seed,
            })
        }
    }
}

impl Random {
    /// Creates a new random number generator with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Creates a random number generator seeded from OS entropy.
    #[must_use]
    pub fn with_random_seed() -> Self {
        Self::new(rand::thread_rng().next_u64())
    }

    /// Uses `seed` when given, otherwise falls back to [`Random::with_random_seed`].
    #[must_use]
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::with_random_seed, Self::new)
    }

    /// Returns the seed used for this generator.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generates a random u64.
    pub fn get_uint64(&mut self) -> u64 {
        self.rng.gen()
    }

    /// Generates a random usize in the range [0, n).
    pub fn get_usize(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(0..n)
    }

    /// Generates a random f64 in [0, 1).
    pub fn get_real64(&mut self) -> f64 {
        self.rng.gen()
    }

    /// Generates a random f64 in the range [min, max).
    pub fn get_real64_range(&mut self, min: f64, max: f64) -> f64 {
        if min >= max {
            return min;
        }
        min + (max - min) * self.get_real64()
    }

    /// Generates a random boolean with the given probability of being true.
    pub fn get_bool_with_prob(&mut self, probability: f64) -> bool {
        self.get_real64() < probability
    }

    /// Samples `k` indices from `0..n` without replacement.
    pub fn sample_indices(&mut self, n: usize, k: usize) -> Vec<usize> {
        let k = k.min(n);

        // For small k relative to n, use selection sampling
        if k < n / 3 {
            let mut selected = ahash::AHashSet::with_capacity(k);
            let mut result = Vec::with_capacity(k);

            while result.len() < k {
                let idx = self.get_usize(n);
                if selected.insert(idx) {
                    result.push(idx);
                }
            }

            return result;
        }

        // For larger k, use partial Fisher-Yates
        let mut indices: Vec<usize> = (0..n).collect();
        for i in 0..k {
            let j = self.get_usize(n - i) + i;
            indices.swap(i, j);
        }
        indices.truncate(k);
        indices
    }
}

impl Clone for Random {
    fn clone(&self) -> Self {
        Self {
            rng: self.rng.clone(),
            seed: self.seed,
        }
    }
}

impl std::fmt::Debug for Random {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Random")
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}
