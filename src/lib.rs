//! # featvec - Feature vectors for linear function approximation
//!
//! featvec turns raw numeric or integer inputs into fixed-width feature vectors,
//! the kind consumed by linear value-function approximators in reinforcement
//! learning.
//!
//! ## Overview
//!
//! The centerpiece is the hashed [`TileCoder`](tiles::TileCoder): it overlays
//! several mutually offset grids ("tilings") on the input space and hashes the
//! cell occupied in each tiling into a bounded index space. The remaining
//! features are small array transforms that can be composed with it:
//!
//! - **Tile coding**: [`TileCoder`](tiles::TileCoder) and its [`IndexHasher`](tiles::IndexHasher)
//! - **Integer encodings**: binary, one-hot and random-binomial vectors
//! - **Stochastic features**: dropout
//! - **Traces**: accumulating and replacing eligibility traces
//! - **Norms**: Hamming, L1, L2 and general Lp distances
//!
//! ## Quick Start
//!
//! ```rust
//! use featvec::prelude::*;
//!
//! let coder = TileCoder::new(TileCoderParams {
//!     n_input: 4,
//!     n_output: 16,
//!     n_tiles: 1000,
//!     seed: Some(123),
//!     ..Default::default()
//! }).unwrap();
//!
//! let active = coder.encode(&[10.0, 20.0, 30.0, 40.0]).unwrap();
//! assert_eq!(active.len(), 16);
//! assert!(active.iter().all(|&tile| tile < 1000));
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support
//! - `rayon`: Enable parallel batch encoding
//! - `double_precision`: Use `f64` as the default real type

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]

pub mod features;
pub mod norm;
pub mod tiles;
pub mod types;
pub mod utils;

#[cfg(feature = "serde")]
pub mod serialization;

/// Re-export of commonly used types and traits for convenience.
pub mod prelude {
    pub use crate::types::{Real, Real32, Real64};
    pub use crate::tiles::{IndexHasher, TileCoder, TileCoderParams};
    pub use crate::features::{
        AccumulatingTrace, DropOut, DropOutParams, Feature, HammingPrototype, Int2Binary,
        Int2Unary, RandomBinomial, RandomBinomialParams, ReplacingTrace, TraceParams,
    };
    pub use crate::utils::{Random, TileUsage};

    #[cfg(feature = "serde")]
    pub use crate::serialization::{Serializable, SerializableFormat};
}

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error types for the library.
pub mod error {
    use thiserror::Error;

    /// Main error type for featvec operations.
    #[derive(Error, Debug, Clone, PartialEq)]
    pub enum FeatureError {
        /// A construction-time parameter is structurally invalid.
        #[error("Invalid configuration '{name}': {message}")]
        InvalidConfig {
            /// Name of the invalid parameter.
            name: &'static str,
            /// Description of the error.
            message: String,
        },

        /// An input vector (or configured vector) has the wrong length.
        #[error("Shape mismatch: expected length {expected}, got {actual}")]
        ShapeMismatch {
            /// Expected length.
            expected: usize,
            /// Actual length.
            actual: usize,
        },

        /// Index out of bounds.
        #[error("Index {index} out of bounds (size: {size})")]
        IndexOutOfBounds {
            /// The invalid index.
            index: usize,
            /// The valid size.
            size: usize,
        },

        /// Serialization error.
        #[cfg(feature = "serde")]
        #[error("Serialization error: {message}")]
        SerializationError {
            /// Description of the serialization error.
            message: String,
        },

        /// I/O error.
        #[error("I/O error: {message}")]
        IoError {
            /// Description of the I/O error.
            message: String,
        },
    }

    impl FeatureError {
        /// Shorthand for an [`FeatureError::InvalidConfig`].
        pub(crate) fn invalid_config(name: &'static str, message: impl Into<String>) -> Self {
            Self::InvalidConfig {
                name,
                message: message.into(),
            }
        }

        /// Returns an error if `actual` differs from `expected`.
        pub(crate) fn check_len(expected: usize, actual: usize) -> Result<()> {
            if expected == actual {
                Ok(())
            } else {
                Err(Self::ShapeMismatch { expected, actual })
            }
        }
    }

    /// Result type alias using FeatureError.
    pub type Result<T> = std::result::Result<T, FeatureError>;
}

pub use error::{FeatureError, Result};
