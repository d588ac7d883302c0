//! Feature functions that can be composed with the tile coder.
//!
//! Every feature maps a fixed-length input to a fixed-length output array and
//! implements the [`Feature`] trait. The tile coder never calls these itself;
//! chaining them is up to the application.
//!
//! # Available Features
//!
//! ## Integer Encodings
//! - [`Int2Binary`]: Binary representation of an integer, modulo `2^length`
//! - [`Int2Unary`]: One-hot vector for an index
//! - [`RandomBinomial`]: Random fixed-weight binary code per key
//!
//! ## Stochastic
//! - [`DropOut`]: Zeroes entries with a fixed probability
//!
//! ## Traces
//! - [`AccumulatingTrace`]: Decaying trace that adds up activity
//! - [`ReplacingTrace`]: Decaying trace that resets on activity
//!
//! ## Distances
//! - [`HammingPrototype`]: Hamming distance to a prototype (Kanerva coding)
//!
//! # Example
//!
//! ```rust
//! use featvec::features::{Feature, Int2Binary, Int2Unary};
//!
//! let mut binary = Int2Binary::new(8).unwrap();
//! assert_eq!(binary.apply(&3).unwrap(), vec![1, 1, 0, 0, 0, 0, 0, 0]);
//!
//! let mut unary = Int2Unary::new(3).unwrap();
//! assert_eq!(unary.apply(&0).unwrap(), vec![1, 0, 0]);
//! ```

mod base;
mod dropout;
mod int2binary;
mod int2unary;
mod kanerva;
mod random_binomial;
mod traces;

pub use base::Feature;
pub use dropout::{DropOut, DropOutParams};
pub use int2binary::Int2Binary;
pub use int2unary::Int2Unary;
pub use kanerva::HammingPrototype;
pub use random_binomial::{RandomBinomial, RandomBinomialParams};
pub use traces::{AccumulatingTrace, ReplacingTrace, TraceParams};
