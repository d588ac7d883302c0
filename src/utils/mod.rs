//! Utility modules for the feature library.
//!
//! This module contains utility functions and data structures used throughout
//! the library, including random number generation, integer helpers and
//! tile usage statistics.

pub mod math;
mod random;
mod tile_usage;

pub use random::Random;
pub use tile_usage::TileUsage;
