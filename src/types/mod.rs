//! Core types for the feature library.
//!
//! This module contains the numeric type aliases used across all features.

mod primitives;

pub use primitives::*;
