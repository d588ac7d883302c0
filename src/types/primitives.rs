//! Primitive type definitions shared by the feature functions.

/// 32-bit floating point number.
pub type Real32 = f32;

/// 64-bit floating point number.
pub type Real64 = f64;

/// Default floating point type.
/// Uses 32-bit by default, can be changed to 64-bit with feature flag.
#[cfg(not(feature = "double_precision"))]
pub type Real = Real32;

/// Default floating point type (64-bit variant).
#[cfg(feature = "double_precision")]
pub type Real = Real64;

/// Element type of binary-valued feature vectors.
pub type Bit = u8;

/// Index of an active tile, always in `[0, n_tiles)`.
pub type TileIdx = usize;

/// Default number of entries in a tile coder's hash table.
pub const DEFAULT_TABLE_SIZE: usize = 2048;
