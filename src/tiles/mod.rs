//! Hashed tile coding.
//!
//! - [`IndexHasher`]: seeded table that scrambles integer coordinates into a
//!   bounded index space
//! - [`TileCoder`]: maps real-valued vectors to one active tile per tiling

mod index_hasher;
mod tile_coder;

pub use index_hasher::IndexHasher;
pub use tile_coder::{TileCoder, TileCoderParams};
