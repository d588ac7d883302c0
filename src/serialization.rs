//! Saving and restoring features.
//!
//! With the `serde` feature enabled every feature type and its parameters
//! implement `Serialize` and `Deserialize`. The [`Serializable`] trait adds
//! convenience methods on top for the two supported formats:
//!
//! - **Binary** - compact encoding using bincode (default)
//! - **JSON** - human-readable encoding using serde_json, handy for
//!   parameter files
//!
//! Stochastic features store their generator's seed and stream position, so
//! a restored feature continues with exactly the draws the original would
//! have made.
//!
//! # Example
//!
//! ```rust
//! use featvec::prelude::*;
//!
//! let coder = TileCoder::new(TileCoderParams {
//!     n_input: 2,
//!     n_output: 8,
//!     n_tiles: 100,
//!     seed: Some(3),
//!     ..Default::default()
//! }).unwrap();
//!
//! let bytes = coder.to_bytes(SerializableFormat::Binary).unwrap();
//! let restored = TileCoder::from_bytes(&bytes, SerializableFormat::Binary).unwrap();
//! assert_eq!(restored.encode(&[1.0, 2.0]).unwrap(), coder.encode(&[1.0, 2.0]).unwrap());
//! ```

use crate::error::{FeatureError, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::str::FromStr;

/// Serialization format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SerializableFormat {
    /// Compact binary serialization (default).
    #[default]
    Binary,

    /// Human-readable JSON format.
    Json,
}

impl fmt::Display for SerializableFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SerializableFormat::Binary => write!(f, "BINARY"),
            SerializableFormat::Json => write!(f, "JSON"),
        }
    }
}

impl FromStr for SerializableFormat {
    type Err = FeatureError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "BINARY" | "BIN" => Ok(SerializableFormat::Binary),
            "JSON" => Ok(SerializableFormat::Json),
            _ => Err(FeatureError::invalid_config(
                "format",
                format!("Unknown format '{s}'. Expected: BINARY, JSON"),
            )),
        }
    }
}

fn serialization_error(action: &str, format: SerializableFormat, e: impl fmt::Display) -> FeatureError {
    FeatureError::SerializationError {
        message: format!("{format} {action} failed: {e}"),
    }
}

fn io_error(action: &str, e: &std::io::Error) -> FeatureError {
    FeatureError::IoError {
        message: format!("Failed to {action} file: {e}"),
    }
}

/// Unified save/load interface for anything serde can handle.
pub trait Serializable: Serialize + DeserializeOwned + Sized {
    /// Serializes to a byte vector.
    fn to_bytes(&self, format: SerializableFormat) -> Result<Vec<u8>> {
        match format {
            SerializableFormat::Binary => bincode::serialize(self)
                .map_err(|e| serialization_error("serialization", format, e)),
            SerializableFormat::Json => serde_json::to_vec_pretty(self)
                .map_err(|e| serialization_error("serialization", format, e)),
        }
    }

    /// Deserializes from a byte slice.
    fn from_bytes(bytes: &[u8], format: SerializableFormat) -> Result<Self> {
        match format {
            SerializableFormat::Binary => bincode::deserialize(bytes)
                .map_err(|e| serialization_error("deserialization", format, e)),
            SerializableFormat::Json => serde_json::from_slice(bytes)
                .map_err(|e| serialization_error("deserialization", format, e)),
        }
    }

    /// Serializes to a JSON string.
    fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| serialization_error("serialization", SerializableFormat::Json, e))
    }

    /// Deserializes from a JSON string.
    fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| serialization_error("deserialization", SerializableFormat::Json, e))
    }

    /// Serializes to a writer.
    fn save<W: Write>(&self, writer: W, format: SerializableFormat) -> Result<()> {
        let mut writer = BufWriter::new(writer);
        match format {
            SerializableFormat::Binary => bincode::serialize_into(&mut writer, self)
                .map_err(|e| serialization_error("serialization", format, e))?,
            SerializableFormat::Json => serde_json::to_writer_pretty(&mut writer, self)
                .map_err(|e| serialization_error("serialization", format, e))?,
        }
        writer.flush().map_err(|e| io_error("flush", &e))
    }

    /// Deserializes from a reader.
    fn load<R: Read>(reader: R, format: SerializableFormat) -> Result<Self> {
        let mut reader = BufReader::new(reader);
        match format {
            SerializableFormat::Binary => bincode::deserialize_from(&mut reader)
                .map_err(|e| serialization_error("deserialization", format, e)),
            SerializableFormat::Json => serde_json::from_reader(&mut reader)
                .map_err(|e| serialization_error("deserialization", format, e)),
        }
    }

    /// Saves to a file.
    fn save_to_file<P: AsRef<Path>>(&self, path: P, format: SerializableFormat) -> Result<()> {
        let file = File::create(path.as_ref()).map_err(|e| io_error("create", &e))?;
        self.save(file, format)
    }

    /// Loads from a file.
    fn load_from_file<P: AsRef<Path>>(path: P, format: SerializableFormat) -> Result<Self> {
        let file = File::open(path.as_ref()).map_err(|e| io_error("open", &e))?;
        Self::load(file, format)
    }

    /// Saves to a file, picking JSON for `.json` paths and binary otherwise.
    fn save_to_file_auto<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let format = infer_format_from_path(path.as_ref());
        self.save_to_file(path, format)
    }

    /// Loads from a file, picking JSON for `.json` paths and binary otherwise.
    fn load_from_file_auto<P: AsRef<Path>>(path: P) -> Result<Self> {
        let format = infer_format_from_path(path.as_ref());
        Self::load_from_file(path, format)
    }
}

impl<T> Serializable for T where T: Serialize + DeserializeOwned + Sized {}

/// Infers serialization format from file extension (case-sensitive).
fn infer_format_from_path(path: &Path) -> SerializableFormat {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => SerializableFormat::Json,
        _ => SerializableFormat::Binary,
    }
}
