//! Error types for rastedge-core
//!
//! Provides a unified error type for raster construction, accessor and
//! dispatch operations. Each variant captures enough context for
//! diagnostics without exposing internal storage details.

use crate::raster::Encoding;
use thiserror::Error;

/// rastedge-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid raster dimensions
    #[error("invalid raster dimensions: {rows} rows x {columns} columns x {bands} bands")]
    InvalidDimension { rows: u32, columns: u32, bands: u32 },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Encoding cannot be handled by a generic sample algorithm
    #[error("unsupported encoding: {0}")]
    UnsupportedEncoding(Encoding),

    /// Sample type does not match the raster encoding
    #[error("encoding mismatch: expected {expected}, got {actual}")]
    EncodingMismatch { expected: Encoding, actual: Encoding },

    /// Accessor dereferenced while positioned outside the raster or
    /// without backing storage
    #[error("invalid accessor at row {row}, column {column}")]
    InvalidAccessor { row: u32, column: u32 },

    /// Memory allocation failed
    #[error("memory allocation failed")]
    AllocationFailed,
}

/// Result type alias for rastedge-core operations
pub type Result<T> = std::result::Result<T, Error>;
