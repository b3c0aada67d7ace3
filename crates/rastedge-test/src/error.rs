//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur while building test fixtures
#[derive(Debug, Error)]
pub enum TestError {
    /// Fixture rows have different lengths
    #[error("row {row} has {actual} samples, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// Fixture has no samples
    #[error("fixture '{0}' is empty")]
    EmptyFixture(String),

    /// Raster construction failed
    #[error("raster error: {0}")]
    Raster(#[from] rastedge_core::Error),
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
