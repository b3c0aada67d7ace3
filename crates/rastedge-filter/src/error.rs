//! Error types for rastedge-filter
//!
//! Every filter failure ends the run. The display text of each variant is
//! also the message reported to the progress sink.

use rastedge_core::Encoding;
use thiserror::Error;

/// Errors that can occur during filtering operations
#[derive(Debug, Error)]
pub enum FilterError {
    /// Required input missing or unusable
    #[error("{0}")]
    InvalidInput(&'static str),

    /// Encoding the filter cannot process
    #[error("edge detection cannot be performed on {0} samples")]
    UnsupportedEncoding(Encoding),

    /// Result raster could not be created
    #[error("a result raster could not be created: {0}")]
    AllocationFailure(#[source] rastedge_core::Error),

    /// Source or destination accessor was invalid when used
    #[error("unable to access the raster data at row {row}, column {column}")]
    AccessFailure { row: u32, column: u32 },

    /// Cancellation was observed
    #[error("edge detection has been aborted")]
    Aborted,
}

impl FilterError {
    /// Check whether the run stopped because an abort was requested.
    pub fn is_aborted(&self) -> bool {
        matches!(self, FilterError::Aborted)
    }
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;
