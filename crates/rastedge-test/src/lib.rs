//! rastedge-test - Regression test framework for rastedge
//!
//! Provides comparison bookkeeping ([`RegParams`]), recording progress
//! sinks and small raster fixtures.
//!
//! # Usage
//!
//! ```ignore
//! use rastedge_test::{RegParams, raster_from_rows};
//!
//! let mut rp = RegParams::new("roberts");
//! rp.compare_values(31.0, value as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" (default) or "display"

mod error;
mod params;
mod progress;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode, dump_raster};
pub use progress::{AbortingProgress, ProgressRecorder, ProgressReport};

use rastedge_core::{Raster, Sample};

/// Initialize `env_logger` for tests; safe to call repeatedly
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Build a single-band raster from rows of samples
///
/// # Errors
///
/// Returns an error if the rows are empty or have different lengths.
pub fn raster_from_rows<T: Sample>(name: &str, rows: &[&[T]]) -> TestResult<Raster> {
    let columns = rows.first().map_or(0, |r| r.len());
    if columns == 0 {
        return Err(TestError::EmptyFixture(name.to_string()));
    }
    let mut values = Vec::with_capacity(rows.len() * columns);
    for (row, samples) in rows.iter().enumerate() {
        if samples.len() != columns {
            return Err(TestError::RaggedRows {
                row,
                expected: columns,
                actual: samples.len(),
            });
        }
        values.extend_from_slice(samples);
    }
    Ok(Raster::from_vec(
        name,
        rows.len() as u32,
        columns as u32,
        values,
    )?)
}

/// Build a raster whose sample at (row, column) is `f(row, column)`
pub fn raster_from_fn<T: Sample>(
    name: &str,
    rows: u32,
    columns: u32,
    f: impl Fn(u32, u32) -> f64,
) -> TestResult<Raster> {
    let values = (0..rows)
        .flat_map(|row| (0..columns).map(move |column| (row, column)))
        .map(|(row, column)| T::from_f64(f(row, column)))
        .collect();
    Ok(Raster::from_vec(name, rows, columns, values)?)
}
