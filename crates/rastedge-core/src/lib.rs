//! rastedge core - Raster data structures and host services
//!
//! This crate provides the pieces a raster filter needs from its host:
//!
//! - [`Raster`] / [`RasterMut`] - The sample container (shared / exclusive)
//! - [`Encoding`] / [`Sample`] - Runtime sample encodings and the typed
//!   sample trait, with [`Encoding::dispatch`] to instantiate generic code
//! - [`DataAccessor`] / [`DataAccessorMut`] - Seekable cursors with explicit
//!   validity
//! - [`RasterFactory`] - Allocation of result rasters
//! - [`Progress`] / [`AbortFlag`] - Progress reporting and cooperative
//!   cancellation
//! - [`Step`] - Scoped outcome logging for top-level operations

pub mod error;
pub mod factory;
pub mod progress;
pub mod raster;
pub mod step;

pub use error::{Error, Result};
pub use factory::{HeapRasterFactory, RasterFactory};
pub use progress::{AbortFlag, LogProgress, Progress, ReportingLevel};
pub use raster::{
    DataAccessor, DataAccessorMut, DataRequest, Encoding, EncodingVisitor, FloatComplex,
    IntegerComplex, Raster, RasterDescriptor, RasterMut, Sample, Samples,
};
pub use step::{Step, StepOutcome};
