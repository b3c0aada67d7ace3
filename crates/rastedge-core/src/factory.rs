//! Raster allocation
//!
//! Algorithms that produce a new raster ask a [`RasterFactory`] for it
//! instead of allocating directly, so a host can control where result
//! rasters live and tests can simulate allocation failure.

use crate::error::Result;
use crate::raster::{RasterDescriptor, RasterMut};

/// Allocator for new writable rasters.
pub trait RasterFactory {
    /// Create a zero-filled raster with the given name and shape.
    ///
    /// # Errors
    ///
    /// Implementations return [`Error::AllocationFailed`](crate::Error::AllocationFailed)
    /// when storage cannot be obtained.
    fn create_raster(&self, name: &str, descriptor: RasterDescriptor) -> Result<RasterMut>;
}

/// Factory allocating rasters on the heap.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeapRasterFactory;

impl RasterFactory for HeapRasterFactory {
    fn create_raster(&self, name: &str, descriptor: RasterDescriptor) -> Result<RasterMut> {
        log::trace!(
            "allocating raster '{}' ({}x{}x{} {})",
            name,
            descriptor.rows,
            descriptor.columns,
            descriptor.bands,
            descriptor.encoding
        );
        RasterMut::new(name, descriptor)
    }
}

impl<F: RasterFactory + ?Sized> RasterFactory for &F {
    fn create_raster(&self, name: &str, descriptor: RasterDescriptor) -> Result<RasterMut> {
        (**self).create_raster(name, descriptor)
    }
}

impl<F: RasterFactory + ?Sized> RasterFactory for Box<F> {
    fn create_raster(&self, name: &str, descriptor: RasterDescriptor) -> Result<RasterMut> {
        (**self).create_raster(name, descriptor)
    }
}
