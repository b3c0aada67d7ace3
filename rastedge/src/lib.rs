//! rastedge - Edge detection rasters
//!
//! Computes a single-band Roberts cross edge raster from an input raster
//! of any real sample encoding, with progress reporting and cooperative
//! cancellation.
//!
//! # Example
//!
//! ```
//! use rastedge::{AbortFlag, LogProgress, Raster};
//! use rastedge::filter::roberts_edge_with;
//!
//! let cube = Raster::from_vec("cube", 2, 2, vec![10u8, 20, 30, 40]).unwrap();
//! let mut progress = LogProgress;
//! let edges = roberts_edge_with(&cube, Some(&mut progress), &AbortFlag::new()).unwrap();
//! assert_eq!(edges.get_value::<u8>(0, 0).unwrap(), 31);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use rastedge_core::*;

// Re-export the filter crate as a module to avoid name conflicts
pub use rastedge_filter as filter;
