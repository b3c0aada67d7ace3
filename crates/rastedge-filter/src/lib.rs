//! rastedge-filter - Edge detection filters
//!
//! This crate provides:
//!
//! - The Roberts cross pixel operator ([`edge_value`], [`Neighborhood`])
//! - The raster scan that applies it to every pixel with progress
//!   reporting and cooperative cancellation ([`RobertsEdge`])

pub mod edge;
mod error;
pub mod scan;

pub use error::{FilterError, FilterResult};

// Re-export commonly used items
pub use edge::{Neighborhood, edge_value};
pub use scan::{RobertsEdge, RobertsOptions, roberts_edge, roberts_edge_with};
