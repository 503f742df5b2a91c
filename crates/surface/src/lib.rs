//! Land/ocean classification of the globe surface.
//!
//! Coastline outlines are rasterized once into a [`LandMask`]; a Fibonacci
//! point field is then split into land and ocean dots by sampling that mask.

pub mod dot_field;
pub mod land_mask;
pub mod outlines;
pub mod polygon;

pub use dot_field::*;
pub use land_mask::*;
pub use polygon::*;
