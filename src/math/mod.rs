//! # Math Utilities
//!
//! Coordinate conversions used by the cone generator and the follow camera,
//! plus the orthonormal frame construction used to align animated objects to
//! their path.

pub mod coord_conv;
pub mod frame;

pub use coord_conv::*;
pub use frame::{normalize_or, rotation_from_axes, try_normalize, Frame};
