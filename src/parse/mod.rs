//! # Scene Loading
//!
//! Builds a [`World`](crate::gfx::scene::World) from an XML scene file and
//! the model files it references.

pub mod error;
pub mod model;
pub mod xml;

pub use error::ParseError;
pub use model::{load_model, load_obj, ModelCache, ModelFormat};
pub use xml::{parse_world, parse_world_str};
