//! Scene-to-entity translation for meshport.
//!
//! [`assemble`] turns one parsed submesh into interleaved vertices and a
//! triangle index list. [`MeshLoader`] drives a scene parser, the assembler
//! and the geometry and material sinks to build one
//! [`Entity`](meshport_render::Entity) per scene.

mod assembler;
mod error;
mod loader;

pub use assembler::{assemble, SubmeshGeometry};
pub use error::{Attribute, ImportError, SubmeshError};
pub use loader::MeshLoader;
