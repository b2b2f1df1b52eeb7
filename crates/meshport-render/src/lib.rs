//! Meshport Render - Renderer-agnostic output of an import
//!
//! Holds the fixed vertex layout, CPU-side meshes, texture-backed materials,
//! and the entity that aggregates them. Geometry and material construction
//! go through the [`GeometrySink`] and [`MaterialSink`] traits so a GPU
//! backend can take the buffers instead.

mod error;

pub mod entity;
pub mod material;
pub mod mesh;
pub mod vertex;

pub use entity::{Entity, MeshRenderer};
pub use error::RenderError;
pub use material::{Material, MaterialConfig, MaterialLibrary, MaterialSink};
pub use mesh::{Aabb, GeometrySink, Mesh, MeshSink};
pub use vertex::{Vertex, VertexAttribute, VertexBufferLayout, VertexFormat};
