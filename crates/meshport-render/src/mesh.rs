//! Render-ready mesh geometry and the sink that builds it

use glam::Vec3;

use crate::error::RenderError;
use crate::vertex::Vertex;

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Smallest box containing every point, or `None` for no points.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let (min, max) = points.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Some(Self { min, max })
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// Geometry ready for upload: interleaved vertices plus a `u32` triangle list.
#[derive(Clone, Debug)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    bounds: Option<Aabb>,
}

impl Mesh {
    /// Take ownership of the buffers.
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        let bounds = Aabb::from_points(vertices.iter().map(Vertex::position));
        Self {
            vertices,
            indices,
            bounds,
        }
    }

    /// Create an empty mesh
    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Bounding box of the vertex positions; `None` for an empty mesh.
    pub fn bounds(&self) -> Option<Aabb> {
        self.bounds
    }

    /// Vertex data as raw bytes, laid out as described by [`Vertex::layout`].
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index data as raw little-endian `u32` bytes.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Give the buffers back.
    pub fn into_parts(self) -> (Vec<Vertex>, Vec<u32>) {
        (self.vertices, self.indices)
    }
}

/// Turns assembled vertex and index buffers into renderer geometry.
///
/// The buffers are moved in; a sink is free to keep them, upload them, or
/// drop them once its own handle exists.
pub trait GeometrySink {
    type Geometry;

    fn build(&mut self, vertices: Vec<Vertex>, indices: Vec<u32>) -> Result<Self::Geometry, RenderError>;
}

/// Builds CPU-side [`Mesh`] values.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeshSink {
    reject_empty: bool,
}

impl MeshSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail on submeshes without vertices instead of building empty meshes.
    pub fn reject_empty(mut self, reject: bool) -> Self {
        self.reject_empty = reject;
        self
    }
}

impl GeometrySink for MeshSink {
    type Geometry = Mesh;

    fn build(&mut self, vertices: Vec<Vertex>, indices: Vec<u32>) -> Result<Mesh, RenderError> {
        if vertices.is_empty() && self.reject_empty {
            return Err(RenderError::EmptyGeometry);
        }
        Ok(Mesh::new(vertices, indices))
    }
}

impl<G: GeometrySink + ?Sized> GeometrySink for &mut G {
    type Geometry = G::Geometry;

    fn build(&mut self, vertices: Vec<Vertex>, indices: Vec<u32>) -> Result<Self::Geometry, RenderError> {
        (**self).build(vertices, indices)
    }
}
