//! Vertex type shared by every imported mesh

use std::mem::{offset_of, size_of};

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

/// Mesh vertex with position, texture coordinate, normal, and tangent.
///
/// Every imported vertex carries all four attributes, so one fixed layout
/// serves every mesh.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub tex_coord: [f32; 2],
    pub normal: [f32; 3],
    pub tangent: [f32; 3],
}

impl Vertex {
    /// Create a new vertex
    pub fn new(position: Vec3, tex_coord: Vec2, normal: Vec3, tangent: Vec3) -> Self {
        Self {
            position: position.to_array(),
            tex_coord: tex_coord.to_array(),
            normal: normal.to_array(),
            tangent: tangent.to_array(),
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from(self.position)
    }

    pub fn tex_coord(&self) -> Vec2 {
        Vec2::from(self.tex_coord)
    }

    pub fn normal(&self) -> Vec3 {
        Vec3::from(self.normal)
    }

    pub fn tangent(&self) -> Vec3 {
        Vec3::from(self.tangent)
    }

    /// Backend-neutral description of the interleaved buffer layout.
    pub fn layout() -> VertexBufferLayout {
        let attribute = |name, offset, format| VertexAttribute {
            name,
            offset: offset as u32,
            format,
        };
        VertexBufferLayout {
            stride: size_of::<Self>() as u32,
            attributes: vec![
                attribute("position", offset_of!(Vertex, position), VertexFormat::Float32x3),
                attribute("tex_coord", offset_of!(Vertex, tex_coord), VertexFormat::Float32x2),
                attribute("normal", offset_of!(Vertex, normal), VertexFormat::Float32x3),
                attribute("tangent", offset_of!(Vertex, tangent), VertexFormat::Float32x3),
            ],
        }
    }
}

/// Component format of a vertex attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VertexFormat {
    Float32x2,
    Float32x3,
}

impl VertexFormat {
    pub fn size(self) -> u32 {
        match self {
            VertexFormat::Float32x2 => 8,
            VertexFormat::Float32x3 => 12,
        }
    }
}

/// One named attribute inside an interleaved vertex.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VertexAttribute {
    pub name: &'static str,
    pub offset: u32,
    pub format: VertexFormat,
}

/// Stride and attributes of an interleaved vertex buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VertexBufferLayout {
    pub stride: u32,
    pub attributes: Vec<VertexAttribute>,
}
