//! Format-independent scene model produced by a [`SceneParser`].

use bitflags::bitflags;
use glam::{Vec2, Vec3};

use crate::error::ParseError;

bitflags! {
    /// Post-processing steps a parser applies before handing out a scene.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ImportFlags: u32 {
        /// Split every polygon into triangles.
        const TRIANGULATE = 1 << 0;
        /// Compute smooth per-vertex normals where the source has none.
        const GEN_SMOOTH_NORMALS = 1 << 1;
        /// Flip the vertical texture axis (top-left UV origin).
        const FLIP_UVS = 1 << 2;
        /// Compute tangents where the source has none.
        const CALC_TANGENT_SPACE = 1 << 3;
    }
}

impl ImportFlags {
    /// The steps a mesh loader always asks for: the uniform vertex layout
    /// depends on every one of them.
    pub const REQUIRED: ImportFlags = ImportFlags::TRIANGULATE
        .union(ImportFlags::GEN_SMOOTH_NORMALS)
        .union(ImportFlags::FLIP_UVS)
        .union(ImportFlags::CALC_TANGENT_SPACE);
}

/// One polygon, as indices into its mesh's vertex arrays.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Face {
    pub indices: Vec<u32>,
}

impl Face {
    pub fn new(indices: impl Into<Vec<u32>>) -> Self {
        Self {
            indices: indices.into(),
        }
    }

    pub fn triangle(a: u32, b: u32, c: u32) -> Self {
        Self {
            indices: vec![a, b, c],
        }
    }

    /// Number of corners.
    pub fn arity(&self) -> usize {
        self.indices.len()
    }
}

/// An independently indexed block of geometry sharing one material.
#[derive(Debug, Clone, Default)]
pub struct SceneMesh {
    pub name: String,
    /// Declared vertex count. Attribute arrays must be at least this long.
    pub num_vertices: usize,
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub tangents: Vec<Vec3>,
    /// First texture coordinate channel, if the source has one.
    pub tex_coords: Option<Vec<Vec2>>,
    pub faces: Vec<Face>,
    /// Index into [`Scene::materials`].
    pub material_index: usize,
}

impl SceneMesh {
    pub fn has_tex_coords(&self) -> bool {
        self.tex_coords.is_some()
    }

    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }
}

/// Material as described by the source data. Only texture references are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SceneMaterial {
    pub name: String,
    /// Diffuse texture paths by layer. Layer 0 is the base color texture.
    pub diffuse_textures: Vec<String>,
}

impl SceneMaterial {
    pub fn diffuse_texture_count(&self) -> usize {
        self.diffuse_textures.len()
    }

    /// Path of the diffuse texture in `slot`, if there is one.
    pub fn diffuse_texture(&self, slot: usize) -> Option<&str> {
        self.diffuse_textures.get(slot).map(String::as_str)
    }
}

/// A parsed scene: submeshes in source order plus the materials they use.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub meshes: Vec<SceneMesh>,
    pub materials: Vec<SceneMaterial>,
}

impl Scene {
    pub fn num_meshes(&self) -> usize {
        self.meshes.len()
    }

    /// The material a mesh refers to, or `None` if its index is out of range.
    pub fn material_of(&self, mesh: &SceneMesh) -> Option<&SceneMaterial> {
        self.materials.get(mesh.material_index)
    }
}

/// Turns raw bytes into a [`Scene`].
pub trait SceneParser {
    fn parse(&self, bytes: &[u8], flags: ImportFlags) -> Result<Scene, ParseError>;
}

impl<P: SceneParser + ?Sized> SceneParser for &P {
    fn parse(&self, bytes: &[u8], flags: ImportFlags) -> Result<Scene, ParseError> {
        (**self).parse(bytes, flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_flags_cover_every_step() {
        assert!(ImportFlags::REQUIRED.contains(ImportFlags::TRIANGULATE));
        assert!(ImportFlags::REQUIRED.contains(ImportFlags::GEN_SMOOTH_NORMALS));
        assert!(ImportFlags::REQUIRED.contains(ImportFlags::FLIP_UVS));
        assert!(ImportFlags::REQUIRED.contains(ImportFlags::CALC_TANGENT_SPACE));
        assert_eq!(ImportFlags::REQUIRED, ImportFlags::all());
    }

    #[test]
    fn material_lookup() {
        let scene = Scene {
            meshes: vec![SceneMesh {
                material_index: 1,
                ..Default::default()
            }],
            materials: vec![
                SceneMaterial::default(),
                SceneMaterial {
                    name: "brick".into(),
                    diffuse_textures: vec!["brick.png".into()],
                },
            ],
        };
        let material = scene.material_of(&scene.meshes[0]).unwrap();
        assert_eq!(material.name, "brick");
        assert_eq!(material.diffuse_texture(0), Some("brick.png"));
        assert_eq!(material.diffuse_texture(1), None);
    }

    #[test]
    fn out_of_range_material() {
        let scene = Scene {
            meshes: vec![SceneMesh {
                material_index: 5,
                ..Default::default()
            }],
            materials: Vec::new(),
        };
        assert!(scene.material_of(&scene.meshes[0]).is_none());
    }
}
