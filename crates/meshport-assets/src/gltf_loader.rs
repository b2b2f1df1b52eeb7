use glam::{Vec2, Vec3};
use gltf::mesh::Mode;
use tracing::debug;

use crate::error::ParseError;
use crate::postprocess;
use crate::scene::{ImportFlags, Scene, SceneMaterial, SceneMesh, SceneParser};

/// glTF 2.0 scene parser working on in-memory data.
///
/// Accepts binary `.glb` files and `.gltf` files whose buffers are embedded
/// as `data:` URIs. Images are never decoded here; only their URIs are
/// recorded as texture paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct GltfParser;

impl GltfParser {
    pub fn new() -> Self {
        Self
    }
}

impl SceneParser for GltfParser {
    fn parse(&self, bytes: &[u8], flags: ImportFlags) -> Result<Scene, ParseError> {
        let gltf::Gltf { document, blob } = gltf::Gltf::from_slice(bytes)?;

        for buffer in document.buffers() {
            if let gltf::buffer::Source::Uri(uri) = buffer.source() {
                if !uri.starts_with("data:") {
                    return Err(ParseError::ExternalBuffer(uri.to_string()));
                }
            }
        }
        let buffers = gltf::import_buffers(&document, None, blob)?;

        let mut materials: Vec<SceneMaterial> = document.materials().map(read_material).collect();
        // Primitives without a material share one trailing default material.
        let default_material = materials.len();
        let mut needs_default = false;

        let mut meshes = Vec::new();
        for mesh in document.meshes() {
            let mesh_name = mesh
                .name()
                .map(str::to_string)
                .unwrap_or_else(|| format!("mesh{}", mesh.index()));

            for primitive in mesh.primitives() {
                let material_index = primitive.material().index().unwrap_or_else(|| {
                    needs_default = true;
                    default_material
                });
                let name = format!("{}/{}", mesh_name, primitive.index());
                meshes.push(read_primitive(&primitive, &buffers, name, material_index, flags)?);
            }
        }

        if needs_default {
            materials.push(SceneMaterial {
                name: "default".into(),
                diffuse_textures: Vec::new(),
            });
        }

        debug!(
            "glTF scene: {} submeshes, {} materials",
            meshes.len(),
            materials.len()
        );

        Ok(Scene { meshes, materials })
    }
}

fn read_material(material: gltf::Material<'_>) -> SceneMaterial {
    let name = material
        .name()
        .map(str::to_string)
        .unwrap_or_else(|| match material.index() {
            Some(index) => format!("material{}", index),
            None => "default".to_string(),
        });

    let diffuse_textures = material
        .pbr_metallic_roughness()
        .base_color_texture()
        .and_then(|info| match info.texture().source().source() {
            gltf::image::Source::Uri { uri, .. } if !uri.starts_with("data:") => {
                Some(uri.to_string())
            }
            _ => {
                debug!("Material '{}' uses an embedded base color image", name);
                None
            }
        })
        .into_iter()
        .collect();

    SceneMaterial {
        name,
        diffuse_textures,
    }
}

fn read_primitive(
    primitive: &gltf::Primitive<'_>,
    buffers: &[gltf::buffer::Data],
    name: String,
    material_index: usize,
    flags: ImportFlags,
) -> Result<SceneMesh, ParseError> {
    let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

    let positions: Vec<Vec3> = reader
        .read_positions()
        .map(|iter| iter.map(Vec3::from).collect())
        .unwrap_or_default();
    let num_vertices = positions.len();

    let indices: Vec<u32> = reader
        .read_indices()
        .map(|idx| idx.into_u32().collect())
        .unwrap_or_else(|| (0..num_vertices as u32).collect());

    let mode = primitive.mode();
    let faces = match mode {
        Mode::Triangles => postprocess::triangle_list(&indices),
        Mode::TriangleStrip | Mode::TriangleFan if !flags.contains(ImportFlags::TRIANGULATE) => {
            return Err(ParseError::UnsupportedPrimitive {
                mesh: name,
                mode: format!("{:?}", mode),
            });
        }
        Mode::TriangleStrip => postprocess::triangle_strip(&indices),
        Mode::TriangleFan => postprocess::triangle_fan(&indices),
        Mode::Points => postprocess::points(&indices),
        Mode::Lines => postprocess::lines(&indices, false, false),
        Mode::LineStrip => postprocess::lines(&indices, true, false),
        Mode::LineLoop => postprocess::lines(&indices, true, true),
    };

    let mut tex_coords: Option<Vec<Vec2>> = reader
        .read_tex_coords(0)
        .map(|tc| tc.into_f32().map(Vec2::from).collect());
    // glTF stores UVs with a top-left origin, which is what FLIP_UVS asks for.
    if !flags.contains(ImportFlags::FLIP_UVS) {
        if let Some(uvs) = tex_coords.as_mut() {
            postprocess::flip_v(uvs);
        }
    }

    let normals: Vec<Vec3> = match reader.read_normals() {
        Some(iter) => iter.map(Vec3::from).collect(),
        None if flags.contains(ImportFlags::GEN_SMOOTH_NORMALS) => {
            postprocess::smooth_normals(&positions, &faces)
        }
        None => Vec::new(),
    };

    let tangents: Vec<Vec3> = match reader.read_tangents() {
        Some(iter) => iter.map(|t| Vec3::new(t[0], t[1], t[2])).collect(),
        None if flags.contains(ImportFlags::CALC_TANGENT_SPACE) => {
            postprocess::tangents(&positions, &normals, tex_coords.as_deref(), &faces)
        }
        None => Vec::new(),
    };

    debug!(
        "Primitive '{}': {} vertices, {} faces, uvs: {}",
        name,
        num_vertices,
        faces.len(),
        tex_coords.is_some()
    );

    Ok(SceneMesh {
        name,
        num_vertices,
        positions,
        normals,
        tangents,
        tex_coords,
        faces,
        material_index,
    })
}
