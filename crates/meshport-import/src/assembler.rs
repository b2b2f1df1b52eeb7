//! Per-submesh vertex and index assembly.

use glam::Vec2;
use meshport_assets::SceneMesh;
use meshport_render::Vertex;

use crate::error::{Attribute, SubmeshError};

/// Interleaved vertices and a triangle index list for one submesh.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SubmeshGeometry {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl SubmeshGeometry {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

fn check_len(attribute: Attribute, len: usize, expected: usize) -> Result<(), SubmeshError> {
    if len < expected {
        return Err(SubmeshError::ShortAttribute {
            attribute,
            len,
            expected,
        });
    }
    Ok(())
}

/// Build the vertex and index buffers of one submesh.
///
/// Vertex `i` is taken from element `i` of every attribute array; a submesh
/// without texture coordinates gets `(0, 0)` everywhere. Face indices are
/// copied in stored order. Faces must already be triangles.
pub fn assemble(mesh: &SceneMesh) -> Result<SubmeshGeometry, SubmeshError> {
    let n = mesh.num_vertices;

    check_len(Attribute::Positions, mesh.positions.len(), n)?;
    check_len(Attribute::Normals, mesh.normals.len(), n)?;
    check_len(Attribute::Tangents, mesh.tangents.len(), n)?;
    if let Some(uvs) = &mesh.tex_coords {
        check_len(Attribute::TexCoords, uvs.len(), n)?;
    }

    let vertices: Vec<Vertex> = (0..n)
        .map(|i| {
            let tex_coord = mesh
                .tex_coords
                .as_ref()
                .map_or(Vec2::ZERO, |uvs| uvs[i]);
            Vertex::new(mesh.positions[i], tex_coord, mesh.normals[i], mesh.tangents[i])
        })
        .collect();

    let mut indices = Vec::with_capacity(mesh.faces.len() * 3);
    for (face_index, face) in mesh.faces.iter().enumerate() {
        if face.arity() != 3 {
            return Err(SubmeshError::NonTriangularFace {
                face: face_index,
                arity: face.arity(),
            });
        }
        for &index in &face.indices {
            if index as usize >= n {
                return Err(SubmeshError::IndexOutOfRange {
                    face: face_index,
                    index,
                    vertex_count: n,
                });
            }
            indices.push(index);
        }
    }

    Ok(SubmeshGeometry { vertices, indices })
}

/// One triangle in the XY plane, optionally with texture coordinates.
#[cfg(test)]
pub(crate) fn triangle_mesh(with_uvs: bool) -> SceneMesh {
    use glam::Vec3;
    use meshport_assets::Face;

    SceneMesh {
        name: "tri".into(),
        num_vertices: 3,
        positions: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
        normals: vec![Vec3::Z; 3],
        tangents: vec![Vec3::X; 3],
        tex_coords: with_uvs.then(|| {
            vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)]
        }),
        faces: vec![Face::triangle(0, 1, 2)],
        material_index: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use meshport_assets::Face;

    fn grid(columns: u32, rows: u32) -> SceneMesh {
        let mut mesh = SceneMesh {
            name: "grid".into(),
            ..Default::default()
        };
        for y in 0..=rows {
            for x in 0..=columns {
                mesh.positions.push(Vec3::new(x as f32, y as f32, 0.0));
            }
        }
        mesh.num_vertices = mesh.positions.len();
        mesh.normals = vec![Vec3::Z; mesh.num_vertices];
        mesh.tangents = vec![Vec3::X; mesh.num_vertices];
        let stride = columns + 1;
        for y in 0..rows {
            for x in 0..columns {
                let i = y * stride + x;
                mesh.faces.push(Face::triangle(i, i + 1, i + stride));
                mesh.faces.push(Face::triangle(i + 1, i + stride + 1, i + stride));
            }
        }
        mesh
    }

    #[test]
    fn counts_and_ranges_hold() {
        for (columns, rows) in [(1, 1), (3, 2), (8, 5)] {
            let mesh = grid(columns, rows);
            let geometry = assemble(&mesh).unwrap();
            assert_eq!(geometry.vertices.len(), mesh.num_vertices);
            assert_eq!(geometry.indices.len(), 3 * mesh.num_faces());
            assert!(geometry
                .indices
                .iter()
                .all(|&i| (i as usize) < geometry.vertices.len()));
        }
    }

    #[test]
    fn attributes_are_index_aligned() {
        let geometry = assemble(&triangle_mesh(true)).unwrap();
        assert_eq!(geometry.vertices[1].position(), Vec3::X);
        assert_eq!(geometry.vertices[1].tex_coord(), Vec2::new(1.0, 0.0));
        assert_eq!(geometry.vertices[2].normal(), Vec3::Z);
        assert_eq!(geometry.vertices[2].tangent(), Vec3::X);
    }

    #[test]
    fn missing_uvs_become_zero() {
        let geometry = assemble(&grid(2, 2)).unwrap();
        assert!(geometry.vertices.iter().all(|v| v.tex_coord() == Vec2::ZERO));
    }

    #[test]
    fn face_order_is_preserved() {
        let mut mesh = triangle_mesh(false);
        mesh.faces = vec![Face::triangle(2, 0, 1), Face::triangle(1, 2, 0)];
        let geometry = assemble(&mesh).unwrap();
        assert_eq!(geometry.indices, vec![2, 0, 1, 1, 2, 0]);
        assert_eq!(geometry.triangle_count(), 2);
    }

    #[test]
    fn longer_arrays_are_truncated_to_vertex_count() {
        let mut mesh = triangle_mesh(true);
        mesh.positions.push(Vec3::ONE);
        mesh.normals.push(Vec3::ONE);
        let geometry = assemble(&mesh).unwrap();
        assert_eq!(geometry.vertices.len(), 3);
    }

    #[test]
    fn short_normals_are_rejected() {
        let mut mesh = triangle_mesh(true);
        mesh.normals.pop();
        assert_eq!(
            assemble(&mesh).unwrap_err(),
            SubmeshError::ShortAttribute {
                attribute: Attribute::Normals,
                len: 2,
                expected: 3,
            }
        );
    }

    #[test]
    fn short_positions_tangents_and_uvs_are_rejected() {
        let mut mesh = triangle_mesh(true);
        mesh.positions.truncate(1);
        assert!(matches!(
            assemble(&mesh),
            Err(SubmeshError::ShortAttribute { attribute: Attribute::Positions, .. })
        ));

        let mut mesh = triangle_mesh(true);
        mesh.tangents.clear();
        assert!(matches!(
            assemble(&mesh),
            Err(SubmeshError::ShortAttribute { attribute: Attribute::Tangents, .. })
        ));

        let mut mesh = triangle_mesh(true);
        mesh.tex_coords.as_mut().unwrap().pop();
        assert!(matches!(
            assemble(&mesh),
            Err(SubmeshError::ShortAttribute { attribute: Attribute::TexCoords, .. })
        ));
    }

    #[test]
    fn non_triangles_are_rejected() {
        let mut mesh = triangle_mesh(false);
        mesh.faces.push(Face::new(vec![0, 1]));
        assert_eq!(
            assemble(&mesh).unwrap_err(),
            SubmeshError::NonTriangularFace { face: 1, arity: 2 }
        );
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let mut mesh = triangle_mesh(false);
        mesh.faces = vec![Face::triangle(0, 1, 3)];
        assert_eq!(
            assemble(&mesh).unwrap_err(),
            SubmeshError::IndexOutOfRange {
                face: 0,
                index: 3,
                vertex_count: 3,
            }
        );
    }

    #[test]
    fn empty_submesh_is_fine() {
        let geometry = assemble(&SceneMesh::default()).unwrap();
        assert!(geometry.vertices.is_empty());
        assert!(geometry.indices.is_empty());
    }
}
