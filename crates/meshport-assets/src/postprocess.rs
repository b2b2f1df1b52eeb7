//! Geometry post-processing applied by parsers according to [`ImportFlags`](crate::ImportFlags).

use glam::{Vec2, Vec3};

use crate::scene::Face;

/// Split a triangle list into faces. A trailing partial triangle is kept as a
/// short face so that later validation can reject it.
pub fn triangle_list(indices: &[u32]) -> Vec<Face> {
    indices.chunks(3).map(Face::new).collect()
}

/// Convert a triangle strip into a triangle list, keeping the winding of the
/// first triangle and dropping degenerate triangles.
pub fn triangle_strip(indices: &[u32]) -> Vec<Face> {
    if indices.len() < 3 {
        return Vec::new();
    }
    (0..indices.len() - 2)
        .map(|i| {
            if i % 2 == 0 {
                [indices[i], indices[i + 1], indices[i + 2]]
            } else {
                [indices[i + 1], indices[i], indices[i + 2]]
            }
        })
        .filter(|[a, b, c]| a != b && b != c && a != c)
        .map(|[a, b, c]| Face::triangle(a, b, c))
        .collect()
}

/// Convert a triangle fan into a triangle list.
pub fn triangle_fan(indices: &[u32]) -> Vec<Face> {
    if indices.len() < 3 {
        return Vec::new();
    }
    let hub = indices[0];
    indices[1..]
        .windows(2)
        .map(|pair| Face::triangle(pair[0], pair[1], hub))
        .collect()
}

/// One single-index face per point.
pub fn points(indices: &[u32]) -> Vec<Face> {
    indices.iter().map(|&i| Face::new(vec![i])).collect()
}

/// Two-index faces for line lists, strips and loops.
pub fn lines(indices: &[u32], strip: bool, closed: bool) -> Vec<Face> {
    let mut faces: Vec<Face> = if strip {
        indices.windows(2).map(Face::new).collect()
    } else {
        indices.chunks(2).map(Face::new).collect()
    };
    if closed && indices.len() > 2 {
        faces.push(Face::new(vec![indices[indices.len() - 1], indices[0]]));
    }
    faces
}

fn triangle_corners(positions: &[Vec3], face: &Face) -> Option<([usize; 3], [Vec3; 3])> {
    let [a, b, c] = <[u32; 3]>::try_from(face.indices.as_slice()).ok()?;
    let idx = [a as usize, b as usize, c as usize];
    let p = [
        *positions.get(idx[0])?,
        *positions.get(idx[1])?,
        *positions.get(idx[2])?,
    ];
    Some((idx, p))
}

fn unit_or(v: Vec3, fallback: Vec3) -> Vec3 {
    let n = v.normalize_or_zero();
    if n == Vec3::ZERO {
        fallback
    } else {
        n
    }
}

/// Area-weighted smooth normals. Vertices touched by no triangle get +Z.
pub fn smooth_normals(positions: &[Vec3], faces: &[Face]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];
    for face in faces {
        let Some((idx, [p0, p1, p2])) = triangle_corners(positions, face) else {
            continue;
        };
        // Cross product length is twice the triangle area.
        let weighted = (p1 - p0).cross(p2 - p0);
        for i in idx {
            normals[i] += weighted;
        }
    }
    normals.into_iter().map(|n| unit_or(n, Vec3::Z)).collect()
}

/// Any unit vector perpendicular to `normal`.
pub fn orthogonal(normal: Vec3) -> Vec3 {
    let axis = if normal.x.abs() < 0.9 { Vec3::X } else { Vec3::Y };
    unit_or(axis - normal * normal.dot(axis), Vec3::X)
}

/// Per-vertex tangents from texture-space derivatives, orthogonalised against
/// the vertex normal. Without usable UVs the tangent is an arbitrary
/// perpendicular of the normal.
pub fn tangents(
    positions: &[Vec3],
    normals: &[Vec3],
    tex_coords: Option<&[Vec2]>,
    faces: &[Face],
) -> Vec<Vec3> {
    let mut accumulated = vec![Vec3::ZERO; positions.len()];

    if let Some(uvs) = tex_coords {
        for face in faces {
            let Some((idx, [p0, p1, p2])) = triangle_corners(positions, face) else {
                continue;
            };
            let (Some(&t0), Some(&t1), Some(&t2)) =
                (uvs.get(idx[0]), uvs.get(idx[1]), uvs.get(idx[2]))
            else {
                continue;
            };
            let e1 = p1 - p0;
            let e2 = p2 - p0;
            let d1 = t1 - t0;
            let d2 = t2 - t0;
            let det = d1.x * d2.y - d2.x * d1.y;
            if det.abs() <= f32::EPSILON {
                continue;
            }
            let tangent = (e1 * d2.y - e2 * d1.y) / det;
            for i in idx {
                accumulated[i] += tangent;
            }
        }
    }

    accumulated
        .into_iter()
        .enumerate()
        .map(|(i, t)| {
            let n = normals.get(i).copied().unwrap_or(Vec3::Z);
            // Gram-Schmidt against the normal.
            let projected = t - n * n.dot(t);
            let fallback = orthogonal(n);
            unit_or(projected, fallback)
        })
        .collect()
}

/// Mirror the vertical texture axis.
pub fn flip_v(tex_coords: &mut [Vec2]) {
    for uv in tex_coords {
        uv.y = 1.0 - uv.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indices(faces: &[Face]) -> Vec<Vec<u32>> {
        faces.iter().map(|f| f.indices.clone()).collect()
    }

    #[test]
    fn list_keeps_trailing_partial_face() {
        let faces = triangle_list(&[0, 1, 2, 3, 4]);
        assert_eq!(indices(&faces), vec![vec![0, 1, 2], vec![3, 4]]);
    }

    #[test]
    fn strip_alternates_winding() {
        let faces = triangle_strip(&[0, 1, 2, 3]);
        assert_eq!(indices(&faces), vec![vec![0, 1, 2], vec![2, 1, 3]]);
    }

    #[test]
    fn strip_drops_degenerates() {
        let faces = triangle_strip(&[0, 1, 1, 2]);
        assert!(faces.is_empty());
    }

    #[test]
    fn fan_around_first_vertex() {
        let faces = triangle_fan(&[0, 1, 2, 3]);
        assert_eq!(indices(&faces), vec![vec![1, 2, 0], vec![2, 3, 0]]);
    }

    #[test]
    fn line_loop_closes() {
        let faces = lines(&[0, 1, 2], true, true);
        assert_eq!(indices(&faces), vec![vec![0, 1], vec![1, 2], vec![2, 0]]);
        assert_eq!(points(&[4, 5]).len(), 2);
    }

    #[test]
    fn smooth_normals_of_flat_quad() {
        let positions = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ];
        let faces = vec![Face::triangle(0, 1, 2), Face::triangle(0, 2, 3)];
        let normals = smooth_normals(&positions, &faces);
        for n in normals {
            assert!((n - Vec3::Z).length() < 1e-6);
        }
    }

    #[test]
    fn smooth_normals_skip_bad_faces() {
        let positions = vec![Vec3::ZERO, Vec3::X];
        let faces = vec![Face::triangle(0, 1, 9), Face::new(vec![0, 1])];
        let normals = smooth_normals(&positions, &faces);
        assert_eq!(normals, vec![Vec3::Z, Vec3::Z]);
    }

    #[test]
    fn tangents_follow_u_axis() {
        let positions = vec![Vec3::ZERO, Vec3::X, Vec3::Y];
        let normals = vec![Vec3::Z; 3];
        let uvs = vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)];
        let faces = vec![Face::triangle(0, 1, 2)];
        let tangents = tangents(&positions, &normals, Some(uvs.as_slice()), &faces);
        for t in tangents {
            assert!((t - Vec3::X).length() < 1e-6);
        }
    }

    #[test]
    fn tangents_without_uvs_are_perpendicular() {
        let positions = vec![Vec3::ZERO, Vec3::X, Vec3::Y];
        let normals = vec![Vec3::Z; 3];
        let faces = vec![Face::triangle(0, 1, 2)];
        for t in tangents(&positions, &normals, None, &faces) {
            assert!(t.dot(Vec3::Z).abs() < 1e-6);
            assert!((t.length() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn flip_mirrors_v() {
        let mut uvs = vec![Vec2::new(0.25, 0.0), Vec2::new(0.5, 0.75)];
        flip_v(&mut uvs);
        assert_eq!(uvs, vec![Vec2::new(0.25, 1.0), Vec2::new(0.5, 0.25)]);
    }
}
