/// Cube geometry for the rotating-cube demos
use nalgebra::Vector4;

/// Vertices in the triangle stream: 6 faces x 2 triangles x 3 vertices.
pub const FACE_VERTEX_COUNT: usize = 36;

/// Vertex references in the line stream: 6 faces x 4 segments x 2 endpoints.
pub const EDGE_VERTEX_COUNT: usize = 48;

/// Per-face corner indices, cyclic winding. Draw calls address the generated
/// streams by position, so this table must stay fixed.
const FACES: [[usize; 4]; 6] = [
    [1, 2, 6, 5],
    [5, 4, 0, 1],
    [1, 0, 3, 2],
    [2, 3, 7, 6],
    [7, 3, 0, 4],
    [7, 4, 5, 6],
];

/// A cube centered at the origin with half-extent `size / 2`.
///
/// The eight corner positions are homogeneous (w = 1.0) and fixed at
/// construction; the derived triangle and line streams are pure functions of
/// them. Size is assumed positive.
#[derive(Debug, Clone)]
pub struct Cube {
    corners: [Vector4<f32>; 8],
    pub color_faces: Vector4<f32>,
    pub color_edges: Vector4<f32>,
}

impl Cube {
    pub fn new(size: f32) -> Self {
        let p = size / 2.0;
        Self {
            corners: [
                Vector4::new(-p, -p, p, 1.0),
                Vector4::new(-p, p, p, 1.0),
                Vector4::new(p, p, p, 1.0),
                Vector4::new(p, -p, p, 1.0),
                Vector4::new(-p, -p, -p, 1.0),
                Vector4::new(-p, p, -p, 1.0),
                Vector4::new(p, p, -p, 1.0),
                Vector4::new(p, -p, -p, 1.0),
            ],
            color_faces: Vector4::new(0.0, 0.0, 0.0, 1.0),
            color_edges: Vector4::new(0.0, 0.0, 0.0, 1.0),
        }
    }

    pub fn corners(&self) -> &[Vector4<f32>; 8] {
        &self.corners
    }

    /// The 6 faces as 12 triangles, 36 vertices total.
    ///
    /// Each quad (a, b, c, d) fans into (a, b, c), (a, c, d).
    pub fn faces_as_triangles(&self) -> Vec<Vector4<f32>> {
        let mut stream = Vec::with_capacity(FACE_VERTEX_COUNT);
        for &[a, b, c, d] in &FACES {
            for i in [a, b, c, a, c, d] {
                stream.push(self.corners[i]);
            }
        }
        stream
    }

    /// Outward face normals parallel to [`Self::faces_as_triangles`]: one per
    /// triangle vertex, constant across each face, w = 0.
    pub fn face_normals(&self) -> Vec<Vector4<f32>> {
        let mut stream = Vec::with_capacity(FACE_VERTEX_COUNT);
        for &[a, b, c, _] in &FACES {
            let edge1 = (self.corners[b] - self.corners[a]).xyz();
            let edge2 = (self.corners[c] - self.corners[a]).xyz();
            let n = edge1.cross(&edge2).normalize();
            for _ in 0..6 {
                stream.push(Vector4::new(n.x, n.y, n.z, 0.0));
            }
        }
        stream
    }

    /// The 12 cube edges as 24 line segments, 48 vertex references total.
    ///
    /// Each quad (a, b, c, d) contributes (a,b), (b,c), (c,d), (d,a); shared
    /// edges are emitted once per adjacent face, matching the draw count the
    /// frontends expect.
    pub fn edges_as_line_segments(&self) -> Vec<Vector4<f32>> {
        let mut stream = Vec::with_capacity(EDGE_VERTEX_COUNT);
        for &[a, b, c, d] in &FACES {
            for i in [a, b, b, c, c, d, d, a] {
                stream.push(self.corners[i]);
            }
        }
        stream
    }
}

/// Flatten homogeneous vectors into a linear f32 buffer for GPU upload.
pub fn flatten(points: &[Vector4<f32>]) -> Vec<f32> {
    let mut buffer = Vec::with_capacity(points.len() * 4);
    for p in points {
        buffer.extend_from_slice(&[p.x, p.y, p.z, p.w]);
    }
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    #[test]
    fn corners_sit_on_half_extent() {
        for size in [1.0f32, 2.5, 0.01] {
            let half = size / 2.0;
            let cube = Cube::new(size);
            let mut centroid = Vector3::zeros();
            for corner in cube.corners() {
                for axis in 0..3 {
                    assert!((corner[axis].abs() - half).abs() < 1e-6);
                }
                assert_eq!(corner.w, 1.0);
                centroid += corner.xyz();
            }
            assert!(centroid.norm() < 1e-6);
        }
    }

    #[test]
    fn stream_lengths_are_fixed() {
        for size in [0.5f32, 1.0, 10.0] {
            let cube = Cube::new(size);
            assert_eq!(cube.faces_as_triangles().len(), FACE_VERTEX_COUNT);
            assert_eq!(cube.face_normals().len(), FACE_VERTEX_COUNT);
            assert_eq!(cube.edges_as_line_segments().len(), EDGE_VERTEX_COUNT);
        }
    }

    #[test]
    fn first_triangle_uses_corners_1_2_6() {
        let cube = Cube::new(1.0);
        let stream = cube.faces_as_triangles();
        assert_eq!(stream[0], Vector4::new(-0.5, 0.5, 0.5, 1.0));
        assert_eq!(stream[1], Vector4::new(0.5, 0.5, 0.5, 1.0));
        assert_eq!(stream[2], Vector4::new(0.5, 0.5, -0.5, 1.0));
    }

    #[test]
    fn quads_are_planar_and_non_degenerate() {
        let cube = Cube::new(3.0);
        for &[a, b, c, d] in &FACES {
            let pa = cube.corners()[a].xyz();
            let pb = cube.corners()[b].xyz();
            let pc = cube.corners()[c].xyz();
            let pd = cube.corners()[d].xyz();
            let n = (pb - pa).cross(&(pc - pa));
            assert!(n.norm() > 1e-6);
            assert!((pd - pa).dot(&n).abs() < 1e-5);
        }
    }

    #[test]
    fn normals_are_unit_and_outward() {
        let cube = Cube::new(2.0);
        let triangles = cube.faces_as_triangles();
        let normals = cube.face_normals();
        for (vertex, normal) in triangles.iter().zip(&normals) {
            assert!((normal.xyz().norm() - 1.0).abs() < 1e-6);
            assert_eq!(normal.w, 0.0);
            // Outward means pointing away from the cube center.
            assert!(vertex.xyz().dot(&normal.xyz()) > 0.0);
        }
        // Constant per face: six vertices per face share one normal.
        for face in 0..6 {
            for i in 1..6 {
                assert_eq!(normals[face * 6], normals[face * 6 + i]);
            }
        }
    }

    #[test]
    fn edge_segments_follow_quad_loops() {
        let cube = Cube::new(1.0);
        let corners = *cube.corners();
        let stream = cube.edges_as_line_segments();
        // First quad (1, 2, 6, 5) -> (1,2), (2,6), (6,5), (5,1).
        let expected = [1usize, 2, 2, 6, 6, 5, 5, 1];
        for (i, &corner) in expected.iter().enumerate() {
            assert_eq!(stream[i], corners[corner]);
        }
    }

    #[test]
    fn generation_is_idempotent() {
        let cube = Cube::new(1.7);
        assert_eq!(cube.faces_as_triangles(), cube.faces_as_triangles());
        assert_eq!(cube.face_normals(), cube.face_normals());
        assert_eq!(cube.edges_as_line_segments(), cube.edges_as_line_segments());
    }

    #[test]
    fn flatten_preserves_component_order() {
        let points = [Vector4::new(1.0, 2.0, 3.0, 4.0), Vector4::new(5.0, 6.0, 7.0, 8.0)];
        assert_eq!(flatten(&points), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
    }
}
