use crate::error::{GeometryError, Result};
use crate::math::{Point3, Tolerance, Vector3};

use crate::geometry::{Aabb, Plane};

/// Boundary mesh of a convex polyhedron: a vertex list plus polygonal faces
/// as index loops.
///
/// The mesh is a value type: clipping never edits it in place, it builds a
/// replacement from a new point set.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvexMesh {
    vertices: Vec<Point3>,
    faces: Vec<Vec<usize>>,
}

impl ConvexMesh {
    /// Creates a mesh from vertices and face index loops.
    ///
    /// # Errors
    ///
    /// Returns an error if any face references a vertex out of bounds or has
    /// fewer than three vertices.
    pub fn new(vertices: Vec<Point3>, faces: Vec<Vec<usize>>) -> Result<Self> {
        for face in &faces {
            if face.len() < 3 {
                return Err(GeometryError::Degenerate(
                    "mesh face needs at least three vertices".into(),
                )
                .into());
            }
            for &idx in face {
                if idx >= vertices.len() {
                    return Err(GeometryError::IndexOutOfBounds {
                        index: idx,
                        len: vertices.len(),
                    }
                    .into());
                }
            }
        }
        Ok(Self { vertices, faces })
    }

    /// The box as a six-faced mesh.
    #[must_use]
    pub fn from_aabb(aabb: &Aabb) -> Self {
        let vertices = aabb.corners().to_vec();
        let faces = vec![
            vec![2, 3, 1, 0], // z-
            vec![4, 5, 7, 6], // z+
            vec![0, 1, 5, 4], // y-
            vec![3, 2, 6, 7], // y+
            vec![0, 4, 6, 2], // x-
            vec![1, 3, 7, 5], // x+
        ];
        Self { vertices, faces }
    }

    /// The vertex list.
    #[must_use]
    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    /// The face index loops.
    #[must_use]
    pub fn faces(&self) -> &[Vec<usize>] {
        &self.faces
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of faces.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// The unique undirected edges, as index pairs with the smaller index
    /// first.
    #[must_use]
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let mut edges: Vec<(usize, usize)> = Vec::new();
        for face in &self.faces {
            for i in 0..face.len() {
                let a = face[i];
                let b = face[(i + 1) % face.len()];
                let edge = if a < b { (a, b) } else { (b, a) };
                edges.push(edge);
            }
        }
        edges.sort_unstable();
        edges.dedup();
        edges
    }

    /// The tight bounding box of the vertices.
    #[must_use]
    pub fn aabb(&self) -> Aabb {
        Aabb::from_points(&self.vertices)
    }

    /// Mean of the vertices. Inside the polyhedron for a convex mesh.
    #[must_use]
    pub fn vertex_mean(&self) -> Point3 {
        let mut sum = Vector3::zeros();
        for v in &self.vertices {
            sum += v.coords;
        }
        #[allow(clippy::cast_precision_loss)]
        let count = self.vertices.len() as f64;
        Point3::from(sum / count)
    }

    /// One supporting plane per face, normals pointing into the interior.
    /// This is the orientation the clipper consumes: interior points
    /// classify as front.
    #[must_use]
    pub fn face_planes(&self) -> Vec<Plane> {
        self.face_planes_offset(0.0)
    }

    /// Face planes moved outward by `offset` (growing the enclosed volume).
    #[must_use]
    pub fn face_planes_offset(&self, offset: f64) -> Vec<Plane> {
        let interior = self.vertex_mean();
        let mut planes = Vec::with_capacity(self.faces.len());
        for face in &self.faces {
            let Some(plane) = self.face_plane(face) else {
                continue;
            };
            let plane = if plane.signed_distance(&interior) < 0.0 {
                plane.flipped()
            } else {
                plane
            };
            planes.push(plane.offset(-offset));
        }
        planes
    }

    /// Supporting plane of one face loop via Newell's method; `None` for a
    /// degenerate loop.
    fn face_plane(&self, face: &[usize]) -> Option<Plane> {
        let mut normal = Vector3::zeros();
        for (i, &idx) in face.iter().enumerate() {
            let p = &self.vertices[idx];
            let q = &self.vertices[face[(i + 1) % face.len()]];
            normal.x += (p.y - q.y) * (p.z + q.z);
            normal.y += (p.z - q.z) * (p.x + q.x);
            normal.z += (p.x - q.x) * (p.y + q.y);
        }
        Plane::from_origin_normal(self.vertices[face[0]], normal).ok()
    }

    /// Volume of the polyhedron, by fan-triangulating each face against the
    /// origin and summing signed tetrahedron volumes.
    #[must_use]
    pub fn volume(&self) -> f64 {
        let mut volume = 0.0;
        for face in &self.faces {
            let v0 = self.vertices[face[0]].coords;
            for i in 1..face.len() - 1 {
                let v1 = self.vertices[face[i]].coords;
                let v2 = self.vertices[face[i + 1]].coords;
                volume += v0.dot(&v1.cross(&v2));
            }
        }
        (volume / 6.0).abs()
    }

    /// Volume centroid. Falls back to the vertex mean for a near-flat mesh.
    #[must_use]
    pub fn centroid(&self, tol: Tolerance) -> Point3 {
        let mut centroid = Vector3::zeros();
        let mut total = 0.0;
        for face in &self.faces {
            let v0 = self.vertices[face[0]].coords;
            for i in 1..face.len() - 1 {
                let v1 = self.vertices[face[i]].coords;
                let v2 = self.vertices[face[i + 1]].coords;
                let det = v0.dot(&v1.cross(&v2));
                total += det;
                centroid += det * (v0 + v1 + v2);
            }
        }
        if tol.is_zero(total.abs()) {
            return self.vertex_mean();
        }
        Point3::from(centroid / (4.0 * total))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_box_mesh() -> ConvexMesh {
        let aabb = Aabb::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0)).unwrap();
        ConvexMesh::from_aabb(&aabb)
    }

    #[test]
    fn cube_counts() {
        let mesh = unit_box_mesh();
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.face_count(), 6);
        assert_eq!(mesh.edges().len(), 12);
    }

    #[test]
    fn cube_volume_and_centroid() {
        let tol = Tolerance::default();
        let mesh = unit_box_mesh();
        assert_relative_eq!(mesh.volume(), 1.0, epsilon = 1e-9);
        let c = mesh.centroid(tol);
        assert_relative_eq!(c.x, 0.5, epsilon = 1e-9);
        assert_relative_eq!(c.y, 0.5, epsilon = 1e-9);
        assert_relative_eq!(c.z, 0.5, epsilon = 1e-9);
    }

    #[test]
    fn cube_face_planes_face_inward() {
        let mesh = unit_box_mesh();
        let interior = mesh.vertex_mean();
        let planes = mesh.face_planes();
        assert_eq!(planes.len(), 6);
        for plane in &planes {
            assert!(plane.signed_distance(&interior) > 0.0);
        }
    }

    #[test]
    fn offset_planes_grow_the_volume() {
        let mesh = unit_box_mesh();
        let interior = mesh.vertex_mean();
        for (grown, original) in mesh
            .face_planes_offset(0.25)
            .iter()
            .zip(mesh.face_planes())
        {
            assert!(
                grown.signed_distance(&interior) > original.signed_distance(&interior),
                "offset plane should be farther from the interior"
            );
        }
    }

    #[test]
    fn face_index_out_of_bounds_is_rejected() {
        let vertices = vec![
            Point3::origin(),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        assert!(ConvexMesh::new(vertices.clone(), vec![vec![0, 1, 3]]).is_err());
        assert!(ConvexMesh::new(vertices.clone(), vec![vec![0, 1]]).is_err());
        assert!(ConvexMesh::new(vertices, vec![vec![0, 1, 2]]).is_ok());
    }
}
