use crate::geometry::{Aabb, Plane};
use crate::math::{classify, intersect_3d, overlap_3d, Classification, Intersection, Point3, Tolerance};
use crate::mesh::{convex_hull, ConvexMesh};

/// A (possibly unbounded) convex Voronoi cell owned by one generator point.
///
/// The boundary mesh is replaced wholesale on every slice; a `None` mesh
/// means the cell has been clipped away entirely, which is a legitimate
/// outcome (a generator outside the bounding region), not an error.
#[derive(Debug, Clone)]
pub struct VoronoiCell {
    generator: Point3,
    index: usize,
    mesh: Option<ConvexMesh>,
    on_boundary: Vec<bool>,
    open: bool,
    sliced: bool,
}

impl VoronoiCell {
    /// Builds a cell as the convex hull of a point set (typically the
    /// circumcenters of the generator's Delaunay vertex hull). A degenerate
    /// point set yields a cell without a mesh.
    #[must_use]
    pub fn from_points(points: &[Point3], generator: Point3, index: usize, tol: Tolerance) -> Self {
        let mesh = convex_hull(points, tol);
        let on_boundary = mesh
            .as_ref()
            .map(|m| vec![false; m.vertex_count()])
            .unwrap_or_default();
        Self {
            generator,
            index,
            mesh,
            on_boundary,
            open: false,
            sliced: false,
        }
    }

    /// Wraps an existing convex mesh as a cell.
    #[must_use]
    pub fn from_mesh(mesh: ConvexMesh, generator: Point3, index: usize) -> Self {
        let on_boundary = vec![false; mesh.vertex_count()];
        Self {
            generator,
            index,
            mesh: Some(mesh),
            on_boundary,
            open: false,
            sliced: false,
        }
    }

    /// The generator point that owns this cell.
    #[must_use]
    pub fn generator(&self) -> &Point3 {
        &self.generator
    }

    /// Index of the generator in the original point set.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The boundary mesh, or `None` when the cell has been clipped away.
    #[must_use]
    pub fn mesh(&self) -> Option<&ConvexMesh> {
        self.mesh.as_ref()
    }

    /// Per-vertex flags: whether the vertex lies on a constraining plane.
    /// Recomputed by [`constrain_planes`](Self::constrain_planes).
    #[must_use]
    pub fn boundary_flags(&self) -> &[bool] {
        &self.on_boundary
    }

    /// Whether some face of the constrained cell lies entirely on the
    /// constraint boundary, meaning the cell extended unbounded in that
    /// direction before clipping.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Whether any slice actually cut the cell.
    #[must_use]
    pub fn is_sliced(&self) -> bool {
        self.sliced
    }

    /// Slices the cell by a plane, keeping the front side.
    ///
    /// Vertices classified front or on are retained verbatim; every edge
    /// with endpoints on strictly opposite sides contributes its
    /// plane-intersection point; the surviving point set is re-hulled. A
    /// degenerate remainder clears the mesh.
    pub fn slice(&mut self, plane: &Plane, tol: Tolerance) {
        let Some(mesh) = &self.mesh else {
            return;
        };
        let classes: Vec<Classification> = mesh
            .vertices()
            .iter()
            .map(|v| classify::point_plane(v, plane, tol))
            .collect();

        let mut new_points: Vec<Point3> = mesh
            .vertices()
            .iter()
            .zip(&classes)
            .filter(|(_, class)| **class != Classification::Back)
            .map(|(v, _)| *v)
            .collect();

        for (a, b) in mesh.edges() {
            let crossing = (classes[a] == Classification::Back
                && classes[b] == Classification::Front)
                || (classes[a] == Classification::Front && classes[b] == Classification::Back);
            if crossing {
                if let Intersection::Point { point, .. } = intersect_3d::segment_plane_points(
                    &mesh.vertices()[a],
                    &mesh.vertices()[b],
                    plane,
                    tol,
                ) {
                    new_points.push(point);
                    self.sliced = true;
                }
            }
        }

        self.mesh = convex_hull(&new_points, tol);
        self.on_boundary = self
            .mesh
            .as_ref()
            .map(|m| vec![false; m.vertex_count()])
            .unwrap_or_default();
    }

    /// Applies [`slice`](Self::slice) once per plane, short-circuiting when
    /// the cell empties, then recomputes the boundary flags and the open
    /// flag against the constraining planes.
    pub fn constrain_planes(&mut self, planes: &[Plane], tol: Tolerance) {
        for plane in planes {
            if self.mesh.is_none() {
                break;
            }
            self.slice(plane, tol);
        }
        self.update_boundary_flags(planes, tol);
    }

    /// Constrains the cell to an axis-aligned box: a container that already
    /// holds the cell is a no-op, a disjoint container clears the cell, and
    /// anything else slices by the six inward face planes.
    pub fn constrain_aabb(&mut self, container: &Aabb, tol: Tolerance) {
        let Some(mesh) = &self.mesh else {
            return;
        };
        let cell_aabb = mesh.aabb();
        if container.contains_aabb(&cell_aabb) {
            return;
        }
        if overlap_3d::aabb_aabb(&cell_aabb, container) {
            self.constrain_planes(&container.face_planes(), tol);
        } else {
            self.mesh = None;
            self.on_boundary.clear();
        }
    }

    /// Constrains the cell to a convex boundary mesh, one slice per face
    /// plane, with the planes pushed outward by `offset`.
    pub fn constrain_mesh(&mut self, boundary: &ConvexMesh, offset: f64, tol: Tolerance) {
        self.constrain_planes(&boundary.face_planes_offset(offset), tol);
    }

    fn update_boundary_flags(&mut self, planes: &[Plane], tol: Tolerance) {
        let Some(mesh) = &self.mesh else {
            self.on_boundary.clear();
            return;
        };
        self.on_boundary = mesh
            .vertices()
            .iter()
            .map(|v| {
                planes
                    .iter()
                    .any(|plane| tol.is_zero(plane.signed_distance(v)))
            })
            .collect();
        for face in mesh.faces() {
            if face.iter().all(|&vi| self.on_boundary[vi]) {
                self.open = true;
                break;
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Vector3;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn unit_cube_cell() -> VoronoiCell {
        let aabb = Aabb::new(Point3::origin(), p(1.0, 1.0, 1.0)).unwrap();
        VoronoiCell::from_mesh(ConvexMesh::from_aabb(&aabb), p(0.5, 0.5, 0.5), 0)
    }

    #[test]
    fn slicing_a_cube_through_the_center_halves_the_volume() {
        let tol = Tolerance::default();
        let mut cell = unit_cube_cell();
        let plane = Plane::from_origin_normal(p(0.5, 0.5, 0.5), Vector3::x()).unwrap();
        cell.slice(&plane, tol);
        let mesh = cell.mesh().unwrap();
        assert_relative_eq!(mesh.volume(), 0.5, epsilon = 1e-9);
        assert!(cell.is_sliced());
    }

    #[test]
    fn remaining_vertices_classify_front_or_on() {
        let tol = Tolerance::default();
        let mut cell = unit_cube_cell();
        let plane =
            Plane::from_origin_normal(p(0.5, 0.5, 0.5), Vector3::new(1.0, 0.7, -0.3)).unwrap();
        let before = cell.mesh().unwrap().volume();
        cell.slice(&plane, tol);
        let mesh = cell.mesh().unwrap();
        assert!(mesh.volume() <= before + 1e-9);
        for v in mesh.vertices() {
            assert_ne!(
                classify::point_plane(v, &plane, tol),
                Classification::Back,
                "vertex survived on the clipped side: {v:?}"
            );
        }
    }

    #[test]
    fn slice_missing_the_cell_changes_nothing() {
        let tol = Tolerance::default();
        let mut cell = unit_cube_cell();
        let plane = Plane::from_origin_normal(p(-3.0, 0.0, 0.0), Vector3::x()).unwrap();
        cell.slice(&plane, tol);
        let mesh = cell.mesh().unwrap();
        assert_relative_eq!(mesh.volume(), 1.0, epsilon = 1e-9);
        assert!(!cell.is_sliced());
    }

    #[test]
    fn slice_behind_the_cell_clears_it() {
        let tol = Tolerance::default();
        let mut cell = unit_cube_cell();
        let plane = Plane::from_origin_normal(p(3.0, 0.0, 0.0), Vector3::x()).unwrap();
        cell.slice(&plane, tol);
        assert!(cell.mesh().is_none());
    }

    #[test]
    fn cross_section_vertices_are_flagged_on_boundary() {
        let tol = Tolerance::default();
        let mut cell = unit_cube_cell();
        let plane = Plane::from_origin_normal(p(0.5, 0.5, 0.5), Vector3::x()).unwrap();
        cell.constrain_planes(std::slice::from_ref(&plane), tol);
        let mesh = cell.mesh().unwrap().clone();
        let flags = cell.boundary_flags();
        let mut cap_faces = 0;
        for face in mesh.faces() {
            let on_plane = face
                .iter()
                .all(|&vi| tol.is_zero(plane.signed_distance(&mesh.vertices()[vi])));
            if on_plane {
                cap_faces += 1;
                assert!(face.iter().all(|&vi| flags[vi]));
            }
        }
        assert_eq!(cap_faces, 1, "expected exactly one cross-section face");
        assert!(cell.is_open());
    }

    #[test]
    fn constrain_by_containing_box_is_a_noop() {
        let tol = Tolerance::default();
        let mut cell = unit_cube_cell();
        let big = Aabb::new(p(-10.0, -10.0, -10.0), p(10.0, 10.0, 10.0)).unwrap();
        cell.constrain_aabb(&big, tol);
        assert_relative_eq!(cell.mesh().unwrap().volume(), 1.0, epsilon = 1e-9);
        assert!(!cell.is_sliced());
    }

    #[test]
    fn constrain_by_disjoint_box_clears_the_cell() {
        let tol = Tolerance::default();
        let mut cell = unit_cube_cell();
        let far = Aabb::new(p(5.0, 5.0, 5.0), p(6.0, 6.0, 6.0)).unwrap();
        cell.constrain_aabb(&far, tol);
        assert!(cell.mesh().is_none());
        assert!(cell.boundary_flags().is_empty());
    }

    #[test]
    fn constrain_by_overlapping_box_intersects_volumes() {
        let tol = Tolerance::default();
        let mut cell = unit_cube_cell();
        let half = Aabb::new(p(0.5, -1.0, -1.0), p(4.0, 4.0, 4.0)).unwrap();
        cell.constrain_aabb(&half, tol);
        assert_relative_eq!(cell.mesh().unwrap().volume(), 0.5, epsilon = 1e-9);
    }

    #[test]
    fn constrain_by_convex_mesh_boundary() {
        let tol = Tolerance::default();
        let mut cell = unit_cube_cell();
        let boundary = ConvexMesh::from_aabb(
            &Aabb::new(p(0.25, 0.25, -1.0), p(0.75, 0.75, 2.0)).unwrap(),
        );
        cell.constrain_mesh(&boundary, 0.0, tol);
        let mesh = cell.mesh().unwrap();
        assert_relative_eq!(mesh.volume(), 0.25, epsilon = 1e-9);
    }

    #[test]
    fn successive_slices_only_remove_volume() {
        let tol = Tolerance::default();
        let mut cell = unit_cube_cell();
        let planes = [
            Plane::from_origin_normal(p(0.4, 0.0, 0.0), Vector3::x()).unwrap(),
            Plane::from_origin_normal(p(0.0, 0.6, 0.0), -Vector3::y()).unwrap(),
            Plane::from_origin_normal(p(0.0, 0.0, 0.5), Vector3::new(0.2, 0.1, 1.0)).unwrap(),
        ];
        let mut last = cell.mesh().unwrap().volume();
        for plane in &planes {
            cell.slice(plane, tol);
            let Some(mesh) = cell.mesh() else { break };
            let vol = mesh.volume();
            assert!(vol <= last + 1e-9);
            last = vol;
        }
    }
}
