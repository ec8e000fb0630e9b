use crate::geometry::{Aabb, Plane};
use crate::math::{Point3, Tolerance};
use crate::mesh::ConvexMesh;

use super::VoronoiCell;

/// One tetrahedron of a 3D Delaunay complex, as produced by an external
/// triangulation engine: four indices into the generator point set plus the
/// circumcenter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DelaunayTetrahedron {
    /// Indices of the four corners in the generator point set.
    pub vertices: [usize; 4],
    /// Circumcenter of the tetrahedron (a Voronoi vertex).
    pub circumcenter: Point3,
}

impl DelaunayTetrahedron {
    /// Creates a tetrahedron record.
    #[must_use]
    pub fn new(vertices: [usize; 4], circumcenter: Point3) -> Self {
        Self {
            vertices,
            circumcenter,
        }
    }

    /// Whether the tetrahedron is incident to the given generator.
    #[must_use]
    pub fn contains_vertex(&self, index: usize) -> bool {
        self.vertices.contains(&index)
    }
}

/// The external 3D Delaunay collaborator: anything that can turn a point set
/// into a tetrahedral complex with circumcenters.
///
/// Engines commonly pad the input with distant auxiliary points so that
/// generators on the hull get far-away circumcenters (their cells are then
/// bounded by the clipping stage instead of being lost). Tetrahedra may
/// therefore reference vertex indices at or beyond `points.len()`; consumers
/// ignore those indices.
pub trait DelaunayEngine {
    /// Tetrahedralizes the point set.
    fn tetrahedralize(&self, points: &[Point3]) -> Vec<DelaunayTetrahedron>;
}

/// Circumcenters of every tetrahedron incident to `generator` (the
/// generator's vertex hull); the corner point set of its unbounded Voronoi
/// cell.
#[must_use]
pub fn vertex_hull(tetrahedra: &[DelaunayTetrahedron], generator: usize) -> Vec<Point3> {
    tetrahedra
        .iter()
        .filter(|tet| tet.contains_vertex(generator))
        .map(|tet| tet.circumcenter)
        .collect()
}

/// Builds the bounded Voronoi cells of a point set.
///
/// Up to four generators take the brute-force bisector path; larger sets
/// take the Delaunay-dual path through `engine`. Generators whose cell is
/// fully clipped away by the bounding box produce no cell in the result.
#[must_use]
pub fn voronoi_cells<E: DelaunayEngine>(
    points: &[Point3],
    aabb: &Aabb,
    engine: &E,
    tol: Tolerance,
) -> Vec<VoronoiCell> {
    if points.len() <= 4 {
        return voronoi_cells_brute_force(points, aabb, tol);
    }
    let tetrahedra = engine.tetrahedralize(points);
    let mut result = Vec::new();
    for (index, generator) in points.iter().enumerate() {
        let hull_points = vertex_hull(&tetrahedra, index);
        let mut cell = VoronoiCell::from_points(&hull_points, *generator, index, tol);
        if cell.mesh().is_some() {
            cell.constrain_aabb(aabb, tol);
        }
        if cell.mesh().is_some() {
            result.push(cell);
        }
    }
    result
}

/// Builds the bounded Voronoi cells by brute force: each generator starts
/// from a mesh of the bounding box and is constrained by the perpendicular
/// bisector plane against every other generator, with geometrically equal
/// bisectors deduplicated.
#[must_use]
pub fn voronoi_cells_brute_force(
    points: &[Point3],
    aabb: &Aabb,
    tol: Tolerance,
) -> Vec<VoronoiCell> {
    let mut result = Vec::new();
    for (index, generator) in points.iter().enumerate() {
        let mut cut_planes: Vec<Plane> = Vec::with_capacity(points.len().saturating_sub(1));
        for (other_index, other) in points.iter().enumerate() {
            if other_index == index {
                continue;
            }
            let Some(plane) = bisector_plane(generator, other, tol) else {
                continue;
            };
            if !cut_planes.iter().any(|existing| existing.is_equal(&plane, tol)) {
                cut_planes.push(plane);
            }
        }
        let mut cell =
            VoronoiCell::from_mesh(ConvexMesh::from_aabb(aabb), *generator, index);
        cell.constrain_planes(&cut_planes, tol);
        if cell.mesh().is_some() {
            result.push(cell);
        }
    }
    result
}

/// The perpendicular bisector plane between two points, oriented so that
/// `a`'s side is the front. `None` for coincident points.
#[must_use]
pub fn bisector_plane(a: &Point3, b: &Point3, tol: Tolerance) -> Option<Plane> {
    let normal = a - b;
    if tol.is_zero_sq(normal.norm_squared()) {
        return None;
    }
    let midpoint = Point3::from((a.coords + b.coords) * 0.5);
    Plane::from_origin_normal(midpoint, normal).ok()
}

/// Per-generator neighbor index lists: generators whose cells share a face.
/// Closed forms for up to four generators, the shared-tetrahedron relation
/// otherwise.
#[must_use]
pub fn voronoi_neighbors<E: DelaunayEngine>(points: &[Point3], engine: &E) -> Vec<Vec<usize>> {
    let n = points.len();
    match n {
        0 => return Vec::new(),
        1 => return vec![Vec::new()],
        2 => return vec![vec![1], vec![0]],
        3 => return vec![vec![1, 2], vec![0, 2], vec![0, 1]],
        4 => {
            return vec![
                vec![1, 2, 3],
                vec![0, 2, 3],
                vec![0, 1, 3],
                vec![0, 1, 2],
            ]
        }
        _ => {}
    }
    let tetrahedra = engine.tetrahedralize(points);
    let mut neighbors: Vec<Vec<usize>> = vec![Vec::new(); n];
    for tet in &tetrahedra {
        for &a in &tet.vertices {
            for &b in &tet.vertices {
                // Auxiliary far-point indices from the engine are skipped.
                if a != b && a < n && b < n {
                    neighbors[a].push(b);
                }
            }
        }
    }
    for list in &mut neighbors {
        list.sort_unstable();
        list.dedup();
    }
    neighbors
}
