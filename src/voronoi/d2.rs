use std::collections::HashMap;

use spade::{DelaunayTriangulation, InsertionError, Point2 as SpadePoint2, Triangulation};

use crate::error::{Result, TriangulationError};
use crate::math::{intersect_2d, Point2, Tolerance, Vector2};

/// A bounded planar Voronoi cell.
#[derive(Debug, Clone, PartialEq)]
pub struct VoronoiCell2D {
    generator: Point2,
    index: usize,
    polygon: Vec<Point2>,
}

impl VoronoiCell2D {
    /// The generator point that owns this cell.
    #[must_use]
    pub fn generator(&self) -> &Point2 {
        &self.generator
    }

    /// Index of the generator in the original point set.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The cell polygon, counterclockwise.
    #[must_use]
    pub fn polygon(&self) -> &[Point2] {
        &self.polygon
    }

    /// Area of the cell polygon.
    #[must_use]
    pub fn area(&self) -> f64 {
        let n = self.polygon.len();
        let mut twice_area = 0.0;
        for i in 0..n {
            let a = &self.polygon[i];
            let b = &self.polygon[(i + 1) % n];
            twice_area += a.x * b.y - b.x * a.y;
        }
        (twice_area * 0.5).abs()
    }
}

/// Builds the planar Voronoi cells of a point set, clipped to a convex
/// boundary polygon.
///
/// The 2D Delaunay triangulation is delegated to spade; each generator's
/// cell is then carved from the boundary polygon by the bisector half-plane
/// against every Delaunay neighbor. Generators whose cell is clipped away
/// produce no cell in the result.
///
/// # Errors
///
/// Returns an error when a point cannot be inserted into the triangulation
/// (non-finite coordinates).
pub fn voronoi_2d(
    points: &[Point2],
    boundary: &[Point2],
    tol: Tolerance,
) -> Result<Vec<VoronoiCell2D>> {
    if points.is_empty() || boundary.len() < 3 {
        return Ok(Vec::new());
    }
    if points.len() == 1 {
        return Ok(vec![VoronoiCell2D {
            generator: points[0],
            index: 0,
            polygon: boundary.to_vec(),
        }]);
    }

    let neighbors = delaunay_neighbors(points)?;

    let mut result = Vec::with_capacity(points.len());
    for (index, generator) in points.iter().enumerate() {
        let mut polygon: Vec<Point2> = boundary.to_vec();
        for &other_index in &neighbors[index] {
            if polygon.len() < 3 {
                break;
            }
            let other = &points[other_index];
            let normal = generator - other;
            if tol.is_zero_sq(normal.norm_squared()) {
                continue;
            }
            let midpoint = Point2::from((generator.coords + other.coords) * 0.5);
            // Front of the clip line is the generator's side.
            let direction = Vector2::new(normal.y, -normal.x);
            polygon = intersect_2d::clip_polygon_2d(&polygon, &midpoint, &direction, tol);
        }
        if polygon.len() >= 3 {
            result.push(VoronoiCell2D {
                generator: *generator,
                index,
                polygon,
            });
        }
    }
    Ok(result)
}

/// Per-generator neighbor lists from the spade Delaunay triangulation.
fn delaunay_neighbors(points: &[Point2]) -> Result<Vec<Vec<usize>>> {
    let mut triangulation: DelaunayTriangulation<SpadePoint2<f64>> = DelaunayTriangulation::new();
    let mut handle_to_input: HashMap<usize, usize> = HashMap::new();
    for (index, p) in points.iter().enumerate() {
        let handle = triangulation
            .insert(SpadePoint2::new(p.x, p.y))
            .map_err(|e: InsertionError| TriangulationError::Insertion(e.to_string()))?;
        // Duplicate points resolve to the same handle; the first input wins.
        handle_to_input.entry(handle.index()).or_insert(index);
    }

    let mut neighbors: Vec<Vec<usize>> = vec![Vec::new(); points.len()];
    for edge in triangulation.undirected_edges() {
        let [a, b] = edge.vertices();
        let (Some(&ia), Some(&ib)) = (
            handle_to_input.get(&a.fix().index()),
            handle_to_input.get(&b.fix().index()),
        ) else {
            continue;
        };
        neighbors[ia].push(ib);
        neighbors[ib].push(ia);
    }
    // Duplicates of a generator still need its bisectors.
    for (index, p) in points.iter().enumerate() {
        for (other_index, q) in points.iter().enumerate() {
            if index != other_index && (p - q).norm_squared() == 0.0 {
                neighbors[index].push(other_index);
            }
        }
    }
    for list in &mut neighbors {
        list.sort_unstable();
        list.dedup();
    }
    Ok(neighbors)
}
