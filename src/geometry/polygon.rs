use crate::error::{GeometryError, Result};
use crate::math::{Point3, Tolerance, Vector3};

use super::{Plane, Segment};

/// A planar simple polygon in 3D space (no holes).
///
/// The supporting plane is computed at construction with Newell's method, so
/// the vertex loop may be slightly non-planar without failing; the plane is
/// the least-squares fit through the loop's area vector.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    points: Vec<Point3>,
    plane: Plane,
}

impl Polygon {
    /// Creates a polygon from an ordered vertex loop.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than three points are given or the loop has
    /// (near-)zero area.
    pub fn new(points: Vec<Point3>) -> Result<Self> {
        if points.len() < 3 {
            return Err(GeometryError::Degenerate(
                "polygon needs at least three points".into(),
            )
            .into());
        }
        // Newell's method: the area vector of the loop.
        let mut normal = Vector3::zeros();
        for (i, p) in points.iter().enumerate() {
            let q = &points[(i + 1) % points.len()];
            normal.x += (p.y - q.y) * (p.z + q.z);
            normal.y += (p.z - q.z) * (p.x + q.x);
            normal.z += (p.x - q.x) * (p.y + q.y);
        }
        if Tolerance::default().is_zero_sq(normal.norm_squared()) {
            return Err(GeometryError::Degenerate("polygon has zero area".into()).into());
        }
        let plane = Plane::from_origin_normal(points[0], normal)?;
        Ok(Self { points, plane })
    }

    /// The vertex loop.
    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Number of vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the polygon has no vertices. Always false for a constructed
    /// polygon; present for slice-like API completeness.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The supporting plane.
    #[must_use]
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// The boundary edges, each from vertex `i` to vertex `i + 1` (wrapping).
    #[must_use]
    pub fn edges(&self) -> Vec<Segment> {
        let n = self.points.len();
        (0..n)
            .map(|i| Segment::new(self.points[i], self.points[(i + 1) % n]))
            .collect()
    }

    /// Area of the polygon.
    #[must_use]
    pub fn area(&self) -> f64 {
        let o = &self.points[0];
        let mut cross_sum = Vector3::zeros();
        for i in 1..self.points.len() {
            let a = self.points[i] - o;
            let b = self.points[(i + 1) % self.points.len()] - o;
            cross_sum += a.cross(&b);
        }
        0.5 * cross_sum.dot(self.plane.normal()).abs()
    }

    /// Point-in-polygon test for a point coplanar with the polygon, using
    /// the winding number in the plane's projection. Points on the boundary
    /// count as inside.
    #[must_use]
    pub fn contains_projected(&self, p: &Point3, tol: Tolerance) -> bool {
        let (u_dir, v_dir) = self.plane_basis();
        let project = |q: &Point3| {
            let d = q - self.plane.origin();
            (d.dot(&u_dir), d.dot(&v_dir))
        };
        let (px, py) = project(p);
        let uvs: Vec<(f64, f64)> = self.points.iter().map(|q| project(q)).collect();

        let n = uvs.len();
        for i in 0..n {
            let (x0, y0) = uvs[i];
            let (x1, y1) = uvs[(i + 1) % n];
            if on_segment_2d(px, py, x0, y0, x1, y1, tol) {
                return true;
            }
        }
        winding_number_2d(px, py, &uvs) != 0
    }

    /// An orthonormal basis of the supporting plane.
    fn plane_basis(&self) -> (Vector3, Vector3) {
        let n = self.plane.normal();
        let reference = if n.x.abs() < 0.9 {
            Vector3::x()
        } else {
            Vector3::y()
        };
        let u = n.cross(&reference).normalize();
        let v = n.cross(&u);
        (u, v)
    }
}

/// Winding number of point `(px, py)` with respect to polygon `verts`.
///
/// Non-zero => inside, zero => outside.
fn winding_number_2d(px: f64, py: f64, verts: &[(f64, f64)]) -> i32 {
    let n = verts.len();
    let mut winding = 0i32;
    for i in 0..n {
        let (x0, y0) = verts[i];
        let (x1, y1) = verts[(i + 1) % n];

        if y0 <= py {
            if y1 > py && cross_2d(x1 - x0, y1 - y0, px - x0, py - y0) > 0.0 {
                winding += 1;
            }
        } else if y1 <= py && cross_2d(x1 - x0, y1 - y0, px - x0, py - y0) < 0.0 {
            winding -= 1;
        }
    }
    winding
}

fn on_segment_2d(px: f64, py: f64, x0: f64, y0: f64, x1: f64, y1: f64, tol: Tolerance) -> bool {
    let dx = x1 - x0;
    let dy = y1 - y0;
    let len_sq = dx * dx + dy * dy;
    if tol.is_zero_sq(len_sq) {
        let ddx = px - x0;
        let ddy = py - y0;
        return tol.is_zero_sq(ddx * ddx + ddy * ddy);
    }
    let t = ((px - x0) * dx + (py - y0) * dy) / len_sq;
    let t = t.clamp(0.0, 1.0);
    let cx = x0 + t * dx;
    let cy = y0 + t * dy;
    let ddx = px - cx;
    let ddy = py - cy;
    tol.is_zero_sq(ddx * ddx + ddy * ddy)
}

/// 2D cross product: `(ax * by - ay * bx)`.
#[inline]
fn cross_2d(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    ax * by - ay * bx
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn unit_square() -> Polygon {
        Polygon::new(vec![
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(1.0, 1.0, 0.0),
            p(0.0, 1.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn square_area_and_plane() {
        let sq = unit_square();
        assert!((sq.area() - 1.0).abs() < 1e-12);
        assert!((sq.plane().normal().z.abs() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn containment() {
        let tol = Tolerance::default();
        let sq = unit_square();
        assert!(sq.contains_projected(&p(0.5, 0.5, 0.0), tol));
        assert!(sq.contains_projected(&p(0.0, 0.5, 0.0), tol));
        assert!(!sq.contains_projected(&p(1.5, 0.5, 0.0), tol));
    }

    #[test]
    fn too_few_points_are_rejected() {
        assert!(Polygon::new(vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0)]).is_err());
    }

    #[test]
    fn collinear_loop_is_rejected() {
        assert!(Polygon::new(vec![
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(2.0, 0.0, 0.0),
        ])
        .is_err());
    }
}
