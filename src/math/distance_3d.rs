use crate::geometry::{Aabb, Line, Plane, Polygon, Ray, Segment, Tetrahedron, Triangle};

use super::{closest_3d, Point3, Tolerance};

// Squared distances. Every closest-point query has a squared-distance twin;
// the point/plane and point/aabb forms avoid constructing the closest point.

/// Squared distance between two points.
#[must_use]
pub fn sq_distance_point_point(p: &Point3, q: &Point3) -> f64 {
    (q - p).norm_squared()
}

/// Squared distance from a point to a segment.
#[must_use]
pub fn sq_distance_point_segment(p: &Point3, segment: &Segment, tol: Tolerance) -> f64 {
    (closest_3d::point_segment(p, segment, tol) - p).norm_squared()
}

/// Squared distance from a point to an infinite line.
#[must_use]
pub fn sq_distance_point_line(p: &Point3, line: &Line) -> f64 {
    (closest_3d::point_line(p, line) - p).norm_squared()
}

/// Squared distance from a point to a ray.
#[must_use]
pub fn sq_distance_point_ray(p: &Point3, ray: &Ray) -> f64 {
    (closest_3d::point_ray(p, ray) - p).norm_squared()
}

/// Squared distance from a point to a plane.
#[must_use]
pub fn sq_distance_point_plane(p: &Point3, plane: &Plane) -> f64 {
    let d = plane.signed_distance(p);
    d * d
}

/// Squared distance from a point to a box, accumulating the per-axis
/// overshoot; zero for a point inside.
#[must_use]
pub fn sq_distance_point_aabb(p: &Point3, aabb: &Aabb) -> f64 {
    let mut sq = 0.0;
    for axis in 0..3 {
        let v = p[axis];
        if v < aabb.min()[axis] {
            let d = aabb.min()[axis] - v;
            sq += d * d;
        }
        if v > aabb.max()[axis] {
            let d = v - aabb.max()[axis];
            sq += d * d;
        }
    }
    sq
}

/// Squared distance from a point to a triangle.
#[must_use]
pub fn sq_distance_point_triangle(p: &Point3, triangle: &Triangle) -> f64 {
    (closest_3d::point_triangle(p, triangle) - p).norm_squared()
}

/// Squared distance from a point to a tetrahedron; zero for a point inside.
#[must_use]
pub fn sq_distance_point_tetrahedron(p: &Point3, tet: &Tetrahedron) -> f64 {
    (closest_3d::point_tetrahedron(p, tet) - p).norm_squared()
}

/// Squared distance from a point to a planar polygon.
#[must_use]
pub fn sq_distance_point_polygon(p: &Point3, poly: &Polygon, tol: Tolerance) -> f64 {
    (closest_3d::point_polygon(p, poly, tol) - p).norm_squared()
}

/// Squared distance between two segments.
#[must_use]
pub fn sq_distance_segment_segment(s1: &Segment, s2: &Segment, tol: Tolerance) -> f64 {
    closest_3d::segment_segment(s1, s2, tol).sq_dist
}

/// Squared distance between two infinite lines.
#[must_use]
pub fn sq_distance_line_line(l1: &Line, l2: &Line, tol: Tolerance) -> f64 {
    closest_3d::line_line(l1, l2, tol).sq_dist
}

// Plain distances.

/// Distance between two points.
#[must_use]
pub fn distance_point_point(p: &Point3, q: &Point3) -> f64 {
    sq_distance_point_point(p, q).sqrt()
}

/// Distance from a point to a segment.
#[must_use]
pub fn distance_point_segment(p: &Point3, segment: &Segment, tol: Tolerance) -> f64 {
    sq_distance_point_segment(p, segment, tol).sqrt()
}

/// Distance from a point to an infinite line.
#[must_use]
pub fn distance_point_line(p: &Point3, line: &Line) -> f64 {
    sq_distance_point_line(p, line).sqrt()
}

/// Distance from a point to a ray.
#[must_use]
pub fn distance_point_ray(p: &Point3, ray: &Ray) -> f64 {
    sq_distance_point_ray(p, ray).sqrt()
}

/// Unsigned distance from a point to a plane.
#[must_use]
pub fn distance_point_plane(p: &Point3, plane: &Plane) -> f64 {
    plane.signed_distance(p).abs()
}

/// Distance from a point to a box; zero for a point inside.
#[must_use]
pub fn distance_point_aabb(p: &Point3, aabb: &Aabb) -> f64 {
    sq_distance_point_aabb(p, aabb).sqrt()
}

/// Distance from a point to a triangle.
#[must_use]
pub fn distance_point_triangle(p: &Point3, triangle: &Triangle) -> f64 {
    sq_distance_point_triangle(p, triangle).sqrt()
}

/// Distance from a point to a planar polygon.
#[must_use]
pub fn distance_point_polygon(p: &Point3, poly: &Polygon, tol: Tolerance) -> f64 {
    sq_distance_point_polygon(p, poly, tol).sqrt()
}

/// Distance between two segments.
#[must_use]
pub fn distance_segment_segment(s1: &Segment, s2: &Segment, tol: Tolerance) -> f64 {
    sq_distance_segment_segment(s1, s2, tol).sqrt()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Vector3;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn coincident_points_have_zero_distance() {
        let tol = Tolerance::default();
        let a = Point3::origin();
        let b = Point3::origin();
        assert_eq!(sq_distance_point_point(&a, &b), 0.0);
        assert!(tol.is_zero(distance_point_point(&a, &b)));
    }

    #[test]
    fn distance_is_symmetric() {
        let a = p(1.0, 2.0, 3.0);
        let b = p(-4.0, 0.5, 2.0);
        assert!((distance_point_point(&a, &b) - distance_point_point(&b, &a)).abs() < 1e-12);
    }

    #[test]
    fn sq_distance_matches_closest_point() {
        let tol = Tolerance::default();
        let s = Segment::new(Point3::origin(), p(2.0, 0.0, 0.0));
        let q = p(1.0, 5.0, 0.0);
        let closest = closest_3d::point_segment(&q, &s, tol);
        let direct = sq_distance_point_segment(&q, &s, tol);
        assert!((direct - (closest - q).norm_squared()).abs() < 1e-12);
        assert!((direct - 25.0).abs() < 1e-9);
    }

    #[test]
    fn aabb_distance_shortcut_agrees_with_clamp() {
        let aabb = Aabb::new(Point3::origin(), p(1.0, 1.0, 1.0)).unwrap();
        for q in [
            p(2.0, 0.5, 0.5),
            p(-1.0, -1.0, -1.0),
            p(0.5, 0.5, 0.5),
            p(2.0, 2.0, 2.0),
        ] {
            let clamp_sq = (closest_3d::point_aabb(&q, &aabb) - q).norm_squared();
            assert!((sq_distance_point_aabb(&q, &aabb) - clamp_sq).abs() < 1e-12);
        }
    }

    #[test]
    fn plane_distance_shortcut() {
        let plane = Plane::from_origin_normal(p(0.0, 0.0, 1.0), Vector3::z()).unwrap();
        assert!((sq_distance_point_plane(&p(4.0, 5.0, 3.0), &plane) - 4.0).abs() < 1e-12);
        assert!((distance_point_plane(&p(4.0, 5.0, -1.0), &plane) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn segment_distance_is_symmetric() {
        let tol = Tolerance::default();
        let s1 = Segment::new(p(-1.0, 0.3, 0.0), p(1.0, 0.0, 0.2));
        let s2 = Segment::new(p(0.0, -1.0, 1.0), p(0.4, 1.0, 0.9));
        let d12 = distance_segment_segment(&s1, &s2, tol);
        let d21 = distance_segment_segment(&s2, &s1, tol);
        assert!((d12 - d21).abs() < 1e-9);
    }
}
