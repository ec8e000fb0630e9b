use crate::geometry::{Aabb, Line, Plane, Polygon, Ray, Segment, Tetrahedron, Triangle};

use super::{ClosestApproach, Point3, Tolerance};

// POINT-PLANE

/// Closest point on a plane to `p` (the orthogonal projection).
///
/// This is the single canonical argument order for the point/plane query;
/// there is deliberately no swapped overload.
#[must_use]
pub fn point_plane(p: &Point3, plane: &Plane) -> Point3 {
    let t = plane.signed_distance(p);
    p - plane.normal() * t
}

// POINT-SEGMENT

/// Closest point on a segment to `p`. The segment parameter is clamped to
/// `[0, 1]`, so the result always lies on the segment; a degenerate segment
/// yields its origin.
#[must_use]
pub fn point_segment(p: &Point3, segment: &Segment, tol: Tolerance) -> Point3 {
    segment.point_at(segment_parameter(p, segment, tol))
}

/// Closest point on the segment from `a` to `b`.
#[must_use]
pub fn point_segment_points(p: &Point3, a: &Point3, b: &Point3, tol: Tolerance) -> Point3 {
    point_segment(p, &Segment::new(*a, *b), tol)
}

/// Parameter of the closest point on a segment, clamped to `[0, 1]` with
/// epsilon snapping at the endpoints. A degenerate segment yields `0`.
#[must_use]
pub fn segment_parameter(p: &Point3, segment: &Segment, tol: Tolerance) -> f64 {
    let ab = segment.delta();
    let denom = ab.norm_squared();
    if tol.is_zero(denom) {
        return 0.0;
    }
    let t = (p - segment.origin()).dot(&ab);
    if t <= tol.epsilon() {
        0.0
    } else if t >= denom - tol.epsilon() {
        1.0
    } else {
        t / denom
    }
}

// POINT-LINE

/// Closest point on an infinite line to `p`.
#[must_use]
pub fn point_line(p: &Point3, line: &Line) -> Point3 {
    let t = (p - line.origin()).dot(line.direction());
    line.point_at(t)
}

/// Closest point on the infinite line through `a` and `b`. Coincident points
/// yield `a`.
#[must_use]
pub fn point_line_points(p: &Point3, a: &Point3, b: &Point3, tol: Tolerance) -> Point3 {
    let ab = b - a;
    let denom = ab.norm_squared();
    if tol.is_zero(denom) {
        return *a;
    }
    let t = (p - a).dot(&ab) / denom;
    a + ab * t
}

// POINT-RAY

/// Closest point on a ray to `p`. The ray parameter is clamped to
/// `[0, infinity)`.
#[must_use]
pub fn point_ray(p: &Point3, ray: &Ray) -> Point3 {
    let t = (p - ray.origin()).dot(ray.direction());
    if t <= 0.0 {
        *ray.origin()
    } else {
        ray.point_at(t)
    }
}

// POINT-AABB

/// Closest point on (or in) a box to `p`: the per-axis clamp of `p` onto the
/// box.
#[must_use]
pub fn point_aabb(p: &Point3, aabb: &Aabb) -> Point3 {
    let mut result = *p;
    for axis in 0..3 {
        result[axis] = result[axis].clamp(aabb.min()[axis], aabb.max()[axis]);
    }
    result
}

// POINT-TRIANGLE

/// Closest point on a triangle to `p`, via the barycentric region walk:
/// check the vertex regions, then the edge regions, and finally project into
/// the face interior.
#[must_use]
pub fn point_triangle(p: &Point3, triangle: &Triangle) -> Point3 {
    point_triangle_points(p, triangle.a(), triangle.b(), triangle.c())
}

/// Closest point on the triangle `(a, b, c)` to `p`.
#[must_use]
pub fn point_triangle_points(p: &Point3, a: &Point3, b: &Point3, c: &Point3) -> Point3 {
    let ab = b - a;
    let ac = c - a;
    let ap = p - a;
    let d1 = ab.dot(&ap);
    let d2 = ac.dot(&ap);
    if d1 <= 0.0 && d2 <= 0.0 {
        return *a;
    }

    let bp = p - b;
    let d3 = ab.dot(&bp);
    let d4 = ac.dot(&bp);
    if d3 >= 0.0 && d4 <= d3 {
        return *b;
    }

    let vc = d1 * d4 - d3 * d2;
    if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
        let v = d1 / (d1 - d3);
        return a + ab * v;
    }

    let cp = p - c;
    let d5 = ab.dot(&cp);
    let d6 = ac.dot(&cp);
    if d6 >= 0.0 && d5 <= d6 {
        return *c;
    }

    let vb = d5 * d2 - d1 * d6;
    if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
        let w = d2 / (d2 - d6);
        return a + ac * w;
    }

    let va = d3 * d6 - d5 * d4;
    if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
        let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
        return b + (c - b) * w;
    }

    let denom = 1.0 / (va + vb + vc);
    let v = vb * denom;
    let w = vc * denom;
    a + ab * v + ac * w
}

// POINT-TETRAHEDRON

/// Closest point on (or in) a tetrahedron to `p`: the point itself when it
/// lies inside, otherwise the nearest of the face projections for the faces
/// whose far side contains `p`.
#[must_use]
pub fn point_tetrahedron(p: &Point3, tet: &Tetrahedron) -> Point3 {
    let mut closest = *p;
    let mut best_sq = f64::INFINITY;
    let faces = [
        (tet.a(), tet.b(), tet.c(), tet.d()),
        (tet.a(), tet.c(), tet.d(), tet.b()),
        (tet.a(), tet.d(), tet.b(), tet.c()),
        (tet.b(), tet.d(), tet.c(), tet.a()),
    ];
    for (a, b, c, opposite) in faces {
        if point_other_side_of_plane(p, opposite, a, b, c) {
            let q = point_triangle_points(p, a, b, c);
            let sq = (q - p).norm_squared();
            if sq < best_sq {
                best_sq = sq;
                closest = q;
            }
        }
    }
    closest
}

/// Whether `p` and `q` lie on opposite sides of the plane through `a`, `b`,
/// `c` (a point on the plane counts as both sides).
#[must_use]
pub fn point_other_side_of_plane(
    p: &Point3,
    q: &Point3,
    a: &Point3,
    b: &Point3,
    c: &Point3,
) -> bool {
    let n = (b - a).cross(&(c - a));
    let sign_p = (p - a).dot(&n);
    let sign_q = (q - a).dot(&n);
    sign_p * sign_q <= 0.0
}

// POINT-POLYGON

/// Closest point on a planar polygon to `p`: the plane projection when it
/// falls inside the polygon, otherwise the nearest point on the periphery.
#[must_use]
pub fn point_polygon(p: &Point3, poly: &Polygon, tol: Tolerance) -> Point3 {
    let projected = point_plane(p, poly.plane());
    if poly.contains_projected(&projected, tol) {
        return projected;
    }
    point_polygon_periphery(p, poly, tol)
}

/// Closest point on the boundary loop of a polygon to `p`.
#[must_use]
pub fn point_polygon_periphery(p: &Point3, poly: &Polygon, tol: Tolerance) -> Point3 {
    let mut best_sq = f64::INFINITY;
    let mut closest = poly.points()[0];
    for edge in poly.edges() {
        let q = point_segment(p, &edge, tol);
        let sq = (q - p).norm_squared();
        if sq < best_sq {
            best_sq = sq;
            closest = q;
        }
    }
    closest
}

// SEGMENT-SEGMENT

/// Closest approach of two segments.
///
/// Degenerate segments reduce to point queries; parallel overlapping
/// segments bridge perpendicularly from the middle of the shared projection;
/// disjoint parallel projections fall through to the clamped endpoint logic,
/// which also handles all non-parallel configurations.
#[must_use]
#[allow(clippy::many_single_char_names, clippy::similar_names)]
pub fn segment_segment(s1: &Segment, s2: &Segment, tol: Tolerance) -> ClosestApproach {
    let d1 = s1.delta();
    let d2 = s2.delta();
    let r = s1.origin() - s2.origin();
    let a = d1.norm_squared();
    let e = d2.norm_squared();

    if tol.is_zero(a) && tol.is_zero(e) {
        // Both segments degenerate to points.
        return approach(s1, s2, 0.0, 0.0, tol);
    }
    if tol.is_zero(a) {
        // First segment degenerates to a point.
        let t2 = segment_parameter(s1.origin(), s2, tol);
        return approach(s1, s2, 0.0, t2, tol);
    }
    if tol.is_zero(e) {
        // Second segment degenerates to a point.
        let t1 = segment_parameter(s2.origin(), s1, tol);
        return approach(s1, s2, t1, 0.0, tol);
    }

    let f = d2.dot(&r);
    let c = d1.dot(&r);
    let b = d1.dot(&d2);
    let denom = a * e - b * b;

    let mut t1;
    let mut t2 = 0.0;
    if tol.is_zero(denom) {
        // Parallel segments: intersect the projections onto a shared line.
        let dir = s1.direction();
        let origin = *s1.origin();
        let mut s_start = 0.0;
        let mut s_end = (s1.end() - origin).dot(&dir);
        let mut o_start = (s2.origin() - origin).dot(&dir);
        let mut o_end = (s2.end() - origin).dot(&dir);
        if o_end < o_start {
            std::mem::swap(&mut o_start, &mut o_end);
        }
        if o_start < s_start {
            std::mem::swap(&mut s_start, &mut o_start);
            std::mem::swap(&mut s_end, &mut o_end);
        }
        if o_start < s_end {
            // Overlapping projections: bridge from the middle of the shared
            // stretch.
            let mid = origin + dir * 0.5 * (o_start + s_end.min(o_end));
            let t1 = segment_parameter(&mid, s1, tol);
            let p1 = s1.point_at(t1);
            let t2 = segment_parameter(&p1, s2, tol);
            return approach(s1, s2, t1, t2, tol);
        }
        // Disjoint projections: the clamped endpoint logic below applies.
        t1 = 0.0;
    } else {
        t1 = ((b * f - c * e) / denom).clamp(0.0, 1.0);
    }

    let tnom = b * t1 + f;
    if tnom < 0.0 {
        t1 = (-c / a).clamp(0.0, 1.0);
    } else if tnom > e {
        t2 = 1.0;
        t1 = ((b - c) / a).clamp(0.0, 1.0);
    } else {
        t2 = tnom / e;
    }
    approach(s1, s2, t1, t2, tol)
}

fn approach(s1: &Segment, s2: &Segment, t1: f64, t2: f64, tol: Tolerance) -> ClosestApproach {
    let p1 = s1.point_at(t1);
    let p2 = s2.point_at(t2);
    let sq_dist = (p2 - p1).norm_squared();
    ClosestApproach {
        p1,
        p2,
        t1,
        t2,
        sq_dist,
        touching: tol.is_zero_sq(sq_dist),
    }
}

// LINE-LINE

/// Closest approach of two infinite lines. Parallel lines bridge from the
/// first line's origin.
#[must_use]
pub fn line_line(l1: &Line, l2: &Line, tol: Tolerance) -> ClosestApproach {
    let d1 = l1.direction();
    let d2 = l2.direction();
    let r = l1.origin() - l2.origin();
    let b = d1.dot(d2);
    let c = d1.dot(&r);
    let f = d2.dot(&r);
    // Directions are unit length, so a = e = 1.
    let denom = 1.0 - b * b;
    let (t1, t2) = if tol.is_zero(denom) {
        (0.0, r.dot(d2))
    } else {
        ((b * f - c) / denom, (f - b * c) / denom)
    };
    let p1 = l1.point_at(t1);
    let p2 = l2.point_at(t2);
    let sq_dist = (p2 - p1).norm_squared();
    ClosestApproach {
        p1,
        p2,
        t1,
        t2,
        sq_dist,
        touching: tol.is_zero_sq(sq_dist),
    }
}
