use crate::geometry::{Aabb, Line, Plane, Polygon, Ray, Segment, Triangle};

use super::{closest_3d, Point3, Tolerance, Vector3};

/// Outcome of an exact (tolerance-qualified) intersection query.
///
/// A closed tagged union: absence of an intersection is a variant, never a
/// sentinel value, so no `NaN` or infinity can leak into downstream
/// arithmetic.
#[derive(Debug, Clone, PartialEq)]
pub enum Intersection {
    /// The primitives meet in a single point. `t1` and `t2` are the
    /// parameters at which the point occurs on the first and second
    /// primitive (equal when only one primitive is parametric).
    Point { point: Point3, t1: f64, t2: f64 },
    /// The primitives overlap along a segment.
    Segment(Segment),
    /// The primitives meet along an infinite line.
    Line(Line),
    /// The primitives overlap in a two-dimensional region (coplanar
    /// triangles); no lower-dimensional geometry is reported.
    Coplanar,
    /// No intersection within tolerance.
    None,
}

impl Intersection {
    /// Whether an intersection exists.
    #[must_use]
    pub fn intersects(&self) -> bool {
        !matches!(self, Intersection::None)
    }

    /// The intersection point, if the outcome is a single point.
    #[must_use]
    pub fn point(&self) -> Option<&Point3> {
        match self {
            Intersection::Point { point, .. } => Some(point),
            _ => None,
        }
    }

    /// The intersection segment, if the outcome is one-dimensional.
    #[must_use]
    pub fn segment(&self) -> Option<&Segment> {
        match self {
            Intersection::Segment(s) => Some(s),
            _ => None,
        }
    }

    /// The intersection line, if the outcome is an infinite line.
    #[must_use]
    pub fn line(&self) -> Option<&Line> {
        match self {
            Intersection::Line(l) => Some(l),
            _ => None,
        }
    }
}

// SEGMENT-PLANE

/// Intersects a segment with a plane.
///
/// The segment parameter is accepted in `[-eps, 1 + eps]` and snapped into
/// `[0, 1]`, so a segment ending exactly on the plane still reports the
/// touch point. A segment parallel to the plane (lying on it or not) yields
/// no intersection point.
#[must_use]
pub fn segment_plane(segment: &Segment, plane: &Plane, tol: Tolerance) -> Intersection {
    segment_plane_points(segment.origin(), segment.end(), plane, tol)
}

/// Intersects the segment from `a` to `b` with a plane.
#[must_use]
pub fn segment_plane_points(a: &Point3, b: &Point3, plane: &Plane, tol: Tolerance) -> Intersection {
    let ab = b - a;
    let denom = plane.normal().dot(&ab);
    if tol.is_zero(denom) {
        return Intersection::None;
    }
    let t = (plane.d() - plane.normal().dot(&a.coords)) / denom;
    if t >= -tol.epsilon() && t <= 1.0 + tol.epsilon() {
        let t = tol.clamp(t, 0.0, 1.0);
        Intersection::Point {
            point: a + ab * t,
            t1: t,
            t2: t,
        }
    } else {
        Intersection::None
    }
}

// RAY-PLANE

/// Intersects a ray with a plane. The ray parameter is accepted from `-eps`
/// and snapped to `0`.
#[must_use]
pub fn ray_plane(ray: &Ray, plane: &Plane, tol: Tolerance) -> Intersection {
    let denom = plane.normal().dot(ray.direction());
    if tol.is_zero(denom) {
        return Intersection::None;
    }
    let t = (plane.d() - plane.normal().dot(&ray.origin().coords)) / denom;
    if t >= -tol.epsilon() {
        let t = tol.clamp(t, 0.0, f64::INFINITY);
        Intersection::Point {
            point: ray.point_at(t),
            t1: t,
            t2: t,
        }
    } else {
        Intersection::None
    }
}

// LINE-PLANE

/// Intersects an infinite line with a plane.
#[must_use]
pub fn line_plane(line: &Line, plane: &Plane, tol: Tolerance) -> Intersection {
    let denom = plane.normal().dot(line.direction());
    if tol.is_zero(denom) {
        return Intersection::None;
    }
    let t = (plane.d() - plane.normal().dot(&line.origin().coords)) / denom;
    Intersection::Point {
        point: line.point_at(t),
        t1: t,
        t2: t,
    }
}

// PLANE-PLANE

/// Intersects two planes, yielding their common line unless they are
/// parallel or coincident.
#[must_use]
pub fn plane_plane(p1: &Plane, p2: &Plane, tol: Tolerance) -> Intersection {
    let n1 = p1.normal();
    let n2 = p2.normal();
    let dir = n1.cross(n2);
    if tol.is_zero_sq(dir.norm_squared()) {
        return Intersection::None;
    }
    let n1n2 = n1.dot(n2);
    let det = 1.0 - n1n2 * n1n2;
    let c1 = (p1.d() - p2.d() * n1n2) / det;
    let c2 = (p2.d() - p1.d() * n1n2) / det;
    let origin = Point3::from(n1 * c1 + n2 * c2);
    match Line::new(origin, dir) {
        Ok(line) => Intersection::Line(line),
        Err(_) => Intersection::None,
    }
}

// PLANE-PLANE-PLANE

/// Intersects three planes in a single point, unless any two are parallel or
/// the three meet in a common line.
#[must_use]
pub fn plane_plane_plane(p1: &Plane, p2: &Plane, p3: &Plane, tol: Tolerance) -> Intersection {
    let n1 = p1.normal();
    let n2 = p2.normal();
    let n3 = p3.normal();
    let denom = n1.dot(&n2.cross(n3));
    if tol.is_zero(denom) {
        return Intersection::None;
    }
    let point = Point3::from(
        (n2.cross(n3) * p1.d() + n3.cross(n1) * p2.d() + n1.cross(n2) * p3.d()) / denom,
    );
    Intersection::Point {
        point,
        t1: 0.0,
        t2: 0.0,
    }
}

// SEGMENT-SEGMENT

/// Intersects two segments.
///
/// Degenerate segments are routed to point-vs-segment or point-vs-point
/// queries. Parallel segments are projected onto a shared line and their 1D
/// intervals intersected: collinear overlap yields a point or a segment,
/// while an offset overlap yields no intersection (the bridging segment is
/// available from [`closest_3d::segment_segment`]).
#[must_use]
pub fn segment_segment(s1: &Segment, s2: &Segment, tol: Tolerance) -> Intersection {
    let d1 = s1.delta();
    let d2 = s2.delta();
    let r = s1.origin() - s2.origin();
    let a = d1.norm_squared();
    let e = d2.norm_squared();

    if tol.is_zero(a) && tol.is_zero(e) {
        // Both degenerate: point vs point.
        return if tol.is_zero_sq(r.norm_squared()) {
            Intersection::Point {
                point: *s1.origin(),
                t1: 0.0,
                t2: 0.0,
            }
        } else {
            Intersection::None
        };
    }
    if tol.is_zero(a) {
        // First degenerate: point vs segment.
        let closest = closest_3d::point_segment(s1.origin(), s2, tol);
        return if tol.is_zero_sq((closest - s1.origin()).norm_squared()) {
            Intersection::Point {
                point: *s1.origin(),
                t1: 0.0,
                t2: closest_3d::segment_parameter(s1.origin(), s2, tol),
            }
        } else {
            Intersection::None
        };
    }
    if tol.is_zero(e) {
        // Second degenerate: point vs segment.
        let closest = closest_3d::point_segment(s2.origin(), s1, tol);
        return if tol.is_zero_sq((closest - s2.origin()).norm_squared()) {
            Intersection::Point {
                point: *s2.origin(),
                t1: closest_3d::segment_parameter(s2.origin(), s1, tol),
                t2: 0.0,
            }
        } else {
            Intersection::None
        };
    }

    let f = d2.dot(&r);
    let c = d1.dot(&r);
    let b = d1.dot(&d2);
    let denom = a * e - b * b;

    let mut t1;
    let mut t2 = 0.0;
    if tol.is_zero(denom) {
        // Parallel segments: project both onto the first segment's line and
        // intersect the 1D intervals.
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
        // Here o_start is the larger of the two interval starts.
        if o_start < s_end {
            // Projections overlap.
            let start = origin + dir * o_start;
            let end = origin + dir * s_end.min(o_end);
            let r_along = r.dot(&dir);
            let offset_sq = (r - dir * r_along).norm_squared();
            if tol.is_zero_sq(offset_sq) {
                // Collinear overlap.
                return if tol.is_zero_sq((end - start).norm_squared()) {
                    Intersection::Point {
                        point: start,
                        t1: 0.0,
                        t2: 0.0,
                    }
                } else {
                    Intersection::Segment(Segment::new(start, end))
                };
            }
            // Parallel at an offset: no intersection.
            return Intersection::None;
        }
        // Disjoint projections; the clamped endpoint logic below applies.
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
    let p1 = s1.point_at(t1);
    let p2 = s2.point_at(t2);
    if tol.is_zero_sq((p2 - p1).norm_squared()) {
        Intersection::Point { point: p1, t1, t2 }
    } else {
        Intersection::None
    }
}

// LINE-LINE

/// Intersects two infinite lines: a point when they meet within tolerance,
/// nothing when skew or parallel.
#[must_use]
pub fn line_line(l1: &Line, l2: &Line, tol: Tolerance) -> Intersection {
    let approach = closest_3d::line_line(l1, l2, tol);
    if approach.touching {
        Intersection::Point {
            point: approach.p1,
            t1: approach.t1,
            t2: approach.t2,
        }
    } else {
        Intersection::None
    }
}

// RAY-AABB

/// Intersects a ray with an axis-aligned box via the slab method, returning
/// the entry point. A zero direction component rejects immediately when the
/// origin lies outside that axis slab.
#[must_use]
pub fn ray_aabb(ray: &Ray, aabb: &Aabb, tol: Tolerance) -> Intersection {
    let mut tmin: f64 = 0.0;
    let mut tmax = f64::INFINITY;
    for axis in 0..3 {
        let o = ray.origin()[axis];
        let d = ray.direction()[axis];
        if tol.is_zero(d) {
            if o < aabb.min()[axis] || o > aabb.max()[axis] {
                return Intersection::None;
            }
        } else {
            let ood = 1.0 / d;
            let mut t1 = (aabb.min()[axis] - o) * ood;
            let mut t2 = (aabb.max()[axis] - o) * ood;
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }
            tmin = tmin.max(t1);
            tmax = tmax.min(t2);
            if tmin > tmax {
                return Intersection::None;
            }
        }
    }
    Intersection::Point {
        point: ray.point_at(tmin),
        t1: tmin,
        t2: tmin,
    }
}

// TRIANGLE-TRIANGLE

/// Intersects two triangles with Möller's interval method.
///
/// Signed distances of each triangle's vertices against the other's
/// supporting plane are snapped to zero within epsilon; if all three on one
/// side share a sign the triangles cannot meet. Otherwise both triangles are
/// projected onto the dominant axis of the intersection line and their
/// parameter intervals intersected. Coplanar triangles fall back to a 2D
/// edge/containment test.
#[must_use]
pub fn triangle_triangle(t1: &Triangle, t2: &Triangle, tol: Tolerance) -> Intersection {
    triangle_triangle_points(
        t1.a(),
        t1.b(),
        t1.c(),
        t2.a(),
        t2.b(),
        t2.c(),
        tol,
    )
}

/// Intersects the triangles `(p1, p2, p3)` and `(q1, q2, q3)`.
#[must_use]
#[allow(clippy::similar_names, clippy::too_many_lines)]
pub fn triangle_triangle_points(
    p1: &Point3,
    p2: &Point3,
    p3: &Point3,
    q1: &Point3,
    q2: &Point3,
    q3: &Point3,
    tol: Tolerance,
) -> Intersection {
    let Ok(plane1) = Plane::from_points(*p1, *p2, *p3) else {
        return Intersection::None;
    };
    let n1 = *plane1.normal();

    let snap = |d: f64| if tol.is_zero(d) { 0.0 } else { d };
    let du0 = snap(plane1.signed_distance(q1));
    let du1 = snap(plane1.signed_distance(q2));
    let du2 = snap(plane1.signed_distance(q3));
    let du0du1 = du0 * du1;
    let du0du2 = du0 * du2;
    if du0du1 > 0.0 && du0du2 > 0.0 {
        // Same non-zero sign on all of them: no intersection.
        return Intersection::None;
    }

    let Ok(plane2) = Plane::from_points(*q1, *q2, *q3) else {
        return Intersection::None;
    };
    let dv0 = snap(plane2.signed_distance(p1));
    let dv1 = snap(plane2.signed_distance(p2));
    let dv2 = snap(plane2.signed_distance(p3));
    let dv0dv1 = dv0 * dv1;
    let dv0dv2 = dv0 * dv2;
    if dv0dv1 > 0.0 && dv0dv2 > 0.0 {
        return Intersection::None;
    }

    // Dominant axis of the intersection line direction.
    let ld = n1.cross(plane2.normal());
    let axis = dominant_axis(&ld);
    let vp = [p1[axis], p2[axis], p3[axis]];
    let up = [q1[axis], q2[axis], q3[axis]];

    let Some(mut isect_a) =
        compute_intervals(p1, p2, p3, vp[0], vp[1], vp[2], dv0, dv1, dv2, dv0dv1, dv0dv2)
    else {
        // Coplanar triangles: 2D overlap test on the dominant-normal plane.
        return if coplanar_triangles(&n1, p1, p2, p3, q1, q2, q3) {
            Intersection::Coplanar
        } else {
            Intersection::None
        };
    };
    if isect_a.s0 > isect_a.s1 {
        isect_a.swap();
    }

    let Some(mut isect_b) =
        compute_intervals(q1, q2, q3, up[0], up[1], up[2], du0, du1, du2, du0du1, du0du2)
    else {
        return if coplanar_triangles(&n1, p1, p2, p3, q1, q2, q3) {
            Intersection::Coplanar
        } else {
            Intersection::None
        };
    };
    if isect_b.s0 > isect_b.s1 {
        isect_b.swap();
    }

    if isect_a.s1 < isect_b.s0 || isect_b.s1 < isect_a.s0 {
        return Intersection::None;
    }

    // The triangles overlap along the intersection line: the shared part
    // runs from the larger interval start to the smaller interval end.
    let start = if isect_b.s0 < isect_a.s0 {
        isect_a.p0
    } else {
        isect_b.p0
    };
    let end = if isect_b.s1 < isect_a.s1 {
        isect_b.p1
    } else {
        isect_a.p1
    };

    if tol.is_zero_sq((end - start).norm_squared()) {
        Intersection::Point {
            point: start,
            t1: 0.0,
            t2: 0.0,
        }
    } else {
        Intersection::Segment(Segment::new(start, end))
    }
}

// RAY/LINE/SEGMENT-POLYGON

/// Intersects a ray with a planar polygon.
#[must_use]
pub fn ray_polygon(ray: &Ray, poly: &Polygon, tol: Tolerance) -> Intersection {
    match ray_plane(ray, poly.plane(), tol) {
        Intersection::Point { point, t1, t2 } if poly.contains_projected(&point, tol) => {
            Intersection::Point { point, t1, t2 }
        }
        _ => Intersection::None,
    }
}

/// Intersects an infinite line with a planar polygon.
#[must_use]
pub fn line_polygon(line: &Line, poly: &Polygon, tol: Tolerance) -> Intersection {
    match line_plane(line, poly.plane(), tol) {
        Intersection::Point { point, t1, t2 } if poly.contains_projected(&point, tol) => {
            Intersection::Point { point, t1, t2 }
        }
        _ => Intersection::None,
    }
}

/// Intersects a segment with a planar polygon.
#[must_use]
pub fn segment_polygon(segment: &Segment, poly: &Polygon, tol: Tolerance) -> Intersection {
    match segment_plane(segment, poly.plane(), tol) {
        Intersection::Point { point, t1, t2 } if poly.contains_projected(&point, tol) => {
            Intersection::Point { point, t1, t2 }
        }
        _ => Intersection::None,
    }
}

// POLYGON-PLANE

/// The segments in which a plane cuts a polygon: crossing edges contribute
/// their intersection points, on-plane vertices contribute themselves, and
/// consecutive crossings are paired into segments.
#[must_use]
pub fn polygon_plane(poly: &Polygon, plane: &Plane, tol: Tolerance) -> Vec<Segment> {
    use super::classify::{point_plane, Classification};

    let points = poly.points();
    let mut split_verts: Vec<Point3> = Vec::new();
    let mut a = points[points.len() - 1];
    let mut a_side = point_plane(&a, plane, tol);
    for &b in points {
        let b_side = point_plane(&b, plane, tol);
        if b_side == Classification::Front && a_side == Classification::Back {
            if let Intersection::Point { point, .. } = segment_plane_points(&b, &a, plane, tol) {
                split_verts.push(point);
            }
        } else if b_side == Classification::Back && a_side == Classification::Front {
            if let Intersection::Point { point, .. } = segment_plane_points(&a, &b, plane, tol) {
                split_verts.push(point);
            }
        }
        if a_side == Classification::On {
            split_verts.push(a);
        }
        a = b;
        a_side = b_side;
    }
    split_verts
        .chunks_exact(2)
        .map(|pair| Segment::new(pair[0], pair[1]))
        .collect()
}

// Möller interval support

struct IsectInterval {
    p0: Point3,
    p1: Point3,
    s0: f64,
    s1: f64,
}

impl IsectInterval {
    fn swap(&mut self) {
        std::mem::swap(&mut self.p0, &mut self.p1);
        std::mem::swap(&mut self.s0, &mut self.s1);
    }
}

/// Computes the interval in which a triangle crosses the intersection line,
/// reordering the vertices so the lone vertex (the one on its own side of
/// the other plane) comes first. Returns `None` for coplanar triangles.
#[allow(clippy::too_many_arguments, clippy::similar_names)]
fn compute_intervals(
    v0: &Point3,
    v1: &Point3,
    v2: &Point3,
    vv0: f64,
    vv1: f64,
    vv2: f64,
    d0: f64,
    d1: f64,
    d2: f64,
    d0d1: f64,
    d0d2: f64,
) -> Option<IsectInterval> {
    if d0d1 > 0.0 {
        // d2 is on the other side.
        Some(interval_endpoints(v2, v0, v1, vv2, vv0, vv1, d2, d0, d1))
    } else if d0d2 > 0.0 {
        Some(interval_endpoints(v1, v0, v2, vv1, vv0, vv2, d1, d0, d2))
    } else if d1 * d2 > 0.0 || d0 != 0.0 {
        Some(interval_endpoints(v0, v1, v2, vv0, vv1, vv2, d0, d1, d2))
    } else if d1 != 0.0 {
        Some(interval_endpoints(v1, v0, v2, vv1, vv0, vv2, d1, d0, d2))
    } else if d2 != 0.0 {
        Some(interval_endpoints(v2, v0, v1, vv2, vv0, vv1, d2, d0, d1))
    } else {
        None
    }
}

#[allow(clippy::too_many_arguments, clippy::similar_names)]
fn interval_endpoints(
    v0: &Point3,
    v1: &Point3,
    v2: &Point3,
    vv0: f64,
    vv1: f64,
    vv2: f64,
    d0: f64,
    d1: f64,
    d2: f64,
) -> IsectInterval {
    let mut tmp = d0 / (d0 - d1);
    let s0 = vv0 + (vv1 - vv0) * tmp;
    let p0 = v0 + (v1 - v0) * tmp;
    tmp = d0 / (d0 - d2);
    let s1 = vv0 + (vv2 - vv0) * tmp;
    let p1 = v0 + (v2 - v0) * tmp;
    IsectInterval { p0, p1, s0, s1 }
}

fn dominant_axis(v: &Vector3) -> usize {
    let mut axis = 0;
    let mut max = v.x.abs();
    if v.y.abs() > max {
        max = v.y.abs();
        axis = 1;
    }
    if v.z.abs() > max {
        axis = 2;
    }
    axis
}

/// 2D overlap test for coplanar triangles, projected onto the axis-aligned
/// plane that maximizes their area: any edge/edge crossing, or either
/// triangle containing the other's first vertex.
fn coplanar_triangles(
    n: &Vector3,
    p1: &Point3,
    p2: &Point3,
    p3: &Point3,
    q1: &Point3,
    q2: &Point3,
    q3: &Point3,
) -> bool {
    let (i0, i1) = match dominant_axis(n) {
        0 => (1, 2),
        1 => (0, 2),
        _ => (0, 1),
    };
    let project = |p: &Point3| (p[i0], p[i1]);
    let v = [project(p1), project(p2), project(p3)];
    let u = [project(q1), project(q2), project(q3)];

    for i in 0..3 {
        if triangle_edge_test(v[i], v[(i + 1) % 3], &u) {
            return true;
        }
    }
    point_in_tri_2d(v[0], &u) || point_in_tri_2d(u[0], &v)
}

/// Tests one edge of the first triangle against all three edges of the
/// second.
fn triangle_edge_test(v0: (f64, f64), v1: (f64, f64), u: &[(f64, f64); 3]) -> bool {
    let ax = v1.0 - v0.0;
    let ay = v1.1 - v0.1;
    (0..3).any(|i| edge_edge_test(v0, u[i], u[(i + 1) % 3], ax, ay))
}

fn edge_edge_test(v0: (f64, f64), u0: (f64, f64), u1: (f64, f64), ax: f64, ay: f64) -> bool {
    let bx = u0.0 - u1.0;
    let by = u0.1 - u1.1;
    let cx = v0.0 - u0.0;
    let cy = v0.1 - u0.1;
    let f = ay * bx - ax * by;
    let d = by * cx - bx * cy;
    if (f > 0.0 && d >= 0.0 && d <= f) || (f < 0.0 && d <= 0.0 && d >= f) {
        let e = ax * cy - ay * cx;
        if f > 0.0 {
            e >= 0.0 && e <= f
        } else {
            e <= 0.0 && e >= f
        }
    } else {
        false
    }
}

fn point_in_tri_2d(v0: (f64, f64), u: &[(f64, f64); 3]) -> bool {
    let mut sides = [0.0; 3];
    for i in 0..3 {
        let a = u[(i + 1) % 3].1 - u[i].1;
        let b = -(u[(i + 1) % 3].0 - u[i].0);
        let c = -a * u[i].0 - b * u[i].1;
        sides[i] = a * v0.0 + b * v0.1 + c;
    }
    sides[0] * sides[1] > 0.0 && sides[0] * sides[2] > 0.0
}
