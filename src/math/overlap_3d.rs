use crate::geometry::{Aabb, Line, Plane, Ray, Segment, Sphere, Triangle};

use super::{closest_3d, distance_3d, Point3, Tolerance, Vector3};

// AABB-AABB

/// Whether two boxes overlap (shared boundary counts).
#[must_use]
pub fn aabb_aabb(a: &Aabb, b: &Aabb) -> bool {
    (0..3).all(|i| a.max()[i] >= b.min()[i] && a.min()[i] <= b.max()[i])
}

// AABB-PLANE

/// Whether a box touches a plane: project the half-extents onto the normal
/// and compare against the center's signed distance.
#[must_use]
pub fn aabb_plane(aabb: &Aabb, plane: &Plane) -> bool {
    let c = aabb.center();
    let e = aabb.half_extents();
    let n = plane.normal();
    let r = e.x * n.x.abs() + e.y * n.y.abs() + e.z * n.z.abs();
    let s = plane.signed_distance(&c);
    s.abs() <= r
}

// AABB-SPHERE

/// Whether a box and a sphere overlap.
#[must_use]
pub fn aabb_sphere(aabb: &Aabb, sphere: &Sphere) -> bool {
    distance_3d::sq_distance_point_aabb(sphere.center(), aabb) <= sphere.sq_radius()
}

// SPHERE-SPHERE

/// Whether two spheres overlap.
#[must_use]
pub fn sphere_sphere(s1: &Sphere, s2: &Sphere) -> bool {
    let sq_dist = (s1.center() - s2.center()).norm_squared();
    let radius_sum = s1.radius() + s2.radius();
    sq_dist <= radius_sum * radius_sum
}

// RAY-SPHERE

/// Whether a ray touches a sphere.
#[must_use]
pub fn ray_sphere(ray: &Ray, sphere: &Sphere) -> bool {
    let m = ray.origin() - sphere.center();
    let c = m.dot(&m) - sphere.sq_radius();
    if c <= 0.0 {
        // Origin inside the sphere.
        return true;
    }
    let b = m.dot(ray.direction());
    if b >= 0.0 {
        // Pointing away from the sphere.
        return false;
    }
    b * b - c >= 0.0
}

// TRIANGLE-SPHERE

/// Whether a triangle touches a sphere.
#[must_use]
pub fn triangle_sphere(triangle: &Triangle, sphere: &Sphere) -> bool {
    let p = closest_3d::point_triangle(sphere.center(), triangle);
    (p - sphere.center()).norm_squared() <= sphere.sq_radius()
}

// RAY-AABB

/// Slab test for a ray against a box.
#[must_use]
pub fn ray_aabb(ray: &Ray, aabb: &Aabb, tol: Tolerance) -> bool {
    slab_test(ray.origin(), ray.direction(), aabb, 0.0, f64::INFINITY, tol)
}

// LINE-AABB

/// Slab test for an infinite line against a box.
#[must_use]
pub fn line_aabb(line: &Line, aabb: &Aabb, tol: Tolerance) -> bool {
    slab_test(
        line.origin(),
        line.direction(),
        aabb,
        f64::NEG_INFINITY,
        f64::INFINITY,
        tol,
    )
}

/// Per-axis interval intersection via reciprocal direction, returning false
/// as soon as any axis interval is empty.
fn slab_test(
    origin: &Point3,
    direction: &Vector3,
    aabb: &Aabb,
    t_min: f64,
    t_max: f64,
    tol: Tolerance,
) -> bool {
    let mut t0 = t_min;
    let mut t1 = t_max;
    for axis in 0..3 {
        let o = origin[axis];
        let d = direction[axis];
        if tol.is_zero(d) {
            if o < aabb.min()[axis] || o > aabb.max()[axis] {
                return false;
            }
        } else {
            let ood = 1.0 / d;
            let mut t_near = (aabb.min()[axis] - o) * ood;
            let mut t_far = (aabb.max()[axis] - o) * ood;
            if t_near > t_far {
                std::mem::swap(&mut t_near, &mut t_far);
            }
            t0 = t0.max(t_near);
            t1 = t1.min(t_far);
            if t0 > t1 {
                return false;
            }
        }
    }
    true
}

// SEGMENT-AABB

/// Separating-axis test for a segment against a box, using the segment
/// midpoint relative to the box center.
#[must_use]
pub fn segment_aabb(segment: &Segment, aabb: &Aabb, tol: Tolerance) -> bool {
    let e = aabb.half_extents();
    let d = segment.delta() * 0.5;
    let m = segment.midpoint() - aabb.center();

    let mut adx = d.x.abs();
    if m.x.abs() > e.x + adx {
        return false;
    }
    let mut ady = d.y.abs();
    if m.y.abs() > e.y + ady {
        return false;
    }
    let mut adz = d.z.abs();
    if m.z.abs() > e.z + adz {
        return false;
    }
    // Pad to avoid missing near-parallel cross-product axes.
    adx += tol.epsilon();
    ady += tol.epsilon();
    adz += tol.epsilon();
    if (m.y * d.z - m.z * d.y).abs() > e.y * adz + e.z * ady {
        return false;
    }
    if (m.z * d.x - m.x * d.z).abs() > e.x * adz + e.z * adx {
        return false;
    }
    (m.x * d.y - m.y * d.x).abs() <= e.x * ady + e.y * adx
}

// TRIANGLE-AABB

/// Separating-axis test for a triangle against a box over the 13 candidate
/// axes: nine edge cross products, the three box axes, and the triangle
/// normal. A degenerate triangle falls back to a segment test along its
/// longest edge.
#[must_use]
pub fn triangle_aabb(triangle: &Triangle, aabb: &Aabb, tol: Tolerance) -> bool {
    let c = aabb.center();
    let e = aabb.half_extents();
    let v0 = triangle.a() - c;
    let v1 = triangle.b() - c;
    let v2 = triangle.c() - c;
    let f0 = v1 - v0;
    let f1 = v2 - v1;
    let f2 = v0 - v2;

    // Nine cross-product axes u_i x f_j; a zero axis (box axis parallel to
    // the edge) is replaced by an axis through the edge's first vertex.
    let units = [Vector3::x(), Vector3::y(), Vector3::z()];
    let verts = [v0, v1, v2];
    for u in &units {
        for (j, f) in [f0, f1, f2].iter().enumerate() {
            let mut axis = u.cross(f);
            if tol.is_zero_sq(axis.norm_squared()) {
                // Box axis parallel to the edge: fall back to an axis through
                // the edge's first vertex (relative to the box center).
                axis = u.cross(&verts[j]);
            }
            if tol.is_zero_sq(axis.norm_squared()) {
                continue;
            }
            if separated_on_axis(&axis, &v0, &v1, &v2, &e) {
                return false;
            }
        }
    }

    // Box face axes.
    for axis in 0..3 {
        let min = v0[axis].min(v1[axis]).min(v2[axis]);
        let max = v0[axis].max(v1[axis]).max(v2[axis]);
        if min > e[axis] || max < -e[axis] {
            return false;
        }
    }

    // Triangle plane.
    let n = f0.cross(&f1);
    if tol.is_zero_sq(n.norm_squared()) {
        // Degenerate triangle: test its longest edge as a segment.
        let edges = [
            Segment::new(*triangle.a(), *triangle.b()),
            Segment::new(*triangle.b(), *triangle.c()),
            Segment::new(*triangle.c(), *triangle.a()),
        ];
        let longest = edges
            .iter()
            .copied()
            .max_by(|a, b| a.sq_length().total_cmp(&b.sq_length()))
            .unwrap_or(edges[0]);
        return segment_aabb(&longest, aabb, tol);
    }
    let Ok(plane) = Plane::from_origin_normal(*triangle.a(), n) else {
        return false;
    };
    aabb_plane(aabb, &plane)
}

/// Interval test on one candidate separating axis (box centered at origin).
fn separated_on_axis(axis: &Vector3, v0: &Vector3, v1: &Vector3, v2: &Vector3, e: &Vector3) -> bool {
    let p0 = v0.dot(axis);
    let p1 = v1.dot(axis);
    let p2 = v2.dot(axis);
    let r = e.x * axis.x.abs() + e.y * axis.y.abs() + e.z * axis.z.abs();
    let min_p = p0.min(p1).min(p2);
    let max_p = p0.max(p1).max(p2);
    min_p.max(-max_p) > r
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn unit_box() -> Aabb {
        Aabb::new(Point3::origin(), p(1.0, 1.0, 1.0)).unwrap()
    }

    // ── aabb / aabb ──

    #[test]
    fn overlapping_boxes() {
        let a = unit_box();
        let b = Aabb::new(p(0.5, 0.5, 0.5), p(2.0, 2.0, 2.0)).unwrap();
        assert!(aabb_aabb(&a, &b));
        assert!(aabb_aabb(&b, &a));
    }

    #[test]
    fn touching_boxes_count_as_overlapping() {
        let a = unit_box();
        let b = Aabb::new(p(1.0, 0.0, 0.0), p(2.0, 1.0, 1.0)).unwrap();
        assert!(aabb_aabb(&a, &b));
    }

    #[test]
    fn disjoint_boxes() {
        let a = unit_box();
        let b = Aabb::new(p(2.0, 2.0, 2.0), p(3.0, 3.0, 3.0)).unwrap();
        assert!(!aabb_aabb(&a, &b));
    }

    // ── aabb / plane ──

    #[test]
    fn plane_through_box() {
        let plane =
            Plane::from_origin_normal(p(0.5, 0.5, 0.5), Vector3::new(1.0, 1.0, 1.0)).unwrap();
        assert!(aabb_plane(&unit_box(), &plane));
    }

    #[test]
    fn plane_clear_of_box() {
        let plane = Plane::from_origin_normal(p(0.0, 0.0, 5.0), Vector3::z()).unwrap();
        assert!(!aabb_plane(&unit_box(), &plane));
    }

    // ── sphere tests ──

    #[test]
    fn sphere_overlaps_box_face() {
        let s = Sphere::new(p(2.0, 0.5, 0.5), 1.5).unwrap();
        assert!(aabb_sphere(&unit_box(), &s));
        let far = Sphere::new(p(5.0, 0.5, 0.5), 1.0).unwrap();
        assert!(!aabb_sphere(&unit_box(), &far));
    }

    #[test]
    fn spheres_touching() {
        let a = Sphere::new(Point3::origin(), 1.0).unwrap();
        let b = Sphere::new(p(2.0, 0.0, 0.0), 1.0).unwrap();
        let c = Sphere::new(p(3.0, 0.0, 0.0), 0.5).unwrap();
        assert!(sphere_sphere(&a, &b));
        assert!(!sphere_sphere(&a, &c));
    }

    #[test]
    fn ray_toward_and_away_from_sphere() {
        let s = Sphere::new(p(5.0, 0.0, 0.0), 1.0).unwrap();
        let toward = Ray::new(Point3::origin(), Vector3::x()).unwrap();
        let away = Ray::new(Point3::origin(), -Vector3::x()).unwrap();
        assert!(ray_sphere(&toward, &s));
        assert!(!ray_sphere(&away, &s));
        // Origin inside.
        let inside = Ray::new(p(5.0, 0.5, 0.0), Vector3::y()).unwrap();
        assert!(ray_sphere(&inside, &s));
    }

    #[test]
    fn triangle_against_sphere() {
        let t = Triangle::new(p(-1.0, -1.0, 0.0), p(1.0, -1.0, 0.0), p(0.0, 1.0, 0.0));
        let near = Sphere::new(p(0.0, 0.0, 0.5), 1.0).unwrap();
        let far = Sphere::new(p(0.0, 0.0, 5.0), 1.0).unwrap();
        assert!(triangle_sphere(&t, &near));
        assert!(!triangle_sphere(&t, &far));
    }

    // ── slab tests ──

    #[test]
    fn ray_into_box() {
        let tol = Tolerance::default();
        let ray = Ray::new(p(-1.0, 0.5, 0.5), Vector3::x()).unwrap();
        assert!(ray_aabb(&ray, &unit_box(), tol));
    }

    #[test]
    fn ray_away_from_box() {
        let tol = Tolerance::default();
        let ray = Ray::new(p(-1.0, 0.5, 0.5), -Vector3::x()).unwrap();
        assert!(!ray_aabb(&ray, &unit_box(), tol));
    }

    #[test]
    fn ray_parallel_to_axis_outside_slab() {
        let tol = Tolerance::default();
        let ray = Ray::new(p(-1.0, 2.0, 0.5), Vector3::x()).unwrap();
        assert!(!ray_aabb(&ray, &unit_box(), tol));
    }

    #[test]
    fn line_through_box_behind_origin() {
        let tol = Tolerance::default();
        // The ray version misses; the line version hits.
        let line = Line::new(p(-1.0, 0.5, 0.5), -Vector3::x()).unwrap();
        assert!(line_aabb(&line, &unit_box(), tol));
        let ray = Ray::new(p(-1.0, 0.5, 0.5), -Vector3::x()).unwrap();
        assert!(!ray_aabb(&ray, &unit_box(), tol));
    }

    // ── segment / aabb ──

    #[test]
    fn segment_through_box() {
        let tol = Tolerance::default();
        let s = Segment::new(p(-1.0, 0.5, 0.5), p(2.0, 0.5, 0.5));
        assert!(segment_aabb(&s, &unit_box(), tol));
    }

    #[test]
    fn segment_short_of_box() {
        let tol = Tolerance::default();
        let s = Segment::new(p(-3.0, 0.5, 0.5), p(-2.0, 0.5, 0.5));
        assert!(!segment_aabb(&s, &unit_box(), tol));
    }

    #[test]
    fn diagonal_segment_near_corner() {
        let tol = Tolerance::default();
        // Passes just outside the corner.
        let s = Segment::new(p(1.8, 0.4, 0.5), p(0.4, 1.8, 0.5));
        assert!(!segment_aabb(&s, &unit_box(), tol));
        // Passes through the corner region.
        let s = Segment::new(p(1.5, 0.2, 0.5), p(0.2, 1.5, 0.5));
        assert!(segment_aabb(&s, &unit_box(), tol));
    }

    // ── triangle / aabb ──

    #[test]
    fn triangle_inside_box() {
        let tol = Tolerance::default();
        let t = Triangle::new(p(0.2, 0.2, 0.5), p(0.8, 0.2, 0.5), p(0.2, 0.8, 0.5));
        assert!(triangle_aabb(&t, &unit_box(), tol));
    }

    #[test]
    fn triangle_piercing_box() {
        let tol = Tolerance::default();
        let t = Triangle::new(p(-1.0, 0.5, 0.5), p(2.0, 0.5, 0.5), p(0.5, 0.5, 3.0));
        assert!(triangle_aabb(&t, &unit_box(), tol));
    }

    #[test]
    fn triangle_separated_by_plane_axis() {
        let tol = Tolerance::default();
        let t = Triangle::new(p(0.0, 0.0, 2.0), p(1.0, 0.0, 2.0), p(0.0, 1.0, 2.0));
        assert!(!triangle_aabb(&t, &unit_box(), tol));
    }

    #[test]
    fn triangle_separated_by_cross_axis() {
        let tol = Tolerance::default();
        // Slanted triangle beyond the corner; only the edge cross products
        // separate it.
        let t = Triangle::new(p(2.5, 0.0, 0.5), p(0.0, 2.5, 0.5), p(2.5, 2.5, 0.5));
        assert!(!triangle_aabb(&t, &unit_box(), tol));
    }

    #[test]
    fn degenerate_triangle_as_segment() {
        let tol = Tolerance::default();
        let through = Triangle::new(p(-1.0, 0.5, 0.5), p(0.0, 0.5, 0.5), p(2.0, 0.5, 0.5));
        assert!(triangle_aabb(&through, &unit_box(), tol));
        let outside = Triangle::new(p(-1.0, 2.0, 0.5), p(0.0, 2.0, 0.5), p(2.0, 2.0, 0.5));
        assert!(!triangle_aabb(&outside, &unit_box(), tol));
    }
}
