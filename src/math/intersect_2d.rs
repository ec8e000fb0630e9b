use crate::error::{GeometryError, Result};
use crate::geometry::Circle;

use super::{classify, Classification, Point2, Tolerance, Vector2};

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if not
/// parallel.
#[must_use]
pub fn line_line_2d(
    p1: &Point2,
    d1: &Vector2,
    p2: &Point2,
    d2: &Vector2,
    tol: Tolerance,
) -> Option<(f64, f64)> {
    let cross = d1.x * d2.y - d1.y * d2.x;
    if tol.is_zero(cross) {
        return None;
    }
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    let t = (dx * d2.y - dy * d2.x) / cross;
    let u = (dx * d1.y - dy * d1.x) / cross;
    Some((t, u))
}

/// Bounded segment-segment intersection in 2D.
///
/// Returns `(intersection_point, t, u)` where `t` and `u` are in `[0, 1]`.
/// Parallel segments (collinear or not) yield `None`.
#[must_use]
pub fn segment_segment_2d(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
    tol: Tolerance,
) -> Option<(Point2, f64, f64)> {
    let da = a1 - a0;
    let db = b1 - b0;
    let (t, u) = line_line_2d(a0, &da, b0, &db, tol)?;
    let eps = tol.epsilon();
    if t >= -eps && t <= 1.0 + eps && u >= -eps && u <= 1.0 + eps {
        let t = tol.clamp(t, 0.0, 1.0);
        let u = tol.clamp(u, 0.0, 1.0);
        Some((a0 + da * t, t, u))
    } else {
        None
    }
}

/// Intersection of two closed 1D intervals `[u0, u1]` and `[v0, v1]`.
///
/// Returns the overlap interval, or `None` when the intervals are disjoint.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidInterval`] when either interval has
/// `lower >= upper`. This is the kernel's only hard-failure path: inverted
/// bounds are a caller error, not a geometric outcome.
pub fn interval_interval(u0: f64, u1: f64, v0: f64, v1: f64) -> Result<Option<(f64, f64)>> {
    if u0 >= u1 {
        return Err(GeometryError::InvalidInterval {
            lower: u0,
            upper: u1,
        }
        .into());
    }
    if v0 >= v1 {
        return Err(GeometryError::InvalidInterval {
            lower: v0,
            upper: v1,
        }
        .into());
    }
    let lo = u0.max(v0);
    let hi = u1.min(v1);
    if lo > hi {
        Ok(None)
    } else {
        Ok(Some((lo, hi)))
    }
}

/// Intersection points of two circles: empty when separate or one inside
/// the other, one point when tangent, two otherwise.
#[must_use]
pub fn circle_circle_2d(c0: &Circle, c1: &Circle, tol: Tolerance) -> Vec<Point2> {
    let d = (c1.center() - c0.center()).norm();
    if tol.is_zero(d) {
        // Concentric circles never cross in isolated points.
        return Vec::new();
    }
    let r0 = c0.radius();
    let r1 = c1.radius();
    if d > r0 + r1 + tol.epsilon() || d < (r0 - r1).abs() - tol.epsilon() {
        return Vec::new();
    }
    let a = (d * d + r0 * r0 - r1 * r1) / (2.0 * d);
    let h_sq = r0 * r0 - a * a;
    let dir = (c1.center() - c0.center()) / d;
    let mid = c0.center() + dir * a;
    if tol.is_zero_sq(h_sq.abs()) || h_sq <= 0.0 {
        // Tangent circles.
        return vec![mid];
    }
    let h = h_sq.sqrt();
    let perp = Vector2::new(-dir.y, dir.x);
    vec![mid + perp * h, mid - perp * h]
}

/// Intersection of the line `origin + t * dir` with a circle, as
/// `(point, t)` pairs.
#[must_use]
pub fn line_circle_2d(
    origin: &Point2,
    dir: &Vector2,
    circle: &Circle,
    tol: Tolerance,
) -> Vec<(Point2, f64)> {
    let f = origin - circle.center();
    let a = dir.norm_squared();
    if tol.is_zero(a) {
        return Vec::new();
    }
    let b = 2.0 * f.dot(dir);
    let c = f.norm_squared() - circle.radius() * circle.radius();
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < -tol.epsilon() {
        return Vec::new();
    }
    if tol.is_zero(discriminant.abs()) || discriminant <= 0.0 {
        // Tangent line: single root.
        let t = -b / (2.0 * a);
        return vec![(origin + dir * t, t)];
    }
    let root = discriminant.sqrt();
    let t0 = (-b - root) / (2.0 * a);
    let t1 = (-b + root) / (2.0 * a);
    vec![(origin + dir * t0, t0), (origin + dir * t1, t1)]
}

/// Splits a segment by an oriented 2D line. A crossing segment yields the
/// two sub-segments `(front part first)`; a non-crossing segment yields
/// `None`.
#[must_use]
pub fn split_segment_by_line_2d(
    a: &Point2,
    b: &Point2,
    origin: &Point2,
    direction: &Vector2,
    tol: Tolerance,
) -> Option<[(Point2, Point2); 2]> {
    if classify::segment_line_2d(a, b, origin, direction, tol) != Classification::Crossing {
        return None;
    }
    let (t, _) = line_line_2d(a, &(b - a), origin, direction, tol)?;
    let x = a + (b - a) * tol.clamp(t, 0.0, 1.0);
    if classify::point_line_2d(a, origin, direction, tol) == Classification::Front {
        Some([(*a, x), (x, *b)])
    } else {
        Some([(x, *b), (*a, x)])
    }
}

/// Clips a polygon loop to the front half-plane of an oriented 2D line
/// (Sutherland-Hodgman step). Vertices on the line are retained.
#[must_use]
pub fn clip_polygon_2d(
    points: &[Point2],
    origin: &Point2,
    direction: &Vector2,
    tol: Tolerance,
) -> Vec<Point2> {
    let n = points.len();
    if n < 3 {
        return Vec::new();
    }
    let mut output = Vec::with_capacity(n + 1);
    for i in 0..n {
        let current = points[i];
        let next = points[(i + 1) % n];
        let side_current = classify::point_line_2d(&current, origin, direction, tol);
        let side_next = classify::point_line_2d(&next, origin, direction, tol);
        let current_in = side_current != Classification::Back;
        let next_in = side_next != Classification::Back;
        if current_in {
            output.push(current);
        }
        if current_in != next_in {
            if let Some((t, _)) = line_line_2d(&current, &(next - current), origin, direction, tol)
            {
                output.push(current + (next - current) * t.clamp(0.0, 1.0));
            }
        }
    }
    if output.len() < 3 {
        Vec::new()
    } else {
        output
    }
}
