use super::{Point2, Tolerance, Vector2};

/// Closest point on the 2D segment from `a` to `b`, with the parameter
/// clamped to `[0, 1]`. A degenerate segment yields `a`.
#[must_use]
pub fn point_segment_2d(p: &Point2, a: &Point2, b: &Point2, tol: Tolerance) -> Point2 {
    a + (b - a) * segment_parameter_2d(p, a, b, tol)
}

/// Parameter of the closest point on the 2D segment from `a` to `b`,
/// clamped to `[0, 1]` with epsilon snapping at the endpoints.
#[must_use]
pub fn segment_parameter_2d(p: &Point2, a: &Point2, b: &Point2, tol: Tolerance) -> f64 {
    let ab = b - a;
    let denom = ab.norm_squared();
    if tol.is_zero(denom) {
        return 0.0;
    }
    let t = (p - a).dot(&ab);
    if t <= tol.epsilon() {
        0.0
    } else if t >= denom - tol.epsilon() {
        1.0
    } else {
        t / denom
    }
}

/// Closest point on the infinite 2D line `origin + t * direction`. A zero
/// direction yields the origin.
#[must_use]
pub fn point_line_2d(p: &Point2, origin: &Point2, direction: &Vector2, tol: Tolerance) -> Point2 {
    let denom = direction.norm_squared();
    if tol.is_zero(denom) {
        return *origin;
    }
    let t = (p - origin).dot(direction) / denom;
    origin + direction * t
}

/// Closest point on the 2D ray `origin + t * direction` with `t >= 0`.
#[must_use]
pub fn point_ray_2d(p: &Point2, origin: &Point2, direction: &Vector2, tol: Tolerance) -> Point2 {
    let denom = direction.norm_squared();
    if tol.is_zero(denom) {
        return *origin;
    }
    let t = (p - origin).dot(direction) / denom;
    if t <= 0.0 {
        *origin
    } else {
        origin + direction * t
    }
}
