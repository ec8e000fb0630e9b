use super::{closest_2d, Point2, Tolerance, Vector2};

/// Squared distance between two 2D points.
#[must_use]
pub fn sq_distance_point_point_2d(p: &Point2, q: &Point2) -> f64 {
    (q - p).norm_squared()
}

/// Squared distance from a 2D point to a segment.
#[must_use]
pub fn sq_distance_point_segment_2d(p: &Point2, a: &Point2, b: &Point2, tol: Tolerance) -> f64 {
    (closest_2d::point_segment_2d(p, a, b, tol) - p).norm_squared()
}

/// Squared distance from a 2D point to an infinite line.
#[must_use]
pub fn sq_distance_point_line_2d(
    p: &Point2,
    origin: &Point2,
    direction: &Vector2,
    tol: Tolerance,
) -> f64 {
    (closest_2d::point_line_2d(p, origin, direction, tol) - p).norm_squared()
}

/// Squared distance from a 2D point to a ray.
#[must_use]
pub fn sq_distance_point_ray_2d(
    p: &Point2,
    origin: &Point2,
    direction: &Vector2,
    tol: Tolerance,
) -> f64 {
    (closest_2d::point_ray_2d(p, origin, direction, tol) - p).norm_squared()
}

/// Distance between two 2D points.
#[must_use]
pub fn distance_point_point_2d(p: &Point2, q: &Point2) -> f64 {
    sq_distance_point_point_2d(p, q).sqrt()
}

/// Distance from a 2D point to a segment.
#[must_use]
pub fn distance_point_segment_2d(p: &Point2, a: &Point2, b: &Point2, tol: Tolerance) -> f64 {
    sq_distance_point_segment_2d(p, a, b, tol).sqrt()
}

/// Distance from a 2D point to an infinite line.
#[must_use]
pub fn distance_point_line_2d(
    p: &Point2,
    origin: &Point2,
    direction: &Vector2,
    tol: Tolerance,
) -> f64 {
    sq_distance_point_line_2d(p, origin, direction, tol).sqrt()
}

/// Distance from a 2D point to a ray.
#[must_use]
pub fn distance_point_ray_2d(
    p: &Point2,
    origin: &Point2,
    direction: &Vector2,
    tol: Tolerance,
) -> f64 {
    sq_distance_point_ray_2d(p, origin, direction, tol).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn segment_distance_perpendicular() {
        let tol = Tolerance::default();
        let d = distance_point_segment_2d(&p(1.0, 1.0), &p(0.0, 0.0), &p(2.0, 0.0), tol);
        assert!((d - 1.0).abs() < 1e-9);
    }

    #[test]
    fn segment_distance_to_endpoint() {
        let tol = Tolerance::default();
        let d = distance_point_segment_2d(&p(-1.0, 0.0), &p(0.0, 0.0), &p(2.0, 0.0), tol);
        assert!((d - 1.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_segment_distance() {
        let tol = Tolerance::default();
        let d = distance_point_segment_2d(&p(3.0, 4.0), &p(0.0, 0.0), &p(0.0, 0.0), tol);
        assert!((d - 5.0).abs() < 1e-9);
    }

    #[test]
    fn line_vs_ray_distance() {
        let tol = Tolerance::default();
        let origin = p(0.0, 0.0);
        let dir = Vector2::new(1.0, 0.0);
        let q = p(-3.0, 4.0);
        assert!((distance_point_line_2d(&q, &origin, &dir, tol) - 4.0).abs() < 1e-9);
        assert!((distance_point_ray_2d(&q, &origin, &dir, tol) - 5.0).abs() < 1e-9);
    }
}
