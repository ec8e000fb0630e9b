use crate::geometry::{Circle, Plane, Polygon, Segment, Tetrahedron};

use super::{Point2, Point3, Tolerance};

/// Outcome of a classification query.
///
/// A closed enumeration shared by all classification operations; each pair of
/// primitives uses the subset that makes sense for it (a point against a
/// plane is `Front`/`Back`/`On`, a circle against a circle is
/// `Outside`/`Inside`/`Containing`/`Crossing`/`On`, and so on). Consumers
/// match exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// On the positive side (in the direction of the normal).
    Front,
    /// On the negative side (opposite the normal).
    Back,
    /// On the primitive itself, within tolerance.
    On,
    /// Strictly inside a closed primitive.
    Inside,
    /// Strictly outside a closed primitive.
    Outside,
    /// Straddling the primitive, with parts on both sides.
    Crossing,
    /// Touching a closed primitive at a single point.
    Tangent,
    /// Containing the other primitive entirely.
    Containing,
    /// Two queried points on the same side.
    Same,
    /// Two queried points on different sides.
    Diff,
}

/// Classifies a point against a plane by signed distance.
#[must_use]
pub fn point_plane(p: &Point3, plane: &Plane, tol: Tolerance) -> Classification {
    let dist = plane.signed_distance(p);
    if dist > tol.epsilon() {
        Classification::Front
    } else if dist < -tol.epsilon() {
        Classification::Back
    } else {
        Classification::On
    }
}

/// Classifies a 2D point against the oriented line `origin + t * direction`.
///
/// Front is the left side when looking along the direction.
#[must_use]
pub fn point_line_2d(
    p: &Point2,
    origin: &Point2,
    direction: &super::Vector2,
    tol: Tolerance,
) -> Classification {
    let dist = direction.x * (p.y - origin.y) - direction.y * (p.x - origin.x);
    if dist > tol.epsilon() {
        Classification::Front
    } else if dist < -tol.epsilon() {
        Classification::Back
    } else {
        Classification::On
    }
}

/// Classifies a 2D point against a circle.
#[must_use]
pub fn point_circle_2d(p: &Point2, circle: &Circle, tol: Tolerance) -> Classification {
    let dist = (p - circle.center()).norm();
    if tol.is_zero(dist - circle.radius()) {
        Classification::On
    } else if dist < circle.radius() {
        Classification::Inside
    } else {
        Classification::Outside
    }
}

/// Classifies the first circle against the second.
#[must_use]
pub fn circle_circle_2d(c1: &Circle, c2: &Circle, tol: Tolerance) -> Classification {
    if c1.is_equal(c2, tol) {
        return Classification::On;
    }
    let dist = (c1.center() - c2.center()).norm();
    let r_sum = c1.radius() + c2.radius();
    let r_diff = (c1.radius() - c2.radius()).abs();
    if dist >= r_sum {
        Classification::Outside
    } else if dist <= r_diff {
        if c1.radius() < c2.radius() {
            Classification::Inside
        } else {
            Classification::Containing
        }
    } else {
        Classification::Crossing
    }
}

/// Classifies a circle against an (infinite) 2D line.
#[must_use]
pub fn circle_line_2d(
    circle: &Circle,
    origin: &Point2,
    direction: &super::Vector2,
    tol: Tolerance,
) -> Classification {
    let d = perp_distance_2d(circle.center(), origin, direction);
    if tol.is_zero(d - circle.radius()) {
        Classification::Tangent
    } else if d < circle.radius() {
        Classification::Crossing
    } else {
        Classification::Outside
    }
}

/// Whether two 2D points lie on the same side of a line. A point on the line
/// counts as being on both sides.
#[must_use]
pub fn same_side_of_line_2d(
    p: &Point2,
    q: &Point2,
    origin: &Point2,
    direction: &super::Vector2,
    tol: Tolerance,
) -> Classification {
    let side_p = point_line_2d(p, origin, direction, tol);
    let side_q = point_line_2d(q, origin, direction, tol);
    if side_p == Classification::On || side_q == Classification::On || side_p == side_q {
        Classification::Same
    } else {
        Classification::Diff
    }
}

/// Classifies a segment against an oriented 2D line.
///
/// Endpoints on the line adopt the other endpoint's side; opposite sides
/// give `Crossing`.
#[must_use]
pub fn segment_line_2d(
    a: &Point2,
    b: &Point2,
    origin: &Point2,
    direction: &super::Vector2,
    tol: Tolerance,
) -> Classification {
    let side_a = point_line_2d(a, origin, direction, tol);
    let side_b = point_line_2d(b, origin, direction, tol);
    aggregate_two(side_a, side_b)
}

/// Classifies a segment against a plane.
#[must_use]
pub fn segment_plane(segment: &Segment, plane: &Plane, tol: Tolerance) -> Classification {
    let side_a = point_plane(segment.origin(), plane, tol);
    let side_b = point_plane(segment.end(), plane, tol);
    aggregate_two(side_a, side_b)
}

/// Classifies a polygon against a plane by aggregating its vertices: any
/// front vertex plus any back vertex gives `Crossing`; all vertices on the
/// plane give `On`; otherwise the single represented side wins.
#[must_use]
pub fn polygon_plane(poly: &Polygon, plane: &Plane, tol: Tolerance) -> Classification {
    let mut num_front = 0;
    let mut num_back = 0;
    for p in poly.points() {
        match point_plane(p, plane, tol) {
            Classification::Front => num_front += 1,
            Classification::Back => num_back += 1,
            _ => {}
        }
        if num_front > 0 && num_back > 0 {
            return Classification::Crossing;
        }
    }
    if num_front > 0 {
        Classification::Front
    } else if num_back > 0 {
        Classification::Back
    } else {
        Classification::On
    }
}

/// Classifies a 2D polygon (vertex loop) against an oriented 2D line, with
/// the same aggregation rule as [`polygon_plane`].
#[must_use]
pub fn polygon_line_2d(
    points: &[Point2],
    origin: &Point2,
    direction: &super::Vector2,
    tol: Tolerance,
) -> Classification {
    let mut num_front = 0;
    let mut num_back = 0;
    for p in points {
        match point_line_2d(p, origin, direction, tol) {
            Classification::Front => num_front += 1,
            Classification::Back => num_back += 1,
            _ => {}
        }
        if num_front > 0 && num_back > 0 {
            return Classification::Crossing;
        }
    }
    if num_front > 0 {
        Classification::Front
    } else if num_back > 0 {
        Classification::Back
    } else {
        Classification::On
    }
}

/// Classifies a point against a tetrahedron via its four face planes, each
/// oriented outward (the opposite vertex on its back side): `Inside` when
/// behind all faces, `On` when on a face but otherwise not in front of any,
/// `Outside` otherwise.
#[must_use]
pub fn point_tetrahedron(p: &Point3, tet: &Tetrahedron, tol: Tolerance) -> Classification {
    let faces = [
        (tet.a(), tet.b(), tet.c(), tet.d()),
        (tet.a(), tet.b(), tet.d(), tet.c()),
        (tet.a(), tet.c(), tet.d(), tet.b()),
        (tet.b(), tet.c(), tet.d(), tet.a()),
    ];
    let mut on = 0;
    for (a, b, c, opposite) in faces {
        let Ok(plane) = Plane::from_points(*a, *b, *c) else {
            // Flat tetrahedron: nothing is inside it.
            return Classification::Outside;
        };
        let plane = if plane.signed_distance(opposite) > 0.0 {
            plane.flipped()
        } else {
            plane
        };
        match point_plane(p, &plane, tol) {
            Classification::Front => return Classification::Outside,
            Classification::On => on += 1,
            Classification::Back => {}
            _ => unreachable!("point/plane classification is front, back or on"),
        }
    }
    if on > 0 {
        Classification::On
    } else {
        Classification::Inside
    }
}

/// Aggregation for a two-endpoint primitive.
fn aggregate_two(a: Classification, b: Classification) -> Classification {
    match (a, b) {
        (Classification::On, Classification::On) => Classification::On,
        (Classification::On, side) | (side, Classification::On) => side,
        (Classification::Front, Classification::Back)
        | (Classification::Back, Classification::Front) => Classification::Crossing,
        (side, _) => side,
    }
}

/// Perpendicular distance from a 2D point to an infinite line.
fn perp_distance_2d(p: &Point2, origin: &Point2, direction: &super::Vector2) -> f64 {
    let len = direction.norm();
    if len == 0.0 {
        return (p - origin).norm();
    }
    (direction.x * (p.y - origin.y) - direction.y * (p.x - origin.x)).abs() / len
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::{Vector2, Vector3};

    fn xy_plane() -> Plane {
        Plane::from_origin_normal(Point3::origin(), Vector3::z()).unwrap()
    }

    // ── point / plane ──

    #[test]
    fn point_sides_of_plane() {
        let tol = Tolerance::default();
        let plane = xy_plane();
        assert_eq!(
            point_plane(&Point3::new(0.0, 0.0, 1.0), &plane, tol),
            Classification::Front
        );
        assert_eq!(
            point_plane(&Point3::new(0.0, 0.0, -1.0), &plane, tol),
            Classification::Back
        );
        assert_eq!(
            point_plane(&Point3::new(5.0, 3.0, 0.0), &plane, tol),
            Classification::On
        );
        assert_eq!(
            point_plane(&Point3::new(0.0, 0.0, 1e-9), &plane, tol),
            Classification::On
        );
    }

    // ── segment / plane ──

    #[test]
    fn segment_crossing_plane() {
        let tol = Tolerance::default();
        let plane = xy_plane();
        let s = Segment::new(Point3::new(0.0, 0.0, -1.0), Point3::new(0.0, 0.0, 1.0));
        assert_eq!(segment_plane(&s, &plane, tol), Classification::Crossing);
    }

    #[test]
    fn segment_touching_plane_takes_free_endpoint_side() {
        let tol = Tolerance::default();
        let plane = xy_plane();
        let s = Segment::new(Point3::origin(), Point3::new(0.0, 0.0, 1.0));
        assert_eq!(segment_plane(&s, &plane, tol), Classification::Front);
    }

    #[test]
    fn segment_on_plane() {
        let tol = Tolerance::default();
        let plane = xy_plane();
        let s = Segment::new(Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0));
        assert_eq!(segment_plane(&s, &plane, tol), Classification::On);
    }

    // ── polygon / plane ──

    #[test]
    fn polygon_against_plane() {
        let tol = Tolerance::default();
        let plane = xy_plane();
        let above = Polygon::new(vec![
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(0.0, 1.0, 2.0),
        ])
        .unwrap();
        assert_eq!(polygon_plane(&above, &plane, tol), Classification::Front);

        let straddling = Polygon::new(vec![
            Point3::new(0.0, 0.0, -1.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(0.0, 1.0, 1.0),
        ])
        .unwrap();
        assert_eq!(
            polygon_plane(&straddling, &plane, tol),
            Classification::Crossing
        );
    }

    // ── point / line 2d ──

    #[test]
    fn point_sides_of_line_2d() {
        let tol = Tolerance::default();
        let o = Point2::origin();
        let d = Vector2::x();
        assert_eq!(
            point_line_2d(&Point2::new(0.0, 1.0), &o, &d, tol),
            Classification::Front
        );
        assert_eq!(
            point_line_2d(&Point2::new(0.0, -1.0), &o, &d, tol),
            Classification::Back
        );
        assert_eq!(
            point_line_2d(&Point2::new(3.0, 0.0), &o, &d, tol),
            Classification::On
        );
    }

    #[test]
    fn same_side_query() {
        let tol = Tolerance::default();
        let o = Point2::origin();
        let d = Vector2::x();
        assert_eq!(
            same_side_of_line_2d(&Point2::new(0.0, 1.0), &Point2::new(5.0, 2.0), &o, &d, tol),
            Classification::Same
        );
        assert_eq!(
            same_side_of_line_2d(&Point2::new(0.0, 1.0), &Point2::new(5.0, -2.0), &o, &d, tol),
            Classification::Diff
        );
    }

    // ── circle ──

    #[test]
    fn point_against_circle() {
        let tol = Tolerance::default();
        let c = Circle::new(Point2::origin(), 1.0).unwrap();
        assert_eq!(
            point_circle_2d(&Point2::new(0.5, 0.0), &c, tol),
            Classification::Inside
        );
        assert_eq!(
            point_circle_2d(&Point2::new(1.0, 0.0), &c, tol),
            Classification::On
        );
        assert_eq!(
            point_circle_2d(&Point2::new(2.0, 0.0), &c, tol),
            Classification::Outside
        );
    }

    #[test]
    fn circle_against_circle() {
        let tol = Tolerance::default();
        let unit = Circle::new(Point2::origin(), 1.0).unwrap();
        let far = Circle::new(Point2::new(5.0, 0.0), 1.0).unwrap();
        let inner = Circle::new(Point2::new(0.1, 0.0), 0.5).unwrap();
        let crossing = Circle::new(Point2::new(1.0, 0.0), 1.0).unwrap();
        assert_eq!(circle_circle_2d(&unit, &far, tol), Classification::Outside);
        assert_eq!(circle_circle_2d(&inner, &unit, tol), Classification::Inside);
        assert_eq!(
            circle_circle_2d(&unit, &inner, tol),
            Classification::Containing
        );
        assert_eq!(
            circle_circle_2d(&unit, &crossing, tol),
            Classification::Crossing
        );
        assert_eq!(circle_circle_2d(&unit, &unit, tol), Classification::On);
    }

    #[test]
    fn circle_against_line() {
        let tol = Tolerance::default();
        let c = Circle::new(Point2::new(0.0, 1.0), 1.0).unwrap();
        let o = Point2::origin();
        let d = Vector2::x();
        assert_eq!(circle_line_2d(&c, &o, &d, tol), Classification::Tangent);

        let crossing = Circle::new(Point2::new(0.0, 0.5), 1.0).unwrap();
        assert_eq!(
            circle_line_2d(&crossing, &o, &d, tol),
            Classification::Crossing
        );

        let away = Circle::new(Point2::new(0.0, 5.0), 1.0).unwrap();
        assert_eq!(circle_line_2d(&away, &o, &d, tol), Classification::Outside);
    }

    // ── tetrahedron ──

    #[test]
    fn point_against_tetrahedron() {
        let tol = Tolerance::default();
        let tet = Tetrahedron::new(
            Point3::origin(),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
        );
        assert_eq!(
            point_tetrahedron(&Point3::new(0.1, 0.1, 0.1), &tet, tol),
            Classification::Inside
        );
        assert_eq!(
            point_tetrahedron(&Point3::new(0.25, 0.25, 0.0), &tet, tol),
            Classification::On
        );
        assert_eq!(
            point_tetrahedron(&Point3::new(2.0, 2.0, 2.0), &tet, tol),
            Classification::Outside
        );
    }
}
