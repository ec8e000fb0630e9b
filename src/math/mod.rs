pub mod classify;
pub mod closest_2d;
pub mod closest_3d;
pub mod distance_2d;
pub mod distance_3d;
pub mod intersect_2d;
pub mod intersect_3d;
pub mod overlap_3d;
pub mod tolerance;

pub use classify::Classification;
pub use intersect_3d::Intersection;
pub use tolerance::Tolerance;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Builds a 3D point from a coordinate slice.
///
/// # Errors
///
/// Returns an error when the slice does not hold exactly three values.
pub fn point3_from_slice(coords: &[f64]) -> crate::error::Result<Point3> {
    if coords.len() != 3 {
        return Err(crate::error::GeometryError::MismatchedLengths {
            expected: 3,
            actual: coords.len(),
        }
        .into());
    }
    Ok(Point3::new(coords[0], coords[1], coords[2]))
}

/// Builds a 3D vector from a coordinate slice.
///
/// # Errors
///
/// Returns an error when the slice does not hold exactly three values.
pub fn vector3_from_slice(coords: &[f64]) -> crate::error::Result<Vector3> {
    if coords.len() != 3 {
        return Err(crate::error::GeometryError::MismatchedLengths {
            expected: 3,
            actual: coords.len(),
        }
        .into());
    }
    Ok(Vector3::new(coords[0], coords[1], coords[2]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_constructors_check_length() {
        assert!(point3_from_slice(&[1.0, 2.0, 3.0]).is_ok());
        assert!(point3_from_slice(&[1.0, 2.0]).is_err());
        assert!(vector3_from_slice(&[1.0, 2.0, 3.0, 4.0]).is_err());
    }
}

/// Result of a pair closest-point query (segment/segment, line/line).
///
/// Carries the closest point on each primitive, the parameters at which they
/// occur, and the squared distance between them. `touching` is the
/// epsilon-qualified intersection flag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestApproach {
    /// Closest point on the first primitive.
    pub p1: Point3,
    /// Closest point on the second primitive.
    pub p2: Point3,
    /// Parameter on the first primitive.
    pub t1: f64,
    /// Parameter on the second primitive.
    pub t2: f64,
    /// Squared distance between `p1` and `p2`.
    pub sq_dist: f64,
    /// Whether the primitives touch within tolerance.
    pub touching: bool,
}

impl ClosestApproach {
    /// The segment bridging the two closest points.
    #[must_use]
    pub fn bridge(&self) -> crate::geometry::Segment {
        crate::geometry::Segment::new(self.p1, self.p2)
    }
}
