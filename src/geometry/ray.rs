use crate::error::{GeometryError, Result};
use crate::math::{Point3, Tolerance, Vector3};

/// A half-infinite line starting at an origin point.
///
/// The parametric form is: `P(t) = origin + t * direction` with `t >= 0`.
/// The direction is stored normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    origin: Point3,
    direction: Vector3,
}

impl Ray {
    /// Creates a new ray from an origin and direction.
    ///
    /// # Errors
    ///
    /// Returns an error if the direction vector is zero-length.
    pub fn new(origin: Point3, direction: Vector3) -> Result<Self> {
        let len = direction.norm();
        if Tolerance::default().is_zero(len) {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(Self {
            origin,
            direction: direction / len,
        })
    }

    /// Returns the origin point of the ray.
    #[must_use]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// Returns the unit direction vector of the ray.
    #[must_use]
    pub fn direction(&self) -> &Vector3 {
        &self.direction
    }

    /// Evaluates the ray at parameter `t >= 0`.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point3 {
        self.origin + self.direction * t
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn direction_is_normalized() {
        let ray = Ray::new(Point3::origin(), Vector3::new(5.0, 0.0, 0.0)).unwrap();
        assert!((ray.direction().norm() - 1.0).abs() < 1e-12);
        assert!((ray.point_at(2.0).x - 2.0).abs() < 1e-12);
    }

    #[test]
    fn zero_direction_is_rejected() {
        assert!(Ray::new(Point3::origin(), Vector3::zeros()).is_err());
    }
}
