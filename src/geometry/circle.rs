use crate::error::{GeometryError, Result};
use crate::math::{Point2, Tolerance};

/// A circle in the 2D plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    center: Point2,
    radius: f64,
}

impl Circle {
    /// Creates a new circle.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is not positive.
    pub fn new(center: Point2, radius: f64) -> Result<Self> {
        if radius < Tolerance::default().epsilon() {
            return Err(GeometryError::Degenerate("circle radius must be positive".into()).into());
        }
        Ok(Self { center, radius })
    }

    /// Center of the circle.
    #[must_use]
    pub fn center(&self) -> &Point2 {
        &self.center
    }

    /// Radius of the circle.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Geometric equality within tolerance.
    #[must_use]
    pub fn is_equal(&self, other: &Circle, tol: Tolerance) -> bool {
        tol.is_equal_abs(self.radius, other.radius)
            && tol.is_zero_sq((self.center - other.center).norm_squared())
    }
}
