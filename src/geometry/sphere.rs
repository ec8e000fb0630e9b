use crate::error::{GeometryError, Result};
use crate::math::{Point3, Tolerance};

/// A sphere in 3D space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Point3,
    radius: f64,
}

impl Sphere {
    /// Creates a new sphere.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is not positive.
    pub fn new(center: Point3, radius: f64) -> Result<Self> {
        if radius < Tolerance::default().epsilon() {
            return Err(GeometryError::Degenerate("sphere radius must be positive".into()).into());
        }
        Ok(Self { center, radius })
    }

    /// Center of the sphere.
    #[must_use]
    pub fn center(&self) -> &Point3 {
        &self.center
    }

    /// Radius of the sphere.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Squared radius.
    #[must_use]
    pub fn sq_radius(&self) -> f64 {
        self.radius * self.radius
    }
}
