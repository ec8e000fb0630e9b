use crate::error::Result;
use crate::math::{Point3, Vector3};

use super::Plane;

/// A triangle in 3D space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    a: Point3,
    b: Point3,
    c: Point3,
}

impl Triangle {
    /// Creates a new triangle. Degenerate triangles are legal; operations
    /// that need a supporting plane are fallible instead.
    #[must_use]
    pub fn new(a: Point3, b: Point3, c: Point3) -> Self {
        Self { a, b, c }
    }

    /// First vertex.
    #[must_use]
    pub fn a(&self) -> &Point3 {
        &self.a
    }

    /// Second vertex.
    #[must_use]
    pub fn b(&self) -> &Point3 {
        &self.b
    }

    /// Third vertex.
    #[must_use]
    pub fn c(&self) -> &Point3 {
        &self.c
    }

    /// The three vertices in order.
    #[must_use]
    pub fn vertices(&self) -> [Point3; 3] {
        [self.a, self.b, self.c]
    }

    /// Unit normal following the right-hand rule around `a -> b -> c`.
    ///
    /// # Errors
    ///
    /// Returns an error for a degenerate (collinear) triangle.
    pub fn normal(&self) -> Result<Vector3> {
        Ok(*self.plane()?.normal())
    }

    /// The supporting plane of the triangle.
    ///
    /// # Errors
    ///
    /// Returns an error for a degenerate (collinear) triangle.
    pub fn plane(&self) -> Result<Plane> {
        Plane::from_points(self.a, self.b, self.c)
    }

    /// Area of the triangle.
    #[must_use]
    pub fn area(&self) -> f64 {
        0.5 * (self.b - self.a).cross(&(self.c - self.a)).norm()
    }

    /// Centroid of the triangle.
    #[must_use]
    pub fn centroid(&self) -> Point3 {
        Point3::from((self.a.coords + self.b.coords + self.c.coords) / 3.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn area_and_normal() {
        let t = Triangle::new(
            Point3::origin(),
            Point3::new(4.0, 0.0, 0.0),
            Point3::new(0.0, 3.0, 0.0),
        );
        assert!((t.area() - 6.0).abs() < 1e-12);
        assert!((t.normal().unwrap().z - 1.0).abs() < 1e-12);
    }

    #[test]
    fn degenerate_triangle_has_no_plane() {
        let t = Triangle::new(
            Point3::origin(),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        );
        assert!(t.plane().is_err());
        assert!(t.area().abs() < 1e-12);
    }
}
