use crate::error::{GeometryError, Result};
use crate::math::{Point3, Tolerance, Vector3};

/// An infinite oriented plane in 3D space.
///
/// Defined by an origin point and a unit normal; `d` is the scalar offset
/// such that `normal . x = d` for every point `x` on the plane. The normal
/// orientation distinguishes the front (positive) from the back (negative)
/// half-space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    origin: Point3,
    normal: Vector3,
    d: f64,
}

impl Plane {
    /// Creates a plane from an origin point and a normal vector.
    ///
    /// # Errors
    ///
    /// Returns an error if the normal vector is zero-length.
    pub fn from_origin_normal(origin: Point3, normal: Vector3) -> Result<Self> {
        let len = normal.norm();
        if Tolerance::default().is_zero(len) {
            return Err(GeometryError::ZeroVector.into());
        }
        let normal = normal / len;
        let d = normal.dot(&origin.coords);
        Ok(Self { origin, normal, d })
    }

    /// Creates the plane through three points, with the normal following the
    /// right-hand rule around `a -> b -> c`.
    ///
    /// # Errors
    ///
    /// Returns an error if the points are collinear or coincident.
    pub fn from_points(a: Point3, b: Point3, c: Point3) -> Result<Self> {
        let normal = (b - a).cross(&(c - a));
        if Tolerance::default().is_zero_sq(normal.norm_squared()) {
            return Err(GeometryError::Degenerate("plane points are collinear".into()).into());
        }
        Self::from_origin_normal(a, normal)
    }

    /// Returns the origin point of the plane.
    #[must_use]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// Returns the unit normal of the plane.
    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        &self.normal
    }

    /// Returns the scalar offset `d` with `normal . x = d` on the plane.
    #[must_use]
    pub fn d(&self) -> f64 {
        self.d
    }

    /// Signed distance from a point to the plane; positive on the normal
    /// side.
    #[must_use]
    pub fn signed_distance(&self, p: &Point3) -> f64 {
        self.normal.dot(&p.coords) - self.d
    }

    /// Returns the plane translated by `offset` along its normal.
    #[must_use]
    pub fn offset(&self, offset: f64) -> Self {
        Self {
            origin: self.origin + self.normal * offset,
            normal: self.normal,
            d: self.d + offset,
        }
    }

    /// Returns the plane with its orientation flipped.
    #[must_use]
    pub fn flipped(&self) -> Self {
        Self {
            origin: self.origin,
            normal: -self.normal,
            d: -self.d,
        }
    }

    /// Geometric equality: same supporting plane and same orientation,
    /// within tolerance.
    #[must_use]
    pub fn is_equal(&self, other: &Plane, tol: Tolerance) -> bool {
        tol.is_zero_sq(self.normal.cross(&other.normal).norm_squared())
            && self.normal.dot(&other.normal) > 0.0
            && tol.is_equal_abs(self.d, other.d)
    }
}
