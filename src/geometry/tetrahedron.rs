use crate::math::Point3;

/// A tetrahedron in 3D space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tetrahedron {
    a: Point3,
    b: Point3,
    c: Point3,
    d: Point3,
}

impl Tetrahedron {
    /// Creates a new tetrahedron from its four vertices.
    #[must_use]
    pub fn new(a: Point3, b: Point3, c: Point3, d: Point3) -> Self {
        Self { a, b, c, d }
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

    /// Fourth vertex.
    #[must_use]
    pub fn d(&self) -> &Point3 {
        &self.d
    }

    /// The four vertices in order.
    #[must_use]
    pub fn vertices(&self) -> [Point3; 4] {
        [self.a, self.b, self.c, self.d]
    }

    /// Signed volume; positive when `d` lies on the positive side of the
    /// plane through `a`, `b`, `c`.
    #[must_use]
    pub fn signed_volume(&self) -> f64 {
        (self.b - self.a)
            .cross(&(self.c - self.a))
            .dot(&(self.d - self.a))
            / 6.0
    }

    /// Absolute volume.
    #[must_use]
    pub fn volume(&self) -> f64 {
        self.signed_volume().abs()
    }

    /// Circumcenter of the tetrahedron, or `None` when the vertices are
    /// (nearly) coplanar.
    #[must_use]
    pub fn circumcenter(&self) -> Option<Point3> {
        let ab = self.b - self.a;
        let ac = self.c - self.a;
        let ad = self.d - self.a;
        let denom = 2.0 * ab.cross(&ac).dot(&ad);
        if denom.abs() < f64::EPSILON {
            return None;
        }
        let offset = (ad.norm_squared() * ab.cross(&ac)
            + ac.norm_squared() * ad.cross(&ab)
            + ab.norm_squared() * ac.cross(&ad))
            / denom;
        Some(self.a + offset)
    }
}
