use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3};

use super::Plane;

/// An axis-aligned bounding box.
///
/// Invariant: `min[i] <= max[i]` for every axis, enforced at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    min: Point3,
    max: Point3,
}

impl Aabb {
    /// Creates a box from its minimum and maximum corners.
    ///
    /// # Errors
    ///
    /// Returns an error if `min` exceeds `max` on any axis.
    pub fn new(min: Point3, max: Point3) -> Result<Self> {
        for i in 0..3 {
            if min[i] > max[i] {
                return Err(GeometryError::InvalidInterval {
                    lower: min[i],
                    upper: max[i],
                }
                .into());
            }
        }
        Ok(Self { min, max })
    }

    /// The tight box around a set of points. Empty input yields a degenerate
    /// box at the origin.
    #[must_use]
    pub fn from_points(points: &[Point3]) -> Self {
        let Some(first) = points.first() else {
            return Self {
                min: Point3::origin(),
                max: Point3::origin(),
            };
        };
        let mut min = *first;
        let mut max = *first;
        for p in &points[1..] {
            for i in 0..3 {
                min[i] = min[i].min(p[i]);
                max[i] = max[i].max(p[i]);
            }
        }
        Self { min, max }
    }

    /// Minimum corner.
    #[must_use]
    pub fn min(&self) -> &Point3 {
        &self.min
    }

    /// Maximum corner.
    #[must_use]
    pub fn max(&self) -> &Point3 {
        &self.max
    }

    /// Center of the box.
    #[must_use]
    pub fn center(&self) -> Point3 {
        Point3::from((self.min.coords + self.max.coords) * 0.5)
    }

    /// Half-extent along each axis.
    #[must_use]
    pub fn half_extents(&self) -> Vector3 {
        (self.max - self.min) * 0.5
    }

    /// The eight corners, minimum corner first, x varying fastest.
    #[must_use]
    pub fn corners(&self) -> [Point3; 8] {
        let (n, x) = (self.min, self.max);
        [
            Point3::new(n.x, n.y, n.z),
            Point3::new(x.x, n.y, n.z),
            Point3::new(n.x, x.y, n.z),
            Point3::new(x.x, x.y, n.z),
            Point3::new(n.x, n.y, x.z),
            Point3::new(x.x, n.y, x.z),
            Point3::new(n.x, x.y, x.z),
            Point3::new(x.x, x.y, x.z),
        ]
    }

    /// Whether the point lies inside the box or on its boundary.
    #[must_use]
    pub fn contains_point(&self, p: &Point3) -> bool {
        (0..3).all(|i| p[i] >= self.min[i] && p[i] <= self.max[i])
    }

    /// Whether `other` lies entirely inside this box.
    #[must_use]
    pub fn contains_aabb(&self, other: &Aabb) -> bool {
        self.contains_point(&other.min) && self.contains_point(&other.max)
    }

    /// The smallest box containing both.
    #[must_use]
    pub fn union(&self, other: &Aabb) -> Self {
        let mut min = self.min;
        let mut max = self.max;
        for i in 0..3 {
            min[i] = min[i].min(other.min[i]);
            max[i] = max[i].max(other.max[i]);
        }
        Self { min, max }
    }

    /// The six face planes with normals pointing into the box interior, in
    /// the order -x, +x, -y, +y, -z, +z. This is the orientation the clipper
    /// consumes: points inside the box classify as front.
    #[must_use]
    pub fn face_planes(&self) -> [Plane; 6] {
        let planes: [(Point3, Vector3); 6] = [
            (self.min, Vector3::x()),
            (self.max, -Vector3::x()),
            (self.min, Vector3::y()),
            (self.max, -Vector3::y()),
            (self.min, Vector3::z()),
            (self.max, -Vector3::z()),
        ];
        // Unit axis normals cannot fail construction.
        planes.map(|(origin, normal)| {
            Plane::from_origin_normal(origin, normal)
                .unwrap_or_else(|_| unreachable!("axis normal is unit length"))
        })
    }
}
