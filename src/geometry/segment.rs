use crate::math::{Point3, Vector3};

/// A bounded line segment between two points.
///
/// The parametric form is: `P(t) = origin + t * (end - origin)` with
/// `t` in `[0, 1]`. Zero-length segments are legal; the kernel routes them
/// to point-vs-primitive branches instead of rejecting them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    origin: Point3,
    end: Point3,
}

impl Segment {
    /// Creates a new segment between two points.
    #[must_use]
    pub fn new(origin: Point3, end: Point3) -> Self {
        Self { origin, end }
    }

    /// Returns the start point of the segment.
    #[must_use]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// Returns the end point of the segment.
    #[must_use]
    pub fn end(&self) -> &Point3 {
        &self.end
    }

    /// Returns the un-normalized displacement `end - origin`.
    #[must_use]
    pub fn delta(&self) -> Vector3 {
        self.end - self.origin
    }

    /// Returns the normalized direction, or the zero vector for a degenerate
    /// segment.
    #[must_use]
    pub fn direction(&self) -> Vector3 {
        let d = self.delta();
        let len = d.norm();
        if len == 0.0 {
            Vector3::zeros()
        } else {
            d / len
        }
    }

    /// Returns the length of the segment.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.delta().norm()
    }

    /// Returns the squared length of the segment.
    #[must_use]
    pub fn sq_length(&self) -> f64 {
        self.delta().norm_squared()
    }

    /// Evaluates the segment at parameter `t` in `[0, 1]`.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point3 {
        self.origin + self.delta() * t
    }

    /// Midpoint of the segment.
    #[must_use]
    pub fn midpoint(&self) -> Point3 {
        self.point_at(0.5)
    }

    /// Returns the segment with its endpoints swapped.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            origin: self.end,
            end: self.origin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parametric_evaluation() {
        let s = Segment::new(Point3::origin(), Point3::new(2.0, 0.0, 0.0));
        assert!((s.point_at(0.5).x - 1.0).abs() < 1e-12);
        assert!((s.length() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn degenerate_segment_has_zero_direction() {
        let p = Point3::new(1.0, 2.0, 3.0);
        let s = Segment::new(p, p);
        assert_eq!(s.direction(), Vector3::zeros());
        assert_eq!(s.length(), 0.0);
    }
}
