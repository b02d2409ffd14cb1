//! Planes and point-vs-plane predicates.
//!
//! Planes are stored in `normal · p = d` form with a unit normal. All
//! classification is epsilon-banded: points within [`EPSILON`] of the plane
//! count as on it. Near-parallel segment intersections return `None` rather
//! than an error; these are expected in general position.

use nalgebra::{Point3, Vector3};

use crate::error::{MeshError, Result};

/// Distance band within which a point counts as lying on a plane.
pub const EPSILON: f64 = 1e-9;

/// Which side of a plane a point lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Positive side of the normal.
    Front,
    /// Negative side of the normal.
    Back,
    /// Within the epsilon band of the plane.
    On,
}

/// An oriented plane in 3D space, represented as `normal · p = d` with a
/// unit-length normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    normal: Vector3<f64>,
    d: f64,
}

impl Plane {
    /// Create a plane through `origin` with the given normal direction.
    ///
    /// The normal is normalized; a zero-length normal is a construction
    /// failure.
    pub fn new(origin: Point3<f64>, normal: Vector3<f64>) -> Result<Self> {
        let len = normal.norm();
        if len < EPSILON {
            return Err(MeshError::DegenerateNormal);
        }
        let unit = normal / len;
        Ok(Self {
            normal: unit,
            d: unit.dot(&origin.coords),
        })
    }

    /// Create a plane through three points.
    ///
    /// The normal follows the right-hand rule: `(b - a) × (c - a)`.
    /// Collinear points are a construction failure.
    pub fn from_points(a: Point3<f64>, b: Point3<f64>, c: Point3<f64>) -> Result<Self> {
        let n = (b - a).cross(&(c - a));
        if n.norm() < EPSILON {
            return Err(MeshError::CollinearPoints);
        }
        Self::new(a, n)
    }

    /// The unit normal of the plane.
    #[inline]
    pub fn normal(&self) -> Vector3<f64> {
        self.normal
    }

    /// The signed offset of the plane from the origin along its normal.
    #[inline]
    pub fn d(&self) -> f64 {
        self.d
    }

    /// Signed distance from a point to the plane. Positive in front,
    /// negative behind.
    #[inline]
    pub fn signed_distance(&self, p: &Point3<f64>) -> f64 {
        self.normal.dot(&p.coords) - self.d
    }

    /// Classify a point against the plane using the default epsilon band.
    #[inline]
    pub fn classify(&self, p: &Point3<f64>) -> Classification {
        self.classify_with_epsilon(p, EPSILON)
    }

    /// Classify a point against the plane with a custom epsilon band.
    pub fn classify_with_epsilon(&self, p: &Point3<f64>, epsilon: f64) -> Classification {
        let dist = self.signed_distance(p);
        if dist > epsilon {
            Classification::Front
        } else if dist < -epsilon {
            Classification::Back
        } else {
            Classification::On
        }
    }

    /// Orthogonal projection of a point onto the plane.
    #[inline]
    pub fn closest_point(&self, p: &Point3<f64>) -> Point3<f64> {
        p - self.normal * self.signed_distance(p)
    }

    /// Intersect the segment `a -> b` with the plane.
    ///
    /// Returns `None` when the segment is near-parallel to the plane or the
    /// intersection falls outside the segment.
    pub fn intersect_segment(&self, a: &Point3<f64>, b: &Point3<f64>) -> Option<Point3<f64>> {
        let dir = b - a;
        let denom = self.normal.dot(&dir);
        if denom.abs() < EPSILON {
            return None;
        }
        let t = (self.d - self.normal.dot(&a.coords)) / denom;
        if !(0.0..=1.0).contains(&t) {
            return None;
        }
        Some(a + dir * t)
    }

    /// Same oriented plane within epsilon, in both normal and offset.
    pub fn approx_eq(&self, other: &Plane) -> bool {
        (self.normal - other.normal).norm() < EPSILON && (self.d - other.d).abs() < EPSILON
    }

    /// The plane with its orientation reversed.
    #[inline]
    pub fn flipped(&self) -> Self {
        Self {
            normal: -self.normal,
            d: -self.d,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn classify_around_plane() {
        let p = Plane::new(Point3::new(0.5, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0)).unwrap();
        assert_eq!(p.classify(&Point3::new(1.0, 2.0, 3.0)), Classification::Front);
        assert_eq!(p.classify(&Point3::new(0.0, -1.0, 0.0)), Classification::Back);
        assert_eq!(p.classify(&Point3::new(0.5, 9.0, -4.0)), Classification::On);
    }

    #[test]
    fn normal_is_normalized() {
        let p = Plane::new(Point3::origin(), Vector3::new(0.0, 0.0, 10.0)).unwrap();
        assert_relative_eq!(p.normal().norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(p.signed_distance(&Point3::new(0.0, 0.0, 2.0)), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn zero_normal_is_an_error() {
        assert!(Plane::new(Point3::origin(), Vector3::zeros()).is_err());
    }

    #[test]
    fn collinear_points_are_an_error() {
        let r = Plane::from_points(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(2.0, 2.0, 2.0),
        );
        assert!(r.is_err());
    }

    #[test]
    fn segment_intersection() {
        let p = Plane::new(Point3::new(0.0, 0.0, 1.0), Vector3::new(0.0, 0.0, 1.0)).unwrap();
        let hit = p
            .intersect_segment(&Point3::new(0.0, 0.0, 0.0), &Point3::new(0.0, 0.0, 2.0))
            .unwrap();
        assert_relative_eq!(hit.z, 1.0, epsilon = 1e-12);

        // Parallel segment: no intersection.
        assert!(p
            .intersect_segment(&Point3::new(0.0, 0.0, 0.0), &Point3::new(1.0, 0.0, 0.0))
            .is_none());

        // Segment ends before the plane: no intersection.
        assert!(p
            .intersect_segment(&Point3::new(0.0, 0.0, 0.0), &Point3::new(0.0, 0.0, 0.5))
            .is_none());
    }

    #[test]
    fn projection_lands_on_plane() {
        let p = Plane::from_points(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        )
        .unwrap();
        let q = p.closest_point(&Point3::new(0.3, 0.4, 5.0));
        assert_eq!(p.classify(&q), Classification::On);
        assert_relative_eq!(q.x, 0.3, epsilon = 1e-12);
        assert_relative_eq!(q.y, 0.4, epsilon = 1e-12);
    }

    #[test]
    fn plane_equality_dedup() {
        let a = Plane::new(Point3::new(0.0, 0.0, 1.0), Vector3::new(0.0, 0.0, 2.0)).unwrap();
        let b = Plane::from_points(
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(0.0, 1.0, 1.0),
        )
        .unwrap();
        assert!(a.approx_eq(&b));
        assert!(!a.approx_eq(&a.flipped()));
    }
}
