//! Polygons and convex-polygon plane clipping.
//!
//! A [`Polygon`] is an ordered loop of 3D points with a lazily computed,
//! cached supporting plane. The cache is dropped on every mutation of the
//! point set. The clipping operator walks the boundary in the
//! Sutherland-Hodgman manner, generalized to 3D with an epsilon ON band, and
//! is reused by the convex trimming routine that shrinks a polygon by
//! offsetting each of its edges.

use log::trace;
use nalgebra::{Point3, Vector3};
use std::cell::Cell;

use super::plane::{Classification, Plane, EPSILON};
use crate::error::{MeshError, Result};

/// An ordered loop of points in 3D space.
///
/// The supporting plane is computed on demand from the point loop (Newell
/// normal) and cached until the point set changes.
#[derive(Debug, Clone, Default)]
pub struct Polygon {
    points: Vec<Point3<f64>>,
    plane_cache: Cell<Option<Plane>>,
}

impl Polygon {
    /// Create an empty polygon.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a polygon from an ordered point loop.
    pub fn from_points<P: Into<Vec<Point3<f64>>>>(points: P) -> Self {
        Self {
            points: points.into(),
            plane_cache: Cell::new(None),
        }
    }

    /// The ordered point loop.
    #[inline]
    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    /// Number of points in the loop.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the loop is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Get one point of the loop.
    #[inline]
    pub fn point(&self, i: usize) -> &Point3<f64> {
        &self.points[i]
    }

    /// Replace the entire point loop.
    pub fn set_points(&mut self, points: Vec<Point3<f64>>) {
        self.points = points;
        self.plane_cache.set(None);
    }

    /// Insert a point at index `i`.
    pub fn add_point(&mut self, i: usize, p: Point3<f64>) {
        self.points.insert(i, p);
        self.plane_cache.set(None);
    }

    /// Remove the point at index `i`.
    pub fn remove_point(&mut self, i: usize) -> Point3<f64> {
        self.plane_cache.set(None);
        self.points.remove(i)
    }

    /// Vertex centroid of the loop.
    pub fn centroid(&self) -> Point3<f64> {
        let mut sum = Vector3::zeros();
        for p in &self.points {
            sum += p.coords;
        }
        Point3::from(sum / self.points.len().max(1) as f64)
    }

    /// Newell normal of the loop (unnormalized cross sum).
    fn newell(&self) -> Vector3<f64> {
        let n = self.points.len();
        let mut sum = Vector3::zeros();
        for i in 0..n {
            let a = &self.points[i];
            let b = &self.points[(i + 1) % n];
            sum += a.coords.cross(&b.coords);
        }
        sum
    }

    /// Area of the (planar) loop.
    pub fn area(&self) -> f64 {
        0.5 * self.newell().norm()
    }

    /// The supporting plane of the loop.
    ///
    /// Fails for loops with fewer than three points or with all points
    /// collinear. The result is cached until the point set changes.
    pub fn plane(&self) -> Result<Plane> {
        if let Some(p) = self.plane_cache.get() {
            return Ok(p);
        }
        if self.points.len() < 3 {
            return Err(MeshError::CollinearPoints);
        }
        let n = self.newell();
        if n.norm() < EPSILON {
            return Err(MeshError::CollinearPoints);
        }
        let plane = Plane::new(self.points[0], n)?;
        self.plane_cache.set(Some(plane));
        Ok(plane)
    }

    /// Axis-aligned bounding box of the loop.
    pub fn bounding_box(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        let first = self.points.first()?;
        let mut min = *first;
        let mut max = *first;
        for p in &self.points {
            for i in 0..3 {
                min[i] = min[i].min(p[i]);
                max[i] = max[i].max(p[i]);
            }
        }
        Some((min, max))
    }

    /// Split the polygon by a plane into a front loop and a back loop.
    ///
    /// Both outputs are ordered and possibly empty. A polygon lying entirely
    /// on one side comes back unchanged on that side; points in the ON band
    /// go to the front loop (and additionally to the back loop where the walk
    /// crosses from the back side).
    pub fn split(&self, plane: &Plane) -> (Polygon, Polygon) {
        let n = self.points.len();
        let mut front = Vec::new();
        let mut back = Vec::new();
        if n == 0 {
            return (Polygon::new(), Polygon::new());
        }

        let mut a = self.points[n - 1];
        let mut a_side = plane.classify(&a);
        for k in 0..n {
            let b = self.points[k];
            let b_side = plane.classify(&b);
            match b_side {
                Classification::Front => {
                    if a_side == Classification::Back {
                        if let Some(i) = plane.intersect_segment(&b, &a) {
                            front.push(i);
                            back.push(i);
                        }
                    }
                    front.push(b);
                }
                Classification::Back => {
                    if a_side == Classification::Front {
                        if let Some(i) = plane.intersect_segment(&a, &b) {
                            front.push(i);
                            back.push(i);
                        }
                    } else if a_side == Classification::On {
                        back.push(a);
                    }
                    back.push(b);
                }
                Classification::On => {
                    front.push(b);
                    if a_side == Classification::Back {
                        back.push(b);
                    }
                }
            }
            a = b;
            a_side = b_side;
        }

        trace!(
            "polygon split: {} points -> front {}, back {}",
            n,
            front.len(),
            back.len()
        );
        (Polygon::from_points(front), Polygon::from_points(back))
    }

    /// Split with a bounding-box pre-test.
    ///
    /// When the polygon's axis-aligned bounding box does not straddle the
    /// plane the per-edge walk is skipped and the whole loop is classified by
    /// its first non-ON vertex; an all-ON loop defaults to the front side.
    pub fn split_with_pretest(&self, plane: &Plane) -> (Polygon, Polygon) {
        let straddles = match self.bounding_box() {
            Some((min, max)) => {
                let center = (min.coords + max.coords) * 0.5;
                let half = (max.coords - min.coords) * 0.5;
                let n = plane.normal();
                let radius = half.x * n.x.abs() + half.y * n.y.abs() + half.z * n.z.abs();
                (n.dot(&center) - plane.d()).abs() <= radius + EPSILON
            }
            None => false,
        };
        if straddles {
            return self.split(plane);
        }

        let side = self
            .points
            .iter()
            .map(|p| plane.classify(p))
            .find(|&c| c != Classification::On)
            .unwrap_or(Classification::Front);
        match side {
            Classification::Back => (Polygon::new(), self.clone()),
            _ => (self.clone(), Polygon::new()),
        }
    }

    /// Trim a convex polygon by offsetting every edge by the same distance.
    ///
    /// Positive distances move the cutting planes inward (the polygon
    /// shrinks); negative distances grow it. See
    /// [`trim_convex_per_edge`](Self::trim_convex_per_edge).
    pub fn trim_convex(&mut self, d: f64) -> Result<()> {
        let ds = vec![d; self.points.len()];
        self.trim_convex_per_edge(&ds)
    }

    /// Trim a convex polygon with one offset distance per edge.
    ///
    /// For each edge of the original loop a cutting plane is built through
    /// the edge midpoint, offset by `d[j]` along the edge's in-plane
    /// perpendicular (`j` is the index of the edge's trailing vertex), and
    /// the polygon is re-split against it, keeping the front loop each pass.
    /// Bounded by the edge count of the original loop.
    pub fn trim_convex_per_edge(&mut self, d: &[f64]) -> Result<()> {
        let snapshot = self.points.clone();
        let n = snapshot.len();
        if d.len() != n {
            return Err(MeshError::invalid_param(
                "d",
                d.len(),
                "one offset distance per polygon edge",
            ));
        }
        let plane = self.plane()?;

        let mut j = n.saturating_sub(1);
        for i in 0..n {
            let p1 = snapshot[i];
            let p2 = snapshot[j];
            let mut v = p2 - p1;
            let len = v.norm();
            if len < EPSILON {
                j = i;
                continue;
            }
            v /= len;
            // Edge normal is perpendicular to both the edge and the plane
            // normal; for a counter-clockwise loop it points into the polygon.
            let normal = v.cross(&plane.normal());
            let origin = Point3::from((p1.coords + p2.coords) * 0.5 + normal * d[j]);
            let cut = Plane::new(origin, normal)?;
            let (front, _back) = self.split(&cut);
            self.set_points(front.points);
            j = i;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_square() -> Polygon {
        Polygon::from_points(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ])
    }

    #[test]
    fn split_unit_square_down_the_middle() {
        let square = unit_square();
        let plane = Plane::new(Point3::new(0.5, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0)).unwrap();
        let (front, back) = square.split(&plane);

        assert_eq!(front.len(), 4);
        assert_eq!(back.len(), 4);
        assert_relative_eq!(front.area(), 0.5, epsilon = 1e-12);
        assert_relative_eq!(back.area(), 0.5, epsilon = 1e-12);

        for p in front.points() {
            assert!(p.x >= 0.5 - 1e-12);
        }
        for p in back.points() {
            assert!(p.x <= 0.5 + 1e-12);
        }
    }

    #[test]
    fn split_conserves_area() {
        let square = unit_square();
        let plane =
            Plane::new(Point3::new(0.3, 0.1, 0.0), Vector3::new(1.0, 2.0, 0.0)).unwrap();
        let (front, back) = square.split(&plane);
        assert_relative_eq!(front.area() + back.area(), square.area(), epsilon = 1e-9);
    }

    #[test]
    fn split_polygon_entirely_in_front() {
        let square = unit_square();
        let plane = Plane::new(Point3::new(-1.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0)).unwrap();
        let (front, back) = square.split(&plane);
        assert_eq!(front.len(), 4);
        assert!(back.is_empty());
        assert_relative_eq!(front.area(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn split_polygon_entirely_behind() {
        let square = unit_square();
        let plane = Plane::new(Point3::new(2.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0)).unwrap();
        let (front, back) = square.split(&plane);
        assert!(front.is_empty());
        assert_eq!(back.len(), 4);
    }

    #[test]
    fn split_with_vertex_on_plane() {
        // Triangle with one vertex exactly on the cutting plane.
        let tri = Polygon::from_points(vec![
            Point3::new(0.5, 1.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
        ]);
        let plane = Plane::new(Point3::new(0.5, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0)).unwrap();
        let (front, back) = tri.split(&plane);
        assert_relative_eq!(front.area() + back.area(), tri.area(), epsilon = 1e-9);
        // The apex lies on the plane and is emitted to both sides.
        assert!(front
            .points()
            .iter()
            .any(|p| (p - Point3::new(0.5, 1.0, 0.0)).norm() < 1e-9));
        assert!(back
            .points()
            .iter()
            .any(|p| (p - Point3::new(0.5, 1.0, 0.0)).norm() < 1e-9));
    }

    #[test]
    fn pretest_skips_walk_for_one_sided_polygon() {
        let square = unit_square();
        let plane = Plane::new(Point3::new(5.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0)).unwrap();
        let (front, back) = square.split_with_pretest(&plane);
        assert!(front.is_empty());
        assert_eq!(back.len(), 4);

        let (front, back) = square.split_with_pretest(&plane.flipped());
        assert_eq!(front.len(), 4);
        assert!(back.is_empty());
    }

    #[test]
    fn pretest_all_on_defaults_to_front() {
        let square = unit_square();
        let plane = Plane::new(Point3::origin(), Vector3::new(0.0, 0.0, 1.0)).unwrap();
        let (front, back) = square.split_with_pretest(&plane);
        assert_eq!(front.len(), 4);
        assert!(back.is_empty());
    }

    #[test]
    fn pretest_matches_full_walk_when_straddling() {
        let square = unit_square();
        let plane = Plane::new(Point3::new(0.5, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0)).unwrap();
        let (f1, b1) = square.split(&plane);
        let (f2, b2) = square.split_with_pretest(&plane);
        assert_eq!(f1.len(), f2.len());
        assert_eq!(b1.len(), b2.len());
    }

    #[test]
    fn trim_convex_shrinks_square() {
        let mut square = unit_square();
        square.trim_convex(0.25).unwrap();
        assert_eq!(square.len(), 4);
        assert_relative_eq!(square.area(), 0.25, epsilon = 1e-9);
        for p in square.points() {
            assert!(p.x >= 0.25 - 1e-9 && p.x <= 0.75 + 1e-9);
            assert!(p.y >= 0.25 - 1e-9 && p.y <= 0.75 + 1e-9);
        }
    }

    #[test]
    fn trim_convex_too_far_empties_polygon() {
        let mut square = unit_square();
        square.trim_convex(0.75).unwrap();
        assert!(square.area() < 1e-9);
    }

    #[test]
    fn trim_convex_per_edge_distances() {
        let mut square = unit_square();
        // Only shrink across one cutting plane, leave the others in place.
        let mut d = vec![0.0; 4];
        d[0] = 0.5;
        square.trim_convex_per_edge(&d).unwrap();
        assert_relative_eq!(square.area(), 0.5, epsilon = 1e-9);
    }

    #[test]
    fn plane_cache_invalidated_on_mutation() {
        let mut square = unit_square();
        let before = square.plane().unwrap();
        assert_relative_eq!(before.normal().z.abs(), 1.0, epsilon = 1e-12);

        // Rotate the loop into the XZ plane; the cached plane must not leak.
        square.set_points(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(0.0, 0.0, 1.0),
        ]);
        let after = square.plane().unwrap();
        assert_relative_eq!(after.normal().y.abs(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn add_and_remove_point() {
        let mut square = unit_square();
        square.add_point(1, Point3::new(0.5, 0.0, 0.0));
        assert_eq!(square.len(), 5);
        assert_relative_eq!(square.area(), 1.0, epsilon = 1e-12);
        let removed = square.remove_point(1);
        assert_relative_eq!(removed.x, 0.5, epsilon = 1e-12);
        assert_eq!(square.len(), 4);
    }

    #[test]
    fn degenerate_polygon_has_no_plane() {
        let line = Polygon::from_points(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ]);
        assert!(line.plane().is_err());
        assert!(Polygon::new().plane().is_err());
    }
}
