use crate::common::points::{dist, mid_point};
use crate::geom3::{Iso3, Point3, UnitVec3, Vector3};
use serde::{Deserialize, Serialize};

/// A bounded segment in 3D space running from a start point to an end point. Unlike [`Ray3`],
/// which is infinite, a `Line3` has finite extent, and intersection queries against it respect
/// the segment bounds.
///
/// [`Ray3`]: crate::geom3::Ray3
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line3 {
    pub start: Point3,
    pub end: Point3,
}

impl Line3 {
    pub fn new(start: Point3, end: Point3) -> Self {
        Self { start, end }
    }

    /// The un-normalized vector from the start point to the end point
    pub fn delta(&self) -> Vector3 {
        self.end - self.start
    }

    /// The unit direction from the start point toward the end point
    pub fn direction(&self) -> UnitVec3 {
        UnitVec3::new_normalize(self.delta())
    }

    pub fn length(&self) -> f64 {
        dist(&self.start, &self.end)
    }

    pub fn midpoint(&self) -> Point3 {
        mid_point(&self.start, &self.end)
    }

    /// Returns the point at the given fraction of the way from the start point to the end point.
    /// A fraction of 0.0 is the start point and 1.0 is the end point; values outside [0, 1]
    /// extrapolate beyond the segment.
    pub fn at_fraction(&self, fraction: f64) -> Point3 {
        self.start + self.delta() * fraction
    }

    /// Returns a new segment transformed by the given isometry
    pub fn transformed(&self, t: &Iso3) -> Self {
        Self::new(t * self.start, t * self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn delta_length_and_direction() {
        let line = Line3::new(Point3::new(1.0, 0.0, 0.0), Point3::new(1.0, 0.0, 3.0));
        assert_eq!(line.delta(), Vector3::new(0.0, 0.0, 3.0));
        assert_relative_eq!(line.length(), 3.0);
        assert_relative_eq!(line.direction().z, 1.0);
    }

    #[test]
    fn at_fraction_interpolates_and_extrapolates() {
        let line = Line3::new(Point3::origin(), Point3::new(2.0, 0.0, 0.0));
        assert_eq!(line.at_fraction(0.0), line.start);
        assert_eq!(line.at_fraction(1.0), line.end);
        assert_eq!(line.at_fraction(0.25), Point3::new(0.5, 0.0, 0.0));
        assert_eq!(line.at_fraction(1.5), Point3::new(3.0, 0.0, 0.0));
    }

    #[test]
    fn midpoint_is_halfway() {
        let line = Line3::new(Point3::new(0.0, 2.0, 0.0), Point3::new(4.0, 0.0, 0.0));
        assert_eq!(line.midpoint(), Point3::new(2.0, 1.0, 0.0));
    }

    #[test]
    fn transformed_moves_both_ends() {
        let line = Line3::new(Point3::origin(), Point3::new(1.0, 0.0, 0.0));
        let t = Iso3::translation(0.0, 5.0, 0.0);
        let moved = line.transformed(&t);
        assert_eq!(moved.start, Point3::new(0.0, 5.0, 0.0));
        assert_eq!(moved.end, Point3::new(1.0, 5.0, 0.0));
    }
}
