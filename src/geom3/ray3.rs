use crate::common::angles::Angle;
use crate::geom3::{Iso3, Point3, Rot3, UnitVec3, Vector3};
use serde::{Deserialize, Serialize};

/// A `Ray3` is an infinite directed line in 3D space, represented by a through point and a unit
/// direction vector. Mathematically it is identical to a parameterized line, with the through
/// point at parameter zero and the parameter measuring signed distance along the direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray3 {
    pub point: Point3,
    pub direction: UnitVec3,
}

impl Ray3 {
    pub fn new(point: Point3, direction: UnitVec3) -> Self {
        Self { point, direction }
    }

    pub fn new_normalize(point: Point3, direction: Vector3) -> Self {
        Self::new(point, UnitVec3::new_normalize(direction))
    }

    /// Returns the point offset from the through point by the given signed distance along the
    /// direction
    pub fn at_distance(&self, distance: f64) -> Point3 {
        self.point + self.direction.as_ref() * distance
    }

    /// Returns the scalar projection value of another point onto this ray. This can be
    /// interpreted as the signed distance along the ray at which the other point sits when
    /// dropped perpendicularly onto it.
    pub fn scalar_projection(&self, other: &Point3) -> f64 {
        self.direction.dot(&(other - self.point))
    }

    /// Returns the point on the ray that is closest to the other point, aka the projection of the
    /// other point onto the ray.
    pub fn projection(&self, other: &Point3) -> Point3 {
        self.at_distance(self.scalar_projection(other))
    }

    /// Returns a new ray with the same through point but with the direction reversed
    pub fn reversed(&self) -> Self {
        Self::new(self.point, -self.direction)
    }

    /// Returns a new ray transformed by the given isometry
    pub fn transformed(&self, t: &Iso3) -> Self {
        Self::new(t * self.point, t * self.direction)
    }

    /// Returns a new ray rotated about the given axis (through the origin) by the given angle.
    pub fn rotated(&self, axis: &UnitVec3, angle: Angle) -> Self {
        let rot = Rot3::from_axis_angle(axis, angle.radians());
        Self::new(rot * self.point, rot * self.direction)
    }
}
