//! This module contains common constructs for working with rotation angles

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::ops;

/// An opaque rotation angle. Internally the value is kept in radians; the
/// constructors and accessors convert to and from degrees so that calling code
/// never has to remember which unit a bare `f64` was in.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Angle(f64);

impl Angle {
    pub const ZERO: Angle = Angle(0.0);

    pub fn from_radians(radians: f64) -> Self {
        Self(radians)
    }

    pub fn from_degrees(degrees: f64) -> Self {
        Self(degrees.to_radians())
    }

    pub fn radians(&self) -> f64 {
        self.0
    }

    pub fn degrees(&self) -> f64 {
        self.0.to_degrees()
    }

    /// Re-expresses the angle in the range [0, 2pi].
    pub fn normalized_to_2pi(&self) -> Self {
        Self(angle_to_2pi(self.0))
    }
}

impl ops::Neg for Angle {
    type Output = Angle;

    fn neg(self) -> Self::Output {
        Angle(-self.0)
    }
}

impl ops::Add for Angle {
    type Output = Angle;

    fn add(self, rhs: Self) -> Self::Output {
        Angle(self.0 + rhs.0)
    }
}

impl ops::Sub for Angle {
    type Output = Angle;

    fn sub(self, rhs: Self) -> Self::Output {
        Angle(self.0 - rhs.0)
    }
}

impl ops::Mul<f64> for Angle {
    type Output = Angle;

    fn mul(self, rhs: f64) -> Self::Output {
        Angle(self.0 * rhs)
    }
}

/// Re-expresses an angle, specified in radians, in the range [0, 2pi].  If the angle was already
/// in the range [0, 2pi], it is returned unchanged.
///
/// # Arguments
///
/// * `angle`: The angle to re-express, in radians
///
/// returns: f64
///
/// # Examples
///
/// ```
/// use spatial3::common::angle_to_2pi;
/// use std::f64::consts::PI;
/// use approx::assert_relative_eq;
/// let new_angle = angle_to_2pi(-PI);
/// assert_relative_eq!(new_angle, PI, epsilon = 1.0e-10);
/// ```
pub fn angle_to_2pi(angle: f64) -> f64 {
    let mut angle = angle % (2.0 * PI);
    if angle < 0.0 {
        angle += 2.0 * PI;
    }
    angle
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use test_case::test_case;

    #[test_case(0.0, 0.0)]
    #[test_case(-PI, PI)]
    #[test_case(3.0 * PI, PI)]
    #[test_case(PI / 2.0, PI / 2.0)]
    fn test_angle_to_2pi(angle: f64, expected: f64) {
        assert_relative_eq!(angle_to_2pi(angle), expected, epsilon = 1.0e-10);
    }

    #[test]
    fn test_degree_radian_conversion() {
        let a = Angle::from_degrees(180.0);
        assert_relative_eq!(a.radians(), PI);
        assert_relative_eq!(a.degrees(), 180.0);
    }

    #[test]
    fn test_angle_arithmetic() {
        let a = Angle::from_degrees(90.0);
        let b = Angle::from_degrees(45.0);
        assert_relative_eq!((a + b).degrees(), 135.0, epsilon = 1.0e-10);
        assert_relative_eq!((a - b).degrees(), 45.0, epsilon = 1.0e-10);
        assert_relative_eq!((-a).degrees(), -90.0, epsilon = 1.0e-10);
        assert_relative_eq!((b * 2.0).degrees(), 90.0, epsilon = 1.0e-10);
    }

    #[test]
    fn test_normalized_to_2pi() {
        let a = Angle::from_degrees(-90.0).normalized_to_2pi();
        assert_relative_eq!(a.degrees(), 270.0, epsilon = 1.0e-10);
    }
}
