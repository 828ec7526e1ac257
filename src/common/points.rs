//! Common operations on f64 points in 3D space.

use crate::geom3::{Point3, Vector3};

/// Returns the distance between two points.
///
/// # Arguments
///
/// * `a`: the first point
/// * `b`: the second point
///
/// returns: f64
///
/// # Examples
///
/// ```
/// use spatial3::common::points::dist;
/// use spatial3::Point3;
/// let a = Point3::new(1.0, 2.0, 0.0);
/// let b = Point3::new(3.0, 2.0, 0.0);
/// let d = dist(&a, &b);
/// assert_eq!(d, 2.0);
/// ```
pub fn dist(a: &Point3, b: &Point3) -> f64 {
    (a - b).norm()
}

/// Returns the midpoint between two points.
pub fn mid_point(a: &Point3, b: &Point3) -> Point3 {
    b + (a - b) * 0.5
}

/// Returns the mean point of a set of points.  The mean is found by summing the coordinates of
/// all points and dividing by the number of points.  There is no weighting of the points in this
/// calculation.
///
/// # Arguments
///
/// * `points`: a slice of points to compute the mean of
///
/// returns: Point3
///
/// # Examples
///
/// ```
/// use spatial3::common::points::mean_point;
/// use spatial3::Point3;
/// let points = vec![Point3::new(1.0, 2.0, 0.0), Point3::new(3.0, 4.0, 2.0)];
/// let mean = mean_point(&points);
/// assert_eq!(mean, Point3::new(2.0, 3.0, 1.0));
/// ```
pub fn mean_point(points: &[Point3]) -> Point3 {
    let mut sum = Vector3::zeros();
    for p in points {
        sum += p.coords;
    }
    Point3::from(sum / points.len() as f64)
}
