mod line3;
mod plane3;
mod ray3;

pub use line3::Line3;
pub use plane3::{DEGENERACY_TOL, PARALLEL_TOL, Plane3};
pub use ray3::Ray3;

pub type Point3 = parry3d_f64::na::Point3<f64>;
pub type Vector3 = parry3d_f64::na::Vector3<f64>;
pub type UnitVec3 = parry3d_f64::na::Unit<Vector3>;
pub type Iso3 = parry3d_f64::na::Isometry3<f64>;
pub type Rot3 = parry3d_f64::na::UnitQuaternion<f64>;
