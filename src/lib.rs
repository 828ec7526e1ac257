//! Analytic geometry primitives for 3D Euclidean space, built around an
//! immutable [`Plane3`] value type: construction from points, normals, and
//! offset components, metric queries, projections, intersections with
//! lines, rays, and other planes, reflection, and rigid rotation.

use std::error::Error;

pub mod common;
pub mod errors;
pub mod geom3;

pub type Result<T> = std::result::Result<T, Box<dyn Error>>;

pub use common::angles::Angle;
pub use geom3::{Iso3, Line3, Plane3, Point3, Ray3, Rot3, UnitVec3, Vector3};
