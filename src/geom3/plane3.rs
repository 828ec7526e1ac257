use crate::Result;
use crate::common::angles::Angle;
use crate::common::svd_basis::SvdBasis3;
use crate::errors::{InvalidGeometry, ParsePlaneError};
use crate::geom3::{Iso3, Line3, Point3, Ray3, Rot3, UnitVec3, Vector3};
use itertools::Itertools;
use parry3d_f64::na::{DMatrix, DVector, Matrix3, Unit};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// The smallest positive single-precision value. Used as the default degeneracy tolerance for
/// collinearity detection in construction and for the rank check in plane-plane intersection.
pub const DEGENERACY_TOL: f64 = 1.401298464324817e-45;

/// Tolerance under which two unit directions are considered parallel or perpendicular by the
/// distance queries.
pub const PARALLEL_TOL: f64 = 1.0e-15;

/// Rank cutoff used by `best_fit` to reject point sets without two independent spatial
/// directions.
const FIT_RANK_TOL: f64 = 1.0e-12;

/// An infinite plane in 3D space, stored as the unit normal and the constant `d` of the implicit
/// equation `normal·x + d = 0`.  The plane consists of all points `x` with `normal·x = -d`.
///
/// The type is an immutable value: every transforming operation returns a new `Plane3` (or point,
/// ray, etc.) rather than modifying in place.  The root point and the A, B, C component
/// accessors are computed on demand from the stored pair rather than cached, so there is never a
/// second source of truth.
#[derive(Debug, Clone, Copy)]
pub struct Plane3 {
    pub normal: UnitVec3,
    d: f64,
}

impl Plane3 {
    /// Create a new plane from a unit normal and the signed offset of the plane from the origin,
    /// measured along the normal.  The stored constant is the negation of the offset, so that the
    /// plane satisfies `normal·x + d = 0`.
    ///
    /// # Arguments
    ///
    /// * `normal`: the unit normal of the plane
    /// * `offset`: the signed distance from the origin to the plane along the normal
    ///
    /// returns: Plane3
    ///
    /// # Examples
    ///
    /// ```
    /// use spatial3::{Plane3, Point3, Vector3};
    /// let plane = Plane3::new(Vector3::z_axis(), 5.0);
    /// assert_eq!(plane.d(), -5.0);
    /// assert_eq!(plane.root_point(), Point3::new(0.0, 0.0, 5.0));
    /// ```
    pub fn new(normal: UnitVec3, offset: f64) -> Self {
        Self { normal, d: -offset }
    }

    /// Create a new plane from the raw components of a normal direction and a signed offset from
    /// the origin along that direction.  The direction is normalized before use, so the
    /// components do not need to describe a unit vector.
    pub fn from_components(x: f64, y: f64, z: f64, offset: f64) -> Self {
        Self::new(Unit::new_normalize(Vector3::new(x, y, z)), offset)
    }

    /// Create a new plane passing through three points.  The normal is the normalized cross
    /// product of the two edge vectors out of `p1`, and its orientation follows the right-hand
    /// rule on the point order.
    ///
    /// Fails with `InvalidGeometry::DuplicatePoints` if any pair of the input points is equal,
    /// and with `InvalidGeometry::CollinearPoints` if the points are distinct but (nearly) fall
    /// on a single line.  The duplicate check runs first so the two degeneracies are reported
    /// distinctly.
    ///
    /// # Arguments
    ///
    /// * `p1`:
    /// * `p2`:
    /// * `p3`:
    ///
    /// returns: Result<Plane3, Box<dyn Error, Global>>
    ///
    /// # Examples
    ///
    /// ```
    /// use spatial3::{Plane3, Point3};
    /// let plane = Plane3::from_points(
    ///     &Point3::new(1.0, 0.0, 0.0),
    ///     &Point3::new(0.0, 1.0, 0.0),
    ///     &Point3::new(0.0, 0.0, 1.0),
    /// ).unwrap();
    /// assert!(plane.distance_to_point(&Point3::new(1.0, 0.0, 0.0)) < 1.0e-10);
    /// ```
    pub fn from_points(p1: &Point3, p2: &Point3, p3: &Point3) -> Result<Self> {
        if [p1, p2, p3].iter().tuple_combinations().any(|(a, b)| a == b) {
            return Err(InvalidGeometry::DuplicatePoints.into());
        }

        let cross = (p2 - p1).cross(&(p3 - p1));
        if cross.norm() <= DEGENERACY_TOL {
            return Err(InvalidGeometry::CollinearPoints.into());
        }

        let normal = Unit::new_normalize(cross);
        Ok(Self::new(normal, normal.dot(&p1.coords)))
    }

    /// Compute the least-squares best fitting plane through a set of points using singular value
    /// decomposition, taking the basis direction of smallest dispersion as the normal and placing
    /// the plane through the mean point.
    ///
    /// Fails with `InvalidGeometry::NotEnoughPoints` for fewer than three points, and with
    /// `InvalidGeometry::CollinearPoints` when the set does not span two independent spatial
    /// directions.
    pub fn best_fit(points: &[Point3]) -> Result<Self> {
        if points.len() < 3 {
            return Err(InvalidGeometry::NotEnoughPoints.into());
        }

        let basis = SvdBasis3::from_points(points);
        if basis.rank(FIT_RANK_TOL) < 2 {
            return Err(InvalidGeometry::CollinearPoints.into());
        }

        Ok(Self::from((&basis.smallest(), &basis.center)))
    }

    /// The point on the plane closest to the coordinate origin.  Computed from the stored normal
    /// and constant on every call.
    pub fn root_point(&self) -> Point3 {
        Point3::from(self.normal.into_inner() * -self.d)
    }

    /// The x component of the plane normal
    pub fn a(&self) -> f64 {
        self.normal.x
    }

    /// The y component of the plane normal
    pub fn b(&self) -> f64 {
        self.normal.y
    }

    /// The z component of the plane normal
    pub fn c(&self) -> f64 {
        self.normal.z
    }

    /// The constant term of the implicit equation `normal·x + d = 0`
    pub fn d(&self) -> f64 {
        self.d
    }

    /// Create a new plane which is in the same position as the input plane, but with the normal
    /// direction inverted.
    pub fn inverted_normal(&self) -> Self {
        Self {
            normal: -self.normal,
            d: -self.d,
        }
    }

    /// Measure and return the signed distance from the plane to a point in 3D space. The sign of
    /// the distance indicates whether the point is above or below the plane according to the
    /// plane's normal vector.
    ///
    /// # Arguments
    ///
    /// * `point`:
    ///
    /// returns: f64
    ///
    /// # Examples
    ///
    /// ```
    ///
    /// ```
    pub fn signed_distance_to_point(&self, point: &Point3) -> f64 {
        self.normal.dot(&point.coords) + self.d
    }

    /// Measure and return the distance from the plane to a point in 3D space. The distance is
    /// always positive, and indicates the shortest distance from the point to the plane. If you
    /// need to know whether the point is above or below the plane, use `signed_distance_to_point`.
    pub fn distance_to_point(&self, point: &Point3) -> f64 {
        self.signed_distance_to_point(point).abs()
    }

    /// Measure and return the signed distance from this plane to another, parallel plane, using
    /// this plane's normal for the sign convention.  The distance is measured to the other
    /// plane's root point.
    ///
    /// Fails with `InvalidGeometry::PlanesNotParallel` when the two normals are not parallel
    /// within `PARALLEL_TOL`, since non-parallel planes have no single separating distance.
    pub fn signed_distance_to_plane(&self, other: &Plane3) -> Result<f64> {
        if (1.0 - self.normal.dot(&other.normal).abs()) > PARALLEL_TOL {
            return Err(InvalidGeometry::PlanesNotParallel.into());
        }
        Ok(self.signed_distance_to_point(&other.root_point()))
    }

    /// Measure and return the signed distance from the plane to a ray.  If the ray runs parallel
    /// to the plane (its direction perpendicular to the normal within `PARALLEL_TOL`), this is
    /// the signed distance to the ray's through point; any other ray crosses the plane and is
    /// reported at distance zero.
    pub fn signed_distance_to_ray(&self, ray: &Ray3) -> f64 {
        if self.normal.dot(&ray.direction).abs() < PARALLEL_TOL {
            self.signed_distance_to_point(&ray.point)
        } else {
            0.0
        }
    }

    /// Project a point onto the plane along the plane's own normal, returning the closest point
    /// on the plane to the input point.
    ///
    /// # Arguments
    ///
    /// * `point`:
    ///
    /// returns: OPoint<f64, Const<3>>
    ///
    /// # Examples
    ///
    /// ```
    ///
    /// ```
    pub fn project_point(&self, point: &Point3) -> Point3 {
        point - self.normal.into_inner() * self.signed_distance_to_point(point)
    }

    /// Project a point toward the plane along an arbitrary direction.  The point is displaced by
    /// the direction scaled with the point's signed distance from the plane; when the direction
    /// is the plane normal this is the orthogonal projection, otherwise the displacement is
    /// oblique and the result lands on the plane only insofar as the direction's component along
    /// the normal is unity.
    pub fn project_point_along(&self, point: &Point3, direction: &UnitVec3) -> Point3 {
        point - direction.into_inner() * self.signed_distance_to_point(point)
    }

    /// Project a segment onto the plane by orthogonally projecting both of its endpoints.
    pub fn project_line(&self, line: &Line3) -> Line3 {
        Line3::new(self.project_point(&line.start), self.project_point(&line.end))
    }

    /// Project a segment toward the plane along an arbitrary direction, displacing both
    /// endpoints the way `project_point_along` does.
    pub fn project_line_along(&self, line: &Line3, direction: &UnitVec3) -> Line3 {
        Line3::new(
            self.project_point_along(&line.start, direction),
            self.project_point_along(&line.end, direction),
        )
    }

    /// Project a ray onto the plane by projecting its through point and a second point one unit
    /// along its direction, then re-normalizing the direction between the two projections.
    pub fn project_ray(&self, ray: &Ray3) -> Ray3 {
        let point = self.project_point(&ray.point);
        let ahead = self.project_point(&ray.at_distance(1.0));
        Ray3::new_normalize(point, ahead - point)
    }

    /// Project a ray toward the plane along an arbitrary direction; see `project_ray`.
    pub fn project_ray_along(&self, ray: &Ray3, direction: &UnitVec3) -> Ray3 {
        let point = self.project_point_along(&ray.point, direction);
        let ahead = self.project_point_along(&ray.at_distance(1.0), direction);
        Ray3::new_normalize(point, ahead - point)
    }

    /// Project a free vector onto the plane, treating it as anchored at the global origin.  The
    /// origin and the vector's endpoint are both projected onto the plane, and the result is a
    /// ray rooted at the projected origin pointing toward the projected endpoint.  Because of the
    /// anchoring, the result depends on the plane's position and not only its orientation.
    pub fn project_vector(&self, vector: &Vector3) -> Ray3 {
        let origin = self.project_point(&Point3::origin());
        let tip = self.project_point(&Point3::from(*vector));
        Ray3::new_normalize(origin, tip - origin)
    }

    /// Project a free vector toward the plane along an arbitrary direction; see `project_vector`.
    pub fn project_vector_along(&self, vector: &Vector3, direction: &UnitVec3) -> Ray3 {
        let origin = self.project_point_along(&Point3::origin(), direction);
        let tip = self.project_point_along(&Point3::from(*vector), direction);
        Ray3::new_normalize(origin, tip - origin)
    }

    /// Find the line of intersection between this plane and another.  The two normals are loaded
    /// into a 2x3 matrix which is decomposed by SVD: if the second singular value falls below the
    /// given tolerance the planes are parallel or nearly so, and the operation fails with
    /// `InvalidGeometry::PlanesNearParallel`.  Otherwise the minimum-norm solution of the
    /// two-equation system `[n1; n2]·x = [-d1; -d2]` gives a particular point on the line, and
    /// the null-space direction of the matrix, orthogonal to both normals, gives the line
    /// direction.
    ///
    /// # Arguments
    ///
    /// * `other`: the plane to intersect with
    /// * `tolerance`: the smallest second singular value treated as rank two; `DEGENERACY_TOL`
    ///   restricts the failure to (numerically) exactly parallel planes
    ///
    /// returns: Result<Ray3, Box<dyn Error, Global>>
    ///
    /// # Examples
    ///
    /// ```
    ///
    /// ```
    pub fn intersection_with_plane(&self, other: &Plane3, tolerance: f64) -> Result<Ray3> {
        let matrix = DMatrix::from_row_slice(
            2,
            3,
            &[
                self.a(),
                self.b(),
                self.c(),
                other.a(),
                other.b(),
                other.c(),
            ],
        );
        let rhs = DVector::from_column_slice(&[-self.d, -other.d]);

        let svd = matrix.svd(true, true);
        if svd.singular_values[1] < tolerance {
            return Err(InvalidGeometry::PlanesNearParallel.into());
        }

        let u = svd.u.unwrap();
        let v_t = svd.v_t.unwrap();
        let v0 = Vector3::new(v_t[(0, 0)], v_t[(0, 1)], v_t[(0, 2)]);
        let v1 = Vector3::new(v_t[(1, 0)], v_t[(1, 1)], v_t[(1, 2)]);

        let mut point = Vector3::zeros();
        for (i, v) in [v0, v1].iter().enumerate() {
            point += v * (u.column(i).dot(&rhs) / svd.singular_values[i]);
        }

        // The two right-singular vectors span the normals, so their cross product spans the
        // null space of the matrix and runs along the intersection line.
        let direction = Unit::new_normalize(v0.cross(&v1));
        Ok(Ray3::new(Point3::from(point), direction))
    }

    /// Find the point at which a bounded segment crosses the plane, if it does.
    ///
    /// A segment running parallel to the plane has no single crossing: if its start point
    /// already lies in the plane the whole segment does, and the operation fails with
    /// `InvalidGeometry::LineInPlane`; otherwise the result is `Ok(None)`.  A non-parallel
    /// segment is solved parametrically, and `Ok(None)` is also returned when the crossing
    /// parameter falls outside the segment bounds.
    ///
    /// # Arguments
    ///
    /// * `line`: the segment to intersect with
    /// * `tolerance`: the largest dot product between the segment direction and the normal still
    ///   treated as perpendicular
    ///
    /// returns: Result<Option<OPoint<f64, Const<3>>>, Box<dyn Error, Global>>
    ///
    /// # Examples
    ///
    /// ```
    /// use spatial3::{Line3, Plane3, Point3, Vector3};
    /// use spatial3::geom3::DEGENERACY_TOL;
    /// let plane = Plane3::new(Vector3::z_axis(), 0.0);
    /// let line = Line3::new(Point3::new(0.0, 0.0, -1.0), Point3::new(0.0, 0.0, 1.0));
    /// let hit = plane.intersection_with_line(&line, DEGENERACY_TOL).unwrap();
    /// assert_eq!(hit, Some(Point3::origin()));
    /// ```
    pub fn intersection_with_line(&self, line: &Line3, tolerance: f64) -> Result<Option<Point3>> {
        let delta = line.delta();
        let direction = line.direction();

        if self.normal.dot(&direction).abs() < tolerance {
            // Sliding the start point along the segment's own direction leaves it unchanged
            // exactly when it already sits on the plane.
            return if self.project_point_along(&line.start, &direction) == line.start {
                Err(InvalidGeometry::LineInPlane.into())
            } else {
                Ok(None)
            };
        }

        let t = -self.signed_distance_to_point(&line.start) / self.normal.dot(&delta);
        if !(0.0..=1.0).contains(&t) {
            return Ok(None);
        }

        Ok(Some(line.start + delta * t))
    }

    /// Find the point at which a ray crosses the plane.  The parametric solve is unconditional:
    /// no check is made for a ray running parallel to the plane, and such a ray divides by a
    /// (near-)zero denominator, producing a point with infinite or NaN coordinates.
    ///
    /// # Arguments
    ///
    /// * `ray`:
    ///
    /// returns: OPoint<f64, Const<3>>
    pub fn intersection_with_ray(&self, ray: &Ray3) -> Point3 {
        let t = -self.signed_distance_to_point(&ray.point) / self.normal.dot(&ray.direction);
        ray.at_distance(t)
    }

    /// Find the unique point common to three planes.  The three normals are loaded as the rows
    /// of a 3x3 system which is solved by LU decomposition; when the normals are not linearly
    /// independent no unique point exists and the operation fails with
    /// `InvalidGeometry::NoUniqueIntersection`.
    ///
    /// # Arguments
    ///
    /// * `p1`:
    /// * `p2`:
    /// * `p3`:
    ///
    /// returns: Result<OPoint<f64, Const<3>>, Box<dyn Error, Global>>
    ///
    /// # Examples
    ///
    /// ```
    /// use spatial3::{Plane3, Point3, Vector3};
    /// let a = Plane3::new(Vector3::x_axis(), 1.0);
    /// let b = Plane3::new(Vector3::y_axis(), 2.0);
    /// let c = Plane3::new(Vector3::z_axis(), 3.0);
    /// let p = Plane3::point_from_planes(&a, &b, &c).unwrap();
    /// assert_eq!(p, Point3::new(1.0, 2.0, 3.0));
    /// ```
    pub fn point_from_planes(p1: &Plane3, p2: &Plane3, p3: &Plane3) -> Result<Point3> {
        let matrix = Matrix3::new(
            p1.a(),
            p1.b(),
            p1.c(),
            p2.a(),
            p2.b(),
            p2.c(),
            p3.a(),
            p3.b(),
            p3.c(),
        );
        let rhs = Vector3::new(-p1.d, -p2.d, -p3.d);
        let solution = matrix
            .lu()
            .solve(&rhs)
            .ok_or(InvalidGeometry::NoUniqueIntersection)?;
        Ok(Point3::from(solution))
    }

    /// Reflect a point through the plane.  The mirrored point sits on the opposite side of the
    /// plane at the same distance, along the normal through the original point.
    pub fn mirror_point(&self, point: &Point3) -> Point3 {
        self.project_point(point) - self.normal.into_inner() * self.signed_distance_to_point(point)
    }

    /// Rotate the plane about an axis through the origin.  The root point and the normal are
    /// rotated independently by the same rotation, and the result is reconstructed from the
    /// rotated pair.
    ///
    /// # Arguments
    ///
    /// * `axis`: the rotation axis, passing through the origin
    /// * `angle`: the rotation angle, following the right-hand rule about the axis
    ///
    /// returns: Plane3
    pub fn rotated(&self, axis: &UnitVec3, angle: Angle) -> Self {
        let rot = Rot3::from_axis_angle(axis, angle.radians());
        let root = rot * self.root_point();
        let normal = rot * self.normal;
        Self::from((&normal, &root))
    }

    /// Transform the plane by an isometry
    ///
    /// # Arguments
    ///
    /// * `iso`: The isometry to transform the plane by
    ///
    /// returns: Plane3
    ///
    /// # Examples
    ///
    /// ```
    ///
    /// ```
    pub fn transform_by(&self, iso: &Iso3) -> Self {
        let repr = Ray3::new(self.root_point(), self.normal);
        let moved = repr.transformed(iso);
        Self::from((&moved.direction, &moved.point))
    }
}

impl From<(&UnitVec3, &Point3)> for Plane3 {
    /// Create a Plane3 from a unit normal and a point on the plane, deriving the offset from the
    /// dot product of the two.
    fn from((normal, point): (&UnitVec3, &Point3)) -> Self {
        Self::new(*normal, normal.dot(&point.coords))
    }
}

impl From<(&Point3, &UnitVec3)> for Plane3 {
    fn from((point, normal): (&Point3, &UnitVec3)) -> Self {
        Self::from((normal, point))
    }
}

impl PartialEq for Plane3 {
    /// Two planes are equal when their computed root points and their normals are both equal.
    /// A plane built with the negated normal and correspondingly adjusted constant describes the
    /// same set of points but is NOT equal under this definition.
    fn eq(&self, other: &Self) -> bool {
        self.root_point() == other.root_point() && self.normal == other.normal
    }
}

impl Hash for Plane3 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.a().to_bits().hash(state);
        self.b().to_bits().hash(state);
        self.c().to_bits().hash(state);
        self.d().to_bits().hash(state);
    }
}

impl Display for Plane3 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "A:{:.4} B:{:.4} C:{:.4} D:{:.4}",
            self.a(),
            self.b(),
            self.c(),
            self.d()
        )
    }
}

impl FromStr for Plane3 {
    type Err = ParsePlaneError;

    /// Parse a plane from its labeled textual form, `A:<val> B:<val> C:<val> D:<val>`.  Tokens
    /// may be separated by whitespace, commas, or semicolons, labels are case-insensitive, and a
    /// non-unit (A, B, C) direction is normalized with D rescaled to preserve the same plane.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut values = [0.0; 4];
        let mut seen = [false; 4];

        for token in s
            .split([' ', '\t', ',', ';'])
            .filter(|token| !token.is_empty())
        {
            let (label, value) = token
                .split_once(':')
                .ok_or_else(|| ParsePlaneError::UnrecognizedToken(token.to_string()))?;
            let index = match label.trim() {
                "A" | "a" => 0,
                "B" | "b" => 1,
                "C" | "c" => 2,
                "D" | "d" => 3,
                _ => return Err(ParsePlaneError::UnrecognizedToken(token.to_string())),
            };
            values[index] = value
                .trim()
                .parse()
                .map_err(|_| ParsePlaneError::InvalidNumber(value.to_string()))?;
            seen[index] = true;
        }

        for (flag, label) in seen.iter().zip(['A', 'B', 'C', 'D']) {
            if !flag {
                return Err(ParsePlaneError::MissingComponent(label));
            }
        }

        let direction = Vector3::new(values[0], values[1], values[2]);
        let length = direction.norm();
        if !length.is_normal() {
            return Err(ParsePlaneError::DegenerateNormal);
        }

        // The parsed D is the stored constant of the implicit equation, scaled along with the
        // normalization of the direction; new() takes the negated offset form.
        Ok(Plane3::new(
            Unit::new_normalize(direction),
            -values[3] / length,
        ))
    }
}

impl Serialize for Plane3 {
    /// The serialized form of a plane carries exactly two named fields, `RootPoint` and
    /// `Normal`, each in the serialized form of the underlying entity.
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Plane3", 2)?;
        state.serialize_field("RootPoint", &self.root_point())?;
        state.serialize_field("Normal", &self.normal)?;
        state.end()
    }
}

#[derive(Deserialize)]
struct PlaneRecord {
    #[serde(rename = "RootPoint")]
    root_point: Point3,
    #[serde(rename = "Normal")]
    normal: UnitVec3,
}

impl<'de> Deserialize<'de> for Plane3 {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let record = PlaneRecord::deserialize(deserializer)?;
        Ok(Self::from((&record.normal, &record.root_point)))
    }
}
