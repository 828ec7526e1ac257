use super::points::mean_point;
use crate::geom3::{Point3, UnitVec3, Vector3};
use parry3d_f64::na::{DMatrix, Unit};

/// This structure contains the results of using singular value decomposition to determine the
/// basis vectors of a set of points in 3D space and their singular values (scales). This can be
/// used to roughly estimate if a set of points falls along a point, line, or plane.
#[derive(Debug)]
pub struct SvdBasis3 {
    /// The resultant basis vectors, sorted by their corresponding singular values so that the
    /// first vector is the most significant. These are given as unit vectors.
    pub basis: [Vector3; 3],

    /// The raw singular values associated with each basis vector. The singular values are the
    /// square root of the eigenvalues of the covariance matrix of the point set.  By squaring them
    /// and dividing by the number of points used to compute the basis, the variance accounted for
    /// by each basis vector can be determined.
    pub sv: [f64; 3],

    /// The center of the original point set used to compute the basis. The SVD was computed by
    /// calculating this center (mean point) and then subtracting it from each point in the set.
    /// The basis vectors represent vectors relative to this center as their origin.
    pub center: Point3,

    /// The number of points used to compute the basis
    pub n: usize,
}

impl SvdBasis3 {
    pub fn largest(&self) -> UnitVec3 {
        Unit::new_unchecked(self.basis[0])
    }

    pub fn smallest(&self) -> UnitVec3 {
        Unit::new_unchecked(self.basis[2])
    }

    /// Calculates and returns the variance accounted for by each basis vector. The variance is
    /// calculated by squaring the singular value of each basis vector and dividing by the number
    /// of points used in the original decomposed matrix.
    pub fn basis_variances(&self) -> [f64; 3] {
        let mut result = [0.0; 3];
        for (r, s) in result.iter_mut().zip(self.sv.iter()) {
            *r = s.powi(2) / (self.n as f64);
        }
        result
    }

    /// Calculates and returns the standard deviation of the point dispersion along each basis
    /// vector. These values have the same units as the original points (i.e. if the points were in
    /// millimeters, the standard deviations will be in millimeters).
    pub fn basis_stdevs(&self) -> [f64; 3] {
        let mut result = self.basis_variances();
        for r in result.iter_mut() {
            *r = r.sqrt();
        }
        result
    }

    /// Compute the basis vectors of a set of points using singular value decomposition.  This uses
    /// `nalgebra`'s SVD implementation. The basis vectors are sorted by their corresponding
    /// singular values so that the first vector is the most significant, and are returned as unit
    /// vectors.
    ///
    /// The result struct can be used to compute the variance and/or standard deviation of the
    /// point set along each basis vector, and to quickly estimate whether the set falls into a
    /// shape with a lower dimensionality than the space it is in, such as lying along a line or
    /// plane.
    ///
    /// At least three points must be provided or the decomposition will not produce three basis
    /// vectors.
    ///
    /// # Arguments
    ///
    /// * `points`:
    ///
    /// returns: SvdBasis3
    ///
    /// # Examples
    ///
    /// ```
    ///
    /// ```
    pub fn from_points(points: &[Point3]) -> Self {
        let center = mean_point(points);
        let mut matrix = DMatrix::zeros(points.len(), 3);
        for (i, p) in points.iter().enumerate() {
            let v = p - center;
            for j in 0..3 {
                matrix[(i, j)] = v[j];
            }
        }

        let result = matrix.svd(false, true);
        let v_t = result.v_t.unwrap();

        let mut basis = [Vector3::zeros(); 3];
        let mut scales = [0.0; 3];
        for (i, b) in basis.iter_mut().enumerate() {
            *b = Vector3::new(v_t[(i, 0)], v_t[(i, 1)], v_t[(i, 2)]);
            scales[i] = result.singular_values[i];
        }

        SvdBasis3 {
            basis,
            sv: scales,
            center,
            n: points.len(),
        }
    }

    /// Retrieve the rank of the decomposition by counting the number of singular values that are
    /// greater than the provided tolerance.  A rank of 0 indicates that all singular values are
    /// less than the tolerance, and thus the point set is essentially a single point. A rank of 1
    /// indicates that the point set is essentially a line. A rank of 2 indicates that the point
    /// set exists roughly in a plane.  The maximum rank is 3, which indicates that the point set
    /// cannot be reduced to a lower dimension.
    ///
    /// # Arguments
    ///
    /// * `tol`: the largest value that a singular value can have and still be considered zero.
    ///
    /// returns: usize
    pub fn rank(&self, tol: f64) -> usize {
        let mut rank = 0;
        for s in self.sv.iter() {
            if *s > tol {
                rank += 1;
            }
        }
        rank
    }
}
