use std::error::Error;
use std::fmt::{Display, Formatter};

/// Degenerate geometric configurations detected by construction and query
/// operations. Each variant identifies a distinct failure, so callers can
/// tell apart e.g. duplicate input points from collinear-but-distinct ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidGeometry {
    NotEnoughPoints,
    DuplicatePoints,
    CollinearPoints,
    PlanesNotParallel,
    PlanesNearParallel,
    LineInPlane,
    NoUniqueIntersection,
}

impl Display for InvalidGeometry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidGeometry::NotEnoughPoints => {
                write!(f, "not enough points to determine the geometry")
            }
            InvalidGeometry::DuplicatePoints => {
                write!(f, "two or more of the input points are identical")
            }
            InvalidGeometry::CollinearPoints => write!(f, "the input points are collinear"),
            InvalidGeometry::PlanesNotParallel => write!(f, "the planes are not parallel"),
            InvalidGeometry::PlanesNearParallel => {
                write!(f, "the planes are parallel or nearly parallel")
            }
            InvalidGeometry::LineInPlane => write!(f, "the line lies entirely within the plane"),
            InvalidGeometry::NoUniqueIntersection => {
                write!(f, "the planes do not meet at a unique point")
            }
        }
    }
}

impl Error for InvalidGeometry {}

/// Failures produced when parsing the textual form of a plane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsePlaneError {
    /// One of the A, B, C, D components was not present in the input.
    MissingComponent(char),
    /// A token did not have the `<label>:<value>` shape or used an unknown label.
    UnrecognizedToken(String),
    /// A component value could not be parsed as a floating point number.
    InvalidNumber(String),
    /// The A, B, C components describe a zero-length normal.
    DegenerateNormal,
}

impl Display for ParsePlaneError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ParsePlaneError::MissingComponent(c) => write!(f, "missing component '{}'", c),
            ParsePlaneError::UnrecognizedToken(t) => write!(f, "unrecognized token '{}'", t),
            ParsePlaneError::InvalidNumber(t) => write!(f, "invalid number '{}'", t),
            ParsePlaneError::DegenerateNormal => write!(f, "the normal has zero length"),
        }
    }
}

impl Error for ParsePlaneError {}
