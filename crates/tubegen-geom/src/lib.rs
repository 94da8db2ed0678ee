#![warn(missing_docs)]

//! Curve geometry for the tubegen kernel.
//!
//! Tubes are swept along a [`TubePath`]: a curve reparameterized to
//! `t ∈ [0, 1]` that also knows its length and how to convert a length
//! fraction into the parameter that travels that far. [`ArcLengthPath`]
//! builds one from any [`Curve3d`].
//!
//! # Key types
//!
//! - [`Curve3d`]: parametric 3D curve over its own domain
//! - [`Line3d`], [`Helix`], [`BezierSpline`]: concrete curves
//! - [`TubePath`] / [`ArcLengthPath`]: the sweep-facing curve interface

mod bezier;
mod helix;
mod path;

pub use bezier::{BezierPoint, BezierSpline};
pub use helix::{Helix, MAX_TURNS};
pub use path::{ArcLengthPath, TubePath, DEFAULT_SAMPLES_PER_SEGMENT, MAX_SAMPLES};

use thiserror::Error;
use tubegen_math::{Point3, Vec3};

/// Errors raised while constructing curves.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeomError {
    /// A spline needs at least two anchor points.
    #[error("spline needs at least 2 points, found {0}")]
    TooFewPoints(usize),

    /// A control point or parameter is NaN or infinite.
    #[error("curve input is not finite: {0}")]
    NonFinite(String),

    /// A curve dimension that must be positive is not.
    #[error("invalid curve dimension: {0}")]
    InvalidDimension(String),
}

/// Kind tag for a [`Curve3d`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveKind {
    /// Straight line segment.
    Line,
    /// Helical curve.
    Helix,
    /// Piecewise cubic Bézier spline.
    Bezier,
}

/// A 3D parametric curve.
pub trait Curve3d: Send + Sync + std::fmt::Debug {
    /// Evaluate the curve at parameter `t` to get a 3D point.
    fn evaluate(&self, t: f64) -> Point3;

    /// Tangent vector (first derivative) at parameter `t`.
    fn tangent(&self, t: f64) -> Vec3;

    /// Parameter domain `(t_min, t_max)`.
    fn domain(&self) -> (f64, f64);

    /// The kind of this curve.
    fn curve_type(&self) -> CurveKind;

    /// Clone into a boxed trait object.
    fn clone_box(&self) -> Box<dyn Curve3d>;

    /// Suggested number of segments for smooth sampling.
    ///
    /// Override this for curves with high curvature (like helices).
    /// Default returns 32.
    fn suggested_segments(&self) -> usize {
        32
    }
}

impl Clone for Box<dyn Curve3d> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

pub(crate) fn check_finite(label: &str, p: &Point3) -> Result<(), GeomError> {
    if p.iter().all(|c| c.is_finite()) {
        Ok(())
    } else {
        Err(GeomError::NonFinite(format!("{label} = {p}")))
    }
}

// =============================================================================
// Line3d
// =============================================================================

/// A 3D line segment.
///
/// Parameterization: `P(t) = origin + t * direction`, `t ∈ [0, 1]`.
#[derive(Debug, Clone)]
pub struct Line3d {
    /// Starting point.
    pub origin: Point3,
    /// Direction (not unit length; its magnitude is the segment length).
    pub direction: Vec3,
}

impl Line3d {
    /// Create a line from two endpoints, parameterized so `t=0` gives `start` and `t=1` gives `end`.
    pub fn from_points(start: Point3, end: Point3) -> Self {
        Self {
            origin: start,
            direction: end - start,
        }
    }
}

impl Curve3d for Line3d {
    fn evaluate(&self, t: f64) -> Point3 {
        self.origin + t * self.direction
    }

    fn tangent(&self, _t: f64) -> Vec3 {
        self.direction
    }

    fn domain(&self) -> (f64, f64) {
        (0.0, 1.0)
    }

    fn curve_type(&self) -> CurveKind {
        CurveKind::Line
    }

    fn clone_box(&self) -> Box<dyn Curve3d> {
        Box::new(self.clone())
    }

    fn suggested_segments(&self) -> usize {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_line_evaluate() {
        let line = Line3d::from_points(Point3::new(1.0, 0.0, 0.0), Point3::new(1.0, 0.0, 10.0));
        let mid = line.evaluate(0.5);
        assert_abs_diff_eq!(mid.z, 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(line.tangent(0.3).norm(), 10.0, epsilon = 1e-12);
        assert_eq!(line.curve_type(), CurveKind::Line);
    }

    #[test]
    fn test_boxed_curve_clone() {
        let boxed: Box<dyn Curve3d> = Box::new(Line3d::from_points(Point3::origin(), Point3::new(0.0, 2.0, 0.0)));
        let copy = boxed.clone();
        assert_abs_diff_eq!(copy.evaluate(1.0).y, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_check_finite() {
        assert!(check_finite("p", &Point3::new(0.0, 1.0, 2.0)).is_ok());
        let err = check_finite("p", &Point3::new(f64::NAN, 1.0, 2.0)).unwrap_err();
        assert!(matches!(err, GeomError::NonFinite(_)));
    }
}
