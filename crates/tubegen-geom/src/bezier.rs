//! Piecewise cubic Bézier splines with per-anchor handles.

use tubegen_math::{Point3, Vec3};

use crate::{check_finite, Curve3d, CurveKind, GeomError};

/// An anchor of a [`BezierSpline`] with its two tangent handles.
///
/// Handles are absolute positions. `handle_in` shapes the segment arriving
/// at this anchor, `handle_out` the segment leaving it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BezierPoint {
    /// Anchor position the spline passes through.
    pub position: Point3,
    /// Control point of the incoming segment.
    pub handle_in: Point3,
    /// Control point of the outgoing segment.
    pub handle_out: Point3,
}

impl BezierPoint {
    /// Anchor with explicit handles.
    pub fn new(position: Point3, handle_in: Point3, handle_out: Point3) -> Self {
        Self {
            position,
            handle_in,
            handle_out,
        }
    }

    /// Anchor with mirrored handles: `position ∓ offset`.
    pub fn smooth(position: Point3, handle_offset: Vec3) -> Self {
        Self::new(position, position - handle_offset, position + handle_offset)
    }

    /// Anchor whose handles sit on the anchor itself (sharp corner).
    pub fn corner(position: Point3) -> Self {
        Self::new(position, position, position)
    }
}

/// A chain of cubic Bézier segments through a list of anchors.
///
/// Segment `i` runs from `points[i]` to `points[i + 1]` with control points
/// `points[i].handle_out` and `points[i + 1].handle_in`. A closed spline adds
/// a final segment from the last anchor back to the first.
///
/// The parameter domain is `[0, segment_count]`: the integer part selects a
/// segment and the fraction is the local Bézier parameter.
#[derive(Debug, Clone)]
pub struct BezierSpline {
    points: Vec<BezierPoint>,
    closed: bool,
}

impl BezierSpline {
    /// Build a spline from at least two anchors.
    pub fn new(points: Vec<BezierPoint>, closed: bool) -> Result<Self, GeomError> {
        if points.len() < 2 {
            return Err(GeomError::TooFewPoints(points.len()));
        }
        for (i, p) in points.iter().enumerate() {
            check_finite(&format!("points[{i}].position"), &p.position)?;
            check_finite(&format!("points[{i}].handle_in"), &p.handle_in)?;
            check_finite(&format!("points[{i}].handle_out"), &p.handle_out)?;
        }
        Ok(Self { points, closed })
    }

    /// Anchors of the spline.
    pub fn points(&self) -> &[BezierPoint] {
        &self.points
    }

    /// Whether the spline wraps back to its first anchor.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Number of cubic segments.
    pub fn segment_count(&self) -> usize {
        if self.closed {
            self.points.len()
        } else {
            self.points.len() - 1
        }
    }

    /// Control polygon `[p0, p1, p2, p3]` of segment `i`.
    pub fn segment_controls(&self, i: usize) -> [Point3; 4] {
        let a = &self.points[i];
        let b = &self.points[(i + 1) % self.points.len()];
        [a.position, a.handle_out, b.handle_in, b.position]
    }

    /// Split a global parameter into `(segment, local_u)`, clamped to the domain.
    fn locate(&self, t: f64) -> (usize, f64) {
        let n = self.segment_count();
        let t = t.clamp(0.0, n as f64);
        let i = (t.floor() as usize).min(n - 1);
        (i, t - i as f64)
    }
}

impl Curve3d for BezierSpline {
    fn evaluate(&self, t: f64) -> Point3 {
        let (i, u) = self.locate(t);
        let [p0, p1, p2, p3] = self.segment_controls(i);
        let v = 1.0 - u;
        let b0 = v * v * v;
        let b1 = 3.0 * v * v * u;
        let b2 = 3.0 * v * u * u;
        let b3 = u * u * u;
        Point3::from(b0 * p0.coords + b1 * p1.coords + b2 * p2.coords + b3 * p3.coords)
    }

    fn tangent(&self, t: f64) -> Vec3 {
        let (i, u) = self.locate(t);
        let [p0, p1, p2, p3] = self.segment_controls(i);
        let v = 1.0 - u;
        3.0 * (v * v * (p1 - p0) + 2.0 * v * u * (p2 - p1) + u * u * (p3 - p2))
    }

    fn domain(&self) -> (f64, f64) {
        (0.0, self.segment_count() as f64)
    }

    fn curve_type(&self) -> CurveKind {
        CurveKind::Bezier
    }

    fn clone_box(&self) -> Box<dyn Curve3d> {
        Box::new(self.clone())
    }

    fn suggested_segments(&self) -> usize {
        self.segment_count().saturating_mul(32)
    }
}
