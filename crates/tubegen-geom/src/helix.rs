//! Helical curve, a common test path for tubes (springs, coils).

use std::f64::consts::PI;

use tubegen_math::{Point3, Vec3};

use crate::{Curve3d, CurveKind, GeomError};

/// Largest number of turns a [`Helix`] accepts.
pub const MAX_TURNS: f64 = 10_000.0;

/// A helical curve around the Y axis.
///
/// The helix is parameterized as:
/// ```text
/// x(t) = radius * cos(2π * turns * t)
/// y(t) = height * t
/// z(t) = radius * sin(2π * turns * t)
/// ```
///
/// Where `t ∈ [0, 1]`.
#[derive(Debug, Clone)]
pub struct Helix {
    /// Center of the helix at the base.
    pub center: Point3,
    /// Radius of the helix.
    pub radius: f64,
    /// Total height of the helix.
    pub height: f64,
    /// Number of turns.
    pub turns: f64,
}

impl Helix {
    /// Create a new helix centered at the origin.
    ///
    /// # Arguments
    ///
    /// * `radius` - Radius of the helix
    /// * `height` - Total rise along `+Y`
    /// * `turns` - Number of complete turns, at most [`MAX_TURNS`] either way
    pub fn new(radius: f64, height: f64, turns: f64) -> Result<Self, GeomError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(GeomError::InvalidDimension(format!("helix radius {radius}")));
        }
        if !(height.is_finite() && turns.is_finite()) {
            return Err(GeomError::NonFinite("helix height/turns".into()));
        }
        if turns.abs() > MAX_TURNS {
            return Err(GeomError::InvalidDimension(format!(
                "helix turns {turns} exceeds {MAX_TURNS}"
            )));
        }
        Ok(Self {
            center: Point3::origin(),
            radius,
            height,
            turns,
        })
    }

    /// Create a helix with specified center.
    pub fn with_center(mut self, center: Point3) -> Self {
        self.center = center;
        self
    }
}

impl Curve3d for Helix {
    fn evaluate(&self, t: f64) -> Point3 {
        let angle = 2.0 * PI * self.turns * t;
        Point3::new(
            self.center.x + self.radius * angle.cos(),
            self.center.y + self.height * t,
            self.center.z + self.radius * angle.sin(),
        )
    }

    fn tangent(&self, t: f64) -> Vec3 {
        let angle = 2.0 * PI * self.turns * t;
        let d_angle = 2.0 * PI * self.turns;

        Vec3::new(
            -self.radius * d_angle * angle.sin(),
            self.height,
            self.radius * d_angle * angle.cos(),
        )
    }

    fn domain(&self) -> (f64, f64) {
        (0.0, 1.0)
    }

    fn curve_type(&self) -> CurveKind {
        CurveKind::Helix
    }

    fn clone_box(&self) -> Box<dyn Curve3d> {
        Box::new(self.clone())
    }

    fn suggested_segments(&self) -> usize {
        // 48 segments per turn, minimum 64
        ((self.turns.abs() * 48.0).ceil() as usize).max(64)
    }
}
