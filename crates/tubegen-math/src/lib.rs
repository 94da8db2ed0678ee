#![warn(missing_docs)]

//! Math types for the tubegen mesh kernel.
//!
//! Thin wrappers around nalgebra providing the vector, direction and
//! affine transform types the tube pipeline works in, plus the distance
//! below which mesh vertices are welded.
//!
//! # Conventions
//!
//! - Right-handed coordinates, column vectors (`M * p`).
//! - `+Y` is "up" and `+Z` is "forward": a straight tube is built along `+Z`
//!   and [`Transform::look_rotation`] maps `+Z` onto a curve direction.
//! - Angles passed to constructors are radians; [`angle_between_deg`] is the
//!   only function reporting degrees.

use nalgebra::{Matrix4, Rotation3, Unit, Vector2, Vector3};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// A vector in 2D space (texture coordinates).
pub type Vec2 = Vector2<f64>;

/// Vertices closer than this are merged by mesh welding.
pub const WELD_TOLERANCE: f64 = 1e-3;

/// The world "up" axis.
pub fn up() -> Vec3 {
    Vec3::y()
}

/// The world "forward" axis (the straight tube axis).
pub fn forward() -> Vec3 {
    Vec3::z()
}

/// A 4x4 affine transformation matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// The underlying homogeneous matrix.
    pub matrix: Matrix4<f64>,
}

impl Transform {
    /// Identity transform.
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Translation by `offset`.
    pub fn translation(offset: &Vec3) -> Self {
        Self {
            matrix: Matrix4::new_translation(offset),
        }
    }

    /// Rotation about the X axis by `angle` radians.
    pub fn rotation_x(angle: f64) -> Self {
        Self {
            matrix: Rotation3::from_axis_angle(&Vec3::x_axis(), angle).to_homogeneous(),
        }
    }

    /// Rotation that points the local `+Z` axis along `forward`, keeping the
    /// local `+Y` axis as close to `up` as possible.
    ///
    /// The resulting basis columns are:
    /// - `right = normalize(up × forward)`
    /// - `up' = forward × right`
    /// - `forward`
    ///
    /// When `forward` is parallel to `up`, `right` falls back to `+X`.
    /// A zero-length `forward` yields the identity.
    pub fn look_rotation(forward: &Vec3, up: &Vec3) -> Self {
        let len = forward.norm();
        if len < 1e-12 {
            return Self::identity();
        }
        let f = forward / len;

        let right = up.cross(&f);
        let right = if right.norm() < 1e-9 {
            // forward is (anti)parallel to up, so +X is perpendicular to it
            Vec3::x()
        } else {
            right.normalize()
        };
        let true_up = f.cross(&right);

        let basis = Rotation3::from_basis_unchecked(&[right, true_up, f]);
        Self {
            matrix: basis.to_homogeneous(),
        }
    }

    /// Rotate by `rotation`, then move to `position`.
    pub fn trs(position: &Point3, rotation: &Transform) -> Self {
        Self::translation(&position.coords).then(rotation)
    }

    /// `self * other`: the result applies `other` first, then `self`.
    pub fn then(&self, other: &Transform) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Transform a point.
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        self.matrix.transform_point(p)
    }
}

/// Unsigned angle between two vectors, in degrees, in `[0, 180]`.
///
/// Returns `0.0` when either vector is (nearly) zero length.
pub fn angle_between_deg(a: &Vec3, b: &Vec3) -> f64 {
    let denom = (a.norm_squared() * b.norm_squared()).sqrt();
    if denom < 1e-15 {
        return 0.0;
    }
    let cos = (a.dot(b) / denom).clamp(-1.0, 1.0);
    cos.acos().to_degrees()
}

/// Sign of `x`: `1.0` for zero and positive values, `-1.0` otherwise.
pub fn sign(x: f64) -> f64 {
    if x >= 0.0 {
        1.0
    } else {
        -1.0
    }
}
