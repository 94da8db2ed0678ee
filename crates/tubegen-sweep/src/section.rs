//! One tube segment: two parallel rings joined by side faces.

use std::f64::consts::PI;

use tubegen_math::{Point3, Vec2};
use tubegen_mesh::MeshBuffer;

use crate::{Result, SweepError};

/// Smallest facet count that still encloses an area.
pub const MIN_FACETS: u32 = 3;

/// A regular polygon cross-section in the local XY plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossSection {
    facet_count: u32,
    radius: f64,
}

impl CrossSection {
    /// Validate and build a cross-section.
    pub fn new(facet_count: u32, radius: f64) -> Result<Self> {
        if facet_count < MIN_FACETS {
            return Err(SweepError::TooFewFacets(facet_count));
        }
        if !(radius.is_finite() && radius > 0.0) {
            return Err(SweepError::InvalidRadius(radius));
        }
        Ok(Self {
            facet_count,
            radius,
        })
    }

    /// Number of polygon sides.
    pub fn facet_count(&self) -> u32 {
        self.facet_count
    }

    /// Circumradius of the polygon.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Distance between neighbouring ring vertices.
    pub fn edge_length(&self) -> f64 {
        2.0 * self.radius * (PI / self.facet_count as f64).sin()
    }

    /// Ring vertex `i`, counter-clockwise from `+X`, at height `z`.
    pub fn ring_point(&self, i: u32, z: f64) -> Point3 {
        let angle = i as f64 * 2.0 * PI / self.facet_count as f64;
        Point3::new(self.radius * angle.cos(), self.radius * angle.sin(), z)
    }
}

/// Build one open-ended tube segment.
///
/// Ring 0 sits at `center`, ring 1 at `center + axial_length * Z`; each ring
/// has `facet_count` vertices. Vertex `i` of ring 0 has index `i`, vertex `i`
/// of ring 1 has index `facet_count + i`. Each facet contributes two
/// triangles, both wound so their normals face away from the axis:
///
/// ```text
/// (ring0[i], ring1[i], ring1[i-1])
/// (ring0[i], ring1[i-1], ring0[i-1])
/// ```
///
/// with `i-1` wrapping to the last vertex. All texture coordinates start at
/// zero.
pub fn build_section(center: Point3, axial_length: f64, profile: &CrossSection) -> Result<MeshBuffer> {
    if !(axial_length.is_finite() && axial_length > 0.0) {
        return Err(SweepError::InvalidLength(axial_length));
    }

    let n = profile.facet_count;
    let mut mesh = MeshBuffer::new();
    mesh.vertices.reserve(2 * n as usize);
    mesh.triangles.reserve(6 * n as usize);

    for z in [0.0, axial_length] {
        for i in 0..n {
            mesh.vertices.push(profile.ring_point(i, z) + center.coords);
        }
    }
    mesh.uv = vec![Vec2::zeros(); mesh.vertices.len()];

    for i in 0..n {
        let prev = if i == 0 { n - 1 } else { i - 1 };
        mesh.triangles.extend_from_slice(&[i, n + i, n + prev]);
        mesh.triangles.extend_from_slice(&[i, n + prev, prev]);
    }

    log::trace!("section at {center}: {n} facets, length {axial_length}");
    Ok(mesh)
}

/// Outward test helper shared with the tube tests.
#[cfg(test)]
pub(crate) fn faces_point_outward(mesh: &MeshBuffer) -> bool {
    (0..mesh.num_triangles()).all(|t| {
        let [a, b, c] = mesh.triangle(t).map(|i| mesh.vertices[i as usize]);
        let normal = (b - a).cross(&(c - a));
        let centroid = (a.coords + b.coords + c.coords) / 3.0;
        let radial = tubegen_math::Vec3::new(centroid.x, centroid.y, 0.0);
        normal.dot(&radial) > 0.0
    })
}
