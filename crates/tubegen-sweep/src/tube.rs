//! Straight tube assembly from consecutive sections.

use tubegen_math::{forward, Point3};
use tubegen_mesh::MeshBuffer;

use crate::section::{build_section, CrossSection};
use crate::{Result, SweepError};

/// Build a straight tube of `segment_count` sections along `+Z`.
///
/// Section `i` starts at `start + Z * i * total_length / segment_count` and
/// is `total_length / segment_count` long. Sections are concatenated in
/// order, so every interior ring appears twice (end of one section, start of
/// the next). Run [`MeshBuffer::optimize`] afterwards to weld those seams.
pub fn build_tube(
    start: Point3,
    total_length: f64,
    segment_count: u32,
    profile: &CrossSection,
) -> Result<MeshBuffer> {
    if segment_count < 1 {
        return Err(SweepError::TooFewSegments);
    }
    if !(total_length.is_finite() && total_length > 0.0) {
        return Err(SweepError::InvalidLength(total_length));
    }

    let step = total_length / segment_count as f64;
    let tube = (0..segment_count).try_fold(MeshBuffer::new(), |tube, i| {
        let center = start + forward() * (i as f64 * total_length / segment_count as f64);
        let section = build_section(center, step, profile)?;
        Ok::<_, SweepError>(tube.concatenate(&section)?)
    })?;

    log::debug!(
        "straight tube: {segment_count} segments x {} facets, {} vertices",
        profile.facet_count(),
        tube.num_vertices()
    );
    Ok(tube)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::faces_point_outward;

    fn tube(facets: u32, segments: u32, length: f64) -> MeshBuffer {
        let profile = CrossSection::new(facets, 1.0).unwrap();
        build_tube(Point3::origin(), length, segments, &profile).unwrap()
    }

    #[test]
    fn test_tube_counts_before_weld() {
        for (facets, segments) in [(3, 1), (4, 2), (6, 5), (20, 30)] {
            let mesh = tube(facets, segments, 10.0);
            let expected = (facets * segments * 2) as usize;
            assert_eq!(mesh.num_vertices(), expected);
            assert_eq!(mesh.uv.len(), expected);
            assert_eq!(mesh.triangles.len(), (facets * segments * 6) as usize);
            mesh.validate().unwrap();
        }
    }

    #[test]
    fn test_tube_sections_are_stacked() {
        let mesh = tube(4, 4, 10.0);
        // section i occupies vertices [8i, 8i + 8)
        for i in 0..4 {
            let z0 = mesh.vertices[8 * i].z;
            let z1 = mesh.vertices[8 * i + 4].z;
            assert!((z0 - 2.5 * i as f64).abs() < 1e-12);
            assert!((z1 - 2.5 * (i + 1) as f64).abs() < 1e-12);
        }
    }

    #[test]
    fn test_single_segment_has_nothing_to_weld() {
        let mut mesh = tube(4, 1, 10.0);
        assert_eq!(mesh.num_vertices(), 8);
        assert_eq!(mesh.triangles.len(), 24);
        assert_eq!(mesh.optimize(), 0);
    }

    #[test]
    fn test_weld_removes_interior_seams() {
        for (facets, segments) in [(3, 3), (4, 2), (8, 10)] {
            let mut mesh = tube(facets, segments, 7.0);
            let before = mesh.num_vertices();
            let removed = mesh.optimize();
            assert_eq!(removed, (facets * (segments - 1)) as usize);
            assert_eq!(mesh.num_vertices(), before - removed);
            assert_eq!(mesh.uv.len(), mesh.num_vertices());
            mesh.validate().unwrap();
        }
    }

    #[test]
    fn test_three_by_three_removes_six() {
        let mut mesh = tube(3, 3, 10.0);
        assert_eq!(mesh.optimize(), 6);
        assert_eq!(mesh.num_vertices(), 12);
    }

    #[test]
    fn test_welded_tube_keeps_winding() {
        let mut mesh = tube(5, 4, 3.0);
        mesh.optimize();
        assert!(faces_point_outward(&mesh));
    }

    #[test]
    fn test_tube_rejects_bad_input() {
        let profile = CrossSection::new(4, 1.0).unwrap();
        assert_eq!(
            build_tube(Point3::origin(), 10.0, 0, &profile),
            Err(SweepError::TooFewSegments)
        );
        assert_eq!(
            build_tube(Point3::origin(), -1.0, 2, &profile),
            Err(SweepError::InvalidLength(-1.0))
        );
    }
}
