//! The generation pipeline: straight tube, weld, bend.

use tubegen_geom::TubePath;
use tubegen_math::Point3;
use tubegen_mesh::MeshBuffer;
use tubegen_sweep::{build_tube, modify_by_curve, SweepError};

use crate::{Result, TubeConfig};

/// Generate a tube mesh that follows `path`.
///
/// The pipeline is:
/// 1. validate `config` and the path length; rings or sections that would
///    fall within the weld tolerance are rejected
/// 2. build a straight tube of `config.segment_count` sections spanning
///    the path length
/// 3. weld the duplicated seam rings
/// 4. bend the tube onto `path` (arc-length uniform if `config.uniform`)
///
/// The mesh is built locally and only returned once every step succeeded.
/// Calling this twice with the same inputs yields identical, independent
/// meshes.
pub fn generate(path: &dyn TubePath, config: &TubeConfig) -> Result<MeshBuffer> {
    let profile = config.cross_section()?;

    let length = path.length();
    if !(length.is_finite() && length > 1e-12) {
        return Err(SweepError::ZeroLengthPath.into());
    }
    config.check_section_length(length)?;

    let mut mesh = build_tube(Point3::origin(), length, config.segment_count, &profile)?;
    let welded = mesh.optimize();
    modify_by_curve(&mut mesh, path, config.uniform)?;
    mesh.validate()?;

    log::debug!(
        "generated tube: {} vertices ({welded} welded), {} triangles, length {length:.4}",
        mesh.num_vertices(),
        mesh.num_triangles()
    );
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TubeError;
    use approx::assert_abs_diff_eq;
    use tubegen_geom::{ArcLengthPath, BezierPoint, BezierSpline, Helix, Line3d};
    use tubegen_math::Vec3;

    fn z_line(length: f64) -> ArcLengthPath {
        ArcLengthPath::new(Box::new(Line3d::from_points(
            Point3::origin(),
            Point3::new(0.0, 0.0, length),
        )))
    }

    fn config(facet_count: u32, segment_count: u32, radius: f64) -> TubeConfig {
        TubeConfig {
            facet_count,
            segment_count,
            radius,
            uniform: false,
        }
    }

    #[test]
    fn test_single_segment_straight_tube() {
        let mesh = generate(&z_line(10.0), &config(4, 1, 1.0)).unwrap();

        assert_eq!(mesh.num_vertices(), 8);
        assert_eq!(mesh.triangles.len(), 24);
        // a straight path along the tube axis leaves the geometry in place
        assert_abs_diff_eq!(mesh.vertices[0], Point3::new(1.0, 0.0, 0.0), epsilon = 1e-9);
        assert_abs_diff_eq!(mesh.vertices[2], Point3::new(-1.0, 0.0, 0.0), epsilon = 1e-9);
        assert_abs_diff_eq!(mesh.vertices[5], Point3::new(0.0, 1.0, 10.0), epsilon = 1e-9);
    }

    #[test]
    fn test_three_by_three_straight_tube() {
        let mesh = generate(&z_line(10.0), &config(3, 3, 1.0)).unwrap();
        // 18 built, two seams of 3 welded
        assert_eq!(mesh.num_vertices(), 12);
        assert_eq!(mesh.num_triangles(), 18);
    }

    #[test]
    fn test_vertex_counts_after_weld() {
        let path = ArcLengthPath::new(Box::new(Helix::new(4.0, 12.0, 2.0).unwrap()));
        for (facets, segments) in [(3, 1), (4, 30), (12, 16)] {
            let mesh = generate(&path, &config(facets, segments, 0.3)).unwrap();
            assert_eq!(mesh.num_vertices(), (facets * (segments + 1)) as usize);
            assert_eq!(mesh.uv.len(), mesh.num_vertices());
            assert_eq!(mesh.triangles.len(), (facets * segments * 6) as usize);
        }
    }

    #[test]
    fn test_generation_is_idempotent() {
        let spline = BezierSpline::new(
            vec![
                BezierPoint::smooth(Point3::origin(), Vec3::new(0.0, 0.0, 4.0)),
                BezierPoint::smooth(Point3::new(8.0, 3.0, 8.0), Vec3::new(4.0, 0.0, 0.0)),
                BezierPoint::smooth(Point3::new(12.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -4.0)),
            ],
            false,
        )
        .unwrap();
        let path = ArcLengthPath::new(Box::new(spline));
        let cfg = TubeConfig { uniform: true, ..config(6, 20, 0.5) };

        let a = generate(&path, &cfg).unwrap();
        let b = generate(&path, &cfg).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_uniform_spacing_differs_on_uneven_spline() {
        let spline = BezierSpline::new(
            vec![
                BezierPoint::new(Point3::origin(), Point3::origin(), Point3::new(0.0, 0.0, 9.0)),
                BezierPoint::new(Point3::new(10.0, 0.0, 10.0), Point3::new(9.0, 0.0, 10.0), Point3::new(10.0, 0.0, 10.0)),
            ],
            false,
        )
        .unwrap();
        let path = ArcLengthPath::new(Box::new(spline));
        let linear = generate(&path, &config(4, 10, 0.2)).unwrap();
        let uniform = generate(&path, &TubeConfig { uniform: true, ..config(4, 10, 0.2) }).unwrap();

        assert_eq!(linear.num_vertices(), uniform.num_vertices());
        assert_ne!(linear.vertices, uniform.vertices);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let path = z_line(10.0);
        for cfg in [config(2, 3, 1.0), config(4, 0, 1.0), config(4, 3, -2.0)] {
            assert!(matches!(generate(&path, &cfg), Err(TubeError::InvalidConfig(_))));
        }
    }

    #[test]
    fn test_geometry_below_weld_tolerance_is_rejected() {
        let path = z_line(10.0);
        // rings this small would weld into single points
        let tiny = generate(&path, &config(4, 3, 1e-4));
        assert!(matches!(tiny, Err(TubeError::InvalidConfig(msg)) if msg.contains("weld tolerance")));

        // sections this short would weld neighbouring rings together
        let crowded = generate(&path, &config(4, 20_000, 1.0));
        assert!(matches!(crowded, Err(TubeError::InvalidConfig(msg)) if msg.contains("weld tolerance")));
    }

    #[test]
    fn test_weld_removes_exactly_the_seams_near_the_tolerance() {
        // edges and sections just above the weld tolerance stay distinct
        let mesh = generate(&z_line(0.03), &config(4, 20, 0.001)).unwrap();
        assert_eq!(mesh.num_vertices(), 4 * 21);
    }

    #[test]
    fn test_zero_length_path_is_rejected() {
        let result = generate(&z_line(0.0), &TubeConfig::default());
        assert!(matches!(result, Err(TubeError::Sweep(SweepError::ZeroLengthPath))));
    }
}
