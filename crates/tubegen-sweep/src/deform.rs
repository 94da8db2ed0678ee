//! Bending a straight tube onto a path.

use tubegen_geom::TubePath;
use tubegen_math::{angle_between_deg, sign, up, Point3, Transform, Vec2, Vec3};
use tubegen_mesh::MeshBuffer;

use crate::{Result, SweepError};

/// Warp a straight `+Z` tube onto `path` and rewrite its texture coordinates.
///
/// For every vertex, in index order:
/// - `l = z / path.length()` is the linear parameter; with `uniform` it is
///   remapped through [`TubePath::uniform_parameter_at`], otherwise used as is
/// - the local offset `(x, y, 0)` is rotated so `+Z` follows
///   [`TubePath::direction_at`] (see [`Transform::look_rotation`]) and moved
///   to [`TubePath::point_at`]
/// - `uv.x` is the angle between the offset and `+Y` divided by 360°,
///   signed by `x`, so it lies in `[-0.5, 0.5]`
/// - `uv.y` is the running distance between successive evaluated path
///   points, starting from [`TubePath::start_point`]
///
/// The vertex count, triangle list and `uv` length are unchanged.
pub fn modify_by_curve(mesh: &mut MeshBuffer, path: &dyn TubePath, uniform: bool) -> Result<()> {
    mesh.validate()?;

    let length = path.length();
    if !(length.is_finite() && length > 1e-12) {
        return Err(SweepError::ZeroLengthPath);
    }

    let world_up = up();
    let mut travelled = 0.0;
    let mut last_point = path.start_point();

    for (vertex, uv) in mesh.vertices.iter_mut().zip(mesh.uv.iter_mut()) {
        let l = vertex.z / length;
        let t = if uniform { path.uniform_parameter_at(l) } else { l };

        let point = path.point_at(t);
        travelled += (point - last_point).norm();
        last_point = point;

        let rotation = Transform::look_rotation(path.direction_at(t).as_ref(), &world_up);
        let frame = Transform::trs(&point, &rotation);

        let offset = Vec3::new(vertex.x, vertex.y, 0.0);
        let u = angle_between_deg(&offset, &world_up) / 360.0 * sign(offset.x);
        *uv = Vec2::new(u, travelled);
        *vertex = frame.apply_point(&Point3::from(offset));
    }

    log::debug!(
        "deformed {} vertices along path of length {length:.4} (uniform: {uniform})",
        mesh.num_vertices()
    );
    Ok(())
}
