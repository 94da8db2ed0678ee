//! Vertex welding index maps.

use tubegen_math::Point3;

/// Compute the old-to-new index map for welding `vertices` within `tolerance`.
///
/// Returns `(remap, kept)`: `remap[old]` is the new index of each vertex and
/// `kept` lists the old indices that survive, in order. A vertex survives
/// when no earlier survivor lies strictly closer than `tolerance`; otherwise
/// it maps onto the first such survivor.
pub fn weld_map(vertices: &[Point3], tolerance: f64) -> (Vec<u32>, Vec<usize>) {
    let mut remap = Vec::with_capacity(vertices.len());
    let mut kept: Vec<usize> = Vec::with_capacity(vertices.len());

    for (i, v) in vertices.iter().enumerate() {
        let target = kept
            .iter()
            .position(|&k| (vertices[k] - *v).norm() < tolerance);
        match target {
            Some(new_index) => remap.push(new_index as u32),
            None => {
                remap.push(kept.len() as u32);
                kept.push(i);
            }
        }
    }

    (remap, kept)
}
