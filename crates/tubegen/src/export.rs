//! Mesh export for handing generated tubes to other tools.
//!
//! - Wavefront OBJ: positions, texture coordinates and faces
//! - binary STL: positions with per-facet normals
//! - JSON: the three raw buffers (`vertices`, `triangles`, `uv`)

use std::fmt::Write as _;
use std::path::Path;

use serde::Serialize;
use tubegen_mesh::MeshBuffer;

use crate::Result;

/// Render a mesh as Wavefront OBJ text.
///
/// Every vertex gets a matching `vt` line, so faces use `v/vt` pairs with
/// the same (1-based) index.
pub fn to_obj(mesh: &MeshBuffer) -> String {
    let mut out = String::with_capacity(64 * mesh.num_vertices() + 32 * mesh.num_triangles());
    let _ = writeln!(out, "# tubegen OBJ export");
    let _ = writeln!(
        out,
        "# {} vertices, {} triangles",
        mesh.num_vertices(),
        mesh.num_triangles()
    );
    for v in &mesh.vertices {
        let _ = writeln!(out, "v {} {} {}", v.x, v.y, v.z);
    }
    for t in &mesh.uv {
        let _ = writeln!(out, "vt {} {}", t.x, t.y);
    }
    for tri in mesh.triangles.chunks_exact(3) {
        let (a, b, c) = (tri[0] + 1, tri[1] + 1, tri[2] + 1);
        let _ = writeln!(out, "f {a}/{a} {b}/{b} {c}/{c}");
    }
    out
}

/// Write a mesh as Wavefront OBJ.
pub fn write_obj(mesh: &MeshBuffer, path: impl AsRef<Path>) -> Result<()> {
    std::fs::write(path, to_obj(mesh))?;
    Ok(())
}

/// Encode a mesh as binary STL.
pub fn to_stl(mesh: &MeshBuffer) -> Vec<u8> {
    let num_triangles = mesh.num_triangles();
    let mut data = Vec::with_capacity(84 + num_triangles * 50);

    // 80-byte header
    let mut header = [b' '; 80];
    let title = b"tubegen STL export";
    header[..title.len()].copy_from_slice(title);
    data.extend_from_slice(&header);
    data.extend_from_slice(&(num_triangles as u32).to_le_bytes());

    for tri in mesh.triangles.chunks_exact(3) {
        let [v0, v1, v2] = [tri[0], tri[1], tri[2]].map(|i| mesh.vertices[i as usize]);

        let n = (v1 - v0).cross(&(v2 - v0));
        let len = n.norm();
        let n = if len > 1e-12 {
            n / len
        } else {
            tubegen_math::Vec3::z()
        };

        for c in [n.x, n.y, n.z] {
            data.extend_from_slice(&(c as f32).to_le_bytes());
        }
        for v in [v0, v1, v2] {
            for c in [v.x, v.y, v.z] {
                data.extend_from_slice(&(c as f32).to_le_bytes());
            }
        }
        // Attribute byte count
        data.extend_from_slice(&[0, 0]);
    }

    data
}

/// Write a mesh as binary STL.
pub fn write_stl(mesh: &MeshBuffer, path: impl AsRef<Path>) -> Result<()> {
    std::fs::write(path, to_stl(mesh))?;
    Ok(())
}

/// Flat buffers as handed to a renderer.
#[derive(Debug, Serialize)]
pub struct MeshBuffers {
    /// `[x0, y0, z0, x1, ...]`
    pub vertices: Vec<f32>,
    /// `[i0, i1, i2, ...]`
    pub triangles: Vec<u32>,
    /// `[u0, v0, u1, ...]`
    pub uv: Vec<f32>,
}

impl From<&MeshBuffer> for MeshBuffers {
    fn from(mesh: &MeshBuffer) -> Self {
        Self {
            vertices: mesh.positions_f32(),
            triangles: mesh.triangles.clone(),
            uv: mesh.uvs_f32(),
        }
    }
}

/// Serialize the mesh buffers as JSON.
pub fn to_json(mesh: &MeshBuffer) -> Result<String> {
    Ok(serde_json::to_string(&MeshBuffers::from(mesh))?)
}

/// Write the mesh buffers as JSON.
pub fn write_json(mesh: &MeshBuffer, path: impl AsRef<Path>) -> Result<()> {
    std::fs::write(path, to_json(mesh)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_obj_quad() {
        let obj = to_obj(&MeshBuffer::quad());
        let lines: Vec<&str> = obj.lines().collect();
        assert_eq!(lines.iter().filter(|l| l.starts_with("v ")).count(), 4);
        assert_eq!(lines.iter().filter(|l| l.starts_with("vt ")).count(), 4);
        assert!(lines.contains(&"v 0.5 0 0.5"));
        assert!(lines.contains(&"vt 1 1"));
        assert!(lines.contains(&"f 1/1 2/2 4/4"));
        assert!(lines.contains(&"f 4/4 2/2 3/3"));
    }

    #[test]
    fn test_stl_layout() {
        let stl = to_stl(&MeshBuffer::quad());
        assert_eq!(stl.len(), 84 + 2 * 50);
        assert!(stl.starts_with(b"tubegen STL export"));
        assert_eq!(u32::from_le_bytes([stl[80], stl[81], stl[82], stl[83]]), 2);

        // counter-clockwise normal of the quad points down
        let ny = f32::from_le_bytes([stl[88], stl[89], stl[90], stl[91]]);
        assert!((ny + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_json_buffers() {
        let json = to_json(&MeshBuffer::quad()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["vertices"].as_array().unwrap().len(), 12);
        assert_eq!(value["triangles"].as_array().unwrap().len(), 6);
        assert_eq!(value["uv"].as_array().unwrap().len(), 8);
    }

    #[test]
    fn test_write_files() {
        let dir = std::env::temp_dir().join(format!("tubegen-export-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let mesh = MeshBuffer::quad();

        write_obj(&mesh, dir.join("q.obj")).unwrap();
        write_stl(&mesh, dir.join("q.stl")).unwrap();
        write_json(&mesh, dir.join("q.json")).unwrap();
        assert_eq!(std::fs::metadata(dir.join("q.stl")).unwrap().len(), 184);
        assert!(std::fs::read_to_string(dir.join("q.obj")).unwrap().contains("f 1/1"));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
