//! tubegen - procedural tube meshes swept along splines
//!
//! Builds a straight prismatic tube, welds its seams and bends it onto a
//! path, producing positions, triangles and texture coordinates ready for a
//! renderer. Normals, bounds and materials are left to the consumer.
//!
//! # Example
//!
//! ```rust,no_run
//! use tubegen::{generate, ArcLengthPath, Helix, TubeConfig};
//!
//! let path = ArcLengthPath::new(Box::new(Helix::new(5.0, 10.0, 2.0).unwrap()));
//! let config = TubeConfig { facet_count: 8, segment_count: 64, radius: 0.5, ..Default::default() };
//! let mesh = generate(&path, &config).unwrap();
//! tubegen::export::write_obj(&mesh, "spring.obj").unwrap();
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod export;
pub mod generate;

pub use config::{TubeConfig, RECOMMENDED_MAX_FACETS};
pub use document::{PathSpec, PointSpec, TubeDocument};
pub use error::{Result, TubeError};
pub use generate::generate;

pub use tubegen_geom::{ArcLengthPath, BezierPoint, BezierSpline, Curve3d, Helix, Line3d, TubePath};
pub use tubegen_math::{Point3, Vec2, Vec3};
pub use tubegen_mesh::MeshBuffer;
