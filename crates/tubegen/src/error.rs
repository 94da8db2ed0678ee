//! Error types for tube generation.

use thiserror::Error;
use tubegen_geom::GeomError;
use tubegen_mesh::MeshError;
use tubegen_sweep::SweepError;

/// Errors that can occur while loading, generating or exporting a tube.
#[derive(Error, Debug)]
pub enum TubeError {
    /// Tube parameters are out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The path could not be built.
    #[error("invalid path: {0}")]
    Path(#[from] GeomError),

    /// Section, tube or deformation step failed.
    #[error("sweep failed: {0}")]
    Sweep(#[from] SweepError),

    /// The generated mesh broke its invariants.
    #[error("mesh invariant violated: {0}")]
    Mesh(#[from] MeshError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML document could not be parsed.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON document could not be parsed or written.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for tube generation.
pub type Result<T> = std::result::Result<T, TubeError>;
