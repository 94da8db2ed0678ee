#![warn(missing_docs)]

//! Tube sweeping for the tubegen kernel.
//!
//! A tube is produced in three steps:
//! 1. [`build_tube`] chains [`build_section`] ring pairs along `+Z` into a
//!    straight prism, duplicating every interior ring at the seams
//! 2. [`MeshBuffer::optimize`](tubegen_mesh::MeshBuffer::optimize) welds the
//!    duplicated seam rings
//! 3. [`modify_by_curve`] bends the straight tube onto a [`TubePath`](tubegen_geom::TubePath)
//!    and assigns texture coordinates

mod deform;
mod section;
mod tube;

pub use deform::modify_by_curve;
pub use section::{build_section, CrossSection, MIN_FACETS};
pub use tube::build_tube;

use thiserror::Error;
use tubegen_mesh::MeshError;

/// Errors from building or deforming tube geometry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SweepError {
    /// The cross-section needs at least [`MIN_FACETS`] sides.
    #[error("cross-section needs at least {MIN_FACETS} facets, got {0}")]
    TooFewFacets(u32),

    /// A tube needs at least one segment.
    #[error("tube needs at least 1 segment")]
    TooFewSegments,

    /// Radius must be finite and positive.
    #[error("radius must be finite and > 0, got {0}")]
    InvalidRadius(f64),

    /// An axial length must be finite and positive.
    #[error("length must be finite and > 0, got {0}")]
    InvalidLength(f64),

    /// The path to deform along has no length.
    #[error("path has zero length")]
    ZeroLengthPath,

    /// The mesh handed to the deformer breaks its invariants.
    #[error(transparent)]
    Mesh(#[from] MeshError),
}

/// Result type for sweep operations.
pub type Result<T> = std::result::Result<T, SweepError>;
