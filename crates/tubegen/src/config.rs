//! Tube generation parameters.

use serde::{Deserialize, Serialize};
use tubegen_math::WELD_TOLERANCE;
use tubegen_sweep::{CrossSection, MIN_FACETS};

use crate::{Result, TubeError};

/// Facet counts above this are accepted but rarely useful.
pub const RECOMMENDED_MAX_FACETS: u32 = 20;

/// Parameters of a generated tube.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TubeConfig {
    /// Sides of the polygonal cross-section (at least 3).
    pub facet_count: u32,
    /// Sections along the path (at least 1).
    pub segment_count: u32,
    /// Cross-section circumradius.
    pub radius: f64,
    /// Place rings at equal arc-length steps instead of equal parameter steps.
    pub uniform: bool,
}

impl Default for TubeConfig {
    fn default() -> Self {
        Self {
            facet_count: 4,
            segment_count: 30,
            radius: 4.0,
            uniform: false,
        }
    }
}

impl TubeConfig {
    /// Check the parameters, rejecting anything that would produce degenerate geometry.
    ///
    /// Besides the ranges of each field this rejects cross-sections whose
    /// neighbouring ring vertices would be welded together, and tubes with
    /// more vertices than `u32` triangle indices can address.
    pub fn validate(&self) -> Result<()> {
        if self.facet_count < MIN_FACETS {
            return Err(TubeError::InvalidConfig(format!(
                "facet_count must be at least {MIN_FACETS}, got {}",
                self.facet_count
            )));
        }
        if self.segment_count < 1 {
            return Err(TubeError::InvalidConfig(
                "segment_count must be at least 1".into(),
            ));
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(TubeError::InvalidConfig(format!(
                "radius must be finite and > 0, got {}",
                self.radius
            )));
        }

        let vertices = 2 * u64::from(self.facet_count) * u64::from(self.segment_count);
        if vertices > u64::from(u32::MAX) {
            return Err(TubeError::InvalidConfig(format!(
                "{} facets x {} segments needs {vertices} vertices, more than u32 indices address",
                self.facet_count, self.segment_count
            )));
        }

        let edge = CrossSection::new(self.facet_count, self.radius)?.edge_length();
        if edge <= WELD_TOLERANCE {
            return Err(TubeError::InvalidConfig(format!(
                "ring edge {edge:e} is within the weld tolerance {WELD_TOLERANCE:e}; increase radius or reduce facet_count"
            )));
        }

        if self.facet_count > RECOMMENDED_MAX_FACETS {
            log::warn!(
                "facet_count {} is above the recommended maximum of {RECOMMENDED_MAX_FACETS}",
                self.facet_count
            );
        }
        Ok(())
    }

    /// Reject tubes whose sections along a path of `length` would be shorter
    /// than the weld tolerance, which would collapse neighbouring rings.
    pub fn check_section_length(&self, length: f64) -> Result<()> {
        let step = length / f64::from(self.segment_count);
        if step > WELD_TOLERANCE {
            return Ok(());
        }
        Err(TubeError::InvalidConfig(format!(
            "section length {step:e} ({length} / {} segments) is within the weld tolerance {WELD_TOLERANCE:e}",
            self.segment_count
        )))
    }

    /// The validated cross-section described by this config.
    pub fn cross_section(&self) -> Result<CrossSection> {
        self.validate()?;
        Ok(CrossSection::new(self.facet_count, self.radius)?)
    }
}
