//! Serializable tube documents: parameters plus the path to follow.
//!
//! A document in TOML looks like:
//!
//! ```toml
//! [tube]
//! facet_count = 8
//! segment_count = 40
//! radius = 0.5
//!
//! [path]
//! type = "bezier"
//! closed = false
//! points = [
//!     { position = [0, 0, 0], handle_out = [0, 0, 4] },
//!     { position = [10, 2, 10], handle_in = [6, 2, 10] },
//! ]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tubegen_geom::{ArcLengthPath, BezierPoint, BezierSpline, Curve3d, GeomError, Helix, Line3d, MAX_SAMPLES};
use tubegen_math::Point3;
use tubegen_mesh::MeshBuffer;

use crate::{generate, Result, TubeConfig};

fn point(p: [f64; 3]) -> Point3 {
    Point3::new(p[0], p[1], p[2])
}

/// A Bézier anchor; missing handles sit on the anchor itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointSpec {
    /// Anchor position.
    pub position: [f64; 3],
    /// Incoming handle position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handle_in: Option<[f64; 3]>,
    /// Outgoing handle position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handle_out: Option<[f64; 3]>,
}

impl PointSpec {
    fn to_bezier(&self) -> BezierPoint {
        let position = point(self.position);
        BezierPoint::new(
            position,
            self.handle_in.map(point).unwrap_or(position),
            self.handle_out.map(point).unwrap_or(position),
        )
    }
}

/// Declarative description of the path a tube follows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PathSpec {
    /// Straight segment.
    Line {
        /// Start point.
        start: [f64; 3],
        /// End point.
        end: [f64; 3],
    },
    /// Helix rising along `+Y`.
    Helix {
        /// Coil radius.
        radius: f64,
        /// Total rise.
        height: f64,
        /// Number of turns.
        turns: f64,
        /// Base center.
        #[serde(default)]
        center: [f64; 3],
    },
    /// Piecewise cubic Bézier spline.
    Bezier {
        /// Anchors with handles.
        points: Vec<PointSpec>,
        /// Connect the last anchor back to the first.
        #[serde(default)]
        closed: bool,
    },
}

impl PathSpec {
    /// Build the underlying curve.
    pub fn curve(&self) -> Result<Box<dyn Curve3d>> {
        let curve: Box<dyn Curve3d> = match self {
            PathSpec::Line { start, end } => Box::new(Line3d::from_points(point(*start), point(*end))),
            PathSpec::Helix {
                radius,
                height,
                turns,
                center,
            } => Box::new(Helix::new(*radius, *height, *turns)?.with_center(point(*center))),
            PathSpec::Bezier { points, closed } => Box::new(BezierSpline::new(
                points.iter().map(PointSpec::to_bezier).collect(),
                *closed,
            )?),
        };
        Ok(curve)
    }

    /// Build an arc-length path, optionally with an explicit table size in
    /// `1..=MAX_SAMPLES`.
    pub fn build(&self, samples: Option<usize>) -> Result<ArcLengthPath> {
        if let Some(n) = samples {
            if !(1..=MAX_SAMPLES).contains(&n) {
                return Err(GeomError::InvalidDimension(format!(
                    "samples {n} outside 1..={MAX_SAMPLES}"
                ))
                .into());
            }
        }
        let curve = self.curve()?;
        Ok(match samples {
            Some(n) => ArcLengthPath::with_samples(curve, n),
            None => ArcLengthPath::new(curve),
        })
    }
}

/// Tube parameters together with the path to sweep along.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TubeDocument {
    /// Tube parameters; omitted fields take their defaults.
    #[serde(default)]
    pub tube: TubeConfig,
    /// Path definition.
    pub path: PathSpec,
    /// Chord count of the arc-length table (default depends on the curve).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub samples: Option<usize>,
}

impl TubeDocument {
    /// Parse a TOML document.
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Parse a JSON document.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a document from disk; `.json` files are JSON, anything else TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json(&text)
        } else {
            Self::from_toml(&text)
        }
    }

    /// Build the arc-length path described by this document.
    pub fn build_path(&self) -> Result<ArcLengthPath> {
        self.path.build(self.samples)
    }

    /// Build the path and generate the tube.
    pub fn generate(&self) -> Result<MeshBuffer> {
        let path = self.build_path()?;
        generate(&path, &self.tube)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TubeError;
    use approx::assert_abs_diff_eq;
    use tubegen_geom::TubePath;

    const BEZIER_DOC: &str = r#"
[tube]
facet_count = 6
segment_count = 12
radius = 0.5

[path]
type = "bezier"
points = [
    { position = [0.0, 0.0, 0.0], handle_out = [0.0, 0.0, 4.0] },
    { position = [10.0, 2.0, 10.0], handle_in = [6.0, 2.0, 10.0] },
]
"#;

    #[test]
    fn test_parse_bezier_toml() {
        let doc = TubeDocument::from_toml(BEZIER_DOC).unwrap();
        assert_eq!(doc.tube.facet_count, 6);
        assert!(!doc.tube.uniform);
        match &doc.path {
            PathSpec::Bezier { points, closed } => {
                assert_eq!(points.len(), 2);
                assert!(!closed);
                assert_eq!(points[0].handle_in, None);
            }
            other => panic!("expected bezier, got {other:?}"),
        }

        let mesh = doc.generate().unwrap();
        assert_eq!(mesh.num_vertices(), 6 * 13);
    }

    #[test]
    fn test_missing_tube_table_uses_defaults() {
        let doc = TubeDocument::from_toml(
            "[path]\ntype = \"line\"\nstart = [0.0, 0.0, 0.0]\nend = [0.0, 0.0, 5.0]\n",
        )
        .unwrap();
        assert_eq!(doc.tube, TubeConfig::default());
        assert_abs_diff_eq!(doc.build_path().unwrap().length(), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_json_round_trip() {
        let doc = TubeDocument {
            tube: TubeConfig { facet_count: 5, ..Default::default() },
            path: PathSpec::Helix {
                radius: 2.0,
                height: 4.0,
                turns: 1.0,
                center: [0.0, 1.0, 0.0],
            },
            samples: Some(256),
        };
        let json = doc.to_json().unwrap();
        assert!(json.contains("\"type\": \"helix\""));
        assert_eq!(TubeDocument::from_json(&json).unwrap(), doc);
        assert_eq!(doc.build_path().unwrap().samples(), 256);
    }

    #[test]
    fn test_bad_path_is_reported() {
        let doc = TubeDocument::from_json(
            r#"{ "path": { "type": "bezier", "points": [ { "position": [0, 0, 0] } ] } }"#,
        )
        .unwrap();
        assert!(matches!(doc.generate(), Err(TubeError::Path(GeomError::TooFewPoints(1)))));
    }

    #[test]
    fn test_oversized_helix_is_rejected() {
        let doc = TubeDocument::from_toml(
            "[path]\ntype = \"helix\"\nradius = 1.0\nheight = 1.0\nturns = 1e30\n",
        )
        .unwrap();
        assert!(matches!(doc.generate(), Err(TubeError::Path(GeomError::InvalidDimension(_)))));
    }

    #[test]
    fn test_sample_count_out_of_range_is_rejected() {
        for samples in ["0", "9223372036854775807"] {
            let doc = TubeDocument::from_toml(&format!(
                "samples = {samples}\n[path]\ntype = \"line\"\nstart = [0.0, 0.0, 0.0]\nend = [0.0, 0.0, 5.0]\n"
            ))
            .unwrap();
            assert!(
                matches!(doc.build_path(), Err(TubeError::Path(GeomError::InvalidDimension(_)))),
                "samples = {samples}"
            );
        }
    }

    #[test]
    fn test_unknown_path_type_fails_to_parse() {
        let result = TubeDocument::from_toml("[path]\ntype = \"spiral\"\n");
        assert!(matches!(result, Err(TubeError::Toml(_))));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = std::env::temp_dir().join(format!("tubegen-doc-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let file = dir.join("tube.toml");
        std::fs::write(&file, BEZIER_DOC).unwrap();

        let doc = TubeDocument::load(&file).unwrap();
        assert_eq!(doc.tube.segment_count, 12);

        let missing = TubeDocument::load(dir.join("missing.toml"));
        assert!(matches!(missing, Err(TubeError::Io(_))));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
