//! Arc-length parameterized paths.

use tubegen_math::{Dir3, Point3, Vec3};

use crate::Curve3d;

/// Samples per [`Curve3d::suggested_segments`] segment in the length table.
pub const DEFAULT_SAMPLES_PER_SEGMENT: usize = 16;

/// Upper bound on the number of chords in a length table.
pub const MAX_SAMPLES: usize = 1 << 20;

/// The curve interface a tube is swept along.
///
/// The parameter `t` is normalized to `[0, 1]` over the whole path.
/// Implementations clamp `t` into that range, so lookups at or slightly past
/// the endpoints are always defined.
pub trait TubePath: std::fmt::Debug {
    /// Total length of the path.
    fn length(&self) -> f64;

    /// Position at parameter `t`.
    fn point_at(&self, t: f64) -> Point3;

    /// Unit direction of travel at parameter `t`.
    fn direction_at(&self, t: f64) -> Dir3;

    /// Parameter reached after traveling `fraction` of the total length.
    ///
    /// `fraction` is clamped to `[0, 1]`. Stepping `fraction` evenly moves
    /// along the path at constant speed.
    fn uniform_parameter_at(&self, fraction: f64) -> f64;

    /// First point of the path.
    fn start_point(&self) -> Point3 {
        self.point_at(0.0)
    }
}

/// A [`Curve3d`] with a cumulative chord-length table.
///
/// The table maps sampled normalized parameters to the polyline length up to
/// each sample; [`TubePath::length`] is its last entry and
/// [`TubePath::uniform_parameter_at`] inverts it.
#[derive(Debug, Clone)]
pub struct ArcLengthPath {
    curve: Box<dyn Curve3d>,
    params: Vec<f64>,
    lengths: Vec<f64>,
}

impl ArcLengthPath {
    /// Wrap a curve, sampling `suggested_segments() * DEFAULT_SAMPLES_PER_SEGMENT` chords,
    /// at most [`MAX_SAMPLES`].
    pub fn new(curve: Box<dyn Curve3d>) -> Self {
        let samples = curve
            .suggested_segments()
            .max(1)
            .checked_mul(DEFAULT_SAMPLES_PER_SEGMENT)
            .unwrap_or(MAX_SAMPLES);
        Self::with_samples(curve, samples)
    }

    /// Wrap a curve with an explicit number of chords, clamped to `1..=MAX_SAMPLES`.
    pub fn with_samples(curve: Box<dyn Curve3d>, samples: usize) -> Self {
        if samples > MAX_SAMPLES {
            log::warn!("arc-length table of {samples} samples clamped to {MAX_SAMPLES}");
        }
        let samples = samples.clamp(1, MAX_SAMPLES);
        let (t_min, t_max) = curve.domain();

        let mut params = Vec::with_capacity(samples + 1);
        let mut lengths = Vec::with_capacity(samples + 1);
        let mut prev = curve.evaluate(t_min);
        let mut cumulative = 0.0;
        params.push(0.0);
        lengths.push(0.0);

        for i in 1..=samples {
            let s = i as f64 / samples as f64;
            let curr = curve.evaluate(t_min + s * (t_max - t_min));
            let chord = (curr - prev).norm();
            if chord.is_finite() {
                cumulative += chord;
            }
            params.push(s);
            lengths.push(cumulative);
            prev = curr;
        }

        log::trace!("arc-length table: {} samples, length {cumulative}", samples);

        Self {
            curve,
            params,
            lengths,
        }
    }

    /// The wrapped curve.
    pub fn curve(&self) -> &dyn Curve3d {
        self.curve.as_ref()
    }

    /// Number of chords in the length table.
    pub fn samples(&self) -> usize {
        self.params.len() - 1
    }

    fn to_domain(&self, t: f64) -> f64 {
        let (t_min, t_max) = self.curve.domain();
        t_min + t.clamp(0.0, 1.0) * (t_max - t_min)
    }
}

impl TubePath for ArcLengthPath {
    fn length(&self) -> f64 {
        self.lengths.last().copied().unwrap_or(0.0)
    }

    fn point_at(&self, t: f64) -> Point3 {
        self.curve.evaluate(self.to_domain(t))
    }

    fn direction_at(&self, t: f64) -> Dir3 {
        let tangent = self.curve.tangent(self.to_domain(t));
        if tangent.norm() > 1e-12 {
            return Dir3::new_normalize(tangent);
        }

        // Vanishing derivative (e.g. a handle sitting on its anchor): use a
        // chord around t, kept inside the domain.
        let h = 1e-4;
        let t = t.clamp(0.0, 1.0);
        let chord = self.point_at((t + h).min(1.0)) - self.point_at((t - h).max(0.0));
        if chord.norm() > 1e-12 {
            Dir3::new_normalize(chord)
        } else {
            Dir3::new_normalize(Vec3::z())
        }
    }

    fn uniform_parameter_at(&self, fraction: f64) -> f64 {
        let fraction = fraction.clamp(0.0, 1.0);
        let total = self.length();
        if total < 1e-12 {
            return fraction;
        }

        let target = fraction * total;
        let idx = self.lengths.partition_point(|&l| l < target);
        if idx == 0 {
            return self.params[0];
        }
        if idx >= self.lengths.len() {
            return 1.0;
        }

        let (l0, l1) = (self.lengths[idx - 1], self.lengths[idx]);
        let (p0, p1) = (self.params[idx - 1], self.params[idx]);
        let span = l1 - l0;
        if span < 1e-12 {
            return p1;
        }
        p0 + (target - l0) / span * (p1 - p0)
    }
}
