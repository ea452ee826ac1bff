//! An interpolating spline through user-placed knots.

use crate::error::SplineError;
use crate::math::{
    arc_length, param_at_arc_length, CubicBezier2d, ParametricCurve2d, Point2d, Vector2d,
};
use crate::util::Interval;
use cgmath::prelude::*;
use itertools::Itertools;
use log::debug;
use smallvec::SmallVec;

/// Tuning knobs for spline construction and arc-length queries.
#[derive(Clone, Copy, Debug)]
pub struct SplineConfig {
    /// Scale applied to the central-difference tangent estimate at each knot.
    /// Smaller values pull the curve tighter against the knot polyline.
    pub tension: f64,
    /// Simpson subdivisions per arc-length evaluation.
    pub quadrature_steps: usize,
    /// Acceptable arc-length error when inverting the parameterisation.
    pub tolerance: f64,
    /// Bisection iteration budget per inversion.
    pub max_iterations: usize,
}

impl Default for SplineConfig {
    fn default() -> Self {
        Self {
            tension: 0.5,
            quadrature_steps: 10,
            tolerance: 1e-6,
            max_iterations: 50,
        }
    }
}

/// An interpolating piecewise-cubic curve through an ordered set of knots.
///
/// The curve passes through every knot exactly and has matching
/// derivatives where two segments meet. Mutations only touch the knot
/// sequence; call [`rebuild`](Spline::rebuild) after mutating and before
/// querying geometry. `rebuild` is idempotent and cheap to call
/// redundantly, so interactive callers can run it once per edit.
///
/// A spline needs at least 3 knots to produce segments; below that every
/// geometric query degrades to a sentinel value instead of failing.
#[derive(Clone, Default)]
pub struct Spline {
    knots: Vec<Point2d>,
    segments: Vec<CubicBezier2d>,
    cumulative: Vec<f64>,
    closed: bool,
    config: SplineConfig,
}

impl Spline {
    /// Creates an empty open spline with the default configuration.
    pub fn new() -> Self {
        Self::with_config(SplineConfig::default())
    }

    /// Creates an empty open spline with the given configuration.
    pub fn with_config(config: SplineConfig) -> Self {
        Self {
            knots: Vec::new(),
            segments: Vec::new(),
            cumulative: Vec::new(),
            closed: false,
            config,
        }
    }

    /// The number of knots.
    pub fn num_points(&self) -> usize {
        self.knots.len()
    }

    /// The knots the curve passes through.
    pub fn points(&self) -> &[Point2d] {
        &self.knots
    }

    /// Whether the curve wraps from the last knot back to the first.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// The number of cubic segments produced by the last rebuild.
    pub fn num_segments(&self) -> usize {
        self.segments.len()
    }

    /// The total arc length, or 0 when the spline has no segments.
    pub fn length(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// The segment at the given index, or `None` when the index is out of
    /// range.
    pub fn segment(&self, index: usize) -> Option<&CubicBezier2d> {
        self.segments.get(index)
    }

    /// Appends a knot.
    ///
    /// Existing segments are left untouched until the next
    /// [`rebuild`](Spline::rebuild), so queries in between see the
    /// pre-mutation geometry.
    pub fn add_control_point(&mut self, x: f64, y: f64) {
        self.knots.push(Point2d::new(x, y));
    }

    /// Replaces the entire knot sequence.
    ///
    /// The slices must be the same length; on a mismatch an error is
    /// returned and the spline is left exactly as it was.
    pub fn set_data(&mut self, xs: &[f64], ys: &[f64]) -> Result<(), SplineError> {
        if xs.len() != ys.len() {
            return Err(SplineError::MismatchedData {
                xs: xs.len(),
                ys: ys.len(),
            });
        }
        self.knots.clear();
        self.knots
            .extend(xs.iter().zip(ys).map(|(&x, &y)| Point2d::new(x, y)));
        Ok(())
    }

    /// Opens or closes the curve. Changing the flag rebuilds the geometry
    /// immediately, since the wrap-around segment and every knot tangent
    /// depend on it.
    pub fn set_closed(&mut self, closed: bool) {
        if self.closed != closed {
            self.closed = closed;
            self.rebuild();
        }
    }

    /// Removes every knot, segment and arc-length table entry.
    pub fn clear(&mut self) {
        self.knots.clear();
        self.segments.clear();
        self.cumulative.clear();
    }

    /// Recomputes the segments and the cumulative arc-length table from
    /// the current knots.
    ///
    /// With fewer than 3 knots the spline is degenerate: the segments and
    /// table are emptied and queries return sentinel values.
    pub fn rebuild(&mut self) {
        self.segments.clear();
        self.cumulative.clear();
        let n = self.knots.len();
        if n < 3 {
            return;
        }

        let tangents = self.tangents();
        let num_segments = if self.closed { n } else { n - 1 };
        self.segments.reserve(num_segments);
        for i in 0..num_segments {
            let j = (i + 1) % n;
            self.segments.push(CubicBezier2d::from_hermite(
                self.knots[i],
                self.knots[j],
                tangents[i],
                tangents[j],
            ));
        }

        let mut total = 0.0;
        self.cumulative.reserve(num_segments);
        for segment in &self.segments {
            total += arc_length(
                segment,
                Interval::new(0.0, 1.0),
                self.config.quadrature_steps,
            );
            self.cumulative.push(total);
        }

        debug!(
            "rebuilt spline: {} knots, {} segments, arc length {:.6}",
            n,
            self.segments.len(),
            total
        );
    }

    /// Samples the curve at the natural parameter `t` in [0, 1], spread
    /// uniformly across the segments. Out-of-range parameters clamp; a
    /// spline without segments returns its first knot, or the origin.
    pub fn point_at(&self, t: f64) -> Point2d {
        self.locate(t)
            .map(|(segment, t)| segment.sample(t))
            .unwrap_or_else(|| self.degenerate_point())
    }

    /// Samples the derivative with respect to the natural parameter.
    pub fn derivative_at(&self, t: f64) -> Vector2d {
        self.locate(t)
            .map(|(segment, t)| self.segments.len() as f64 * segment.sample_dt(t))
            .unwrap_or_else(Vector2d::zero)
    }

    /// Samples the curve at arc length `s`, clamped to [0, length].
    ///
    /// Stepping `s` in equal increments therefore traverses the curve at
    /// constant speed, to within the configured inversion tolerance.
    pub fn point_at_length(&self, s: f64) -> Point2d {
        self.locate_length(s)
            .map(|(segment, t)| segment.sample(t))
            .unwrap_or_else(|| self.degenerate_point())
    }

    /// Samples the segment derivative at arc length `s`, clamped to
    /// [0, length].
    pub fn derivative_at_length(&self, s: f64) -> Vector2d {
        self.locate_length(s)
            .map(|(segment, t)| segment.sample_dt(t))
            .unwrap_or_else(Vector2d::zero)
    }

    /// Estimates one tangent per knot from the central difference of its
    /// neighbouring knots, scaled by the configured tension.
    fn tangents(&self) -> SmallVec<[Vector2d; 16]> {
        let n = self.knots.len();
        let tension = self.config.tension;
        let mut out = SmallVec::with_capacity(n);
        if self.closed {
            for i in 0..n {
                let prev = self.knots[(i + n - 1) % n];
                let next = self.knots[(i + 1) % n];
                out.push(tension * (next - prev));
            }
        } else {
            // One-sided differences at the open ends, doubled so their
            // magnitude matches the two-knot span of the interior estimate.
            out.push(2.0 * tension * (self.knots[1] - self.knots[0]));
            for (prev, _, next) in self.knots.iter().copied().tuple_windows() {
                out.push(tension * (next - prev));
            }
            out.push(2.0 * tension * (self.knots[n - 1] - self.knots[n - 2]));
        }
        out
    }

    fn locate(&self, t: f64) -> Option<(&CubicBezier2d, f64)> {
        if self.segments.is_empty() {
            return None;
        }
        let u = t.clamp(0.0, 1.0) * self.segments.len() as f64;
        let index = usize::min(u as u32 as usize, self.segments.len() - 1);
        Some((&self.segments[index], u - index as f64))
    }

    fn locate_length(&self, s: f64) -> Option<(&CubicBezier2d, f64)> {
        let total = self.length();
        if self.segments.is_empty() || total <= 0.0 {
            return None;
        }
        let s = s.clamp(0.0, total);
        let index = usize::min(
            self.cumulative.partition_point(|&len| len < s),
            self.segments.len() - 1,
        );
        let start = if index == 0 {
            0.0
        } else {
            self.cumulative[index - 1]
        };
        let segment = &self.segments[index];
        let t = param_at_arc_length(
            segment,
            s - start,
            self.config.quadrature_steps,
            self.config.tolerance,
            self.config.max_iterations,
        );
        Some((segment, t))
    }

    fn degenerate_point(&self) -> Point2d {
        self.knots.first().copied().unwrap_or(Point2d::new(0.0, 0.0))
    }
}

impl ParametricCurve2d for Spline {
    fn sample(&self, t: f64) -> Point2d {
        self.point_at(t)
    }

    fn bounds(&self) -> Interval<f64> {
        Interval::new(0.0, 1.0)
    }

    fn sample_dt(&self, t: f64) -> Vector2d {
        self.derivative_at(t)
    }
}
