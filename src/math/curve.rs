use super::{Point2d, Vector2d};
use crate::util::Interval;
use cgmath::prelude::*;

/// A parametric curve in 2D space.
pub trait ParametricCurve2d {
    /// Samples the parametric curve.
    fn sample(&self, t: f64) -> Point2d;

    /// Returns the minimum and maximum t-values that define the bounds of the curve.
    fn bounds(&self) -> Interval<f64>;

    /// Samples the derivative of the parametric curve.
    ///
    /// The default implementation approximates the derivative by sampling
    /// two very nearby points along the curve.
    fn sample_dt(&self, t: f64) -> Vector2d {
        let delta = self.bounds().length() * 0.0001;
        let p1 = self.sample(t);
        let p2 = self.sample(t + delta);
        (p2 - p1) / delta
    }

    /// Samples the second derivative of the parametric curve.
    ///
    /// The default implementation approximates the derivative by sampling
    /// two very nearby points along the curve.
    fn sample_dt2(&self, t: f64) -> Vector2d {
        let delta = self.bounds().length() * 0.0001;
        let p1 = self.sample_dt(t);
        let p2 = self.sample_dt(t + delta);
        (p2 - p1) / delta
    }
}

/// Approximates the arc length of a curve over the given parameter range
/// using composite Simpson quadrature of the speed `‖sample_dt(t)‖`.
///
/// The cost is fixed and the error bounded; there is no adaptive
/// refinement. A degenerate range or a curve whose speed is zero
/// everywhere yields exactly 0.
///
/// # Parameters
/// * `curve` - The curve to measure
/// * `range` - The parameter interval to integrate over
/// * `steps` - Number of subdivisions, rounded up to an even count of at least 2
pub fn arc_length(curve: &impl ParametricCurve2d, range: Interval<f64>, steps: usize) -> f64 {
    if range.length() <= 0.0 {
        return 0.0;
    }
    let steps = usize::max(steps + steps % 2, 2);
    let speed = |t: f64| curve.sample_dt(t).magnitude();

    let mut sum = speed(range.min) + speed(range.max);
    for i in 1..steps {
        let weight = if i % 2 == 1 { 4.0 } else { 2.0 };
        sum += weight * speed(range.lerp(i as f64 / steps as f64));
    }
    sum * range.length() / (3.0 * steps as f64)
}

/// Finds the parameter at which the curve reaches the given arc length,
/// measured from the start of its bounds.
///
/// The map from parameter to arc length is monotone because the integrand
/// is non-negative, so a bisection search converges. The target is first
/// clamped to the curve's total length, and if the iteration budget runs
/// out before the tolerance is met, the best midpoint found so far is
/// returned rather than an error.
///
/// # Parameters
/// * `curve` - The curve to invert
/// * `target` - The arc length to reach
/// * `steps` - Quadrature subdivisions used for each length evaluation
/// * `tolerance` - Acceptable arc-length error
/// * `max_iterations` - Bisection iteration budget
pub fn param_at_arc_length(
    curve: &impl ParametricCurve2d,
    target: f64,
    steps: usize,
    tolerance: f64,
    max_iterations: usize,
) -> f64 {
    let bounds = curve.bounds();
    let total = arc_length(curve, bounds, steps);
    if total <= 0.0 {
        return bounds.min;
    }
    let target = target.clamp(0.0, total);

    let mut bracket = bounds;
    let mut mid = bracket.midpoint();
    for _ in 0..max_iterations {
        let len = arc_length(curve, Interval::new(bounds.min, mid), steps);
        if (len - target).abs() < tolerance {
            break;
        }
        if len < target {
            bracket.min = mid;
        } else {
            bracket.max = mid;
        }
        mid = bracket.midpoint();
    }
    mid
}
