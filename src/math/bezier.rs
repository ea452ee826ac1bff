use super::curve::ParametricCurve2d;
use super::{Point2d, Vector2d};
use crate::util::Interval;
use cgmath::prelude::*;

/// A cubic bezier curve.
///
/// The curve is only defined for `t` in [0, 1]; sampling outside that
/// range clamps to the nearest end rather than extrapolating.
#[derive(Copy, Clone, Debug)]
pub struct CubicBezier2d {
    points: [Point2d; 4],
}

impl CubicBezier2d {
    pub const fn new(points: &[Point2d; 4]) -> Self {
        Self { points: *points }
    }

    /// Creates a segment that leaves `p0` along the tangent `v0` and
    /// arrives at `p1` along the tangent `v1`.
    ///
    /// The inner control points sit a third of the way along each end
    /// tangent, so two segments built from the same knot tangent join
    /// with identical derivatives at the shared anchor.
    pub fn from_hermite(p0: Point2d, p1: Point2d, v0: Vector2d, v1: Vector2d) -> Self {
        Self {
            points: [p0, p0 + v0 / 3.0, p1 - v1 / 3.0, p1],
        }
    }

    /// The control points (p0, c0, c1, p1), in the order a renderer's
    /// cubic curve primitive expects them.
    pub fn points(&self) -> &[Point2d; 4] {
        &self.points
    }

    /// The anchor at `t = 0`.
    pub fn start(&self) -> Point2d {
        self.points[0]
    }

    /// The anchor at `t = 1`.
    pub fn end(&self) -> Point2d {
        self.points[3]
    }
}

impl ParametricCurve2d for CubicBezier2d {
    fn sample(&self, t: f64) -> Point2d {
        let t = t.clamp(0.0, 1.0);
        let t1 = 1.0 - t;
        Point2d::from_vec(
            t1 * t1 * t1 * self.points[0].to_vec()
                + 3.0 * t1 * t1 * t * self.points[1].to_vec()
                + 3.0 * t1 * t * t * self.points[2].to_vec()
                + t * t * t * self.points[3].to_vec(),
        )
    }

    fn bounds(&self) -> Interval<f64> {
        Interval { min: 0.0, max: 1.0 }
    }

    fn sample_dt(&self, t: f64) -> Vector2d {
        let t = t.clamp(0.0, 1.0);
        let t1 = 1.0 - t;
        3.0 * t1 * t1 * (self.points[1] - self.points[0])
            + 6.0 * t1 * t * (self.points[2] - self.points[1])
            + 3.0 * t * t * (self.points[3] - self.points[2])
    }

    fn sample_dt2(&self, t: f64) -> Vector2d {
        let t = t.clamp(0.0, 1.0);
        let t1 = 1.0 - t;
        6.0 * t1 * ((self.points[2] - self.points[1]) - (self.points[1] - self.points[0]))
            + 6.0 * t * ((self.points[3] - self.points[2]) - (self.points[2] - self.points[1]))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn arch() -> CubicBezier2d {
        CubicBezier2d::new(&[
            Point2d::new(0.0, 0.0),
            Point2d::new(2.0, 6.0),
            Point2d::new(8.0, 6.0),
            Point2d::new(10.0, 0.0),
        ])
    }

    #[test]
    pub fn endpoints_interpolate_the_anchors() {
        let curve = arch();
        assert_eq!(curve.sample(0.0), curve.start());
        assert_eq!(curve.sample(1.0), curve.end());
    }

    #[test]
    pub fn derivative_matches_a_finite_difference() {
        let curve = arch();
        let h = 1e-7;
        for i in 1..10 {
            let t = 0.1 * i as f64;
            let fd = (curve.sample(t + h) - curve.sample(t - h)) / (2.0 * h);
            let dt = curve.sample_dt(t);
            assert_approx_eq!(dt.x, fd.x, 1e-4);
            assert_approx_eq!(dt.y, fd.y, 1e-4);
        }
    }

    #[test]
    pub fn second_derivative_matches_a_finite_difference() {
        let curve = arch();
        let h = 1e-5;
        for i in 1..10 {
            let t = 0.1 * i as f64;
            let fd = (curve.sample_dt(t + h) - curve.sample_dt(t - h)) / (2.0 * h);
            let dt2 = curve.sample_dt2(t);
            assert_approx_eq!(dt2.x, fd.x, 1e-4);
            assert_approx_eq!(dt2.y, fd.y, 1e-4);
        }
    }

    #[test]
    pub fn out_of_range_parameters_clamp() {
        let curve = arch();
        assert_eq!(curve.sample(-1.5), curve.sample(0.0));
        assert_eq!(curve.sample(2.5), curve.sample(1.0));
        assert_eq!(curve.sample_dt(-1.5), curve.sample_dt(0.0));
        assert_eq!(curve.sample_dt(2.5), curve.sample_dt(1.0));
    }
}
