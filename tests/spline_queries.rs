//! Tests that exercise the whole spline surface the way an editor would.

use assert_approx_eq::assert_approx_eq;
use knot_spline::cgmath::prelude::*;
use knot_spline::math::Point2d;
use knot_spline::{Spline, SplineConfig};

/// An open spline through the corners (0,0), (10,0), (10,10), (0,10).
fn square() -> Spline {
    let mut spline = Spline::new();
    spline.add_control_point(0.0, 0.0);
    spline.add_control_point(10.0, 0.0);
    spline.add_control_point(10.0, 10.0);
    spline.add_control_point(0.0, 10.0);
    spline.rebuild();
    spline
}

#[test]
fn square_scenario_produces_three_bowed_segments() {
    let spline = square();

    assert_eq!(spline.num_segments(), 3);
    assert_eq!(spline.segment(0).unwrap().points()[0], Point2d::new(0.0, 0.0));

    // The curve bows outward between knots, so it is at least as long as
    // the knot polyline.
    assert!(spline.length() >= 30.0);

    // Fixed quadrature subdivisions make the length reproducible.
    assert_eq!(spline.length(), square().length());
}

#[test]
fn natural_parameter_visits_the_knots_in_order() {
    let spline = square();
    for (i, knot) in spline.points().iter().enumerate() {
        let t = i as f64 / 3.0;
        let p = spline.point_at(t);
        assert_approx_eq!(p.x, knot.x, 1e-6);
        assert_approx_eq!(p.y, knot.y, 1e-6);
    }
}

#[test]
fn arc_length_parameterisation_hits_the_ends() {
    let spline = square();

    let start = spline.point_at_length(0.0);
    assert_approx_eq!(start.x, 0.0, 1e-3);
    assert_approx_eq!(start.y, 0.0, 1e-3);

    let end = spline.point_at_length(spline.length());
    assert_approx_eq!(end.x, 0.0, 1e-3);
    assert_approx_eq!(end.y, 10.0, 1e-3);
}

#[test]
fn equal_arc_steps_travel_at_constant_speed() {
    let spline = square();
    let length = spline.length();

    let ts = (0..=100)
        .map(|i| i as f64 * 0.01 * length)
        .collect::<Vec<_>>();
    for ts in ts.windows(2) {
        let p1 = spline.point_at_length(ts[0]);
        let p2 = spline.point_at_length(ts[1]);
        assert_approx_eq!((p2 - p1).magnitude(), ts[1] - ts[0], 0.01);
    }
}

#[test]
fn arc_length_derivative_points_along_the_travel_direction() {
    let spline = square();

    let at_start = spline.derivative_at_length(0.0).normalize();
    assert_approx_eq!(at_start.x, 1.0, 1e-6);
    assert_approx_eq!(at_start.y, 0.0, 1e-6);

    let at_end = spline.derivative_at_length(spline.length()).normalize();
    assert_approx_eq!(at_end.x, -1.0, 1e-3);
    assert_approx_eq!(at_end.y, 0.0, 1e-3);
}

#[test]
fn out_of_range_queries_clamp_to_the_ends() {
    let spline = square();

    assert_eq!(spline.point_at(-0.5), spline.point_at(0.0));
    assert_eq!(spline.point_at(2.0), spline.point_at(1.0));

    assert_eq!(spline.point_at_length(-10.0), spline.point_at_length(0.0));
    assert_eq!(
        spline.point_at_length(spline.length() + 10.0),
        spline.point_at_length(spline.length())
    );
}

#[test]
fn zero_tension_reduces_to_the_knot_polyline() {
    let mut spline = Spline::with_config(SplineConfig {
        tension: 0.0,
        ..SplineConfig::default()
    });
    spline
        .set_data(&[0.0, 10.0, 10.0, 0.0], &[0.0, 0.0, 10.0, 10.0])
        .unwrap();
    spline.rebuild();

    // Every segment degenerates to its chord, and the speed is quadratic
    // in t, so the fixed quadrature measures it without error.
    assert_approx_eq!(spline.length(), 30.0, 1e-9);
}

#[test]
fn closed_spline_is_seamless_at_the_wrap_point() {
    let mut spline = square();
    spline.set_closed(true);
    assert_eq!(spline.num_segments(), 4);

    // Walking over the seam in equal arc steps must not jump.
    let length = spline.length();
    let step = 0.01 * length;
    let before = spline.point_at_length(length - step);
    let seam = spline.point_at_length(length);
    assert_approx_eq!((seam - before).magnitude(), step, 0.01);

    let start = spline.point_at_length(0.0);
    assert_approx_eq!((seam - start).magnitude(), 0.0, 1e-3);
}
