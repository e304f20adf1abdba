//! Elliptic arc spans approximated with cubic bézier curves.
//!
//! Angles are expressed in normalized ellipse space: the ellipse inscribed in a box is
//! mapped to the unit circle, an angle `a` corresponding to the point
//! `(cos(a), sin(a))` of that circle. Since device coordinates have the y axis pointing
//! down, increasing angles run clockwise on screen.

use crate::{point, Box2D, CubicBezierSegment, Point};

use core::f64::consts::FRAC_PI_2;

/// Below this half angle a span is considered empty and collapses to its start point.
pub const DEGENERATE_HALF_ANGLE: f64 = 1e-8;

/// Distance of the control points to the end points of a circular arc span, relative to
/// the radius, for a span of half angle `half_angle`.
///
/// `k = 4/3 * (1 - cos(h)) / sin(h)`. For a quarter turn this is `4/3 * (√2 - 1)`.
/// Returns zero for a degenerate span instead of dividing by zero.
#[inline]
pub fn control_point_factor(half_angle: f64) -> f64 {
    if half_angle.abs() <= DEGENERATE_HALF_ANGLE {
        return 0.0;
    }

    4.0 / 3.0 * (1.0 - half_angle.cos()) / half_angle.sin()
}

/// The control point factor of a quarter turn, used by the canonical rounded shapes.
#[inline]
pub fn quarter_turn_factor() -> f64 {
    control_point_factor(FRAC_PI_2 * 0.5)
}

/// Maps a point of normalized ellipse space (`[-1, 1]²`) to the box.
///
/// `(-1, -1)` corresponds to `bounds.min` and `(1, 1)` to `bounds.max`.
#[inline]
pub fn scale_normalized_point(bounds: &Box2D, x: f64, y: f64) -> Point {
    point(
        bounds.min.x + (bounds.max.x - bounds.min.x) * 0.5 * (x + 1.0),
        bounds.min.y + (bounds.max.y - bounds.min.y) * 0.5 * (y + 1.0),
    )
}

/// Inverse of `scale_normalized_point`.
///
/// The box must not be empty.
#[inline]
pub fn normalize_point(bounds: &Box2D, p: Point) -> (f64, f64) {
    (
        (p.x - bounds.min.x) / (bounds.max.x - bounds.min.x) * 2.0 - 1.0,
        (p.y - bounds.min.y) / (bounds.max.y - bounds.min.y) * 2.0 - 1.0,
    )
}

/// Angle of a point in normalized ellipse space.
#[inline]
pub fn normalized_angle(bounds: &Box2D, p: Point) -> f64 {
    let (x, y) = normalize_point(bounds, p);
    y.atan2(x)
}

/// The point of the ellipse inscribed in `bounds` at a given normalized angle.
#[inline]
pub fn point_at_angle(bounds: &Box2D, angle: f64) -> Point {
    scale_normalized_point(bounds, angle.cos(), angle.sin())
}

/// Approximates the span of the ellipse inscribed in `bounds` between two angles with a
/// cubic bézier curve.
///
/// The span must not exceed a quarter turn in either direction.
pub fn arc_segment(bounds: &Box2D, start_angle: f64, end_angle: f64) -> CubicBezierSegment {
    debug_assert!((end_angle - start_angle).abs() <= FRAC_PI_2 + 1e-9);

    let half_angle = (end_angle - start_angle) * 0.5;
    if half_angle.abs() <= DEGENERATE_HALF_ANGLE {
        let p = point_at_angle(bounds, start_angle);
        return CubicBezierSegment {
            from: p,
            ctrl1: p,
            ctrl2: p,
            to: p,
        };
    }

    let k = control_point_factor(half_angle);
    let (x0, y0) = (start_angle.cos(), start_angle.sin());
    let (x3, y3) = (end_angle.cos(), end_angle.sin());

    CubicBezierSegment {
        from: scale_normalized_point(bounds, x0, y0),
        ctrl1: scale_normalized_point(bounds, x0 - k * y0, y0 + k * x0),
        ctrl2: scale_normalized_point(bounds, x3 + k * y3, y3 - k * x3),
        to: scale_normalized_point(bounds, x3, y3),
    }
}

/// Splits a sweep into spans of at most a quarter turn, the boundaries placed every
/// quarter turn from `start_angle`, and invokes the callback with the angles of each span.
///
/// `sweep` may be negative. A zero sweep produces a single degenerate span.
pub fn for_each_quarter_span<F>(start_angle: f64, sweep: f64, callback: &mut F)
where
    F: FnMut(f64, f64),
{
    let end_angle = start_angle + sweep;
    let step = FRAC_PI_2.copysign(sweep);
    let count = ((sweep.abs() / FRAC_PI_2) - 1e-9).ceil().max(1.0) as u32;

    let mut a0 = start_angle;
    for i in 0..count {
        let a1 = if i + 1 == count { end_angle } else { a0 + step };
        callback(a0, a1);
        a0 = a1;
    }
}

#[cfg(test)]
use crate::size;

#[test]
fn quarter_turn_factor_value() {
    let expected = 4.0 / 3.0 * (2.0f64.sqrt() - 1.0);
    assert!((quarter_turn_factor() - expected).abs() < 1e-12);
    assert_eq!(control_point_factor(0.0), 0.0);
    assert_eq!(control_point_factor(1e-10), 0.0);
}

#[test]
fn quarter_circle_approximation() {
    let bounds = Box2D::from_origin_and_size(point(-10.0, -10.0), size(20.0, 20.0));
    let curve = arc_segment(&bounds, 0.0, FRAC_PI_2);

    assert!((curve.from - point(10.0, 0.0)).length() < 1e-9);
    assert!((curve.to - point(0.0, 10.0)).length() < 1e-9);

    for i in 0..=16 {
        let radius = curve.sample(i as f64 / 16.0).to_vector().length();
        assert!((radius - 10.0).abs() < 10.0 * 5e-4, "radius {}", radius);
    }
}

#[test]
fn arc_segment_in_both_directions() {
    let bounds = Box2D::from_origin_and_size(point(0.0, 0.0), size(40.0, 20.0));
    let forward = arc_segment(&bounds, 0.1, 1.2);
    let backward = arc_segment(&bounds, 1.2, 0.1);

    assert!((forward.sample(0.3) - backward.sample(0.7)).length() < 1e-9);
}

#[test]
fn degenerate_span_collapses() {
    let bounds = Box2D::from_origin_and_size(point(0.0, 0.0), size(4.0, 4.0));
    let curve = arc_segment(&bounds, 0.5, 0.5);
    assert!(curve.is_a_point(0.0));
    assert_eq!(curve.from, point_at_angle(&bounds, 0.5));
}

#[test]
fn quarter_spans() {
    let mut spans = Vec::new();
    for_each_quarter_span(0.25, 3.5, &mut |a, b| spans.push((a, b)));
    assert_eq!(spans.len(), 3);
    assert_eq!(spans[0].0, 0.25);
    assert!((spans[0].1 - (0.25 + FRAC_PI_2)).abs() < 1e-12);
    assert!((spans[2].1 - 3.75).abs() < 1e-12);

    spans.clear();
    for_each_quarter_span(1.0, -2.0 * core::f64::consts::PI, &mut |a, b| spans.push((a, b)));
    assert_eq!(spans.len(), 4);
    for (a, b) in &spans {
        assert!(b < a);
    }

    spans.clear();
    for_each_quarter_span(1.0, FRAC_PI_2, &mut |a, b| spans.push((a, b)));
    assert_eq!(spans.len(), 1);

    spans.clear();
    for_each_quarter_span(1.0, 0.0, &mut |a, b| spans.push((a, b)));
    assert_eq!(spans, vec![(1.0, 1.0)]);
}
