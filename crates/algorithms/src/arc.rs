//! Append elliptic arcs to a path as cubic bézier curves.

use crate::geom::arc::{arc_segment, for_each_quarter_span, point_at_angle};
use crate::math::{Box2D, Point};
use crate::path::{PathBuffer, PathError, VertexKind};

use core::f64::consts::FRAC_PI_2;

/// How the first point of an arc connects to the path.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ArcStart {
    /// The arc begins a new stroke.
    MoveTo,
    /// A line joins the current position to the start of the arc.
    LineTo,
    /// The current position already is the start of the arc; no vertex is added for it.
    Continue,
}

/// Number of curves used for a sweep.
pub fn num_arc_segments(sweep: f64) -> usize {
    ((sweep.abs() / FRAC_PI_2) - 1e-9).ceil().max(1.0) as usize
}

/// Appends the arc of the ellipse inscribed in `bounds` going from `start_angle` to
/// `end_angle` to the path.
///
/// Angles are in normalized ellipse space (see `gdipath_geom::arc`). One curve is
/// emitted per quarter turn started from `start_angle`, and the sweep can go in either
/// direction. Returns the end point of the arc.
///
/// Either the whole arc is appended or, if memory runs out, nothing is.
pub fn add_arc(
    path: &mut PathBuffer,
    bounds: &Box2D,
    start_angle: f64,
    end_angle: f64,
    start: ArcStart,
) -> Result<Point, PathError> {
    let sweep = end_angle - start_angle;
    path.reserve(1 + 3 * num_arc_segments(sweep))?;

    let first = point_at_angle(bounds, start_angle);
    match start {
        ArcStart::MoveTo => path.push(first, VertexKind::MoveTo)?,
        ArcStart::LineTo => path.push(first, VertexKind::LineTo)?,
        ArcStart::Continue => {}
    }

    let mut result = Ok(());
    let mut end = first;
    for_each_quarter_span(start_angle, sweep, &mut |a0, a1| {
        let curve = arc_segment(bounds, a0, a1);
        end = curve.to;
        if result.is_ok() {
            result = path
                .append_run(&[curve.ctrl1, curve.ctrl2, curve.to], VertexKind::BezierTo)
                .map(|_| ());
        }
    });
    result?;

    Ok(end)
}

#[cfg(test)]
use crate::math::{point, size};
#[cfg(test)]
use core::f64::consts::PI;

#[cfg(test)]
fn circle_bounds() -> Box2D {
    Box2D::from_origin_and_size(point(-10.0, -10.0), size(20.0, 20.0))
}

#[test]
fn full_turn_has_four_curves() {
    let mut path = PathBuffer::new();
    let end = add_arc(&mut path, &circle_bounds(), 0.0, 2.0 * PI, ArcStart::MoveTo).unwrap();

    assert_eq!(path.len(), 13);
    assert_eq!(path.vertices()[0].kind, VertexKind::MoveTo);
    for v in &path.vertices()[1..] {
        assert_eq!(v.kind, VertexKind::BezierTo);
    }
    assert!((end - point(10.0, 0.0)).length() < 1e-9);
    assert!((path.vertices()[3].position - point(0.0, 10.0)).length() < 1e-9);
}

#[test]
fn boundaries_follow_the_start_angle() {
    let mut path = PathBuffer::new();
    path.push(point(0.0, 0.0), VertexKind::MoveTo).unwrap();
    add_arc(&mut path, &circle_bounds(), 0.5, 0.5 + PI, ArcStart::LineTo).unwrap();

    // line + two curves
    assert_eq!(path.len(), 1 + 1 + 6);
    assert_eq!(path.vertices()[1].kind, VertexKind::LineTo);
    let mid = path.vertices()[4].position;
    assert!((mid - point_at_angle(&circle_bounds(), 0.5 + FRAC_PI_2)).length() < 1e-9);
}

#[test]
fn negative_sweep() {
    let mut path = PathBuffer::new();
    path.push(point(10.0, 0.0), VertexKind::MoveTo).unwrap();
    let end = add_arc(&mut path, &circle_bounds(), 0.0, -FRAC_PI_2 - 0.1, ArcStart::Continue)
        .unwrap();

    assert_eq!(path.len(), 1 + 6);
    // y axis points down: negative angles go up.
    assert!(end.y < 0.0);
    assert!(path.vertices()[3].position.y < -9.99);
}

#[test]
fn small_arc_keeps_the_run_of_three() {
    let mut path = PathBuffer::new();
    add_arc(&mut path, &circle_bounds(), 1.0, 1.0, ArcStart::MoveTo).unwrap();
    assert_eq!(path.len(), 4);
    let p = path.vertices()[0].position;
    for v in &path.vertices()[1..] {
        assert_eq!(v.position, p);
    }
}
