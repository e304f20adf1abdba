//! Outlines of the closed shapes, as point sequences in device space.
//!
//! Each shape starts on the right edge and goes counter-clockwise on screen (up first,
//! the y axis pointing down). The recorder reverses the points for clockwise contexts.

use crate::geom::arc::quarter_turn_factor;
use crate::math::{point, Box2D, Point, Size};

/// Number of points of a rectangle.
pub const RECTANGLE_POINTS: usize = 4;
/// Number of points of a rounded rectangle: four corner curves and four edges.
pub const ROUND_RECT_POINTS: usize = 16;
/// Number of points of an ellipse: the start point and four quadrant curves.
pub const ELLIPSE_POINTS: usize = 13;

pub fn rectangle_points(bounds: &Box2D) -> [Point; RECTANGLE_POINTS] {
    let (min, max) = (bounds.min, bounds.max);
    [
        point(max.x, min.y),
        min,
        point(min.x, max.y),
        max,
    ]
}

/// The outline of a rectangle with rounded corners, each corner being a quarter of an
/// ellipse with the given radii.
///
/// Points 0, 4, 8 and 12 begin an edge, the others are curve points.
pub fn round_rect_points(bounds: &Box2D, radii: Size) -> [Point; ROUND_RECT_POINTS] {
    let (min, max) = (bounds.min, bounds.max);
    let (w, h) = (radii.width, radii.height);
    // Distance from the corner to the control points.
    let cw = w * (1.0 - quarter_turn_factor());
    let ch = h * (1.0 - quarter_turn_factor());

    [
        point(max.x, min.y + h),
        point(max.x, min.y + ch),
        point(max.x - cw, min.y),
        point(max.x - w, min.y),
        point(min.x + w, min.y),
        point(min.x + cw, min.y),
        point(min.x, min.y + ch),
        point(min.x, min.y + h),
        point(min.x, max.y - h),
        point(min.x, max.y - ch),
        point(min.x + cw, max.y),
        point(min.x + w, max.y),
        point(max.x - w, max.y),
        point(max.x - cw, max.y),
        point(max.x, max.y - ch),
        point(max.x, max.y - h),
    ]
}

pub fn ellipse_points(bounds: &Box2D) -> [Point; ELLIPSE_POINTS] {
    let (min, max) = (bounds.min, bounds.max);
    let w = bounds.width() * 0.5;
    let h = bounds.height() * 0.5;
    let cw = w * (1.0 - quarter_turn_factor());
    let ch = h * (1.0 - quarter_turn_factor());

    [
        point(max.x, min.y + h),
        point(max.x, min.y + ch),
        point(max.x - cw, min.y),
        point(min.x + w, min.y),
        point(min.x + cw, min.y),
        point(min.x, min.y + ch),
        point(min.x, min.y + h),
        point(min.x, max.y - ch),
        point(min.x + cw, max.y),
        point(min.x + w, max.y),
        point(max.x - cw, max.y),
        point(max.x, max.y - ch),
        point(max.x, max.y - h),
    ]
}

#[cfg(test)]
use crate::geom::CubicBezierSegment;
#[cfg(test)]
use crate::math::size;

#[test]
fn ellipse_curves_stay_on_the_ellipse() {
    let bounds = Box2D::new(point(0.0, 0.0), point(40.0, 20.0));
    let points = ellipse_points(&bounds);
    let center = bounds.center();

    assert_eq!(points[0], points[12]);
    for quadrant in 0..4 {
        let i = quadrant * 3;
        let curve = CubicBezierSegment {
            from: points[i],
            ctrl1: points[i + 1],
            ctrl2: points[i + 2],
            to: points[i + 3],
        };
        for step in 0..=8 {
            let p = curve.sample(step as f64 / 8.0);
            let x = (p.x - center.x) / 20.0;
            let y = (p.y - center.y) / 10.0;
            assert!((x * x + y * y - 1.0).abs() < 1e-3);
        }
    }
}

#[test]
fn round_rect_edges() {
    let bounds = Box2D::new(point(0.0, 0.0), point(100.0, 50.0));
    let points = round_rect_points(&bounds, size(10.0, 5.0));

    assert_eq!(points[0], point(100.0, 5.0));
    assert_eq!(points[3], point(90.0, 0.0));
    assert_eq!(points[4], point(10.0, 0.0));
    assert_eq!(points[7], point(0.0, 5.0));
    assert_eq!(points[8], point(0.0, 45.0));
    assert_eq!(points[11], point(10.0, 50.0));
    assert_eq!(points[12], point(90.0, 50.0));
    assert_eq!(points[15], point(100.0, 45.0));
}

#[test]
fn rectangle_corners() {
    let bounds = Box2D::new(point(1.0, 2.0), point(5.0, 7.0));
    assert_eq!(
        rectangle_points(&bounds),
        [point(5.0, 2.0), point(1.0, 2.0), point(1.0, 7.0), point(5.0, 7.0)]
    );
}
