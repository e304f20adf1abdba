//! Determine whether a point is inside a path.

use crate::flatten::for_each_flattened_point;
use crate::math::Point;
use crate::path::{FillRule, PathBuffer};

/// Returns whether the point is inside the path.
///
/// Every stroke is considered closed.
pub fn hit_test_path(point: &Point, path: &PathBuffer, fill_rule: FillRule) -> bool {
    fill_rule.is_in(path_winding_number_at_position(point, path))
}

/// Compute the winding number of a given position with respect to the path.
pub fn path_winding_number_at_position(point: &Point, path: &PathBuffer) -> i32 {
    let mut winding = 0;

    for stroke in path.strokes() {
        let mut first: Option<Point> = None;
        let mut prev = *point;
        for_each_flattened_point(stroke, &mut |p| {
            if first.is_some() {
                test_segment(*point, prev, p, &mut winding);
            } else {
                first = Some(p);
            }
            prev = p;
        });

        if let Some(first) = first {
            test_segment(*point, prev, first, &mut winding);
        }
    }

    winding
}

/// Compute the winding number of a given position with respect to a closed polygon.
pub fn polygon_winding_number_at_position(point: &Point, polygon: &[Point]) -> i32 {
    let mut winding = 0;
    if let Some(&last) = polygon.last() {
        let mut prev = last;
        for &p in polygon {
            test_segment(*point, prev, p, &mut winding);
            prev = p;
        }
    }

    winding
}

// Loop over the edges and compute the winding number at that point by accumulating the
// winding of all edges intersecting the horizontal line passing through our point which are
// left of it.
fn test_segment(point: Point, from: Point, to: Point, winding: &mut i32) {
    let y0 = from.y;
    let y1 = to.y;
    let min_y = f64::min(y0, y1);
    let max_y = f64::max(y0, y1);

    if min_y > point.y || max_y <= point.y || f64::min(from.x, to.x) > point.x {
        return;
    }

    if y0 == y1 {
        return;
    }

    let d = y1 - y0;
    let t = (point.y - y0) / d;
    let x = from.x + (to.x - from.x) * t;

    if x > point.x {
        return;
    }

    let w = if d > 0.0 { 1 } else { -1 };

    *winding += w;
}

#[test]
fn test_hit_testing() {
    use crate::math::point;
    use crate::path::VertexKind;

    let mut path = PathBuffer::new();
    path.push(point(0.0, 0.0), VertexKind::MoveTo).unwrap();
    path.append_run(
        &[point(1.0, 0.0), point(1.0, 1.0), point(0.0, 1.0)],
        VertexKind::LineTo,
    )
    .unwrap();
    path.close_last_stroke();
    path.push(point(0.25, 0.25), VertexKind::MoveTo).unwrap();
    path.append_run(
        &[point(0.75, 0.25), point(0.75, 0.75), point(0.20, 0.75)],
        VertexKind::LineTo,
    )
    .unwrap();
    path.close_last_stroke();

    assert!(!hit_test_path(&point(-1.0, 0.5), &path, FillRule::EvenOdd));
    assert!(!hit_test_path(&point(2.0, 0.5), &path, FillRule::EvenOdd));
    assert!(!hit_test_path(&point(2.0, 0.0), &path, FillRule::EvenOdd));
    assert!(!hit_test_path(&point(0.5, -1.0), &path, FillRule::EvenOdd));
    assert!(!hit_test_path(&point(0.5, 2.0), &path, FillRule::EvenOdd));

    assert!(!hit_test_path(&point(0.5, 0.5), &path, FillRule::EvenOdd));
    assert!(hit_test_path(&point(0.5, 0.5), &path, FillRule::NonZero));
    assert!(hit_test_path(&point(0.2, 0.5), &path, FillRule::EvenOdd));
    assert!(hit_test_path(&point(0.8, 0.5), &path, FillRule::EvenOdd));
}

#[test]
fn polygon_winding() {
    use crate::math::point;

    let square = [
        point(0.0, 0.0),
        point(4.0, 0.0),
        point(4.0, 4.0),
        point(0.0, 4.0),
    ];
    assert_eq!(polygon_winding_number_at_position(&point(2.0, 2.0), &square).abs(), 1);
    assert_eq!(polygon_winding_number_at_position(&point(5.0, 2.0), &square), 0);
    assert_eq!(polygon_winding_number_at_position(&point(2.0, 2.0), &[]), 0);
}
