//! Compute the area of a path.
//!
//! Every stroke is considered closed, like when the path is filled. Curves are flattened
//! the same way as by the [flatten](../flatten/index.html) module.

use crate::flatten::for_each_flattened_point;
use crate::math::{Point, Vector};
use crate::path::{PathBuffer, Vertex};

/// Compute the signed area of a stroke.
///
/// The sign follows the usual mathematical convention where the y axis points up: the
/// area is positive when the vertices go counter-clockwise in that frame.
pub fn stroke_signed_area(stroke: &[Vertex]) -> f64 {
    let mut first: Option<Point> = None;
    let mut v0 = Vector::zero();
    let mut double_area = 0.0;

    for_each_flattened_point(stroke, &mut |p| {
        let origin = match first {
            Some(origin) => origin,
            None => {
                first = Some(p);
                return;
            }
        };
        let v1 = p - origin;
        double_area += v0.cross(v1);
        v0 = v1;
    });

    double_area * 0.5
}

/// Compute the signed area of a path by summing the signed areas of its strokes.
pub fn signed_area(path: &PathBuffer) -> f64 {
    path.strokes().map(stroke_signed_area).sum()
}

/// Compute the signed area of a path as it appears on screen, with the y axis pointing
/// down.
///
/// The area is positive when the strokes go counter-clockwise on screen.
pub fn screen_signed_area(path: &PathBuffer) -> f64 {
    -signed_area(path)
}

/// Iterator over the signed areas of the strokes of a path.
pub struct SignedAreas<'l>(pub crate::path::Strokes<'l>);

impl<'l> Iterator for SignedAreas<'l> {
    type Item = f64;
    fn next(&mut self) -> Option<f64> {
        self.0.next().map(stroke_signed_area)
    }
}

#[cfg(test)]
use crate::math::point;
#[cfg(test)]
use crate::path::VertexKind;

#[test]
fn sub_path_signed_area() {
    let mut path = PathBuffer::new();

    path.push(point(0.0, 0.0), VertexKind::MoveTo).unwrap();
    path.append_run(
        &[point(1.0, 0.0), point(1.0, 1.0), point(0.0, 1.0)],
        VertexKind::LineTo,
    )
    .unwrap();
    path.close_last_stroke();

    path.push(point(0.0, 0.0), VertexKind::MoveTo).unwrap();
    path.append_run(
        &[point(0.0, 1.0), point(1.0, 1.0), point(1.0, 0.0)],
        VertexKind::LineTo,
    )
    .unwrap();
    path.close_last_stroke();

    let areas: Vec<f64> = SignedAreas(path.strokes()).collect();
    assert_eq!(areas, vec![1.0, -1.0]);
    assert_eq!(signed_area(&path), 0.0);
    assert_eq!(screen_signed_area(&path), 0.0);
}

#[test]
fn open_strokes_are_implicitly_closed() {
    let mut path = PathBuffer::new();
    path.push(point(0.0, 0.0), VertexKind::MoveTo).unwrap();
    path.append_run(&[point(0.0, 4.0), point(2.0, 0.0)], VertexKind::LineTo)
        .unwrap();

    assert_eq!(signed_area(&path), -4.0);
    assert_eq!(screen_signed_area(&path), 4.0);
}

#[test]
fn curved_stroke_area() {
    let mut path = PathBuffer::new();
    path.push(point(0.0, 0.0), VertexKind::MoveTo).unwrap();
    path.append_run(
        &[point(0.0, 1.0), point(1.0, 1.0), point(1.0, 0.0)],
        VertexKind::BezierTo,
    )
    .unwrap();

    // The exact area under this curve is 0.6, the flattened one is slightly smaller.
    let area = -signed_area(&path);
    assert!(area > 0.57 && area < 0.6, "{}", area);
}
