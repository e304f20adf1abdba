//! Bounding rectangle computation for paths.

use crate::math::{point, Box2D};
use crate::path::PathBuffer;

/// Computes a conservative axis-aligned rectangle that contains the path.
///
/// Control points are included, so the box is exact for flat paths and may be larger
/// than the curves otherwise. An empty path has an empty box at the origin.
pub fn bounding_box(path: &PathBuffer) -> Box2D {
    let mut min = point(f64::MAX, f64::MAX);
    let mut max = point(f64::MIN, f64::MIN);
    for vertex in path.vertices() {
        min = min.min(vertex.position);
        max = max.max(vertex.position);
    }

    // Return an empty rectangle by default if there was no vertex in the path.
    if min == point(f64::MAX, f64::MAX) {
        return Box2D::zero();
    }

    Box2D { min, max }
}

#[test]
fn simple_bounding_box() {
    use crate::path::VertexKind;

    let mut path = PathBuffer::new();
    path.push(point(-10.0, -3.0), VertexKind::MoveTo).unwrap();
    path.push(point(0.0, -12.0), VertexKind::LineTo).unwrap();
    path.append_run(
        &[point(15.0, 2.0), point(3.0, 1.0), point(4.0, 5.0)],
        VertexKind::BezierTo,
    )
    .unwrap();
    path.close_last_stroke();

    let bbox = bounding_box(&path);
    assert_eq!(bbox.min, point(-10.0, -12.0));
    assert_eq!(bbox.max, point(15.0, 5.0));

    assert_eq!(bounding_box(&PathBuffer::new()), Box2D::zero());
}
