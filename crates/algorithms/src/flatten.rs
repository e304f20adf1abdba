//! Approximate the curves of a path with line segments.
//!
//! Each cubic bézier curve is split in halves recursively `FLATTEN_DEPTH` times, which
//! always produces `2^FLATTEN_DEPTH` lines per curve regardless of its size.

use crate::geom::CubicBezierSegment;
use crate::math::Point;
use crate::path::{PathBuffer, PathError, Vertex, VertexKind};

/// Number of recursive subdivisions applied to each curve.
pub const FLATTEN_DEPTH: u32 = 3;

/// Number of line segments each curve is replaced with.
pub const LINES_PER_CURVE: usize = 1 << FLATTEN_DEPTH;

/// Returns a copy of the path where every `BezierTo` run is replaced with `LineTo`
/// vertices.
///
/// `MoveTo` vertices, closing flags, the cursor and the new stroke flag are kept. The
/// closing flag of a curve moves to its last line. Flattening a path without curves
/// returns an identical path.
pub fn flatten_path(path: &PathBuffer) -> Result<PathBuffer, PathError> {
    let vertices = path.vertices();
    let num_curves = vertices
        .iter()
        .filter(|v| v.kind == VertexKind::BezierTo)
        .count()
        / 3;

    let mut output = PathBuffer::starting_at(path.cursor());
    output.set_new_stroke(path.new_stroke());
    output.reserve(vertices.len() + num_curves * (LINES_PER_CURVE - 3))?;

    let mut i = 0;
    while i < vertices.len() {
        let vertex = vertices[i];
        if vertex.kind != VertexKind::BezierTo {
            output.append(vertex)?;
            i += 1;
            continue;
        }

        match curve_at(vertices, i) {
            Some(curve) => {
                let closes_figure = vertices[i + 2].closes_figure;
                let mut result = Ok(());
                let mut count = 0;
                curve.for_each_subdivided(FLATTEN_DEPTH, &mut |p| {
                    count += 1;
                    let mut line = Vertex::new(p, VertexKind::LineTo);
                    line.closes_figure = closes_figure && count == LINES_PER_CURVE;
                    if result.is_ok() {
                        result = output.append(line);
                    }
                });
                result?;
                i += 3;
            }
            None => {
                debug_assert!(false, "Incomplete curve at vertex {}", i);
                log::error!("incomplete curve at vertex {}, flattened as a line", i);
                output.append(Vertex {
                    kind: VertexKind::LineTo,
                    ..vertex
                })?;
                i += 1;
            }
        }
    }

    Ok(output)
}

/// The curve whose first control point is at `index`, if the vertices describe one.
pub fn curve_at(vertices: &[Vertex], index: usize) -> Option<CubicBezierSegment> {
    if index == 0 || index + 2 >= vertices.len() {
        return None;
    }

    let run = &vertices[index..index + 3];
    if run.iter().any(|v| v.kind != VertexKind::BezierTo) {
        return None;
    }

    Some(CubicBezierSegment {
        from: vertices[index - 1].position,
        ctrl1: run[0].position,
        ctrl2: run[1].position,
        to: run[2].position,
    })
}

/// Invokes the callback with the points of the polyline approximating a stroke, starting
/// with its first vertex.
///
/// The implicit closing edge is not represented.
pub fn for_each_flattened_point<F>(stroke: &[Vertex], callback: &mut F)
where
    F: FnMut(Point),
{
    let mut i = 0;
    while i < stroke.len() {
        if stroke[i].kind == VertexKind::BezierTo {
            if let Some(curve) = curve_at(stroke, i) {
                curve.for_each_subdivided(FLATTEN_DEPTH, callback);
                i += 3;
                continue;
            }
        }

        callback(stroke[i].position);
        i += 1;
    }
}

#[cfg(test)]
use crate::math::point;

#[test]
fn flatten_replaces_curves() {
    let mut path = PathBuffer::new();
    path.push(point(0.0, 0.0), VertexKind::MoveTo).unwrap();
    path.append_run(
        &[point(0.0, 10.0), point(10.0, 10.0), point(10.0, 0.0)],
        VertexKind::BezierTo,
    )
    .unwrap();
    path.close_last_stroke();
    path.push(point(20.0, 0.0), VertexKind::MoveTo).unwrap();
    path.push(point(30.0, 0.0), VertexKind::LineTo).unwrap();

    let flat = flatten_path(&path).unwrap();
    let vertices = flat.vertices();

    assert_eq!(vertices.len(), 1 + LINES_PER_CURVE + 2);
    assert!(!flat.has_curves());
    assert_eq!(vertices[0].kind, VertexKind::MoveTo);
    assert_eq!(vertices[LINES_PER_CURVE].position, point(10.0, 0.0));
    assert!(vertices[LINES_PER_CURVE].closes_figure);
    for v in &vertices[1..LINES_PER_CURVE] {
        assert_eq!(v.kind, VertexKind::LineTo);
        assert!(!v.closes_figure);
    }
    assert_eq!(vertices[LINES_PER_CURVE + 1].kind, VertexKind::MoveTo);
    assert_eq!(flat.cursor(), path.cursor());
    assert_eq!(flat.new_stroke(), path.new_stroke());
}

#[test]
fn flatten_is_idempotent_on_flat_paths() {
    let mut path = PathBuffer::starting_at(point(4.0, 4.0));
    path.push(point(0.0, 0.0), VertexKind::MoveTo).unwrap();
    path.append_run(&[point(1.0, 0.0), point(1.0, 1.0)], VertexKind::LineTo)
        .unwrap();
    path.close_last_stroke();
    path.set_new_stroke(false);

    let once = flatten_path(&path).unwrap();
    assert_eq!(once, path);
    assert_eq!(flatten_path(&once).unwrap(), once);

    let empty = PathBuffer::new();
    assert_eq!(flatten_path(&empty).unwrap(), empty);
}

#[test]
fn flattened_points_of_a_stroke() {
    let mut path = PathBuffer::new();
    path.push(point(0.0, 0.0), VertexKind::MoveTo).unwrap();
    path.push(point(1.0, 0.0), VertexKind::LineTo).unwrap();
    path.append_run(
        &[point(2.0, 0.0), point(3.0, 1.0), point(3.0, 2.0)],
        VertexKind::BezierTo,
    )
    .unwrap();

    let mut points = Vec::new();
    for_each_flattened_point(path.vertices(), &mut |p| points.push(p));
    assert_eq!(points.len(), 2 + LINES_PER_CURVE);
    assert_eq!(points[0], point(0.0, 0.0));
    assert_eq!(*points.last().unwrap(), point(3.0, 2.0));
}
