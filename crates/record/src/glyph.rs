//! Conversion of glyph outlines into path strokes.

use crate::device::{GlyphContour, GlyphOutline, OutlineCurve};
use crate::geom::QuadraticBezierSegment;
use crate::math::{point, Point};
use crate::path::{PathBuffer, PathError, VertexKind};

/// The displacement of the pen after each glyph of a run.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Advances<'l> {
    /// The advance given by the glyph metrics.
    Metrics,
    /// One horizontal displacement per glyph.
    Horizontal(&'l [f64]),
    /// One (dx, dy) displacement per glyph.
    Pairs(&'l [(f64, f64)]),
}

impl<'l> Advances<'l> {
    /// Whether there is an advance for each of `count` glyphs.
    pub fn covers(&self, count: usize) -> bool {
        match *self {
            Advances::Metrics => true,
            Advances::Horizontal(dx) => dx.len() >= count,
            Advances::Pairs(pairs) => pairs.len() >= count,
        }
    }
}

/// Appends each contour of a glyph as a closed stroke, the glyph origin being at `origin`
/// in device space.
///
/// The outline's y axis points up. On error the path may contain part of the glyph; the
/// caller rolls it back.
pub(crate) fn append_outline(
    path: &mut PathBuffer,
    outline: &GlyphOutline,
    origin: Point,
) -> Result<(), PathError> {
    let to_device = |p: Point| point(origin.x + p.x, origin.y - p.y);

    for contour in &outline.contours {
        append_contour(path, contour, &to_device)?;
    }

    Ok(())
}

fn append_contour<F>(
    path: &mut PathBuffer,
    contour: &GlyphContour,
    to_device: &F,
) -> Result<(), PathError>
where
    F: Fn(Point) -> Point,
{
    path.push(to_device(contour.start), VertexKind::MoveTo)?;

    let mut current = contour.start;
    for curve in &contour.curves {
        match curve {
            OutlineCurve::Line(points) => {
                for &p in points {
                    path.push(to_device(p), VertexKind::LineTo)?;
                }
            }
            OutlineCurve::QuadSpline(points) => {
                append_quad_spline(path, current, points, to_device)?;
            }
            OutlineCurve::CubicSpline(points) => {
                if points.len() % 3 != 0 {
                    log::warn!(
                        "cubic spline with {} points in a glyph outline",
                        points.len()
                    );
                    return Err(PathError::MalformedSequence);
                }
                for p in points.chunks(3) {
                    path.append_run(
                        &[to_device(p[0]), to_device(p[1]), to_device(p[2])],
                        VertexKind::BezierTo,
                    )?;
                }
            }
        }

        if let Some(&last) = curve.points().last() {
            current = last;
        }
    }

    if let Some(last) = path.vertices_mut().last_mut() {
        last.closes_figure = true;
    }

    Ok(())
}

// A single point is a line. Otherwise each pair of consecutive control points has an
// implied on-curve point in the middle.
fn append_quad_spline<F>(
    path: &mut PathBuffer,
    from: Point,
    points: &[Point],
    to_device: &F,
) -> Result<(), PathError>
where
    F: Fn(Point) -> Point,
{
    match points.len() {
        0 => return Ok(()),
        1 => return path.push(to_device(points[0]), VertexKind::LineTo),
        _ => {}
    }

    let last = points.len() - 1;
    let mut from = from;
    for i in 0..last {
        let ctrl = points[i];
        let to = if i + 1 == last {
            points[last]
        } else {
            ctrl.lerp(points[i + 1], 0.5)
        };

        let cubic = QuadraticBezierSegment { from, ctrl, to }.to_cubic();
        path.append_run(
            &[
                to_device(cubic.ctrl1),
                to_device(cubic.ctrl2),
                to_device(cubic.to),
            ],
            VertexKind::BezierTo,
        )?;
        from = to;
    }

    Ok(())
}

#[cfg(test)]
use crate::math::vector;

#[cfg(test)]
fn square_glyph() -> GlyphOutline {
    GlyphOutline {
        contours: vec![GlyphContour {
            start: point(0.0, 0.0),
            curves: vec![OutlineCurve::Line(vec![
                point(4.0, 0.0),
                point(4.0, 4.0),
                point(0.0, 4.0),
            ])],
        }],
        advance: vector(5.0, 0.0),
    }
}

#[test]
fn contours_are_closed_and_flipped() {
    let mut path = PathBuffer::new();
    append_outline(&mut path, &square_glyph(), point(10.0, 20.0)).unwrap();

    let v = path.vertices();
    assert_eq!(v.len(), 4);
    assert_eq!(v[0].kind, VertexKind::MoveTo);
    assert_eq!(v[0].position, point(10.0, 20.0));
    assert_eq!(v[2].position, point(14.0, 16.0));
    assert!(v[3].closes_figure);
    assert!(!v[2].closes_figure);
}

#[test]
fn quad_spline_midpoints() {
    let outline = GlyphOutline {
        contours: vec![GlyphContour {
            start: point(0.0, 0.0),
            curves: vec![OutlineCurve::QuadSpline(vec![
                point(0.0, 4.0),
                point(4.0, 4.0),
                point(4.0, 0.0),
            ])],
        }],
        advance: vector(5.0, 0.0),
    };

    let mut path = PathBuffer::new();
    append_outline(&mut path, &outline, point(0.0, 0.0)).unwrap();

    // Two quadratic curves elevated to cubics.
    let v = path.vertices();
    assert_eq!(v.len(), 7);
    assert!(v[1..].iter().all(|v| v.kind == VertexKind::BezierTo));
    // Implied on-curve point between the two control points, y flipped.
    assert_eq!(v[3].position, point(2.0, -4.0));
    assert_eq!(v[6].position, point(4.0, 0.0));
    assert!(v[6].closes_figure);
}

#[test]
fn malformed_cubic_spline() {
    let outline = GlyphOutline {
        contours: vec![GlyphContour {
            start: point(0.0, 0.0),
            curves: vec![OutlineCurve::CubicSpline(vec![point(1.0, 1.0), point(2.0, 2.0)])],
        }],
        advance: vector(5.0, 0.0),
    };

    let mut path = PathBuffer::new();
    assert_eq!(
        append_outline(&mut path, &outline, point(0.0, 0.0)),
        Err(PathError::MalformedSequence)
    );
}

#[test]
fn advances_cover_the_run() {
    assert!(Advances::Metrics.covers(10));
    assert!(Advances::Horizontal(&[1.0, 2.0]).covers(2));
    assert!(!Advances::Pairs(&[(1.0, 0.0)]).covers(2));
}
