use crate::algorithms::arc::{add_arc, ArcStart};
use crate::algorithms::flatten::flatten_path;
use crate::geom::arc::{arc_segment, point_at_angle};
use crate::math::{point, vector, Box2D, Point, Vector};
use crate::path::{PathBuffer, PathError, Vertex, VertexKind};
use crate::{LineCap, LineJoin, Pen, StrokeStyle};

use core::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

/// Below this, the sine of the angle between two segments is considered zero.
const STRAIGHT_EPSILON: f64 = 1e-9;

/// Widens paths into outlines.
///
/// The widened path describes the area covered by the pen: filling it with the non-zero
/// rule is equivalent to stroking the input.
///
/// The stroker keeps a few internal buffers that are reused from one call to the next.
///
/// # Examples
///
/// ```
/// # extern crate gdipath_tessellation as tess;
/// # use tess::path::{PathBuffer, VertexKind};
/// # use tess::math::point;
/// # use tess::*;
/// # fn main() -> Result<(), PathError> {
/// let mut path = PathBuffer::new();
/// path.push(point(0.0, 0.0), VertexKind::MoveTo)?;
/// path.push(point(10.0, 0.0), VertexKind::LineTo)?;
///
/// let mut stroker = Stroker::new();
/// let pen = Pen::Geometric(StrokeStyle::width(2.0).with_end_cap(LineCap::Flat));
/// let outline = stroker.widen(&path, &pen)?;
///
/// // A rectangle.
/// assert_eq!(outline.len(), 4);
/// assert!(outline.vertices()[3].closes_figure);
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct Stroker {
    points: Vec<Point>,
    up: PathBuffer,
    down: PathBuffer,
}

impl Stroker {
    pub fn new() -> Self {
        Stroker {
            points: Vec::new(),
            up: PathBuffer::new(),
            down: PathBuffer::new(),
        }
    }

    /// Widens a path with the given pen.
    ///
    /// Fails with `PathError::Unsupported` if the pen is not a geometric pen.
    pub fn widen(&mut self, path: &PathBuffer, pen: &Pen) -> Result<PathBuffer, PathError> {
        match pen.stroke_style() {
            Some(style) => self.widen_with_style(path, &style),
            None => {
                log::warn!("cannot widen a path with a cosmetic pen");
                Err(PathError::Unsupported)
            }
        }
    }

    /// Widens a path with explicit stroke parameters.
    ///
    /// Fails with `PathError::Unsupported` if the width is negative or not finite.
    pub fn widen_with_style(
        &mut self,
        path: &PathBuffer,
        style: &StrokeStyle,
    ) -> Result<PathBuffer, PathError> {
        if !style.width.is_finite() || style.width < 0.0 {
            log::warn!("cannot widen a path with a pen of width {}", style.width);
            return Err(PathError::Unsupported);
        }

        let flattened;
        let path = if path.has_curves() {
            flattened = flatten_path(path)?;
            &flattened
        } else {
            path
        };

        let mut output = PathBuffer::new();
        output.reserve(path.len() * 2)?;

        for stroke in path.strokes() {
            let (vertices, closed) = match well_formed_stroke(stroke) {
                Some(stroke) => stroke,
                None => continue,
            };

            collect_points(vertices, closed, &mut self.points)?;
            self.up.clear();
            self.down.clear();

            let mut builder = StrokeBuilder {
                style,
                width_in: (style.width * 0.5).floor(),
                width_out: style.width - (style.width * 0.5).floor(),
                up: &mut self.up,
                down: &mut self.down,
            };

            if self.points.len() == 1 {
                builder.add_dot(self.points[0], &mut output)?;
                continue;
            }

            if closed {
                builder.build_closed(&self.points)?;
                append_figure(&mut output, builder.up.vertices())?;
                append_reversed_figure(&mut output, builder.down.vertices())?;
            } else {
                builder.build_open(&self.points)?;
                let start = output.len();
                output.append_vertices(builder.up.vertices())?;
                append_reversed(&mut output, builder.down.vertices())?;
                close_figure_from(&mut output, start);
            }
        }

        output.set_cursor(path.cursor());
        log::debug!(
            "widened {} vertices into {} (width {}, {:?} caps, {:?} joins)",
            path.len(),
            output.len(),
            style.width,
            style.end_cap,
            style.join
        );

        Ok(output)
    }
}

/// Widens a path with the given pen.
///
/// Shorthand for `Stroker::new().widen(path, pen)`.
pub fn widen_path(path: &PathBuffer, pen: &Pen) -> Result<PathBuffer, PathError> {
    Stroker::new().widen(path, pen)
}

// Returns the vertices of the stroke and whether it is closed, dropping anything that
// cannot be stroked.
fn well_formed_stroke(stroke: &[Vertex]) -> Option<(&[Vertex], bool)> {
    let first = stroke.first()?;
    if first.kind != VertexKind::MoveTo {
        debug_assert!(false, "Stroke does not begin with a move-to");
        log::error!(
            "expected a move-to at the beginning of a stroke, got {:?}; skipping {} vertices",
            first.kind,
            stroke.len()
        );
        return None;
    }

    match stroke.iter().position(|v| v.closes_figure) {
        Some(idx) if idx + 1 < stroke.len() => {
            debug_assert!(false, "Vertices after the end of a closed figure");
            log::error!(
                "expected a move-to after a closed figure; skipping {} vertices",
                stroke.len() - idx - 1
            );
            Some((&stroke[..=idx], true))
        }
        Some(_) => Some((stroke, true)),
        None => Some((stroke, false)),
    }
}

fn collect_points(
    vertices: &[Vertex],
    closed: bool,
    points: &mut Vec<Point>,
) -> Result<(), PathError> {
    points.clear();
    points.try_reserve(vertices.len())?;
    for vertex in vertices {
        if points.last() != Some(&vertex.position) {
            points.push(vertex.position);
        }
    }

    if closed && points.len() > 1 && points.first() == points.last() {
        points.pop();
    }

    Ok(())
}

fn append_figure(output: &mut PathBuffer, rail: &[Vertex]) -> Result<(), PathError> {
    let start = output.len();
    output.append_vertices(rail)?;
    close_figure_from(output, start);

    Ok(())
}

fn append_reversed_figure(output: &mut PathBuffer, rail: &[Vertex]) -> Result<(), PathError> {
    let start = output.len();
    append_reversed(output, rail)?;
    close_figure_from(output, start);

    Ok(())
}

// Turns the vertices from `start` into a closed figure.
fn close_figure_from(output: &mut PathBuffer, start: usize) {
    if start >= output.len() {
        return;
    }
    output.vertices_mut()[start].kind = VertexKind::MoveTo;
    output.close_last_stroke();
}

// Appends the vertices in reverse order. Curve runs stay valid: a vertex takes the kind
// of the vertex that followed it in the original order.
fn append_reversed(output: &mut PathBuffer, rail: &[Vertex]) -> Result<(), PathError> {
    let n = rail.len();
    output.reserve(n)?;
    for k in 0..n {
        let kind = if k == 0 {
            VertexKind::LineTo
        } else {
            rail[n - k].kind
        };
        output.append(Vertex::new(rail[n - 1 - k].position, kind))?;
    }

    Ok(())
}

#[inline]
fn normal(d: Vector) -> Vector {
    vector(-d.y, d.x)
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum Side {
    Up,
    Down,
}

struct StrokeBuilder<'l> {
    style: &'l StrokeStyle,
    width_in: f64,
    width_out: f64,
    up: &'l mut PathBuffer,
    down: &'l mut PathBuffer,
}

impl<'l> StrokeBuilder<'l> {
    fn rail(&mut self, side: Side) -> &mut PathBuffer {
        match side {
            Side::Up => &mut *self.up,
            Side::Down => &mut *self.down,
        }
    }

    // The up rail is offset along the normal, the down rail against it.
    fn signed_width(&self, side: Side) -> f64 {
        match side {
            Side::Up => self.width_out,
            Side::Down => -self.width_in,
        }
    }

    // The cap box is not centered on the end point when the width is odd.
    fn cap_bounds(&self, center: Point) -> Box2D {
        Box2D {
            min: center - vector(self.width_in, self.width_in),
            max: center + vector(self.width_out, self.width_out),
        }
    }

    fn build_open(&mut self, points: &[Point]) -> Result<(), PathError> {
        let n = points.len();
        let first_dir = (points[1] - points[0]).normalize();
        self.add_start_cap(points[0], first_dir)?;

        for i in 1..n - 1 {
            self.add_join(points[i - 1], points[i], points[i + 1])?;
        }

        let last_dir = (points[n - 1] - points[n - 2]).normalize();
        self.add_end_cap(points[n - 1], last_dir)
    }

    fn build_closed(&mut self, points: &[Point]) -> Result<(), PathError> {
        let n = points.len();
        for i in 0..n {
            let prev = points[(i + n - 1) % n];
            let next = points[(i + 1) % n];
            self.add_join(prev, points[i], next)?;
        }

        Ok(())
    }

    // Goes from the down side to the up side, behind the start point.
    fn add_start_cap(&mut self, p: Point, d: Vector) -> Result<(), PathError> {
        let n = normal(d);
        let (wi, wo) = (self.width_in, self.width_out);
        match self.style.end_cap {
            LineCap::Flat => {
                self.up.push(p - n * wi, VertexKind::LineTo)?;
                self.up.push(p + n * wo, VertexKind::LineTo)
            }
            LineCap::Square => {
                self.up.push(p - n * wi - d * wi, VertexKind::LineTo)?;
                self.up.push(p + n * wo - d * wo, VertexKind::LineTo)
            }
            LineCap::Round => {
                let angle = d.y.atan2(d.x) - FRAC_PI_2;
                self.add_round_cap(p, angle)
            }
        }
    }

    // Goes from the up side to the down side, past the end point.
    fn add_end_cap(&mut self, p: Point, d: Vector) -> Result<(), PathError> {
        let n = normal(d);
        let (wi, wo) = (self.width_in, self.width_out);
        match self.style.end_cap {
            LineCap::Flat => {
                self.up.push(p + n * wo, VertexKind::LineTo)?;
                self.up.push(p - n * wi, VertexKind::LineTo)
            }
            LineCap::Square => {
                self.up.push(p + n * wo + d * wo, VertexKind::LineTo)?;
                self.up.push(p - n * wi + d * wi, VertexKind::LineTo)
            }
            LineCap::Round => {
                let angle = d.y.atan2(d.x) + FRAC_PI_2;
                self.add_round_cap(p, angle)
            }
        }
    }

    // Half a turn in four parts, decreasing angles from `start_angle`.
    fn add_round_cap(&mut self, p: Point, start_angle: f64) -> Result<(), PathError> {
        let bounds = self.cap_bounds(p);
        self.up
            .push(point_at_angle(&bounds, start_angle), VertexKind::LineTo)?;
        for part in 0..4 {
            let a0 = start_angle - part as f64 * FRAC_PI_4;
            let curve = arc_segment(&bounds, a0, a0 - FRAC_PI_4);
            self.up.append_run(
                &[curve.ctrl1, curve.ctrl2, curve.to],
                VertexKind::BezierTo,
            )?;
        }

        Ok(())
    }

    fn add_join(&mut self, prev: Point, p: Point, next: Point) -> Result<(), PathError> {
        let v0 = p - prev;
        let v1 = next - p;
        let (len0, len1) = (v0.length(), v1.length());
        let d0 = v0 / len0;
        let d1 = v1 / len1;
        let n0 = normal(d0);
        let n1 = normal(d1);
        let cross = d0.cross(d1);
        let dot = d0.dot(d1);

        let u_turn = cross.abs() <= STRAIGHT_EPSILON;
        if u_turn && dot > 0.0 {
            let (wi, wo) = (self.width_in, self.width_out);
            self.up.push(p + n0 * wo, VertexKind::LineTo)?;
            return self.down.push(p - n0 * wi, VertexKind::LineTo);
        }

        // The rail on the side the stroke turns towards is inside the turn.
        let (inside, outside) = if cross > STRAIGHT_EPSILON {
            (Side::Up, Side::Down)
        } else {
            (Side::Down, Side::Up)
        };

        // Inside: the two offset edges intersect, unless the intersection is past one of
        // the segments.
        let w = self.signed_width(inside);
        let retreat = if u_turn {
            f64::INFINITY
        } else {
            w.abs() * cross.abs() / (1.0 + dot)
        };
        if retreat > len0.min(len1) {
            let rail = self.rail(inside);
            rail.push(p + n0 * w, VertexKind::LineTo)?;
            rail.push(p + n1 * w, VertexKind::LineTo)?;
        } else {
            let miter = p + (n0 + n1) * (w / (1.0 + dot));
            self.rail(inside).push(miter, VertexKind::LineTo)?;
        }

        // Outside.
        let w = self.signed_width(outside);
        match self.style.join {
            LineJoin::Miter if !u_turn && miter_ratio(dot) <= self.style.miter_limit => {
                let miter = p + (n0 + n1) * (w / (1.0 + dot));
                self.rail(outside).push(miter, VertexKind::LineTo)
            }
            LineJoin::Round => {
                // At a u-turn the outside is the up rail, which goes around the front.
                let sweep = if u_turn { -PI } else { cross.atan2(dot) };
                let offset = n0 * w;
                let start_angle = offset.y.atan2(offset.x);
                let radius = w.abs();
                let bounds = Box2D {
                    min: p - vector(radius, radius),
                    max: p + vector(radius, radius),
                };

                let rail = self.rail(outside);
                rail.push(p + offset, VertexKind::LineTo)?;
                for part in 0..2 {
                    let a0 = start_angle + sweep * 0.5 * part as f64;
                    let curve = arc_segment(&bounds, a0, a0 + sweep * 0.5);
                    rail.append_run(&[curve.ctrl1, curve.ctrl2, curve.to], VertexKind::BezierTo)?;
                }

                Ok(())
            }
            _ => {
                let rail = self.rail(outside);
                rail.push(p + n0 * w, VertexKind::LineTo)?;
                rail.push(p + n1 * w, VertexKind::LineTo)
            }
        }
    }

    // A stroke of length zero.
    fn add_dot(&mut self, p: Point, output: &mut PathBuffer) -> Result<(), PathError> {
        let bounds = self.cap_bounds(p);
        match self.style.end_cap {
            LineCap::Flat => Ok(()),
            LineCap::Square => {
                let start = output.len();
                output.append_run(
                    &[
                        bounds.min,
                        point(bounds.max.x, bounds.min.y),
                        bounds.max,
                        point(bounds.min.x, bounds.max.y),
                    ],
                    VertexKind::LineTo,
                )?;
                close_figure_from(output, start);

                Ok(())
            }
            LineCap::Round => {
                add_arc(output, &bounds, 0.0, 2.0 * PI, ArcStart::MoveTo)?;
                output.close_last_stroke();

                Ok(())
            }
        }
    }
}

/// Ratio between the length of a miter and the pen width, as a function of the cosine
/// of the angle between the directions of the two segments.
///
/// This is `1 / sin(φ / 2)` where `φ` is the interior angle of the join.
#[inline]
fn miter_ratio(dot: f64) -> f64 {
    1.0 / ((1.0 + dot) * 0.5).sqrt()
}

#[test]
fn miter_ratio_values() {
    // Straight line.
    assert!((miter_ratio(1.0) - 1.0).abs() < 1e-12);
    // Right angle.
    assert!((miter_ratio(0.0) - 2.0f64.sqrt()).abs() < 1e-12);
    // Sharp angles have long miters.
    assert!(miter_ratio(-0.99) > 10.0);
}
