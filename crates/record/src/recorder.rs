use crate::algorithms::arc::{add_arc, ArcStart};
use crate::device::{DeviceContext, GlyphId};
use crate::geom::arc::normalized_angle;
use crate::glyph::{append_outline, Advances};
use crate::math::{normalized_box, point, vector, Angle, Box2D, Point, Size, Vector};
use crate::path::{ArcDirection, GraphicsMode, PathBuffer, PathError, VertexKind};
use crate::shapes::{ellipse_points, rectangle_points, round_rect_points};

use core::f64::consts::PI;

/// Point types of `PathRecorder::poly_draw`.
pub mod point_type {
    /// Closes the figure after the point. Combined with `LINE_TO` or the last of three
    /// `BEZIER_TO` points.
    pub const CLOSE_FIGURE: u8 = 0x01;
    pub const LINE_TO: u8 = 0x02;
    pub const BEZIER_TO: u8 = 0x04;
    pub const MOVE_TO: u8 = 0x06;
}

/// What is added around the curve of an arc.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum ArcClosure {
    /// Just the arc, beginning a new figure.
    Open,
    /// A line from the current position to the start of the arc, then the arc. The
    /// current position moves to the end of the arc.
    Continue,
    /// The arc closed by a chord.
    Chord,
    /// The arc and two lines through the center of the ellipse.
    Pie,
}

/// A drawing primitive, with its parameters in logical coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Primitive<'l> {
    MoveTo(Point),
    LineTo(Point),
    PolylineTo(&'l [Point]),
    PolyBezier(&'l [Point]),
    PolyBezierTo(&'l [Point]),
    PolyDraw {
        points: &'l [Point],
        types: &'l [u8],
    },
    Polygon(&'l [Point]),
    Polyline(&'l [Point]),
    PolyPolygon {
        points: &'l [Point],
        counts: &'l [usize],
    },
    PolyPolyline {
        points: &'l [Point],
        counts: &'l [usize],
    },
    Rectangle {
        from: Point,
        to: Point,
    },
    RoundRect {
        from: Point,
        to: Point,
        ellipse: Size,
    },
    Ellipse {
        from: Point,
        to: Point,
    },
    /// `Arc`, `ArcTo`, `Chord` and `Pie`, depending on the closure.
    Arc {
        from: Point,
        to: Point,
        start: Point,
        end: Point,
        closure: ArcClosure,
    },
    AngleArc {
        center: Point,
        radius: f64,
        start_angle: Angle,
        sweep_angle: Angle,
    },
    GlyphRun {
        origin: Point,
        glyphs: &'l [GlyphId],
        advances: Advances<'l>,
    },
    CloseFigure,
}

/// Lowers drawing primitives into a path.
///
/// Coordinates are converted to device space with the `DeviceContext` given to each call.
/// Primitives that add several vertices either add all of them or, on error, leave the
/// path and its cursor untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathRecorder {
    path: PathBuffer,
}

impl PathRecorder {
    /// A recorder with an empty path whose cursor is at `position`, in device space.
    pub fn new(position: Point) -> Self {
        PathRecorder {
            path: PathBuffer::starting_at(position),
        }
    }

    pub fn with_path(path: PathBuffer) -> Self {
        PathRecorder { path }
    }

    #[inline]
    pub fn path(&self) -> &PathBuffer {
        &self.path
    }

    pub fn into_path(self) -> PathBuffer {
        self.path
    }

    /// The current position in device space.
    #[inline]
    pub fn cursor(&self) -> Point {
        self.path.cursor()
    }

    pub fn try_clone(&self) -> Result<Self, PathError> {
        Ok(PathRecorder {
            path: self.path.try_clone()?,
        })
    }

    /// Records a primitive.
    pub fn record(
        &mut self,
        dc: &dyn DeviceContext,
        primitive: &Primitive,
    ) -> Result<(), PathError> {
        match *primitive {
            Primitive::MoveTo(to) => {
                self.move_to(dc, to);
                Ok(())
            }
            Primitive::LineTo(to) => self.line_to(dc, to),
            Primitive::PolylineTo(points) => self.polyline_to(dc, points),
            Primitive::PolyBezier(points) => self.poly_bezier(dc, points),
            Primitive::PolyBezierTo(points) => self.poly_bezier_to(dc, points),
            Primitive::PolyDraw { points, types } => self.poly_draw(dc, points, types),
            Primitive::Polygon(points) => self.polygon(dc, points),
            Primitive::Polyline(points) => self.polyline(dc, points),
            Primitive::PolyPolygon { points, counts } => self.poly_polygon(dc, points, counts),
            Primitive::PolyPolyline { points, counts } => self.poly_polyline(dc, points, counts),
            Primitive::Rectangle { from, to } => self.rectangle(dc, from, to),
            Primitive::RoundRect { from, to, ellipse } => self.round_rect(dc, from, to, ellipse),
            Primitive::Ellipse { from, to } => self.ellipse(dc, from, to),
            Primitive::Arc {
                from,
                to,
                start,
                end,
                closure,
            } => self.arc_with_closure(dc, from, to, start, end, closure),
            Primitive::AngleArc {
                center,
                radius,
                start_angle,
                sweep_angle,
            } => self.angle_arc(dc, center, radius, start_angle, sweep_angle),
            Primitive::GlyphRun {
                origin,
                glyphs,
                advances,
            } => self.glyph_run(dc, origin, glyphs, advances),
            Primitive::CloseFigure => {
                self.close_figure();
                Ok(())
            }
        }
    }

    /// Moves the current position. The next primitive drawn from the current position
    /// begins a new stroke there.
    pub fn move_to(&mut self, dc: &dyn DeviceContext, to: Point) {
        self.path.set_new_stroke(true);
        self.path.set_cursor(dc.point_to_device(to));
    }

    pub fn line_to(&mut self, dc: &dyn DeviceContext, to: Point) -> Result<(), PathError> {
        self.add_points_from_cursor(dc, &[to], VertexKind::LineTo)
    }

    /// Lines from the current position through each point.
    pub fn polyline_to(
        &mut self,
        dc: &dyn DeviceContext,
        points: &[Point],
    ) -> Result<(), PathError> {
        if points.is_empty() {
            return Err(PathError::InvalidParameter);
        }

        self.add_points_from_cursor(dc, points, VertexKind::LineTo)
    }

    /// Bézier curves from the current position, three points per curve.
    pub fn poly_bezier_to(
        &mut self,
        dc: &dyn DeviceContext,
        points: &[Point],
    ) -> Result<(), PathError> {
        if points.is_empty() || points.len() % 3 != 0 {
            return Err(PathError::InvalidParameter);
        }

        self.add_points_from_cursor(dc, points, VertexKind::BezierTo)
    }

    /// A new figure made of bézier curves: a start point followed by three points per
    /// curve. The current position does not change.
    pub fn poly_bezier(
        &mut self,
        dc: &dyn DeviceContext,
        points: &[Point],
    ) -> Result<(), PathError> {
        if points.len() < 4 || (points.len() - 1) % 3 != 0 {
            return Err(PathError::InvalidParameter);
        }

        let points = device_points(dc, points)?;
        let vertices = self.path.append_run(&points, VertexKind::BezierTo)?;
        vertices[0].kind = VertexKind::MoveTo;

        Ok(())
    }

    /// Records a sequence of points tagged with `point_type` values.
    ///
    /// Fails with `MalformedSequence` on an unknown type or if a `BEZIER_TO` point is not
    /// followed by two more, in which case nothing is recorded.
    pub fn poly_draw(
        &mut self,
        dc: &dyn DeviceContext,
        points: &[Point],
        types: &[u8],
    ) -> Result<(), PathError> {
        use self::point_type::*;

        if points.len() != types.len() {
            return Err(PathError::InvalidParameter);
        }

        self.transaction(|recorder| {
            let mut i = 0;
            while i < points.len() {
                match types[i] {
                    MOVE_TO => recorder.move_to(dc, points[i]),
                    t if t & !CLOSE_FIGURE == LINE_TO => {
                        recorder.add_points_from_cursor(dc, &points[i..i + 1], VertexKind::LineTo)?;
                    }
                    BEZIER_TO
                        if i + 2 < points.len()
                            && types[i + 1] == BEZIER_TO
                            && types[i + 2] & !CLOSE_FIGURE == BEZIER_TO =>
                    {
                        recorder.add_points_from_cursor(
                            dc,
                            &points[i..i + 3],
                            VertexKind::BezierTo,
                        )?;
                        i += 2;
                    }
                    t => {
                        log::warn!("unexpected point type {:#x} at index {} in poly-draw", t, i);
                        return Err(PathError::MalformedSequence);
                    }
                }

                if types[i] & CLOSE_FIGURE != 0 {
                    recorder.close_figure();
                }
                i += 1;
            }

            Ok(())
        })
    }

    /// A closed figure through the points.
    pub fn polygon(&mut self, dc: &dyn DeviceContext, points: &[Point]) -> Result<(), PathError> {
        self.poly_polygon(dc, points, &[points.len()])
    }

    /// An open figure through the points.
    pub fn polyline(&mut self, dc: &dyn DeviceContext, points: &[Point]) -> Result<(), PathError> {
        self.poly_polyline(dc, points, &[points.len()])
    }

    /// Several closed figures. `counts` gives the number of points of each polygon.
    pub fn poly_polygon(
        &mut self,
        dc: &dyn DeviceContext,
        points: &[Point],
        counts: &[usize],
    ) -> Result<(), PathError> {
        self.add_figures(dc, points, counts, true)
    }

    /// Several open figures. `counts` gives the number of points of each polyline.
    pub fn poly_polyline(
        &mut self,
        dc: &dyn DeviceContext,
        points: &[Point],
        counts: &[usize],
    ) -> Result<(), PathError> {
        self.add_figures(dc, points, counts, false)
    }

    fn add_figures(
        &mut self,
        dc: &dyn DeviceContext,
        points: &[Point],
        counts: &[usize],
        closed: bool,
    ) -> Result<(), PathError> {
        if counts.is_empty() || counts.iter().any(|&count| count < 2) {
            return Err(PathError::InvalidParameter);
        }
        let total = counts
            .iter()
            .try_fold(0usize, |total, &count| total.checked_add(count));
        if total != Some(points.len()) {
            return Err(PathError::InvalidParameter);
        }

        let points = device_points(dc, points)?;
        let vertices = self.path.append_run(&points, VertexKind::LineTo)?;
        let mut start = 0;
        for &count in counts {
            vertices[start].kind = VertexKind::MoveTo;
            vertices[start + count - 1].closes_figure = closed;
            start += count;
        }

        Ok(())
    }

    /// A closed rectangle with corners `from` and `to`.
    pub fn rectangle(
        &mut self,
        dc: &dyn DeviceContext,
        from: Point,
        to: Point,
    ) -> Result<(), PathError> {
        let bounds = match shape_bounds(dc, from, to) {
            Some(bounds) => bounds,
            None => return Ok(()),
        };

        let mut points = rectangle_points(&bounds);
        if dc.arc_direction() == ArcDirection::Clockwise {
            points.reverse();
        }

        add_closed_shape(&mut self.path, &points, VertexKind::LineTo)?;

        Ok(())
    }

    /// A rectangle whose corners are quarters of an ellipse of size `ellipse`.
    ///
    /// A zero ellipse size gives a plain rectangle.
    pub fn round_rect(
        &mut self,
        dc: &dyn DeviceContext,
        from: Point,
        to: Point,
        ellipse: Size,
    ) -> Result<(), PathError> {
        if ellipse.width == 0.0 || ellipse.height == 0.0 {
            return self.rectangle(dc, from, to);
        }

        let bounds = match shape_bounds(dc, from, to) {
            Some(bounds) => bounds,
            None => return Ok(()),
        };

        let mut size = [point(0.0, 0.0), point(ellipse.width, ellipse.height)];
        dc.to_device(&mut size);
        let radii = Size::new(
            (size[1].x - size[0].x).abs().min(bounds.width()) * 0.5,
            (size[1].y - size[0].y).abs().min(bounds.height()) * 0.5,
        );

        let mut points = round_rect_points(&bounds, radii);
        if dc.arc_direction() == ArcDirection::Clockwise {
            points.reverse();
        }

        let vertices = add_closed_shape(&mut self.path, &points, VertexKind::BezierTo)?;
        for &i in &[4, 8, 12] {
            vertices[i].kind = VertexKind::LineTo;
        }

        Ok(())
    }

    /// A closed ellipse inscribed in the box with corners `from` and `to`.
    pub fn ellipse(
        &mut self,
        dc: &dyn DeviceContext,
        from: Point,
        to: Point,
    ) -> Result<(), PathError> {
        let bounds = match shape_bounds(dc, from, to) {
            Some(bounds) => bounds,
            None => return Ok(()),
        };

        let mut points = ellipse_points(&bounds);
        if dc.arc_direction() == ArcDirection::Clockwise {
            points.reverse();
        }

        add_closed_shape(&mut self.path, &points, VertexKind::BezierTo)?;

        Ok(())
    }

    /// An arc of the ellipse inscribed in the box with corners `from` and `to`, from the
    /// radial through `start` to the radial through `end`.
    pub fn arc(
        &mut self,
        dc: &dyn DeviceContext,
        from: Point,
        to: Point,
        start: Point,
        end: Point,
    ) -> Result<(), PathError> {
        self.arc_with_closure(dc, from, to, start, end, ArcClosure::Open)
    }

    /// Like `arc`, connected to the current position, which then moves to the end of
    /// the arc.
    pub fn arc_to(
        &mut self,
        dc: &dyn DeviceContext,
        from: Point,
        to: Point,
        start: Point,
        end: Point,
    ) -> Result<(), PathError> {
        self.arc_with_closure(dc, from, to, start, end, ArcClosure::Continue)
    }

    pub fn chord(
        &mut self,
        dc: &dyn DeviceContext,
        from: Point,
        to: Point,
        start: Point,
        end: Point,
    ) -> Result<(), PathError> {
        self.arc_with_closure(dc, from, to, start, end, ArcClosure::Chord)
    }

    pub fn pie(
        &mut self,
        dc: &dyn DeviceContext,
        from: Point,
        to: Point,
        start: Point,
        end: Point,
    ) -> Result<(), PathError> {
        self.arc_with_closure(dc, from, to, start, end, ArcClosure::Pie)
    }

    pub fn arc_with_closure(
        &mut self,
        dc: &dyn DeviceContext,
        from: Point,
        to: Point,
        start: Point,
        end: Point,
        closure: ArcClosure,
    ) -> Result<(), PathError> {
        self.elliptic_arc(dc, from, to, start, end, dc.arc_direction(), closure)
    }

    /// An arc of the circle of center `center`, from `start_angle` and sweeping
    /// `sweep_angle` (counter-clockwise on screen when positive), connected to the
    /// current position.
    pub fn angle_arc(
        &mut self,
        dc: &dyn DeviceContext,
        center: Point,
        radius: f64,
        start_angle: Angle,
        sweep_angle: Angle,
    ) -> Result<(), PathError> {
        if !(radius >= 0.0) {
            return Err(PathError::InvalidParameter);
        }

        let end_angle = start_angle + sweep_angle;
        let start = center + vector(start_angle.radians.cos(), -start_angle.radians.sin()) * radius;
        let end = center + vector(end_angle.radians.cos(), -end_angle.radians.sin()) * radius;
        let direction = if sweep_angle.radians >= 0.0 {
            ArcDirection::CounterClockwise
        } else {
            ArcDirection::Clockwise
        };
        let r = vector(radius, radius);

        self.elliptic_arc(
            dc,
            center - r,
            center + r,
            start,
            end,
            direction,
            ArcClosure::Continue,
        )
    }

    fn elliptic_arc(
        &mut self,
        dc: &dyn DeviceContext,
        from: Point,
        to: Point,
        start: Point,
        end: Point,
        direction: ArcDirection,
        closure: ArcClosure,
    ) -> Result<(), PathError> {
        let mut points = [from, to, start, end];
        dc.to_device(&mut points);

        let mut bounds = normalized_box(points[0], points[1]);
        if bounds.width() == 0.0 || bounds.height() == 0.0 {
            return Ok(());
        }

        let start_angle = normalized_angle(&bounds, points[2]);
        let mut end_angle = normalized_angle(&bounds, points[3]);
        match direction {
            ArcDirection::Clockwise if end_angle <= start_angle => end_angle += 2.0 * PI,
            ArcDirection::CounterClockwise if end_angle >= start_angle => end_angle -= 2.0 * PI,
            _ => {}
        }

        if dc.graphics_mode() == GraphicsMode::Compatible {
            bounds.max -= vector(1.0, 1.0);
        }

        self.transaction(|recorder| {
            let arc_start = if closure == ArcClosure::Continue {
                recorder.start_new_stroke()?;
                ArcStart::LineTo
            } else {
                ArcStart::MoveTo
            };

            let path = &mut recorder.path;
            add_arc(path, &bounds, start_angle, end_angle, arc_start)?;

            match closure {
                ArcClosure::Open => {}
                ArcClosure::Continue => path.update_cursor_to_last(),
                ArcClosure::Chord => close_tail(path),
                ArcClosure::Pie => {
                    path.push(bounds.center(), VertexKind::LineTo)?;
                    close_tail(path);
                }
            }

            Ok(())
        })
    }

    /// Appends the outlines of a run of glyphs, the first one at `origin`.
    ///
    /// Glyphs without an outline are skipped. With `Advances::Metrics` they do not move
    /// the pen either.
    pub fn glyph_run(
        &mut self,
        dc: &dyn DeviceContext,
        origin: Point,
        glyphs: &[GlyphId],
        advances: Advances,
    ) -> Result<(), PathError> {
        if !advances.covers(glyphs.len()) {
            return Err(PathError::InvalidParameter);
        }

        let origin = dc.point_to_device(origin);
        self.transaction(|recorder| {
            let mut offset = Vector::zero();
            for (idx, &glyph) in glyphs.iter().enumerate() {
                let outline = dc.glyph_outline(glyph);
                if let Some(outline) = &outline {
                    append_outline(&mut recorder.path, outline, origin + offset)?;
                } else {
                    log::warn!("no outline for {:?}", glyph);
                }

                offset += match advances {
                    Advances::Horizontal(dx) => vector(dx[idx], 0.0),
                    Advances::Pairs(pairs) => vector(pairs[idx].0, pairs[idx].1),
                    Advances::Metrics => outline
                        .map(|outline| outline.advance)
                        .unwrap_or_else(Vector::zero),
                };
            }

            Ok(())
        })
    }

    /// Closes the last figure and moves the current position to its first point.
    pub fn close_figure(&mut self) {
        self.path.close_last_stroke();
    }

    // Adds a move-to at the cursor unless the points continue the last stroke.
    fn start_new_stroke(&mut self) -> Result<(), PathError> {
        let path = &mut self.path;
        let continues = !path.new_stroke()
            && path
                .last()
                .map(|last| !last.closes_figure && last.position == path.cursor())
                .unwrap_or(false);

        if continues {
            return Ok(());
        }

        let cursor = path.cursor();
        path.push(cursor, VertexKind::MoveTo)?;
        path.set_new_stroke(false);

        Ok(())
    }

    fn add_points_from_cursor(
        &mut self,
        dc: &dyn DeviceContext,
        points: &[Point],
        kind: VertexKind,
    ) -> Result<(), PathError> {
        let points = device_points(dc, points)?;
        self.transaction(|recorder| {
            recorder.start_new_stroke()?;
            recorder.path.append_run(&points, kind)?;
            recorder.path.update_cursor_to_last();

            Ok(())
        })
    }

    fn transaction<F>(&mut self, f: F) -> Result<(), PathError>
    where
        F: FnOnce(&mut Self) -> Result<(), PathError>,
    {
        let checkpoint = self.path.checkpoint();
        let result = f(self);
        if result.is_err() {
            self.path.rollback(checkpoint);
        }

        result
    }
}

fn device_points(dc: &dyn DeviceContext, points: &[Point]) -> Result<Vec<Point>, PathError> {
    let mut result = Vec::new();
    result.try_reserve_exact(points.len())?;
    result.extend_from_slice(points);
    dc.to_device(&mut result);

    Ok(result)
}

// The device space box of a shape. In compatible mode the right and bottom edges are
// excluded and empty boxes draw nothing.
fn shape_bounds(dc: &dyn DeviceContext, from: Point, to: Point) -> Option<Box2D> {
    let mut corners = [from, to];
    dc.to_device(&mut corners);
    let mut bounds = normalized_box(corners[0], corners[1]);

    if dc.graphics_mode() == GraphicsMode::Compatible {
        if bounds.width() == 0.0 || bounds.height() == 0.0 {
            return None;
        }
        bounds.max -= vector(1.0, 1.0);
    }

    Some(bounds)
}

// Adds a closed figure. The current position is not affected.
fn add_closed_shape<'l>(
    path: &'l mut PathBuffer,
    points: &[Point],
    kind: VertexKind,
) -> Result<&'l mut [crate::path::Vertex], PathError> {
    let vertices = path.append_run(points, kind)?;
    vertices[0].kind = VertexKind::MoveTo;
    if let Some(last) = vertices.last_mut() {
        last.closes_figure = true;
    }

    Ok(vertices)
}

fn close_tail(path: &mut PathBuffer) {
    if let Some(last) = path.vertices_mut().last_mut() {
        last.closes_figure = true;
    }
}
