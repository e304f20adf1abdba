use crate::algorithms::area::screen_signed_area;
use crate::algorithms::flatten::flatten_path;
use crate::math::{point, size, vector, Angle, Point, Transform};
use crate::path::{ArcDirection, GraphicsMode, PathBuffer, PathError, VertexKind};
use crate::point_type::*;
use crate::tessellation::{Pen, PolygonSetBuilder, RegionError};
use crate::*;

fn recorder() -> PathRecorder {
    PathRecorder::new(point(0.0, 0.0))
}

fn approx_eq(a: Point, b: Point) -> bool {
    (a - b).length() < 1e-9
}

fn kinds(path: &PathBuffer) -> Vec<VertexKind> {
    path.vertices().iter().map(|v| v.kind).collect()
}

fn positions(path: &PathBuffer) -> Vec<Point> {
    path.vertices().iter().map(|v| v.position).collect()
}

fn assert_well_formed(path: &PathBuffer) {
    if let Some(first) = path.vertices().first() {
        assert_eq!(first.kind, VertexKind::MoveTo);
    }

    let mut run = 0;
    for v in path.vertices() {
        if v.kind == VertexKind::BezierTo {
            run += 1;
        } else {
            assert_eq!(run % 3, 0, "{:?}", path);
            run = 0;
        }
    }
    assert_eq!(run % 3, 0, "{:?}", path);

    for stroke in path.strokes() {
        for v in &stroke[..stroke.len() - 1] {
            assert!(!v.closes_figure, "{:?}", path);
        }
    }
}

struct FontContext {
    state: DeviceState,
}

impl DeviceContext for FontContext {
    fn to_device(&self, points: &mut [Point]) {
        self.state.to_device(points)
    }
    fn arc_direction(&self) -> ArcDirection {
        self.state.arc_direction
    }
    fn graphics_mode(&self) -> GraphicsMode {
        self.state.graphics_mode
    }
    fn fill_rule(&self) -> crate::path::FillRule {
        self.state.fill_rule
    }
    fn pen(&self) -> Pen {
        self.state.pen
    }
    fn current_position(&self) -> Point {
        self.state.position
    }
    fn glyph_outline(&self, glyph: GlyphId) -> Option<GlyphOutline> {
        match glyph {
            // A 4x4 square.
            GlyphId(1) => Some(GlyphOutline {
                contours: vec![GlyphContour {
                    start: point(0.0, 0.0),
                    curves: vec![OutlineCurve::Line(vec![
                        point(4.0, 0.0),
                        point(4.0, 4.0),
                        point(0.0, 4.0),
                    ])],
                }],
                advance: vector(5.0, 0.0),
            }),
            // A space.
            GlyphId(2) => Some(GlyphOutline {
                contours: Vec::new(),
                advance: vector(3.0, 0.0),
            }),
            _ => None,
        }
    }
}

fn font_context() -> FontContext {
    FontContext {
        state: DeviceState::DEFAULT,
    }
}

#[test]
fn rectangle_flattens_to_four_vertices() {
    for &direction in &[ArcDirection::CounterClockwise, ArcDirection::Clockwise] {
        let dc = DeviceState::DEFAULT.with_arc_direction(direction);
        let mut rec = recorder();
        rec.rectangle(&dc, point(0.0, 0.0), point(10.0, 10.0)).unwrap();

        let flat = flatten_path(rec.path()).unwrap();
        assert_eq!(
            kinds(&flat),
            vec![
                VertexKind::MoveTo,
                VertexKind::LineTo,
                VertexKind::LineTo,
                VertexKind::LineTo
            ]
        );
        assert!(flat.vertices()[3].closes_figure);
        let area = screen_signed_area(&flat) * direction.sign();
        assert!((area - 100.0).abs() < 1e-9, "{:?}: {}", direction, area);
    }
}

#[test]
fn rectangle_keeps_the_cursor() {
    let dc = DeviceState::DEFAULT;
    let mut rec = recorder();
    rec.move_to(&dc, point(5.0, 5.0));
    rec.rectangle(&dc, point(0.0, 0.0), point(10.0, 10.0)).unwrap();
    rec.line_to(&dc, point(6.0, 6.0)).unwrap();

    assert_eq!(rec.path().len(), 6);
    assert_eq!(rec.path().vertices()[4].kind, VertexKind::MoveTo);
    assert_eq!(rec.path().vertices()[4].position, point(5.0, 5.0));
    assert_eq!(rec.cursor(), point(6.0, 6.0));
}

#[test]
fn compatible_mode_excludes_right_and_bottom_edges() {
    let dc = DeviceState::DEFAULT.with_graphics_mode(GraphicsMode::Compatible);
    let mut rec = recorder();
    rec.rectangle(&dc, point(10.0, 10.0), point(0.0, 0.0)).unwrap();
    assert_eq!(
        positions(rec.path()),
        vec![point(9.0, 0.0), point(0.0, 0.0), point(0.0, 9.0), point(9.0, 9.0)]
    );

    // Empty boxes are not recorded in compatible mode.
    rec.rectangle(&dc, point(0.0, 0.0), point(0.0, 10.0)).unwrap();
    rec.ellipse(&dc, point(0.0, 3.0), point(10.0, 3.0)).unwrap();
    assert_eq!(rec.path().len(), 4);

    let dc = DeviceState::DEFAULT;
    rec.rectangle(&dc, point(0.0, 0.0), point(0.0, 10.0)).unwrap();
    assert_eq!(rec.path().len(), 8);
}

#[test]
fn points_are_transformed() {
    let dc = DeviceState::DEFAULT.with_transform(Transform::scale(2.0, 2.0));
    let mut rec = recorder();
    rec.rectangle(&dc, point(0.0, 0.0), point(5.0, 5.0)).unwrap();
    rec.move_to(&dc, point(1.0, 1.0));
    rec.line_to(&dc, point(2.0, 1.0)).unwrap();

    assert_eq!(rec.path().vertices()[0].position, point(10.0, 0.0));
    assert_eq!(rec.path().vertices()[4].position, point(2.0, 2.0));
    assert_eq!(rec.cursor(), point(4.0, 2.0));
}

#[test]
fn stroke_continuation() {
    let dc = DeviceState::DEFAULT;
    let mut rec = recorder();

    rec.line_to(&dc, point(10.0, 0.0)).unwrap();
    rec.line_to(&dc, point(10.0, 10.0)).unwrap();
    assert_eq!(
        kinds(rec.path()),
        vec![VertexKind::MoveTo, VertexKind::LineTo, VertexKind::LineTo]
    );

    rec.move_to(&dc, point(20.0, 20.0));
    rec.line_to(&dc, point(30.0, 20.0)).unwrap();
    assert_eq!(rec.path().len(), 5);
    assert_eq!(rec.path().vertices()[3].kind, VertexKind::MoveTo);

    rec.close_figure();
    assert_eq!(rec.cursor(), point(20.0, 20.0));

    // The closed figure is not continued.
    rec.line_to(&dc, point(25.0, 25.0)).unwrap();
    assert_eq!(rec.path().len(), 7);
    assert_eq!(rec.path().vertices()[5].kind, VertexKind::MoveTo);
    assert_eq!(rec.path().vertices()[5].position, point(20.0, 20.0));
    assert_well_formed(rec.path());
}

#[test]
fn moving_away_from_the_last_point_starts_a_stroke() {
    let dc = DeviceState::DEFAULT;
    let mut rec = recorder();
    rec.poly_bezier(
        &dc,
        &[point(1.0, 1.0), point(2.0, 2.0), point(3.0, 2.0), point(4.0, 1.0)],
    )
    .unwrap();
    // poly_bezier does not move the cursor.
    assert_eq!(rec.cursor(), point(0.0, 0.0));

    rec.line_to(&dc, point(1.0, 0.0)).unwrap();
    assert_eq!(rec.path().vertices()[4].kind, VertexKind::MoveTo);
    assert_eq!(rec.path().vertices()[4].position, point(0.0, 0.0));
    assert_well_formed(rec.path());
}

#[test]
fn malformed_poly_draw_is_rolled_back() {
    let dc = DeviceState::DEFAULT;
    let mut rec = recorder();
    rec.line_to(&dc, point(5.0, 0.0)).unwrap();
    let before = rec.clone();

    let points = [
        point(1.0, 1.0),
        point(2.0, 2.0),
        point(3.0, 3.0),
        point(4.0, 4.0),
    ];
    let result = rec.poly_draw(&dc, &points, &[LINE_TO, BEZIER_TO, BEZIER_TO, LINE_TO]);
    assert_eq!(result, Err(PathError::MalformedSequence));
    assert_eq!(rec, before);

    let result = rec.poly_draw(&dc, &points, &[MOVE_TO, LINE_TO, LINE_TO, 0x10]);
    assert_eq!(result, Err(PathError::MalformedSequence));
    assert_eq!(rec, before);
    assert_eq!(rec.cursor(), point(5.0, 0.0));

    // A close flag on the first point of a curve is invalid.
    let result = rec.poly_draw(
        &dc,
        &points[..3],
        &[BEZIER_TO | CLOSE_FIGURE, BEZIER_TO, BEZIER_TO],
    );
    assert_eq!(result, Err(PathError::MalformedSequence));
    assert_eq!(rec, before);

    assert_eq!(
        rec.poly_draw(&dc, &points, &[LINE_TO]),
        Err(PathError::InvalidParameter)
    );
}

#[test]
fn poly_draw_closes_figures() {
    let dc = DeviceState::DEFAULT;
    let mut rec = recorder();
    let points = [
        point(0.0, 0.0),
        point(10.0, 0.0),
        point(10.0, 10.0),
        point(5.0, 15.0),
        point(0.0, 15.0),
        point(0.0, 10.0),
    ];
    let types = [
        MOVE_TO,
        LINE_TO,
        LINE_TO | CLOSE_FIGURE,
        BEZIER_TO,
        BEZIER_TO,
        BEZIER_TO | CLOSE_FIGURE,
    ];
    rec.poly_draw(&dc, &points, &types).unwrap();

    assert_eq!(
        kinds(rec.path()),
        vec![
            VertexKind::MoveTo,
            VertexKind::LineTo,
            VertexKind::LineTo,
            VertexKind::MoveTo,
            VertexKind::BezierTo,
            VertexKind::BezierTo,
            VertexKind::BezierTo,
        ]
    );
    assert!(rec.path().vertices()[2].closes_figure);
    assert!(rec.path().vertices()[6].closes_figure);
    assert_eq!(rec.path().vertices()[3].position, point(0.0, 0.0));
    assert_eq!(rec.cursor(), point(0.0, 0.0));
    assert_well_formed(rec.path());
}

#[test]
fn poly_bezier_counts() {
    let dc = DeviceState::DEFAULT;
    let mut rec = recorder();
    let p = [point(1.0, 0.0); 7];

    assert_eq!(rec.poly_bezier(&dc, &p[..3]), Err(PathError::InvalidParameter));
    assert_eq!(rec.poly_bezier(&dc, &p[..5]), Err(PathError::InvalidParameter));
    assert_eq!(rec.poly_bezier_to(&dc, &p[..2]), Err(PathError::InvalidParameter));
    assert_eq!(rec.poly_bezier_to(&dc, &[]), Err(PathError::InvalidParameter));
    assert_eq!(rec.polyline_to(&dc, &[]), Err(PathError::InvalidParameter));
    assert!(rec.path().is_empty());

    rec.poly_bezier(&dc, &p).unwrap();
    assert_eq!(rec.path().len(), 7);
    assert_eq!(rec.path().vertices()[0].kind, VertexKind::MoveTo);

    rec.poly_bezier_to(&dc, &p[..6]).unwrap();
    // New stroke at the cursor, then two curves.
    assert_eq!(rec.path().len(), 14);
    assert_eq!(rec.cursor(), point(1.0, 0.0));
    assert_well_formed(rec.path());
}

#[test]
fn poly_polygon_and_poly_polyline() {
    let dc = DeviceState::DEFAULT;
    let mut rec = recorder();
    let points = [
        point(0.0, 0.0),
        point(10.0, 0.0),
        point(10.0, 10.0),
        point(20.0, 0.0),
        point(30.0, 0.0),
        point(30.0, 10.0),
        point(20.0, 10.0),
    ];

    rec.poly_polygon(&dc, &points, &[3, 4]).unwrap();
    let closed: Vec<bool> = rec.path().vertices().iter().map(|v| v.closes_figure).collect();
    assert_eq!(closed, vec![false, false, true, false, false, false, true]);
    assert_eq!(rec.path().vertices()[3].kind, VertexKind::MoveTo);

    rec.poly_polyline(&dc, &points, &[2, 5]).unwrap();
    let v = &rec.path().vertices()[7..];
    assert_eq!(v[0].kind, VertexKind::MoveTo);
    assert_eq!(v[2].kind, VertexKind::MoveTo);
    assert!(v.iter().all(|v| !v.closes_figure));
    assert_eq!(rec.cursor(), point(0.0, 0.0));

    let len = rec.path().len();
    assert_eq!(rec.poly_polygon(&dc, &points, &[]), Err(PathError::InvalidParameter));
    assert_eq!(rec.poly_polygon(&dc, &points, &[1, 6]), Err(PathError::InvalidParameter));
    assert_eq!(rec.poly_polyline(&dc, &points, &[3, 3]), Err(PathError::InvalidParameter));
    assert_eq!(rec.polygon(&dc, &points[..1]), Err(PathError::InvalidParameter));
    assert_eq!(rec.path().len(), len);

    rec.polygon(&dc, &points[..3]).unwrap();
    rec.polyline(&dc, &points[..3]).unwrap();
    assert_eq!(rec.path().len(), len + 6);
    assert_well_formed(rec.path());
}

#[test]
fn round_rect() {
    let dc = DeviceState::DEFAULT;
    let mut rec = recorder();
    rec.round_rect(&dc, point(0.0, 0.0), point(100.0, 50.0), size(20.0, 10.0))
        .unwrap();

    let path = rec.path();
    assert_eq!(path.len(), 16);
    for (i, v) in path.vertices().iter().enumerate() {
        let expected = match i {
            0 => VertexKind::MoveTo,
            4 | 8 | 12 => VertexKind::LineTo,
            _ => VertexKind::BezierTo,
        };
        assert_eq!(v.kind, expected);
    }
    assert_eq!(path.vertices()[0].position, point(100.0, 5.0));
    assert!(path.vertices()[15].closes_figure);
    assert_well_formed(path);

    let area = screen_signed_area(path);
    assert!(area > 0.0 && area < 5000.0);
}

#[test]
fn round_rect_corners_are_clamped() {
    let dc = DeviceState::DEFAULT;
    let mut rec = recorder();
    rec.round_rect(&dc, point(0.0, 0.0), point(100.0, 50.0), size(400.0, 10.0))
        .unwrap();
    assert_eq!(rec.path().vertices()[3].position, point(50.0, 0.0));
    assert_eq!(rec.path().vertices()[4].position, point(50.0, 0.0));

    rec.round_rect(&dc, point(0.0, 0.0), point(100.0, 50.0), size(0.0, 10.0))
        .unwrap();
    assert_eq!(rec.path().len(), 16 + 4);
}

#[test]
fn ellipse_direction() {
    let mut areas = Vec::new();
    for &direction in &[ArcDirection::CounterClockwise, ArcDirection::Clockwise] {
        let dc = DeviceState::DEFAULT.with_arc_direction(direction);
        let mut rec = recorder();
        rec.ellipse(&dc, point(-10.0, -10.0), point(10.0, 10.0)).unwrap();

        let path = rec.path();
        assert_eq!(path.len(), 13);
        assert_eq!(path.vertices()[0].kind, VertexKind::MoveTo);
        assert!(path.vertices()[1..].iter().all(|v| v.kind == VertexKind::BezierTo));
        assert!(path.vertices()[12].closes_figure);
        assert_eq!(path.vertices()[0].position, point(10.0, 0.0));

        let area = screen_signed_area(path) * direction.sign();
        areas.push(area);
    }

    // Close to the area of the circle once flattened.
    for area in areas {
        assert!(area > 300.0 && area < 314.2, "{}", area);
    }
}

#[test]
fn arc_directions() {
    let bounds = (point(-10.0, -10.0), point(10.0, 10.0));
    let (start, end) = (point(10.0, 0.0), point(0.0, -10.0));

    let dc = DeviceState::DEFAULT;
    let mut rec = recorder();
    rec.arc(&dc, bounds.0, bounds.1, start, end).unwrap();
    assert_eq!(rec.path().len(), 4);
    assert_eq!(rec.path().vertices()[0].kind, VertexKind::MoveTo);
    assert!(approx_eq(rec.path().vertices()[3].position, point(0.0, -10.0)));
    assert_eq!(rec.cursor(), point(0.0, 0.0));

    // Three quarters the other way around.
    let dc = DeviceState::DEFAULT.with_arc_direction(ArcDirection::Clockwise);
    let mut rec = recorder();
    rec.arc(&dc, bounds.0, bounds.1, start, end).unwrap();
    assert_eq!(rec.path().len(), 10);
    assert!(approx_eq(rec.path().vertices()[3].position, point(0.0, 10.0)));
    assert!(approx_eq(rec.path().vertices()[9].position, point(0.0, -10.0)));
}

#[test]
fn arc_with_equal_angles_is_a_full_turn() {
    let dc = DeviceState::DEFAULT;
    let mut rec = recorder();
    rec.arc(
        &dc,
        point(-10.0, -10.0),
        point(10.0, 10.0),
        point(20.0, 0.0),
        point(10.0, 0.0),
    )
    .unwrap();

    assert_eq!(rec.path().len(), 13);
    assert_well_formed(rec.path());
}

#[test]
fn empty_arc_box() {
    let dc = DeviceState::DEFAULT;
    let mut rec = recorder();
    rec.pie(&dc, point(0.0, 0.0), point(0.0, 10.0), point(0.0, 0.0), point(0.0, 10.0))
        .unwrap();
    assert!(rec.path().is_empty());
}

#[test]
fn arc_to_continues_the_stroke() {
    let dc = DeviceState::DEFAULT;
    let mut rec = recorder();
    let bounds = (point(-10.0, -10.0), point(10.0, 10.0));

    rec.arc_to(&dc, bounds.0, bounds.1, point(10.0, 0.0), point(0.0, -10.0))
        .unwrap();
    assert_eq!(
        kinds(rec.path()),
        vec![
            VertexKind::MoveTo,
            VertexKind::LineTo,
            VertexKind::BezierTo,
            VertexKind::BezierTo,
            VertexKind::BezierTo
        ]
    );
    assert_eq!(rec.path().vertices()[0].position, point(0.0, 0.0));
    assert!(approx_eq(rec.cursor(), point(0.0, -10.0)));

    rec.arc_to(&dc, bounds.0, bounds.1, point(0.0, -10.0), point(-10.0, 0.0))
        .unwrap();
    assert_eq!(rec.path().len(), 9);
    assert_eq!(rec.path().vertices()[5].kind, VertexKind::LineTo);
    assert!(approx_eq(rec.cursor(), point(-10.0, 0.0)));
    assert_well_formed(rec.path());
}

#[test]
fn chord_and_pie() {
    let dc = DeviceState::DEFAULT;
    let bounds = (point(-10.0, -10.0), point(10.0, 10.0));
    let (start, end) = (point(10.0, 0.0), point(0.0, -10.0));

    let mut rec = recorder();
    rec.chord(&dc, bounds.0, bounds.1, start, end).unwrap();
    assert_eq!(rec.path().len(), 4);
    assert!(rec.path().vertices()[3].closes_figure);

    rec.pie(&dc, bounds.0, bounds.1, start, end).unwrap();
    assert_eq!(rec.path().len(), 9);
    let last = rec.path().vertices()[8];
    assert_eq!(last.kind, VertexKind::LineTo);
    assert_eq!(last.position, point(0.0, 0.0));
    assert!(last.closes_figure);
    assert_eq!(rec.cursor(), point(0.0, 0.0));
    assert_well_formed(rec.path());
}

#[test]
fn compatible_pie_center() {
    let dc = DeviceState::DEFAULT.with_graphics_mode(GraphicsMode::Compatible);
    let mut rec = recorder();
    rec.pie(&dc, point(0.0, 0.0), point(10.0, 10.0), point(10.0, 5.0), point(5.0, 0.0))
        .unwrap();

    assert_eq!(rec.path().len(), 5);
    assert_eq!(rec.path().vertices()[4].position, point(4.5, 4.5));
    assert_eq!(rec.path().vertices()[0].position, point(9.0, 4.5));
}

#[test]
fn angle_arc() {
    let dc = DeviceState::DEFAULT;
    let mut rec = recorder();
    rec.angle_arc(
        &dc,
        point(0.0, 0.0),
        10.0,
        Angle::degrees(0.0),
        Angle::degrees(90.0),
    )
    .unwrap();

    assert_eq!(rec.path().len(), 5);
    assert_eq!(rec.path().vertices()[1].kind, VertexKind::LineTo);
    assert!(approx_eq(rec.path().vertices()[1].position, point(10.0, 0.0)));
    // Positive sweeps go counter-clockwise on screen, so up first.
    assert!(approx_eq(rec.cursor(), point(0.0, -10.0)));

    rec.angle_arc(
        &dc,
        point(0.0, 0.0),
        10.0,
        Angle::degrees(90.0),
        Angle::degrees(-90.0),
    )
    .unwrap();
    assert_eq!(rec.path().len(), 9);
    assert!(approx_eq(rec.cursor(), point(10.0, 0.0)));

    assert_eq!(
        rec.angle_arc(&dc, point(0.0, 0.0), -1.0, Angle::zero(), Angle::zero()),
        Err(PathError::InvalidParameter)
    );
    assert_well_formed(rec.path());
}

#[test]
fn glyph_runs() {
    let dc = font_context();
    let origin = point(10.0, 20.0);
    let glyphs = [GlyphId(1), GlyphId(2), GlyphId(1)];

    let mut rec = recorder();
    rec.glyph_run(&dc, origin, &glyphs, Advances::Metrics).unwrap();
    assert_eq!(rec.path().len(), 8);
    assert_eq!(rec.path().vertices()[4].position, point(18.0, 20.0));
    assert_eq!(rec.path().vertices()[2].position, point(14.0, 16.0));
    assert!(rec.path().vertices()[3].closes_figure);
    assert!(rec.path().vertices()[7].closes_figure);
    assert_eq!(rec.cursor(), point(0.0, 0.0));

    let mut rec = recorder();
    rec.glyph_run(&dc, origin, &glyphs, Advances::Horizontal(&[1.0, 1.0, 1.0]))
        .unwrap();
    assert_eq!(rec.path().vertices()[4].position, point(12.0, 20.0));

    let mut rec = recorder();
    rec.glyph_run(
        &dc,
        origin,
        &glyphs,
        Advances::Pairs(&[(0.0, 2.0), (0.0, 2.0), (0.0, 2.0)]),
    )
    .unwrap();
    assert_eq!(rec.path().vertices()[4].position, point(10.0, 24.0));

    // Unknown glyphs are skipped and do not advance.
    let mut rec = recorder();
    rec.glyph_run(&dc, origin, &[GlyphId(9), GlyphId(1)], Advances::Metrics)
        .unwrap();
    assert_eq!(rec.path().len(), 4);
    assert_eq!(rec.path().vertices()[0].position, origin);

    assert_eq!(
        rec.glyph_run(&dc, origin, &glyphs, Advances::Horizontal(&[1.0])),
        Err(PathError::InvalidParameter)
    );
    assert_eq!(rec.path().len(), 4);
}

#[test]
fn everything_keeps_the_runs_of_three() {
    let dc = font_context();
    let mut rec = recorder();
    let r = (point(0.0, 0.0), point(30.0, 20.0));

    rec.line_to(&dc, point(5.0, 5.0)).unwrap();
    rec.arc_to(&dc, r.0, r.1, point(30.0, 10.0), point(0.0, 5.0)).unwrap();
    rec.poly_bezier_to(&dc, &[point(1.0, 1.0), point(2.0, 1.0), point(3.0, 0.0)])
        .unwrap();
    rec.ellipse(&dc, r.0, r.1).unwrap();
    rec.round_rect(&dc, r.0, r.1, size(4.0, 4.0)).unwrap();
    rec.chord(&dc, r.0, r.1, point(0.0, 0.0), point(30.0, 20.0)).unwrap();
    rec.pie(&dc, r.0, r.1, point(30.0, 0.0), point(0.0, 20.0)).unwrap();
    rec.angle_arc(&dc, point(5.0, 5.0), 3.0, Angle::degrees(30.0), Angle::degrees(300.0))
        .unwrap();
    rec.glyph_run(&dc, point(0.0, 40.0), &[GlyphId(1)], Advances::Metrics)
        .unwrap();
    rec.close_figure();

    assert_well_formed(rec.path());
    assert_well_formed(&flatten_path(rec.path()).unwrap());
}

#[test]
fn closed_context_has_no_recorder() {
    let mut context = PathContext::new();
    assert!(!context.is_open());
    assert_eq!(context.recorder().err(), Some(PathError::NoOpenPath));
    assert_eq!(context.end(), Err(PathError::NoOpenPath));
    assert_eq!(context.path().err(), Some(PathError::NoOpenPath));
    assert_eq!(context.flatten_path(), Err(PathError::NoOpenPath));
    assert_eq!(context.take_flat_path().err(), Some(PathError::NoOpenPath));
}

#[test]
fn begin_starts_at_the_current_position() {
    let dc = DeviceState::DEFAULT
        .with_transform(Transform::scale(2.0, 2.0))
        .with_position(point(3.0, 4.0));
    let mut context = PathContext::new();
    context.begin(&dc);
    context.recorder().unwrap().line_to(&dc, point(5.0, 5.0)).unwrap();

    // Beginning again while open does nothing.
    context.begin(&dc);
    assert_eq!(
        positions(context.recorder().unwrap().path()),
        vec![point(6.0, 8.0), point(10.0, 10.0)]
    );

    context.end().unwrap();
    assert!(!context.is_open());
    assert_eq!(context.path().unwrap().len(), 2);

    // Primitives can not be recorded anymore.
    assert_eq!(context.recorder().err(), Some(PathError::NoOpenPath));

    // A new path replaces the finished one.
    context.begin(&dc);
    assert!(context.recorder().unwrap().path().is_empty());
    context.abort();
    assert_eq!(context.path().err(), Some(PathError::NoOpenPath));
}

#[test]
fn save_and_restore() {
    let dc = DeviceState::DEFAULT;
    let mut context = PathContext::new();
    context.begin(&dc);
    context.recorder().unwrap().line_to(&dc, point(10.0, 0.0)).unwrap();

    let snapshot = context.save().unwrap();
    context.recorder().unwrap().line_to(&dc, point(10.0, 10.0)).unwrap();
    context.end().unwrap();
    assert_eq!(context.path().unwrap().len(), 3);

    context.restore(snapshot);
    assert!(context.is_open());
    assert_eq!(context.recorder().unwrap().path().len(), 2);
    assert_eq!(context.recorder().unwrap().cursor(), point(10.0, 0.0));

    context.end().unwrap();
    let finished = context.save().unwrap();
    context.abort();
    context.restore(finished);
    assert!(!context.is_open());
    assert_eq!(context.path().unwrap().len(), 2);
}

struct CountingSink {
    primitives: usize,
}

impl DeviceSink for CountingSink {
    fn draw(&mut self, _dc: &dyn DeviceContext, _primitive: &Primitive) -> Result<(), PathError> {
        self.primitives += 1;
        Ok(())
    }
}

#[test]
fn primitives_go_to_the_device_unless_recording() {
    let dc = DeviceState::DEFAULT;
    let mut sink = CountingSink { primitives: 0 };
    let mut context = PathContext::new();
    let line = Primitive::LineTo(point(1.0, 1.0));

    assert!(!context.mode(&mut sink).is_recording());
    context.draw(&mut sink, &dc, &line).unwrap();
    assert_eq!(sink.primitives, 1);

    context.begin(&dc);
    assert!(context.mode(&mut sink).is_recording());
    context.draw(&mut sink, &dc, &line).unwrap();
    context
        .draw(&mut sink, &dc, &Primitive::PolyDraw {
            points: &[point(2.0, 2.0)],
            types: &[LINE_TO | CLOSE_FIGURE],
        })
        .unwrap();
    assert_eq!(sink.primitives, 1);
    assert_eq!(context.recorder().unwrap().path().len(), 3);

    context.end().unwrap();
    context.draw(&mut (), &dc, &line).unwrap();
    assert_eq!(context.path().unwrap().len(), 3);
}

#[test]
fn terminal_operations() {
    let dc = DeviceState::DEFAULT;
    let mut context = PathContext::new();

    context.begin(&dc);
    context
        .recorder()
        .unwrap()
        .ellipse(&dc, point(0.0, 0.0), point(20.0, 20.0))
        .unwrap();
    context.end().unwrap();
    context.flatten_path().unwrap();
    assert_eq!(context.path().unwrap().len(), 33);
    assert!(!context.path().unwrap().has_curves());

    context.begin(&dc);
    context
        .recorder()
        .unwrap()
        .rectangle(&dc, point(0.0, 0.0), point(10.0, 10.0))
        .unwrap();
    context.end().unwrap();

    let cosmetic = dc.with_pen(Pen::Cosmetic { width: 1.0 });
    assert_eq!(context.widen_path(&cosmetic), Err(PathError::Unsupported));
    assert_eq!(context.path().unwrap().len(), 4);

    let saved = context.save().unwrap();
    context.widen_path(&dc).unwrap();
    // A closed figure widens into a ring.
    assert_eq!(context.path().unwrap().strokes().count(), 2);

    context.restore(saved);
    let region = context.path_to_region(&dc, &mut PolygonSetBuilder).unwrap();
    assert_eq!(region.num_polygons(), 1);
    assert!(region.contains(&point(5.0, 5.0)));
    // The path is consumed.
    assert_eq!(
        context.path_to_region(&dc, &mut PolygonSetBuilder),
        Err(RegionError::Path(PathError::NoOpenPath))
    );
}

#[test]
fn take_flat_path() {
    let dc = DeviceState::DEFAULT;
    let mut context = PathContext::new();
    context.begin(&dc);
    let recorder = context.recorder().unwrap();
    recorder.move_to(&dc, point(0.0, 0.0));
    recorder
        .poly_bezier_to(&dc, &[point(0.0, 10.0), point(10.0, 10.0), point(10.0, 0.0)])
        .unwrap();
    context.end().unwrap();

    let path = context.take_flat_path().unwrap();
    assert_eq!(path.len(), 9);
    assert_eq!(path.cursor(), point(10.0, 0.0));
    assert_eq!(context.path().err(), Some(PathError::NoOpenPath));
}
