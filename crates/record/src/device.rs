//! The interface between the recorder and the drawing context it records for.

use crate::math::{Point, Transform, Vector};
use crate::path::{ArcDirection, FillRule, GraphicsMode};
use crate::tessellation::Pen;

/// The state of a drawing context that the path engine reads.
///
/// Drawing primitives are given in logical coordinates and `to_device` maps them to the
/// device space the path is stored in. The pen and the fill rule are only read by the
/// terminal operations (widening, region construction).
pub trait DeviceContext {
    /// Converts logical points to device points in place.
    fn to_device(&self, points: &mut [Point]);

    fn arc_direction(&self) -> ArcDirection;

    fn graphics_mode(&self) -> GraphicsMode;

    fn fill_rule(&self) -> FillRule;

    fn pen(&self) -> Pen;

    /// The current position of the context, in logical coordinates.
    fn current_position(&self) -> Point;

    /// The outline of a glyph of the selected font, in device units.
    ///
    /// Returns `None` for glyphs that have no outline (spaces, unknown glyphs).
    fn glyph_outline(&self, glyph: GlyphId) -> Option<GlyphOutline>;

    fn point_to_device(&self, point: Point) -> Point {
        let mut points = [point];
        self.to_device(&mut points);
        points[0]
    }
}

/// Index of a glyph in a font.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct GlyphId(pub u32);

/// A piece of a glyph contour, starting where the previous one ends.
///
/// Coordinates are relative to the glyph origin with the y axis pointing up.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum OutlineCurve {
    /// Straight lines through each point.
    Line(Vec<Point>),
    /// A quadratic b-spline: off-curve control points followed by the on-curve end
    /// point. Consecutive control points have an implied on-curve point in between.
    QuadSpline(Vec<Point>),
    /// Cubic bézier curves, three points per curve.
    CubicSpline(Vec<Point>),
}

impl OutlineCurve {
    /// The points of the curve. The last one is where the next curve starts.
    pub fn points(&self) -> &[Point] {
        match self {
            OutlineCurve::Line(points)
            | OutlineCurve::QuadSpline(points)
            | OutlineCurve::CubicSpline(points) => points,
        }
    }
}

/// A closed contour of a glyph.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct GlyphContour {
    pub start: Point,
    pub curves: Vec<OutlineCurve>,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct GlyphOutline {
    pub contours: Vec<GlyphContour>,
    /// Where the next glyph goes, in device units with the y axis pointing down.
    pub advance: Vector,
}

/// A plain `DeviceContext`: a transform and a few attributes, no font.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct DeviceState {
    pub transform: Transform,
    pub arc_direction: ArcDirection,
    pub graphics_mode: GraphicsMode,
    pub fill_rule: FillRule,
    pub pen: Pen,
    pub position: Point,
}

impl DeviceState {
    pub const DEFAULT: Self = DeviceState {
        transform: Transform::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0),
        arc_direction: ArcDirection::CounterClockwise,
        graphics_mode: GraphicsMode::Advanced,
        fill_rule: FillRule::EvenOdd,
        pen: Pen::Geometric(crate::tessellation::StrokeStyle::DEFAULT),
        position: Point::new(0.0, 0.0),
    };

    #[inline]
    pub const fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    #[inline]
    pub const fn with_arc_direction(mut self, direction: ArcDirection) -> Self {
        self.arc_direction = direction;
        self
    }

    #[inline]
    pub const fn with_graphics_mode(mut self, mode: GraphicsMode) -> Self {
        self.graphics_mode = mode;
        self
    }

    #[inline]
    pub const fn with_fill_rule(mut self, fill_rule: FillRule) -> Self {
        self.fill_rule = fill_rule;
        self
    }

    #[inline]
    pub const fn with_pen(mut self, pen: Pen) -> Self {
        self.pen = pen;
        self
    }

    #[inline]
    pub const fn with_position(mut self, position: Point) -> Self {
        self.position = position;
        self
    }
}

impl Default for DeviceState {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl DeviceContext for DeviceState {
    fn to_device(&self, points: &mut [Point]) {
        for p in points {
            *p = self.transform.transform_point(*p);
        }
    }

    fn arc_direction(&self) -> ArcDirection {
        self.arc_direction
    }

    fn graphics_mode(&self) -> GraphicsMode {
        self.graphics_mode
    }

    fn fill_rule(&self) -> FillRule {
        self.fill_rule
    }

    fn pen(&self) -> Pen {
        self.pen
    }

    fn current_position(&self) -> Point {
        self.position
    }

    fn glyph_outline(&self, _glyph: GlyphId) -> Option<GlyphOutline> {
        None
    }
}

#[cfg(test)]
use crate::math::{point, vector};

#[test]
fn device_state_transform() {
    let state = DeviceState::DEFAULT
        .with_transform(Transform::scale(2.0, 3.0).then_translate(vector(1.0, 1.0)))
        .with_arc_direction(ArcDirection::Clockwise);

    let mut points = [point(1.0, 1.0), point(-2.0, 0.0)];
    state.to_device(&mut points);

    assert_eq!(points, [point(3.0, 4.0), point(-3.0, 1.0)]);
    assert_eq!(state.point_to_device(point(0.0, 0.0)), point(1.0, 1.0));
    assert_eq!(state.arc_direction(), ArcDirection::Clockwise);
    assert_eq!(state.graphics_mode(), GraphicsMode::Advanced);
    assert!(state.glyph_outline(GlyphId(3)).is_none());
}
