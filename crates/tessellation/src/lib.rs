#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::float_cmp)]
#![allow(clippy::too_many_arguments)]

//! Conversion of recorded paths into regions and stroke outlines.
//!
//! This crate is reexported in [gdipath](../gdipath/index.html).
//!
//! ## Overview
//!
//! * [`path_to_region`](region/fn.path_to_region.html) hands the polygons of a path to a
//!   [`RegionSink`](region/trait.RegionSink.html) which builds the actual region.
//! * [`Stroker`](struct.Stroker.html) widens a path: the result is a new path whose
//!   filled interior is the area covered by the pen when stroking the input.
//!
//! ## Widening
//!
//! Each stroke of the (flattened) input is offset on both sides by half of the pen width,
//! producing an "up" rail on the left of the direction of travel (in a y-up frame) and a
//! "down" rail on the right. For odd widths the up rail gets the extra unit.
//!
//! Open strokes get a cap at both ends and become a single closed figure: the up rail
//! followed by the reversed down rail. Closed strokes have no caps and become two closed
//! figures with opposite orientations, so that filling them produces a ring.

pub use gdipath_algorithms as algorithms;
pub use gdipath_path as path;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

mod error;
pub mod region;
mod stroke;


pub use crate::path::geom;
pub use crate::path::math;

#[doc(inline)]
pub use crate::error::*;

#[doc(inline)]
pub use crate::region::{path_to_region, PolygonSet, PolygonSetBuilder, RegionSink};

#[doc(inline)]
pub use crate::stroke::*;

pub use crate::path::{FillRule, PathBuffer, PathError};

/// Line cap as defined by the end cap styles of geometric pens.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum LineCap {
    /// The stroke extends past its end points by half of the pen width.
    Square,
    /// The stroke stops at its end points.
    Flat,
    /// A half disc is added at the end points.
    Round,
}

/// Line join as defined by the join styles of geometric pens.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum LineJoin {
    /// The outer edges are extended until they meet, within the miter limit.
    Miter,
    /// The outer corners are connected with a straight line.
    Bevel,
    /// The outer corners are connected with an arc.
    Round,
}

/// Parameters of the stroker.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub struct StrokeStyle {
    /// Pen width in device units.
    ///
    /// Default value: `StrokeStyle::DEFAULT_WIDTH`.
    pub width: f64,

    /// What cap to use at both ends of open strokes.
    ///
    /// Default value: `LineCap::Round`.
    pub end_cap: LineCap,

    /// Default value: `LineJoin::Round`.
    pub join: LineJoin,

    /// Maximum ratio between the length of a miter and the pen width.
    ///
    /// Must be greater than or equal to 1.0.
    /// Default value: `StrokeStyle::DEFAULT_MITER_LIMIT`.
    pub miter_limit: f64,
}

impl StrokeStyle {
    pub const MINIMUM_MITER_LIMIT: f64 = 1.0;
    pub const DEFAULT_MITER_LIMIT: f64 = 10.0;
    pub const DEFAULT_LINE_CAP: LineCap = LineCap::Round;
    pub const DEFAULT_LINE_JOIN: LineJoin = LineJoin::Round;
    pub const DEFAULT_WIDTH: f64 = 1.0;

    pub const DEFAULT: Self = StrokeStyle {
        width: Self::DEFAULT_WIDTH,
        end_cap: Self::DEFAULT_LINE_CAP,
        join: Self::DEFAULT_LINE_JOIN,
        miter_limit: Self::DEFAULT_MITER_LIMIT,
    };

    #[inline]
    pub fn width(width: f64) -> Self {
        Self::DEFAULT.with_width(width)
    }

    #[inline]
    pub const fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    #[inline]
    pub const fn with_end_cap(mut self, cap: LineCap) -> Self {
        self.end_cap = cap;
        self
    }

    #[inline]
    pub const fn with_join(mut self, join: LineJoin) -> Self {
        self.join = join;
        self
    }

    /// Limits below `MINIMUM_MITER_LIMIT` are clamped.
    #[inline]
    pub fn with_miter_limit(mut self, limit: f64) -> Self {
        self.miter_limit = limit.max(Self::MINIMUM_MITER_LIMIT);
        self
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// The pen selected in a drawing context.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Pen {
    /// A pen whose width is in device units and that can be widened.
    Geometric(StrokeStyle),
    /// A pen drawn with a fixed width regardless of the transform. Cosmetic pens cannot
    /// be widened.
    Cosmetic { width: f64 },
}

impl Pen {
    /// The stroke parameters of geometric pens.
    pub fn stroke_style(&self) -> Option<StrokeStyle> {
        match *self {
            Pen::Geometric(style) => Some(style),
            Pen::Cosmetic { .. } => None,
        }
    }
}

impl Default for Pen {
    fn default() -> Self {
        Pen::Geometric(StrokeStyle::DEFAULT)
    }
}

#[test]
fn stroke_style_builders() {
    let style = StrokeStyle::width(3.0)
        .with_end_cap(LineCap::Flat)
        .with_join(LineJoin::Miter)
        .with_miter_limit(0.5);

    assert_eq!(style.width, 3.0);
    assert_eq!(style.end_cap, LineCap::Flat);
    assert_eq!(style.join, LineJoin::Miter);
    assert_eq!(style.miter_limit, StrokeStyle::MINIMUM_MITER_LIMIT);

    assert_eq!(Pen::Geometric(style).stroke_style(), Some(style));
    assert_eq!(Pen::Cosmetic { width: 1.0 }.stroke_style(), None);
    assert_eq!(Pen::default().stroke_style(), Some(StrokeStyle::DEFAULT));
}
