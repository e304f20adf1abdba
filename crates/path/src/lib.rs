#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::match_like_matches_macro)]

//! The vertex buffer that paths are recorded into, and the small enums shared by every
//! stage of the path engine.
//!
//! This crate is reexported in [gdipath](../gdipath/index.html).
//!
//! # Examples
//!
//! ```
//! # extern crate gdipath_path;
//! # fn main() -> Result<(), gdipath_path::PathError> {
//! use gdipath_path::{PathBuffer, VertexKind};
//! use gdipath_path::math::point;
//!
//! let mut path = PathBuffer::new();
//! path.push(point(0.0, 0.0), VertexKind::MoveTo)?;
//! path.append_run(&[point(10.0, 0.0), point(10.0, 10.0)], VertexKind::LineTo)?;
//! path.close_last_stroke();
//!
//! assert_eq!(path.len(), 3);
//! assert_eq!(path.strokes().count(), 1);
//! # Ok(())
//! # }
//! ```

pub use gdipath_geom as geom;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

mod error;
pub mod path_buffer;

#[doc(inline)]
pub use crate::error::PathError;
#[doc(inline)]
pub use crate::path_buffer::{Checkpoint, PathBuffer, Strokes, Vertex, VertexKind};

pub use crate::geom::math;

/// The fill rule defines how to determine what is inside and what is outside of the shape.
///
/// See the SVG specification.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum FillRule {
    EvenOdd,
    NonZero,
}

impl FillRule {
    #[inline]
    pub fn is_in(&self, winding_number: i32) -> bool {
        match *self {
            FillRule::EvenOdd => winding_number % 2 != 0,
            FillRule::NonZero => winding_number != 0,
        }
    }

    #[inline]
    pub fn is_out(&self, winding_number: i32) -> bool {
        !self.is_in(winding_number)
    }
}

impl Default for FillRule {
    fn default() -> Self {
        FillRule::EvenOdd
    }
}

/// The direction arcs and closed shapes are drawn in, as seen on screen (y axis
/// pointing down).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum ArcDirection {
    CounterClockwise,
    Clockwise,
}

impl ArcDirection {
    /// `1.0` for counter-clockwise, `-1.0` for clockwise.
    ///
    /// Multiplying the on-screen signed area of a shape by this gives a positive area
    /// when the shape was drawn in this direction.
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            ArcDirection::CounterClockwise => 1.0,
            ArcDirection::Clockwise => -1.0,
        }
    }

    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            ArcDirection::CounterClockwise => ArcDirection::Clockwise,
            ArcDirection::Clockwise => ArcDirection::CounterClockwise,
        }
    }
}

impl Default for ArcDirection {
    fn default() -> Self {
        ArcDirection::CounterClockwise
    }
}

/// How shape bounds are interpreted.
///
/// In compatible mode the right and bottom edges of boxes are excluded from the shape and
/// arc directions ignore the world transform.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum GraphicsMode {
    Compatible,
    Advanced,
}

impl Default for GraphicsMode {
    fn default() -> Self {
        GraphicsMode::Advanced
    }
}

#[test]
fn fill_rules() {
    assert!(FillRule::EvenOdd.is_in(1));
    assert!(FillRule::EvenOdd.is_out(2));
    assert!(FillRule::EvenOdd.is_in(-3));
    assert!(FillRule::NonZero.is_in(2));
    assert!(FillRule::NonZero.is_in(-1));
    assert!(FillRule::NonZero.is_out(0));
}

#[test]
fn arc_direction_sign() {
    assert_eq!(ArcDirection::CounterClockwise.sign(), 1.0);
    assert_eq!(ArcDirection::Clockwise.sign(), -1.0);
    assert_eq!(ArcDirection::Clockwise.opposite(), ArcDirection::CounterClockwise);
}
