#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::float_cmp)]
#![allow(clippy::too_many_arguments)]

//! Recording of drawing primitives into paths.
//!
//! This crate is reexported in [gdipath](../gdipath/index.html).
//!
//! ## Overview
//!
//! A [`PathContext`](struct.PathContext.html) tracks whether a path is being recorded.
//! While it is, drawing primitives are lowered by its
//! [`PathRecorder`](struct.PathRecorder.html) into a
//! [`PathBuffer`](../gdipath_path/struct.PathBuffer.html), in device space. Once the path
//! is ended, it can be flattened, widened or converted into a region.
//!
//! The recorder reads the transform, arc direction and glyph outlines from a
//! [`DeviceContext`](device/trait.DeviceContext.html).
//!
//! ## Examples
//!
//! ```
//! # extern crate gdipath_record;
//! # fn main() -> Result<(), gdipath_record::path::PathError> {
//! use gdipath_record::{DeviceState, PathContext, Primitive};
//! use gdipath_record::math::point;
//!
//! let dc = DeviceState::DEFAULT;
//! let mut context = PathContext::new();
//!
//! context.begin(&dc);
//! context.draw(&mut (), &dc, &Primitive::Rectangle {
//!     from: point(0.0, 0.0),
//!     to: point(10.0, 10.0),
//! })?;
//! context.end()?;
//!
//! let path = context.take_flat_path()?;
//! assert_eq!(path.len(), 4);
//! # Ok(())
//! # }
//! ```

pub use gdipath_algorithms as algorithms;
pub use gdipath_path as path;
pub use gdipath_tessellation as tessellation;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

mod context;
pub mod device;
mod glyph;
mod recorder;
pub mod shapes;

#[cfg(test)]
mod recorder_tests;

pub use crate::path::geom;
pub use crate::path::math;

#[doc(inline)]
pub use crate::context::{ContextMode, DeviceSink, PathContext, PathSnapshot};
#[doc(inline)]
pub use crate::device::{
    DeviceContext, DeviceState, GlyphContour, GlyphId, GlyphOutline, OutlineCurve,
};
#[doc(inline)]
pub use crate::glyph::Advances;
#[doc(inline)]
pub use crate::recorder::{point_type, ArcClosure, PathRecorder, Primitive};
