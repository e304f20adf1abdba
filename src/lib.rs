#![deny(bare_trait_objects)]

//! A path engine for 2D drawing contexts in Rust.
//!
//! Drawing primitives (lines, curves, shapes, arcs, glyph runs) are recorded into
//! paths in device space. Recorded paths can be flattened, widened into the outline of
//! their stroke, or converted into regions.
//!
//! # Crates
//!
//! This meta-crate (`gdipath`) reexports the following sub-crates for convenience:
//!
//! * **gdipath_geom** - Bézier curves and elliptic arc approximation.
//! * **gdipath_path** - The path buffer and the enums shared by every stage.
//! * **gdipath_algorithms** - Flattening, arcs, area, bounding box and hit testing.
//! * **gdipath_tessellation** - Region construction and stroke widening.
//! * **gdipath_record** - Recording of drawing primitives and the path state machine.
//!
//! Each `gdipath_<name>` crate is reexported as a `<name>` module in `gdipath`. For
//! example:
//!
//! ```ignore
//! extern crate gdipath_tessellation;
//! use gdipath_tessellation::Stroker;
//! ```
//!
//! Is equivalent to:
//!
//! ```ignore
//! extern crate gdipath;
//! use gdipath::tessellation::Stroker;
//! ```
//!
//! # Feature flags
//!
//! serialization using serde can be enabled on each crate using the
//! `serialization` feature flag (disabled by default).
//!
//! # Examples
//!
//! ## Widening a recorded path
//!
//! ```
//! use gdipath::math::point;
//! use gdipath::path::PathError;
//! use gdipath::record::{DeviceState, PathContext};
//! use gdipath::tessellation::{LineCap, Pen, PolygonSetBuilder, StrokeStyle};
//!
//! fn main() -> Result<(), PathError> {
//!     let style = StrokeStyle::width(4.0).with_end_cap(LineCap::Flat);
//!     let dc = DeviceState::DEFAULT.with_pen(Pen::Geometric(style));
//!     let mut context = PathContext::new();
//!
//!     context.begin(&dc);
//!     let recorder = context.recorder()?;
//!     recorder.move_to(&dc, point(0.0, 0.0));
//!     recorder.line_to(&dc, point(10.0, 0.0))?;
//!     context.end()?;
//!
//!     // The path becomes the outline of the stroke.
//!     context.widen_path(&dc)?;
//!
//!     let region = context
//!         .path_to_region(&dc, &mut PolygonSetBuilder)
//!         .map_err(|e| e.path_error().unwrap_or(PathError::Unsupported))?;
//!     assert!(region.contains(&point(5.0, 1.0)));
//!     assert!(!region.contains(&point(5.0, 3.0)));
//!
//!     Ok(())
//! }
//! ```

pub extern crate gdipath_algorithms;
pub extern crate gdipath_record;
pub extern crate gdipath_tessellation;

pub use gdipath_algorithms as algorithms;
pub use gdipath_record as record;
pub use gdipath_tessellation as tessellation;
pub use tessellation::geom;
pub use tessellation::path;

pub use path::math;
