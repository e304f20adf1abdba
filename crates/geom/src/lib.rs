#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::excessive_precision)]
#![allow(clippy::many_single_char_names)]

//! Simple 2D geometric primitives for the path engine, on top of euclid.
//!
//! This crate is reexported in [gdipath](../gdipath/index.html).
//!
//! # Overview.
//!
//! This crate implements the maths needed to record and widen paths:
//!
//! - quadratic and cubic bézier curves (sampling, splitting, degree elevation),
//! - elliptic arc spans approximated with cubic bézier curves.
//!
//! All coordinates are `f64` device coordinates.
//!
//! # Arcs
//!
//! An arc span of at most a quarter turn is approximated by a single cubic bézier curve
//! whose control points sit on the tangents of the end points, at a distance of
//! `k = 4/3 * (1 - cos(h)) / sin(h)` times the radius, `h` being half of the swept angle.
//! See the [arc module](arc/index.html).

// Reexport dependencies.
pub use euclid;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub mod arc;
pub mod cubic_bezier;
pub mod quadratic_bezier;

#[doc(inline)]
pub use crate::cubic_bezier::CubicBezierSegment;
#[doc(inline)]
pub use crate::quadratic_bezier::QuadraticBezierSegment;

pub use crate::math::*;

pub mod math {
    //! f64 version of the euclid types used everywhere. The other gdipath crates
    //! reexport them.

    use euclid;

    /// Alias for ```euclid::default::Point2D<f64>```.
    pub type Point = euclid::default::Point2D<f64>;

    /// Alias for ```euclid::default::Vector2D<f64>```.
    pub type Vector = euclid::default::Vector2D<f64>;

    /// Alias for ```euclid::default::Size2D<f64>```.
    pub type Size = euclid::default::Size2D<f64>;

    /// Alias for ```euclid::default::Box2D<f64>```
    pub type Box2D = euclid::default::Box2D<f64>;

    /// Alias for ```euclid::default::Transform2D<f64>```
    pub type Transform = euclid::default::Transform2D<f64>;

    /// An angle in radians (f64).
    pub type Angle = euclid::Angle<f64>;

    /// Shorthand for `Vector::new(x, y)`.
    #[inline]
    pub fn vector(x: f64, y: f64) -> Vector {
        Vector::new(x, y)
    }

    /// Shorthand for `Point::new(x, y)`.
    #[inline]
    pub fn point(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    /// Shorthand for `Size::new(x, y)`.
    #[inline]
    pub fn size(w: f64, h: f64) -> Size {
        Size::new(w, h)
    }

    /// Builds the box spanned by two corners given in any order.
    #[inline]
    pub fn normalized_box(a: Point, b: Point) -> Box2D {
        Box2D {
            min: a.min(b),
            max: a.max(b),
        }
    }
}

#[test]
fn normalized_box_orders_corners() {
    let b = normalized_box(point(10.0, -2.0), point(-3.0, 4.0));
    assert_eq!(b.min, point(-3.0, -2.0));
    assert_eq!(b.max, point(10.0, 4.0));
}
