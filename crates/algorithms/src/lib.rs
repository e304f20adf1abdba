#![deny(bare_trait_objects)]
#![allow(clippy::float_cmp)]

//! Algorithms operating on recorded paths: curve flattening, elliptic arc tessellation
//! and a few measurements.
//!
//! This crate is reexported in [gdipath](../gdipath/index.html).

pub extern crate gdipath_path as path;

pub mod aabb;
pub mod arc;
pub mod area;
pub mod flatten;
pub mod hit_test;

pub use crate::path::geom;
pub use crate::path::math;
