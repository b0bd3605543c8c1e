//! Geometry algorithms over caller-owned buffers.
//!
//! Convex hulls, colinearity testing, Bezier flattening and simple polygon triangulation, along
//! with the comparator-and-context sort, search and heap primitives they are built on. Buffers
//! that may need to grow are plain `Vec`s handed in by the caller together with a [`Grow`]
//! policy; see the [`grow`] module for the contract.
use rustc_hash::FxHashSet as HashSet;

#[cfg(test)]
extern crate quickcheck;
#[cfg(test)]
#[macro_use(quickcheck)]
extern crate quickcheck_macros;

mod bit;
mod colinear;
mod curve;
pub mod grow;
mod hull;
mod order;
mod point;
pub mod polygon;
mod triangulate;

pub use bit::*;
pub use colinear::*;
pub use curve::*;
pub use grow::*;
pub use hull::*;
pub use order::*;
pub use point::*;
pub use polygon::*;
pub use triangulate::*;

/// Area can be calculated from an object.
///
/// Note that area is contextual from the object.
/// For instance, a [`Polygon2`] would be the _plan_ area.
/// If implementing this trait be sure to be **explicit** about the area being calculated.
pub trait Area {
    /// Calculate the area of an object.
    fn area(&self) -> f64;
}
