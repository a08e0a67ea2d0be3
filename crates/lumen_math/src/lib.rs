//! Math primitives for the lumen path tracer.
//!
//! Vectors come straight from glam, which gives both named (`v.x`) and
//! indexed (`v[0]`) access over a single representation. On top of that this
//! crate adds the types the renderer relies on for its invariants:
//! [`UnitVec3`], [`Ray`], [`Color`] and [`Interval`].

// Re-export glam for convenience
pub use glam::*;

mod color;
mod interval;
mod ray;
mod vector;

pub use color::Color;
pub use interval::Interval;
pub use ray::Ray;
pub use vector::{Axis, UnitVec3};
