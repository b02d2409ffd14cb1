//! Geometry primitives: planes, classification, and polygon clipping.

mod plane;
mod polygon;

pub use plane::{Classification, Plane, EPSILON};
pub use polygon::Polygon;
