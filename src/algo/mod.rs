//! Mesh modification algorithms.
//!
//! Operators consume the half-edge kernel (and optionally a face selection)
//! and rewrite topology and/or vertex positions. Subdivision operators
//! ([`subdivide`]) refine topology and smooth; modifiers ([`modify`]) only
//! move vertices. All operators are single-threaded, synchronous, and run
//! to completion; the `&mut` mesh borrow is the single-writer discipline.

pub mod modify;
pub mod subdivide;
