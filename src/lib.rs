//! # Whittle
//!
//! A polygonal mesh modeling kernel: half-edge topology, face selections,
//! generalized Catmull-Clark subdivision, and convex polygon trimming.
//!
//! Whittle provides a half-edge mesh over faces of arbitrary arity and a
//! small set of modeling operators that rewrite topology and positions in
//! place, designed for procedural modeling and experimentation in
//! computational geometry.
//!
//! ## Features
//!
//! - **Half-edge data structure**: O(1) adjacency queries with type-safe indices
//! - **Flexible indexing**: Support for 16-bit, 32-bit, and 64-bit indices
//! - **Mixed-arity faces**: Triangles, quads, and general n-gons in one mesh
//! - **Face selections**: Operators restricted to a region, stitched to the
//!   untouched neighborhood
//! - **Generalized Catmull-Clark**: Vertex labels as crease marks, blend
//!   factors, boundary and rim preservation
//! - **Position modifiers**: Deformations such as twist-about-axis that
//!   compose with subdivision
//! - **Polygon clipping**: Plane splitting and convex trimming with an
//!   epsilon-thick incidence band
//!
//! ## Quick Start
//!
//! ```
//! use whittle::prelude::*;
//! use nalgebra::Point3;
//!
//! // Build a unit cube
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//!     Point3::new(0.0, 0.0, 1.0),
//!     Point3::new(1.0, 0.0, 1.0),
//!     Point3::new(1.0, 1.0, 1.0),
//!     Point3::new(0.0, 1.0, 1.0),
//! ];
//! let faces = vec![
//!     vec![0, 3, 2, 1],
//!     vec![4, 5, 6, 7],
//!     vec![0, 1, 5, 4],
//!     vec![2, 3, 7, 6],
//!     vec![0, 4, 7, 3],
//!     vec![1, 2, 6, 5],
//! ];
//! let mut mesh: PolyMesh = build_from_faces(&vertices, &faces).unwrap();
//!
//! // Query mesh properties
//! assert_eq!(mesh.num_vertices(), 8);
//! assert_eq!(mesh.euler_characteristic(), 2);
//!
//! // Subdivide it
//! let subdiv = CatmullClark::new();
//! subdiv.apply(&mut mesh);
//! assert_eq!(mesh.num_faces(), 24);
//! ```
//!
//! ## Selections
//!
//! Operators can be restricted to a subset of faces. The selection keeps
//! only face ids; derived vertex partitions are snapshots and must be
//! re-collected after the mesh changes:
//!
//! ```
//! use whittle::prelude::*;
//! # use nalgebra::Point3;
//! # let vertices = vec![
//! #     Point3::new(0.0, 0.0, 0.0),
//! #     Point3::new(1.0, 0.0, 0.0),
//! #     Point3::new(1.0, 1.0, 0.0),
//! #     Point3::new(0.0, 1.0, 0.0),
//! #     Point3::new(0.0, 0.0, 1.0),
//! #     Point3::new(1.0, 0.0, 1.0),
//! #     Point3::new(1.0, 1.0, 1.0),
//! #     Point3::new(0.0, 1.0, 1.0),
//! # ];
//! # let faces = vec![
//! #     vec![0, 3, 2, 1],
//! #     vec![4, 5, 6, 7],
//! #     vec![0, 1, 5, 4],
//! #     vec![2, 3, 7, 6],
//! #     vec![0, 4, 7, 3],
//! #     vec![1, 2, 6, 5],
//! # ];
//! # let mut mesh: PolyMesh = build_from_faces(&vertices, &faces).unwrap();
//! let mut sel = Selection::from_faces([FaceId::new(1)]);
//! CatmullClark::new()
//!     .with_keep_edges(true)
//!     .apply_to_selection(&mut mesh, &mut sel);
//! assert_eq!(mesh.num_faces(), 9);
//! ```
//!
//! ## Polygon Clipping
//!
//! ```
//! use whittle::geom::{Plane, Polygon};
//! use nalgebra::{Point3, Vector3};
//!
//! let square = Polygon::from_points(vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ]);
//! let knife = Plane::new(Point3::new(0.5, 0.0, 0.0), Vector3::x()).unwrap();
//! let (front, back) = square.split(&knife);
//! assert_eq!(front.len(), 4);
//! assert_eq!(back.len(), 4);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod error;
pub mod geom;
pub mod mesh;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use whittle::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algo::modify::{Modifier, Twist};
    pub use crate::algo::subdivide::{Blend, CatmullClark, Subdividor};
    pub use crate::error::{MeshError, Result};
    pub use crate::geom::{Classification, Plane, Polygon};
    pub use crate::mesh::{
        build_from_faces, build_from_quads, to_face_vertex, EdgeId, Face, FaceId, HalfEdge,
        HalfEdgeId, MeshIndex, PolyMesh, Selection, Vertex, VertexId,
    };
}

// Re-export nalgebra types for convenience
pub use nalgebra;
