//! Core mesh data structures and topology operators.
//!
//! The primary type is [`PolyMesh`], a half-edge mesh over polygonal faces
//! of arbitrary arity. It exclusively owns its vertex, half-edge, and face
//! arenas; elements reference each other through type-safe indices
//! ([`VertexId`], [`HalfEdgeId`], [`FaceId`]), which sidesteps cyclic
//! ownership entirely.
//!
//! Meshes are built from face-vertex lists:
//!
//! ```
//! use whittle::mesh::{build_from_faces, PolyMesh};
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//! ];
//! let faces = vec![vec![0, 1, 2]];
//! let mesh: PolyMesh = build_from_faces(&vertices, &faces).unwrap();
//! ```
//!
//! Topology rewrites live on the mesh itself ([`PolyMesh::split_edge`],
//! [`PolyMesh::quad_split_faces`], [`PolyMesh::quad_split_selected`]);
//! [`Selection`] provides non-owning face subsets for restricted operators.

mod builder;
mod halfedge;
mod index;
mod selection;
mod split;

pub use builder::{build_from_faces, build_from_quads, to_face_vertex};
pub use halfedge::{Face, HalfEdge, PolyMesh, Vertex, SMOOTH_LABEL};
pub use index::{EdgeId, FaceId, HalfEdgeId, MeshIndex, VertexId};
pub use selection::Selection;
pub use split::{QuadSplitReport, CENTROID_LABEL, MIDPOINT_LABEL};
